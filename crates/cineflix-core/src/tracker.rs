//! Application state and the actions that drive it.
//!
//! [`FilmTracker`] owns the local film collection and mirrors it to the
//! backend services. Every mutating action ends with [`FilmTracker::sync_collection`];
//! remote failures there are logged and reported, never returned.

use crate::diff::RatingLedger;
use crate::error::TrackerError;
use crate::filter;
use crate::navigation::{Notice, Page};
use chrono::Utc;
use cineflix_config::{Config, SyncConfig};
use cineflix_models::{
    Film, FilmDraft, FilmYear, FilterCriteria, CollectionType, Genre, HealthReport, NewWatchlistEntry,
    RemoteFilm, SearchResult, SortCriteria, SortOrder, SuggestedFilm, WatchlistEntry, WatchlistStatus,
};
use cineflix_services::{
    from_remote_all, retry_operation_if, to_remote_all, watchlist_to_remote, RetryOptions, ServiceError,
    Services,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

pub const LIMITED_FEATURES_MESSAGE: &str =
    "Some services are currently unavailable. CineFlix will run with limited features.";

const SEARCH_FAILED_MESSAGE: &str =
    "Failed to fetch search results. Please check your TMDB API key and network connection.";

const PLACEHOLDER_POSTER_BASE: &str = "https://placehold.co/100x150/000000/FFFFFF?text=";

/// Form input for a new watched film
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewFilm {
    pub title: String,
    pub watched_date: String,
    pub year: Option<FilmYear>,
    pub rating: u8,
    pub poster: Option<String>,
    pub description: String,
    pub genre: Option<String>,
}

impl NewFilm {
    pub fn new(title: impl Into<String>, watched_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            watched_date: watched_date.into(),
            ..Self::default()
        }
    }

    /// Form pre-filled from a search result draft
    pub fn from_draft(draft: &FilmDraft, watched_date: impl Into<String>) -> Self {
        Self {
            title: draft.title.clone(),
            watched_date: watched_date.into(),
            year: Some(draft.year.clone()),
            rating: 0,
            poster: draft.poster.clone(),
            description: draft.description.clone(),
            genre: None,
        }
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating;
        self
    }
}

/// Edits allowed on the film details page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilmUpdate {
    pub rating: Option<u8>,
    pub thoughts: Option<String>,
}

/// Action waiting for the user to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    RemoveFilm(String),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StartupReport {
    pub health: HealthReport,
    pub films_loaded: usize,
    pub watchlist_loaded: usize,
    pub failures: Vec<String>,
    pub limited: bool,
}

/// Outcome of pushing the collection to the backend services
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SyncReport {
    pub collection_pushed: bool,
    pub ratings_pushed: usize,
    pub rating_failures: usize,
    pub recommendations_refreshed: bool,
    pub trending_refreshed: bool,
    pub errors: Vec<String>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Sorted or filtered view of the collection
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilmListing {
    pub films: Vec<Film>,
    /// Computed locally because the sorting service failed
    pub local: bool,
}

pub struct FilmTracker {
    services: Services,
    user_id: String,
    retry: RetryOptions,
    sync: SyncConfig,
    films: Vec<Film>,
    watchlist: Vec<WatchlistEntry>,
    recommendations: Vec<SuggestedFilm>,
    trending: Vec<SuggestedFilm>,
    health: HealthReport,
    search_results: Vec<SearchResult>,
    draft: Option<FilmDraft>,
    selected_film: Option<String>,
    page: Page,
    notice: Option<Notice>,
    pending: Option<PendingAction>,
    ledger: RatingLedger,
}

impl FilmTracker {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            user_id: "user1".to_string(),
            retry: RetryOptions::default(),
            sync: SyncConfig::default(),
            films: Vec::new(),
            watchlist: Vec::new(),
            recommendations: Vec::new(),
            trending: Vec::new(),
            health: HealthReport::new(),
            search_results: Vec::new(),
            draft: None,
            selected_film: None,
            page: Page::Home,
            notice: None,
            pending: None,
            ledger: RatingLedger::new(),
        }
    }

    pub fn from_config(services: Services, config: &Config) -> Self {
        Self::new(services)
            .with_user_id(config.user_id.clone())
            .with_retry_options(RetryOptions::from(&config.retry))
            .with_sync_settings(config.sync.clone())
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_retry_options(mut self, retry: RetryOptions) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_sync_settings(mut self, sync: SyncConfig) -> Self {
        self.sync = sync;
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn film(&self, film_id: &str) -> Option<&Film> {
        self.films.iter().find(|f| f.id == film_id)
    }

    pub fn watchlist(&self) -> &[WatchlistEntry] {
        &self.watchlist
    }

    pub fn recommendations(&self) -> &[SuggestedFilm] {
        &self.recommendations
    }

    pub fn trending(&self) -> &[SuggestedFilm] {
        &self.trending
    }

    pub fn health(&self) -> &HealthReport {
        &self.health
    }

    pub fn search_results(&self) -> &[SearchResult] {
        &self.search_results
    }

    pub fn draft(&self) -> Option<&FilmDraft> {
        self.draft.as_ref()
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    // Startup

    /// Poll health, refresh the profile, then pull the collection and
    /// watchlist. Never fails; problems are collected into the report.
    #[instrument(skip(self), fields(user = %self.user_id))]
    pub async fn startup(&mut self) -> StartupReport {
        let mut report = StartupReport::default();

        self.health = self.services.health.check_all().await;
        report.health = self.health.clone();
        let unhealthy = self.health.unhealthy_services();
        if !unhealthy.is_empty() {
            warn!(services = ?unhealthy, "Some services are unhealthy");
        }

        let user = self.user_id.as_str();
        let recommendation = &self.services.recommendation;
        let profile = retry_operation_if(
            || recommendation.create_user_profile(user, &[], &[]),
            self.retry,
            ServiceError::is_transient,
        )
        .await;
        if let Err(e) = profile {
            warn!(error = %e, "Failed to create user profile");
            report.failures.push(format!("profile: {}", e));
        }

        let sorting = &self.services.sorting;
        let collection = retry_operation_if(
            || sorting.get_film_collection(user, CollectionType::Watched),
            self.retry,
            ServiceError::is_transient,
        )
        .await;
        match collection {
            Ok(collection) if !collection.watched_films.is_empty() => {
                self.films = from_remote_all(&collection.watched_films);
                report.films_loaded = self.films.len();
                info!(count = report.films_loaded, "Loaded film collection from sorting service");
            }
            Ok(_) => debug!("Remote film collection is empty, keeping local collection"),
            Err(e) => {
                warn!(error = %e, "Failed to load film collection");
                report.failures.push(format!("collection: {}", e));
            }
        }

        let watchlist_service = &self.services.watchlist;
        let watchlist = retry_operation_if(
            || watchlist_service.get_watchlist(user, None),
            self.retry,
            ServiceError::is_transient,
        )
        .await;
        match watchlist {
            Ok(entries) => {
                self.watchlist = entries;
                report.watchlist_loaded = self.watchlist.len();
            }
            Err(e) => {
                warn!(error = %e, "Failed to load watchlist");
                report.failures.push(format!("watchlist: {}", e));
            }
        }

        report.limited = !self.health.all_healthy() || !report.failures.is_empty();
        if report.limited {
            self.notice = Some(Notice::alert(LIMITED_FEATURES_MESSAGE));
        }

        info!(
            films = report.films_loaded,
            watchlist = report.watchlist_loaded,
            limited = report.limited,
            "Startup complete"
        );
        report
    }

    // Collection mirroring

    /// Push the collection to the sorting service, push changed ratings,
    /// then refresh recommendations and trending.
    #[instrument(skip(self), fields(user = %self.user_id, films = self.films.len()))]
    pub async fn sync_collection(&mut self) -> SyncReport {
        let mut report = SyncReport::default();

        let watched = to_remote_all(&self.films);
        // The push replaces both lists, so send the watchlist snapshot along
        let watchlist: Vec<RemoteFilm> = self.watchlist.iter().map(watchlist_to_remote).collect();
        match self
            .services
            .sorting
            .update_film_collection(&self.user_id, &watched, &watchlist)
            .await
        {
            Ok(_) => report.collection_pushed = true,
            Err(e) => {
                warn!(error = %e, "Failed to sync film collection");
                report.errors.push(format!("collection: {}", e));
            }
        }

        self.ledger.retain_rated(&self.films);
        for (film_id, score) in self.ledger.pending(&self.films) {
            match self
                .services
                .recommendation
                .add_rating(&self.user_id, &film_id, score)
                .await
            {
                Ok(_) => {
                    debug!(film_id = %film_id, score, "Rating pushed");
                    self.ledger.record(film_id, score);
                    report.ratings_pushed += 1;
                }
                Err(e) => {
                    warn!(film_id = %film_id, error = %e, "Failed to push rating");
                    report.rating_failures += 1;
                    report.errors.push(format!("rating {}: {}", film_id, e));
                }
            }
        }

        let rated = self.films.iter().filter(|f| f.is_rated()).count();
        if rated >= self.sync.recommendation_threshold {
            match self
                .services
                .recommendation
                .get_recommendations(&self.user_id, self.sync.recommendation_count)
                .await
            {
                Ok(films) => {
                    self.recommendations = films;
                    report.recommendations_refreshed = true;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to fetch recommendations");
                    report.errors.push(format!("recommendations: {}", e));
                }
            }
        }

        match self.services.recommendation.get_trending().await {
            Ok(films) => {
                self.trending = films;
                report.trending_refreshed = true;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch trending films");
                report.errors.push(format!("trending: {}", e));
            }
        }

        info!(
            collection_pushed = report.collection_pushed,
            ratings_pushed = report.ratings_pushed,
            errors = report.errors.len(),
            "Collection sync finished"
        );
        report
    }

    // Film actions

    #[instrument(skip(self, film), fields(title = %film.title))]
    pub async fn add_film(&mut self, film: NewFilm) -> Result<Film, TrackerError> {
        let title = film.title.trim();
        let watched_date = film.watched_date.trim();
        if title.is_empty() || watched_date.is_empty() {
            return Err(self.fail(TrackerError::MissingFields));
        }
        if film.rating > 5 {
            return Err(self.fail(TrackerError::InvalidRating(film.rating)));
        }

        let year = film
            .year
            .filter(|y| !y.is_blank())
            .unwrap_or_else(|| FilmYear::from_watched_date(watched_date));
        let poster = film
            .poster
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| placeholder_poster(title));

        let new_film = Film {
            id: self.next_film_id(),
            title: title.to_string(),
            year,
            rating: film.rating,
            watched_date: watched_date.to_string(),
            thoughts: String::new(),
            poster,
            description: film.description,
            genre: film.genre.filter(|g| !g.trim().is_empty()),
        };
        self.films.push(new_film.clone());
        info!(film_id = %new_film.id, "Film added");

        self.sync_collection().await;

        self.draft = None;
        self.notice = Some(Notice::alert("Film added successfully!"));
        self.page = Page::WatchedFilms;
        Ok(new_film)
    }

    #[instrument(skip(self, update))]
    pub async fn update_film(&mut self, film_id: &str, update: FilmUpdate) -> Result<Film, TrackerError> {
        if let Some(rating) = update.rating.filter(|r| *r > 5) {
            return Err(self.fail(TrackerError::InvalidRating(rating)));
        }

        let Some(film) = self.films.iter_mut().find(|f| f.id == film_id) else {
            return Err(self.fail(TrackerError::FilmNotFound(film_id.to_string())));
        };
        if let Some(rating) = update.rating {
            film.rating = rating;
        }
        if let Some(thoughts) = update.thoughts {
            film.thoughts = thoughts;
        }
        let updated = film.clone();

        self.sync_collection().await;

        self.notice = Some(Notice::alert("Film details updated successfully!"));
        self.page = Page::WatchedFilms;
        Ok(updated)
    }

    /// Ask for confirmation before removing a film
    pub fn request_remove(&mut self, film_id: &str) -> Result<&Notice, TrackerError> {
        let Some(film) = self.film(film_id) else {
            return Err(self.fail(TrackerError::FilmNotFound(film_id.to_string())));
        };
        let message = format!(
            "Are you sure you want to remove \"{}\"? This action cannot be undone.",
            film.title
        );
        self.pending = Some(PendingAction::RemoveFilm(film_id.to_string()));
        Ok(self.notice.insert(Notice::confirm(message)))
    }

    /// Run the pending action
    pub async fn confirm(&mut self) -> Result<(), TrackerError> {
        match self.pending.take() {
            Some(PendingAction::RemoveFilm(film_id)) => {
                self.notice = None;
                self.remove_film(&film_id).await
            }
            None => Err(TrackerError::NothingPending),
        }
    }

    /// Discard the pending action; returns whether one existed
    pub fn cancel(&mut self) -> bool {
        if self.notice.as_ref().is_some_and(Notice::is_confirm) {
            self.notice = None;
        }
        self.pending.take().is_some()
    }

    #[instrument(skip(self))]
    async fn remove_film(&mut self, film_id: &str) -> Result<(), TrackerError> {
        let before = self.films.len();
        self.films.retain(|f| f.id != film_id);
        if self.films.len() == before {
            return Err(self.fail(TrackerError::FilmNotFound(film_id.to_string())));
        }
        info!(film_id, "Film removed");

        self.sync_collection().await;

        self.selected_film = None;
        self.notice = Some(Notice::alert("Film removed successfully!"));
        self.page = Page::WatchedFilms;
        Ok(())
    }

    fn next_film_id(&self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        while self.films.iter().any(|f| f.id == stamp.to_string()) {
            stamp += 1;
        }
        stamp.to_string()
    }

    // Sort and filter

    /// Sort via the sorting service, falling back to a local sort
    #[instrument(skip(self))]
    pub async fn sort_films(&self, criteria: SortCriteria, order: SortOrder) -> FilmListing {
        match self
            .services
            .sorting
            .sort_films(&self.user_id, criteria, order, CollectionType::Watched)
            .await
        {
            Ok(films) => FilmListing {
                films: from_remote_all(&films),
                local: false,
            },
            Err(e) => {
                warn!(error = %e, "Sorting service failed, sorting locally");
                FilmListing {
                    films: filter::sort_films(&self.films, criteria, order),
                    local: true,
                }
            }
        }
    }

    /// Filter via the sorting service, falling back to a local filter
    #[instrument(skip(self))]
    pub async fn filter_films(&self, criteria: &FilterCriteria) -> FilmListing {
        match self
            .services
            .sorting
            .filter_films(&self.user_id, criteria, CollectionType::Watched)
            .await
        {
            Ok(films) => FilmListing {
                films: from_remote_all(&films),
                local: false,
            },
            Err(e) => {
                warn!(error = %e, "Sorting service failed, filtering locally");
                FilmListing {
                    films: filter::filter_films(&self.films, criteria),
                    local: true,
                }
            }
        }
    }

    // Watchlist

    #[instrument(skip(self, entry), fields(title = %entry.title))]
    pub async fn add_to_watchlist(&mut self, entry: &NewWatchlistEntry) -> Result<String, TrackerError> {
        let response = self
            .services
            .watchlist
            .add_to_watchlist(&self.user_id, entry)
            .await
            .map_err(|e| self.fail(TrackerError::service("Watchlist", e)))?;
        self.refresh_watchlist().await;
        Ok(self.succeed(response_message(&response, "Film added to watchlist!")))
    }

    #[instrument(skip(self))]
    pub async fn remove_from_watchlist(&mut self, film_id: &str) -> Result<String, TrackerError> {
        let response = self
            .services
            .watchlist
            .remove_from_watchlist(&self.user_id, film_id)
            .await
            .map_err(|e| self.fail(TrackerError::service("Watchlist", e)))?;
        self.refresh_watchlist().await;
        Ok(self.succeed(response_message(&response, "Film removed from watchlist!")))
    }

    #[instrument(skip(self))]
    pub async fn update_watchlist_status(
        &mut self,
        film_id: &str,
        status: &WatchlistStatus,
    ) -> Result<String, TrackerError> {
        let response = self
            .services
            .watchlist
            .update_film_status(&self.user_id, film_id, status)
            .await
            .map_err(|e| self.fail(TrackerError::service("Watchlist", e)))?;
        self.refresh_watchlist().await;
        Ok(self.succeed(response_message(&response, "Watchlist status updated!")))
    }

    /// Re-fetch the watchlist; on failure the snapshot is left as it was
    pub async fn refresh_watchlist(&mut self) -> bool {
        match self.services.watchlist.get_watchlist(&self.user_id, None).await {
            Ok(entries) => {
                self.watchlist = entries;
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to refresh watchlist");
                false
            }
        }
    }

    // Suggestions

    /// Fresh random suggestion, optionally limited to one genre
    #[instrument(skip(self))]
    pub async fn wildcard(&mut self, genre_id: Option<&str>) -> Result<SuggestedFilm, TrackerError> {
        let result = match genre_id {
            Some(genre) => self.services.wildcard.get_genre_wildcard(genre).await,
            None => self.services.wildcard.get_wildcard_suggestion().await,
        };
        result.map_err(|e| self.fail(TrackerError::service("Wildcard", e)))
    }

    pub async fn genres(&mut self) -> Result<Vec<Genre>, TrackerError> {
        self.services
            .wildcard
            .get_available_genres()
            .await
            .map_err(|e| self.fail(TrackerError::service("Wildcard", e)))
    }

    pub async fn refresh_trending(&mut self, personalized: bool) -> Result<&[SuggestedFilm], TrackerError> {
        let result = if personalized {
            self.services.recommendation.get_personalized_trending(&self.user_id).await
        } else {
            self.services.recommendation.get_trending().await
        };
        self.trending = result.map_err(|e| self.fail(TrackerError::service("Recommendation", e)))?;
        Ok(&self.trending)
    }

    pub async fn refresh_recommendations(&mut self, count: Option<u32>) -> Result<&[SuggestedFilm], TrackerError> {
        let count = count.unwrap_or(self.sync.recommendation_count);
        let result = self
            .services
            .recommendation
            .get_recommendations(&self.user_id, count)
            .await;
        self.recommendations = result.map_err(|e| self.fail(TrackerError::service("Recommendation", e)))?;
        Ok(&self.recommendations)
    }

    // Search

    #[instrument(skip(self))]
    pub async fn search(&mut self, query: &str) -> Result<&[SearchResult], TrackerError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(self.fail(TrackerError::EmptyQuery));
        }

        match self.services.search.search_movies(query).await {
            Ok(results) => {
                debug!(count = results.len(), "Search finished");
                self.search_results = results;
                self.page = Page::FilmSearchResults;
                Ok(&self.search_results)
            }
            Err(e) => {
                warn!(error = %e, "Film search failed");
                self.notice = Some(Notice::alert(SEARCH_FAILED_MESSAGE));
                Err(TrackerError::service("Search", e))
            }
        }
    }

    /// Turn a search hit into a draft for the add form
    pub fn select_search_result(&mut self, index: usize) -> Result<&FilmDraft, TrackerError> {
        let Some(result) = self.search_results.get(index) else {
            return Err(self.fail(TrackerError::NoSuchResult(index)));
        };
        let draft = result.to_draft(&self.services.search.image_base_url());
        self.page = Page::AddFilms;
        Ok(self.draft.insert(draft))
    }

    pub fn clear_draft(&mut self) {
        self.draft = None;
    }

    // Navigation and notices

    pub fn current_page(&self) -> Page {
        self.page
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    pub fn back(&mut self) -> Page {
        self.page = self.page.back();
        self.page
    }

    pub fn select_film(&mut self, film_id: &str) -> Result<&Film, TrackerError> {
        let Some(index) = self.films.iter().position(|f| f.id == film_id) else {
            return Err(self.fail(TrackerError::FilmNotFound(film_id.to_string())));
        };
        self.selected_film = Some(film_id.to_string());
        self.page = Page::FilmDetails;
        Ok(&self.films[index])
    }

    pub fn selected_film(&self) -> Option<&Film> {
        self.selected_film.as_deref().and_then(|id| self.film(id))
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Raise the failure's notice and hand the error back
    fn fail(&mut self, err: TrackerError) -> TrackerError {
        self.notice = Some(Notice::alert(err.user_message()));
        err
    }

    fn succeed(&mut self, message: String) -> String {
        self.notice = Some(Notice::alert(message.clone()));
        message
    }
}

fn placeholder_poster(title: &str) -> String {
    let prefix: String = title.chars().take(10).collect();
    format!("{}{}", PLACEHOLDER_POSTER_BASE, prefix)
}

/// `message` field of a write response, or the given default
fn response_message(response: &Value, default: &str) -> String {
    response
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}
