//! Interactive menu over a started [`FilmTracker`].

use super::films::{print_listing, started_tracker};
use super::progress::{is_interactive, Spinner};
use super::prompts::{prompt_optional_number, prompt_rating, prompt_select, prompt_string, prompt_yes_no};
use super::{AppContext, GlobalOptions};
use crate::output::Output;
use crate::tables;
use cineflix_core::{FilmTracker, FilmUpdate, NewFilm, Page};
use cineflix_models::{FilmYear, FilterCriteria, NewWatchlistEntry, SortCriteria, SortOrder, WatchlistStatus};
use color_eyre::eyre::eyre;
use color_eyre::Result;

const MAIN_MENU: &[&str] = &[
    "Add a film (search TMDB)",
    "Add a film manually",
    "My watched films",
    "Film details",
    "Sort films",
    "Filter films",
    "Watchlist",
    "Wildcard suggestion",
    "Recommendations",
    "Trending",
    "Service health",
    "Quit",
];

pub async fn run_session(options: &GlobalOptions, output: &Output) -> Result<()> {
    if !output.is_human() || !is_interactive() {
        return Err(eyre!("The interactive session needs a terminal and human output"));
    }

    let ctx = AppContext::load(options)?;
    let mut tracker = started_tracker(&ctx, output).await;
    output.info(format!(
        "Welcome to CineFlix, {}. {} films in your collection.",
        tracker.user_id(),
        tracker.films().len()
    ));

    loop {
        let choice = prompt_select("What would you like to do?", MAIN_MENU)?;
        match MAIN_MENU[choice] {
            "Add a film (search TMDB)" => add_from_search(&mut tracker, output).await?,
            "Add a film manually" => add_manually(&mut tracker, output).await?,
            "My watched films" => list_films(&mut tracker, output),
            "Film details" => film_details(&mut tracker, output).await?,
            "Sort films" => sort_films(&tracker, output).await?,
            "Filter films" => filter_films(&tracker, output).await?,
            "Watchlist" => watchlist_menu(&mut tracker, output).await?,
            "Wildcard suggestion" => wildcard(&mut tracker, output).await?,
            "Recommendations" => {
                let result = tracker.refresh_recommendations(None).await.map(|films| films.to_vec());
                match result {
                    Ok(films) if films.is_empty() => output.info("No recommendations yet. Rate a few more films first."),
                    Ok(films) => println!("{}", tables::suggestion_table(&films)),
                    Err(_) => show_notice(&mut tracker, output, true),
                }
            }
            "Trending" => {
                let result = tracker.refresh_trending(false).await.map(|films| films.to_vec());
                match result {
                    Ok(films) => println!("{}", tables::suggestion_table(&films)),
                    Err(_) => show_notice(&mut tracker, output, true),
                }
            }
            "Service health" => {
                let spinner = Spinner::start("Checking services...", output);
                let report = tracker.services().health.check_all().await;
                spinner.finish();
                println!("{}", tables::health_table(&report, &ctx.config.services.named()));
            }
            _ => break,
        }
    }

    output.info("Goodbye!");
    Ok(())
}

fn show_notice(tracker: &mut FilmTracker, output: &Output, failed: bool) {
    if let Some(notice) = tracker.take_notice() {
        output.notice(&notice, failed);
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

async fn submit_film(tracker: &mut FilmTracker, film: NewFilm, output: &Output) -> Result<()> {
    let spinner = Spinner::start("Saving film...", output);
    let result = tracker.add_film(film).await;
    spinner.finish();
    show_notice(tracker, output, result.is_err());
    Ok(())
}

async fn add_from_search(tracker: &mut FilmTracker, output: &Output) -> Result<()> {
    tracker.navigate(Page::AddFilms);
    let query = prompt_string("Film title to search", None)?;

    let spinner = Spinner::start("Searching TMDB...", output);
    let result = tracker.search(&query).await.map(|results| results.len());
    spinner.finish();
    match result {
        Err(_) => {
            show_notice(tracker, output, true);
            return Ok(());
        }
        Ok(0) => {
            output.info(format!("No films found for \"{}\"", query.trim()));
            tracker.back();
            return Ok(());
        }
        Ok(_) => {}
    }

    let mut labels: Vec<String> = tracker
        .search_results()
        .iter()
        .map(|r| match r.release_year() {
            Some(year) => format!("{} ({})", r.title, year),
            None => r.title.clone(),
        })
        .collect();
    labels.push("Cancel".to_string());

    let choice = prompt_select("Pick a film", &labels)?;
    if choice + 1 == labels.len() {
        tracker.back();
        return Ok(());
    }

    let draft = tracker.select_search_result(choice)?.clone();
    if !draft.description.is_empty() {
        output.info(&draft.description);
    }
    let watched = prompt_string("Theater visit date (YYYY-MM-DD)", Some(&today()))?;
    let rating = prompt_rating("Rating (0-5, 0 = not rated)", 0)?;

    submit_film(tracker, NewFilm::from_draft(&draft, watched).with_rating(rating), output).await
}

async fn add_manually(tracker: &mut FilmTracker, output: &Output) -> Result<()> {
    tracker.navigate(Page::AddFilms);
    tracker.clear_draft();

    let title = prompt_string("Film title", None)?;
    let year = prompt_string("Release year (blank to use the visit date's year)", None)?;
    let watched = prompt_string("Theater visit date (YYYY-MM-DD)", Some(&today()))?;
    let genre = prompt_string("Genre (optional)", None)?;
    let description = prompt_string("Description (optional)", None)?;
    let rating = prompt_rating("Rating (0-5, 0 = not rated)", 0)?;

    let film = NewFilm {
        year: Some(year.trim())
            .filter(|y| !y.is_empty())
            .and_then(|y| y.parse::<FilmYear>().ok()),
        genre: Some(genre).filter(|g| !g.trim().is_empty()),
        description,
        rating,
        ..NewFilm::new(title, watched)
    };
    submit_film(tracker, film, output).await
}

fn list_films(tracker: &mut FilmTracker, output: &Output) {
    tracker.navigate(Page::WatchedFilms);
    if tracker.films().is_empty() {
        output.info("No watched films yet");
    } else {
        println!("{}", tables::film_table(tracker.films()));
    }
}

async fn film_details(tracker: &mut FilmTracker, output: &Output) -> Result<()> {
    if tracker.films().is_empty() {
        output.info("No watched films yet");
        return Ok(());
    }

    let labels: Vec<String> = tracker
        .films()
        .iter()
        .map(|f| format!("{} ({})", f.title, f.year))
        .collect();
    let choice = prompt_select("Which film?", &labels)?;
    let film_id = tracker.films()[choice].id.clone();
    let film = tracker.select_film(&film_id)?;
    println!("{}", tables::film_details_table(film));

    let actions = ["Update rating and thoughts", "Remove film", "Back"];
    match prompt_select("Film actions", &actions)? {
        0 => {
            let (current_rating, current_thoughts) = match tracker.selected_film() {
                Some(film) => (film.rating, film.thoughts.clone()),
                None => (0, String::new()),
            };
            let rating = prompt_rating("Rating (0-5)", current_rating)?;
            let thoughts = prompt_string("Your thoughts", Some(&current_thoughts))?;
            let update = FilmUpdate {
                rating: Some(rating),
                thoughts: Some(thoughts),
            };
            let result = tracker.update_film(&film_id, update).await;
            show_notice(tracker, output, result.is_err());
        }
        1 => {
            let message = match tracker.request_remove(&film_id) {
                Ok(notice) => notice.message.clone(),
                Err(_) => {
                    show_notice(tracker, output, true);
                    return Ok(());
                }
            };
            if prompt_yes_no(&message, false)? {
                let result = tracker.confirm().await;
                show_notice(tracker, output, result.is_err());
            } else {
                tracker.cancel();
                tracker.back();
            }
        }
        _ => {
            tracker.back();
        }
    }
    Ok(())
}

async fn sort_films(tracker: &FilmTracker, output: &Output) -> Result<()> {
    let criteria = [
        SortCriteria::Rating,
        SortCriteria::Year,
        SortCriteria::WatchedDate,
        SortCriteria::Title,
    ];
    let labels: Vec<String> = criteria.iter().map(|c| c.to_string()).collect();
    let by = criteria[prompt_select("Sort by", &labels)?];
    let order = match prompt_select("Order", &["descending", "ascending"])? {
        0 => SortOrder::Desc,
        _ => SortOrder::Asc,
    };

    let listing = tracker.sort_films(by, order).await;
    print_listing(&listing, output)
}

async fn filter_films(tracker: &FilmTracker, output: &Output) -> Result<()> {
    let genre = prompt_string("Genre contains (blank for any)", None)?;
    let min_rating = prompt_optional_number("Minimum rating (blank for any)")?;
    let max_rating = prompt_optional_number("Maximum rating (blank for any)")?;
    let year = prompt_string("Release year (blank for any)", None)?;

    let criteria = FilterCriteria {
        genre: Some(genre).filter(|g| !g.trim().is_empty()),
        min_rating,
        max_rating,
        year: Some(year.trim())
            .filter(|y| !y.is_empty())
            .and_then(|y| y.parse::<FilmYear>().ok()),
    };
    let listing = tracker.filter_films(&criteria).await;
    print_listing(&listing, output)
}

async fn watchlist_menu(tracker: &mut FilmTracker, output: &Output) -> Result<()> {
    const ACTIONS: &[&str] = &["Show watchlist", "Add a film", "Change status", "Remove a film", "Back"];

    loop {
        match prompt_select("Watchlist", ACTIONS)? {
            0 => {
                if !tracker.refresh_watchlist().await {
                    output.warn("Could not refresh the watchlist, showing the last known entries");
                }
                if tracker.watchlist().is_empty() {
                    output.info("Your watchlist is empty");
                } else {
                    println!("{}", tables::watchlist_table(tracker.watchlist()));
                }
            }
            1 => {
                let title = prompt_string("Film title", None)?;
                if title.trim().is_empty() {
                    output.error("Please enter a film title.");
                    continue;
                }
                let result = tracker.add_to_watchlist(&NewWatchlistEntry::new(title.trim())).await;
                show_notice(tracker, output, result.is_err());
            }
            2 => {
                let Some(entry_id) = pick_watchlist_entry(tracker)? else {
                    output.info("Your watchlist is empty");
                    continue;
                };
                let statuses = [WatchlistStatus::WantToWatch, WatchlistStatus::Watching, WatchlistStatus::Watched];
                let status = &statuses[prompt_select("New status", &statuses)?];
                let result = tracker.update_watchlist_status(&entry_id, status).await;
                show_notice(tracker, output, result.is_err());
            }
            3 => {
                let Some(entry_id) = pick_watchlist_entry(tracker)? else {
                    output.info("Your watchlist is empty");
                    continue;
                };
                let result = tracker.remove_from_watchlist(&entry_id).await;
                show_notice(tracker, output, result.is_err());
            }
            _ => return Ok(()),
        }
    }
}

/// `None` when the watchlist is empty
fn pick_watchlist_entry(tracker: &FilmTracker) -> Result<Option<String>> {
    let entries = tracker.watchlist();
    if entries.is_empty() {
        return Ok(None);
    }
    let labels: Vec<String> = entries
        .iter()
        .map(|e| format!("{} [{}]", e.title, e.status))
        .collect();
    let choice = prompt_select("Which film?", &labels)?;
    Ok(Some(entries[choice].id.clone()))
}

async fn wildcard(tracker: &mut FilmTracker, output: &Output) -> Result<()> {
    let pick = match tracker.wildcard(None).await {
        Ok(pick) => pick,
        Err(_) => {
            show_notice(tracker, output, true);
            return Ok(());
        }
    };
    println!("{}", tables::suggestion_table(std::slice::from_ref(&pick)));

    if prompt_yes_no("Add it to your watchlist?", false)? {
        let result = tracker.add_to_watchlist(&NewWatchlistEntry::from(&pick)).await;
        show_notice(tracker, output, result.is_err());
    }
    Ok(())
}
