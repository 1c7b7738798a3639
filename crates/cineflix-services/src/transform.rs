//! Conversions between the local film record and the microservice film record.

use chrono::Datelike;
use cineflix_models::{Film, FilmYear, RemoteFilm, WatchlistEntry};

/// Local film → microservice shape, filling in service-side defaults
pub fn to_remote(film: &Film) -> RemoteFilm {
    to_remote_in_year(film, chrono::Local::now().year())
}

fn to_remote_in_year(film: &Film, current_year: i32) -> RemoteFilm {
    let genre = film
        .genre
        .as_deref()
        .filter(|g| !g.trim().is_empty())
        .unwrap_or("Unknown")
        .to_string();
    let release_year = if film.year.is_blank() {
        FilmYear::Number(current_year)
    } else {
        film.year.clone()
    };

    RemoteFilm {
        id: film.id.clone(),
        title: film.title.clone(),
        genre,
        rating: film.rating,
        date_watched: film.watched_date.clone(),
        release_year,
        poster: film.poster.clone(),
        description: film.description.clone(),
        thoughts: film.thoughts.clone(),
        fallback_year: None,
    }
}

/// Microservice shape → local film; `releaseYear` falls back to a legacy `year`
pub fn from_remote(film: &RemoteFilm) -> Film {
    let year = if film.release_year.is_blank() {
        film.fallback_year.clone().unwrap_or_default()
    } else {
        film.release_year.clone()
    };
    let genre = Some(film.genre.clone()).filter(|g| !g.trim().is_empty());

    Film {
        id: film.id.clone(),
        title: film.title.clone(),
        year,
        rating: film.rating,
        watched_date: film.date_watched.clone(),
        thoughts: film.thoughts.clone(),
        poster: film.poster.clone(),
        description: film.description.clone(),
        genre,
    }
}

pub fn to_remote_all(films: &[Film]) -> Vec<RemoteFilm> {
    films.iter().map(to_remote).collect()
}

pub fn from_remote_all(films: &[RemoteFilm]) -> Vec<Film> {
    films.iter().map(from_remote).collect()
}

/// Watchlist entry in the sorting service's collection shape (unrated, not yet watched)
pub fn watchlist_to_remote(entry: &WatchlistEntry) -> RemoteFilm {
    RemoteFilm {
        id: entry.id.clone(),
        title: entry.title.clone(),
        genre: if entry.genre.trim().is_empty() {
            "Unknown".to_string()
        } else {
            entry.genre.clone()
        },
        rating: 0,
        date_watched: String::new(),
        release_year: entry.release_year.clone(),
        poster: entry.poster.clone().unwrap_or_default(),
        description: entry.description.clone().unwrap_or_default(),
        thoughts: String::new(),
        fallback_year: None,
    }
}
