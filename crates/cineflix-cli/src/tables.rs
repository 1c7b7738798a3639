use cineflix_models::{
    Film, Genre, HealthReport, Notification, SearchResult, SuggestedFilm, WatchlistEntry,
};
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold)),
    );
    table
}

pub fn stars(rating: u8) -> String {
    if rating == 0 {
        return "not rated".to_string();
    }
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

pub fn health_table(report: &HealthReport, endpoints: &[(&str, &str)]) -> Table {
    let mut table = table(&["Service", "Status", "URL", "Details"]);
    for (name, record) in report.iter() {
        let url = endpoints
            .iter()
            .find(|(service, _)| *service == name.as_str())
            .map(|(_, url)| *url)
            .unwrap_or("");
        let status = if record.is_healthy() {
            Cell::new("healthy").fg(Color::Green)
        } else {
            Cell::new("unhealthy").fg(Color::Red)
        };
        let details = record
            .error
            .clone()
            .or_else(|| record.timestamp.clone())
            .unwrap_or_default();
        table.add_row(vec![Cell::new(name), status, Cell::new(url), Cell::new(details)]);
    }
    table
}

pub fn film_table(films: &[Film]) -> Table {
    let mut table = table(&["ID", "Title", "Year", "Rating", "Watched", "Genre"]);
    for film in films {
        table.add_row(vec![
            film.id.clone(),
            film.title.clone(),
            film.year.to_string(),
            stars(film.rating),
            film.watched_date.clone(),
            film.genre.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub fn film_details_table(film: &Film) -> Table {
    let mut table = table(&["Field", "Value"]);
    table.add_row(vec!["Title", film.title.as_str()]);
    table.add_row(vec!["Year".to_string(), film.year.to_string()]);
    table.add_row(vec!["Rating".to_string(), stars(film.rating)]);
    table.add_row(vec!["Watched", film.watched_date.as_str()]);
    table.add_row(vec!["Genre", film.genre.as_deref().unwrap_or("")]);
    table.add_row(vec!["Description", film.description.as_str()]);
    table.add_row(vec!["Thoughts", film.thoughts.as_str()]);
    table.add_row(vec!["Poster", film.poster.as_str()]);
    table
}

pub fn suggestion_table(films: &[SuggestedFilm]) -> Table {
    let mut table = table(&["Title", "Genre", "Score", "Why"]);
    for film in films {
        table.add_row(vec![
            film.label(),
            film.genre.clone().unwrap_or_default(),
            film.rating.map(|r| format!("{:.1}", r)).unwrap_or_default(),
            truncate(
                film.reason
                    .as_deref()
                    .or(film.description.as_deref())
                    .unwrap_or(""),
                60,
            ),
        ]);
    }
    table
}

pub fn watchlist_table(entries: &[WatchlistEntry]) -> Table {
    let mut table = table(&["ID", "Title", "Year", "Genre", "Status", "Added"]);
    for entry in entries {
        table.add_row(vec![
            entry.id.clone(),
            entry.title.clone(),
            entry.release_year.to_string(),
            entry.genre.clone(),
            entry.status.to_string(),
            entry.added_at.clone(),
        ]);
    }
    table
}

pub fn search_table(results: &[SearchResult]) -> Table {
    let mut table = table(&["#", "Title", "Year", "Overview"]);
    for (index, result) in results.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            result.title.clone(),
            result.release_year().map(|y| y.to_string()).unwrap_or_else(|| "N/A".to_string()),
            truncate(result.overview.as_deref().unwrap_or(""), 60),
        ]);
    }
    table
}

pub fn genre_table(genres: &[Genre]) -> Table {
    let mut table = table(&["ID", "Genre"]);
    for genre in genres {
        table.add_row(vec![genre.id.as_str(), genre.name.as_str()]);
    }
    table
}

pub fn notification_table(notifications: &[Notification]) -> Table {
    let mut table = table(&["Film", "Message", "Created", "Read"]);
    for notification in notifications {
        table.add_row(vec![
            notification.film_title.clone().unwrap_or_default(),
            notification.message.clone(),
            notification.created_at.clone().unwrap_or_default(),
            if notification.read { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}
