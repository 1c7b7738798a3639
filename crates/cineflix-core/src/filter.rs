//! Local sort and filter, used when the sorting service cannot answer.

use cineflix_models::{Film, FilterCriteria, SortCriteria, SortOrder};
use std::cmp::Ordering;

fn compare(a: &Film, b: &Film, criteria: SortCriteria) -> Ordering {
    match criteria {
        SortCriteria::Rating => a.rating.cmp(&b.rating),
        // Non-numeric years ("N/A") sort as 0
        SortCriteria::Year => a
            .year
            .as_number()
            .unwrap_or(0)
            .cmp(&b.year.as_number().unwrap_or(0)),
        // Unparseable dates sort as the earliest
        SortCriteria::WatchedDate => a.watched_on().cmp(&b.watched_on()),
        SortCriteria::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

/// Stable sort of a copy of `films`
pub fn sort_films(films: &[Film], criteria: SortCriteria, order: SortOrder) -> Vec<Film> {
    let mut sorted = films.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, criteria);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

pub fn matches_filter(film: &Film, criteria: &FilterCriteria) -> bool {
    if let Some(genre) = criteria.genre.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
        let wanted = genre.to_lowercase();
        let found = film
            .genre
            .as_deref()
            .map(|g| g.to_lowercase().contains(&wanted))
            .unwrap_or(false);
        if !found {
            return false;
        }
    }

    if let Some(min) = criteria.min_rating {
        if film.rating < min {
            return false;
        }
    }

    if let Some(max) = criteria.max_rating {
        if film.rating > max {
            return false;
        }
    }

    if let Some(year) = &criteria.year {
        if !film.year.matches(year) {
            return false;
        }
    }

    true
}

pub fn filter_films(films: &[Film], criteria: &FilterCriteria) -> Vec<Film> {
    films
        .iter()
        .filter(|film| matches_filter(film, criteria))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cineflix_models::FilmYear;

    fn film(id: &str, title: &str, rating: u8, year: FilmYear, watched: &str, genre: Option<&str>) -> Film {
        Film {
            id: id.to_string(),
            title: title.to_string(),
            year,
            rating,
            watched_date: watched.to_string(),
            thoughts: String::new(),
            poster: String::new(),
            description: String::new(),
            genre: genre.map(str::to_string),
        }
    }

    fn rated(ratings: &[u8]) -> Vec<Film> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, r)| film(&i.to_string(), &format!("Film {}", i), *r, FilmYear::Number(2000), "2024-01-01", None))
            .collect()
    }

    fn ratings(films: &[Film]) -> Vec<u8> {
        films.iter().map(|f| f.rating).collect()
    }

    #[test]
    fn test_sort_by_rating() {
        let films = rated(&[2, 5, 3]);
        assert_eq!(ratings(&sort_films(&films, SortCriteria::Rating, SortOrder::Desc)), vec![5, 3, 2]);
        assert_eq!(ratings(&sort_films(&films, SortCriteria::Rating, SortOrder::Asc)), vec![2, 3, 5]);
    }

    #[test]
    fn test_sort_by_year_treats_text_as_zero() {
        let films = vec![
            film("1", "A", 0, FilmYear::Number(1999), "", None),
            film("2", "B", 0, FilmYear::not_available(), "", None),
            film("3", "C", 0, FilmYear::Text("2010".to_string()), "", None),
        ];
        let sorted = sort_films(&films, SortCriteria::Year, SortOrder::Asc);
        let ids: Vec<&str> = sorted.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_sort_by_watched_date() {
        let films = vec![
            film("1", "A", 0, FilmYear::default(), "2024-03-01", None),
            film("2", "B", 0, FilmYear::default(), "someday", None),
            film("3", "C", 0, FilmYear::default(), "2023-12-25", None),
        ];
        let sorted = sort_films(&films, SortCriteria::WatchedDate, SortOrder::Desc);
        let ids: Vec<&str> = sorted.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "2"]);
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let films = vec![
            film("1", "zodiac", 0, FilmYear::default(), "", None),
            film("2", "Alien", 0, FilmYear::default(), "", None),
            film("3", "memento", 0, FilmYear::default(), "", None),
        ];
        let sorted = sort_films(&films, SortCriteria::Title, SortOrder::Asc);
        let titles: Vec<&str> = sorted.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "memento", "zodiac"]);
    }

    #[test]
    fn test_min_rating_excludes_unrated() {
        let films = rated(&[0, 2, 3, 5]);
        let criteria = FilterCriteria {
            min_rating: Some(3),
            ..FilterCriteria::default()
        };
        assert_eq!(ratings(&filter_films(&films, &criteria)), vec![3, 5]);
    }

    #[test]
    fn test_genre_substring_case_insensitive() {
        let films = vec![
            film("1", "A", 4, FilmYear::default(), "", Some("Science Fiction, Drama")),
            film("2", "B", 4, FilmYear::default(), "", Some("Comedy")),
            film("3", "C", 4, FilmYear::default(), "", None),
        ];
        let criteria = FilterCriteria {
            genre: Some("fiction".to_string()),
            ..FilterCriteria::default()
        };
        let filtered = filter_films(&films, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn test_year_and_max_rating() {
        let films = vec![
            film("1", "A", 5, FilmYear::Number(2016), "", None),
            film("2", "B", 2, FilmYear::Text("2016".to_string()), "", None),
            film("3", "C", 2, FilmYear::Number(2017), "", None),
        ];
        let criteria = FilterCriteria {
            year: Some(FilmYear::Number(2016)),
            max_rating: Some(4),
            ..FilterCriteria::default()
        };
        let filtered = filter_films(&films, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "2");
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let films = rated(&[0, 1]);
        assert_eq!(filter_films(&films, &FilterCriteria::default()).len(), 2);
    }
}
