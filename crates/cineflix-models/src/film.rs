use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used for theater visit dates
pub const WATCHED_DATE_FORMAT: &str = "%Y-%m-%d";

/// A film the user watched in a theater (local form)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    #[serde(deserialize_with = "crate::de::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::de::film_year")]
    pub year: FilmYear,
    #[serde(default, deserialize_with = "crate::de::star_rating")]
    pub rating: u8, // 0 = not rated, otherwise 1-5 stars
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub watched_date: String,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub thoughts: String,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub poster: String,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl Film {
    pub fn is_rated(&self) -> bool {
        self.rating > 0
    }

    /// Theater visit date, if it parses as `YYYY-MM-DD`
    pub fn watched_on(&self) -> Option<NaiveDate> {
        parse_watched_date(&self.watched_date)
    }
}

pub fn parse_watched_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), WATCHED_DATE_FORMAT).ok()
}

/// Release year as the services send it: a number, or free text such as "N/A"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FilmYear {
    Number(i32),
    Text(String),
}

impl FilmYear {
    pub fn not_available() -> Self {
        FilmYear::Text("N/A".to_string())
    }

    /// Numeric value, parsing text years like "1999"
    pub fn as_number(&self) -> Option<i32> {
        match self {
            FilmYear::Number(n) => Some(*n),
            FilmYear::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Zero or empty text; such years are treated as missing
    pub fn is_blank(&self) -> bool {
        match self {
            FilmYear::Number(n) => *n == 0,
            FilmYear::Text(s) => s.trim().is_empty(),
        }
    }

    /// Year of a theater visit date, or "N/A" when the date does not parse
    pub fn from_watched_date(value: &str) -> Self {
        parse_watched_date(value)
            .map(|date| FilmYear::Number(date.year()))
            .unwrap_or_else(FilmYear::not_available)
    }

    /// Exact match: numerically when both sides are numeric, textually otherwise
    pub fn matches(&self, other: &FilmYear) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self.to_string().trim().eq_ignore_ascii_case(other.to_string().trim()),
        }
    }
}

impl Default for FilmYear {
    fn default() -> Self {
        FilmYear::Text(String::new())
    }
}

impl From<i32> for FilmYear {
    fn from(year: i32) -> Self {
        FilmYear::Number(year)
    }
}

impl std::str::FromStr for FilmYear {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i32>() {
            Ok(n) => FilmYear::Number(n),
            Err(_) => FilmYear::Text(s.trim().to_string()),
        })
    }
}

impl fmt::Display for FilmYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilmYear::Number(n) => write!(f, "{}", n),
            FilmYear::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_film_deserializes_loose_payload() {
        let json = r#"{
            "id": 1704067200000,
            "title": "Arrival",
            "year": "2016",
            "rating": 4.0,
            "watchedDate": "2024-01-01",
            "thoughts": null,
            "poster": "https://example.test/arrival.jpg"
        }"#;

        let film: Film = serde_json::from_str(json).unwrap();
        assert_eq!(film.id, "1704067200000");
        assert_eq!(film.year.as_number(), Some(2016));
        assert_eq!(film.rating, 4);
        assert_eq!(film.thoughts, "");
        assert_eq!(film.description, "");
        assert_eq!(film.genre, None);
    }

    #[test]
    fn test_film_serializes_camel_case_without_genre() {
        let film = Film {
            id: "1".to_string(),
            title: "Dune".to_string(),
            year: FilmYear::Number(2021),
            rating: 5,
            watched_date: "2021-10-22".to_string(),
            thoughts: String::new(),
            poster: String::new(),
            description: String::new(),
            genre: None,
        };

        let value = serde_json::to_value(&film).unwrap();
        assert_eq!(value["watchedDate"], "2021-10-22");
        assert_eq!(value["year"], 2021);
        assert!(value.get("genre").is_none());
    }

    #[test]
    fn test_year_from_watched_date() {
        assert_eq!(FilmYear::from_watched_date("2024-01-01"), FilmYear::Number(2024));
        assert_eq!(FilmYear::from_watched_date("soon"), FilmYear::not_available());
    }

    #[test]
    fn test_year_matches_across_representations() {
        assert!(FilmYear::Number(1999).matches(&FilmYear::Text("1999".to_string())));
        assert!(!FilmYear::Number(1999).matches(&FilmYear::Number(2000)));
        assert!(FilmYear::not_available().matches(&FilmYear::Text("n/a".to_string())));
    }

    #[test]
    fn test_blank_years() {
        assert!(FilmYear::default().is_blank());
        assert!(FilmYear::Number(0).is_blank());
        assert!(!FilmYear::not_available().is_blank());
    }
}
