use crate::film::FilmYear;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field a film collection can be sorted by
///
/// Serialized with the sorting service's field names since it stores films
/// in their microservice form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortCriteria {
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "releaseYear")]
    Year,
    #[serde(rename = "dateWatched")]
    WatchedDate,
    #[serde(rename = "title")]
    Title,
}

impl FromStr for SortCriteria {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "rating" => Ok(SortCriteria::Rating),
            "year" | "releaseyear" => Ok(SortCriteria::Year),
            "watcheddate" | "datewatched" | "date" => Ok(SortCriteria::WatchedDate),
            "title" => Ok(SortCriteria::Title),
            _ => Err(format!(
                "Invalid sort criteria: {}. Use 'rating', 'year', 'watched-date' or 'title'",
                s
            )),
        }
    }
}

impl fmt::Display for SortCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortCriteria::Rating => "rating",
            SortCriteria::Year => "year",
            SortCriteria::WatchedDate => "watched date",
            SortCriteria::Title => "title",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order: {}. Use 'asc' or 'desc'", s)),
        }
    }
}

/// Which of the user's collections a sort/filter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    #[default]
    Watched,
    Watchlist,
    All,
}

impl CollectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionType::Watched => "watched",
            CollectionType::Watchlist => "watchlist",
            CollectionType::All => "all",
        }
    }
}

/// Filter predicate shared by the filtering service and the local fallback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<FilmYear>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.genre.is_none() && self.min_rating.is_none() && self.max_rating.is_none() && self.year.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_criteria_parsing() {
        assert_eq!("rating".parse::<SortCriteria>().unwrap(), SortCriteria::Rating);
        assert_eq!("watched-date".parse::<SortCriteria>().unwrap(), SortCriteria::WatchedDate);
        assert_eq!("watchedDate".parse::<SortCriteria>().unwrap(), SortCriteria::WatchedDate);
        assert_eq!("Year".parse::<SortCriteria>().unwrap(), SortCriteria::Year);
        assert!("runtime".parse::<SortCriteria>().is_err());
    }

    #[test]
    fn test_sort_criteria_wire_names() {
        assert_eq!(serde_json::to_string(&SortCriteria::WatchedDate).unwrap(), "\"dateWatched\"");
        assert_eq!(serde_json::to_string(&SortCriteria::Year).unwrap(), "\"releaseYear\"");
        assert_eq!(serde_json::to_string(&SortOrder::default()).unwrap(), "\"desc\"");
    }

    #[test]
    fn test_filter_criteria_skips_unset_fields() {
        let criteria = FilterCriteria {
            min_rating: Some(3),
            ..FilterCriteria::default()
        };
        assert_eq!(serde_json::to_string(&criteria).unwrap(), r#"{"minRating":3}"#);
        assert!(!criteria.is_empty());
        assert!(FilterCriteria::default().is_empty());
    }
}
