use crate::film::FilmYear;
use serde::{Deserialize, Serialize};

/// One hit from the TMDB movie search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl SearchResult {
    /// Leading four digits of `release_date`, which TMDB may leave partial
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?.trim();
        date.get(..4)
            .filter(|year| year.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|year| year.parse().ok())
    }

    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", image_base_url.trim_end_matches('/'), p))
    }

    /// Pre-filled add-film form for this result
    pub fn to_draft(&self, image_base_url: &str) -> FilmDraft {
        FilmDraft {
            title: self.title.clone(),
            year: self
                .release_year()
                .map(FilmYear::Number)
                .unwrap_or_else(FilmYear::not_available),
            poster: self.poster_url(image_base_url),
            description: self
                .overview
                .clone()
                .filter(|o| !o.trim().is_empty())
                .unwrap_or_else(|| "No description available.".to_string()),
        }
    }
}

/// Catalog metadata selected for a new film, before the user adds the visit date and rating
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FilmDraft {
    pub title: String,
    pub year: FilmYear,
    pub poster: Option<String>,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w200";

    #[test]
    fn test_draft_from_full_result() {
        let result = SearchResult {
            id: 329865,
            title: "Arrival".to_string(),
            release_date: Some("2016-11-10".to_string()),
            poster_path: Some("/x2FJsf1ElAgr63Y3PNPtJrcmpoe.jpg".to_string()),
            overview: Some("Linguist meets aliens.".to_string()),
        };

        let draft = result.to_draft(IMAGE_BASE);
        assert_eq!(draft.year, FilmYear::Number(2016));
        assert_eq!(
            draft.poster.as_deref(),
            Some("https://image.tmdb.org/t/p/w200/x2FJsf1ElAgr63Y3PNPtJrcmpoe.jpg")
        );
        assert_eq!(draft.description, "Linguist meets aliens.");
    }

    #[test]
    fn test_draft_defaults() {
        let result: SearchResult =
            serde_json::from_str(r#"{"id": 1, "title": "Untitled", "release_date": "", "poster_path": null}"#).unwrap();

        let draft = result.to_draft(IMAGE_BASE);
        assert_eq!(draft.year, FilmYear::not_available());
        assert_eq!(draft.poster, None);
        assert_eq!(draft.description, "No description available.");
    }

    #[test]
    fn test_release_year_from_partial_dates() {
        let with_date = |date: &str| SearchResult {
            id: 1,
            title: "Heat".to_string(),
            release_date: Some(date.to_string()),
            poster_path: None,
            overview: None,
        };

        assert_eq!(with_date("1995-12-15").release_year(), Some(1995));
        assert_eq!(with_date("1995").release_year(), Some(1995));
        assert_eq!(with_date("1995-").release_year(), Some(1995));
        assert_eq!(with_date("").release_year(), None);
        assert_eq!(with_date("TBA").release_year(), None);
        assert_eq!(with_date("95").release_year(), None);
    }
}
