use crate::film::FilmYear;
use serde::{Deserialize, Serialize};

/// A film suggested by one of the services (recommendation, trending,
/// wildcard or upcoming release). The producing algorithms are opaque, so
/// every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", from = "SuggestionFields")]
pub struct SuggestedFilm {
    pub id: Option<String>,
    pub title: String,
    pub genre: Option<String>,
    pub release_year: Option<FilmYear>,
    pub description: Option<String>,
    pub poster: Option<String>,
    pub rating: Option<f64>,
    pub reason: Option<String>,
    pub release_date: Option<String>,
}

/// Wire form of a suggestion. Services name some fields differently
/// (TMDB-style `overview`, `posterPath`, `score`, `release_date`), and a
/// payload may carry both spellings.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionFields {
    #[serde(default, deserialize_with = "crate::de::optional_id")]
    id: Option<String>,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    title: String,
    #[serde(default, deserialize_with = "crate::de::optional_genre")]
    genre: Option<String>,
    #[serde(default, deserialize_with = "crate::de::optional_film_year")]
    release_year: Option<FilmYear>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default, rename = "release_date")]
    tmdb_release_date: Option<String>,
}

/// First of the two spellings that carries text
fn preferred(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary.filter(|v| !v.trim().is_empty()).or(fallback)
}

impl From<SuggestionFields> for SuggestedFilm {
    fn from(fields: SuggestionFields) -> Self {
        Self {
            id: fields.id,
            title: fields.title,
            genre: fields.genre,
            release_year: fields.release_year,
            description: preferred(fields.description, fields.overview),
            poster: preferred(fields.poster, fields.poster_path),
            rating: fields.rating.or(fields.score),
            reason: fields.reason,
            release_date: preferred(fields.release_date, fields.tmdb_release_date),
        }
    }
}

impl SuggestedFilm {
    /// "Title (Year)" label used in listings
    pub fn label(&self) -> String {
        match &self.release_year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

/// A genre offered by the wildcard service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    #[serde(deserialize_with = "crate::de::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_accepts_tmdb_style_fields() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "genre": ["Action", "Science Fiction"],
            "releaseYear": 1999,
            "overview": "A hacker learns the truth.",
            "score": 8.7
        }"#;

        let film: SuggestedFilm = serde_json::from_str(json).unwrap();
        assert_eq!(film.id.as_deref(), Some("603"));
        assert_eq!(film.genre.as_deref(), Some("Action, Science Fiction"));
        assert_eq!(film.description.as_deref(), Some("A hacker learns the truth."));
        assert_eq!(film.rating, Some(8.7));
        assert_eq!(film.label(), "The Matrix (1999)");
    }

    #[test]
    fn test_both_spellings_prefer_the_native_field() {
        let json = r#"{
            "title": "Heat",
            "description": "A heist thriller.",
            "overview": "Cops and robbers.",
            "poster": "/native.jpg",
            "posterPath": "/tmdb.jpg",
            "rating": 4.5,
            "score": 0.9
        }"#;

        let film: SuggestedFilm = serde_json::from_str(json).unwrap();
        assert_eq!(film.description.as_deref(), Some("A heist thriller."));
        assert_eq!(film.poster.as_deref(), Some("/native.jpg"));
        assert_eq!(film.rating, Some(4.5));

        let film: SuggestedFilm =
            serde_json::from_str(r#"{"title": "Heat", "description": "", "overview": "Cops and robbers."}"#).unwrap();
        assert_eq!(film.description.as_deref(), Some("Cops and robbers."));
    }

    #[test]
    fn test_genre_numeric_id() {
        let genre: Genre = serde_json::from_str(r#"{"id": 28, "name": "Action"}"#).unwrap();
        assert_eq!(genre.id, "28");
        assert_eq!(genre.name, "Action");
    }
}
