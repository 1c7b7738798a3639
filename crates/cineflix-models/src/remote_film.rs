use crate::film::FilmYear;
use serde::{Deserialize, Serialize};

/// A film in the shape the microservices store it
///
/// Same entity as [`crate::Film`] with `dateWatched`/`releaseYear` instead of
/// `watchedDate`/`year` and a mandatory genre. Serializes to exactly the nine
/// fields the services expect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFilm {
    #[serde(deserialize_with = "crate::de::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub genre: String,
    #[serde(default, deserialize_with = "crate::de::star_rating")]
    pub rating: u8,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub date_watched: String,
    #[serde(default, deserialize_with = "crate::de::film_year")]
    pub release_year: FilmYear,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub poster: String,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::de::null_as_empty")]
    pub thoughts: String,
    /// Some services still send the local `year` field; read but never written
    #[serde(rename = "year", default, skip_serializing, deserialize_with = "crate::de::optional_film_year")]
    pub fallback_year: Option<FilmYear>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_film_field_set() {
        let film = RemoteFilm {
            id: "42".to_string(),
            title: "Heat".to_string(),
            genre: "Crime".to_string(),
            rating: 5,
            date_watched: "2024-03-01".to_string(),
            release_year: FilmYear::Number(1995),
            poster: String::new(),
            description: String::new(),
            thoughts: String::new(),
            fallback_year: Some(FilmYear::Number(1995)),
        };

        let value = serde_json::to_value(&film).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["dateWatched", "description", "genre", "id", "poster", "rating", "releaseYear", "thoughts", "title"]
        );
    }

    #[test]
    fn test_remote_film_reads_legacy_year() {
        let json = r#"{"id": "7", "title": "Alien", "year": 1979}"#;
        let film: RemoteFilm = serde_json::from_str(json).unwrap();
        assert!(film.release_year.is_blank());
        assert_eq!(film.fallback_year, Some(FilmYear::Number(1979)));
        assert_eq!(film.genre, "");
        assert_eq!(film.rating, 0);
    }
}
