//! Lenient deserializers for service payloads.
//!
//! The microservices are loosely typed: ids arrive as strings or numbers,
//! ratings as integers or floats, and optional text as `null`.

use crate::film::FilmYear;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
            RawId::Float(f) => f.to_string(),
        }
    }
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(RawId::into_string)
        .unwrap_or_default())
}

pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(RawId::into_string))
}

/// Star rating: rounded and clamped into 0..=5, `null` is "not rated"
pub(crate) fn star_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(clamp_rating(raw))
}

pub fn clamp_rating(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 5.0) as u8
}

pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn film_year<'de, D>(deserializer: D) -> Result<FilmYear, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FilmYear>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn optional_film_year<'de, D>(deserializer: D) -> Result<Option<FilmYear>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FilmYear>::deserialize(deserializer)?.filter(|year| !year.is_blank()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGenre {
    Single(String),
    Many(Vec<String>),
}

/// Genre as a single string or a list joined with ", "
pub(crate) fn optional_genre<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let genre = match Option::<RawGenre>::deserialize(deserializer)? {
        Some(RawGenre::Single(s)) => s,
        Some(RawGenre::Many(list)) => list.join(", "),
        None => String::new(),
    };
    Ok(if genre.trim().is_empty() { None } else { Some(genre) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_rating() {
        assert_eq!(clamp_rating(4.4), 4);
        assert_eq!(clamp_rating(4.5), 5);
        assert_eq!(clamp_rating(9.0), 5);
        assert_eq!(clamp_rating(-1.0), 0);
        assert_eq!(clamp_rating(f64::NAN), 0);
    }
}
