//! Lenient response envelopes.
//!
//! List endpoints answer either with a bare array or with the array wrapped in
//! an object under one of several keys, depending on the service.

use crate::error::{ServiceError, ServiceResult};
use cineflix_models::RemoteFilm;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Records stay raw until [`records`] decodes them one by one
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ListPayload {
    Bare(Vec<Value>),
    Wrapped(ListWrapper),
    Empty(()),
}

#[derive(Deserialize)]
pub(crate) struct ListWrapper {
    #[serde(
        alias = "films",
        alias = "results",
        alias = "recommendations",
        alias = "trending",
        alias = "watchlist",
        alias = "genres",
        alias = "notifications",
        alias = "releases",
        alias = "data"
    )]
    items: Vec<Value>,
}

impl ListPayload {
    pub fn into_vec(self) -> Vec<Value> {
        match self {
            ListPayload::Bare(items) => items,
            ListPayload::Wrapped(wrapper) => wrapper.items,
            ListPayload::Empty(()) => Vec::new(),
        }
    }
}

/// Single-object endpoints that may wrap their payload
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ItemPayload<T> {
    Wrapped(ItemWrapper<T>),
    Bare(T),
}

#[derive(Deserialize)]
pub(crate) struct ItemWrapper<T> {
    #[serde(alias = "film", alias = "suggestion", alias = "data")]
    item: T,
}

impl<T> ItemPayload<T> {
    pub fn into_inner(self) -> T {
        match self {
            ItemPayload::Wrapped(wrapper) => wrapper.item,
            ItemPayload::Bare(item) => item,
        }
    }
}

/// Watched and to-watch collections as stored by the sorting service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilmCollection {
    pub watched_films: Vec<RemoteFilm>,
    pub watchlist_films: Vec<RemoteFilm>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionPayload {
    Bare(Vec<Value>),
    Wrapped {
        data: Box<CollectionPayload>,
    },
    Split {
        #[serde(default, rename = "watchedFilms", alias = "watched", alias = "films")]
        watched_films: Vec<Value>,
        #[serde(default, rename = "watchlistFilms", alias = "watchlist")]
        watchlist_films: Vec<Value>,
    },
    Empty(()),
}

impl From<CollectionPayload> for FilmCollection {
    fn from(payload: CollectionPayload) -> Self {
        match payload {
            CollectionPayload::Bare(films) => FilmCollection {
                watched_films: records(films),
                watchlist_films: Vec::new(),
            },
            CollectionPayload::Split {
                watched_films,
                watchlist_films,
            } => FilmCollection {
                watched_films: records(watched_films),
                watchlist_films: records(watchlist_films),
            },
            CollectionPayload::Wrapped { data } => FilmCollection::from(*data),
            CollectionPayload::Empty(()) => FilmCollection::default(),
        }
    }
}

/// Decode each record on its own, dropping the ones that do not fit
fn records<T: DeserializeOwned>(raw: Vec<Value>) -> Vec<T> {
    let total = raw.len();
    let decoded: Vec<T> = raw
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<T>(record) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Skipping malformed record");
                None
            }
        })
        .collect();
    if decoded.len() < total {
        warn!(kept = decoded.len(), skipped = total - decoded.len(), "Partially decoded list");
    }
    decoded
}

/// An object carrying `success: false` is a failure whatever else it holds
fn reject_failure(value: &Value) -> ServiceResult<()> {
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ServiceError::Application(failure_message(value)));
    }
    Ok(())
}

fn failure_message(value: &Value) -> String {
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("Service reported failure")
        .to_string()
}

pub(crate) fn film_collection(value: Value) -> ServiceResult<FilmCollection> {
    reject_failure(&value)?;
    serde_json::from_value::<CollectionPayload>(value)
        .map(FilmCollection::from)
        .map_err(|e| ServiceError::Decode(e.to_string()))
}

pub(crate) fn list<T: DeserializeOwned>(value: Value) -> ServiceResult<Vec<T>> {
    reject_failure(&value)?;
    serde_json::from_value::<ListPayload>(value)
        .map(|payload| records(payload.into_vec()))
        .map_err(|e| ServiceError::Decode(e.to_string()))
}

pub(crate) fn item<T: DeserializeOwned>(value: Value) -> ServiceResult<T> {
    reject_failure(&value)?;
    serde_json::from_value::<ItemPayload<T>>(value)
        .map(ItemPayload::into_inner)
        .map_err(|e| ServiceError::Decode(e.to_string()))
}

/// Films from a sort/filter response, which must carry `success: true`
pub(crate) fn successful_films(value: Value) -> ServiceResult<Vec<RemoteFilm>> {
    if value.get("success").and_then(Value::as_bool) != Some(true) {
        return Err(ServiceError::Application(failure_message(&value)));
    }
    list(value)
}
