// Rating dirty-tracking between the local collection and the recommendation service

use cineflix_models::Film;
use std::collections::{HashMap, HashSet};

/// Last score successfully pushed per film id
#[derive(Debug, Clone, Default)]
pub struct RatingLedger {
    pushed: HashMap<String, u8>,
}

impl RatingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rated films whose score differs from the last successful push
    pub fn pending(&self, films: &[Film]) -> Vec<(String, u8)> {
        films
            .iter()
            .filter(|film| film.is_rated())
            .filter(|film| self.pushed.get(&film.id) != Some(&film.rating))
            .map(|film| (film.id.clone(), film.rating))
            .collect()
    }

    pub fn record(&mut self, film_id: impl Into<String>, score: u8) {
        self.pushed.insert(film_id.into(), score);
    }

    /// Forget films that left the collection or lost their rating
    pub fn retain_rated(&mut self, films: &[Film]) {
        let rated: HashSet<&str> = films
            .iter()
            .filter(|film| film.is_rated())
            .map(|film| film.id.as_str())
            .collect();
        self.pushed.retain(|id, _| rated.contains(id.as_str()));
    }

    pub fn last_pushed(&self, film_id: &str) -> Option<u8> {
        self.pushed.get(film_id).copied()
    }

    pub fn len(&self) -> usize {
        self.pushed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pushed.is_empty()
    }
}
