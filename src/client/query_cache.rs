//! Caché de consultas del cliente
//!
//! Guarda la última respuesta de cada colección. No expira sola: cada
//! mutación invalida explícitamente la colección que afecta.

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};

/// Colección cacheable de la API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Routes,
    Reviews(i32),
    Saathis,
    SaathiRequests,
}

impl QueryKey {
    /// Path de la API que llena esta entrada
    pub fn path(&self) -> String {
        match self {
            QueryKey::Routes => "/api/routes".to_string(),
            QueryKey::Reviews(route_id) => format!("/api/routes/{}/reviews", route_id),
            QueryKey::Saathis => "/api/saathis".to_string(),
            QueryKey::SaathiRequests => "/api/saathi/requests".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, serde_json::Value>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn put<T: Serialize>(&mut self, key: QueryKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => {
                self.entries.insert(key, json);
            }
            Err(e) => tracing::warn!("No se pudo cachear {:?}: {}", key, e),
        }
    }

    /// Invalidar una colección. Devuelve `true` si había entrada.
    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reviews_are_keyed_per_route() {
        let mut cache = QueryCache::new();
        cache.put(QueryKey::Reviews(1), &vec![1, 2]);
        cache.put(QueryKey::Reviews(2), &vec![3]);

        assert!(cache.invalidate(&QueryKey::Reviews(1)));
        assert!(!cache.contains(&QueryKey::Reviews(1)));
        assert_eq!(cache.get::<Vec<i32>>(&QueryKey::Reviews(2)), Some(vec![3]));
    }

    #[test]
    fn invalidating_missing_entry_is_a_noop() {
        let mut cache = QueryCache::new();
        assert!(!cache.invalidate(&QueryKey::Routes));
        assert!(cache.is_empty());
    }

    #[test]
    fn paths_match_the_api() {
        assert_eq!(QueryKey::Reviews(7).path(), "/api/routes/7/reviews");
        assert_eq!(QueryKey::SaathiRequests.path(), "/api/saathi/requests");
    }
}
