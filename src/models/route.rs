//! Modelo de Route
//!
//! Un trayecto guardado por el usuario tras una búsqueda.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::GeoPoint;

/// Puntuación asignada cuando el cliente no envía una positiva
pub const DEFAULT_SAFETY_SCORE: i32 = 85;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: i32,
    pub user_id: i32,
    pub start_location: GeoPoint,
    pub end_location: GeoPoint,
    pub safety_score: i32,
    pub transport_mode: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Puntuación efectiva: la enviada si es positiva, si no la de por defecto.
/// No se acota a 0–100.
pub fn effective_safety_score(requested: Option<i32>) -> i32 {
    match requested {
        Some(score) if score > 0 => score,
        _ => DEFAULT_SAFETY_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_score_defaults() {
        assert_eq!(effective_safety_score(None), 85);
        assert_eq!(effective_safety_score(Some(0)), 85);
        assert_eq!(effective_safety_score(Some(-3)), 85);
        assert_eq!(effective_safety_score(Some(40)), 40);
        assert_eq!(effective_safety_score(Some(140)), 140);
    }
}
