//! Modelo de Review (Samiksha)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Valoración inmutable de una ruta
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub route_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
