//! Modelos de Saathi
//!
//! `SaathiRequest` es la solicitud persistida de acompañante.
//! `Saathi` describe a un acompañante; hoy solo existe la lista de muestra
//! de `sample_saathis`, no hay asignación real.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::GeoPoint;

/// Estado de una solicitud de acompañante
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaathiStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl SaathiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaathiStatus::Pending => "pending",
            SaathiStatus::Accepted => "accepted",
            SaathiStatus::Rejected => "rejected",
        }
    }

    /// Solo `accepted` y `rejected` son destinos válidos de una actualización
    pub fn is_decision(&self) -> bool {
        matches!(self, SaathiStatus::Accepted | SaathiStatus::Rejected)
    }
}

impl fmt::Display for SaathiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaathiStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SaathiStatus::Pending),
            "accepted" => Ok(SaathiStatus::Accepted),
            "rejected" => Ok(SaathiStatus::Rejected),
            other => Err(format!("unknown saathi request status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaathiRequest {
    pub id: i32,
    pub user_id: i32,
    pub route_id: i32,
    pub status: SaathiStatus,
    pub created_at: DateTime<Utc>,
}

/// Disponibilidad de un acompañante
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaathiAvailability {
    Available,
    OnTrip,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaathiTrip {
    pub start_location: GeoPoint,
    pub end_location: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Saathi {
    pub id: i32,
    pub name: String,
    pub rating: f64,
    pub total_trips: u32,
    pub current_location: GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub current_route: Option<SaathiTrip>,
    pub status: SaathiAvailability,
}

/// Lista fija de acompañantes de muestra (Delhi)
pub fn sample_saathis() -> Vec<Saathi> {
    vec![
        Saathi {
            id: 1,
            name: "Priya Sharma".to_string(),
            rating: 4.8,
            total_trips: 156,
            current_location: GeoPoint::new(28.6139, 77.2090),
            current_route: None,
            status: SaathiAvailability::Available,
        },
        Saathi {
            id: 2,
            name: "Anjali Patel".to_string(),
            rating: 4.9,
            total_trips: 203,
            current_location: GeoPoint::new(28.6145, 77.2095),
            current_route: Some(SaathiTrip {
                start_location: GeoPoint::new(28.6145, 77.2095),
                end_location: GeoPoint::new(28.6150, 77.2100),
            }),
            status: SaathiAvailability::OnTrip,
        },
        Saathi {
            id: 3,
            name: "Meera Singh".to_string(),
            rating: 4.7,
            total_trips: 98,
            current_location: GeoPoint::new(28.6155, 77.2110),
            current_route: None,
            status: SaathiAvailability::Offline,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_only_known_values() {
        assert_eq!("accepted".parse::<SaathiStatus>(), Ok(SaathiStatus::Accepted));
        assert!("maybe".parse::<SaathiStatus>().is_err());
        assert!("Accepted".parse::<SaathiStatus>().is_err());
        assert!(!SaathiStatus::Pending.is_decision());
    }

    #[test]
    fn sample_saathis_serialize_like_the_mock_api() {
        let json = serde_json::to_value(sample_saathis()).unwrap();
        assert_eq!(json[0]["status"], "available");
        assert_eq!(json[1]["status"], "on_trip");
        assert_eq!(json[1]["currentRoute"]["endLocation"]["lat"], 28.6150);
        assert!(json[2].get("currentRoute").is_none());
        assert_eq!(json[2]["totalTrips"], 98);
    }
}
