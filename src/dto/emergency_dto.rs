use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{EmergencyContact, GeoPoint};

// Request de alerta de emergencia. Solo se exige que ambos campos estén
// presentes y no sean null: el navegador manda `location` tal cual sale de
// la geolocalización (`latitude`/`longitude`, `accuracy`...), así que no se
// impone forma. Una lista de contactos vacía sí cuenta como presente.
#[derive(Debug, Serialize, Deserialize)]
pub struct EmergencyAlertRequest {
    pub contacts: Option<Value>,
    pub location: Option<Value>,
}

impl EmergencyAlertRequest {
    pub fn new(contacts: &[EmergencyContact], location: GeoPoint) -> Self {
        Self {
            contacts: serde_json::to_value(contacts).ok(),
            location: serde_json::to_value(location).ok(),
        }
    }
}

/// Coordenadas de una ubicación `{lat, lng}` o `{latitude, longitude}`
pub fn location_coordinates(location: &Value) -> Option<(f64, f64)> {
    let pick = |a: &str, b: &str| location.get(a).or_else(|| location.get(b)).and_then(Value::as_f64);
    Some((pick("lat", "latitude")?, pick("lng", "longitude")?))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmergencyAlertResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coordinates_from_either_shape() {
        assert_eq!(location_coordinates(&json!({ "lat": 28.6, "lng": 77.2 })), Some((28.6, 77.2)));
        assert_eq!(
            location_coordinates(&json!({ "latitude": 28.6, "longitude": 77.2, "accuracy": 12.0 })),
            Some((28.6, 77.2))
        );
        assert_eq!(location_coordinates(&json!("near the metro")), None);
    }

    #[test]
    fn null_fields_deserialize_as_missing() {
        let req: EmergencyAlertRequest = serde_json::from_value(json!({ "contacts": [], "location": null })).unwrap();
        assert!(req.contacts.is_some());
        assert!(req.location.is_none());
    }
}
