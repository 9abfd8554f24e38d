use crate::dto::emergency_dto::{location_coordinates, EmergencyAlertRequest, EmergencyAlertResponse};
use crate::utils::errors::{AppError, AppResult};

/// Alertas de emergencia.
///
/// Solo valida y registra la alerta en el log: no se envían SMS ni llamadas,
/// no se avisa a voluntarios ni autoridades y el evento no se persiste.
pub struct EmergencyController;

impl EmergencyController {
    pub fn alert(&self, user_id: i32, request: EmergencyAlertRequest) -> AppResult<EmergencyAlertResponse> {
        let present = |value: Option<serde_json::Value>| value.filter(|v| !v.is_null());
        let (Some(contacts), Some(location)) = (present(request.contacts), present(request.location)) else {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        };

        let contact_count = contacts.as_array().map_or(0, Vec::len);
        match location_coordinates(&location) {
            Some((lat, lng)) => tracing::warn!(
                user_id,
                contacts = contact_count,
                lat,
                lng,
                "🚨 Alerta de emergencia recibida"
            ),
            None => tracing::warn!(
                user_id,
                contacts = contact_count,
                "🚨 Alerta de emergencia recibida (ubicación sin coordenadas)"
            ),
        }

        Ok(EmergencyAlertResponse { success: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use serde_json::json;

    #[test]
    fn empty_contact_list_is_present() {
        let response = EmergencyController
            .alert(1, EmergencyAlertRequest::new(&[], GeoPoint::new(28.6, 77.2)))
            .unwrap();
        assert!(response.success);
    }

    #[test]
    fn browser_coordinates_are_accepted() {
        let response = EmergencyController
            .alert(1, EmergencyAlertRequest {
                contacts: Some(json!([])),
                location: Some(json!({ "latitude": 28.6, "longitude": 77.2, "accuracy": 12.0 })),
            })
            .unwrap();
        assert!(response.success);
    }

    #[test]
    fn missing_location_is_rejected() {
        for location in [None, Some(serde_json::Value::Null)] {
            let err = EmergencyController
                .alert(1, EmergencyAlertRequest { contacts: Some(json!([])), location })
                .unwrap_err();
            assert!(matches!(err, AppError::BadRequest(ref m) if m == "Missing required fields"));
        }
    }
}
