use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::SaathiStatus;
use crate::utils::validation::validate_one_of;

// Request para crear una solicitud de acompañante
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaathiRequestRequest {
    pub route_id: i32,

    #[validate(custom = "validate_request_status")]
    pub status: Option<String>,
}

fn validate_request_status(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, &["pending", "accepted", "rejected"])
}

impl CreateSaathiRequestRequest {
    /// Estado inicial; `pending` si se omite. Llamar después de `validate`.
    pub fn initial_status(&self) -> SaathiStatus {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

// Request para cambiar el estado. Se deserializa como valor libre para
// poder responder "Invalid status" también ante tipos incorrectos.
#[derive(Debug, Deserialize)]
pub struct UpdateSaathiStatusRequest {
    pub status: Option<serde_json::Value>,
}

impl UpdateSaathiStatusRequest {
    /// Estado de destino si es exactamente `accepted` o `rejected`
    pub fn decision(&self) -> Option<SaathiStatus> {
        self.status
            .as_ref()
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse::<SaathiStatus>().ok())
            .filter(SaathiStatus::is_decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn initial_status_defaults_to_pending() {
        let req = CreateSaathiRequestRequest { route_id: 1, status: None };
        assert_eq!(req.initial_status(), SaathiStatus::Pending);
    }

    #[test]
    fn unknown_initial_status_fails_validation() {
        let req = CreateSaathiRequestRequest { route_id: 1, status: Some("maybe".into()) };
        assert!(req.validate().is_err());
    }

    #[test]
    fn decision_accepts_only_accepted_or_rejected() {
        let decide = |v| UpdateSaathiStatusRequest { status: Some(v) }.decision();
        assert_eq!(decide(json!("accepted")), Some(SaathiStatus::Accepted));
        assert_eq!(decide(json!("rejected")), Some(SaathiStatus::Rejected));
        assert_eq!(decide(json!("pending")), None);
        assert_eq!(decide(json!("maybe")), None);
        assert_eq!(decide(json!(1)), None);
        assert_eq!(UpdateSaathiStatusRequest { status: None }.decision(), None);
    }
}
