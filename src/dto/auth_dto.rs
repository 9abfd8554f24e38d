//! DTOs de autenticación: registro y login.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::EmergencyContact;
use crate::utils::validation::{validate_not_blank, PHONE_REGEX};

// Request para registrar un usuario
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_passwords_match", skip_on_field_errors = false))]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    pub confirm_password: String,

    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: String,

    #[validate(regex = "PHONE_REGEX")]
    pub phone: String,

    #[serde(default)]
    #[validate]
    pub emergency_contacts: Vec<EmergencyContact>,
}

fn validate_passwords_match(request: &RegisterRequest) -> Result<(), ValidationError> {
    if request.password != request.confirm_password {
        let mut error = ValidationError::new("passwords_mismatch");
        error.message = Some("Passwords don't match".into());
        return Err(error);
    }
    Ok(())
}

// Request de login
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            username: "priya".into(),
            password: password.into(),
            confirm_password: confirm.into(),
            name: "Priya Sharma".into(),
            phone: "+91 98765 43210".into(),
            emergency_contacts: vec![EmergencyContact {
                name: "Amma".into(),
                phone: "+91 99999 11111".into(),
            }],
        }
    }

    #[test]
    fn matching_passwords_validate() {
        assert!(request("secret1", "secret1").validate().is_ok());
    }

    #[test]
    fn mismatched_passwords_fail_at_schema_level() {
        let errors = request("secret1", "secret2").validate().unwrap_err();
        assert!(errors.errors().contains_key("__all__"));
    }

    #[test]
    fn nested_contact_is_validated() {
        let mut req = request("secret1", "secret1");
        req.emergency_contacts[0].phone = "nope".into();
        assert!(req.validate().is_err());
    }
}
