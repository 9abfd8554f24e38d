//! Utilidades de validación
//!
//! Validadores personalizados que se usan desde los `#[derive(Validate)]`
//! de los DTOs, más el extractor `ValidatedJson`.

use std::borrow::Cow;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::utils::errors::AppError;

lazy_static! {
    /// Teléfono: dígitos con separadores opcionales y prefijo internacional
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{5,19}$").unwrap();
}

/// Validar que un string no esté vacío (ignorando espacios)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some(Cow::from("must not be empty"));
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_one_of(value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if !allowed.contains(&value) {
        let mut error = ValidationError::new("one_of");
        error.add_param(Cow::from("value"), &value);
        error.add_param(Cow::from("allowed_values"), &allowed);
        return Err(error);
    }
    Ok(())
}

/// Extractor JSON que además ejecuta `Validate`.
///
/// Un cuerpo que no se puede deserializar se convierte en 400 con el mensaje
/// de serde (que nombra el campo), en lugar del 422 por defecto de axum.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_regex_accepts_common_formats() {
        assert!(PHONE_REGEX.is_match("+91 98765 43210"));
        assert!(PHONE_REGEX.is_match("011-2345678"));
        assert!(!PHONE_REGEX.is_match("call me"));
        assert!(!PHONE_REGEX.is_match("12"));
    }

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(validate_not_blank("Priya").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn one_of_checks_membership() {
        assert!(validate_one_of("accepted", &["accepted", "rejected"]).is_ok());
        let err = validate_one_of("maybe", &["accepted", "rejected"]).unwrap_err();
        assert_eq!(err.code, "one_of");
    }
}
