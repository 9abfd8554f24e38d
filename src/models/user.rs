//! Modelo de User
//!
//! Registro de identidad: credenciales y contactos de emergencia.
//! El hash de la contraseña nunca se serializa.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{validate_not_blank, PHONE_REGEX};

/// Contacto de emergencia del usuario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EmergencyContact {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[validate(regex = "PHONE_REGEX")]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub name: String,
    pub phone: String,
    pub emergency_contacts: Vec<EmergencyContact>,
}
