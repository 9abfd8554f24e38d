//! Controladores: reglas de negocio entre los handlers HTTP y el store

pub mod auth_controller;
pub mod emergency_controller;
pub mod review_controller;
pub mod route_controller;
pub mod saathi_controller;
