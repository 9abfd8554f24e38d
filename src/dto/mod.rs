//! DTOs de entrada/salida de la API

pub mod auth_dto;
pub mod emergency_dto;
pub mod maps_dto;
pub mod review_dto;
pub mod route_dto;
pub mod saathi_dto;
