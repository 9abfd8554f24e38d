//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que se guardan en el store
//! y se devuelven por la API (JSON en camelCase).

pub mod location;
pub mod review;
pub mod route;
pub mod saathi;
pub mod session;
pub mod user;

pub use location::GeoPoint;
pub use review::Review;
pub use route::Route;
pub use saathi::{Saathi, SaathiRequest, SaathiStatus};
pub use session::Session;
pub use user::{EmergencyContact, User};
