use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::GeoPoint;

// Request para guardar una ruta buscada.
// Un `userId` en el cuerpo se ignora: siempre se usa el del usuario autenticado.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteRequest {
    #[validate]
    pub start_location: GeoPoint,

    #[validate]
    pub end_location: GeoPoint,

    pub safety_score: Option<i32>,

    #[validate(length(min = 1, max = 32))]
    pub transport_mode: Option<String>,
}
