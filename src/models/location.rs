//! Coordenadas geográficas compartidas por rutas, Saathis y alertas.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Par latitud/longitud en grados decimales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoPoint {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Formato `lat,lng` que esperan las APIs de HERE
    pub fn to_query_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_latitude_fails() {
        assert!(GeoPoint::new(28.6, 77.2).validate().is_ok());
        let errors = GeoPoint::new(128.6, 77.2).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("lat"));
    }

    #[test]
    fn query_param_is_lat_first() {
        assert_eq!(GeoPoint::new(28.6, 77.2).to_query_param(), "28.6,77.2");
    }
}
