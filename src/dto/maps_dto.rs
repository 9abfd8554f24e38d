use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub mode: Option<String>,
}

impl RouteQuery {
    pub fn start(&self) -> GeoPoint {
        GeoPoint::new(self.start_lat, self.start_lng)
    }

    pub fn end(&self) -> GeoPoint {
        GeoPoint::new(self.end_lat, self.end_lng)
    }
}

/// Lugar devuelto por la búsqueda de direcciones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    pub label: Option<String>,
    pub country_code: String,
    pub state: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postcode: Option<String>,
    pub district: Option<String>,
    pub result_type: Option<String>,
    pub distance: Option<f64>,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInstruction {
    pub instruction: String,
    pub distance: f64,
    pub duration: f64,
}

/// Geometría e indicaciones de la primera ruta calculada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub start_location: GeoPoint,
    pub end_location: GeoPoint,
    pub distance: f64,
    pub duration: f64,
    pub polyline: String,
    pub instructions: Vec<RouteInstruction>,
}
