//! Cliente de HERE Maps (geocoding y routing)
//!
//! Las respuestas de HERE se reducen a `Place` y `RouteSummary` casi sin
//! transformar. Ante un 429 del geocoder se espera un retardo fijo y se
//! reintenta una sola vez.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::dto::maps_dto::{Place, RouteInstruction, RouteSummary};
use crate::models::GeoPoint;
use crate::utils::errors::AppError;

pub const HERE_GEOCODE_BASE: &str = "https://geocode.search.hereapi.com";
pub const HERE_ROUTER_BASE: &str = "https://router.hereapi.com";

const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Error)]
pub enum MapsError {
    #[error("rate limited by maps service")]
    RateLimited,

    #[error("maps service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("maps request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No route found")]
    NoRoute,
}

impl From<MapsError> for AppError {
    fn from(err: MapsError) -> Self {
        AppError::ExternalApi(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    items: Vec<GeocodeItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeocodeItem {
    position: GeoPoint,
    address: Option<HereAddress>,
    result_type: Option<String>,
    distance: Option<f64>,
    #[serde(default)]
    categories: Vec<HereCategory>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HereAddress {
    label: Option<String>,
    country_code: Option<String>,
    state: Option<String>,
    city: Option<String>,
    street: Option<String>,
    house_number: Option<String>,
    postal_code: Option<String>,
    district: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HereCategory {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RoutingResponse {
    #[serde(default)]
    routes: Vec<HereRoute>,
}

#[derive(Debug, Deserialize)]
struct HereRoute {
    #[serde(default)]
    sections: Vec<HereSection>,
}

#[derive(Debug, Deserialize)]
struct HereSection {
    summary: HereSummary,
    polyline: String,
    #[serde(default)]
    actions: Vec<HereAction>,
}

#[derive(Debug, Deserialize)]
struct HereSummary {
    length: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct HereAction {
    #[serde(default)]
    instruction: String,
    #[serde(default)]
    length: f64,
    #[serde(default)]
    duration: f64,
}

impl GeocodeItem {
    fn into_place(self, query: &str) -> Place {
        let address = self.address.unwrap_or_default();
        let category = if self.categories.is_empty() {
            "Location".to_string()
        } else {
            self.categories
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Place {
            lat: self.position.lat,
            lng: self.position.lng,
            name: address.label.clone().unwrap_or_else(|| query.to_string()),
            label: address.label,
            country_code: address.country_code.unwrap_or_else(|| "IND".to_string()),
            state: address.state,
            city: address.city,
            street: address.street,
            house_number: address.house_number,
            postcode: address.postal_code,
            district: address.district,
            result_type: self.result_type,
            distance: self.distance,
            category,
        }
    }
}

/// Modo de transporte de la app → modo de HERE
pub fn here_transport_mode(mode: &str) -> &'static str {
    match mode {
        "foot-walking" => "pedestrian",
        "driving-car" => "car",
        "bus" | "metro" | "train" => "publicTransport",
        _ => "car",
    }
}

#[derive(Debug, Clone)]
pub struct HereMapsClient {
    api_key: String,
    geocode_base: String,
    router_base: String,
    retry_delay: Duration,
    client: reqwest::Client,
}

impl HereMapsClient {
    pub fn new(api_key: String) -> Result<Self, MapsError> {
        Self::with_endpoints(
            api_key,
            HERE_GEOCODE_BASE.to_string(),
            HERE_ROUTER_BASE.to_string(),
        )
    }

    pub fn with_endpoints(
        api_key: String,
        geocode_base: String,
        router_base: String,
    ) -> Result<Self, MapsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("SaathiBackend/0.1")
            .build()?;

        Ok(Self {
            api_key,
            geocode_base: geocode_base.trim_end_matches('/').to_string(),
            router_base: router_base.trim_end_matches('/').to_string(),
            retry_delay: Duration::from_secs(1),
            client,
        })
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Buscar lugares en India que coincidan con `query`
    pub async fn geocode(&self, query: &str) -> Result<Vec<Place>, MapsError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/v1/geocode?q={}&in=countryCode:IND&limit=10&apiKey={}",
            self.geocode_base,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key),
        );

        let response = match self.get_json::<GeocodeResponse>(&url).await {
            Err(MapsError::RateLimited) => {
                tracing::warn!("⏳ Rate limit del geocoder, reintentando en {:?}", self.retry_delay);
                tokio::time::sleep(self.retry_delay).await;
                self.get_json::<GeocodeResponse>(&url).await?
            }
            other => other?,
        };

        tracing::debug!("🗺️ Geocoding '{}': {} resultados", query, response.items.len());

        Ok(response
            .items
            .into_iter()
            .map(|item| item.into_place(query))
            .collect())
    }

    /// Calcular la ruta entre dos puntos; devuelve la primera sección de la primera ruta
    pub async fn route(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        mode: &str,
    ) -> Result<RouteSummary, MapsError> {
        let url = format!(
            "{}/v8/routes?transportMode={}&origin={}&destination={}&return=polyline,actions,instructions&apiKey={}",
            self.router_base,
            here_transport_mode(mode),
            start.to_query_param(),
            end.to_query_param(),
            urlencoding::encode(&self.api_key),
        );

        let response: RoutingResponse = self.get_json(&url).await?;

        let section = response
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.sections.into_iter().next())
            .ok_or(MapsError::NoRoute)?;

        Ok(RouteSummary {
            start_location: start,
            end_location: end,
            distance: section.summary.length,
            duration: section.summary.duration,
            polyline: section.polyline,
            instructions: section
                .actions
                .into_iter()
                .map(|action| RouteInstruction {
                    instruction: action.instruction,
                    distance: action.length,
                    duration: action.duration,
                })
                .collect(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, MapsError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MapsError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("❌ HERE respondió {}: {}", status, body);
            return Err(MapsError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }
}
