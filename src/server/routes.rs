//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::constants::ADDRESS_NOT_FOUND;
use crate::error::Error;
use crate::geo::lookup::{lookup_marker_address, search_location, MarkerAddress};
use crate::geo::{Coordinates, GeoLocation};
use crate::server::state::AppState;
use crate::service::CreateAddressRequest;
use crate::store::StoredAddress;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/address", get(list_addresses_handler).post(create_address_handler))
        .route(
            "/address/:id",
            get(address_handler).delete(delete_address_handler),
        )
        .route("/api/reverse", get(reverse_handler))
        .route("/api/geocode", get(geocode_handler))
        .route("/api/status", get(status_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "INVALID_COORDINATES" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "GEOCODING_ERROR" => StatusCode::BAD_GATEWAY,
            "GEOCODING_UNAVAILABLE" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Geocoding(_) => "GEOCODING_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError::new(code, err.to_string())
    }
}

fn geocoding_unavailable() -> ApiError {
    ApiError::new("GEOCODING_UNAVAILABLE", "Geocoding is not configured on this server")
}

/// List saved addresses, oldest first
///
/// GET /address
async fn list_addresses_handler(State(state): State<Arc<AppState>>) -> Json<Vec<StoredAddress>> {
    let store = state.store.read().await;
    Json(store.entries().to_vec())
}

/// Save an address
///
/// POST /address
async fn create_address_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAddressRequest>,
) -> Result<(StatusCode, Json<StoredAddress>), ApiError> {
    let mut store = state.store.write().await;

    let entry = store.add(req.address_data);
    if let Err(e) = store.save() {
        error!("Failed to persist address {}: {}", entry.id, e);
        store.remove(&entry.id);
        return Err(ApiError::from(e));
    }

    info!(
        id = %entry.id,
        address = entry.record.formatted_address.as_deref().unwrap_or(""),
        "Address saved"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Get a single saved address
///
/// GET /address/:id
async fn address_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StoredAddress>, ApiError> {
    let store = state.store.read().await;

    store
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::from(Error::NotFound(format!("Address {}", id))))
}

/// Delete a saved address
///
/// DELETE /address/:id
async fn delete_address_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;

    match store.delete(&id) {
        Ok(Some(_)) => {
            info!(id = %id, "Address deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(None) => Err(ApiError::from(Error::NotFound(format!("Address {}", id)))),
        Err(e) => {
            error!("Failed to persist deletion of address {}: {}", id, e);
            Err(ApiError::from(e))
        }
    }
}

/// Reverse geocode query parameters
#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lng: f64,
}

/// Look up the address under a marker
///
/// GET /api/reverse?lat=&lng=
async fn reverse_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReverseQuery>,
) -> Result<Json<MarkerAddress>, ApiError> {
    let geocoder = state.geocoder().ok_or_else(geocoding_unavailable)?;

    let coords = Coordinates::new(query.lat, query.lng);
    coords.validate().map_err(ApiError::from)?;

    lookup_marker_address(geocoder, coords)
        .await
        .map_err(ApiError::from)?
        .map(Json)
        .ok_or_else(|| ApiError::new("NOT_FOUND", ADDRESS_NOT_FOUND))
}

/// Geocode query parameters
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub address: String,
}

/// Find the location of an address
///
/// GET /api/geocode?address=
async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<GeoLocation>, ApiError> {
    let geocoder = state.geocoder().ok_or_else(geocoding_unavailable)?;

    search_location(geocoder, &query.address)
        .await
        .map_err(ApiError::from)?
        .map(Json)
        .ok_or_else(|| ApiError::new("NOT_FOUND", format!("No match for '{}'", query.address)))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Number of saved addresses
    pub addresses: usize,
    /// Whether geocoding endpoints are available
    pub geocoding: bool,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Initial map view for clients
    pub map: MapView,
}

/// Where a client map opens before any pin is dropped
#[derive(Debug, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let addresses = state.store.read().await.len();

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        addresses,
        geocoding: state.geocoder().is_some(),
        uptime_secs: state.uptime_secs(),
        map: MapView {
            center: Coordinates::new(state.config.map.center_lat, state.config.map.center_lng),
            zoom: state.config.map.zoom,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::geo::google::GoogleGeocoder;
    use crate::store::AddressStore;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tempfile::TempDir;
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    fn create_test_state(temp_dir: &TempDir, geocoder: Option<GoogleGeocoder>) -> Arc<AppState> {
        let store = AddressStore::load_from(temp_dir.path().join("addresses.json")).unwrap();
        Arc::new(AppState::with_geocoder(Config::default(), store, geocoder))
    }

    /// Fake geocoding provider answering every request with `body`
    async fn spawn_provider(body: serde_json::Value) -> GoogleGeocoder {
        let app = Router::new().route(
            "/json",
            get(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        GoogleGeocoder::new("test-key")
            .unwrap()
            .with_base_url(&format!("http://{}", addr))
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn post_address(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/address")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let app = create_router(create_test_state(&temp_dir, None));

        let response = app
            .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let status: StatusResponse = body_json(response).await;
        assert!(status.running);
        assert_eq!(status.addresses, 0);
        assert!(!status.geocoding);
        assert_eq!(status.map.zoom, 8);
        assert_eq!(status.map.center, Coordinates::new(6.927079, 79.861244));
    }

    #[tokio::test]
    async fn test_status_reports_configured_map_view() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.set("map.zoom", "11").unwrap();
        config.set("map.center_lat", "7.2906").unwrap();
        config.set("map.center_lng", "80.6337").unwrap();

        let store = AddressStore::load_from(temp_dir.path().join("addresses.json")).unwrap();
        let state = Arc::new(AppState::with_geocoder(config, store, None));

        let response = create_router(state)
            .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status: StatusResponse = body_json(response).await;
        assert_eq!(status.map.zoom, 11);
        assert_eq!(status.map.center, Coordinates::new(7.2906, 80.6337));
    }

    #[tokio::test]
    async fn test_create_and_list_addresses() {
        let temp_dir = TempDir::new().unwrap();
        let state = create_test_state(&temp_dir, None);

        let response = create_router(state.clone())
            .oneshot(post_address(json!({
                "addressData": {
                    "street_number": "12",
                    "locality": "Colombo",
                    "formatted_address": "12, Colombo"
                }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let created: StoredAddress = body_json(response).await;
        assert_eq!(created.record.locality.as_deref(), Some("Colombo"));

        let response = create_router(state.clone())
            .oneshot(Request::builder().uri("/address").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let all: Vec<StoredAddress> = body_json(response).await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);

        // Persisted to disk as well
        let reloaded = AddressStore::load_from(temp_dir.path().join("addresses.json")).unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_address_data() {
        let temp_dir = TempDir::new().unwrap();
        let app = create_router(create_test_state(&temp_dir, None));

        let response = app
            .oneshot(post_address(json!({"formatted_address": "12, Colombo"})))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_get_and_delete_address() {
        let temp_dir = TempDir::new().unwrap();
        let state = create_test_state(&temp_dir, None);
        let id = {
            let mut store = state.store.write().await;
            store.add(crate::address::normalize(&[], "Kandy")).id
        };

        let response = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .uri(format!("/address/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/address/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri(format!("/address/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let err: ApiError = body_json(response).await;
        assert_eq!(err.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_address() {
        let temp_dir = TempDir::new().unwrap();
        let state = create_test_state(&temp_dir, None);

        let response = create_router(state.clone())
            .oneshot(post_address(json!({
                "addressData": { "locality": "Galle", "formatted_address": "Galle" }
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: StoredAddress = body_json(response).await;

        // Swap the store file for a directory so the next save fails
        let path = temp_dir.path().join("addresses.json");
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let response = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/address/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri(format!("/address/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let kept: StoredAddress = body_json(response).await;
        assert_eq!(kept, created);
    }

    #[tokio::test]
    async fn test_reverse_without_geocoder() {
        let temp_dir = TempDir::new().unwrap();
        let app = create_router(create_test_state(&temp_dir, None));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reverse?lat=6.9&lng=79.8")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_reverse_endpoint() {
        let temp_dir = TempDir::new().unwrap();
        let geocoder = spawn_provider(json!({
            "status": "OK",
            "results": [{
                "formatted_address": "12, Colombo",
                "address_components": [
                    {"long_name": "12", "short_name": "12", "types": ["street_number"]},
                    {"long_name": "Colombo", "short_name": "Colombo", "types": ["locality", "political"]},
                    {"long_name": "Fort", "short_name": "Fort", "types": ["sublocality", "political"]}
                ]
            }]
        }))
        .await;
        let app = create_router(create_test_state(&temp_dir, Some(geocoder)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reverse?lat=6.9271&lng=79.8612")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let marker: MarkerAddress = body_json(response).await;
        assert_eq!(marker.address, "12, Colombo");
        assert_eq!(marker.record.street_number.as_deref(), Some("12"));
        assert_eq!(marker.record.locality.as_deref(), Some("Colombo"));
    }

    #[tokio::test]
    async fn test_reverse_zero_results() {
        let temp_dir = TempDir::new().unwrap();
        let geocoder = spawn_provider(json!({"status": "ZERO_RESULTS", "results": []})).await;
        let app = create_router(create_test_state(&temp_dir, Some(geocoder)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reverse?lat=0&lng=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let err: ApiError = body_json(response).await;
        assert_eq!(err.error, ADDRESS_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reverse_invalid_coordinates() {
        let temp_dir = TempDir::new().unwrap();
        let geocoder = spawn_provider(json!({"status": "ZERO_RESULTS"})).await;
        let app = create_router(create_test_state(&temp_dir, Some(geocoder)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reverse?lat=91&lng=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let err: ApiError = body_json(response).await;
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_geocode_provider_error() {
        let temp_dir = TempDir::new().unwrap();
        let geocoder = spawn_provider(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }))
        .await;
        let app = create_router(create_test_state(&temp_dir, Some(geocoder)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/geocode?address=Colombo")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let err: ApiError = body_json(response).await;
        assert_eq!(err.code, "GEOCODING_ERROR");
    }
}
