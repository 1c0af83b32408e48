//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::catalog::{DealerCategory, Product, ProductCategory, Record};
use crate::coord::Coordinates;
use crate::error::Error;
use crate::forms::{ContactMessage, DistributorApplication, Receipt};
use crate::geo::{GeoLocation, GeolocationError};
use crate::map::MapFeed;
use crate::query::{discover, validate_radius, DiscoveryResult, FilterCriteria, SortKey};
use crate::server::state::AppState;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts, Path, Query, State},
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .route("/api/dealers", get(dealers_handler))
        .route("/api/dealers/:id", get(dealer_handler))
        .route("/api/products", get(products_handler))
        .route("/api/products/:id", get(product_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/map", get(map_handler))
        .route("/api/location", get(location_handler))
        .route("/api/contact", post(contact_handler))
        .route("/api/distributor-applications", post(application_handler))
        .route("/api/status", get(status_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
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
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "MAP_UNAVAILABLE" | "LOCATION_UNAVAILABLE" => StatusCode::SERVICE_UNAVAILABLE,
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::NotFound(_) => "NOT_FOUND",
            Error::MapUnavailable(_) => "MAP_UNAVAILABLE",
            Error::Geolocation(_) => "LOCATION_UNAVAILABLE",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        let error = match &err {
            Error::Geolocation(e) => e.user_message().to_string(),
            _ => err.to_string(),
        };
        ApiError {
            error,
            code: code.to_string(),
        }
    }
}

/// Search query parameters shared by the listing endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text query
    #[serde(default)]
    pub q: String,
    /// Category label or "all"
    #[serde(default)]
    pub category: String,
    /// Sort key
    #[serde(default)]
    pub sort: String,
    /// User latitude
    pub lat: Option<f64>,
    /// User longitude
    pub lng: Option<f64>,
    /// Locate the user server-side when no lat/lng is given
    #[serde(default)]
    pub here: bool,
    /// Only dealers within this many km of the user
    pub radius_km: Option<f64>,
    /// Maximum number of results
    pub limit: Option<usize>,
}

impl SearchParams {
    fn criteria(&self) -> Result<FilterCriteria, ApiError> {
        let sort: SortKey = self
            .sort
            .parse()
            .map_err(|e: String| ApiError::new("INVALID_SORT", e))?;

        if let Some(r) = self.radius_km {
            validate_radius(r).map_err(|e| ApiError::new("INVALID_RADIUS", e))?;
        }

        Ok(FilterCriteria {
            query: self.q.clone(),
            category: self.category.as_str().into(),
            sort,
            max_distance_km: self.radius_km,
            limit: self.limit,
        })
    }
}

/// Address of the caller
///
/// Taken from the first `X-Forwarded-For` entry when running behind a
/// proxy, otherwise from the peer address of the connection.
#[derive(Debug, Clone, Copy)]
pub struct ClientIp(pub Option<IpAddr>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(ClientIp(client_ip(&parts.headers, peer)))
    }
}

fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok())
        .or(peer)
}

/// Listing response: the ranked result plus an optional location notice
#[derive(Serialize)]
struct SearchResponse<'a, R> {
    #[serde(flatten)]
    result: DiscoveryResult<'a, R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_error: Option<&'static str>,
}

/// Work out the user's coordinate for a search
///
/// Explicit lat/lng wins; `here=true` locates the caller for this request
/// only. A failed lookup does not fail the search: the result degrades to no
/// origin and the user-facing message is passed back alongside it.
async fn resolve_origin(
    state: &AppState,
    params: &SearchParams,
    client: ClientIp,
) -> Result<(Option<Coordinates>, Option<GeolocationError>), ApiError> {
    if let Some(coords) = Coordinates::from_parts(params.lat, params.lng)? {
        return Ok((Some(coords), None));
    }
    if params.here {
        return Ok(match state.locate_client(client.0).await {
            Ok(loc) => (Some(loc.coords()), None),
            Err(e) => (None, Some(e)),
        });
    }
    Ok((None, None))
}

fn search_response<R: Record + Serialize>(
    result: DiscoveryResult<'_, R>,
    location_error: Option<GeolocationError>,
) -> Response {
    Json(SearchResponse {
        result,
        location_error: location_error.map(|e| e.user_message()),
    })
    .into_response()
}

/// Search dealers
///
/// GET /api/dealers
async fn dealers_handler(
    State(state): State<Arc<AppState>>,
    client: ClientIp,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let criteria = params.criteria()?;
    let (origin, location_error) = resolve_origin(&state, &params, client).await?;

    let result = discover(state.catalog.dealers(), &criteria, origin);
    Ok(search_response(result, location_error))
}

/// Get a single dealer
///
/// GET /api/dealers/:id
async fn dealer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let dealer = state
        .catalog
        .dealer(&id)
        .ok_or_else(|| ApiError::new("NOT_FOUND", format!("Dealer not found: {}", id)))?;
    Ok(Json(dealer).into_response())
}

/// Search products
///
/// GET /api/products
async fn products_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let criteria = params.criteria()?;
    let result = discover(state.catalog.products(), &criteria, None);
    Ok(search_response(result, None))
}

/// Product with its resolved image URL
#[derive(Serialize)]
struct ProductView<'a> {
    #[serde(flatten)]
    product: &'a Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

/// Get a single product
///
/// GET /api/products/:id
async fn product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let product = state
        .catalog
        .product(&id)
        .ok_or_else(|| ApiError::new("NOT_FOUND", format!("Product not found: {}", id)))?;

    let view = ProductView {
        product,
        image_url: product.image.as_deref().map(|i| state.images.url(i)),
    };
    Ok(Json(view).into_response())
}

/// Category and sort key lists
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub dealer: Vec<String>,
    pub product: Vec<String>,
    pub sort_keys: Vec<String>,
}

/// List category labels and sort keys
///
/// GET /api/categories
async fn categories_handler() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        dealer: DealerCategory::all().iter().map(|c| c.to_string()).collect(),
        product: ProductCategory::all().iter().map(|c| c.to_string()).collect(),
        sort_keys: SortKey::all().iter().map(|s| s.to_string()).collect(),
    })
}

/// Map feed plus an optional location notice
#[derive(Serialize)]
struct MapResponse {
    #[serde(flatten)]
    feed: MapFeed,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_error: Option<&'static str>,
}

/// Map feed for the current dealer search
///
/// GET /api/map
async fn map_handler(
    State(state): State<Arc<AppState>>,
    client: ClientIp,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let criteria = params.criteria()?;
    let (origin, location_error) = resolve_origin(&state, &params, client).await?;

    let result = discover(state.catalog.dealers(), &criteria, origin);
    let categories: Vec<&str> = DealerCategory::all().iter().map(|c| c.as_str()).collect();
    let feed = MapFeed::build(&state.config, result.hits(), origin, &categories)?;

    Ok(Json(MapResponse {
        feed,
        location_error: location_error.map(|e| e.user_message()),
    })
    .into_response())
}

/// Locate the caller
///
/// GET /api/location
async fn location_handler(
    State(state): State<Arc<AppState>>,
    client: ClientIp,
) -> Result<Json<GeoLocation>, ApiError> {
    let location = state.locate_client(client.0).await.map_err(Error::from)?;
    Ok(Json(location))
}

/// Submit a contact message
///
/// POST /api/contact
async fn contact_handler(
    State(state): State<Arc<AppState>>,
    Json(message): Json<ContactMessage>,
) -> (StatusCode, Json<Receipt>) {
    (StatusCode::ACCEPTED, Json(state.forms.submit_contact(&message)))
}

/// Submit a distributor application
///
/// POST /api/distributor-applications
async fn application_handler(
    State(state): State<Arc<AppState>>,
    Json(application): Json<DistributorApplication>,
) -> (StatusCode, Json<Receipt>) {
    (
        StatusCode::ACCEPTED,
        Json(state.forms.submit_application(&application)),
    )
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Number of dealers in the catalog
    pub dealers: usize,
    /// Number of products in the catalog
    pub products: usize,
    /// Location provider name
    pub location_provider: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    use crate::geo::LocationProvider;

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        dealers: state.catalog.dealers().len(),
        products: state.catalog.products().len(),
        location_provider: state.locator.name().to_string(),
        uptime_secs: state.uptime_secs(),
    })
}
