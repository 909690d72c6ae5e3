//! # API REST
//!
//! REST API for the bloodlink donor-matching service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (query validation, JSON error bodies, CORS)
//!
//! Uses `api-shared` for wire types and `bloodlink-core` for everything else. Handlers load the
//! donor snapshot through [`DonorService`] and hand it to the core matcher; no matching logic
//! lives here.

#![warn(rust_2018_idioms)]

pub mod error;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    BloodRequestRes, CreateBloodRequestReq, CreateBloodRequestRes, DonorRes, ErrorRes,
    HealthRes, HealthService, ListBloodRequestsRes, ListDonorsRes, MatchedDonorRes,
    NearbyDonorsRes, NearestDonorsRes, NgoContactReq, NgoContactRes, NgoInfoRes,
    RegisterDonorReq, RegisterDonorRes, RootRes, UpdateRequestStatusReq,
};
use bloodlink_core::{
    validation::validate_search, BloodRequestService, BloodType, Coordinate, CoreConfig,
    DonorService, NewBloodRequest, NewNgoContact, NgoService, RequestStatus,
};

pub use error::ApiError;

/// Shared state for all request handlers.
///
/// Services are cheap to clone; they share the resolved configuration and the donor write lock.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    donor_service: DonorService,
    request_service: BloodRequestService,
    ngo_service: NgoService,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            donor_service: DonorService::new(cfg.clone()),
            request_service: BloodRequestService::new(cfg.clone()),
            ngo_service: NgoService::new(cfg.clone()),
            cfg,
        }
    }

    pub fn donor_service(&self) -> &DonorService {
        &self.donor_service
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        root,
        health,
        register_donor,
        list_donors,
        get_donor,
        nearby_donors,
        create_blood_request,
        list_blood_requests,
        update_blood_request_status,
        nearest_donors,
        ngo_info,
        ngo_contact,
    ),
    components(schemas(
        RootRes,
        HealthRes,
        ErrorRes,
        RegisterDonorReq,
        RegisterDonorRes,
        DonorRes,
        ListDonorsRes,
        MatchedDonorRes,
        NearbyDonorsRes,
        NearestDonorsRes,
        CreateBloodRequestReq,
        CreateBloodRequestRes,
        BloodRequestRes,
        ListBloodRequestsRes,
        UpdateRequestStatusReq,
        NgoInfoRes,
        NgoContactReq,
        NgoContactRes,
    ))
)]
pub struct ApiDoc;

/// Builds the application router with Swagger UI, request tracing and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/donors", get(list_donors))
        .route("/api/donors/register", post(register_donor))
        .route("/api/donors/nearby", get(nearby_donors))
        .route("/api/donors/:id", get(get_donor))
        .route(
            "/api/blood-requests",
            get(list_blood_requests).post(create_blood_request),
        )
        .route(
            "/api/blood-requests/:id/status",
            patch(update_blood_request_status),
        )
        .route(
            "/api/blood-requests/:blood_type/nearest-donors",
            get(nearest_donors),
        )
        .route("/api/ngo/info", get(ngo_info))
        .route("/api/ngo/contact", post(ngo_contact))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Query string shared by both donor searches.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Degrees, -90 to 90.
    pub latitude: f64,
    /// Degrees, -180 to 180.
    pub longitude: f64,
    /// Search radius in kilometres. Defaults to the configured radius (50 km).
    pub max_distance: Option<f64>,
}

impl SearchParams {
    fn resolve(&self, default_max_distance_km: f64) -> Result<(Coordinate, f64), ApiError> {
        let origin = Coordinate::new(self.latitude, self.longitude);
        let max_distance_km = self.max_distance.unwrap_or(default_max_distance_km);
        validate_search(origin, max_distance_km)?;
        Ok((origin, max_distance_km))
    }
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = RootRes)
    )
)]
#[axum::debug_handler]
async fn root() -> Json<RootRes> {
    Json(RootRes {
        message: "Blood Bank Management System API".into(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/donors/register",
    request_body = RegisterDonorReq,
    responses(
        (status = 200, description = "Donor registered", body = RegisterDonorRes),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 409, description = "Email already registered", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Register a new donor
///
/// # Errors
/// Returns `400 Bad Request` if any field fails validation (blank text, malformed email,
/// non-canonical blood type, age outside 18-65, weight under 50 kg, coordinates out of range)
/// and `409 Conflict` if the email is already registered.
#[axum::debug_handler]
async fn register_donor(
    State(state): State<AppState>,
    payload: Result<Json<RegisterDonorReq>, JsonRejection>,
) -> Result<Json<RegisterDonorRes>, ApiError> {
    let Json(req) = payload?;
    let donor = state.donor_service.register(req.into())?;

    Ok(Json(RegisterDonorRes {
        success: true,
        message: "Donor registered successfully".into(),
        donor_id: donor.id,
    }))
}

#[utoipa::path(
    get,
    path = "/api/donors",
    responses(
        (status = 200, description = "All registered donors", body = ListDonorsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn list_donors(State(state): State<AppState>) -> Result<Json<ListDonorsRes>, ApiError> {
    let donors = state.donor_service.list_donors()?;
    Ok(Json(ListDonorsRes {
        donors: donors.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/donors/{id}",
    params(
        ("id" = String, Path, description = "Donor identifier (32 lowercase hex characters)")
    ),
    responses(
        (status = 200, description = "Donor record", body = DonorRes),
        (status = 400, description = "Malformed identifier", body = ErrorRes),
        (status = 404, description = "Donor not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn get_donor(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DonorRes>, ApiError> {
    let Path(id) = id?;
    let donor = state.donor_service.get(&id)?;
    Ok(Json(donor.into()))
}

#[utoipa::path(
    get,
    path = "/api/donors/nearby",
    params(SearchParams),
    responses(
        (status = 200, description = "Donors of any type within range, nearest first", body = NearbyDonorsRes),
        (status = 400, description = "Invalid coordinates or radius", body = ErrorRes)
    )
)]
/// Find donors of any blood type near a location
///
/// Distances are computed at full precision for filtering and ordering, then rounded to two
/// decimals. Donors at exactly `max_distance` are included; ties keep directory order.
#[axum::debug_handler]
async fn nearby_donors(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<NearbyDonorsRes>, ApiError> {
    let Query(params) = query?;
    let (origin, max_distance_km) = params.resolve(state.cfg.default_max_distance_km())?;

    let matches =
        bloodlink_core::nearby_donors(&state.donor_service, origin, max_distance_km)?;
    Ok(Json(matches.into()))
}

#[utoipa::path(
    get,
    path = "/api/blood-requests/{blood_type}/nearest-donors",
    params(
        ("blood_type" = String, Path, description = "Requested blood type, e.g. `AB-` (URL-encode `+` as `%2B`)"),
        SearchParams
    ),
    responses(
        (status = 200, description = "Compatible donors within range, nearest first", body = NearestDonorsRes),
        (status = 400, description = "Invalid coordinates or radius", body = ErrorRes)
    )
)]
/// Find the nearest donors able to give to a blood type
///
/// The blood type is not validated: an unrecognised code only matches donors recorded with that
/// exact code.
#[axum::debug_handler]
async fn nearest_donors(
    State(state): State<AppState>,
    blood_type: Result<Path<String>, PathRejection>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<NearestDonorsRes>, ApiError> {
    let Path(blood_type) = blood_type?;
    let Query(params) = query?;
    let (origin, max_distance_km) = params.resolve(state.cfg.default_max_distance_km())?;

    let requested = BloodType::parse(&blood_type);
    let matches = bloodlink_core::nearest_compatible_donors(
        &state.donor_service,
        &requested,
        origin,
        max_distance_km,
    )?;

    Ok(Json(NearestDonorsRes {
        donors: matches.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/blood-requests",
    request_body = CreateBloodRequestReq,
    responses(
        (status = 200, description = "Request stored, with nearest compatible donors", body = CreateBloodRequestRes),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Create a blood request
///
/// The request is stored as `pending` and the compatible donors within the configured radius of
/// the request location are returned alongside it.
#[axum::debug_handler]
async fn create_blood_request(
    State(state): State<AppState>,
    payload: Result<Json<CreateBloodRequestReq>, JsonRejection>,
) -> Result<Json<CreateBloodRequestRes>, ApiError> {
    let Json(req) = payload?;
    let new_request = NewBloodRequest::try_from(req)?;
    let (request, donors) = state
        .request_service
        .create(new_request, &state.donor_service)?;

    Ok(Json(CreateBloodRequestRes {
        success: true,
        message: "Blood request created successfully".into(),
        request_id: request.id,
        nearest_donors: donors.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/blood-requests",
    responses(
        (status = 200, description = "All blood requests, oldest first", body = ListBloodRequestsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn list_blood_requests(
    State(state): State<AppState>,
) -> Result<Json<ListBloodRequestsRes>, ApiError> {
    let requests = state.request_service.list()?;
    Ok(Json(ListBloodRequestsRes {
        requests: requests.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/blood-requests/{id}/status",
    params(
        ("id" = String, Path, description = "Request identifier (32 lowercase hex characters)")
    ),
    request_body = UpdateRequestStatusReq,
    responses(
        (status = 200, description = "Request closed", body = BloodRequestRes),
        (status = 400, description = "Malformed identifier, invalid status or request already closed", body = ErrorRes),
        (status = 404, description = "Request not found", body = ErrorRes)
    )
)]
/// Close a pending blood request as `fulfilled` or `cancelled`
#[axum::debug_handler]
async fn update_blood_request_status(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateRequestStatusReq>, JsonRejection>,
) -> Result<Json<BloodRequestRes>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let status = RequestStatus::try_from(req)?;
    let request = state.request_service.update_status(&id, status)?;
    Ok(Json(request.into()))
}

#[utoipa::path(
    get,
    path = "/api/ngo/info",
    responses(
        (status = 200, description = "Partner NGO contact details", body = NgoInfoRes)
    )
)]
#[axum::debug_handler]
async fn ngo_info(State(state): State<AppState>) -> Json<NgoInfoRes> {
    Json(state.ngo_service.info().into())
}

#[utoipa::path(
    post,
    path = "/api/ngo/contact",
    request_body = NgoContactReq,
    responses(
        (status = 200, description = "Contact request stored", body = NgoContactRes),
        (status = 400, description = "Validation failed", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Ask the partner NGO for help
///
/// Critical and emergency requests are flagged in the service log for the NGO's emergency
/// contact.
#[axum::debug_handler]
async fn ngo_contact(
    State(state): State<AppState>,
    payload: Result<Json<NgoContactReq>, JsonRejection>,
) -> Result<Json<NgoContactRes>, ApiError> {
    let Json(req) = payload?;
    let contact = state.ngo_service.submit(NewNgoContact::try_from(req)?)?;
    Ok(Json(contact.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bloodlink_core::repositories::samples::{seed_sample_donors, SAMPLE_ORIGIN};
    use bloodlink_core::NgoInfo;
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_state(temp_dir: &TempDir) -> AppState {
        let cfg = CoreConfig::new(temp_dir.path().to_path_buf(), 50.0, NgoInfo::default())
            .expect("CoreConfig::new should succeed");
        AppState::new(Arc::new(cfg))
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(state.clone())
            .oneshot(request)
            .await
            .expect("router should respond");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        json_request("POST", uri, body)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn names(donors: &Value) -> Vec<&str> {
        donors
            .as_array()
            .expect("donors should be an array")
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect()
    }

    fn donor_body(email: &str, blood_type: &str) -> Value {
        json!({
            "name": "Test Donor",
            "email": email,
            "phone": "+91-9000000001",
            "blood_type": blood_type,
            "age": 30,
            "weight": 70.0,
            "address": "Clock Tower, Dehradun",
            "latitude": 30.3165,
            "longitude": 78.0322
        })
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = test_state(&temp_dir);

        let (status, body) = send(&state, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Blood Bank Management System API");

        let (status, body) = send(&state, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_nearby_returns_all_samples_nearest_first() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = test_state(&temp_dir);
        seed_sample_donors(state.donor_service(), Utc::now()).unwrap();

        let uri = format!(
            "/api/donors/nearby?latitude={}&longitude={}",
            SAMPLE_ORIGIN.0, SAMPLE_ORIGIN.1
        );
        let (status, body) = send(&state, get(&uri)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 10);
        assert_eq!(body["donors"][0]["name"], "Vikram Yadav");
        assert_eq!(body["donors"][0]["distance"], 0.22);
        assert_eq!(body["donors"][0]["blood_type"], "O-");
    }

    #[tokio::test]
    async fn test_nearest_donors_filters_by_compatibility() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = test_state(&temp_dir);
        seed_sample_donors(state.donor_service(), Utc::now()).unwrap();

        let uri = format!(
            "/api/blood-requests/AB-/nearest-donors?latitude={}&longitude={}",
            SAMPLE_ORIGIN.0, SAMPLE_ORIGIN.1
        );
        let (status, body) = send(&state, get(&uri)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            names(&body["donors"]),
            vec!["Vikram Yadav", "Sanjay Rawat", "Anjali Verma", "Sunita Chauhan"]
        );

        let uri = format!(
            "/api/blood-requests/A%2B/nearest-donors?latitude={}&longitude={}&max_distance=1",
            SAMPLE_ORIGIN.0, SAMPLE_ORIGIN.1
        );
        let (status, body) = send(&state, get(&uri)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body["donors"]), vec!["Vikram Yadav"]);
    }

    #[tokio::test]
    async fn test_nearest_donors_with_unknown_type_matches_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = test_state(&temp_dir);
        seed_sample_donors(state.donor_service(), Utc::now()).unwrap();

        let (status, body) = send(
            &state,
            get("/api/blood-requests/XYZ/nearest-donors?latitude=30.3275&longitude=78.0325"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["donors"], json!([]));
    }

    #[tokio::test]
    async fn test_search_rejects_bad_query() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = test_state(&temp_dir);

        for uri in [
            "/api/donors/nearby?latitude=95&longitude=78.0",
            "/api/donors/nearby?latitude=30.0&longitude=78.0&max_distance=NaN",
            "/api/donors/nearby?latitude=30.0",
            "/api/blood-requests/O+/nearest-donors?latitude=30.0&longitude=-181",
        ] {
            let (status, body) = send(&state, get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "invalid_input", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_register_then_duplicate_email_conflicts() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = test_state(&temp_dir);

        let (status, body) = send(
            &state,
            post_json("/api/donors/register", donor_body("donor@example.com", "B-")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let donor_id = body["donor_id"].as_str().unwrap().to_string();

        let (status, body) = send(&state, get(&format!("/api/donors/{donor_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blood_type"], "B-");
        assert_eq!(body["weight"], 70.0);

        let (status, body) = send(
            &state,
            post_json("/api/donors/register", donor_body("DONOR@example.com", "A+")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "duplicate_email");

        let (_, body) = send(&state, get("/api/donors")).await;
        assert_eq!(body["donors"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_donor() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = test_state(&temp_dir);

        let (status, body) = send(
            &state,
            post_json("/api/donors/register", donor_body("donor@example.com", "C+")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_input");

        let (status, _) = send(
            &state,
            post_json("/api/donors/register", json!({ "name": "Incomplete" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_donor_distinguishes_bad_and_unknown_ids() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = test_state(&temp_dir);

        let (status, _) = send(&state, get("/api/donors/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) =
            send(&state, get("/api/donors/550e8400e29b41d4a716446655440000")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_create_blood_request_returns_nearest_donors() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = test_state(&temp_dir);
        seed_sample_donors(state.donor_service(), Utc::now()).unwrap();

        let (status, body) = send(
            &state,
            post_json(
                "/api/blood-requests",
                json!({
                    "patient_name": "Meera Joshi",
                    "hospital_name": "Doon Hospital",
                    "blood_type": "B+",
                    "units_needed": 2,
                    "urgency": "critical",
                    "contact_phone": "+91-9000000000",
                    "contact_email": "ward7@doonhospital.example",
                    "latitude": SAMPLE_ORIGIN.0,
                    "longitude": SAMPLE_ORIGIN.1
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(
            names(&body["nearest_donors"]),
            vec![
                "Vikram Yadav",
                "Sanjay Rawat",
                "Amit Singh",
                "Rajesh Kumar",
                "Kavita Negi"
            ]
        );

        let (status, body) = send(&state, get("/api/blood-requests")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["requests"][0]["status"], "pending");
        assert_eq!(body["requests"][0]["urgency"], "critical");
    }

    #[tokio::test]
    async fn test_blood_request_status_can_be_closed_once() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = test_state(&temp_dir);

        let (status, body) = send(
            &state,
            post_json(
                "/api/blood-requests",
                json!({
                    "patient_name": "Meera Joshi",
                    "hospital_name": "Doon Hospital",
                    "blood_type": "O-",
                    "units_needed": 1,
                    "contact_phone": "+91-9000000000",
                    "contact_email": "ward7@doonhospital.example",
                    "latitude": SAMPLE_ORIGIN.0,
                    "longitude": SAMPLE_ORIGIN.1
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let request_id = body["request_id"].as_str().unwrap().to_string();
        let uri = format!("/api/blood-requests/{request_id}/status");

        let (status, body) = send(
            &state,
            json_request("PATCH", &uri, json!({ "status": "fulfilled" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], request_id.as_str());
        assert_eq!(body["status"], "fulfilled");

        let (status, body) = send(
            &state,
            json_request("PATCH", &uri, json!({ "status": "cancelled" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_input");

        let (_, body) = send(&state, get("/api/blood-requests")).await;
        assert_eq!(body["requests"][0]["status"], "fulfilled");

        let (status, body) = send(
            &state,
            json_request(
                "PATCH",
                "/api/blood-requests/550e8400e29b41d4a716446655440000/status",
                json!({ "status": "cancelled" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_ngo_info_and_contact() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let state = test_state(&temp_dir);

        let (status, body) = send(&state, get("/api/ngo/info")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ngo_name"], NgoInfo::default().name);

        let (status, body) = send(
            &state,
            post_json(
                "/api/ngo/contact",
                json!({
                    "user_name": "Arjun Mehta",
                    "user_email": "arjun@example.com",
                    "user_phone": "+91-9111111111",
                    "message": "Need 3 units of AB- tonight",
                    "urgency_level": "emergency"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(
            &state,
            post_json(
                "/api/ngo/contact",
                json!({
                    "user_name": "Arjun Mehta",
                    "user_email": "arjun@example.com",
                    "user_phone": "+91-9111111111",
                    "message": "Need help",
                    "urgency_level": "whenever"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_input");
    }
}
