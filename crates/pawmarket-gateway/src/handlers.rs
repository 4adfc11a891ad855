// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the public catalog and the admin API.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use pawmarket_catalog::{
    CriteriaQuery, FilterBounds, InquiryView, Overview, default_inquiry_message, filter,
    resolve_inquiries,
};
use pawmarket_core::validation::{validate_dog_fields, validate_inquiry};
use pawmarket_core::{
    Availability, Dog, DogFields, Gender, HealthStatus, NewInquiry, PawmarketError,
};
use pawmarket_image::ThumbnailBounds;

use crate::auth::AdminSession;
use crate::server::GatewayState;

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// [`PawmarketError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub PawmarketError);

impl From<PawmarketError> for ApiError {
    fn from(e: PawmarketError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PawmarketError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            PawmarketError::Validation { .. } | PawmarketError::Decode { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string())
            }
            PawmarketError::Conflict(_) => (StatusCode::CONFLICT, self.0.to_string()),
            PawmarketError::Unauthorized => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            PawmarketError::Persistence { source } => {
                tracing::error!(error = %source, "storage operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage failure".to_string())
            }
            PawmarketError::Config(_) | PawmarketError::Internal(_) => {
                tracing::error!(error = %self.0, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// A listing as returned by the API: everything except the inline image text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DogSummary {
    pub id: String,
    pub breed: String,
    pub age: u32,
    pub gender: Gender,
    pub price: f64,
    pub availability: Availability,
    pub description: Option<String>,
    pub location: String,
    pub has_image: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Dog> for DogSummary {
    fn from(dog: Dog) -> Self {
        Self {
            has_image: dog.image.is_some(),
            id: dog.id,
            breed: dog.breed,
            age: dog.age,
            gender: dog.gender,
            price: dog.price,
            availability: dog.availability,
            description: dog.description,
            location: dog.location,
            created_at: dog.created_at,
            updated_at: dog.updated_at,
        }
    }
}

/// Response body for listing queries.
#[derive(Debug, Serialize, Deserialize)]
pub struct DogListResponse {
    pub count: usize,
    pub dogs: Vec<DogSummary>,
}

impl DogListResponse {
    fn from_dogs(dogs: Vec<Dog>) -> Self {
        Self {
            count: dogs.len(),
            dogs: dogs.into_iter().map(DogSummary::from).collect(),
        }
    }
}

/// Response body for GET /v1/dogs/filters.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
    /// True when there are no listings; `bounds` then holds defaults.
    pub empty: bool,
    pub bounds: FilterBounds,
}

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Response body for resource creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Request body for POST /v1/dogs/{id}/inquiries.
#[derive(Debug, Deserialize)]
pub struct InquiryRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body for POST /v1/admin/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in_secs: u64,
}

/// Request body for creating or updating a listing.
///
/// `image_base64` carries the raw uploaded file (PNG or JPEG), base64
/// encoded. It is thumbnailed before storage. On update, omitting it keeps
/// the stored image.
#[derive(Debug, Deserialize)]
pub struct DogRequest {
    pub breed: String,
    pub age: u32,
    pub gender: Gender,
    pub price: f64,
    pub availability: Availability,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    #[serde(default)]
    pub image_base64: Option<String>,
}

impl DogRequest {
    fn into_parts(self) -> (DogFields, Option<String>) {
        let upload = self.image_base64.filter(|s| !s.trim().is_empty());
        let fields = DogFields {
            breed: self.breed,
            age: self.age,
            gender: self.gender,
            price: self.price,
            availability: self.availability,
            description: self.description,
            location: self.location,
        };
        (fields, upload)
    }
}

/// Validate the listing fields and turn an optional upload into stored image text.
async fn prepare_listing(
    request: DogRequest,
    bounds: ThumbnailBounds,
) -> Result<(DogFields, Option<String>), PawmarketError> {
    let (fields, upload) = request.into_parts();
    let fields = validate_dog_fields(fields)?;

    let image = match upload {
        Some(text) => {
            let bytes = STANDARD
                .decode(text.trim())
                .map_err(|e| PawmarketError::Decode {
                    message: format!("image_base64 is not valid base64: {e}"),
                    source: Some(Box::new(e)),
                })?;
            let encoded = tokio::task::spawn_blocking(move || {
                pawmarket_image::encode_upload(&bytes, bounds)
            })
            .await
            .map_err(|e| PawmarketError::Internal(format!("image task failed: {e}")))??;
            Some(encoded)
        }
        None => None,
    };
    Ok((fields, image))
}

async fn require_dog(state: &GatewayState, id: &str) -> Result<Dog, PawmarketError> {
    state
        .store
        .get_dog(id)
        .await?
        .ok_or_else(|| PawmarketError::NotFound {
            entity: "dog",
            id: id.to_string(),
        })
}

// --- Public routes ---

/// GET /health
pub async fn get_public_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let status = health_label(state.store.health_check().await);
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

fn health_label(check: Result<HealthStatus, PawmarketError>) -> &'static str {
    match check {
        Ok(HealthStatus::Healthy) => "ok",
        Ok(HealthStatus::Degraded(reason)) => {
            tracing::warn!(%reason, "store degraded");
            "degraded"
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            tracing::warn!(%reason, "store unhealthy");
            "unavailable"
        }
        Err(e) => {
            tracing::warn!(error = %e, "store health check failed");
            "unavailable"
        }
    }
}

/// GET /v1/dogs
///
/// Applies the query-string filters to the full listing set.
pub async fn list_dogs(
    State(state): State<GatewayState>,
    Query(query): Query<CriteriaQuery>,
) -> ApiResult<Json<DogListResponse>> {
    let criteria = query.into_criteria()?;
    let dogs = state.store.list_dogs().await?;
    Ok(Json(DogListResponse::from_dogs(filter(&dogs, &criteria))))
}

/// GET /v1/dogs/filters
pub async fn get_filter_options(
    State(state): State<GatewayState>,
) -> ApiResult<Json<FilterOptionsResponse>> {
    let dogs = state.store.list_dogs().await?;
    let response = match FilterBounds::derive(&dogs) {
        Some(bounds) => FilterOptionsResponse {
            empty: false,
            bounds,
        },
        None => FilterOptionsResponse {
            empty: true,
            bounds: FilterBounds::default(),
        },
    };
    Ok(Json(response))
}

/// GET /v1/dogs/{id}
pub async fn get_dog(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DogSummary>> {
    Ok(Json(require_dog(&state, &id).await?.into()))
}

/// GET /v1/dogs/{id}/image
///
/// Serves the stored photo as PNG, or the placeholder when there is none or
/// it cannot be decoded.
pub async fn get_dog_image(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let dog = require_dog(&state, &id).await?;
    let png = tokio::task::spawn_blocking(move || {
        let image = match dog.image.as_deref() {
            Some(text) => pawmarket_image::decode_or_placeholder(text),
            None => pawmarket_image::placeholder(),
        };
        pawmarket_image::to_png_bytes(&image)
    })
    .await
    .map_err(|e| PawmarketError::Internal(format!("image task failed: {e}")))??;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// POST /v1/dogs/{id}/inquiries
pub async fn post_inquiry(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<InquiryRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let mut inquiry = validate_inquiry(NewInquiry {
        dog_id: id,
        name: body.name,
        email: body.email,
        phone: body.phone,
        message: body.message,
    })?;

    let dog = require_dog(&state, &inquiry.dog_id).await?;
    if dog.availability == Availability::Sold {
        return Err(PawmarketError::Conflict(format!("dog {} has been sold", dog.id)).into());
    }
    if inquiry.message.is_none() {
        inquiry.message = Some(default_inquiry_message(&dog.breed));
    }

    let id = state.store.create_inquiry(inquiry).await?;
    tracing::info!(inquiry_id = %id, dog_id = %dog.id, "inquiry submitted");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// POST /v1/admin/login
pub async fn admin_login(
    State(state): State<GatewayState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let admin = state.admin.clone();
    let username = body.username.clone();
    let accepted = tokio::task::spawn_blocking(move || admin.verify(&body.username, &body.password))
        .await
        .map_err(|e| PawmarketError::Internal(format!("login task failed: {e}")))?;

    if !accepted {
        tracing::warn!(username = %username, "admin login rejected");
        return Err(PawmarketError::Unauthorized.into());
    }

    let token = state.sessions.issue()?;
    tracing::info!(username = %username, "admin logged in");
    Ok(Json(LoginResponse {
        token,
        expires_in_secs: state.sessions.ttl().as_secs(),
    }))
}

// --- Admin routes (behind auth_middleware) ---

/// POST /v1/admin/logout
pub async fn admin_logout(
    State(state): State<GatewayState>,
    Extension(session): Extension<AdminSession>,
) -> StatusCode {
    state.sessions.revoke(&session.token);
    tracing::info!("admin logged out");
    StatusCode::NO_CONTENT
}

/// GET /v1/admin/dogs
pub async fn admin_list_dogs(
    State(state): State<GatewayState>,
) -> ApiResult<Json<DogListResponse>> {
    let dogs = state.store.list_dogs().await?;
    Ok(Json(DogListResponse::from_dogs(dogs)))
}

/// POST /v1/admin/dogs
pub async fn admin_create_dog(
    State(state): State<GatewayState>,
    Json(body): Json<DogRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let (fields, image) = prepare_listing(body, state.thumbnails).await?;
    let id = state.store.create_dog(fields, image).await?;
    tracing::info!(dog_id = %id, "listing created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /v1/admin/dogs/{id}
pub async fn admin_update_dog(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<DogRequest>,
) -> ApiResult<StatusCode> {
    let (fields, image) = prepare_listing(body, state.thumbnails).await?;
    state.store.update_dog(&id, fields, image).await?;
    tracing::info!(dog_id = %id, "listing updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /v1/admin/dogs/{id}
pub async fn admin_delete_dog(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let removed = state.store.delete_dog(&id).await?;
    tracing::info!(dog_id = %id, removed, "listing deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/admin/inquiries
pub async fn admin_list_inquiries(
    State(state): State<GatewayState>,
) -> ApiResult<Json<Vec<InquiryView>>> {
    let inquiries = state.store.list_inquiries().await?;
    let dogs = state.store.list_dogs().await?;
    Ok(Json(resolve_inquiries(inquiries, &dogs)))
}

/// GET /v1/admin/overview
pub async fn admin_overview(State(state): State<GatewayState>) -> ApiResult<Json<Overview>> {
    let dogs = state.store.list_dogs().await?;
    let inquiries = state.store.list_inquiries().await?;
    Ok(Json(Overview::compute(&dogs, inquiries.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: PawmarketError) -> StatusCode {
        ApiError(e).into_response().status()
    }

    #[test]
    fn health_states_map_to_labels() {
        assert_eq!(health_label(Ok(HealthStatus::Healthy)), "ok");
        assert_eq!(
            health_label(Ok(HealthStatus::Degraded("quick_check: page 3".into()))),
            "degraded"
        );
        assert_eq!(
            health_label(Ok(HealthStatus::Unhealthy("not initialized".into()))),
            "unavailable"
        );
        assert_eq!(
            health_label(Err(PawmarketError::Internal("boom".into()))),
            "unavailable"
        );
    }

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(
            status_of(PawmarketError::NotFound {
                entity: "dog",
                id: "x".into()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(PawmarketError::validation("breed", "is required")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(PawmarketError::decode("bad upload")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(PawmarketError::Conflict("sold".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(PawmarketError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(PawmarketError::Persistence {
                source: "disk full".into()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn summary_drops_image_text() {
        let dog = Dog {
            id: "d1".into(),
            breed: "Beagle".into(),
            age: 6,
            gender: Gender::Male,
            price: 500.0,
            availability: Availability::Available,
            description: None,
            location: "NY".into(),
            image: Some("aW1n".into()),
            created_at: "2026-01-01T00:00:00.000000Z".into(),
            updated_at: "2026-01-01T00:00:00.000000Z".into(),
        };
        let json = serde_json::to_value(DogSummary::from(dog)).unwrap();
        assert_eq!(json["has_image"], true);
        assert!(json.get("image").is_none());
    }

    #[test]
    fn dog_request_blank_upload_is_ignored() {
        let body: DogRequest = serde_json::from_str(
            r#"{"breed":"Pug","age":3,"gender":"Female","price":250,
                "availability":"Available","location":"Austin","image_base64":"  "}"#,
        )
        .unwrap();
        let (fields, upload) = body.into_parts();
        assert_eq!(fields.breed, "Pug");
        assert_eq!(fields.price, 250.0);
        assert!(upload.is_none());
    }

    #[tokio::test]
    async fn prepare_listing_rejects_bad_upload() {
        let body: DogRequest = serde_json::from_str(
            r#"{"breed":"Pug","age":3,"gender":"Female","price":250,
                "availability":"Available","location":"Austin","image_base64":"aGVsbG8="}"#,
        )
        .unwrap();
        let result = prepare_listing(body, ThumbnailBounds::default()).await;
        assert!(matches!(result, Err(PawmarketError::Decode { .. })));
    }
}
