//! # Request Handlers
//!
//! Axum request handlers for the checkout and avatar upload endpoints.

use crate::state::AppState;
use crate::upload::StagedUpload;
use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cellestial_core::{
    CartItem, Currency, GatewayError, Order, Transformation, UploadOptions,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

/// Plain-text body served at `/`
pub const LIVENESS_MESSAGE: &str = "Cellestial API is live 🛰️";

/// Multipart field carrying the avatar image
pub const AVATAR_FIELD: &str = "avatar";
/// Provider folder avatars are stored under
pub const AVATAR_FOLDER: &str = "avatars";
/// Edge length of the square avatar crop
pub const AVATAR_SIZE: u32 = 300;

/// Currency every checkout is charged in
pub const CHECKOUT_CURRENCY: Currency = Currency::EUR;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout request
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Cart items, forwarded to the provider as line items
    pub items: Vec<CartItem>,
}

/// Create checkout response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCheckoutResponse {
    /// Session ID
    pub id: String,
    /// Checkout URL (redirect user here)
    pub url: String,
}

/// Avatar upload response
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadAvatarResponse {
    /// Secure URL of the stored, cropped avatar
    pub url: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn gateway_error_to_response(err: GatewayError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.client_message())))
}

fn multipart_error_to_response(err: MultipartError) -> ApiError {
    (err.status(), Json(ErrorResponse::new(err.body_text())))
}

/// Upload options applied to every avatar
pub fn avatar_upload_options() -> UploadOptions {
    UploadOptions::new(AVATAR_FOLDER).with_transformation(Transformation::square_fill(AVATAR_SIZE))
}

// =============================================================================
// Handlers
// =============================================================================

/// Liveness endpoint
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cellestial-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a hosted checkout session for the posted cart.
///
/// The body is decoded by hand so that a missing or malformed `items`
/// field is reported like any other checkout failure.
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateCheckoutResponse>, ApiError> {
    let request: CreateCheckoutRequest = serde_json::from_slice(&body).map_err(|e| {
        error!("Invalid checkout request: {}", e);
        gateway_error_to_response(GatewayError::InvalidRequest(e.to_string()))
    })?;

    let order = Order::from_cart(&request.items, CHECKOUT_CURRENCY);

    info!(
        "Creating checkout: {} line items, {} units, total={}, success_url={}",
        order.line_items.len(),
        order.item_count(),
        order.total().display(),
        state.urls.success_url()
    );

    let session = state
        .payments
        .create_checkout(&order, &state.urls)
        .await
        .map_err(|e| {
            error!(
                "Failed to create checkout via {}: {}",
                state.payments.provider_name(),
                e
            );
            gateway_error_to_response(e)
        })?;

    info!("Created checkout session: {}", session.session_id);

    Ok(Json(CreateCheckoutResponse {
        id: session.session_id,
        url: session.checkout_url,
    }))
}

/// Upload an avatar image and return its secure URL.
#[instrument(skip(state, multipart))]
pub async fn upload_avatar(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadAvatarResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!("Avatar upload is not a multipart form: {}", rejection);
        gateway_error_to_response(GatewayError::MissingUpload)
    })?;

    let bytes = read_file_field(&mut multipart, AVATAR_FIELD)
        .await
        .map_err(|e| {
            error!("Failed to read multipart body: {}", e);
            multipart_error_to_response(e)
        })?
        .ok_or_else(|| {
            warn!("Avatar upload without a file");
            gateway_error_to_response(GatewayError::MissingUpload)
        })?;

    let staged = StagedUpload::write(&state.config.upload_dir, &bytes)
        .await
        .map_err(|e| {
            error!("Failed to stage upload: {}", e);
            gateway_error_to_response(e)
        })?;

    info!("Staged avatar upload: {} bytes", staged.size());

    let result = state
        .media
        .upload_image(staged.path(), &avatar_upload_options())
        .await;

    staged.remove().await;

    let asset = result.map_err(|e| {
        error!(
            "Failed to upload avatar via {}: {}",
            state.media.provider_name(),
            e
        );
        gateway_error_to_response(e)
    })?;

    info!("Uploaded avatar: {}", asset.secure_url);

    Ok(Json(UploadAvatarResponse {
        url: asset.secure_url,
    }))
}

/// Return the contents of the first file part named `name`, skipping other parts
async fn read_file_field(
    multipart: &mut Multipart,
    name: &str,
) -> Result<Option<Bytes>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(name) && field.file_name().is_some() {
            return field.bytes().await.map(Some);
        }
    }
    Ok(None)
}
