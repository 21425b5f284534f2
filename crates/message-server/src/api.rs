use axum::{
    Form, Json, Router,
    extract::{FromRequest, Query, Request, State},
    http::header::CONTENT_TYPE,
    response::Html,
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use domain::DeviceId;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;
use crate::views;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(control_panel))
        .route("/message", get(get_message).post(update_message))
        .route("/api/devices", get(list_devices))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    id: Option<String>,
}

/// GET /message?id=device1 - plain-text message for a device
async fn get_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
) -> Result<String, ApiError> {
    let id = DeviceId::or_default(query.id.as_deref());
    let message = state.service.get_message(&id).await?;

    info!(device_id = %id, message = %message, "📡 Message fetched");
    Ok(message.into_inner())
}

/// Body of POST /message. Fields are optional so that a missing field is
/// reported like an empty one.
#[derive(Debug, Deserialize)]
pub struct MessageUpdate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<S> FromRequest<S> for MessageUpdate
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    /// Accepts the control panel's urlencoded form or a JSON object.
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(update) = Json::<MessageUpdate>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            Ok(update)
        } else {
            let Form(update) = Form::<MessageUpdate>::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            Ok(update)
        }
    }
}

/// POST /message - replace a device's message, answer with a confirmation page
async fn update_message(
    State(state): State<Arc<AppState>>,
    update: MessageUpdate,
) -> Result<Html<String>, ApiError> {
    let record = state
        .service
        .set_message(
            update.id.as_deref().unwrap_or_default(),
            update.message.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Html(views::update_confirmation(&record)))
}

/// GET / - control panel
async fn control_panel(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let ids = state.service.list_ids().await?;
    Ok(Html(views::control_panel(&ids)))
}

/// GET /api/devices - known device ids as JSON
async fn list_devices(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let ids = state.service.list_ids().await?;
    Ok(Json(ids))
}
