use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use celucol_core::health::{healthz, readyz};
use celucol_core::middleware::{cors_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{email::send_email, whatsapp::whatsapp_notify};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Notifications
        .route("/send-email", post(send_email))
        .route("/whatsapp-notify", post(whatsapp_notify))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .layer(cors_layer())
        .with_state(state)
}
