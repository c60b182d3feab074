use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use beavery_core::fallback::not_found;
use beavery_core::health::{healthz, readyz};
use beavery_core::middleware::{catch_panic_layer, propagate_request_id_layer, request_id_layer};

use crate::domain::repository::{IdentityPort, UserRepository};
use crate::handlers::{
    api::hello,
    auth::{auth_test, create_user, me},
};
use crate::state::AppState;

pub fn build_router<R, I>(state: AppState<R, I>) -> Router
where
    R: UserRepository + Clone + 'static,
    I: IdentityPort + Clone + 'static,
{
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Greeting
        .route("/api", get(hello))
        // Auth
        .route("/auth/test", get(auth_test))
        .route("/auth/me", get(me))
        .route("/auth/create-user", post(create_user::<R, I>))
        .fallback(not_found)
        .with_state(state)
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
}
