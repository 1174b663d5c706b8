use crate::auth;
use crate::handlers;
use crate::state::AppState;
use axum::{middleware, routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/logout", post(handlers::logout))
        .route("/api/options", get(handlers::get_options))
        .route("/api/view", get(handlers::get_view))
        .route("/export/:kind", get(handlers::export))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_session))
        .route("/", get(handlers::index))
        .route("/login", post(handlers::login))
        .with_state(state)
}
