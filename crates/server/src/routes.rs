use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{BearerAuth, require_bearer};
use crate::config::ServerConfig;
use crate::handler::{self, AppState};

/// Monta o router completo. `/health` fica fora da autenticação.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let auth = BearerAuth::new(config.api_key.clone());

    let api = Router::new()
        .route(
            "/strings",
            get(handler::get_string)
                .post(handler::set_string)
                .put(handler::update_string)
                .delete(handler::remove_string),
        )
        .route(
            "/lists/strings",
            get(handler::get_list)
                .post(handler::set_list)
                .put(handler::update_list)
                .delete(handler::remove_list),
        )
        .route("/lists/strings/push", post(handler::push))
        .route("/lists/strings/pop", post(handler::pop))
        .route_layer(middleware::from_fn_with_state(auth, require_bearer));

    Router::new()
        .route("/health", get(handler::health))
        .merge(api)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
