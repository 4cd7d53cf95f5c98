use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{health, invalid_method, person, token};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Plain API without authentication
        .merge(person_routes("/v1"))
        // Token acquisition stays public
        .route("/v2/token", post(token::token_post).fallback(invalid_method))
        // Same API behind the JWT gate
        .merge(person_routes("/v2").route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware)))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// list/insert/update/delete mounted under `prefix`. The bare
/// `update/` and `delete/` paths hit the same handlers so an empty id is
/// reported as a bad id rather than an unknown route.
fn person_routes(prefix: &str) -> Router<AppState> {
    let update_route = || -> MethodRouter<AppState> { put(person::update).fallback(invalid_method) };
    let delete_route = || -> MethodRouter<AppState> { delete(person::delete).fallback(invalid_method) };

    Router::new()
        .route(prefix, get(person::list).fallback(invalid_method))
        .route(&format!("{prefix}/insert"), post(person::insert).fallback(invalid_method))
        .route(&format!("{prefix}/update/:id"), update_route())
        .route(&format!("{prefix}/update/"), update_route())
        .route(&format!("{prefix}/delete/:id"), delete_route())
        .route(&format!("{prefix}/delete/"), delete_route())
}
