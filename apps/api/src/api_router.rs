use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use rolegate_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/roles/grants",
            get(handlers::roles::list_grants_handler),
        )
        .route(
            "/api/roles/users",
            post(handlers::roles::grant_users_handler)
                .delete(handlers::roles::revoke_users_handler),
        )
        .route(
            "/api/roles/groups",
            post(handlers::roles::grant_groups_handler)
                .delete(handlers::roles::revoke_groups_handler),
        )
        .route(
            "/api/roles/resources",
            get(handlers::templates::list_resource_grants_handler),
        )
        .route(
            "/api/roles/templates/preview",
            get(handlers::templates::preview_application_handler),
        )
        .route(
            "/api/roles/templates/apply",
            post(handlers::templates::apply_template_handler),
        )
        .route_layer(from_fn(middleware::require_actor));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
