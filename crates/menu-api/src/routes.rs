use axum::{
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{health, menu};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Public routes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Menu routes
    let menu_routes = Router::new()
        .route("/api/menus", get(menu::list_menus).post(menu::create_menu))
        .route("/api/menus/hierarchy", get(menu::get_hierarchy))
        .route(
            "/api/menus/{id}",
            get(menu::get_menu)
                .patch(menu::update_menu)
                .delete(menu::delete_menu),
        );

    Router::new()
        .merge(health_routes)
        .merge(menu_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::default().include_headers(true)),
                )
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}
