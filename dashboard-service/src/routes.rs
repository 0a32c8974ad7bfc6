//! 路由模块

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/schemas", get(handlers::list_schemas))
        .route("/api/schemas/{schema}/stats", get(handlers::schema_stats))
        .route("/api/schemas/{schema}/overview", get(handlers::overview))
        .route(
            "/api/schemas/{schema}/learning-curve",
            get(handlers::learning_curve),
        )
        .route(
            "/api/schemas/{schema}/memory-state",
            get(handlers::memory_state),
        )
        .route("/api/schemas/{schema}/graph", get(handlers::knowledge_graph))
        .route("/api/schemas/{schema}/tables", get(handlers::table_report))
        .route("/api/admin/compare", get(handlers::compare_schemas))
        .route("/api/admin/connection", get(handlers::connection_info))
        .route(
            "/api/admin/connection/reset",
            post(handlers::reset_connection),
        )
        .route("/api/metrics", get(handlers::metric_catalog))
}
