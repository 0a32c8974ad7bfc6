//! 实验遥测只读分析看板服务
//!
//! 提供实验数据的只读分析功能，包括：
//! - 实验 schema 枚举与校验
//! - 概览 / 学习曲线 / 记忆状态 / 知识图谱报表
//! - 管理诊断（表状态、schema 对比、连接管理）

mod gateway;
mod handlers;
mod metrics;
mod reports;
mod routes;
mod state;

use axum::{middleware, routing::get, Json, Router};
use common::config::AppConfig;
use common::middleware::request_id::request_id_middleware;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "dashboard-service";
const DEFAULT_PORT: u16 = 8084;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "实验遥测看板 API",
        version = "0.1.0",
        description = "实验遥测数据只读分析服务"
    ),
    paths(
        handlers::health_check,
        handlers::list_schemas,
        handlers::schema_stats,
        handlers::overview,
        handlers::learning_curve,
        handlers::memory_state,
        handlers::knowledge_graph,
        handlers::table_report,
        handlers::compare_schemas,
        handlers::connection_info,
        handlers::reset_connection,
        handlers::metric_catalog,
    ),
    components(schemas(
        common::models::SchemaStats,
        common::models::OverviewReport,
        common::models::ExperimentRun,
        common::models::AttemptRow,
        common::models::LearningReport,
        common::models::CurvePoint,
        common::models::TimelinePoint,
        common::models::MemoryReport,
        common::models::AdalineSnapshot,
        common::models::FeedbackSlice,
        common::models::ConceptUtility,
        common::models::InsightRow,
        common::models::GraphReport,
        common::models::GraphNode,
        common::models::GraphEdge,
        common::models::EdgeRow,
        common::models::TableReport,
        common::models::TableStatus,
        common::models::SchemaComparison,
        common::models::ComparisonRow,
        common::models::MetricDefinition,
        handlers::HealthResponse,
        handlers::ConnectionInfo,
        handlers::ResetResult,
    )),
    tags(
        (name = "schemas", description = "schema 枚举与统计端点"),
        (name = "reports", description = "报表端点"),
        (name = "admin", description = "管理诊断端点"),
        (name = "metrics", description = "指标说明端点"),
        (name = "health", description = "健康检查端点")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Load .env file (if present) before anything else
    load_dotenv();

    // 初始化日志追踪
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 加载配置
    let mut config = AppConfig::load_with_service(SERVICE_NAME);
    config.port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    // 创建应用状态
    let state = AppState::new(config.clone());

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = format!("{}:{}", config.host, config.port);
    info!(service = SERVICE_NAME, address = %addr, "启动服务");

    let listener = TcpListener::bind(&addr).await.expect("绑定地址失败");
    axum::serve(listener, app).await.expect("服务启动失败");
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Load .env file from the working directory (best-effort, no error if missing).
fn load_dotenv() {
    let env_path = std::path::Path::new(".env");
    if env_path.exists() {
        if let Ok(content) = std::fs::read_to_string(env_path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim();
                    // Only set if not already set by the environment
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
        }
    }
}
