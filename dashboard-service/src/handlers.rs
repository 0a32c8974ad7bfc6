//! Handler模块

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::errors::AppError;
use common::models::{
    GraphReport, LearningReport, MemoryReport, MetricDefinition, OverviewReport,
    SchemaComparison, SchemaStats, TableReport,
};
use common::response::ApiResponse;
use common::utils::mask_database_url;

use crate::gateway::Notices;
use crate::metrics::METRIC_CATALOG;
use crate::reports::ReportService;
use crate::state::AppState;

const DEFAULT_MIN_WEIGHT: f64 = 0.0;
const DEFAULT_GRAPH_LIMIT: i64 = 200;

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        configured: state.gateway.provider().database_url().is_some(),
        connected: state.gateway.provider().has_pool().await,
    })
}

/// 列出实验 schema
#[utoipa::path(
    get,
    path = "/api/schemas",
    tag = "schemas",
    responses(
        (status = 200, description = "schema 列表", body = ApiResponse<Vec<String>>)
    )
)]
pub async fn list_schemas(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    let notices = Notices::new();
    let schemas = state.gateway.list_schemas(&notices).await;
    Json(
        ApiResponse::ok_with_service(schemas, &state.config.service_name)
            .with_notices(notices.drain()),
    )
}

/// 侧边栏快速统计
#[utoipa::path(
    get,
    path = "/api/schemas/{schema}/stats",
    tag = "schemas",
    params(("schema" = String, Path, description = "实验 schema 名称")),
    responses(
        (status = 200, description = "快速统计", body = ApiResponse<SchemaStats>),
        (status = 400, description = "schema 名称非法"),
        (status = 404, description = "schema 不存在"),
        (status = 503, description = "数据库未配置")
    )
)]
pub async fn schema_stats(
    State(state): State<AppState>,
    Path(schema): Path<String>,
) -> Result<Json<ApiResponse<SchemaStats>>, AppError> {
    let schema = state.gateway.resolve_schema(&schema).await?;
    let notices = Notices::new();
    let stats = ReportService::new(state.gateway.as_ref())
        .schema_stats(&schema)
        .await;
    Ok(Json(
        ApiResponse::ok_with_service(stats, &state.config.service_name)
            .with_notices(notices.drain()),
    ))
}

/// 概览报表
#[utoipa::path(
    get,
    path = "/api/schemas/{schema}/overview",
    tag = "reports",
    params(("schema" = String, Path, description = "实验 schema 名称")),
    responses(
        (status = 200, description = "概览报表", body = ApiResponse<OverviewReport>),
        (status = 400, description = "schema 名称非法"),
        (status = 404, description = "schema 不存在"),
        (status = 503, description = "数据库未配置")
    )
)]
pub async fn overview(
    State(state): State<AppState>,
    Path(schema): Path<String>,
) -> Result<Json<ApiResponse<OverviewReport>>, AppError> {
    let schema = state.gateway.resolve_schema(&schema).await?;
    let notices = Notices::new();
    let report = ReportService::new(state.gateway.as_ref())
        .overview(&schema, &notices)
        .await;
    Ok(Json(
        ApiResponse::ok_with_service(report, &state.config.service_name)
            .with_notices(notices.drain()),
    ))
}

/// 学习曲线报表
#[utoipa::path(
    get,
    path = "/api/schemas/{schema}/learning-curve",
    tag = "reports",
    params(("schema" = String, Path, description = "实验 schema 名称")),
    responses(
        (status = 200, description = "学习曲线报表", body = ApiResponse<LearningReport>),
        (status = 400, description = "schema 名称非法"),
        (status = 404, description = "schema 不存在"),
        (status = 503, description = "数据库未配置")
    )
)]
pub async fn learning_curve(
    State(state): State<AppState>,
    Path(schema): Path<String>,
) -> Result<Json<ApiResponse<LearningReport>>, AppError> {
    let schema = state.gateway.resolve_schema(&schema).await?;
    let notices = Notices::new();
    let report = ReportService::new(state.gateway.as_ref())
        .learning_curve(&schema, &notices)
        .await;
    Ok(Json(
        ApiResponse::ok_with_service(report, &state.config.service_name)
            .with_notices(notices.drain()),
    ))
}

/// 记忆状态报表
#[utoipa::path(
    get,
    path = "/api/schemas/{schema}/memory-state",
    tag = "reports",
    params(("schema" = String, Path, description = "实验 schema 名称")),
    responses(
        (status = 200, description = "记忆状态报表", body = ApiResponse<MemoryReport>),
        (status = 400, description = "schema 名称非法"),
        (status = 404, description = "schema 不存在"),
        (status = 503, description = "数据库未配置")
    )
)]
pub async fn memory_state(
    State(state): State<AppState>,
    Path(schema): Path<String>,
) -> Result<Json<ApiResponse<MemoryReport>>, AppError> {
    let schema = state.gateway.resolve_schema(&schema).await?;
    let notices = Notices::new();
    let report = ReportService::new(state.gateway.as_ref())
        .memory_state(&schema, &notices)
        .await;
    Ok(Json(
        ApiResponse::ok_with_service(report, &state.config.service_name)
            .with_notices(notices.drain()),
    ))
}

/// 知识图谱查询参数
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct GraphQuery {
    /// 最小边权重（0 到 1）
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_weight: Option<f64>,

    /// 返回的最大边数
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<i64>,
}

/// 知识图谱报表
#[utoipa::path(
    get,
    path = "/api/schemas/{schema}/graph",
    tag = "reports",
    params(
        ("schema" = String, Path, description = "实验 schema 名称"),
        GraphQuery
    ),
    responses(
        (status = 200, description = "知识图谱报表", body = ApiResponse<GraphReport>),
        (status = 400, description = "schema 名称非法或参数越界"),
        (status = 404, description = "schema 不存在"),
        (status = 503, description = "数据库未配置")
    )
)]
pub async fn knowledge_graph(
    State(state): State<AppState>,
    Path(schema): Path<String>,
    Query(query): Query<GraphQuery>,
) -> Result<Json<ApiResponse<GraphReport>>, AppError> {
    query.validate()?;
    let min_weight = query.min_weight.unwrap_or(DEFAULT_MIN_WEIGHT);
    let limit = query.limit.unwrap_or(DEFAULT_GRAPH_LIMIT);

    let schema = state.gateway.resolve_schema(&schema).await?;
    let notices = Notices::new();
    let report = ReportService::new(state.gateway.as_ref())
        .knowledge_graph(&schema, min_weight, limit, &notices)
        .await;
    Ok(Json(
        ApiResponse::ok_with_service(report, &state.config.service_name)
            .with_notices(notices.drain()),
    ))
}

/// 表状态报表
#[utoipa::path(
    get,
    path = "/api/schemas/{schema}/tables",
    tag = "admin",
    params(("schema" = String, Path, description = "实验 schema 名称")),
    responses(
        (status = 200, description = "表状态报表", body = ApiResponse<TableReport>),
        (status = 400, description = "schema 名称非法"),
        (status = 404, description = "schema 不存在"),
        (status = 503, description = "数据库未配置")
    )
)]
pub async fn table_report(
    State(state): State<AppState>,
    Path(schema): Path<String>,
) -> Result<Json<ApiResponse<TableReport>>, AppError> {
    let schema = state.gateway.resolve_schema(&schema).await?;
    let notices = Notices::new();
    let report = ReportService::new(state.gateway.as_ref())
        .table_report(&schema)
        .await;
    Ok(Json(
        ApiResponse::ok_with_service(report, &state.config.service_name)
            .with_notices(notices.drain()),
    ))
}

/// schema 对比查询参数
#[derive(Debug, Deserialize, IntoParams)]
pub struct CompareQuery {
    /// 左侧 schema 名称
    pub left: String,

    /// 右侧 schema 名称
    pub right: String,
}

/// 对比两个实验 schema 的行数
#[utoipa::path(
    get,
    path = "/api/admin/compare",
    tag = "admin",
    params(CompareQuery),
    responses(
        (status = 200, description = "行数对比", body = ApiResponse<SchemaComparison>),
        (status = 400, description = "schema 名称非法"),
        (status = 404, description = "schema 不存在"),
        (status = 503, description = "数据库未配置")
    )
)]
pub async fn compare_schemas(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ApiResponse<SchemaComparison>>, AppError> {
    let left = state.gateway.resolve_schema(&query.left).await?;
    let right = state.gateway.resolve_schema(&query.right).await?;
    let notices = Notices::new();
    let report = ReportService::new(state.gateway.as_ref())
        .compare(&left, &right)
        .await;
    Ok(Json(
        ApiResponse::ok_with_service(report, &state.config.service_name)
            .with_notices(notices.drain()),
    ))
}

/// 连接诊断信息
#[utoipa::path(
    get,
    path = "/api/admin/connection",
    tag = "admin",
    responses(
        (status = 200, description = "连接诊断信息", body = ApiResponse<ConnectionInfo>)
    )
)]
pub async fn connection_info(
    State(state): State<AppState>,
) -> Json<ApiResponse<ConnectionInfo>> {
    let url = state.gateway.provider().database_url();
    let latency_ms = if url.is_some() {
        state.gateway.probe_latency().await
    } else {
        None
    };

    let info = ConnectionInfo {
        configured: url.is_some(),
        url: url.as_deref().map(mask_database_url),
        connected: latency_ms.is_some(),
        latency_ms,
    };
    Json(ApiResponse::ok_with_service(info, &state.config.service_name))
}

/// 清除连接缓存
#[utoipa::path(
    post,
    path = "/api/admin/connection/reset",
    tag = "admin",
    responses(
        (status = 200, description = "连接缓存已清除", body = ApiResponse<ResetResult>)
    )
)]
pub async fn reset_connection(
    State(state): State<AppState>,
) -> Json<ApiResponse<ResetResult>> {
    state.gateway.provider().invalidate().await;
    let result = ResetResult {
        cleared: true,
        generation: state.gateway.provider().generation(),
    };
    Json(ApiResponse::ok_with_service(result, &state.config.service_name))
}

/// 指标说明目录
#[utoipa::path(
    get,
    path = "/api/metrics",
    tag = "metrics",
    responses(
        (status = 200, description = "指标定义列表", body = ApiResponse<Vec<MetricDefinition>>)
    )
)]
pub async fn metric_catalog(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<MetricDefinition>>> {
    Json(ApiResponse::ok_with_service(
        METRIC_CATALOG.to_vec(),
        &state.config.service_name,
    ))
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    /// 是否配置了数据库连接串
    pub configured: bool,
    /// 当前是否持有连接池
    pub connected: bool,
}

/// 连接诊断信息（连接串已脱敏）
#[derive(Serialize, ToSchema)]
pub struct ConnectionInfo {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// 连接缓存清除结果
#[derive(Serialize, ToSchema)]
pub struct ResetResult {
    pub cleared: bool,
    /// 已建立过的连接池代数
    pub generation: u64,
}
