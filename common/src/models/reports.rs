//! Report DTOs served by the dashboard endpoints.
//!
//! Each struct mirrors one section of a dashboard page. All timestamps are
//! serialized as RFC 3339 strings; absent aggregates stay `None` rather than
//! defaulting to fake values.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Quick sidebar stats for a schema.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchemaStats {
    /// Total process atoms (solution attempts) stored.
    pub process_atoms: i64,
    /// Total feedback events recorded.
    pub feedback_events: i64,
}

/// One experiment run row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExperimentRun {
    pub run_name: Option<String>,
    pub model: Option<String>,
    /// Either "baseline" or "memory".
    pub mode: Option<String>,
    pub tasks_total: Option<i64>,
    pub tasks_correct: Option<i64>,
    /// Run accuracy as a fraction in [0, 1].
    pub accuracy: Option<f64>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
}

/// One recent solution attempt.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttemptRow {
    pub concept: Option<String>,
    /// First 80 characters of the task query.
    pub query_preview: Option<String>,
    pub is_successful: Option<bool>,
    pub created_at: Option<String>,
}

/// Overview page: entity counts, last run, recent attempts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OverviewReport {
    pub state_atoms: i64,
    pub process_atoms: i64,
    pub hebbian_edges: i64,
    pub feedback_events: i64,
    pub last_run: Option<ExperimentRun>,
    pub recent_attempts: Vec<AttemptRow>,
}

/// One point of the cumulative learning curve.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurvePoint {
    pub task_num: i64,
    pub memory_size: i64,
    /// Cumulative accuracy up to this task, in percent.
    pub accuracy_pct: f64,
}

/// Per-day task totals.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimelinePoint {
    pub date: String,
    pub total: i64,
    pub correct: i64,
    pub accuracy_pct: f64,
}

/// Learning curve page: headline metrics, curve, mode comparison, timeline.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LearningReport {
    pub tasks_total: i64,
    pub tasks_correct: i64,
    pub memory_size: i64,
    /// Overall accuracy in percent (0 when no tasks were attempted).
    pub accuracy_pct: f64,
    pub curve: Vec<CurvePoint>,
    /// Mean accuracy of baseline-mode runs, as a fraction.
    pub baseline_avg_accuracy: Option<f64>,
    /// Mean accuracy of memory-mode runs, as a fraction.
    pub memory_avg_accuracy: Option<f64>,
    /// memory minus baseline, when both modes have runs.
    pub delta: Option<f64>,
    pub runs: Vec<ExperimentRun>,
    pub timeline: Vec<TimelinePoint>,
}

/// Newest Adaline learner snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdalineSnapshot {
    pub name: Option<String>,
    pub update_count: Option<i64>,
    pub avg_error: Option<f64>,
    pub learning_rate: Option<f64>,
    pub updated_at: Option<String>,
}

/// Feedback counts per feedback type.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackSlice {
    pub feedback_type: String,
    pub count: i64,
}

/// One concept ranked by predicted utility.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConceptUtility {
    pub concept: String,
    pub utility: f64,
    pub use_count: Option<i64>,
    pub positive_feedback_count: Option<i64>,
    pub negative_feedback_count: Option<i64>,
}

/// One recent insight (attempt with a stored response).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsightRow {
    pub concept: Option<String>,
    /// First 100 characters of the stored response.
    pub insight_preview: Option<String>,
    pub is_successful: Option<bool>,
    pub feedback_score: Option<f64>,
    pub created_at: Option<String>,
}

/// Memory state page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemoryReport {
    pub adaline: Option<AdalineSnapshot>,
    pub feedback: Vec<FeedbackSlice>,
    pub top_concepts: Vec<ConceptUtility>,
    pub recent_insights: Vec<InsightRow>,
}

/// One co-activation edge as returned by the edge query.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EdgeRow {
    pub source: String,
    pub target: String,
    /// Edge weight in [0, 1].
    pub weight: f64,
    pub co_activation_count: i64,
}

/// Graph node with display label and degree.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GraphNode {
    /// Full concept name.
    pub concept: String,
    /// Truncated label for display (20 chars + ellipsis).
    pub label: String,
    /// Number of incident edges.
    pub degree: u32,
}

/// Graph edge referencing node indices.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GraphEdge {
    /// Index into the node list.
    pub source: usize,
    /// Index into the node list.
    pub target: usize,
    pub weight: f64,
    pub co_activation_count: i64,
}

/// Knowledge graph page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GraphReport {
    pub concepts: i64,
    pub connections: i64,
    pub avg_weight: Option<f64>,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Top 20 edges by weight, unfiltered.
    pub strongest: Vec<EdgeRow>,
}

/// Existence and row count for one known table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableStatus {
    pub name: String,
    pub exists: bool,
    /// Row count; `None` when the table does not exist.
    pub row_count: Option<i64>,
}

/// Per-schema table report (admin page).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableReport {
    pub schema: String,
    pub tables: Vec<TableStatus>,
}

/// Row-count comparison of one table across two schemas.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComparisonRow {
    pub table: String,
    pub left_count: i64,
    pub right_count: i64,
    /// right minus left.
    pub diff: i64,
}

/// Two-schema comparison (admin page).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchemaComparison {
    pub left: String,
    pub right: String,
    pub rows: Vec<ComparisonRow>,
}

/// Help text for one dashboard metric.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetricDefinition {
    /// Stable metric key, e.g. "accuracy".
    pub key: &'static str,
    /// Short display title.
    pub title: &'static str,
    /// One-line summary.
    pub summary: &'static str,
    /// Longer explanation shown in tooltips.
    pub detail: &'static str,
}
