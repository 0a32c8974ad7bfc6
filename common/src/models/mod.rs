//! Shared data models for the dashboard service.

pub mod reports;
pub mod schema;
pub mod table;

// Re-export commonly used types
pub use reports::{
    AdalineSnapshot, AttemptRow, ComparisonRow, ConceptUtility, CurvePoint, EdgeRow,
    ExperimentRun, FeedbackSlice, GraphEdge, GraphNode, GraphReport, InsightRow,
    LearningReport, MemoryReport, MetricDefinition, OverviewReport, SchemaComparison,
    SchemaStats, TableReport, TableStatus, TimelinePoint,
};
pub use schema::SchemaName;
pub use table::{ColumnInfo, Table};
