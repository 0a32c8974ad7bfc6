//! Report layer: fixed query templates plus result shaping per page.
//!
//! Each report issues the page's queries through the query executor and
//! shapes the generic tables into typed DTOs. All SQL targets a validated
//! schema via the `{schema}` token; user-supplied data values (weight
//! filter, limits) are bound as parameters.

use serde_json::Value;

use common::models::{
    AdalineSnapshot, AttemptRow, ComparisonRow, ConceptUtility, CurvePoint, EdgeRow,
    ExperimentRun, FeedbackSlice, GraphEdge, GraphNode, GraphReport, InsightRow,
    LearningReport, MemoryReport, OverviewReport, SchemaComparison, SchemaName,
    SchemaStats, Table, TableReport, TableStatus, TimelinePoint,
};

use crate::gateway::{BindValue, Notices, QueryExecutor};

/// Tables every experiment schema is expected to carry.
pub const KNOWN_TABLES: [&str; 6] = [
    "state_atoms",
    "process_atoms",
    "hebbian_edges",
    "feedback_events",
    "adaline_state",
    "experiment_runs",
];

/// Subset of tables compared across schemas.
pub const COMPARE_TABLES: [&str; 4] = [
    "state_atoms",
    "process_atoms",
    "hebbian_edges",
    "feedback_events",
];

const LAST_RUN_SQL: &str = "\
    SELECT run_name, model, mode, tasks_total, tasks_correct, \
           accuracy::float8 AS accuracy, started_at, completed_at \
    FROM {schema}.experiment_runs \
    ORDER BY started_at DESC \
    LIMIT 1";

const RECENT_ATTEMPTS_SQL: &str = "\
    SELECT concept, LEFT(query, 80) AS query_preview, is_successful, created_at \
    FROM {schema}.process_atoms \
    ORDER BY created_at DESC \
    LIMIT 10";

const TASKS_TOTAL_SQL: &str =
    "SELECT COUNT(*) FROM {schema}.process_atoms WHERE task_id IS NOT NULL";

const TASKS_CORRECT_SQL: &str = "\
    SELECT COUNT(*) FROM {schema}.process_atoms \
    WHERE task_id IS NOT NULL AND is_successful = true";

const MEMORY_SIZE_SQL: &str = "SELECT COUNT(*) FROM {schema}.process_atoms";

const LEARNING_CURVE_SQL: &str = "\
    WITH ordered_tasks AS ( \
        SELECT task_id, is_successful, created_at, \
               ROW_NUMBER() OVER (ORDER BY created_at) AS task_num \
        FROM {schema}.process_atoms \
        WHERE task_id IS NOT NULL \
    ), \
    cumulative AS ( \
        SELECT task_num, \
               task_num AS memory_size, \
               (SUM(CASE WHEN is_successful THEN 1 ELSE 0 END) \
                   OVER (ORDER BY task_num))::float8 / task_num * 100 AS accuracy \
        FROM ordered_tasks \
    ) \
    SELECT task_num, memory_size, accuracy \
    FROM cumulative \
    ORDER BY task_num";

const RUNS_SQL: &str = "\
    SELECT run_name, model, mode, tasks_total, tasks_correct, \
           accuracy::float8 AS accuracy, started_at, completed_at \
    FROM {schema}.experiment_runs \
    ORDER BY started_at DESC \
    LIMIT 20";

const TIMELINE_SQL: &str = "\
    SELECT DATE(created_at) AS date, \
           COUNT(*) AS total, \
           SUM(CASE WHEN is_successful THEN 1 ELSE 0 END) AS correct \
    FROM {schema}.process_atoms \
    WHERE task_id IS NOT NULL \
    GROUP BY DATE(created_at) \
    ORDER BY date";

const ADALINE_SQL: &str = "\
    SELECT name, update_count, avg_error::float8 AS avg_error, \
           learning_rate::float8 AS learning_rate, updated_at \
    FROM {schema}.adaline_state \
    ORDER BY updated_at DESC \
    LIMIT 1";

const FEEDBACK_SQL: &str = "\
    SELECT feedback_type, COUNT(*) AS count \
    FROM {schema}.feedback_events \
    GROUP BY feedback_type \
    ORDER BY feedback_type";

const TOP_CONCEPTS_SQL: &str = "\
    SELECT concept, adaline_utility::float8 AS adaline_utility, use_count, \
           positive_feedback_count, negative_feedback_count \
    FROM {schema}.state_atoms \
    WHERE adaline_utility IS NOT NULL \
    ORDER BY adaline_utility DESC \
    LIMIT 15";

const INSIGHTS_SQL: &str = "\
    SELECT concept, LEFT(response, 100) AS insight_preview, is_successful, \
           feedback_score::float8 AS feedback_score, created_at \
    FROM {schema}.process_atoms \
    WHERE response IS NOT NULL \
    ORDER BY created_at DESC \
    LIMIT 15";

const CONCEPT_COUNT_SQL: &str = "SELECT COUNT(*) FROM {schema}.state_atoms";
const EDGE_COUNT_SQL: &str = "SELECT COUNT(*) FROM {schema}.hebbian_edges";
const AVG_WEIGHT_SQL: &str =
    "SELECT AVG(weight)::float8 FROM {schema}.hebbian_edges";

const GRAPH_EDGES_SQL: &str = "\
    SELECT s.concept AS source, t.concept AS target, \
           e.weight::float8 AS weight, e.co_activation_count \
    FROM {schema}.hebbian_edges e \
    JOIN {schema}.state_atoms s ON e.source_id = s.id \
    JOIN {schema}.state_atoms t ON e.target_id = t.id \
    WHERE e.weight >= $1 \
    ORDER BY e.weight DESC \
    LIMIT $2";

const STRONGEST_SQL: &str = "\
    SELECT s.concept AS source, t.concept AS target, \
           e.weight::float8 AS weight, e.co_activation_count \
    FROM {schema}.hebbian_edges e \
    JOIN {schema}.state_atoms s ON e.source_id = s.id \
    JOIN {schema}.state_atoms t ON e.target_id = t.id \
    ORDER BY e.weight DESC \
    LIMIT 20";

/// Issues a page's queries and shapes the results.
pub struct ReportService<'a> {
    executor: &'a dyn QueryExecutor,
}

impl<'a> ReportService<'a> {
    pub fn new(executor: &'a dyn QueryExecutor) -> Self {
        Self { executor }
    }

    /// Sidebar quick stats. Scalar probes only, so failures stay silent.
    pub async fn schema_stats(&self, schema: &SchemaName) -> SchemaStats {
        SchemaStats {
            process_atoms: self.count(schema, "process_atoms").await,
            feedback_events: self.count(schema, "feedback_events").await,
        }
    }

    /// Overview page: entity counts, last run, recent attempts.
    pub async fn overview(&self, schema: &SchemaName, notices: &Notices) -> OverviewReport {
        let last_run_table = self.executor.run_tabular(LAST_RUN_SQL, schema, notices).await;
        let last_run = if last_run_table.is_empty() {
            None
        } else {
            Some(run_from_table(&last_run_table, 0))
        };

        let attempts_table = self
            .executor
            .run_tabular(RECENT_ATTEMPTS_SQL, schema, notices)
            .await;
        let recent_attempts = (0..attempts_table.row_count)
            .map(|i| AttemptRow {
                concept: attempts_table.str_value(i, "concept"),
                query_preview: attempts_table.str_value(i, "query_preview"),
                is_successful: attempts_table.bool_value(i, "is_successful"),
                created_at: attempts_table.str_value(i, "created_at"),
            })
            .collect();

        OverviewReport {
            state_atoms: self.count(schema, "state_atoms").await,
            process_atoms: self.count(schema, "process_atoms").await,
            hebbian_edges: self.count(schema, "hebbian_edges").await,
            feedback_events: self.count(schema, "feedback_events").await,
            last_run,
            recent_attempts,
        }
    }

    /// Learning curve page: headline metrics, cumulative curve, baseline vs
    /// memory comparison, daily timeline.
    pub async fn learning_curve(
        &self,
        schema: &SchemaName,
        notices: &Notices,
    ) -> LearningReport {
        let tasks_total = scalar_i64(self.executor.run_scalar(TASKS_TOTAL_SQL, schema).await);
        let tasks_correct =
            scalar_i64(self.executor.run_scalar(TASKS_CORRECT_SQL, schema).await);
        let memory_size = scalar_i64(self.executor.run_scalar(MEMORY_SIZE_SQL, schema).await);

        let curve_table = self
            .executor
            .run_tabular(LEARNING_CURVE_SQL, schema, notices)
            .await;
        let curve = (0..curve_table.row_count)
            .map(|i| CurvePoint {
                task_num: curve_table.i64_value(i, "task_num").unwrap_or_default(),
                memory_size: curve_table.i64_value(i, "memory_size").unwrap_or_default(),
                accuracy_pct: curve_table.f64_value(i, "accuracy").unwrap_or_default(),
            })
            .collect();

        let runs_table = self.executor.run_tabular(RUNS_SQL, schema, notices).await;
        let runs = runs_from_table(&runs_table);

        let baseline_avg_accuracy = mode_mean(&runs, "baseline");
        let memory_avg_accuracy = mode_mean(&runs, "memory");
        let delta = mode_delta(baseline_avg_accuracy, memory_avg_accuracy);

        let timeline_table = self
            .executor
            .run_tabular(TIMELINE_SQL, schema, notices)
            .await;
        let timeline = (0..timeline_table.row_count)
            .map(|i| {
                let total = timeline_table.i64_value(i, "total").unwrap_or_default();
                let correct = timeline_table.i64_value(i, "correct").unwrap_or_default();
                TimelinePoint {
                    date: timeline_table.str_value(i, "date").unwrap_or_default(),
                    total,
                    correct,
                    accuracy_pct: accuracy_pct(correct, total),
                }
            })
            .collect();

        LearningReport {
            tasks_total,
            tasks_correct,
            memory_size,
            accuracy_pct: accuracy_pct(tasks_correct, tasks_total),
            curve,
            baseline_avg_accuracy,
            memory_avg_accuracy,
            delta,
            runs,
            timeline,
        }
    }

    /// Memory state page: Adaline snapshot, feedback distribution, top
    /// concepts by utility, recent insights.
    pub async fn memory_state(&self, schema: &SchemaName, notices: &Notices) -> MemoryReport {
        let adaline_table = self.executor.run_tabular(ADALINE_SQL, schema, notices).await;
        let adaline = if adaline_table.is_empty() {
            None
        } else {
            Some(AdalineSnapshot {
                name: adaline_table.str_value(0, "name"),
                update_count: adaline_table.i64_value(0, "update_count"),
                avg_error: adaline_table.f64_value(0, "avg_error"),
                learning_rate: adaline_table.f64_value(0, "learning_rate"),
                updated_at: adaline_table.str_value(0, "updated_at"),
            })
        };

        let feedback_table = self
            .executor
            .run_tabular(FEEDBACK_SQL, schema, notices)
            .await;
        let feedback = (0..feedback_table.row_count)
            .map(|i| FeedbackSlice {
                feedback_type: feedback_table
                    .str_value(i, "feedback_type")
                    .unwrap_or_default(),
                count: feedback_table.i64_value(i, "count").unwrap_or_default(),
            })
            .collect();

        let concepts_table = self
            .executor
            .run_tabular(TOP_CONCEPTS_SQL, schema, notices)
            .await;
        let top_concepts = (0..concepts_table.row_count)
            .map(|i| ConceptUtility {
                concept: concepts_table.str_value(i, "concept").unwrap_or_default(),
                utility: concepts_table
                    .f64_value(i, "adaline_utility")
                    .unwrap_or_default(),
                use_count: concepts_table.i64_value(i, "use_count"),
                positive_feedback_count: concepts_table
                    .i64_value(i, "positive_feedback_count"),
                negative_feedback_count: concepts_table
                    .i64_value(i, "negative_feedback_count"),
            })
            .collect();

        let insights_table = self
            .executor
            .run_tabular(INSIGHTS_SQL, schema, notices)
            .await;
        let recent_insights = (0..insights_table.row_count)
            .map(|i| InsightRow {
                concept: insights_table.str_value(i, "concept"),
                insight_preview: insights_table.str_value(i, "insight_preview"),
                is_successful: insights_table.bool_value(i, "is_successful"),
                feedback_score: insights_table.f64_value(i, "feedback_score"),
                created_at: insights_table.str_value(i, "created_at"),
            })
            .collect();

        MemoryReport {
            adaline,
            feedback,
            top_concepts,
            recent_insights,
        }
    }

    /// Knowledge graph page: stats, filtered edge list as an index-based
    /// graph, strongest connections table.
    pub async fn knowledge_graph(
        &self,
        schema: &SchemaName,
        min_weight: f64,
        limit: i64,
        notices: &Notices,
    ) -> GraphReport {
        let concepts = scalar_i64(self.executor.run_scalar(CONCEPT_COUNT_SQL, schema).await);
        let connections = scalar_i64(self.executor.run_scalar(EDGE_COUNT_SQL, schema).await);
        let avg_weight = scalar_f64(self.executor.run_scalar(AVG_WEIGHT_SQL, schema).await);

        let edges_table = self
            .executor
            .run_tabular_bound(
                GRAPH_EDGES_SQL,
                schema,
                &[BindValue::Float(min_weight), BindValue::Int(limit)],
                notices,
            )
            .await;
        let edge_rows = edges_from_table(&edges_table);
        let (nodes, edges) = build_graph(&edge_rows);

        let strongest_table = self
            .executor
            .run_tabular(STRONGEST_SQL, schema, notices)
            .await;
        let strongest = edges_from_table(&strongest_table);

        GraphReport {
            concepts,
            connections,
            avg_weight,
            nodes,
            edges,
            strongest,
        }
    }

    /// Admin table report: existence and row count for every known table.
    pub async fn table_report(&self, schema: &SchemaName) -> TableReport {
        let mut tables = Vec::with_capacity(KNOWN_TABLES.len());
        for table in KNOWN_TABLES {
            let exists = self.executor.table_exists(schema.as_str(), table).await;
            let row_count = if exists {
                Some(self.count(schema, table).await)
            } else {
                None
            };
            tables.push(TableStatus {
                name: table.to_string(),
                exists,
                row_count,
            });
        }
        TableReport {
            schema: schema.as_str().to_string(),
            tables,
        }
    }

    /// Row-count comparison of two resolved schemas.
    pub async fn compare(&self, left: &SchemaName, right: &SchemaName) -> SchemaComparison {
        let mut rows = Vec::with_capacity(COMPARE_TABLES.len());
        for table in COMPARE_TABLES {
            let left_count = self.count(left, table).await;
            let right_count = self.count(right, table).await;
            rows.push(ComparisonRow {
                table: table.to_string(),
                left_count,
                right_count,
                diff: right_count - left_count,
            });
        }
        SchemaComparison {
            left: left.as_str().to_string(),
            right: right.as_str().to_string(),
            rows,
        }
    }

    async fn count(&self, schema: &SchemaName, table: &str) -> i64 {
        let template = format!("SELECT COUNT(*) FROM {{schema}}.{}", table);
        scalar_i64(self.executor.run_scalar(&template, schema).await)
    }
}

// ============================================================================
// Shaping helpers
// ============================================================================

fn scalar_i64(value: Option<Value>) -> i64 {
    match value {
        Some(v) => v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)).unwrap_or(0),
        None => 0,
    }
}

fn scalar_f64(value: Option<Value>) -> Option<f64> {
    value.as_ref().and_then(Value::as_f64)
}

/// Accuracy in percent; zero attempts yield zero, not a division error.
pub(crate) fn accuracy_pct(correct: i64, total: i64) -> f64 {
    if total > 0 {
        correct as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Delta between memory and baseline accuracy, when both are present.
pub(crate) fn mode_delta(baseline: Option<f64>, memory: Option<f64>) -> Option<f64> {
    match (baseline, memory) {
        (Some(b), Some(m)) => Some(m - b),
        _ => None,
    }
}

/// Mean accuracy of runs in the given mode, skipping runs without one.
fn mode_mean(runs: &[ExperimentRun], mode: &str) -> Option<f64> {
    mean(
        runs.iter()
            .filter(|r| r.mode.as_deref() == Some(mode))
            .filter_map(|r| r.accuracy),
    )
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    }
}

fn run_from_table(table: &Table, row: usize) -> ExperimentRun {
    ExperimentRun {
        run_name: table.str_value(row, "run_name"),
        model: table.str_value(row, "model"),
        mode: table.str_value(row, "mode"),
        tasks_total: table.i64_value(row, "tasks_total"),
        tasks_correct: table.i64_value(row, "tasks_correct"),
        accuracy: table.f64_value(row, "accuracy"),
        started_at: table.str_value(row, "started_at"),
        completed_at: table.str_value(row, "completed_at"),
    }
}

fn runs_from_table(table: &Table) -> Vec<ExperimentRun> {
    (0..table.row_count).map(|i| run_from_table(table, i)).collect()
}

fn edges_from_table(table: &Table) -> Vec<EdgeRow> {
    (0..table.row_count)
        .map(|i| EdgeRow {
            source: table.str_value(i, "source").unwrap_or_default(),
            target: table.str_value(i, "target").unwrap_or_default(),
            weight: table.f64_value(i, "weight").unwrap_or_default(),
            co_activation_count: table.i64_value(i, "co_activation_count").unwrap_or_default(),
        })
        .collect()
}

/// Maximum characters of a node label before truncation.
const LABEL_LEN: usize = 20;

fn truncate_label(name: &str) -> String {
    if name.chars().count() > LABEL_LEN {
        let head: String = name.chars().take(LABEL_LEN).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// Builds a deduplicated node list plus index-based edges from edge rows.
fn build_graph(edge_rows: &[EdgeRow]) -> (Vec<GraphNode>, Vec<GraphEdge>) {
    let mut nodes: Vec<GraphNode> = Vec::new();
    let mut index = std::collections::HashMap::new();
    let mut edges = Vec::with_capacity(edge_rows.len());

    let node_index = |nodes: &mut Vec<GraphNode>,
                      index: &mut std::collections::HashMap<String, usize>,
                      concept: &str| {
        *index.entry(concept.to_string()).or_insert_with(|| {
            nodes.push(GraphNode {
                concept: concept.to_string(),
                label: truncate_label(concept),
                degree: 0,
            });
            nodes.len() - 1
        })
    };

    for row in edge_rows {
        let source = node_index(&mut nodes, &mut index, &row.source);
        let target = node_index(&mut nodes, &mut index, &row.target);
        nodes[source].degree += 1;
        nodes[target].degree += 1;
        edges.push(GraphEdge {
            source,
            target,
            weight: row.weight,
            co_activation_count: row.co_activation_count,
        });
    }

    (nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::models::ColumnInfo;
    use serde_json::json;

    fn table(columns: &[&str], rows: Vec<Vec<Value>>) -> Table {
        Table::new(
            columns
                .iter()
                .map(|name| ColumnInfo {
                    name: name.to_string(),
                    data_type: "TEXT".into(),
                })
                .collect(),
            rows,
        )
    }

    /// Canned executor: resolves templates by substring match.
    #[derive(Default)]
    struct FakeExecutor {
        tables: Vec<(&'static str, Table)>,
        scalars: Vec<(&'static str, Value)>,
        existing_tables: Vec<&'static str>,
    }

    #[async_trait]
    impl QueryExecutor for FakeExecutor {
        async fn run_tabular_bound(
            &self,
            template: &str,
            _schema: &SchemaName,
            _binds: &[BindValue],
            _notices: &Notices,
        ) -> Table {
            self.tables
                .iter()
                .find(|(key, _)| template.contains(key))
                .map(|(_, t)| t.clone())
                .unwrap_or_else(Table::empty)
        }

        async fn run_scalar(&self, template: &str, _schema: &SchemaName) -> Option<Value> {
            self.scalars
                .iter()
                .find(|(key, _)| template.contains(key))
                .map(|(_, v)| v.clone())
        }

        async fn table_exists(&self, _schema: &str, table: &str) -> bool {
            self.existing_tables.contains(&table)
        }
    }

    fn schema() -> SchemaName {
        SchemaName::parse("kdm_exp_1", "kdm").unwrap()
    }

    #[test]
    fn accuracy_is_percent_and_safe_on_zero() {
        assert_eq!(accuracy_pct(35, 100), 35.0);
        assert_eq!(accuracy_pct(0, 0), 0.0);
        assert_eq!(accuracy_pct(3, 4), 75.0);
    }

    #[test]
    fn delta_requires_both_modes() {
        let delta = mode_delta(Some(0.26), Some(0.39)).unwrap();
        assert!((delta - 0.13).abs() < 1e-9);
        assert_eq!(mode_delta(None, Some(0.39)), None);
        assert_eq!(mode_delta(Some(0.26), None), None);
    }

    #[test]
    fn labels_truncate_past_twenty_chars() {
        assert_eq!(truncate_label("short"), "short");
        assert_eq!(truncate_label(&"a".repeat(20)), "a".repeat(20));
        assert_eq!(truncate_label(&"a".repeat(25)), format!("{}...", "a".repeat(20)));
    }

    #[test]
    fn graph_construction_dedups_nodes_and_counts_degrees() {
        let rows = vec![
            EdgeRow {
                source: "rotation".into(),
                target: "symmetry".into(),
                weight: 0.9,
                co_activation_count: 4,
            },
            EdgeRow {
                source: "rotation".into(),
                target: "color_fill".into(),
                weight: 0.5,
                co_activation_count: 2,
            },
        ];

        let (nodes, edges) = build_graph(&rows);
        assert_eq!(nodes.len(), 3);
        assert_eq!(edges.len(), 2);

        let rotation = nodes.iter().find(|n| n.concept == "rotation").unwrap();
        assert_eq!(rotation.degree, 2);
        let symmetry = nodes.iter().find(|n| n.concept == "symmetry").unwrap();
        assert_eq!(symmetry.degree, 1);

        // Edges reference node indices.
        assert_eq!(nodes[edges[0].source].concept, "rotation");
        assert_eq!(nodes[edges[0].target].concept, "symmetry");
    }

    #[tokio::test]
    async fn overview_shapes_counts_and_last_run() {
        let executor = FakeExecutor {
            scalars: vec![
                ("state_atoms", json!(12)),
                ("process_atoms", json!(40)),
                ("hebbian_edges", json!(7)),
                ("feedback_events", json!(30)),
            ],
            tables: vec![
                (
                    "experiment_runs",
                    table(
                        &[
                            "run_name",
                            "model",
                            "mode",
                            "tasks_total",
                            "tasks_correct",
                            "accuracy",
                            "started_at",
                            "completed_at",
                        ],
                        vec![vec![
                            json!("run_003"),
                            json!("gpt-4o"),
                            json!("memory"),
                            json!(100),
                            json!(39),
                            json!(0.39),
                            json!("2025-11-01T10:00:00Z"),
                            json!(null),
                        ]],
                    ),
                ),
                (
                    "query_preview",
                    table(
                        &["concept", "query_preview", "is_successful", "created_at"],
                        vec![vec![
                            json!("rotation"),
                            json!("rotate the grid by"),
                            json!(true),
                            json!("2025-11-01T10:05:00Z"),
                        ]],
                    ),
                ),
            ],
            ..Default::default()
        };

        let service = ReportService::new(&executor);
        let notices = Notices::new();
        let report = service.overview(&schema(), &notices).await;

        assert_eq!(report.state_atoms, 12);
        assert_eq!(report.process_atoms, 40);
        let run = report.last_run.unwrap();
        assert_eq!(run.run_name.as_deref(), Some("run_003"));
        assert_eq!(run.accuracy, Some(0.39));
        assert_eq!(report.recent_attempts.len(), 1);
        assert_eq!(report.recent_attempts[0].is_successful, Some(true));
    }

    #[tokio::test]
    async fn overview_handles_empty_schema() {
        let executor = FakeExecutor::default();
        let service = ReportService::new(&executor);
        let notices = Notices::new();
        let report = service.overview(&schema(), &notices).await;

        assert_eq!(report.state_atoms, 0);
        assert!(report.last_run.is_none());
        assert!(report.recent_attempts.is_empty());
    }

    #[tokio::test]
    async fn learning_report_computes_modes_and_timeline_in_rust() {
        let runs = table(
            &[
                "run_name",
                "model",
                "mode",
                "tasks_total",
                "tasks_correct",
                "accuracy",
                "started_at",
                "completed_at",
            ],
            vec![
                vec![
                    json!("base_1"),
                    json!(null),
                    json!("baseline"),
                    json!(100),
                    json!(26),
                    json!(0.26),
                    json!(null),
                    json!(null),
                ],
                vec![
                    json!("mem_1"),
                    json!(null),
                    json!("memory"),
                    json!(100),
                    json!(39),
                    json!(0.39),
                    json!(null),
                    json!(null),
                ],
                // Run without accuracy is skipped by the mean.
                vec![
                    json!("mem_2"),
                    json!(null),
                    json!("memory"),
                    json!(null),
                    json!(null),
                    json!(null),
                    json!(null),
                    json!(null),
                ],
            ],
        );

        let executor = FakeExecutor {
            scalars: vec![
                ("task_id IS NOT NULL AND is_successful", json!(35)),
                ("task_id IS NOT NULL", json!(100)),
                ("process_atoms", json!(120)),
            ],
            tables: vec![
                (
                    "ordered_tasks",
                    table(
                        &["task_num", "memory_size", "accuracy"],
                        vec![
                            vec![json!(1), json!(1), json!(100.0)],
                            vec![json!(2), json!(2), json!(50.0)],
                        ],
                    ),
                ),
                ("experiment_runs", runs),
                (
                    "DATE(created_at)",
                    table(
                        &["date", "total", "correct"],
                        vec![vec![json!("2025-11-01"), json!(4), json!(3)]],
                    ),
                ),
            ],
            ..Default::default()
        };

        let service = ReportService::new(&executor);
        let notices = Notices::new();
        let report = service.learning_curve(&schema(), &notices).await;

        assert_eq!(report.tasks_total, 100);
        assert_eq!(report.tasks_correct, 35);
        assert_eq!(report.accuracy_pct, 35.0);
        assert_eq!(report.memory_size, 120);

        assert_eq!(report.curve.len(), 2);
        assert_eq!(report.curve[1].accuracy_pct, 50.0);

        assert_eq!(report.baseline_avg_accuracy, Some(0.26));
        assert_eq!(report.memory_avg_accuracy, Some(0.39));
        let delta = report.delta.unwrap();
        assert!((delta - 0.13).abs() < 1e-9);

        assert_eq!(report.timeline.len(), 1);
        assert_eq!(report.timeline[0].accuracy_pct, 75.0);
    }

    #[tokio::test]
    async fn memory_report_tolerates_missing_adaline_state() {
        let executor = FakeExecutor {
            tables: vec![(
                "feedback_type",
                table(
                    &["feedback_type", "count"],
                    vec![
                        vec![json!("negative"), json!(5)],
                        vec![json!("positive"), json!(20)],
                    ],
                ),
            )],
            ..Default::default()
        };

        let service = ReportService::new(&executor);
        let notices = Notices::new();
        let report = service.memory_state(&schema(), &notices).await;

        assert!(report.adaline.is_none());
        assert_eq!(report.feedback.len(), 2);
        assert_eq!(report.feedback[1].feedback_type, "positive");
        assert_eq!(report.feedback[1].count, 20);
        assert!(report.top_concepts.is_empty());
    }

    #[tokio::test]
    async fn graph_report_builds_nodes_from_edges() {
        let edges = table(
            &["source", "target", "weight", "co_activation_count"],
            vec![
                vec![json!("rotation"), json!("symmetry"), json!(0.9), json!(4)],
                vec![json!("symmetry"), json!("color_fill"), json!(0.4), json!(1)],
            ],
        );

        let executor = FakeExecutor {
            scalars: vec![
                ("state_atoms", json!(3)),
                ("COUNT(*) FROM {schema}.hebbian_edges", json!(2)),
                ("AVG(weight)", json!(0.65)),
            ],
            tables: vec![("hebbian_edges e", edges)],
            ..Default::default()
        };

        let service = ReportService::new(&executor);
        let notices = Notices::new();
        let report = service.knowledge_graph(&schema(), 0.0, 200, &notices).await;

        assert_eq!(report.concepts, 3);
        assert_eq!(report.connections, 2);
        assert_eq!(report.avg_weight, Some(0.65));
        assert_eq!(report.nodes.len(), 3);
        assert_eq!(report.edges.len(), 2);
        assert_eq!(report.strongest.len(), 2);
    }

    #[tokio::test]
    async fn table_report_skips_counts_for_missing_tables() {
        let executor = FakeExecutor {
            existing_tables: vec!["state_atoms", "process_atoms"],
            scalars: vec![
                ("state_atoms", json!(10)),
                ("process_atoms", json!(25)),
            ],
            ..Default::default()
        };

        let service = ReportService::new(&executor);
        let report = service.table_report(&schema()).await;

        assert_eq!(report.tables.len(), KNOWN_TABLES.len());
        let state = report.tables.iter().find(|t| t.name == "state_atoms").unwrap();
        assert!(state.exists);
        assert_eq!(state.row_count, Some(10));
        let adaline = report.tables.iter().find(|t| t.name == "adaline_state").unwrap();
        assert!(!adaline.exists);
        assert_eq!(adaline.row_count, None);
    }

    #[tokio::test]
    async fn comparison_diff_is_right_minus_left() {
        let executor = FakeExecutor {
            scalars: vec![
                ("state_atoms", json!(10)),
                ("process_atoms", json!(25)),
                ("hebbian_edges", json!(5)),
                ("feedback_events", json!(0)),
            ],
            ..Default::default()
        };

        let service = ReportService::new(&executor);
        let left = SchemaName::parse("kdm_a", "kdm").unwrap();
        let right = SchemaName::parse("kdm_b", "kdm").unwrap();
        let report = service.compare(&left, &right).await;

        assert_eq!(report.rows.len(), COMPARE_TABLES.len());
        // Fake returns identical counts for both schemas.
        assert!(report.rows.iter().all(|r| r.diff == 0));
        assert_eq!(report.left, "kdm_a");
        assert_eq!(report.right, "kdm_b");
    }
}
