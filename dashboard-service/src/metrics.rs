//! Static catalog of metric definitions shown across the dashboard.
//!
//! Keys are stable identifiers the frontend uses for tooltip lookups; the
//! catalog is served sorted by key.

use common::models::MetricDefinition;

/// All metric definitions, sorted by key.
pub const METRIC_CATALOG: [MetricDefinition; 21] = [
    MetricDefinition {
        key: "accuracy",
        title: "Accuracy",
        summary: "Share of tasks answered correctly.",
        detail: "Correct tasks divided by total attempted tasks, in percent. \
                 Only attempts tagged with a task id count.",
    },
    MetricDefinition {
        key: "adaline_avg_error",
        title: "Average error",
        summary: "Recent mean prediction error of the utility estimator.",
        detail: "Rolling average of the Adaline unit's prediction error. \
                 Lower values mean the utility estimates track observed \
                 feedback more closely.",
    },
    MetricDefinition {
        key: "adaline_learning_rate",
        title: "Learning rate",
        summary: "Step size of the utility estimator's weight updates.",
        detail: "Current learning rate of the Adaline unit. It may decay \
                 over the course of an experiment run.",
    },
    MetricDefinition {
        key: "adaline_updates",
        title: "Update count",
        summary: "Number of weight updates applied to the estimator.",
        detail: "Total number of training updates the Adaline unit has \
                 received since the schema was initialized.",
    },
    MetricDefinition {
        key: "avg_edge_weight",
        title: "Average edge weight",
        summary: "Mean association strength across the graph.",
        detail: "Average weight over all Hebbian edges in the schema. A \
                 rising average indicates the memory is consolidating \
                 stronger associations.",
    },
    MetricDefinition {
        key: "baseline_accuracy",
        title: "Baseline accuracy",
        summary: "Mean accuracy of runs executed without memory.",
        detail: "Average accuracy across experiment runs in baseline mode, \
                 where the solver answers without consulting stored atoms.",
    },
    MetricDefinition {
        key: "co_activations",
        title: "Co-activations",
        summary: "Times two concepts fired together.",
        detail: "Count of joint activations recorded on a Hebbian edge. \
                 Each co-activation strengthens the edge weight.",
    },
    MetricDefinition {
        key: "concepts",
        title: "Concepts",
        summary: "Distinct concepts held in semantic memory.",
        detail: "Number of state atoms in the schema. Each atom names one \
                 concept plus its learned utility statistics.",
    },
    MetricDefinition {
        key: "connections",
        title: "Connections",
        summary: "Associations between concepts.",
        detail: "Number of Hebbian edges linking state atoms. Edges are \
                 created and strengthened when concepts activate together.",
    },
    MetricDefinition {
        key: "edge_weight",
        title: "Edge weight",
        summary: "Strength of one concept association.",
        detail: "Weight of a single Hebbian edge, between 0 and 1. Higher \
                 weights mean the two concepts co-activate more reliably.",
    },
    MetricDefinition {
        key: "feedback_events",
        title: "Feedback events",
        summary: "Reinforcement signals recorded so far.",
        detail: "Number of positive or negative feedback events logged \
                 against memory retrievals in this schema.",
    },
    MetricDefinition {
        key: "hebbian_edges",
        title: "Hebbian edges",
        summary: "Stored concept-to-concept associations.",
        detail: "Total rows in the hebbian_edges table. Mirrors the \
                 connections metric on the knowledge graph page.",
    },
    MetricDefinition {
        key: "memory_accuracy",
        title: "Memory accuracy",
        summary: "Mean accuracy of runs executed with memory.",
        detail: "Average accuracy across experiment runs in memory mode, \
                 where the solver consults stored atoms before answering.",
    },
    MetricDefinition {
        key: "memory_delta",
        title: "Memory delta",
        summary: "Accuracy gained by enabling memory.",
        detail: "Memory-mode average accuracy minus baseline average \
                 accuracy. Positive values mean memory helps.",
    },
    MetricDefinition {
        key: "memory_size",
        title: "Memory size",
        summary: "Episodes stored in episodic memory.",
        detail: "Total number of process atoms in the schema, including \
                 attempts not tied to a scored task.",
    },
    MetricDefinition {
        key: "negative_feedback",
        title: "Negative feedback",
        summary: "Times a concept's retrieval was penalized.",
        detail: "Count of negative feedback events attributed to a state \
                 atom. Drives the utility estimate down.",
    },
    MetricDefinition {
        key: "positive_feedback",
        title: "Positive feedback",
        summary: "Times a concept's retrieval was rewarded.",
        detail: "Count of positive feedback events attributed to a state \
                 atom. Drives the utility estimate up.",
    },
    MetricDefinition {
        key: "process_atoms",
        title: "Process atoms",
        summary: "Recorded solution attempts.",
        detail: "Total rows in the process_atoms table. Each atom captures \
                 one attempt: query, response, outcome and timestamps.",
    },
    MetricDefinition {
        key: "state_atoms",
        title: "State atoms",
        summary: "Concept records in semantic memory.",
        detail: "Total rows in the state_atoms table. Mirrors the concepts \
                 metric on the knowledge graph page.",
    },
    MetricDefinition {
        key: "tasks_correct",
        title: "Tasks correct",
        summary: "Scored tasks answered correctly.",
        detail: "Number of attempts with a task id marked successful. \
                 Numerator of the accuracy metric.",
    },
    MetricDefinition {
        key: "use_count",
        title: "Use count",
        summary: "Times a concept was retrieved.",
        detail: "Number of retrievals of a state atom across all attempts. \
                 Heavily used concepts with high utility are the memory's \
                 workhorses.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_by_key() {
        let keys: Vec<_> = METRIC_CATALOG.iter().map(|m| m.key).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = METRIC_CATALOG.iter().map(|m| m.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), METRIC_CATALOG.len());
    }

    #[test]
    fn every_entry_is_filled_in() {
        for metric in &METRIC_CATALOG {
            assert!(!metric.key.is_empty());
            assert!(!metric.title.is_empty());
            assert!(!metric.summary.is_empty());
            assert!(!metric.detail.is_empty());
        }
    }
}
