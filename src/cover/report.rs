//! Coverage analysis of a cover selection

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::index::SessionClassIndex;
use super::selector::{CoverConfig, CoverSelection};

/// One selected session and what it added
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageStep {
    pub rank: usize,
    pub session_id: String,
    pub classes_in_session: usize,
    pub new_classes_contributed: usize,
    pub cumulative_coverage: usize,
    pub coverage_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// How widely classes are spread over sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassFrequency {
    /// Classes found in exactly one session
    pub rare_classes_one_session: usize,
    pub common_classes_five_plus: usize,
    pub very_common_classes_ten_plus: usize,
}

/// Ordered selection with per-step and corpus-level statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub generated_at: DateTime<Utc>,
    pub total_sessions_available: usize,
    pub selected_sessions: usize,
    /// Selected sessions over available sessions
    pub reduction_ratio: f64,
    pub total_classes: usize,
    pub covered_classes: usize,
    pub coverage_percentage: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uncovered_classes: Vec<String>,
    pub steps: Vec<CoverageStep>,
    pub class_frequency: ClassFrequency,
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

impl CoverageReport {
    /// Analyze a selection made over `index`
    pub fn build(
        index: &SessionClassIndex,
        selection: &CoverSelection,
        config: &CoverConfig,
    ) -> Self {
        let total_classes = index.all_classes().len();
        let mut covered: BTreeSet<&str> = BTreeSet::new();
        let mut steps = Vec::with_capacity(selection.selected.len());

        for (i, session_id) in selection.selected.iter().enumerate() {
            let classes = index.classes_of(session_id);
            let before = covered.len();
            if let Some(classes) = classes {
                covered.extend(classes.iter().map(String::as_str));
            }
            let info = index.info(session_id);

            steps.push(CoverageStep {
                rank: i + 1,
                session_id: session_id.clone(),
                classes_in_session: classes.map_or(0, BTreeSet::len),
                new_classes_contributed: covered.len() - before,
                cumulative_coverage: covered.len(),
                coverage_percentage: percentage(covered.len(), total_classes),
                records: info.map(|i| i.records),
                size_bytes: info.map(|i| i.size_bytes),
            });
        }

        let frequencies = index.class_frequencies();
        let class_frequency = ClassFrequency {
            rare_classes_one_session: frequencies.values().filter(|&&n| n == 1).count(),
            common_classes_five_plus: frequencies
                .values()
                .filter(|&&n| n >= config.common_threshold)
                .count(),
            very_common_classes_ten_plus: frequencies
                .values()
                .filter(|&&n| n >= config.very_common_threshold)
                .count(),
        };

        let available = index.len();
        let reduction_ratio = if available == 0 {
            0.0
        } else {
            selection.selected.len() as f64 / available as f64
        };

        CoverageReport {
            generated_at: Utc::now(),
            total_sessions_available: available,
            selected_sessions: selection.selected.len(),
            reduction_ratio,
            total_classes,
            covered_classes: covered.len(),
            coverage_percentage: percentage(covered.len(), total_classes),
            uncovered_classes: selection.uncovered.iter().cloned().collect(),
            steps,
            class_frequency,
        }
    }

    /// Selected session ids in selection order
    pub fn selected_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.session_id.as_str()).collect()
    }
}
