//! Greedy minimum set cover over session class sets
//!
//! Each round picks the session that covers the most still-uncovered
//! classes. This is the classical greedy approximation: the result is within
//! a factor H(d) of the optimum, where d is the largest class set, but it is
//! not guaranteed to be minimal.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use super::error::CoverError;
use super::index::SessionClassIndex;
use super::report::CoverageReport;

/// Configuration for cover selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverConfig {
    /// Only consider the first N sessions in id order (0 = all)
    pub max_sessions: usize,

    /// Classes seen in at least this many sessions count as common
    pub common_threshold: usize,

    /// Classes seen in at least this many sessions count as very common
    pub very_common_threshold: usize,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            max_sessions: 0,
            common_threshold: 5,
            very_common_threshold: 10,
        }
    }
}

impl CoverConfig {
    pub fn builder() -> CoverConfigBuilder {
        CoverConfigBuilder::default()
    }
}

/// Builder for CoverConfig
#[derive(Debug, Default)]
pub struct CoverConfigBuilder {
    config: CoverConfig,
}

impl CoverConfigBuilder {
    pub fn max_sessions(mut self, max: usize) -> Self {
        self.config.max_sessions = max;
        self
    }

    /// Set the common and very-common thresholds (very common is at least common)
    pub fn frequency_thresholds(mut self, common: usize, very_common: usize) -> Self {
        self.config.common_threshold = common.max(1);
        self.config.very_common_threshold = very_common.max(self.config.common_threshold);
        self
    }

    pub fn build(self) -> CoverConfig {
        self.config
    }
}

/// Ordered sessions chosen by the greedy cover plus anything left uncovered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverSelection {
    pub selected: Vec<String>,
    pub uncovered: BTreeSet<String>,
}

impl CoverSelection {
    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty()
    }
}

/// Select sessions greedily until every class is covered.
///
/// Ties on marginal coverage go to the lowest session id. Selection stops
/// early when no remaining session adds a class; whatever is left is
/// returned in `uncovered`.
pub fn select_minimal_cover(sessions: &BTreeMap<String, BTreeSet<String>>) -> CoverSelection {
    let mut uncovered: BTreeSet<String> = sessions.values().flatten().cloned().collect();
    let mut chosen: BTreeSet<&str> = BTreeSet::new();
    let mut selected = Vec::new();

    while !uncovered.is_empty() {
        let mut best: Option<(&str, usize)> = None;

        for (session_id, classes) in sessions {
            if chosen.contains(session_id.as_str()) {
                continue;
            }
            let gain = classes.iter().filter(|c| uncovered.contains(*c)).count();
            if gain > best.map_or(0, |(_, g)| g) {
                best = Some((session_id.as_str(), gain));
            }
        }

        let Some((session_id, gain)) = best else {
            break;
        };

        if let Some(classes) = sessions.get(session_id) {
            for class in classes {
                uncovered.remove(class);
            }
        }
        chosen.insert(session_id);
        selected.push(session_id.to_string());
        debug!(
            round = selected.len(),
            session = session_id,
            new_classes = gain,
            remaining = uncovered.len(),
            "Selected session"
        );
    }

    CoverSelection {
        selected,
        uncovered,
    }
}

/// Runs the greedy cover over a sealed [`SessionClassIndex`]
#[derive(Debug, Clone, Default)]
pub struct CoverSelector {
    config: CoverConfig,
}

impl CoverSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CoverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoverConfig {
        &self.config
    }

    /// Select a minimal covering subset of sessions and analyze the result.
    ///
    /// Fails with [`CoverError::StructurePassIncomplete`] when the index has
    /// not been sealed.
    pub fn select(&self, index: &SessionClassIndex) -> Result<CoverageReport, CoverError> {
        if !index.is_sealed() {
            return Err(CoverError::StructurePassIncomplete);
        }

        let _span = info_span!("cover_selection", sessions = index.len()).entered();

        let index = index.limited(self.config.max_sessions);
        let selection = select_minimal_cover(index.sessions());
        let report = CoverageReport::build(&index, &selection, &self.config);

        info!(
            selected = report.selected_sessions,
            available = report.total_sessions_available,
            classes = report.total_classes,
            "Cover selection complete"
        );
        if !selection.is_complete() {
            warn!(uncovered = selection.uncovered.len(), "Classes left uncovered");
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Classes are given space-separated
    fn sessions(entries: &[(&str, &str)]) -> BTreeMap<String, BTreeSet<String>> {
        entries
            .iter()
            .map(|(id, classes)| {
                (
                    id.to_string(),
                    classes.split_whitespace().map(String::from).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_greedy_picks_largest_first() {
        let input = sessions(&[("A", "t1 t2"), ("B", "t2 t3"), ("C", "t1 t2 t3")]);
        let selection = select_minimal_cover(&input);
        assert_eq!(selection.selected, vec!["C"]);
        assert!(selection.is_complete());
    }

    #[test]
    fn test_tie_goes_to_lowest_id() {
        let input = sessions(&[("b", "x"), ("a", "x"), ("c", "y")]);
        let selection = select_minimal_cover(&input);
        assert_eq!(selection.selected, vec!["a", "c"]);
    }

    #[test]
    fn test_no_redundant_sessions() {
        let input = sessions(&[("a", "x y"), ("b", "y"), ("c", "z")]);
        let selection = select_minimal_cover(&input);
        assert_eq!(selection.selected, vec!["a", "c"]);
    }

    #[test]
    fn test_empty_input() {
        let selection = select_minimal_cover(&BTreeMap::new());
        assert!(selection.selected.is_empty());
        assert!(selection.is_complete());
    }

    #[test]
    fn test_unsealed_index_is_refused() {
        let mut index = SessionClassIndex::new();
        index
            .insert("a", ["x".to_string()].into_iter().collect())
            .unwrap();
        let result = CoverSelector::new().select(&index);
        assert!(matches!(result, Err(CoverError::StructurePassIncomplete)));
    }

    #[test]
    fn test_builder_orders_thresholds() {
        let config = CoverConfig::builder().frequency_thresholds(8, 3).build();
        assert_eq!(config.common_threshold, 8);
        assert_eq!(config.very_common_threshold, 8);
    }
}
