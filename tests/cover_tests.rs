//! Session index and cover selection tests

use std::collections::BTreeSet;

use shape_survey::cover::{
    CoverConfig, CoverError, CoverSelector, SessionClassIndex, select_minimal_cover,
};
use tempfile::TempDir;

fn classes(items: &str) -> BTreeSet<String> {
    items.split_whitespace().map(String::from).collect()
}

fn abc_index() -> SessionClassIndex {
    SessionClassIndex::from_sessions([
        ("A", classes("t1 t2")),
        ("B", classes("t2 t3")),
        ("C", classes("t1 t2 t3")),
    ])
}

mod selection_tests {
    use super::*;

    #[test]
    fn test_single_superset_session_selected() {
        let report = CoverSelector::new().select(&abc_index()).unwrap();

        assert_eq!(report.selected_ids(), vec!["C"]);
        assert_eq!(report.total_sessions_available, 3);
        assert_eq!(report.total_classes, 3);
        assert_eq!(report.covered_classes, 3);
        assert_eq!(report.coverage_percentage, 100.0);
        assert!(report.uncovered_classes.is_empty());

        let step = &report.steps[0];
        assert_eq!(step.rank, 1);
        assert_eq!(step.classes_in_session, 3);
        assert_eq!(step.new_classes_contributed, 3);
        assert_eq!(step.cumulative_coverage, 3);
    }

    #[test]
    fn test_second_round_tie_goes_to_lowest_id() {
        let index = SessionClassIndex::from_sessions([
            ("A", classes("t1 t2")),
            ("B", classes("t2 t3")),
            ("C", classes("t1 t3 t4")),
        ]);

        let selection = select_minimal_cover(index.sessions());
        assert_eq!(selection.selected, vec!["C", "A"]);
        assert!(selection.uncovered.is_empty());

        let report = CoverSelector::new().select(&index).unwrap();
        assert_eq!(report.selected_ids(), vec!["C", "A"]);
        let gains: Vec<usize> = report
            .steps
            .iter()
            .map(|s| s.new_classes_contributed)
            .collect();
        assert_eq!(gains, vec![3, 1]);
        assert_eq!(report.covered_classes, 4);
        assert!(report.uncovered_classes.is_empty());
    }

    #[test]
    fn test_every_class_is_covered() {
        let index = SessionClassIndex::from_sessions([
            ("s1", classes("a b")),
            ("s2", classes("c")),
            ("s3", classes("b d")),
            ("s4", classes("a")),
            ("s5", classes("e a")),
        ]);
        let report = CoverSelector::new().select(&index).unwrap();

        let mut covered = BTreeSet::new();
        for id in report.selected_ids() {
            covered.extend(index.classes_of(id).unwrap().iter().cloned());
        }
        assert_eq!(covered, index.all_classes());
        assert!(report.steps.iter().all(|s| s.new_classes_contributed > 0));
        assert!(!report.selected_ids().contains(&"s4"));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let sessions = abc_index().sessions().clone();
        let first = select_minimal_cover(&sessions);
        let second = select_minimal_cover(&sessions);
        assert_eq!(first, second);
    }

    #[test]
    fn test_max_sessions_limits_candidates() {
        let index = SessionClassIndex::from_sessions([
            ("a", classes("x")),
            ("b", classes("y")),
            ("c", classes("z")),
        ]);
        let config = CoverConfig::builder().max_sessions(2).build();
        let report = CoverSelector::with_config(config).select(&index).unwrap();

        assert_eq!(report.selected_ids(), vec!["a", "b"]);
        assert_eq!(report.total_sessions_available, 2);
        assert_eq!(report.total_classes, 2);
    }

    #[test]
    fn test_empty_index() {
        let report = CoverSelector::new()
            .select(&SessionClassIndex::from_sessions(Vec::<(String, BTreeSet<String>)>::new()))
            .unwrap();
        assert_eq!(report.selected_sessions, 0);
        assert_eq!(report.coverage_percentage, 100.0);
        assert_eq!(report.reduction_ratio, 0.0);
    }

    #[test]
    fn test_class_frequency() {
        let report = CoverSelector::new().select(&abc_index()).unwrap();
        assert_eq!(report.class_frequency.rare_classes_one_session, 0);

        let config = CoverConfig::builder().frequency_thresholds(3, 3).build();
        let report = CoverSelector::with_config(config).select(&abc_index()).unwrap();
        // only t2 is in all three sessions
        assert_eq!(report.class_frequency.common_classes_five_plus, 1);
    }
}

mod precondition_tests {
    use super::*;

    #[test]
    fn test_unsealed_index_refused() {
        let mut index = SessionClassIndex::new();
        index.insert("A", classes("t1")).unwrap();
        assert!(matches!(
            CoverSelector::new().select(&index),
            Err(CoverError::StructurePassIncomplete)
        ));
    }

    #[test]
    fn test_missing_artifact_refused() {
        let dir = TempDir::new().unwrap();
        let result = SessionClassIndex::load(&dir.path().join("session_classes.json"));
        assert!(matches!(result, Err(CoverError::MissingArtifact(_))));
    }

    #[test]
    fn test_sealed_index_rejects_inserts() {
        let mut index = abc_index();
        assert!(matches!(
            index.insert("D", classes("t4")),
            Err(CoverError::IndexSealed(_))
        ));
    }

    #[test]
    fn test_saved_index_selects_identically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.yaml");
        let index = abc_index();
        index.save(&path).unwrap();

        let loaded = SessionClassIndex::load(&path).unwrap();
        assert!(loaded.is_sealed());
        assert_eq!(loaded.sessions(), index.sessions());
        assert_eq!(
            CoverSelector::new().select(&loaded).unwrap().selected_ids(),
            vec!["C"]
        );
    }
}
