//! Comparison: selection cap, client union and per-scenario averages.

use chrono::NaiveDate;
use riskdesk_core::{
    client::ClientProfile,
    clock::FixedClock,
    comparison::{ComparisonAggregator, SelectionSet, DEFAULT_COMPARISON_CAPACITY},
    directory::ClientDirectory,
    error::EngineError,
    risk_model::RiskModel,
    runner::ScenarioRunner,
    shock::ShockParameters,
    store::ScenarioStore,
};

fn reference_store() -> ScenarioStore {
    let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"));
    ScenarioStore::with_reference_scenarios(Box::new(clock))
}

fn selection(ids: &[u64]) -> SelectionSet {
    let mut set = SelectionSet::new();
    for &id in ids {
        set.add(id).expect("room in selection");
    }
    set
}

#[test]
fn selection_is_capped_at_three() {
    let mut set = SelectionSet::new();
    assert_eq!(set.capacity(), DEFAULT_COMPARISON_CAPACITY);

    for id in [1, 2, 3] {
        assert!(set.add(id).unwrap());
    }
    assert!(set.is_full());

    let err = set.add(4).unwrap_err();
    assert!(matches!(err, EngineError::CapacityExceeded { capacity: 3 }), "Unexpected error: {err}");
    assert_eq!(set.ids(), &[1, 2, 3], "A rejected add must leave the set unchanged");
}

#[test]
fn adding_a_selected_id_is_a_no_op() {
    let mut set = selection(&[1, 2, 3]);
    assert!(!set.add(2).unwrap(), "duplicate add reports false even when full");
    assert_eq!(set.len(), 3);
}

#[test]
fn toggle_deselects_then_reselects() {
    let mut set = selection(&[1, 2, 3]);

    assert!(!set.toggle(2).unwrap());
    assert_eq!(set.ids(), &[1, 3]);

    assert!(set.toggle(4).unwrap());
    assert_eq!(set.ids(), &[1, 3, 4]);

    assert!(set.toggle(2).is_err(), "full set rejects a new id");
    set.clear();
    assert!(set.is_empty());
}

#[test]
fn reference_scenarios_compare_side_by_side() {
    let store = reference_store();
    let directory = ClientDirectory::reference();
    let comparison = ComparisonAggregator::compare(&selection(&[1, 2]), &store, &directory).unwrap();

    assert_eq!(comparison.columns.len(), 2);
    assert_eq!(comparison.columns[0].name, "Hausse des taux d'intérêt");
    assert_eq!(comparison.rows.len(), 3);

    let ids: Vec<u64> = comparison.rows.iter().map(|r| r.client_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let banque = comparison.row(1).unwrap();
    assert_eq!(banque.client_name, "Banque Nationale");
    assert_eq!(banque.risk_before, 0.35);
    assert_eq!(comparison.cell(1, 1), Some(0.42));
    assert_eq!(comparison.cell(1, 2), Some(0.52));
    assert_eq!(comparison.cell(3, 2), Some(0.45));

    assert!((comparison.average_impact[&1u64] - 17.4).abs() < 1e-9);
    assert!((comparison.average_impact[&2u64] - 51.5).abs() < 1e-9);
}

#[test]
fn columns_follow_store_order_not_selection_order() {
    let store = reference_store();
    let directory = ClientDirectory::reference();
    let comparison = ComparisonAggregator::compare(&selection(&[2, 1]), &store, &directory).unwrap();

    let columns: Vec<u64> = comparison.columns.iter().map(|c| c.scenario_id).collect();
    assert_eq!(columns, vec![1, 2]);
}

#[test]
fn rows_are_the_union_of_clients_in_first_seen_order() {
    let mut store = reference_store();
    let directory = ClientDirectory::reference();
    let runner = ScenarioRunner::new(RiskModel::default());
    let shocks = ShockParameters::new(0.5, 0.0, 0.0, 0.3, 1.0);

    let results = runner.run(directory.select(&[3, 5, 6]), &shocks).unwrap();
    let id = store.save("Choc léger", "", shocks, results).unwrap().id;

    let comparison = ComparisonAggregator::compare(&selection(&[1, id]), &store, &directory).unwrap();
    let ids: Vec<u64> = comparison.rows.iter().map(|r| r.client_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 5, 6]);

    assert_eq!(comparison.cell(1, id), None, "client 1 is not in the new scenario");
    assert!(comparison.cell(5, 1).is_none());
    assert!(comparison.cell(3, 1).is_some() && comparison.cell(3, id).is_some());
    assert_eq!(comparison.row(5).unwrap().risk_after.len(), 2);
}

#[test]
fn client_missing_from_directory_uses_recorded_result() {
    let store = reference_store();
    let directory = ClientDirectory::from_profiles(vec![
        ClientProfile::new(1, "Banque Nationale", 5_000_000.0, 7_500_000.0, 0.36),
    ])
    .unwrap();
    let comparison = ComparisonAggregator::compare(&selection(&[1]), &store, &directory).unwrap();

    assert_eq!(comparison.row(1).unwrap().risk_before, 0.36, "directory baseline wins");
    let bnp = comparison.row(3).unwrap();
    assert_eq!(bnp.client_name, "BNP Paribas");
    assert_eq!(bnp.risk_before, 0.28);
}

#[test]
fn unknown_selected_scenario_is_not_found() {
    let store = reference_store();
    let directory = ClientDirectory::reference();
    let err = ComparisonAggregator::compare(&selection(&[1, 42]), &store, &directory).unwrap_err();
    assert!(matches!(err, EngineError::ScenarioNotFound { id: 42 }), "Unexpected error: {err}");
}

#[test]
fn empty_selection_gives_empty_comparison() {
    let comparison =
        ComparisonAggregator::compare(&SelectionSet::new(), &reference_store(), &ClientDirectory::reference())
            .unwrap();
    assert!(comparison.is_empty());
    assert!(comparison.rows.is_empty());
    assert!(comparison.average_impact.is_empty());
}

#[test]
fn average_impact_skips_non_computable_results() {
    let mut store = reference_store();
    let directory = ClientDirectory::from_profiles(vec![
        ClientProfile::new(1, "Banque Nationale", 5_000_000.0, 7_500_000.0, 0.35),
        ClientProfile::new(9, "Caisse Neuve", 100_000.0, 250_000.0, 0.0),
    ])
    .unwrap();
    let shocks = ShockParameters::new(2.0, 0.0, 0.0, 0.5, 1.2);
    let results = ScenarioRunner::new(RiskModel::default())
        .run(directory.iter(), &shocks)
        .unwrap();
    let id = store.save("Zéro", "", shocks, results).unwrap().id;

    let comparison = ComparisonAggregator::compare(&selection(&[id]), &store, &directory).unwrap();
    assert_eq!(comparison.average_impact[&id], 20.0);
}

#[test]
fn comparison_output_is_deterministic() {
    let store = reference_store();
    let directory = ClientDirectory::reference();
    let set = selection(&[2, 1]);

    let a = serde_json::to_string(&ComparisonAggregator::compare(&set, &store, &directory).unwrap()).unwrap();
    let b = serde_json::to_string(&ComparisonAggregator::compare(&set, &store, &directory).unwrap()).unwrap();
    assert_eq!(a, b);
    assert!(a.contains("\"averageImpact\""));
}
