//! Side-by-side comparison of saved scenarios.
//!
//! Rows are the union of clients across the selected scenarios, in
//! first-seen order. Columns are the selected scenarios, in store
//! order. Same selection + same store = identical output.

use crate::{
    directory::ClientDirectory,
    error::{EngineError, EngineResult},
    store::ScenarioStore,
    types::{ClientId, RiskScore, ScenarioId},
};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_COMPARISON_CAPACITY: usize = 3;

/// Scenario ids picked for comparison, capped at `capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    ids:      Vec<ScenarioId>,
    capacity: usize,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_COMPARISON_CAPACITY)
    }
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { ids: Vec::with_capacity(capacity), capacity }
    }

    /// Add `id`. Returns false if it was already selected.
    /// A full set is left unchanged and `CapacityExceeded` returned.
    pub fn add(&mut self, id: ScenarioId) -> EngineResult<bool> {
        if self.contains(id) {
            return Ok(false);
        }
        if self.is_full() {
            return Err(EngineError::CapacityExceeded { capacity: self.capacity });
        }
        self.ids.push(id);
        Ok(true)
    }

    pub fn remove(&mut self, id: ScenarioId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&s| s != id);
        self.ids.len() != before
    }

    /// Deselect if selected, otherwise add. Returns whether `id` is
    /// selected afterwards.
    pub fn toggle(&mut self, id: ScenarioId) -> EngineResult<bool> {
        if self.remove(id) {
            return Ok(false);
        }
        self.add(id)?;
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: ScenarioId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ScenarioId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonColumn {
    pub scenario_id: ScenarioId,
    pub name:        String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub client_id:   ClientId,
    pub client_name: String,
    pub risk_before: RiskScore,
    /// Post-shock risk per column; `None` when the client was not in
    /// that scenario's run.
    pub risk_after:  Vec<Option<RiskScore>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub columns:        Vec<ComparisonColumn>,
    pub rows:           Vec<ComparisonRow>,
    pub average_impact: BTreeMap<ScenarioId, f64>,
}

impl Comparison {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn row(&self, client_id: ClientId) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.client_id == client_id)
    }

    pub fn column_index(&self, scenario_id: ScenarioId) -> Option<usize> {
        self.columns.iter().position(|c| c.scenario_id == scenario_id)
    }

    /// Post-shock risk of `client_id` under `scenario_id`, if present.
    pub fn cell(&self, client_id: ClientId, scenario_id: ScenarioId) -> Option<RiskScore> {
        let col = self.column_index(scenario_id)?;
        self.row(client_id)?.risk_after.get(col).copied().flatten()
    }
}

pub struct ComparisonAggregator;

impl ComparisonAggregator {
    /// Merge the selected scenarios into one table.
    ///
    /// `risk_before` comes from the directory's current baseline. A client
    /// missing from the directory falls back to the name and baseline
    /// recorded in the first result that mentions it.
    pub fn compare(
        selection: &SelectionSet,
        store: &ScenarioStore,
        directory: &ClientDirectory,
    ) -> EngineResult<Comparison> {
        for &id in selection.ids() {
            store.load(id)?;
        }

        let selected: Vec<_> = store
            .list()
            .iter()
            .filter(|s| selection.contains(s.id))
            .collect();

        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for scenario in &selected {
            for result in &scenario.results {
                if !seen.insert(result.client_id) {
                    continue;
                }
                let (client_name, risk_before) = match directory.get(result.client_id) {
                    Some(client) => (client.name.clone(), client.baseline_risk),
                    None => (result.client_name.clone(), result.risk_before),
                };
                let risk_after = selected
                    .iter()
                    .map(|s| s.result_for(result.client_id).map(|r| r.risk_after))
                    .collect();
                rows.push(ComparisonRow {
                    client_id: result.client_id,
                    client_name,
                    risk_before,
                    risk_after,
                });
            }
        }

        let columns = selected
            .iter()
            .map(|s| ComparisonColumn { scenario_id: s.id, name: s.name.clone() })
            .collect();
        let average_impact = selected
            .iter()
            .map(|s| (s.id, s.average_impact()))
            .collect();

        log::debug!("Compared {} scenarios over {} clients", selected.len(), rows.len());
        Ok(Comparison { columns, rows, average_impact })
    }
}
