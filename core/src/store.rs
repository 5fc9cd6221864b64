//! In-session scenario store.
//!
//! RULE: scenarios are append-only. Nothing mutates a saved scenario;
//! the only removal is `reset()`, which clears the whole collection.
//! Insertion order is display order.

use crate::{
    clock::{SessionClock, SystemClock},
    error::{EngineError, EngineResult},
    fixtures,
    scenario::{Scenario, ScenarioResult},
    shock::ShockParameters,
    types::ScenarioId,
};

pub struct ScenarioStore {
    scenarios: Vec<Scenario>,
    clock:     Box<dyn SessionClock>,
}

impl Default for ScenarioStore {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

impl ScenarioStore {
    pub fn new(clock: Box<dyn SessionClock>) -> Self {
        Self { scenarios: Vec::new(), clock }
    }

    /// Store preloaded with the two reference scenarios (ids 1 and 2).
    pub fn with_reference_scenarios(clock: Box<dyn SessionClock>) -> Self {
        Self { scenarios: fixtures::reference_scenarios(), clock }
    }

    /// Max existing id + 1, or 1 when empty.
    pub fn next_id(&self) -> ScenarioId {
        self.scenarios.iter().map(|s| s.id).max().map_or(1, |max| max + 1)
    }

    pub fn save(
        &mut self,
        name: &str,
        description: &str,
        shocks: ShockParameters,
        results: Vec<ScenarioResult>,
    ) -> EngineResult<&Scenario> {
        if name.trim().is_empty() {
            return Err(EngineError::validation("scenario name is empty"));
        }
        if results.is_empty() {
            return Err(EngineError::validation("no simulation results to save"));
        }

        let scenario = Scenario {
            id: self.next_id(),
            name: name.to_string(),
            description: description.to_string(),
            shocks,
            results,
            timestamp: self.clock.today(),
        };
        log::info!(
            "Saved scenario {} '{}' ({} results)",
            scenario.id,
            scenario.name,
            scenario.results.len()
        );
        self.scenarios.push(scenario);
        Ok(&self.scenarios[self.scenarios.len() - 1])
    }

    pub fn load(&self, id: ScenarioId) -> EngineResult<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or(EngineError::ScenarioNotFound { id })
    }

    pub fn contains(&self, id: ScenarioId) -> bool {
        self.scenarios.iter().any(|s| s.id == id)
    }

    pub fn list(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn reset(&mut self) {
        log::info!("Scenario store reset ({} scenarios dropped)", self.scenarios.len());
        self.scenarios.clear();
    }

    /// Append a previously exported scenario, keeping its id.
    pub fn import(&mut self, scenario: Scenario) -> EngineResult<()> {
        if self.contains(scenario.id) {
            return Err(EngineError::DuplicateScenario { id: scenario.id });
        }
        if scenario.name.trim().is_empty() {
            return Err(EngineError::validation("scenario name is empty"));
        }
        if scenario.results.is_empty() {
            return Err(EngineError::validation(format!("scenario {} has no results", scenario.id)));
        }
        self.scenarios.push(scenario);
        Ok(())
    }

    pub fn export_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(&self.scenarios)?)
    }

    /// Import every scenario of a JSON array. All-or-nothing: on error
    /// the store is left as it was.
    pub fn import_json(&mut self, content: &str) -> EngineResult<usize> {
        let incoming: Vec<Scenario> = serde_json::from_str(content)?;
        let before = self.scenarios.len();
        for scenario in incoming {
            if let Err(e) = self.import(scenario) {
                self.scenarios.truncate(before);
                return Err(e);
            }
        }
        Ok(self.scenarios.len() - before)
    }
}
