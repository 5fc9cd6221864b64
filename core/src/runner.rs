//! Scenario runner: one shock set applied across selected clients.
//!
//! The runner is a pure transformation. Identical inputs give
//! identical output, in input order.

use crate::{
    client::ClientProfile,
    config::{EngineConfig, RangePolicy, ShockBounds},
    error::EngineResult,
    risk_model::{round_to, RiskModel},
    scenario::{average_impact, ImpactStatus, ScenarioResult},
    shock::{ShockField, ShockParameters},
    types::RiskScore,
};
use serde::Serialize;

/// Decimal places of a percentage impact.
pub const IMPACT_DECIMALS: i32 = 1;

#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    model:  RiskModel,
    bounds: ShockBounds,
    policy: RangePolicy,
}

impl ScenarioRunner {
    /// Runner with default bounds under the advisory policy.
    pub fn new(model: RiskModel) -> Self {
        Self {
            model,
            bounds: ShockBounds::default(),
            policy: RangePolicy::Advisory,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            model:  config.model,
            bounds: config.shock_bounds,
            policy: config.range_policy,
        }
    }

    pub fn model(&self) -> &RiskModel {
        &self.model
    }

    /// Range check under the configured policy. Returns the advisory
    /// breaches; under `Enforce` a breach is an error instead.
    pub fn check_shocks(&self, shocks: &ShockParameters) -> EngineResult<Vec<ShockField>> {
        let breaches = shocks.check(&self.bounds, self.policy)?;
        for field in &breaches {
            let bound = self.bounds.for_field(*field);
            log::warn!(
                "{} = {} outside recognised range [{}, {}]",
                field.name(),
                shocks.get(*field),
                bound.min,
                bound.max
            );
        }
        Ok(breaches)
    }

    /// Check `shocks`, then evaluate every client in order.
    /// An empty client list yields an empty result list.
    pub fn run<'a, I>(&self, clients: I, shocks: &ShockParameters) -> EngineResult<Vec<ScenarioResult>>
    where
        I: IntoIterator<Item = &'a ClientProfile>,
    {
        self.check_shocks(shocks)?;
        let results: Vec<ScenarioResult> = clients
            .into_iter()
            .map(|client| self.evaluate(client, shocks))
            .collect();
        log::debug!(
            "{} run over {} clients: {:?}",
            self.model.name(),
            results.len(),
            RunSummary::of(&results)
        );
        Ok(results)
    }

    /// Outcome for a single client. No range checks.
    pub fn evaluate(&self, client: &ClientProfile, shocks: &ShockParameters) -> ScenarioResult {
        let risk_before = client.baseline_risk;
        let risk_after = self.model.simulate(client, shocks);
        let impact = impact_pct(risk_before, risk_after);

        ScenarioResult {
            client_id: client.id,
            client_name: client.name.clone(),
            risk_before,
            risk_after,
            impact: impact.unwrap_or(0.0),
            non_computable: impact.is_none(),
            status: ImpactStatus::from_change(risk_before, risk_after),
        }
    }
}

/// Relative change in percent, one decimal. `None` for a zero baseline.
pub fn impact_pct(before: RiskScore, after: RiskScore) -> Option<f64> {
    if before == 0.0 {
        return None;
    }
    Some(round_to((after - before) / before * 100.0, IMPACT_DECIMALS))
}

/// Counts per status plus the mean computable impact.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RunSummary {
    pub clients:        usize,
    pub worsened:       usize,
    pub improved:       usize,
    pub unchanged:      usize,
    pub non_computable: usize,
    pub average_impact: f64,
}

impl RunSummary {
    pub fn of(results: &[ScenarioResult]) -> Self {
        let mut summary = Self {
            clients: results.len(),
            average_impact: average_impact(results),
            ..Self::default()
        };
        for r in results {
            match r.status {
                ImpactStatus::Worsened  => summary.worsened += 1,
                ImpactStatus::Improved  => summary.improved += 1,
                ImpactStatus::Unchanged => summary.unchanged += 1,
            }
            if r.non_computable {
                summary.non_computable += 1;
            }
        }
        summary
    }
}

/// One bar of the impact chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactPoint {
    pub client_name: String,
    pub impact:      f64,
    pub status:      ImpactStatus,
}

pub fn impact_points(results: &[ScenarioResult]) -> Vec<ImpactPoint> {
    results
        .iter()
        .map(|r| ImpactPoint {
            client_name: r.client_name.clone(),
            impact:      r.impact,
            status:      r.status,
        })
        .collect()
}
