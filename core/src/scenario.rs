//! Per-client outcomes and saved scenario records.
//!
//! The serialized shape of `Scenario` is the persistence contract:
//! id, name, description, the five shock fields inline, the result
//! list and an ISO calendar date.

use crate::{
    shock::ShockParameters,
    types::{ClientId, RiskScore, ScenarioId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactStatus {
    Improved,
    Worsened,
    Unchanged,
}

impl ImpactStatus {
    /// Worsened if risk went up, improved if it went down.
    pub fn from_change(before: RiskScore, after: RiskScore) -> Self {
        if after > before {
            Self::Worsened
        } else if after < before {
            Self::Improved
        } else {
            Self::Unchanged
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improved  => "improved",
            Self::Worsened  => "worsened",
            Self::Unchanged => "unchanged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub client_id:   ClientId,
    pub client_name: String,
    pub risk_before: RiskScore,
    pub risk_after:  RiskScore,
    /// Percentage change relative to `risk_before`, one decimal.
    /// Zero when `non_computable` is set.
    pub impact:      f64,
    /// Baseline was zero, so the relative impact has no value.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub non_computable: bool,
    pub status:      ImpactStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id:          ScenarioId,
    pub name:        String,
    pub description: String,
    #[serde(flatten)]
    pub shocks:      ShockParameters,
    pub results:     Vec<ScenarioResult>,
    pub timestamp:   NaiveDate,
}

impl Scenario {
    pub fn result_for(&self, client_id: ClientId) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.client_id == client_id)
    }

    /// Mean impact over computable results; 0 when there are none.
    pub fn average_impact(&self) -> f64 {
        average_impact(&self.results)
    }
}

/// Mean `impact` of every result whose impact is computable.
pub fn average_impact(results: &[ScenarioResult]) -> f64 {
    let (sum, count) = results
        .iter()
        .filter(|r| !r.non_computable)
        .fold((0.0, 0usize), |(sum, n), r| (sum + r.impact, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
