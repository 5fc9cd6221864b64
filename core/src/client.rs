//! Canonical client profile read by the engine.
//!
//! External collaborators (mock data, REST backend) normalise their
//! records into this shape at the integration edge. The serialized
//! field names follow the inbound REST contract.

use crate::{
    config::RiskLevelThresholds,
    error::{EngineError, EngineResult},
    risk_model::RiskLevel,
    types::{ClientId, RiskScore},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub id:             ClientId,
    pub name:           String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub institution_type: Option<String>,
    pub loan_amount:    f64,
    pub deposit_amount: f64,
    #[serde(rename = "calculatedRisk")]
    pub baseline_risk:  RiskScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated:   Option<NaiveDate>,
}

impl ClientProfile {
    pub fn new(
        id: ClientId,
        name: impl Into<String>,
        loan_amount: f64,
        deposit_amount: f64,
        baseline_risk: RiskScore,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            institution_type: None,
            loan_amount,
            deposit_amount,
            baseline_risk,
            last_updated: None,
        }
    }

    pub fn with_type(mut self, institution_type: impl Into<String>) -> Self {
        self.institution_type = Some(institution_type.into());
        self
    }

    pub fn with_last_updated(mut self, date: NaiveDate) -> Self {
        self.last_updated = Some(date);
        self
    }

    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |reason: String| EngineError::InvalidClient { id: self.id, reason };

        if self.name.trim().is_empty() {
            return Err(invalid("name is empty".into()));
        }
        if !self.loan_amount.is_finite() || self.loan_amount < 0.0 {
            return Err(invalid(format!("loan amount {} must be >= 0", self.loan_amount)));
        }
        if !self.deposit_amount.is_finite() || self.deposit_amount < 0.0 {
            return Err(invalid(format!("deposit amount {} must be >= 0", self.deposit_amount)));
        }
        if !(0.0..=1.0).contains(&self.baseline_risk) {
            return Err(invalid(format!("baseline risk {} outside [0, 1]", self.baseline_risk)));
        }
        Ok(())
    }

    pub fn risk_level(&self, thresholds: &RiskLevelThresholds) -> RiskLevel {
        RiskLevel::classify(self.baseline_risk, thresholds)
    }
}
