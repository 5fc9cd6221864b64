//! Macro-economic shock parameters applied in one simulation run.

use crate::{
    config::{RangePolicy, ShockBounds},
    error::{EngineError, EngineResult},
};
use serde::{Deserialize, Serialize};

/// One set of perturbations. Percentages are expressed in percent
/// (2.0 means +2%), volatility is unitless. Omitted fields are zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShockParameters {
    pub interest_rate_change:  f64,
    pub loan_amount_change:    f64,
    pub deposit_amount_change: f64,
    pub market_volatility:     f64,
    pub economic_growth:       f64,
}

impl ShockParameters {
    pub fn new(
        interest_rate_change: f64,
        loan_amount_change: f64,
        deposit_amount_change: f64,
        market_volatility: f64,
        economic_growth: f64,
    ) -> Self {
        Self {
            interest_rate_change,
            loan_amount_change,
            deposit_amount_change,
            market_volatility,
            economic_growth,
        }
    }

    /// Starting position of the dashboard sliders.
    pub fn dashboard_preset() -> Self {
        Self {
            market_volatility: 0.5,
            economic_growth:   1.5,
            ..Self::default()
        }
    }

    pub fn get(&self, field: ShockField) -> f64 {
        match field {
            ShockField::InterestRateChange  => self.interest_rate_change,
            ShockField::LoanAmountChange    => self.loan_amount_change,
            ShockField::DepositAmountChange => self.deposit_amount_change,
            ShockField::MarketVolatility    => self.market_volatility,
            ShockField::EconomicGrowth      => self.economic_growth,
        }
    }

    /// Reject NaN and infinities. Always enforced, regardless of policy.
    pub fn ensure_finite(&self) -> EngineResult<()> {
        for field in ShockField::ALL {
            if !self.get(field).is_finite() {
                return Err(EngineError::NonFiniteShock { field: field.name() });
            }
        }
        Ok(())
    }

    /// Check every field against `bounds`.
    ///
    /// Under `RangePolicy::Enforce` the first breach is an error. Under
    /// `RangePolicy::Advisory` the breached fields are returned so the
    /// caller can surface them, and the shocks remain usable.
    pub fn check(&self, bounds: &ShockBounds, policy: RangePolicy) -> EngineResult<Vec<ShockField>> {
        self.ensure_finite()?;

        let mut breaches = Vec::new();
        for field in ShockField::ALL {
            let value = self.get(field);
            let bound = bounds.for_field(field);
            if bound.contains(value) {
                continue;
            }
            match policy {
                RangePolicy::Enforce => {
                    return Err(EngineError::ShockOutOfRange {
                        field: field.name(),
                        value,
                        min: bound.min,
                        max: bound.max,
                    });
                }
                RangePolicy::Advisory => breaches.push(field),
            }
        }
        Ok(breaches)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShockField {
    InterestRateChange,
    LoanAmountChange,
    DepositAmountChange,
    MarketVolatility,
    EconomicGrowth,
}

impl ShockField {
    pub const ALL: [ShockField; 5] = [
        ShockField::InterestRateChange,
        ShockField::LoanAmountChange,
        ShockField::DepositAmountChange,
        ShockField::MarketVolatility,
        ShockField::EconomicGrowth,
    ];

    /// Wire name, identical to the serialized field name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InterestRateChange  => "interestRateChange",
            Self::LoanAmountChange    => "loanAmountChange",
            Self::DepositAmountChange => "depositAmountChange",
            Self::MarketVolatility    => "marketVolatility",
            Self::EconomicGrowth      => "economicGrowth",
        }
    }
}
