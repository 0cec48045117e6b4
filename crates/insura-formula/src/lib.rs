//! # Insura Formula
//!
//! Stop, leverage, claim and hedge sizing for leveraged hedge-insurance
//! contracts.
//!
//! ## Claim Formula
//!
//! ```text
//! p_stop   = p_open ∓ p_open × (ratio_profit + step)
//! leverage = floor(p_open / |p_open − p_stop|)
//! risk     = day_change_token / (|p_stop − p_open| / p_open)
//! capital  = margin × rc / risk            if risk > rc
//!          = margin × (1 + rc − risk)      otherwise
//! profit   = ratio_profit × (margin + capital) × leverage
//! q_claim  = profit × (1 − diff_claim) × (1 − x) + margin
//! ```
//!
//! Where:
//! - rc: configured risk threshold
//! - x: discount from the claim-ratio table row nearest the hedge ratio
//!
//! Every operation is a pure function of its arguments and the immutable
//! [`FormulaConfig`]; an [`InsuranceFormula`] can be shared across threads.

pub mod claim;
pub mod config;
pub mod expiry;
pub mod period;
pub mod quote;
pub mod risk;
pub mod stop;

pub use config::FormulaConfig;
pub use insura_common::{
    ClaimPriceBounds, ClaimRatioRow, ClaimRequest, FormulaError, FormulaResult, InsuraError,
    InsuranceQuote, PeriodUnit, QuoteRequest, Result, Side,
};

use tracing::info;

/// Formula engine over an immutable configuration snapshot
#[derive(Debug, Clone)]
pub struct InsuranceFormula {
    config: FormulaConfig,
}

impl InsuranceFormula {
    /// Create an engine, validating the configuration first
    pub fn new(config: FormulaConfig) -> Result<Self> {
        config.validate()?;
        info!(
            risk_config = %config.risk_config,
            refund_ratio = %config.refund_ratio,
            diff_claim = %config.diff_claim,
            max_period = config.max_period,
            "Insurance formula engine initialized"
        );
        Ok(Self { config })
    }

    /// Create an engine from `.env` and `INSURA_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(FormulaConfig::load()?)
    }

    pub fn config(&self) -> &FormulaConfig {
        &self.config
    }
}

impl Default for InsuranceFormula {
    fn default() -> Self {
        Self {
            config: FormulaConfig::default(),
        }
    }
}
