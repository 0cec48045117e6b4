//! Formula engine configuration

use insura_common::{
    ClaimRatioRow, ClaimRatioTable, ClaimTables, InsuraError, Result, MAX_DECIMAL_SCALE,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ENV_RISK_CONFIG: &str = "INSURA_RISK_CONFIG";
pub const ENV_REFUND_RATIO: &str = "INSURA_REFUND_RATIO";
pub const ENV_DECIMAL_USDT: &str = "INSURA_DECIMAL_USDT";
pub const ENV_MIN_PERIOD: &str = "INSURA_MIN_PERIOD";
pub const ENV_MAX_PERIOD: &str = "INSURA_MAX_PERIOD";
pub const ENV_DIFF_CLAIM: &str = "INSURA_DIFF_CLAIM";
/// Path to a JSON file holding both claim-ratio tables
pub const ENV_CLAIM_TABLES: &str = "INSURA_CLAIM_TABLES";

/// Immutable formula constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaConfig {
    /// System risk above which capital is capped proportionally
    pub risk_config: Decimal,
    /// Refund price premium/discount ratio
    pub refund_ratio: Decimal,
    /// Decimal places for displayed USDT amounts
    pub decimal_usdt: u32,
    /// Shortest insurable period
    pub min_period: u32,
    /// Longest insurable period; also bounds period-table scans
    pub max_period: u32,
    /// Haircut applied to claim profit
    pub diff_claim: Decimal,
    /// Claim-ratio tables per period unit
    pub claim_tables: ClaimTables,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            risk_config: dec!(0.85),
            refund_ratio: dec!(0.05),
            decimal_usdt: 2,
            min_period: 1,
            max_period: 30,
            diff_claim: dec!(0.2),
            claim_tables: default_claim_tables(),
        }
    }
}

fn default_claim_tables() -> ClaimTables {
    let rows = |rows: &[(Decimal, Decimal)]| -> ClaimRatioTable {
        rows.iter()
            .map(|&(hedge, x)| ClaimRatioRow::new(hedge, x))
            .collect::<Vec<_>>()
            .into()
    };

    ClaimTables {
        hour: rows(&[
            (dec!(0.05), dec!(0)),
            (dec!(0.1), dec!(0.08)),
            (dec!(0.2), dec!(0.15)),
            (dec!(0.3), dec!(0.2)),
            (dec!(0.5), dec!(0.25)),
        ]),
        day: rows(&[
            (dec!(0.05), dec!(0)),
            (dec!(0.1), dec!(0.05)),
            (dec!(0.2), dec!(0.1)),
            (dec!(0.3), dec!(0.15)),
            (dec!(0.5), dec!(0.2)),
        ]),
    }
}

impl FormulaConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from defaults plus any values `lookup` returns.
    ///
    /// A value that is present but does not parse is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(val) = lookup(ENV_RISK_CONFIG) {
            cfg.risk_config = parse_var(ENV_RISK_CONFIG, &val)?;
        }
        if let Some(val) = lookup(ENV_REFUND_RATIO) {
            cfg.refund_ratio = parse_var(ENV_REFUND_RATIO, &val)?;
        }
        if let Some(val) = lookup(ENV_DECIMAL_USDT) {
            cfg.decimal_usdt = parse_var(ENV_DECIMAL_USDT, &val)?;
        }
        if let Some(val) = lookup(ENV_MIN_PERIOD) {
            cfg.min_period = parse_var(ENV_MIN_PERIOD, &val)?;
        }
        if let Some(val) = lookup(ENV_MAX_PERIOD) {
            cfg.max_period = parse_var(ENV_MAX_PERIOD, &val)?;
        }
        if let Some(val) = lookup(ENV_DIFF_CLAIM) {
            cfg.diff_claim = parse_var(ENV_DIFF_CLAIM, &val)?;
        }
        if let Some(path) = lookup(ENV_CLAIM_TABLES) {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                InsuraError::Config(format!("Failed to read claim tables {}: {}", path, e))
            })?;
            cfg.claim_tables = serde_json::from_str(&content).map_err(|e| {
                InsuraError::Config(format!("Failed to parse claim tables {}: {}", path, e))
            })?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a complete configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that every constant is inside its meaningful range
    pub fn validate(&self) -> Result<()> {
        if self.risk_config <= Decimal::ZERO {
            return Err(invalid("risk_config must be positive"));
        }
        if self.refund_ratio < Decimal::ZERO || self.refund_ratio >= Decimal::ONE {
            return Err(invalid("refund_ratio must be in [0, 1)"));
        }
        if self.diff_claim < Decimal::ZERO || self.diff_claim >= Decimal::ONE {
            return Err(invalid("diff_claim must be in [0, 1)"));
        }
        if self.min_period == 0 || self.min_period > self.max_period {
            return Err(invalid(format!(
                "period bounds must satisfy 1 <= min_period <= max_period, got {}..{}",
                self.min_period, self.max_period
            )));
        }
        if self.decimal_usdt > MAX_DECIMAL_SCALE {
            return Err(invalid(format!(
                "decimal_usdt must be at most {}",
                MAX_DECIMAL_SCALE
            )));
        }

        for (name, table) in [("hour", &self.claim_tables.hour), ("day", &self.claim_tables.day)] {
            if table.is_empty() {
                return Err(invalid(format!("{} claim-ratio table is empty", name)));
            }
            for row in table.rows() {
                if row.hedge < Decimal::ZERO || row.x < Decimal::ZERO || row.x > Decimal::ONE {
                    return Err(invalid(format!(
                        "{} claim-ratio row out of range: hedge={}, x={}",
                        name, row.hedge, row.x
                    )));
                }
            }
        }

        Ok(())
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| InsuraError::Config(format!("Invalid value for {}: {:?} ({})", key, raw, e)))
}

fn invalid(msg: impl Into<String>) -> InsuraError {
    InsuraError::Config(msg.into())
}
