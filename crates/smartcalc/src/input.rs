//! Loading calculation conditions from YAML files
//!
//! A credit file holds one `CreditConditions` mapping:
//!
//! ```yaml
//! sum: 1000000
//! rate: 5
//! term: 15
//! term_unit: Year
//! kind: Differentiated
//! ```
//!
//! A deposit file holds one `DepositConditions` mapping; transactions nest a
//! dated payout:
//!
//! ```yaml
//! sum: 1000000
//! rate: 13.4
//! term: 12
//! start_date: 2024-01-15
//! funds:
//!   - payout: { date: 2024-03-10, amount: 5000 }
//!     frequency: Monthly
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use smartcalc_core::{ConditionsError, CreditConditions, DepositConditions};

/// Error types for reading conditions files
#[derive(Debug)]
pub enum InputError {
    Io(String),
    Parse(String),
    Invalid(ConditionsError),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Io(msg) => write!(f, "IO error: {msg}"),
            InputError::Parse(msg) => write!(f, "Parse error: {msg}"),
            InputError::Invalid(err) => write!(f, "Invalid conditions: {err}"),
        }
    }
}

impl std::error::Error for InputError {}

impl From<ConditionsError> for InputError {
    fn from(err: ConditionsError) -> Self {
        InputError::Invalid(err)
    }
}

fn from_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T, InputError> {
    serde_saphyr::from_str(yaml)
        .map_err(|e| InputError::Parse(format!("Failed to parse YAML: {e}")))
}

fn read(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path)
        .map_err(|e| InputError::Io(format!("Failed to read {}: {e}", path.display())))
}

/// Parse and validate credit conditions
pub fn credit_from_yaml(yaml: &str) -> Result<CreditConditions, InputError> {
    let conditions: CreditConditions = from_yaml(yaml)?;
    conditions.validate()?;
    Ok(conditions)
}

/// Parse and validate deposit conditions
pub fn deposit_from_yaml(yaml: &str) -> Result<DepositConditions, InputError> {
    let conditions: DepositConditions = from_yaml(yaml)?;
    conditions.validate()?;
    Ok(conditions)
}

pub fn load_credit(path: &Path) -> Result<CreditConditions, InputError> {
    credit_from_yaml(&read(path)?)
}

pub fn load_deposit(path: &Path) -> Result<DepositConditions, InputError> {
    deposit_from_yaml(&read(path)?)
}
