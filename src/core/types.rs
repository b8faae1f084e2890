use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque scenario identifier. The backend owns whatever validation rules
/// apply; here an id is just a label, except that an empty or whitespace-only
/// id suppresses the provider's automatic fetch on activation.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(String);

impl ScenarioId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ScenarioId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for ScenarioId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A year on the projection axis: plain calendar years stay numeric, but the
/// axis also admits free-form labels such as "2054+".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearLabel {
    Year(i64),
    Text(String),
}

impl From<i64> for YearLabel {
    fn from(value: i64) -> Self {
        YearLabel::Year(value)
    }
}

impl From<&str> for YearLabel {
    fn from(value: &str) -> Self {
        YearLabel::Text(value.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRow {
    pub asset: String,
    pub weight: f64,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowRow {
    pub year: i64,
    pub inflow: f64,
    pub outflow: f64,
    pub net: f64,
}

/// Full set of results for one scenario: the three percentile series over the
/// shared year axis plus the two table views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsPayload {
    pub projection_years: Vec<YearLabel>,
    pub projection_p10: Vec<f64>,
    pub projection_p50: Vec<f64>,
    pub projection_p90: Vec<f64>,
    pub portfolio_rows: Vec<PortfolioRow>,
    pub cashflow_rows: Vec<CashflowRow>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("{series} has {len} values but projectionYears has {years}")]
    Misaligned {
        series: &'static str,
        len: usize,
        years: usize,
    },
}

impl ResultsPayload {
    /// Checks that every percentile series lines up index-for-index with the
    /// year axis. A payload that fails this check is unusable for charting.
    pub fn validate(&self) -> Result<(), PayloadError> {
        let years = self.projection_years.len();
        let series_lengths = [
            ("projectionP10", self.projection_p10.len()),
            ("projectionP50", self.projection_p50.len()),
            ("projectionP90", self.projection_p90.len()),
        ];
        for (series, len) in series_lengths {
            if len != years {
                return Err(PayloadError::Misaligned { series, len, years });
            }
        }
        Ok(())
    }
}
