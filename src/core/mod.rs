mod sample;
mod types;

pub use sample::{BUILTIN_SCENARIOS, sample_payload};
pub use types::{
    CashflowRow, PayloadError, PortfolioRow, ResultsPayload, ScenarioId, YearLabel,
};
