//! Builtin sample scenarios.
//!
//! Deterministic placeholder data standing in for the projection backend:
//! same scenario id, same payload, every time. Series are generated rather
//! than hand-typed so the fan charts have a plausible shape.

use super::{CashflowRow, PortfolioRow, ResultsPayload, ScenarioId, YearLabel};

pub const BUILTIN_SCENARIOS: [&str; 3] = ["baseline", "optimistic", "defensive"];

const START_YEAR: i64 = 2025;
const HORIZON_YEARS: usize = 30;
const ANNUAL_FEE_RATE: f64 = 0.002;

struct ScenarioShape {
    start_value: f64,
    annual_drift: f64,
    band_spread: f64,
    annual_saving: f64,
    equity_weight: f64,
}

fn shape_for(id: &str) -> Option<ScenarioShape> {
    match id {
        "baseline" => Some(ScenarioShape {
            start_value: 250_000.0,
            annual_drift: 0.05,
            band_spread: 0.35,
            annual_saving: 20_000.0,
            equity_weight: 0.60,
        }),
        "optimistic" => Some(ScenarioShape {
            start_value: 250_000.0,
            annual_drift: 0.07,
            band_spread: 0.45,
            annual_saving: 28_000.0,
            equity_weight: 0.80,
        }),
        "defensive" => Some(ScenarioShape {
            start_value: 250_000.0,
            annual_drift: 0.03,
            band_spread: 0.18,
            annual_saving: 20_000.0,
            equity_weight: 0.35,
        }),
        _ => None,
    }
}

/// Returns the fixed sample payload for a builtin scenario id, or `None` for
/// an unknown scenario.
pub fn sample_payload(id: &ScenarioId) -> Option<ResultsPayload> {
    let shape = shape_for(id.as_str())?;

    let mut projection_years = Vec::with_capacity(HORIZON_YEARS);
    let mut projection_p10 = Vec::with_capacity(HORIZON_YEARS);
    let mut projection_p50 = Vec::with_capacity(HORIZON_YEARS);
    let mut projection_p90 = Vec::with_capacity(HORIZON_YEARS);
    let mut cashflow_rows = Vec::with_capacity(HORIZON_YEARS);

    let mut median = shape.start_value;
    for i in 0..HORIZON_YEARS {
        let year = START_YEAR + i as i64;
        // Uncertainty band widens with the square root of elapsed time.
        let spread = shape.band_spread * ((i + 1) as f64 / HORIZON_YEARS as f64).sqrt();
        let fees = median * ANNUAL_FEE_RATE;

        projection_years.push(YearLabel::Year(year));
        projection_p50.push(median);
        projection_p10.push(median * (1.0 - spread));
        projection_p90.push(median * (1.0 + spread));
        cashflow_rows.push(CashflowRow {
            year,
            inflow: shape.annual_saving,
            outflow: fees,
            net: shape.annual_saving - fees,
        });

        median = (median + shape.annual_saving) * (1.0 + shape.annual_drift);
    }

    let bond_weight = (1.0 - shape.equity_weight) * 0.75;
    let cash_weight = 1.0 - shape.equity_weight - bond_weight;
    let portfolio_rows = vec![
        PortfolioRow {
            asset: "Global equity".to_string(),
            weight: shape.equity_weight,
            value: shape.start_value * shape.equity_weight,
        },
        PortfolioRow {
            asset: "Government bonds".to_string(),
            weight: bond_weight,
            value: shape.start_value * bond_weight,
        },
        PortfolioRow {
            asset: "Cash".to_string(),
            weight: cash_weight,
            value: shape.start_value * cash_weight,
        },
    ];

    Some(ResultsPayload {
        projection_years,
        projection_p10,
        projection_p50,
        projection_p90,
        portfolio_rows,
        cashflow_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_scenario_resolves() {
        for id in BUILTIN_SCENARIOS {
            let payload = sample_payload(&ScenarioId::new(id))
                .unwrap_or_else(|| panic!("builtin scenario {id} must resolve"));
            payload.validate().expect("builtin payload must be aligned");
            assert_eq!(payload.projection_years.len(), HORIZON_YEARS);
            assert_eq!(payload.cashflow_rows.len(), HORIZON_YEARS);
            assert_eq!(payload.portfolio_rows.len(), 3);
        }
    }

    #[test]
    fn unknown_scenario_resolves_to_none() {
        assert!(sample_payload(&ScenarioId::new("retire-at-12")).is_none());
    }

    #[test]
    fn sample_payloads_are_deterministic() {
        let id = ScenarioId::new("baseline");
        assert_eq!(sample_payload(&id), sample_payload(&id));
    }

    #[test]
    fn percentile_bands_straddle_the_median() {
        let payload = sample_payload(&ScenarioId::new("optimistic")).expect("builtin");
        for i in 0..payload.projection_p50.len() {
            assert!(payload.projection_p10[i] < payload.projection_p50[i]);
            assert!(payload.projection_p50[i] < payload.projection_p90[i]);
            assert!(payload.projection_p10[i] > 0.0);
        }
    }

    #[test]
    fn portfolio_weights_sum_to_one() {
        for id in BUILTIN_SCENARIOS {
            let payload = sample_payload(&ScenarioId::new(id)).expect("builtin");
            let total: f64 = payload.portfolio_rows.iter().map(|r| r.weight).sum();
            assert!((total - 1.0).abs() < 1e-9, "weights for {id} sum to {total}");
        }
    }
}
