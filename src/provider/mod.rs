//! Results data provider.
//!
//! An observable state holder over one scenario's results. Consumers either
//! poll [`ResultsProvider::snapshot`] or `subscribe()` to a watch channel;
//! nothing here depends on a UI reactivity runtime. Retrieval is injected
//! through [`ResultsSource`], so the builtin sample data and a real HTTP
//! backend are interchangeable.

mod source;

pub use source::{HttpSource, ResultsSource, SampleSource, SourceError, UnconfiguredSource};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

use crate::core::{CashflowRow, PortfolioRow, ResultsPayload, ScenarioId, YearLabel};

const FALLBACK_ERROR_MESSAGE: &str = "failed to fetch results data";

/// Snapshot of the provider: `loading` is true only while a fetch is in
/// flight, and after a completed fetch at most one of `error`/`results` was
/// written by it. `results` stays `None` until the first success and survives
/// later failures untouched.
#[derive(Clone, Debug, Default)]
pub struct ProviderState {
    pub loading: bool,
    pub error: Option<String>,
    pub results: Option<Arc<ResultsPayload>>,
}

impl ProviderState {
    pub fn projection_years(&self) -> &[YearLabel] {
        self.results
            .as_ref()
            .map_or(&[], |r| r.projection_years.as_slice())
    }

    pub fn projection_p10(&self) -> &[f64] {
        self.results
            .as_ref()
            .map_or(&[], |r| r.projection_p10.as_slice())
    }

    pub fn projection_p50(&self) -> &[f64] {
        self.results
            .as_ref()
            .map_or(&[], |r| r.projection_p50.as_slice())
    }

    pub fn projection_p90(&self) -> &[f64] {
        self.results
            .as_ref()
            .map_or(&[], |r| r.projection_p90.as_slice())
    }

    pub fn portfolio_rows(&self) -> &[PortfolioRow] {
        self.results
            .as_ref()
            .map_or(&[], |r| r.portfolio_rows.as_slice())
    }

    pub fn cashflow_rows(&self) -> &[CashflowRow] {
        self.results
            .as_ref()
            .map_or(&[], |r| r.cashflow_rows.as_slice())
    }
}

pub struct ResultsProvider {
    source: Arc<dyn ResultsSource>,
    scenario: Option<ScenarioId>,
    state: watch::Sender<ProviderState>,
    activated: AtomicBool,
    in_flight: AtomicBool,
}

impl ResultsProvider {
    pub fn new(source: Arc<dyn ResultsSource>, scenario: Option<ScenarioId>) -> Self {
        Self {
            source,
            scenario,
            state: watch::Sender::new(ProviderState::default()),
            activated: AtomicBool::new(false),
            in_flight: AtomicBool::new(false),
        }
    }

    /// The scenario id supplied at construction, if any.
    pub fn scenario(&self) -> Option<&ScenarioId> {
        self.scenario.as_ref()
    }

    /// Current state, cloned out of the watch channel.
    pub fn snapshot(&self) -> ProviderState {
        self.state.borrow().clone()
    }

    /// Receiver for push-style consumption. Every state transition of
    /// `fetch_results` is published to it.
    pub fn subscribe(&self) -> watch::Receiver<ProviderState> {
        self.state.subscribe()
    }

    /// Explicit initialization step, called by the owning view once it is
    /// live. The first activation fetches the construction-time scenario if
    /// one was supplied and non-empty; later activations do nothing, and a
    /// provider built without a scenario never fetches on its own.
    pub async fn activate(&self) {
        if self.activated.swap(true, Ordering::SeqCst) {
            return;
        }
        let Some(id) = self.scenario.clone() else {
            return;
        };
        if id.is_empty() {
            return;
        }
        self.fetch_results(&id).await;
    }

    /// Loads results for `id` into the provider state.
    ///
    /// In order: `loading` is set and `error` cleared, the source is awaited,
    /// then either the payload replaces `results` (success) or a message
    /// lands in `error` with the previous `results` untouched (failure), and
    /// `loading` is cleared unconditionally. Failures never propagate to the
    /// caller. While a fetch is in flight, overlapping calls are ignored
    /// rather than racing on completion order.
    pub async fn fetch_results(&self, id: &ScenarioId) {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!(scenario = %id, "fetch already in flight, ignoring call");
            return;
        }

        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let outcome = self.source.fetch_results(id).await;
        if let Err(err) = &outcome {
            tracing::warn!(scenario = %id, error = %err, "results fetch failed");
        }

        self.state.send_modify(|state| {
            match outcome {
                Ok(payload) => {
                    state.results = Some(Arc::new(payload));
                    state.error = None;
                }
                Err(err) => {
                    let message = err.to_string();
                    state.error = Some(if message.trim().is_empty() {
                        FALLBACK_ERROR_MESSAGE.to_string()
                    } else {
                        message
                    });
                }
            }
            state.loading = false;
        });

        self.in_flight.store(false, Ordering::SeqCst);
    }
}
