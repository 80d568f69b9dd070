//! Per-process watch context and the single extraction-to-publish cycle.
//!
//! [`WatchContext`] owns every collaborator a cycle needs. It is built once
//! at startup and shared by the poll loop behind an `Arc`; the decider is the
//! only mutable part and sits behind an async mutex held from decision
//! through publish result.
//!
//! Cycles may overlap, so each one is numbered when it starts. A cycle whose
//! extraction finishes after a later-started cycle was already decided is
//! dropped, and observations are stamped only once the lock is held. Decisions
//! therefore see prices in start order with non-decreasing timestamps.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{
    format_display, DeciderState, Decision, DecisionPolicy, FormattedMessage, MarketCap,
    MessageTemplate, Observation, Price, UpdateDecider,
};
use crate::error::{ExtractionError, PublishError};
use crate::port::{Destination, Publisher};

use super::extractor::PriceExtractor;

/// Fixed behavior of the cycle.
#[derive(Debug, Clone)]
pub struct WatchSettings {
    pub policy: DecisionPolicy,
    pub template: MessageTemplate,
    pub total_supply: u64,
    /// Undo publish bookkeeping when the send fails, so the same change is
    /// offered again on the next tick.
    pub rollback_on_publish_failure: bool,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            policy: DecisionPolicy::default(),
            template: MessageTemplate::default(),
            total_supply: 1_000_000_000,
            rollback_on_publish_failure: true,
        }
    }
}

/// What one cycle did.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// No price this cycle.
    NotFound(ExtractionError),
    /// Price read but nothing worth sending.
    Suppressed { price: Price },
    /// Price read, but a cycle that started later was decided first.
    Superseded { price: Price },
    /// Message delivered.
    Published {
        price: Price,
        decision: Decision,
        message: FormattedMessage,
    },
    /// Message composed but delivery failed.
    PublishFailed { price: Price, error: PublishError },
}

impl CycleOutcome {
    #[must_use]
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Decider plus the number of the last cycle it decided.
struct Decisions {
    decider: UpdateDecider,
    last_cycle: Option<u64>,
}

/// Collaborators and state for the price watch.
pub struct WatchContext {
    extractor: PriceExtractor,
    publisher: Arc<dyn Publisher>,
    destination: Destination,
    decisions: Mutex<Decisions>,
    next_cycle: AtomicU64,
    settings: WatchSettings,
}

impl WatchContext {
    #[must_use]
    pub fn new(
        extractor: PriceExtractor,
        publisher: Arc<dyn Publisher>,
        destination: Destination,
        settings: WatchSettings,
    ) -> Self {
        Self {
            extractor,
            publisher,
            destination,
            decisions: Mutex::new(Decisions {
                decider: UpdateDecider::new(settings.policy),
                last_cycle: None,
            }),
            next_cycle: AtomicU64::new(0),
            settings,
        }
    }

    #[must_use]
    pub fn extractor(&self) -> &PriceExtractor {
        &self.extractor
    }

    #[must_use]
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Snapshot of the decider state.
    pub async fn decider_state(&self) -> DeciderState {
        *self.decisions.lock().await.decider.state()
    }

    /// Run one cycle, stamping the observation when its decision is made.
    pub async fn run_cycle(&self) -> CycleOutcome {
        self.run_cycle_with(Utc::now).await
    }

    /// Run one cycle, stamping the observation with `now`.
    pub async fn run_cycle_at(&self, now: DateTime<Utc>) -> CycleOutcome {
        self.run_cycle_with(move || now).await
    }

    async fn run_cycle_with<C>(&self, clock: C) -> CycleOutcome
    where
        C: FnOnce() -> DateTime<Utc>,
    {
        let cycle = self.next_cycle.fetch_add(1, Ordering::Relaxed);

        let price = match self.extractor.extract().await {
            Ok(price) => price,
            Err(e) => {
                debug!(error = %e, "No price this cycle");
                return CycleOutcome::NotFound(e);
            }
        };

        let mut decisions = self.decisions.lock().await;
        if decisions.last_cycle.is_some_and(|last| last > cycle) {
            debug!(%price, cycle, "Newer cycle already decided, dropping price");
            return CycleOutcome::Superseded { price };
        }

        let observation = match Observation::try_new(price, clock()) {
            Ok(observation) => observation,
            Err(e) => {
                warn!(error = %e, "Discarding extracted price");
                return CycleOutcome::NotFound(e.into());
            }
        };

        decisions.last_cycle = Some(cycle);
        let decider = &mut decisions.decider;
        let before = *decider.state();
        let decision = decider.observe(&observation);

        if !decision.should_publish {
            debug!(%price, "Price unchanged, update suppressed");
            return CycleOutcome::Suppressed { price };
        }

        let message = self.compose(price, &decision);

        match self.publisher.send(&self.destination, &message.text).await {
            Ok(()) => {
                info!(
                    %price,
                    indicator = ?decision.price_indicator,
                    destination = %self.destination,
                    publisher = self.publisher.name(),
                    "Price update published"
                );
                CycleOutcome::Published {
                    price,
                    decision,
                    message,
                }
            }
            Err(error) => {
                warn!(
                    %price,
                    error = %error,
                    publisher = self.publisher.name(),
                    rollback = self.settings.rollback_on_publish_failure,
                    "Failed to publish price update"
                );
                if self.settings.rollback_on_publish_failure {
                    decider.revert_publish(&before);
                }
                CycleOutcome::PublishFailed { price, error }
            }
        }
    }

    fn compose(&self, price: Price, decision: &Decision) -> FormattedMessage {
        let market_cap = MarketCap::compute(price, self.settings.total_supply);
        let display = format_display(price, self.settings.policy.decimal_places);
        self.settings
            .template
            .compose(&display, &market_cap.formatted, decision)
    }
}
