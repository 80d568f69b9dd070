//! Debounce, heartbeat and direction indicators.
//!
//! [`DeciderState::decide`] is the pure transition function;
//! [`UpdateDecider`] wraps it with the state it owns for the process
//! lifetime.

use chrono::{DateTime, Duration, Utc};

use super::format::truncate;
use super::observation::{Observation, Price};

/// Direction of the latest move relative to the previous raw observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Up,
    Down,
    None,
}

impl Indicator {
    /// Glyph prefixed to a message line. Empty for [`Indicator::None`].
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Up => "🟩",
            Self::Down => "🟥",
            Self::None => "",
        }
    }

    fn between(previous: Price, current: Price) -> Self {
        match current.cmp(&previous) {
            std::cmp::Ordering::Greater => Self::Up,
            std::cmp::Ordering::Less => Self::Down,
            std::cmp::Ordering::Equal => Self::None,
        }
    }
}

/// Outcome of folding one observation into the decider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub should_publish: bool,
    pub price_indicator: Indicator,
    pub mcap_indicator: Indicator,
}

/// Fixed parameters of the debounce rule.
#[derive(Debug, Clone, Copy)]
pub struct DecisionPolicy {
    /// Fractional digits compared when checking for a price change.
    pub decimal_places: u32,
    /// Publish at least this often even when the price is flat.
    pub heartbeat: Duration,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            decimal_places: 5,
            heartbeat: Duration::seconds(60),
        }
    }
}

/// Everything the decider remembers between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeciderState {
    /// Most recent raw observation, published or not.
    pub last_price: Option<Price>,
    /// Price carried by the last published message.
    pub last_sent_price: Option<Price>,
    pub last_publish_time: Option<DateTime<Utc>>,
    pub is_first_observation: bool,
}

impl Default for DeciderState {
    fn default() -> Self {
        Self {
            last_price: None,
            last_sent_price: None,
            last_publish_time: None,
            is_first_observation: true,
        }
    }
}

impl DeciderState {
    /// Decide whether `observation` should be published and compute the
    /// state that follows it.
    #[must_use]
    pub fn decide(&self, observation: &Observation, policy: &DecisionPolicy) -> (Decision, Self) {
        let price = observation.price();
        let now = observation.timestamp();

        let price_changed = match self.last_sent_price {
            Some(sent) => {
                truncate(price, policy.decimal_places) != truncate(sent, policy.decimal_places)
            }
            None => true,
        };

        let heartbeat_elapsed = match self.last_publish_time {
            Some(at) => now.signed_duration_since(at) >= policy.heartbeat,
            None => true,
        };

        let should_publish = price_changed || heartbeat_elapsed || self.is_first_observation;

        let price_indicator = match self.last_price {
            Some(previous) if !self.is_first_observation => Indicator::between(previous, price),
            _ => Indicator::Up,
        };

        let mut next = Self {
            last_price: Some(price),
            ..*self
        };
        if should_publish {
            next.last_sent_price = Some(price);
            next.last_publish_time = Some(now);
            next.is_first_observation = false;
        }

        let decision = Decision {
            should_publish,
            price_indicator,
            mcap_indicator: price_indicator,
        };
        (decision, next)
    }
}

/// Owns [`DeciderState`] and applies [`DecisionPolicy`] to each observation.
#[derive(Debug, Clone)]
pub struct UpdateDecider {
    policy: DecisionPolicy,
    state: DeciderState,
}

impl UpdateDecider {
    #[must_use]
    pub fn new(policy: DecisionPolicy) -> Self {
        Self {
            policy,
            state: DeciderState::default(),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    #[must_use]
    pub const fn state(&self) -> &DeciderState {
        &self.state
    }

    /// Fold `observation` into the state and return the decision.
    pub fn observe(&mut self, observation: &Observation) -> Decision {
        let (decision, next) = self.state.decide(observation, &self.policy);
        self.state = next;
        decision
    }

    /// Undo the publish bookkeeping of the last `observe` after a failed send.
    ///
    /// `before` is the state captured just before that call. The raw
    /// `last_price` is kept so indicators still track the latest reading.
    pub fn revert_publish(&mut self, before: &DeciderState) {
        self.state.last_sent_price = before.last_sent_price;
        self.state.last_publish_time = before.last_publish_time;
        self.state.is_first_observation = before.is_first_observation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn obs(price: Price, secs: i64) -> Observation {
        Observation::try_new(price, t0() + Duration::seconds(secs)).unwrap()
    }

    fn far_heartbeat() -> DecisionPolicy {
        DecisionPolicy {
            decimal_places: 5,
            heartbeat: Duration::days(365),
        }
    }

    #[test]
    fn first_observation_publishes_with_up_indicators() {
        let mut decider = UpdateDecider::new(far_heartbeat());
        let decision = decider.observe(&obs(dec!(0.5), 0));

        assert!(decision.should_publish);
        assert_eq!(decision.price_indicator, Indicator::Up);
        assert_eq!(decision.mcap_indicator, Indicator::Up);
        assert!(!decider.state().is_first_observation);
    }

    #[test]
    fn first_flag_forces_publish_even_with_matching_sent_price() {
        let state = DeciderState {
            last_price: Some(dec!(0.3)),
            last_sent_price: Some(dec!(0.05)),
            last_publish_time: Some(t0()),
            is_first_observation: true,
        };
        let (decision, _) = state.decide(&obs(dec!(0.05), 1), &far_heartbeat());

        assert!(decision.should_publish);
        assert_eq!(decision.price_indicator, Indicator::Up);
    }

    #[test]
    fn same_truncated_price_is_debounced() {
        let mut decider = UpdateDecider::new(far_heartbeat());
        decider.observe(&obs(dec!(0.12345), 0));

        let decision = decider.observe(&obs(dec!(0.123459), 5));
        assert!(!decision.should_publish);
        assert_eq!(decider.state().last_sent_price, Some(dec!(0.12345)));
        assert_eq!(decider.state().last_price, Some(dec!(0.123459)));
    }

    #[test]
    fn heartbeat_exactly_elapsed_publishes() {
        let policy = DecisionPolicy {
            decimal_places: 5,
            heartbeat: Duration::seconds(60),
        };
        let mut decider = UpdateDecider::new(policy);
        decider.observe(&obs(dec!(0.05), 0));

        assert!(!decider.observe(&obs(dec!(0.05), 59)).should_publish);
        assert!(decider.observe(&obs(dec!(0.05), 60)).should_publish);
        assert_eq!(
            decider.state().last_publish_time,
            Some(t0() + Duration::seconds(60))
        );
    }

    #[test]
    fn indicators_follow_last_raw_observation() {
        let mut decider = UpdateDecider::new(far_heartbeat());
        decider.observe(&obs(dec!(0.05), 0));

        // Suppressed, but still becomes the comparison base.
        let flat = decider.observe(&obs(dec!(0.050001), 1));
        assert!(!flat.should_publish);
        assert_eq!(flat.price_indicator, Indicator::Up);

        let down = decider.observe(&obs(dec!(0.04), 2));
        assert!(down.should_publish);
        assert_eq!(down.price_indicator, Indicator::Down);
        assert_eq!(down.mcap_indicator, Indicator::Down);

        let equal = decider.observe(&obs(dec!(0.04), 3));
        assert_eq!(equal.price_indicator, Indicator::None);
        assert_eq!(equal.mcap_indicator, Indicator::None);
    }

    #[test]
    fn flat_then_rising_sequence() {
        let mut decider = UpdateDecider::new(far_heartbeat());
        let decisions: Vec<Decision> = [dec!(0.05000), dec!(0.05000), dec!(0.06000)]
            .iter()
            .enumerate()
            .map(|(i, price)| decider.observe(&obs(*price, i as i64)))
            .collect();

        let published: Vec<bool> = decisions.iter().map(|d| d.should_publish).collect();
        assert_eq!(published, vec![true, false, true]);
        assert_eq!(decisions[2].price_indicator, Indicator::Up);
    }

    #[test]
    fn suppressed_decision_leaves_sent_fields_alone() {
        let mut decider = UpdateDecider::new(far_heartbeat());
        decider.observe(&obs(dec!(0.05), 0));
        let before = *decider.state();

        decider.observe(&obs(dec!(0.05), 10));
        assert_eq!(decider.state().last_sent_price, before.last_sent_price);
        assert_eq!(decider.state().last_publish_time, before.last_publish_time);
    }

    #[test]
    fn revert_publish_restores_sent_fields_only() {
        let mut decider = UpdateDecider::new(far_heartbeat());
        let before = *decider.state();
        assert!(decider.observe(&obs(dec!(0.05), 0)).should_publish);

        decider.revert_publish(&before);
        let state = decider.state();
        assert_eq!(state.last_sent_price, None);
        assert_eq!(state.last_publish_time, None);
        assert!(state.is_first_observation);
        assert_eq!(state.last_price, Some(dec!(0.05)));

        // Retried on the next tick with the same price.
        assert!(decider.observe(&obs(dec!(0.05), 1)).should_publish);
    }

    #[test]
    fn glyphs() {
        assert_eq!(Indicator::Up.glyph(), "🟩");
        assert_eq!(Indicator::Down.glyph(), "🟥");
        assert_eq!(Indicator::None.glyph(), "");
    }
}
