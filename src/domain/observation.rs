//! A single successful price reading.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::error::DomainError;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// One extracted price and the instant it was taken.
///
/// Produced once per successful cycle and consumed by the
/// [`UpdateDecider`](super::UpdateDecider).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    price: Price,
    timestamp: DateTime<Utc>,
}

impl Observation {
    /// Build an observation, rejecting zero and negative prices.
    pub fn try_new(price: Price, timestamp: DateTime<Utc>) -> Result<Self, DomainError> {
        if price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { price });
        }
        Ok(Self { price, timestamp })
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
