//! Domain validation errors.
//!
//! Returned by `try_new` constructors when an invariant would be violated.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Observed prices must be strictly positive.
    #[error("price must be positive, got {price}")]
    NonPositivePrice {
        /// The rejected price.
        price: rust_decimal::Decimal,
    },
}
