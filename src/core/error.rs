//! Typed failures surfaced by the ledger engine.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::core::trip::ParticipantId;

/// Every engine computation either succeeds or fails with one of these
/// variants. None of them are swallowed or defaulted; the calling surface
/// decides how to present the corrective action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A foreign-currency expense carries a missing or non-positive
    /// exchange rate.
    #[error(
        "expense \"{expense}\" is in {currency} and needs a positive exchange rate to {settlement_currency}"
    )]
    InvalidRate {
        expense: String,
        currency: String,
        settlement_currency: String,
    },

    /// The sum of all share coefficients is zero, so a per-share cost is
    /// undefined. Assign a positive coefficient to at least one participant.
    #[error("total share weight is zero; assign a positive share to at least one participant")]
    NoShares,

    /// Internal invariant violation: the net balances drifted beyond the
    /// tolerated rounding error, which points at a normalization or
    /// allocation bug upstream.
    #[error("net balances drift by {drift}, beyond the tolerance of {tolerance}")]
    BalanceMismatch { drift: Decimal, tolerance: Decimal },

    /// An expense names a payer that is not part of the trip.
    #[error("expense \"{expense}\" is paid by unknown participant {participant}")]
    DanglingReference {
        expense: String,
        participant: ParticipantId,
    },

    /// A participant carries a negative share coefficient.
    #[error("participant \"{participant}\" has a negative share coefficient of {coefficient}")]
    InvalidCoefficient {
        participant: String,
        coefficient: Decimal,
    },

    /// Refused removal of a category still attached to expenses.
    #[error("category \"{category}\" is still used by {count} expense(s)")]
    CategoryInUse { category: String, count: usize },

    /// Refused removal of a participant with attributed expenses.
    #[error("participant \"{participant}\" still has expenses attributed to them")]
    ParticipantHasExpenses { participant: String },
}
