//! Currency normalization and rounding.
//!
//! Per-expense normalization is exact; rounding to the trip's unit happens
//! only where an amount is surfaced to the user (report aggregates,
//! displayed balances, settlement transactions), so rounding error never
//! compounds across intermediate sums.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::core::error::EngineError;
use crate::core::trip::{Expense, Trip};

/// Converts an amount in `currency` into the trip's settlement currency.
///
/// When the currencies already match the rate is ignored entirely, so the
/// caller is never forced to supply one. Otherwise a positive rate is
/// required and the result is `amount * rate`, unrounded.
pub fn normalize(
    amount: Decimal,
    currency: &str,
    exchange_rate: Option<Decimal>,
    description: &str,
    trip: &Trip,
) -> Result<Decimal, EngineError> {
    if currency == trip.settlement_currency {
        return Ok(amount);
    }
    match exchange_rate {
        Some(rate) if rate > Decimal::ZERO => {
            let normalized = amount * rate;
            debug!(
                %amount,
                currency,
                %rate,
                %normalized,
                "Converted expense into {}",
                trip.settlement_currency
            );
            Ok(normalized)
        }
        _ => Err(EngineError::InvalidRate {
            expense: description.to_string(),
            currency: currency.to_string(),
            settlement_currency: trip.settlement_currency.clone(),
        }),
    }
}

/// Normalizes a recorded expense into the trip's settlement currency.
pub fn normalize_expense(expense: &Expense, trip: &Trip) -> Result<Decimal, EngineError> {
    normalize(
        expense.amount,
        &expense.currency,
        expense.exchange_rate,
        &expense.description,
        trip,
    )
}

/// Rounds to the nearest multiple of `unit`, half away from zero.
/// `unit` is the trip's rounding unit (1, 100, 1000, ...).
pub fn round_to_unit(amount: Decimal, unit: Decimal) -> Decimal {
    if unit <= Decimal::ZERO {
        return amount;
    }
    (amount / unit).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) * unit
}
