//! Minimal-transfer settlement over net balances.
//!
//! Balances are first quantized to the trip's rounding unit with a repair
//! step that keeps the quantized positions summing to exactly zero, then
//! matched greedily largest creditor against largest debtor. Quantizing
//! up front means every transfer is already a clean multiple of the unit
//! and the matching never needs a fix-up pass, while the greedy pairing
//! keeps the plan at no more than `participants - 1` transfers.

use rust_decimal::Decimal;
use rust_decimal::prelude::Signed;
use std::cmp::Ordering;
use tracing::{debug, info};

use crate::core::balance::{self, ParticipantBalance};
use crate::core::error::EngineError;
use crate::core::money;
use crate::core::trip::{ParticipantId, Trip};

/// A single suggested transfer: `from` pays `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementTransaction {
    pub from: ParticipantId,
    pub from_name: String,
    pub to: ParticipantId,
    pub to_name: String,
    pub amount: Decimal,
}

/// Computes the settlement plan for the trip from its current ledger.
pub fn compute_settlement(trip: &Trip) -> Result<Vec<SettlementTransaction>, EngineError> {
    let balances = balance::compute_balances(trip)?;
    resolve(&balances, trip.rounding_unit)
}

/// Resolves a set of net balances into transfers rounded to `rounding_unit`.
///
/// Refuses with [`EngineError::BalanceMismatch`] when the balances do not
/// sum to zero within `rounding_unit * len`, since a plan derived from
/// inconsistent positions would silently move the wrong amounts.
pub fn resolve(
    balances: &[ParticipantBalance],
    rounding_unit: Decimal,
) -> Result<Vec<SettlementTransaction>, EngineError> {
    let drift = balances.iter().map(|b| b.balance).sum::<Decimal>().abs();
    let tolerance = rounding_unit * Decimal::from(balances.len() as u64);
    if drift > tolerance {
        return Err(EngineError::BalanceMismatch { drift, tolerance });
    }

    let positions = quantize(balances, rounding_unit);
    let transactions = pair_greedily(positions);
    info!(
        transfers = transactions.len(),
        participants = balances.len(),
        "Resolved settlement plan"
    );
    Ok(transactions)
}

struct Position {
    id: ParticipantId,
    name: String,
    exact: Decimal,
    quantized: Decimal,
}

/// Rounds every balance to the nearest rounding unit, then repairs the
/// residual so the quantized positions sum to exactly zero. Each repair
/// step moves one position by a single unit, picking the position whose
/// quantized value strays furthest from its exact balance in the direction
/// that shrinks the residual; ties go to the lower participant id so the
/// plan is stable across runs.
fn quantize(balances: &[ParticipantBalance], unit: Decimal) -> Vec<Position> {
    let mut positions: Vec<Position> = balances
        .iter()
        .map(|b| Position {
            id: b.participant,
            name: b.name.clone(),
            exact: b.balance,
            quantized: money::round_to_unit(b.balance, unit),
        })
        .collect();
    if unit <= Decimal::ZERO {
        return positions;
    }

    let mut residual: Decimal = positions.iter().map(|p| p.quantized).sum();
    while residual != Decimal::ZERO {
        let step = if residual > Decimal::ZERO { -unit } else { unit };
        let target = positions
            .iter_mut()
            .max_by(|a, b| {
                let gain_a = (a.quantized - a.exact) * step.signum() * Decimal::NEGATIVE_ONE;
                let gain_b = (b.quantized - b.exact) * step.signum() * Decimal::NEGATIVE_ONE;
                gain_a
                    .cmp(&gain_b)
                    .then_with(|| b.id.cmp(&a.id))
            });
        match target {
            Some(position) => {
                debug!(
                    participant = %position.id,
                    %step,
                    "Repaired quantization residual"
                );
                position.quantized += step;
                residual += step;
            }
            None => break,
        }
    }
    positions
}

/// Matches the largest creditor against the largest debtor until every
/// quantized position reaches zero. Equal amounts are ordered by
/// participant id, so the plan is deterministic for a given ledger.
fn pair_greedily(positions: Vec<Position>) -> Vec<SettlementTransaction> {
    let by_magnitude = |a: &Position, b: &Position| {
        b.quantized
            .abs()
            .cmp(&a.quantized.abs())
            .then_with(|| a.id.cmp(&b.id))
    };

    let mut creditors: Vec<Position> = Vec::new();
    let mut debtors: Vec<Position> = Vec::new();
    for position in positions {
        match position.quantized.cmp(&Decimal::ZERO) {
            Ordering::Greater => creditors.push(position),
            Ordering::Less => debtors.push(position),
            Ordering::Equal => {}
        }
    }
    creditors.sort_by(by_magnitude);
    debtors.sort_by(by_magnitude);

    let mut transactions = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < creditors.len() && j < debtors.len() {
        let creditor = &creditors[i];
        let debtor = &debtors[j];
        let amount = creditor.quantized.min(debtor.quantized.abs());
        transactions.push(SettlementTransaction {
            from: debtor.id,
            from_name: debtor.name.clone(),
            to: creditor.id,
            to_name: creditor.name.clone(),
            amount,
        });

        creditors[i].quantized -= amount;
        debtors[j].quantized += amount;
        if creditors[i].quantized == Decimal::ZERO {
            i += 1;
        }
        if debtors[j].quantized == Decimal::ZERO {
            j += 1;
        }
    }
    transactions
}
