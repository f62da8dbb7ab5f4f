//! Per-participant paid/owed aggregation and net balances.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, error};

use crate::core::error::EngineError;
use crate::core::money;
use crate::core::share;
use crate::core::trip::{ParticipantId, Trip};

/// One participant's position against the group.
///
/// `paid` is the cash-flow total: every expense the participant fronted,
/// personal ones included. `owed` is their weighted slice of the shared
/// spend. `balance` compares only the shared portion of what they paid
/// against `owed`: a personal expense raises `paid` but never generates a
/// claim against the group, so with personal spend present the balance is
/// deliberately not `paid - owed`. All figures are exact; rounding happens
/// at the display and settlement boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantBalance {
    pub participant: ParticipantId,
    pub name: String,
    pub paid: Decimal,
    pub owed: Decimal,
    pub balance: Decimal,
}

/// Computes net balances for every participant of the trip.
///
/// Validates the snapshot first, then checks the conservation law: the
/// balances must sum to zero within `rounding_unit * participant_count`.
/// A larger drift means normalization or allocation is broken and is
/// reported as [`EngineError::BalanceMismatch`] instead of being passed on
/// to settlement.
pub fn compute_balances(trip: &Trip) -> Result<Vec<ParticipantBalance>, EngineError> {
    trip.validate()?;
    let allocation = share::allocate(trip)?;

    let mut paid_by: BTreeMap<ParticipantId, Decimal> = BTreeMap::new();
    let mut shared_paid_by: BTreeMap<ParticipantId, Decimal> = BTreeMap::new();
    for expense in &trip.expenses {
        let amount = money::normalize_expense(expense, trip)?;
        *paid_by.entry(expense.payer).or_insert(Decimal::ZERO) += amount;
        if expense.shared {
            *shared_paid_by.entry(expense.payer).or_insert(Decimal::ZERO) += amount;
        }
    }

    let balances: Vec<ParticipantBalance> = trip
        .participants
        .iter()
        .map(|participant| {
            let paid = paid_by
                .get(&participant.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let shared_paid = shared_paid_by
                .get(&participant.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let owed = allocation.owed_for(participant.coefficient);
            ParticipantBalance {
                participant: participant.id,
                name: participant.name.clone(),
                paid,
                owed,
                balance: shared_paid - owed,
            }
        })
        .collect();

    let drift = balances.iter().map(|b| b.balance).sum::<Decimal>().abs();
    let tolerance = trip.rounding_unit * Decimal::from(trip.participants.len() as u64);
    if drift > tolerance {
        error!(%drift, %tolerance, "Balance conservation check failed");
        return Err(EngineError::BalanceMismatch { drift, tolerance });
    }

    debug!(
        participants = balances.len(),
        cost_per_share = %allocation.cost_per_share,
        "Computed net balances"
    );
    Ok(balances)
}
