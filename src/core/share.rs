//! Weighted cost-sharing over the shared portion of trip spend.

use rust_decimal::Decimal;
use tracing::debug;

use crate::core::error::EngineError;
use crate::core::money;
use crate::core::trip::Trip;

/// The outcome of splitting total shared spend across share coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareAllocation {
    pub total_shares: Decimal,
    pub total_shared_cost: Decimal,
    pub cost_per_share: Decimal,
}

impl ShareAllocation {
    /// The amount owed by a participant holding `coefficient` shares.
    pub fn owed_for(&self, coefficient: Decimal) -> Decimal {
        self.cost_per_share * coefficient
    }
}

/// Splits the normalized shared spend across the participants' share
/// coefficients. Fails with [`EngineError::NoShares`] when the total weight
/// is zero, which would otherwise make the per-share cost undefined.
pub fn allocate(trip: &Trip) -> Result<ShareAllocation, EngineError> {
    let total_shares: Decimal = trip.participants.iter().map(|p| p.coefficient).sum();
    if total_shares <= Decimal::ZERO {
        return Err(EngineError::NoShares);
    }

    let mut total_shared_cost = Decimal::ZERO;
    for expense in trip.expenses.iter().filter(|e| e.shared) {
        total_shared_cost += money::normalize_expense(expense, trip)?;
    }

    let cost_per_share = total_shared_cost / total_shares;
    debug!(
        %total_shares,
        %total_shared_cost,
        %cost_per_share,
        "Allocated shared spend"
    );

    Ok(ShareAllocation {
        total_shares,
        total_shared_cost,
        cost_per_share,
    })
}
