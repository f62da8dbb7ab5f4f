//! Spending report aggregation over the shared portion of the ledger.
//!
//! Reports are recomputed from the expense set on every call; nothing is
//! cached between invocations, so a report can never go stale against the
//! ledger it was derived from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

use crate::core::error::EngineError;
use crate::core::money;
use crate::core::trip::{ActivityId, Category, ParticipantId, Trip};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
    /// Share of the total shared spend, in percent with one decimal,
    /// derived from the unrounded totals.
    pub percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantTotal {
    pub participant: ParticipantId,
    pub name: String,
    pub total: Decimal,
}

/// Shared spend attributed to one itinerary activity. `activity` is `None`
/// for the unlinked bucket, which collects expenses without an activity id
/// as well as expenses whose activity has since been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityTotal {
    pub activity: Option<ActivityId>,
    pub name: String,
    pub total: Decimal,
}

/// Aggregated views over the trip's shared spend. All totals are rounded
/// to the trip's rounding unit; `total_spend` additionally includes
/// personal expenses for the overall cash-flow figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripReport {
    pub by_category: Vec<CategoryTotal>,
    pub by_day: Vec<DayTotal>,
    pub by_participant: Vec<ParticipantTotal>,
    pub by_activity: Vec<ActivityTotal>,
    pub total_shared: Decimal,
    pub total_spend: Decimal,
}

/// Builds the spending report for the trip.
///
/// Grouping covers shared expenses only; the participant view sums what
/// each traveler paid toward shared spend, which is cash flow rather than
/// liability. Category and activity rows are ordered by descending total
/// so the biggest buckets lead, days chronologically, participants in trip
/// order.
pub fn compute_report(trip: &Trip) -> Result<TripReport, EngineError> {
    trip.validate()?;

    let mut by_category: BTreeMap<Category, Decimal> = BTreeMap::new();
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    let mut by_participant: BTreeMap<ParticipantId, Decimal> = BTreeMap::new();
    let mut by_activity: BTreeMap<Option<ActivityId>, Decimal> = BTreeMap::new();
    let mut total_shared = Decimal::ZERO;
    let mut total_spend = Decimal::ZERO;

    for expense in &trip.expenses {
        let amount = money::normalize_expense(expense, trip)?;
        total_spend += amount;
        if !expense.shared {
            continue;
        }
        total_shared += amount;
        *by_category.entry(expense.category.clone()).or_insert(Decimal::ZERO) += amount;
        *by_day.entry(expense.date).or_insert(Decimal::ZERO) += amount;
        *by_participant.entry(expense.payer).or_insert(Decimal::ZERO) += amount;

        // Dangling activity links land in the unlinked bucket alongside
        // expenses that never had one.
        let bucket = expense
            .activity
            .filter(|id| trip.activity(*id).is_some());
        *by_activity.entry(bucket).or_insert(Decimal::ZERO) += amount;
    }

    let unit = trip.rounding_unit;
    let mut categories: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            total: money::round_to_unit(total, unit),
            percent: percent_of(total, total_shared),
        })
        .collect();
    categories.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });

    let days: Vec<DayTotal> = by_day
        .into_iter()
        .map(|(date, total)| DayTotal {
            date,
            total: money::round_to_unit(total, unit),
        })
        .collect();

    let participants: Vec<ParticipantTotal> = trip
        .participants
        .iter()
        .map(|p| ParticipantTotal {
            participant: p.id,
            name: p.name.clone(),
            total: money::round_to_unit(
                by_participant.get(&p.id).copied().unwrap_or(Decimal::ZERO),
                unit,
            ),
        })
        .collect();

    let unlinked = by_activity.remove(&None);
    let mut activities: Vec<ActivityTotal> = by_activity
        .into_iter()
        .filter_map(|(id, total)| {
            let id = id?;
            let activity = trip.activity(id)?;
            Some(ActivityTotal {
                activity: Some(id),
                name: activity.name.clone(),
                total: money::round_to_unit(total, unit),
            })
        })
        .collect();
    activities.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    if let Some(total) = unlinked {
        activities.push(ActivityTotal {
            activity: None,
            name: "unlinked".to_string(),
            total: money::round_to_unit(total, unit),
        });
    }

    debug!(
        categories = categories.len(),
        days = days.len(),
        %total_shared,
        "Aggregated spending report"
    );

    Ok(TripReport {
        by_category: categories,
        by_day: days,
        by_participant: participants,
        by_activity: activities,
        total_shared: money::round_to_unit(total_shared, unit),
        total_spend: money::round_to_unit(total_spend, unit),
    })
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED).round_dp(1)
}
