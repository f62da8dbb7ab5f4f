//! Trip data model: participants, expenses, activities and category tags.
//!
//! The engine never mutates a trip during computation; every entry point
//! takes an immutable snapshot and derives its result fresh. The few
//! mutating helpers here exist so that callers get the removal guards the
//! data model promises (no orphaned payers, no silently dropped categories).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::EngineError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ActivityId(pub u32);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A traveler on the trip. The coefficient is the relative weight used to
/// split shared costs: 1.0 is a full adult share, children typically carry
/// the trip's default child coefficient, and 0 means the participant owes
/// nothing but may still have paid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub coefficient: Decimal,
}

/// Expense category: a closed set of well-known tags plus an open custom
/// variant, so legacy or user-defined tags never masquerade as known ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Transport,
    Accommodation,
    Shopping,
    Entertainment,
    Tickets,
    Other,
    Custom(String),
}

impl Category {
    /// The default tag set offered when a trip is created.
    pub fn defaults() -> Vec<Category> {
        vec![
            Category::Food,
            Category::Transport,
            Category::Accommodation,
            Category::Shopping,
            Category::Entertainment,
            Category::Tickets,
            Category::Other,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Accommodation => "accommodation",
            Category::Shopping => "shopping",
            Category::Entertainment => "entertainment",
            Category::Tickets => "tickets",
            Category::Other => "other",
            Category::Custom(tag) => tag,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "food" => Category::Food,
            "transport" => Category::Transport,
            "accommodation" => Category::Accommodation,
            "shopping" => Category::Shopping,
            "entertainment" => Category::Entertainment,
            "tickets" => Category::Tickets,
            "other" => Category::Other,
            _ => Category::Custom(s.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from(s.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded spend. `shared` expenses are split among all
/// participants per their coefficients; personal expenses still count
/// toward the payer's cash flow but generate no claim against the group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: u32,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    /// Rate to the trip's settlement currency. Required only when the
    /// expense currency differs from it.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
    pub payer: ParticipantId,
    #[serde(default)]
    pub category: Category,
    #[serde(default = "default_shared")]
    pub shared: bool,
    pub date: NaiveDate,
    /// Weak link to an itinerary activity; a stale id resolves to the
    /// "unlinked" bucket at report time instead of failing.
    #[serde(default)]
    pub activity: Option<ActivityId>,
}

fn default_shared() -> bool {
    true
}

/// An itinerary entry. Expenses reference activities weakly, so removing
/// one never cascades into the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<String>,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
}

/// Immutable snapshot of one trip's ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub name: String,
    pub settlement_currency: String,
    /// Smallest increment displayed and settled, e.g. 1000 for VND.
    #[serde(default = "default_rounding_unit")]
    pub rounding_unit: Decimal,
    #[serde(default = "default_child_coefficient")]
    pub default_child_coefficient: Decimal,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default = "Category::defaults")]
    pub categories: Vec<Category>,
}

fn default_rounding_unit() -> Decimal {
    Decimal::ONE
}

fn default_child_coefficient() -> Decimal {
    Decimal::new(5, 1)
}

impl Trip {
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn activity(&self, id: ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Checks the referential and numeric invariants every computation
    /// relies on: non-negative coefficients and known payers.
    pub fn validate(&self) -> Result<(), EngineError> {
        for participant in &self.participants {
            if participant.coefficient < Decimal::ZERO {
                return Err(EngineError::InvalidCoefficient {
                    participant: participant.name.clone(),
                    coefficient: participant.coefficient,
                });
            }
        }
        for expense in &self.expenses {
            if self.participant(expense.payer).is_none() {
                return Err(EngineError::DanglingReference {
                    expense: expense.description.clone(),
                    participant: expense.payer,
                });
            }
        }
        Ok(())
    }

    /// Removes a participant, refusing while any expense still names them
    /// as payer.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<(), EngineError> {
        if let Some(participant) = self.participant(id) {
            if self.expenses.iter().any(|e| e.payer == id) {
                return Err(EngineError::ParticipantHasExpenses {
                    participant: participant.name.clone(),
                });
            }
        }
        self.participants.retain(|p| p.id != id);
        Ok(())
    }

    /// Removes a category tag, refusing while expenses still carry it.
    pub fn remove_category(&mut self, category: &Category) -> Result<(), EngineError> {
        let count = self.expenses.iter().filter(|e| &e.category == category).count();
        if count > 0 {
            return Err(EngineError::CategoryInUse {
                category: category.to_string(),
                count,
            });
        }
        self.categories.retain(|c| c != category);
        Ok(())
    }

    /// Removes an itinerary activity. Linked expenses keep their id and
    /// surface under the "unlinked" bucket from then on.
    pub fn remove_activity(&mut self, id: ActivityId) {
        self.activities.retain(|a| a.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trip_with_one_expense() -> Trip {
        Trip {
            name: "Hanoi".to_string(),
            settlement_currency: "VND".to_string(),
            rounding_unit: dec!(1000),
            default_child_coefficient: dec!(0.5),
            participants: vec![
                Participant {
                    id: ParticipantId(1),
                    name: "An".to_string(),
                    coefficient: dec!(1.0),
                },
                Participant {
                    id: ParticipantId(2),
                    name: "Binh".to_string(),
                    coefficient: dec!(1.0),
                },
            ],
            expenses: vec![Expense {
                id: 1,
                description: "Dinner".to_string(),
                amount: dec!(300000),
                currency: "VND".to_string(),
                exchange_rate: None,
                payer: ParticipantId(1),
                category: Category::Food,
                shared: true,
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                activity: None,
            }],
            activities: vec![],
            categories: Category::defaults(),
        }
    }

    #[test]
    fn category_parses_known_tags_case_insensitively() {
        assert_eq!(Category::from("Food"), Category::Food);
        assert_eq!(Category::from("TRANSPORT"), Category::Transport);
        assert_eq!(
            Category::from("street karaoke"),
            Category::Custom("street karaoke".to_string())
        );
    }

    #[test]
    fn category_round_trips_through_serde_as_string() {
        let yaml = serde_yaml::to_string(&Category::Accommodation).unwrap();
        assert_eq!(yaml.trim(), "accommodation");
        let back: Category = serde_yaml::from_str("souvenirs").unwrap();
        assert_eq!(back, Category::Custom("souvenirs".to_string()));
    }

    #[test]
    fn validate_rejects_negative_coefficient() {
        let mut trip = trip_with_one_expense();
        trip.participants[0].coefficient = dec!(-1);
        assert!(matches!(
            trip.validate(),
            Err(EngineError::InvalidCoefficient { .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_payer() {
        let mut trip = trip_with_one_expense();
        trip.expenses[0].payer = ParticipantId(99);
        assert_eq!(
            trip.validate(),
            Err(EngineError::DanglingReference {
                expense: "Dinner".to_string(),
                participant: ParticipantId(99),
            })
        );
    }

    #[test]
    fn remove_participant_is_guarded_by_expenses() {
        let mut trip = trip_with_one_expense();
        assert!(matches!(
            trip.remove_participant(ParticipantId(1)),
            Err(EngineError::ParticipantHasExpenses { .. })
        ));
        trip.remove_participant(ParticipantId(2)).unwrap();
        assert_eq!(trip.participants.len(), 1);
    }

    #[test]
    fn remove_category_is_guarded_by_usage() {
        let mut trip = trip_with_one_expense();
        assert_eq!(
            trip.remove_category(&Category::Food),
            Err(EngineError::CategoryInUse {
                category: "food".to_string(),
                count: 1,
            })
        );
        trip.remove_category(&Category::Tickets).unwrap();
        assert!(!trip.categories.contains(&Category::Tickets));
    }

    #[test]
    fn remove_activity_never_cascades_into_expenses() {
        let mut trip = trip_with_one_expense();
        trip.activities.push(Activity {
            id: ActivityId(7),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            time: None,
            name: "Old Quarter walk".to_string(),
            location: String::new(),
            notes: String::new(),
        });
        trip.expenses[0].activity = Some(ActivityId(7));

        trip.remove_activity(ActivityId(7));

        assert!(trip.activities.is_empty());
        assert_eq!(trip.expenses[0].activity, Some(ActivityId(7)));
    }
}
