//! Ledger engine: pure computations over an immutable trip snapshot.

pub mod balance;
pub mod config;
pub mod error;
pub mod log;
pub mod money;
pub mod report;
pub mod settlement;
pub mod share;
pub mod trip;

// Re-export main types for cleaner imports
pub use balance::{ParticipantBalance, compute_balances};
pub use error::EngineError;
pub use money::{normalize_expense, round_to_unit};
pub use report::{TripReport, compute_report};
pub use settlement::{SettlementTransaction, compute_settlement};
pub use trip::{Activity, ActivityId, Category, Expense, Participant, ParticipantId, Trip};
