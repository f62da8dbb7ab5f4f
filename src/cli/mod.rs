//! Command implementations and shared table styling.

pub mod balances;
pub mod report;
pub mod settle;
pub mod setup;
pub mod ui;
