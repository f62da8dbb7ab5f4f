use super::ui;
use crate::core::money;
use crate::core::trip::Trip;
use anyhow::{Context, Result};
use comfy_table::Cell;

/// Prints the paid/owed/balance table for every participant. Amounts are
/// rounded to the trip's rounding unit for display; the underlying
/// computation stays exact.
pub fn run(trip: &Trip) -> Result<()> {
    let balances =
        crate::core::compute_balances(trip).context("Cannot compute balances for this trip")?;

    let currency = &trip.settlement_currency;
    let unit = trip.rounding_unit;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Participant"),
        ui::header_cell(&format!("Paid ({currency})")),
        ui::header_cell(&format!("Owed ({currency})")),
        ui::header_cell(&format!("Balance ({currency})")),
    ]);

    for balance in &balances {
        table.add_row(vec![
            Cell::new(&balance.name),
            ui::amount_cell(money::round_to_unit(balance.paid, unit)),
            ui::amount_cell(money::round_to_unit(balance.owed, unit)),
            ui::balance_cell(money::round_to_unit(balance.balance, unit)),
        ]);
    }

    println!(
        "Trip: {}\n\n{table}",
        ui::style_text(&trip.name, ui::StyleType::Title)
    );
    println!(
        "\n{} positive means the group owes them, negative means they owe the group.",
        ui::style_text("Balance:", ui::StyleType::Subtle)
    );
    Ok(())
}
