use super::ui;
use crate::core::trip::Trip;
use anyhow::{Context, Result};
use comfy_table::Cell;

/// Prints the minimal transfer plan that settles the trip.
pub fn run(trip: &Trip) -> Result<()> {
    let plan =
        crate::core::compute_settlement(trip).context("Cannot compute a settlement plan")?;

    println!(
        "Trip: {}\n",
        ui::style_text(&trip.name, ui::StyleType::Title)
    );

    if plan.is_empty() {
        println!(
            "{}",
            ui::style_text("Everyone is settled up.", ui::StyleType::TotalValue)
        );
        return Ok(());
    }

    let currency = &trip.settlement_currency;
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("From"),
        ui::header_cell("To"),
        ui::header_cell(&format!("Amount ({currency})")),
    ]);
    for transaction in &plan {
        table.add_row(vec![
            Cell::new(&transaction.from_name),
            Cell::new(&transaction.to_name),
            ui::amount_cell(transaction.amount),
        ]);
    }

    println!("{table}");
    println!(
        "\n{} {} transfer(s) settle the trip.",
        ui::style_text("Done:", ui::StyleType::TotalLabel),
        plan.len()
    );
    Ok(())
}
