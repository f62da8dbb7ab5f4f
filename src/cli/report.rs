use super::ui;
use crate::core::trip::Trip;
use anyhow::{Context, Result};
use comfy_table::Cell;

/// Prints the spending report: category, day, participant and activity
/// breakdowns over the shared spend, plus the overall totals.
pub fn run(trip: &Trip) -> Result<()> {
    let report =
        crate::core::compute_report(trip).context("Cannot compute the spending report")?;

    let currency = &trip.settlement_currency;
    println!(
        "Trip: {}",
        ui::style_text(&trip.name, ui::StyleType::Title)
    );

    let mut categories = ui::new_styled_table();
    categories.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell(&format!("Total ({currency})")),
        ui::header_cell("Share"),
    ]);
    for row in &report.by_category {
        categories.add_row(vec![
            Cell::new(row.category.as_str()),
            ui::amount_cell(row.total),
            ui::percent_cell(row.percent),
        ]);
    }
    println!("\nBy category:\n{categories}");

    ui::print_separator();

    let mut days = ui::new_styled_table();
    days.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("Total ({currency})")),
    ]);
    for row in &report.by_day {
        days.add_row(vec![
            Cell::new(row.date.format("%Y-%m-%d").to_string()),
            ui::amount_cell(row.total),
        ]);
    }
    println!("By day:\n{days}");

    ui::print_separator();

    let mut participants = ui::new_styled_table();
    participants.set_header(vec![
        ui::header_cell("Participant"),
        ui::header_cell(&format!("Paid toward shared ({currency})")),
    ]);
    for row in &report.by_participant {
        participants.add_row(vec![Cell::new(&row.name), ui::amount_cell(row.total)]);
    }
    println!("By participant:\n{participants}");

    if !report.by_activity.is_empty() {
        ui::print_separator();

        let mut activities = ui::new_styled_table();
        activities.set_header(vec![
            ui::header_cell("Activity"),
            ui::header_cell(&format!("Total ({currency})")),
        ]);
        for row in &report.by_activity {
            let name = if row.activity.is_some() {
                Cell::new(&row.name)
            } else {
                Cell::new(format!("({})", row.name))
            };
            activities.add_row(vec![name, ui::amount_cell(row.total)]);
        }
        println!("By activity:\n{activities}");
    }

    println!(
        "\n{} {} {currency}",
        ui::style_text("Total shared spend:", ui::StyleType::TotalLabel),
        ui::style_text(&ui::format_amount(report.total_shared), ui::StyleType::TotalValue),
    );
    println!(
        "{} {} {currency}",
        ui::style_text("Total spend (incl. personal):", ui::StyleType::TotalLabel),
        ui::style_text(&ui::format_amount(report.total_spend), ui::StyleType::TotalValue),
    );
    Ok(())
}
