//! Terminal and JSON rendering of cost estimates and AI suggestions.

use comfy_table::{Cell, Table};
use console::style;
use serde::Serialize;

use crate::advisor::Suggestion;
use crate::error::Result;
use crate::pricing::{total_cost, CostLine, Provider};
use crate::prices::EXPENSIVE_THRESHOLD;

/// Print the cost breakdown table plus a summary for the given (possibly
/// filtered) lines. `scope` names the active provider filter for display.
pub fn print_cost_report(lines: &[CostLine], scope: &str) {
    if lines.is_empty() {
        println!("No compute resources detected ({}).", scope);
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Resource",
        "Provider",
        "Type / Size",
        "Est. Monthly Cost",
        "Status",
    ]);

    for line in lines {
        let provider_cell = match line.provider {
            Provider::Aws => Cell::new("AWS").fg(comfy_table::Color::Yellow),
            Provider::Azure => Cell::new("Azure").fg(comfy_table::Color::Blue),
            Provider::Gcp => Cell::new("GCP").fg(comfy_table::Color::Green),
        };

        let cost_cell = if line.monthly_cost > EXPENSIVE_THRESHOLD {
            Cell::new(format!("${:.2}", line.monthly_cost)).fg(comfy_table::Color::Red)
        } else {
            Cell::new(format!("${:.2}", line.monthly_cost))
        };

        let status_cell = if line.is_estimate {
            Cell::new("estimate").fg(comfy_table::Color::Yellow)
        } else {
            Cell::new("exact").fg(comfy_table::Color::Green)
        };

        table.add_row(vec![
            Cell::new(&line.resource_name),
            provider_cell,
            Cell::new(&line.instance_type),
            cost_cell,
            status_cell,
        ]);
    }

    println!("{table}");

    let total = total_cost(lines);
    println!(
        "\nTotal estimated monthly cost ({}): {}",
        scope,
        style(format!("${:.2}", total)).bold().green()
    );
    println!("Resources priced: {}", lines.len());

    let estimates = lines.iter().filter(|l| l.is_estimate).count();
    if estimates > 0 {
        println!(
            "{} line(s) marked (?) were priced by the provider default - type not in the price table",
            estimates
        );
    }

    let expensive = lines
        .iter()
        .filter(|l| l.monthly_cost > EXPENSIVE_THRESHOLD)
        .count();
    if expensive > 0 {
        println!(
            "  WARNING: {} resource(s) above ${:.0}/month - review instance sizing",
            expensive, EXPENSIVE_THRESHOLD
        );
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    resources: &'a [CostLine],
    total_monthly_cost: f64,
}

/// Machine-readable variant of the cost report.
pub fn render_json(lines: &[CostLine]) -> Result<String> {
    let report = JsonReport {
        resources: lines,
        total_monthly_cost: total_cost(lines),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Print AI optimization suggestions.
pub fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("No suggestions returned.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Resource",
        "Current Type",
        "Suggestion",
        "Potential Savings",
        "Reasoning",
    ]);

    for s in suggestions {
        let savings_cell = if s.potential_savings == "N/A" {
            Cell::new("N/A")
        } else {
            Cell::new(&s.potential_savings).fg(comfy_table::Color::Green)
        };

        table.add_row(vec![
            Cell::new(&s.resource_name),
            Cell::new(&s.current_type),
            Cell::new(&s.suggestion),
            savings_cell,
            Cell::new(&s.reasoning),
        ]);
    }

    println!("{table}");
    println!("\n{} suggestion(s) from AI analysis", suggestions.len());
}
