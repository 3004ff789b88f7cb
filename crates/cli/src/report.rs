// Terminal output for probe results

use colored::Colorize;
use nbprobe_core::application::RunReport;
use nbprobe_core::domain::{Disposition, ProbeRoute, RangeProbe, RangeSample};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Probe")]
    label: String,
    #[tabled(rename = "Result")]
    result: String,
}

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Output")]
    output: String,
}

pub fn outcome_table(report: &RunReport) -> String {
    let rows: Vec<OutcomeRow> = report
        .outcomes
        .iter()
        .map(|outcome| OutcomeRow {
            label: outcome.label.clone(),
            result: match &outcome.disposition {
                Disposition::Saved(_) => outcome.disposition.to_string().green().to_string(),
                Disposition::Failed(_) => outcome.disposition.to_string().red().to_string(),
            },
        })
        .collect();

    Table::new(rows).to_string()
}

pub fn print_report(report: &RunReport) {
    println!("{}", outcome_table(report));
    println!();

    let saved = report.saved_count();
    let failed = report.failure_count();
    if failed == 0 {
        println!("{}", format!("✓ {} probes saved", saved).green().bold());
    } else {
        println!(
            "{} {}",
            format!("✓ {} saved", saved).green().bold(),
            format!("✗ {} failed", failed).red().bold()
        );
    }
}

pub fn route_table(routes: &[ProbeRoute]) -> String {
    let rows: Vec<RouteRow> = routes
        .iter()
        .map(|route| RouteRow {
            method: route.method.to_string(),
            path: route.relative_path().to_string(),
            output: format!("{}.json", route.label()),
        })
        .collect();

    Table::new(rows).to_string()
}

pub fn print_range_sample(probe: &RangeProbe, sample: &RangeSample) {
    println!();
    println!(
        "{}",
        format!("Range probe {} ({})", probe.relative_path(), probe.range.header_value())
            .cyan()
            .bold()
    );

    let status = if sample.is_partial() {
        sample.status.to_string().green()
    } else {
        sample.status.to_string().yellow()
    };
    println!("  {} {}", "Status:".bold(), status);
    if let Some(content_range) = &sample.content_range {
        println!("  {} {}", "Content-Range:".bold(), content_range);
    }
    println!("  {} {:?}", "Body:".bold(), sample.body);
}
