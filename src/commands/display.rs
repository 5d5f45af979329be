//! Console rendering of verification results.

use fairgate::config::CategoryLabels;
use fairgate::gate::Category;
use fairgate::sim::TraceReport;

/// Render a trace report as indented summary lines.
pub fn summary_lines(report: &TraceReport, labels: &CategoryLabels) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("  Events:      {}", report.events));
    for category in Category::ALL {
        let stats = report.stats(category);
        lines.push(format!(
            "  {:<12} {} completed of {}, peak {} at once",
            format!("{}:", labels.plural(category)),
            stats.completed,
            stats.actors,
            stats.peak_concurrency
        ));
    }
    lines.push(format!("  Handoffs:    {}", report.handoffs));
    lines.push(format!("  Max bypass:  {}", report.max_bypass));

    if report.is_clean() {
        lines.push("  Violations:  none".to_string());
    } else {
        lines.push(format!("  Violations:  {}", report.violations.len()));
        for violation in &report.violations {
            lines.push(format!("    - {}", violation));
        }
    }

    lines
}

pub fn print_summary(title: &str, report: &TraceReport, labels: &CategoryLabels) {
    println!();
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    for line in summary_lines(report, labels) {
        println!("{}", line);
    }
}
