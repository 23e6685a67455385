//! Markdown rendering of a [`MetricsSummary`].

use crate::aggregate::MetricsSummary;
use crate::record::round_tenth;

/// Render the summary as a markdown report.
///
/// Pure function of its input: the same summary always yields the same text.
#[must_use]
pub fn render_report(summary: &MetricsSummary) -> String {
    let totals = &summary.totals;
    let averages = &summary.averages;
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Metrics Summary Report".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Generated: {}",
        summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.push(String::new());

    lines.push("## Overall Totals".to_string());
    lines.push(String::new());
    lines.push(format!("- **Work Items:** {}", totals.work_items));
    lines.push(format!("- **Total Sessions:** {}", format_number(totals.sessions)));
    lines.push(format!(
        "- **Total Hours:** {}",
        format_number(round_tenth(totals.hours))
    ));
    lines.push(format!(
        "- **Total Reacquisition Time:** {} minutes",
        format_number(totals.reacquisition_minutes)
    ));
    lines.push(format!(
        "- **Tasks Completed:** {} / {}",
        format_number(totals.completed_tasks),
        format_number(totals.planned_tasks)
    ));
    lines.push(String::new());

    lines.push("## Averages".to_string());
    lines.push(String::new());
    lines.push(format!(
        "- **Sessions per Work Item:** {}",
        format_number(averages.sessions_per_work_item)
    ));
    lines.push(format!(
        "- **Hours per Work Item:** {}",
        format_number(averages.hours_per_work_item)
    ));
    lines.push(format!(
        "- **Reacquisition per Session:** {} minutes",
        format_number(averages.reacquisition_per_session)
    ));
    lines.push(format!(
        "- **Session Duration:** {} hours",
        format_number(averages.session_duration)
    ));
    lines.push(format!(
        "- **Overall Completion Rate:** {}%",
        format_number(averages.completion_rate)
    ));
    lines.push(String::new());

    lines.push("## Work Items".to_string());
    lines.push(String::new());
    lines.push("| ID | Title | Status | Sessions | Hours | Tasks | Completion |".to_string());
    lines.push("|----|-------|--------|----------|-------|-------|------------|".to_string());
    for item in &summary.items {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {}/{} | {}% |",
            item.padded_id(),
            escape_cell(&item.title),
            escape_cell(&item.status),
            format_number(item.total_sessions),
            format_number(item.total_hours),
            format_number(item.completed_tasks_total),
            format_number(item.planned_tasks_total),
            format_number(item.completion_percentage),
        ));
    }
    lines.push(String::new());

    lines.join("\n")
}

/// Whole numbers print without a fractional part (`4`, not `4.0`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
