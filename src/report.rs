use std::fmt::Write;

use crate::models::{ProgressStatus, Report};

/// Renders a computed report as markdown. Pure formatting; every number
/// comes straight out of the `Report`.
pub fn render_markdown(report: &Report) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Homework Progress Report");
    let _ = writeln!(
        output,
        "Generated at {}",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let overall = &report.overall;
    let _ = writeln!(
        output,
        "- {} assignments: {} completed, {} late, {} missed, {} pending",
        overall.total, overall.completed, overall.late, overall.missed, overall.pending
    );
    let _ = writeln!(
        output,
        "- Completion rate {}%, on-time rate {}%",
        overall.completion_rate, overall.on_time_rate
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Subjects");
    if report.by_subject.is_empty() {
        let _ = writeln!(output, "No subjects yet.");
    } else {
        for subject in &report.by_subject {
            let _ = writeln!(
                output,
                "- {}: {}/{} completed ({}% submitted, {}% on time)",
                subject.subject,
                subject.stats.completed,
                subject.stats.total,
                subject.stats.completion_rate,
                subject.stats.on_time_rate
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Weekly Activity");
    if report.by_week.is_empty() {
        let _ = writeln!(output, "No assignments due in recent weeks.");
    } else {
        for week in &report.by_week {
            let _ = writeln!(
                output,
                "- {}: {} due, {} submitted",
                week.week,
                week.stats.total,
                week.stats.completed + week.stats.late
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Monthly Activity");
    if report.by_month.is_empty() {
        let _ = writeln!(output, "No assignments on record.");
    } else {
        for month in &report.by_month {
            let _ = writeln!(
                output,
                "- {}: {} due, {} submitted",
                month.month,
                month.stats.total,
                month.stats.completed + month.stats.late
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Streaks");
    let _ = writeln!(output, "- Current streak: {}", report.streaks.current_streak);
    let _ = writeln!(output, "- Longest streak: {}", report.streaks.longest_streak);
    for entry in &report.streaks.streak_history {
        let _ = writeln!(
            output,
            "- {} in a row, ending {}",
            entry.length, entry.end_date
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Badges");
    if report.badges.is_empty() {
        let _ = writeln!(output, "No badges earned yet.");
    } else {
        for badge in &report.badges {
            let _ = writeln!(output, "- {}: {}", badge.title, badge.description);
        }
    }

    let mut next_due: Vec<_> = report
        .records
        .iter()
        .filter(|record| record.status == ProgressStatus::Pending)
        .collect();
    next_due.sort_by(|a, b| a.assignment.due_at.cmp(&b.assignment.due_at));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Next Due");
    if next_due.is_empty() {
        let _ = writeln!(output, "Nothing pending.");
    } else {
        for record in next_due.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} ({}) due {} (in {} days)",
                record.assignment.title,
                record.assignment.subject,
                record.assignment.due_at.format("%Y-%m-%d"),
                record.days_until_due
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Insights");
    for insight in &report.insights {
        let _ = writeln!(output, "- {}", insight);
    }

    output
}
