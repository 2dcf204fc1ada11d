use chrono::NaiveDate;

use crate::models::{ProgressStatus, ResolvedRecord, StreakEntry, StreakResult};

const HISTORY_LIMIT: usize = 5;

/// Computes the current streak, longest streak, and streak history over one
/// student's resolved records. A streak is a maximal run of on-time
/// completions ordered by due date; a late hand-in breaks it even though the
/// work was eventually submitted.
pub fn analyze(records: &[ResolvedRecord]) -> StreakResult {
    let mut by_due_desc: Vec<&ResolvedRecord> = records.iter().collect();
    by_due_desc.sort_by(|a, b| b.assignment.due_at.cmp(&a.assignment.due_at));

    // Current streak scans everything, so a pending or missed assignment
    // sitting at the top of the timeline zeroes it.
    let current_streak = by_due_desc
        .iter()
        .take_while(|record| record.status == ProgressStatus::Completed)
        .count();

    // Longest streak and history only look at work that was submitted at all.
    let mut submitted: Vec<&ResolvedRecord> = by_due_desc
        .into_iter()
        .filter(|record| {
            matches!(
                record.status,
                ProgressStatus::Completed | ProgressStatus::Late
            )
        })
        .collect();
    submitted.reverse();

    let mut history: Vec<StreakEntry> = Vec::new();
    let mut longest_streak = 0usize;
    let mut run_length = 0usize;
    let mut run_end: Option<NaiveDate> = None;

    for record in &submitted {
        if record.status == ProgressStatus::Completed {
            run_length += 1;
            run_end = Some(record.assignment.due_at.date_naive());
            longest_streak = longest_streak.max(run_length);
        } else {
            close_run(&mut history, &mut run_length, &mut run_end);
        }
    }
    close_run(&mut history, &mut run_length, &mut run_end);

    // Stable sort keeps equal-length runs in chronological order.
    history.sort_by(|a, b| b.length.cmp(&a.length));
    history.truncate(HISTORY_LIMIT);

    StreakResult {
        current_streak,
        longest_streak,
        streak_history: history,
    }
}

fn close_run(
    history: &mut Vec<StreakEntry>,
    run_length: &mut usize,
    run_end: &mut Option<NaiveDate>,
) {
    if *run_length > 0 {
        if let Some(end_date) = run_end.take() {
            history.push(StreakEntry {
                length: *run_length,
                end_date,
            });
        }
        *run_length = 0;
    }
}
