use chrono::{DateTime, Utc};

use crate::models::{Assignment, ProgressStatus, ResolvedRecord, Submission, SubmissionStatus};

const SECONDS_PER_DAY: i64 = 86_400;

/// Classifies one (assignment, submission) pair at the given instant.
/// Total over its input domain; the same inputs always resolve the same way.
pub fn resolve(
    assignment: &Assignment,
    submission: Option<&Submission>,
    now: DateTime<Utc>,
) -> ResolvedRecord {
    let is_overdue = now > assignment.due_at;
    let status = match submission {
        Some(sub) if is_actual_submission(sub) => {
            if sub.is_late {
                ProgressStatus::Late
            } else {
                ProgressStatus::Completed
            }
        }
        _ => {
            if is_overdue {
                ProgressStatus::Missed
            } else {
                ProgressStatus::Pending
            }
        }
    };

    ResolvedRecord {
        assignment: assignment.clone(),
        submission: submission.cloned(),
        status,
        is_overdue,
        days_until_due: days_until(assignment.due_at, now),
    }
}

/// Some upstream write paths leave submission rows with a status tag set but
/// no real hand-in (a zero placeholder timestamp, empty body, no files).
/// Such rows must not count as submitted.
pub fn is_actual_submission(submission: &Submission) -> bool {
    if submission.status == SubmissionStatus::NotSubmitted {
        return false;
    }
    match submission.submitted_at {
        Some(at) if at.timestamp() > 0 => {}
        _ => return false,
    }
    let has_content = submission
        .content
        .as_deref()
        .map_or(false, |content| !content.is_empty());
    has_content || submission.attachment_count > 0
}

/// Ceiling of (due - now) in whole days; negative once overdue by a full day.
fn days_until(due_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (due_at - now).num_seconds();
    (seconds + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY)
}
