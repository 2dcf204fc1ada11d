use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Assignment, ProgressStatus, Report, ResolvedRecord, Submission};
use crate::{aggregate, badges, insights, status, streaks};

/// Input-shape failures. Conflicting records are never silently dropped or
/// merged; the whole report fails instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("assignment {0} appears more than once in the snapshot")]
    DuplicateAssignment(Uuid),
    #[error("submission references unknown assignment {0}")]
    UnknownAssignment(Uuid),
}

/// Resolves every assignment against its submission at `now`, then fans the
/// resolved set into streaks, aggregates, badges, and insights. Returns one
/// composite report or fails entirely; there is no partial result.
pub fn build_report(
    assignments: &[Assignment],
    submissions_by_assignment: &HashMap<Uuid, Submission>,
    now: DateTime<Utc>,
) -> Result<Report, EngineError> {
    let mut seen = HashSet::with_capacity(assignments.len());
    for assignment in assignments {
        if !seen.insert(assignment.id) {
            return Err(EngineError::DuplicateAssignment(assignment.id));
        }
    }
    for id in submissions_by_assignment.keys() {
        if !seen.contains(id) {
            return Err(EngineError::UnknownAssignment(*id));
        }
    }

    let records: Vec<ResolvedRecord> = assignments
        .iter()
        .map(|assignment| {
            status::resolve(assignment, submissions_by_assignment.get(&assignment.id), now)
        })
        .collect();

    let streak_result = streaks::analyze(&records);
    let aggregates = aggregate::aggregate(&records);
    let badge_set = badges::award(&records, &aggregates, &streak_result, now);
    let upcoming = records
        .iter()
        .filter(|record| record.status == ProgressStatus::Pending)
        .count();
    let insight_list = insights::generate(&aggregates.overall, &streak_result, upcoming);

    Ok(Report {
        generated_at: now,
        records,
        overall: aggregates.overall,
        by_subject: aggregates.by_subject,
        by_week: aggregates.by_week,
        by_month: aggregates.by_month,
        streaks: streak_result,
        badges: badge_set,
        insights: insight_list,
    })
}
