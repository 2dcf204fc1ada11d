use std::collections::BTreeMap;

use crate::models::{
    Aggregates, GroupStats, MonthKey, MonthStats, ProgressStatus, ResolvedRecord, SubjectStats,
    WeekKey, WeekStats,
};

/// Number of most recent week groups kept in the weekly breakdown.
const RECENT_WEEKS: usize = 12;

/// Groups resolved records by subject, week, and month, with the overall
/// totals. Grouping uses the assignment's due date.
pub fn aggregate(records: &[ResolvedRecord]) -> Aggregates {
    let overall = tally(records.iter());

    let mut subjects: BTreeMap<&str, Vec<&ResolvedRecord>> = BTreeMap::new();
    let mut weeks: BTreeMap<WeekKey, Vec<&ResolvedRecord>> = BTreeMap::new();
    let mut months: BTreeMap<MonthKey, Vec<&ResolvedRecord>> = BTreeMap::new();

    for record in records {
        let due = record.assignment.due_at.date_naive();
        subjects
            .entry(record.assignment.subject.as_str())
            .or_default()
            .push(record);
        weeks.entry(WeekKey::from_date(due)).or_default().push(record);
        months
            .entry(MonthKey::from_date(due))
            .or_default()
            .push(record);
    }

    let mut by_subject: Vec<SubjectStats> = subjects
        .into_iter()
        .map(|(subject, group)| SubjectStats {
            subject: subject.to_string(),
            stats: tally(group.into_iter()),
        })
        .collect();
    // Stable sort on top of the alphabetical BTreeMap order keeps ties
    // deterministic across runs.
    by_subject.sort_by(|a, b| b.stats.completion_rate.cmp(&a.stats.completion_rate));

    let mut by_week: Vec<WeekStats> = weeks
        .into_iter()
        .map(|(week, group)| WeekStats {
            week,
            stats: tally(group.into_iter()),
        })
        .collect();
    if by_week.len() > RECENT_WEEKS {
        by_week.drain(..by_week.len() - RECENT_WEEKS);
    }

    let by_month: Vec<MonthStats> = months
        .into_iter()
        .map(|(month, group)| MonthStats {
            month,
            stats: tally(group.into_iter()),
        })
        .collect();

    Aggregates {
        overall,
        by_subject,
        by_week,
        by_month,
    }
}

fn tally<'a>(records: impl Iterator<Item = &'a ResolvedRecord>) -> GroupStats {
    let mut stats = GroupStats::default();
    for record in records {
        stats.total += 1;
        match record.status {
            ProgressStatus::Completed => stats.completed += 1,
            ProgressStatus::Late => stats.late += 1,
            ProgressStatus::Missed => stats.missed += 1,
            ProgressStatus::Pending => stats.pending += 1,
        }
    }
    let submitted = stats.completed + stats.late;
    stats.completion_rate = percent(submitted, stats.total);
    stats.on_time_rate = percent(stats.completed, submitted);
    stats
}

/// Round-half-up integer percentage; 0 when the denominator is 0.
pub fn percent(numerator: usize, denominator: usize) -> u32 {
    if denominator == 0 {
        0
    } else {
        ((200 * numerator + denominator) / (2 * denominator)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Submission, SubmissionStatus};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn record(subject: &str, due_at: DateTime<Utc>, status: ProgressStatus) -> ResolvedRecord {
        let submission = match status {
            ProgressStatus::Completed | ProgressStatus::Late => Some(Submission {
                status: SubmissionStatus::Submitted,
                submitted_at: Some(due_at - Duration::hours(1)),
                content: Some("done".to_string()),
                attachment_count: 0,
                is_late: status == ProgressStatus::Late,
                grade: None,
                feedback: None,
            }),
            _ => None,
        };
        ResolvedRecord {
            assignment: Assignment {
                id: Uuid::new_v4(),
                subject: subject.to_string(),
                title: "Worksheet".to_string(),
                assigned_on: (due_at - Duration::days(7)).date_naive(),
                due_at,
                total_points: None,
            },
            submission,
            status,
            is_overdue: due_at < reference_now(),
            days_until_due: 0,
        }
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(1, 6), 17);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(5, 8), 63);
        assert_eq!(percent(0, 4), 0);
        assert_eq!(percent(4, 4), 100);
    }

    #[test]
    fn zero_denominators_never_panic() {
        assert_eq!(percent(0, 0), 0);
        let result = aggregate(&[]);
        assert_eq!(result.overall.total, 0);
        assert_eq!(result.overall.completion_rate, 0);
        assert_eq!(result.overall.on_time_rate, 0);
        assert!(result.by_subject.is_empty());
        assert!(result.by_week.is_empty());
        assert!(result.by_month.is_empty());
    }

    #[test]
    fn overall_counts_every_status() {
        let now = reference_now();
        let records = vec![
            record("Math", now - Duration::days(10), ProgressStatus::Completed),
            record("Math", now - Duration::days(9), ProgressStatus::Late),
            record("Math", now - Duration::days(8), ProgressStatus::Missed),
            record("Math", now + Duration::days(1), ProgressStatus::Pending),
        ];
        let overall = aggregate(&records).overall;
        assert_eq!(overall.total, 4);
        assert_eq!(overall.completed, 1);
        assert_eq!(overall.late, 1);
        assert_eq!(overall.missed, 1);
        assert_eq!(overall.pending, 1);
        // 2 of 4 submitted at all; 1 of those 2 on time.
        assert_eq!(overall.completion_rate, 50);
        assert_eq!(overall.on_time_rate, 50);
    }

    #[test]
    fn subjects_sort_by_completion_rate_descending() {
        let now = reference_now();
        let mut records = Vec::new();
        for d in 1..=2 {
            records.push(record("Biology", now - Duration::days(d), ProgressStatus::Missed));
        }
        for d in 1..=2 {
            records.push(record(
                "Art",
                now - Duration::days(d),
                ProgressStatus::Completed,
            ));
        }
        records.push(record("Chemistry", now - Duration::days(1), ProgressStatus::Completed));
        records.push(record("Chemistry", now - Duration::days(2), ProgressStatus::Missed));

        let by_subject = aggregate(&records).by_subject;
        let names: Vec<&str> = by_subject.iter().map(|s| s.subject.as_str()).collect();
        assert_eq!(names, vec!["Art", "Chemistry", "Biology"]);
        assert_eq!(by_subject[1].stats.completion_rate, 50);
    }

    #[test]
    fn weekly_breakdown_keeps_only_recent_twelve() {
        let now = reference_now();
        // 15 assignments, one per week.
        let records: Vec<_> = (0..15)
            .map(|w| {
                record(
                    "Math",
                    now - Duration::weeks(w),
                    ProgressStatus::Completed,
                )
            })
            .collect();
        let by_week = aggregate(&records).by_week;
        assert_eq!(by_week.len(), 12);
        // Ascending by week key, ending at the newest week.
        for pair in by_week.windows(2) {
            assert!(pair[0].week < pair[1].week);
        }
        assert_eq!(
            by_week.last().unwrap().week,
            WeekKey::from_date(now.date_naive())
        );
    }

    #[test]
    fn monthly_breakdown_keeps_every_month_ascending() {
        let now = reference_now();
        let records = vec![
            record("Math", now - Duration::days(120), ProgressStatus::Completed),
            record("Math", now - Duration::days(60), ProgressStatus::Missed),
            record("Math", now, ProgressStatus::Pending),
        ];
        let by_month = aggregate(&records).by_month;
        assert_eq!(by_month.len(), 3);
        for pair in by_month.windows(2) {
            assert!(pair[0].month < pair[1].month);
        }
    }

    #[test]
    fn group_rates_match_overall_formulas() {
        let now = reference_now();
        let records = vec![
            record("Physics", now - Duration::days(3), ProgressStatus::Completed),
            record("Physics", now - Duration::days(2), ProgressStatus::Late),
            record("Physics", now - Duration::days(1), ProgressStatus::Late),
        ];
        let by_subject = aggregate(&records).by_subject;
        assert_eq!(by_subject[0].stats.completion_rate, 100);
        assert_eq!(by_subject[0].stats.on_time_rate, 33);
    }
}
