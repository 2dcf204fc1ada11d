use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub subject: String,
    pub title: String,
    pub assigned_on: NaiveDate,
    pub due_at: DateTime<Utc>,
    pub total_points: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    NotSubmitted,
    Submitted,
    Graded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub status: SubmissionStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub content: Option<String>,
    pub attachment_count: u32,
    pub is_late: bool,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
}

/// Lifecycle state derived from an assignment, its submission, and "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Pending,
    Completed,
    Late,
    Missed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRecord {
    pub assignment: Assignment,
    pub submission: Option<Submission>,
    pub status: ProgressStatus,
    pub is_overdue: bool,
    pub days_until_due: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakEntry {
    pub length: usize,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakResult {
    pub current_streak: usize,
    pub longest_streak: usize,
    pub streak_history: Vec<StreakEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeCategory {
    Subject,
    Streak,
    Completion,
    Punctuality,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub category: BadgeCategory,
    pub earned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupStats {
    pub total: usize,
    pub completed: usize,
    pub late: usize,
    pub missed: usize,
    pub pending: usize,
    /// Percent of assignments submitted at all, on time or late.
    pub completion_rate: u32,
    /// Percent of submitted assignments that were not late.
    pub on_time_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectStats {
    pub subject: String,
    pub stats: GroupStats,
}

/// Week-of-year grouping key: week n covers ordinal days (n-1)*7+1 ..= n*7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn from_date(date: NaiveDate) -> Self {
        WeekKey {
            year: date.year(),
            week: (date.ordinal() + 6) / 7,
        }
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

impl Serialize for WeekKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekStats {
    pub week: WeekKey,
    pub stats: GroupStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthStats {
    pub month: MonthKey,
    pub stats: GroupStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    pub overall: GroupStats,
    pub by_subject: Vec<SubjectStats>,
    pub by_week: Vec<WeekStats>,
    pub by_month: Vec<MonthStats>,
}

/// One composed progress report. The list, timeline, and analytics views
/// all read from a single computation so they can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub records: Vec<ResolvedRecord>,
    pub overall: GroupStats,
    pub by_subject: Vec<SubjectStats>,
    pub by_week: Vec<WeekStats>,
    pub by_month: Vec<MonthStats>,
    pub streaks: StreakResult,
    pub badges: Vec<Badge>,
    pub insights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_key_buckets_ordinal_days_in_sevens() {
        let jan_1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let jan_7 = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        let jan_8 = NaiveDate::from_ymd_opt(2026, 1, 8).unwrap();
        assert_eq!(WeekKey::from_date(jan_1).to_string(), "2026-W01");
        assert_eq!(WeekKey::from_date(jan_7).to_string(), "2026-W01");
        assert_eq!(WeekKey::from_date(jan_8).to_string(), "2026-W02");

        let dec_31 = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert_eq!(WeekKey::from_date(dec_31).to_string(), "2026-W53");
    }

    #[test]
    fn keys_order_chronologically() {
        let earlier = WeekKey { year: 2025, week: 52 };
        let later = WeekKey { year: 2026, week: 1 };
        assert!(earlier < later);

        let nov = MonthKey { year: 2025, month: 11 };
        let feb = MonthKey { year: 2026, month: 2 };
        assert!(nov < feb);
        assert_eq!(nov.to_string(), "2025-11");
    }
}
