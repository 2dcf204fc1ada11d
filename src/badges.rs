use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{
    Aggregates, Badge, BadgeCategory, ProgressStatus, ResolvedRecord, StreakResult,
};

const SUBJECT_MASTERY_MIN_TOTAL: usize = 5;
const STREAK_MID_TIER: usize = 5;
const STREAK_HIGH_TIER: usize = 10;
const COMPLETION_MASTERY_MIN_RATE: u32 = 90;
const COMPLETION_MASTERY_MIN_TOTAL: usize = 10;
const EARLY_BIRD_MIN: usize = 5;

/// Applies the fixed badge rule set. Every rule is evaluated independently
/// and the whole set is rebuilt from scratch on each call; badges carry the
/// caller's `now` as their earned timestamp so identical inputs produce
/// identical output.
pub fn award(
    records: &[ResolvedRecord],
    aggregates: &Aggregates,
    streaks: &StreakResult,
    now: DateTime<Utc>,
) -> Vec<Badge> {
    let mut badges = Vec::new();

    for subject in &aggregates.by_subject {
        if subject.stats.total >= SUBJECT_MASTERY_MIN_TOTAL
            && subject.stats.completed == subject.stats.total
        {
            badges.push(Badge {
                id: format!("subject-mastery-{}", slug(&subject.subject)),
                title: format!("{} Master", subject.subject),
                description: format!(
                    "Completed all {} {} assignments on time",
                    subject.stats.total, subject.subject
                ),
                icon: "trophy".to_string(),
                category: BadgeCategory::Subject,
                earned_at: now,
            });
        }
    }

    if streaks.current_streak >= STREAK_MID_TIER {
        badges.push(Badge {
            id: "streak-5".to_string(),
            title: "On a Roll".to_string(),
            description: "Five on-time completions in a row".to_string(),
            icon: "fire".to_string(),
            category: BadgeCategory::Streak,
            earned_at: now,
        });
    }
    if streaks.current_streak >= STREAK_HIGH_TIER {
        badges.push(Badge {
            id: "streak-10".to_string(),
            title: "Unstoppable".to_string(),
            description: "Ten on-time completions in a row".to_string(),
            icon: "rocket".to_string(),
            category: BadgeCategory::Streak,
            earned_at: now,
        });
    }

    // Sample-size guard so one lucky assignment never earns the badge.
    if aggregates.overall.completion_rate >= COMPLETION_MASTERY_MIN_RATE
        && aggregates.overall.total >= COMPLETION_MASTERY_MIN_TOTAL
    {
        badges.push(Badge {
            id: "completion-mastery".to_string(),
            title: "Finisher".to_string(),
            description: format!(
                "Submitted {}% of {} assignments",
                aggregates.overall.completion_rate, aggregates.overall.total
            ),
            icon: "medal".to_string(),
            category: BadgeCategory::Completion,
            earned_at: now,
        });
    }

    if early_submission_count(records) >= EARLY_BIRD_MIN {
        badges.push(Badge {
            id: "early-bird".to_string(),
            title: "Early Bird".to_string(),
            description: "Handed in five assignments ahead of their due dates".to_string(),
            icon: "sunrise".to_string(),
            category: BadgeCategory::Punctuality,
            earned_at: now,
        });
    }

    // Subject slugs can collide ("Math!" and "Math?"); never emit the same
    // identifier twice within one computation.
    let mut seen = HashSet::new();
    badges.retain(|badge| seen.insert(badge.id.clone()));
    badges
}

/// Completed records handed in strictly before their due date.
fn early_submission_count(records: &[ResolvedRecord]) -> usize {
    records
        .iter()
        .filter(|record| record.status == ProgressStatus::Completed)
        .filter(|record| {
            record
                .submission
                .as_ref()
                .and_then(|sub| sub.submitted_at)
                .map_or(false, |at| at < record.assignment.due_at)
        })
        .count()
}

fn slug(subject: &str) -> String {
    subject
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
