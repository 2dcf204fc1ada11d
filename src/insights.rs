use crate::models::{GroupStats, StreakResult};

/// Advisory text picked from fixed threshold tiers. Never fails and never
/// touches stored state.
pub fn generate(overall: &GroupStats, streaks: &StreakResult, upcoming_count: usize) -> Vec<String> {
    if overall.total == 0 {
        return vec![
            "No assignments yet. Your progress will show up here once homework is assigned."
                .to_string(),
        ];
    }

    let mut messages = Vec::new();

    messages.push(
        match overall.completion_rate {
            95..=100 => "Outstanding! You are completing nearly every assignment.",
            85..=94 => "Great work! You are keeping up with almost all of your homework.",
            70..=84 => "Good progress. A little extra focus will lift your completion rate.",
            _ => "Quite a few assignments are slipping past. Try planning your week around the due dates.",
        }
        .to_string(),
    );

    // Punctuality only means something once at least one hand-in exists.
    if overall.completed + overall.late > 0 {
        if overall.on_time_rate >= 90 {
            messages.push("You almost always hand work in on time. Keep it up!".to_string());
        } else if overall.on_time_rate < 70 {
            messages.push(
                "Several submissions arrived late. Starting a day earlier usually fixes this."
                    .to_string(),
            );
        }
    }

    if upcoming_count > 0 {
        let plural = if upcoming_count == 1 { "" } else { "s" };
        messages.push(format!(
            "You have {upcoming_count} upcoming deadline{plural}. Check the due dates so nothing sneaks up on you."
        ));
    }

    if streaks.current_streak >= 5 {
        messages.push(format!(
            "{} on-time completions in a row. Impressive streak!",
            streaks.current_streak
        ));
    } else if streaks.current_streak >= 2 {
        messages.push(format!(
            "You are {} in a row. Keep the streak alive!",
            streaks.current_streak
        ));
    }

    messages
}
