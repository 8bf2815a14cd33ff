//! Completion arithmetic for lessons, topics, tracks, modelling modules and weekly goals.

use crate::StudyError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Weekly interactions goal used when a profile has none set.
pub const DEFAULT_WEEKLY_INTERACTIONS_GOAL: u32 = 10;
/// Weekly flashcards goal used when a profile has none set.
pub const DEFAULT_WEEKLY_FLASHCARDS_GOAL: u32 = 20;

/// Per-user status of a single lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    /// Never opened.
    #[default]
    NotStarted,
    /// Opened but not marked complete.
    InProgress,
    /// Marked complete.
    Complete,
}

impl FromStr for LessonStatus {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            other => Err(StudyError::InvalidLessonStatus(other.to_string())),
        }
    }
}

/// Percentage of `completed` over `total`, rounded half up. Zero when `total` is zero.
///
/// ```
/// use offerready_study::progress::completion_percentage;
///
/// assert_eq!(completion_percentage(1, 3), 33);
/// assert_eq!(completion_percentage(1, 8), 13);
/// assert_eq!(completion_percentage(0, 0), 0);
/// ```
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = completed as u64;
    let total = total as u64;
    // floor(completed * 100 / total + 0.5) without floating point
    ((completed * 200 + total) / (total * 2)) as u32
}

/// Share of a weekly goal reached, capped at 100 and not rounded. Zero when `goal` is zero.
pub fn goal_percentage(count: u32, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (f64::from(count) / f64::from(goal) * 100.0).min(100.0)
}

/// Completed/total counts with the derived percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Completed items.
    pub completed: usize,
    /// All items.
    pub total: usize,
    /// `completion_percentage(completed, total)`.
    pub percentage: u32,
}

impl Progress {
    /// Creates progress from raw counts.
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percentage: completion_percentage(completed, total),
        }
    }

    /// Counts lessons in `statuses`, treating only [`LessonStatus::Complete`] as done.
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = LessonStatus>,
    {
        let (completed, total) = statuses
            .into_iter()
            .fold((0, 0), |(done, all), status| {
                (done + usize::from(status == LessonStatus::Complete), all + 1)
            });
        Self::new(completed, total)
    }

    /// Counts modelling steps from their completion flags.
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let (completed, total) = flags
            .into_iter()
            .fold((0, 0), |(done, all), flag| (done + usize::from(flag), all + 1));
        Self::new(completed, total)
    }

    /// Rolls several progress values into one, e.g. topics into a track. The percentage is
    /// recomputed from the summed counts rather than averaged.
    pub fn combine<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Progress>,
    {
        let (completed, total) = parts
            .into_iter()
            .fold((0, 0), |(done, all), part| (done + part.completed, all + part.total));
        Self::new(completed, total)
    }

    /// True when every item is complete and there is at least one item.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}

/// A user's weekly activity targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyGoals {
    /// Networking interactions per week.
    pub interactions: u32,
    /// Flashcards studied per week.
    pub flashcards: u32,
}

impl WeeklyGoals {
    /// Builds goals from optional profile values; missing or zero values use the defaults.
    pub fn from_profile(interactions: Option<u32>, flashcards: Option<u32>) -> Self {
        Self {
            interactions: interactions
                .filter(|goal| *goal > 0)
                .unwrap_or(DEFAULT_WEEKLY_INTERACTIONS_GOAL),
            flashcards: flashcards
                .filter(|goal| *goal > 0)
                .unwrap_or(DEFAULT_WEEKLY_FLASHCARDS_GOAL),
        }
    }

    /// Progress towards both goals given this week's counts.
    pub fn measure(&self, interactions: u32, flashcards: u32) -> WeeklyProgress {
        WeeklyProgress {
            interactions: GoalProgress::new(interactions, self.interactions),
            flashcards: GoalProgress::new(flashcards, self.flashcards),
        }
    }
}

impl Default for WeeklyGoals {
    fn default() -> Self {
        Self::from_profile(None, None)
    }
}

/// Current count against one goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Count this week.
    pub current: u32,
    /// Target count.
    pub goal: u32,
    /// `goal_percentage(current, goal)`.
    pub percentage: f64,
}

impl GoalProgress {
    fn new(current: u32, goal: u32) -> Self {
        Self {
            current,
            goal,
            percentage: goal_percentage(current, goal),
        }
    }
}

/// Weekly progress for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    /// Networking interactions.
    pub interactions: GoalProgress,
    /// Flashcards studied.
    pub flashcards: GoalProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(completion_percentage(1, 2), 50);
        assert_eq!(completion_percentage(1, 200), 1);
        assert_eq!(completion_percentage(1, 201), 0);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(3, 3), 100);
    }

    #[test]
    fn goal_percentage_is_capped_and_unrounded() {
        assert_eq!(goal_percentage(5, 10), 50.0);
        assert!((goal_percentage(1, 3) - 33.333).abs() < 0.001);
        assert_eq!(goal_percentage(30, 20), 100.0);
        assert_eq!(goal_percentage(3, 0), 0.0);
    }

    #[test]
    fn lesson_statuses_count_only_complete() {
        let progress = Progress::from_statuses([
            LessonStatus::Complete,
            LessonStatus::InProgress,
            LessonStatus::NotStarted,
            LessonStatus::Complete,
        ]);
        assert_eq!(progress, Progress::new(2, 4));
        assert_eq!(progress.percentage, 50);
    }

    #[test]
    fn track_rollup_recomputes_from_counts() {
        let topics = [Progress::new(1, 3), Progress::new(0, 1)];
        let track = Progress::combine(topics);
        assert_eq!(track.completed, 1);
        assert_eq!(track.total, 4);
        assert_eq!(track.percentage, 25);
    }

    #[test]
    fn empty_progress_is_zero_and_incomplete() {
        let progress = Progress::from_flags(std::iter::empty());
        assert_eq!(progress.percentage, 0);
        assert!(!progress.is_complete());
        assert!(Progress::from_flags([true, true]).is_complete());
    }

    #[test]
    fn parses_lesson_status() {
        assert_eq!("in_progress".parse::<LessonStatus>(), Ok(LessonStatus::InProgress));
        assert_eq!(
            "done".parse::<LessonStatus>(),
            Err(StudyError::InvalidLessonStatus("done".to_string()))
        );
    }

    #[test]
    fn weekly_goals_default_when_missing_or_zero() {
        let goals = WeeklyGoals::from_profile(Some(0), None);
        assert_eq!(goals.interactions, DEFAULT_WEEKLY_INTERACTIONS_GOAL);
        assert_eq!(goals.flashcards, DEFAULT_WEEKLY_FLASHCARDS_GOAL);

        let weekly = WeeklyGoals::from_profile(Some(4), Some(8)).measure(2, 10);
        assert_eq!(weekly.interactions.percentage, 50.0);
        assert_eq!(weekly.flashcards.percentage, 100.0);
    }
}
