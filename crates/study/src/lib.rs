#![deny(missing_docs)]
//! Study and networking bookkeeping for OfferReady: lesson progress, flashcard mastery,
//! drill sessions, mock interview scoring, calendar events and follow-up tasks.
//!
//! Everything here works on records the host has already fetched. Nothing performs I/O.

/// Calendar presentation of call events.
pub mod calendar;
/// Quick Drill navigation.
pub mod drill_session;
mod error;
/// Flashcard mastery and review scheduling.
pub mod flashcards;
/// Mock interview scoring and question rotation.
pub mod interview;
/// Completion percentages and weekly goals.
pub mod progress;
/// Follow-up task generation.
pub mod tasks;

pub use calendar::{CalendarEvent, CallEvent, CallEventStatus, ContactSummary, to_calendar_events};
pub use drill_session::DrillSession;
pub use error::StudyError;
pub use flashcards::{
    Confidence, DeckStats, Difficulty, Flashcard, FlashcardProgress, MasterySummary, due_cards,
    mastery_by_difficulty, studied_between, week_bounds,
};
pub use interview::{
    CountdownUrgency, InterviewAnswer, ScoreBreakdown, ScoreTier, SessionSummary, average_score,
    format_countdown, next_question, opening_question,
};
pub use progress::{
    GoalProgress, LessonStatus, Progress, WeeklyGoals, WeeklyProgress, completion_percentage,
    goal_percentage,
};
pub use tasks::{DueState, NewTask, THANK_YOU_DELAY, Task, TaskBoard, TaskType, thank_you_tasks};
