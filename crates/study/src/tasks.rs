//! Follow-up tasks, including the automatic thank-you notes after completed calls.

use crate::calendar::{CallEvent, CallEventStatus};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How long after a completed call a thank-you task becomes due.
pub const THANK_YOU_DELAY: Duration = Duration::hours(12);

/// Where a task came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Generated after a completed call.
    ThankYou,
    /// Entered by the user.
    #[default]
    Manual,
}

/// A task row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Owner.
    pub user_id: String,
    /// Task title.
    pub title: String,
    /// Origin.
    pub task_type: TaskType,
    /// Call the task follows up on.
    pub call_event_id: Option<String>,
    /// Contact the task concerns.
    pub contact_id: Option<String>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
}

/// Builds thank-you tasks for completed calls last updated more than [`THANK_YOU_DELAY`]
/// before `now` that do not already have one. Tasks are due on `now`'s date.
pub fn thank_you_tasks(
    calls: &[CallEvent],
    existing_call_ids: &HashSet<String>,
    now: DateTime<Utc>,
) -> Vec<NewTask> {
    let cutoff = now - THANK_YOU_DELAY;
    let due_date = now.date_naive();

    let tasks: Vec<NewTask> = calls
        .iter()
        .filter(|call| call.status == CallEventStatus::Completed && call.updated_at < cutoff)
        .filter(|call| !existing_call_ids.contains(&call.id))
        .map(|call| {
            let contact_name = call
                .contact
                .as_ref()
                .map(|contact| contact.name.as_str())
                .filter(|name| !name.is_empty())
                .unwrap_or("your contact");
            NewTask {
                user_id: call.user_id.clone(),
                title: format!("Send thank you note to {contact_name}"),
                task_type: TaskType::ThankYou,
                call_event_id: Some(call.id.clone()),
                contact_id: call.contact_id.clone(),
                due_date: Some(due_date),
            }
        })
        .collect();

    log::debug!(
        "{} of {} calls need a thank-you task",
        tasks.len(),
        calls.len()
    );
    tasks
}

/// Urgency of a task relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueState {
    /// No due date.
    Unscheduled,
    /// Due before today.
    Overdue,
    /// Due today.
    Today,
    /// Due after today.
    Upcoming,
}

impl DueState {
    /// Classifies `due_date` against `today`.
    pub fn classify(due_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        match due_date {
            None => DueState::Unscheduled,
            Some(date) if date < today => DueState::Overdue,
            Some(date) if date == today => DueState::Today,
            Some(_) => DueState::Upcoming,
        }
    }
}

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task id.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Origin.
    #[serde(default)]
    pub task_type: TaskType,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
}

/// Tasks split by origin and completion, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskBoard<'a> {
    /// Open thank-you tasks.
    pub pending_thank_you: Vec<&'a Task>,
    /// Done thank-you tasks.
    pub completed_thank_you: Vec<&'a Task>,
    /// Open manual tasks.
    pub pending_manual: Vec<&'a Task>,
    /// Done manual tasks.
    pub completed_manual: Vec<&'a Task>,
}

impl<'a> TaskBoard<'a> {
    /// Sorts tasks into the four lists.
    pub fn partition(tasks: &'a [Task]) -> Self {
        let mut board = Self::default();
        for task in tasks {
            let list = match (task.task_type, task.completed) {
                (TaskType::ThankYou, false) => &mut board.pending_thank_you,
                (TaskType::ThankYou, true) => &mut board.completed_thank_you,
                (TaskType::Manual, false) => &mut board.pending_manual,
                (TaskType::Manual, true) => &mut board.completed_manual,
            };
            list.push(task);
        }
        board
    }
}
