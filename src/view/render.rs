use chrono::{DateTime, Local};

use crate::model::{Priority, Task, TaskId};

use super::pagination::{page_buttons, PageButton};
use super::state::ViewState;

const DUE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
const INVALID_DATE: &str = "Invalid Date";

/// One rendered task. Edit and delete are addressed through `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub due: String,
    pub priority: Priority,
}

impl TaskCard {
    pub fn new(task: &Task, priority: Priority) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.text(),
            description: task.description.text(),
            status: task.status.text(),
            due: task
                .due()
                .map(|due| due.format(DUE_FORMAT).to_string())
                .unwrap_or_else(|| INVALID_DATE.to_string()),
            priority,
        }
    }
}

/// Everything a refresh produces: the cards of the page and the page row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub cards: Vec<TaskCard>,
    pub pages: Vec<PageButton>,
}

impl Screen {
    pub fn render(tasks: &[Task], state: &ViewState, now: DateTime<Local>) -> Self {
        Self {
            cards: render_cards(tasks, state, now),
            pages: page_buttons(state),
        }
    }
}

/// Turns a fetched page into cards, dropping those the priority filter excludes.
///
/// Filtering happens after pagination, so a page can come out short or empty.
pub fn render_cards(tasks: &[Task], state: &ViewState, now: DateTime<Local>) -> Vec<TaskCard> {
    tasks
        .iter()
        .take(state.page_size as usize)
        .filter_map(|task| {
            let priority = Priority::classify(task.due(), now);
            match state.priority_filter {
                Some(wanted) if wanted != priority => None,
                _ => Some(TaskCard::new(task, priority)),
            }
        })
        .collect()
}
