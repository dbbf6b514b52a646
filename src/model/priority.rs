use chrono::{DateTime, Local};
use std::fmt;

const HIGH_WINDOW_MINUTES: f64 = 2.0;
const MEDIUM_WINDOW_MINUTES: f64 = 3.0;

/// Urgency derived from the due date at render time. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Classifies by minutes left until `due`.
    ///
    /// Anything due within two minutes, overdue included, is High; up to three
    /// minutes is Medium. A missing or unreadable due date is Low.
    pub fn classify(due: Option<DateTime<Local>>, now: DateTime<Local>) -> Priority {
        let due = match due {
            Some(due) => due,
            None => return Priority::Low,
        };
        let diff_minutes = (due - now).num_milliseconds() as f64 / 60_000.0;
        if diff_minutes <= HIGH_WINDOW_MINUTES {
            Priority::High
        } else if diff_minutes <= MEDIUM_WINDOW_MINUTES {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
