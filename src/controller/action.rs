use crate::model::{NewTask, TaskId, TaskPatch};

/// What a user flow asks of the store before the page is fetched again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Submit(NewTask),
    Edit(TaskId, TaskPatch),
    Delete(TaskId),
    Refresh,
}

impl UserAction {
    pub fn name(&self) -> &'static str {
        match self {
            UserAction::Submit(_) => "submit",
            UserAction::Edit(..) => "edit",
            UserAction::Delete(_) => "delete",
            UserAction::Refresh => "refresh",
        }
    }
}
