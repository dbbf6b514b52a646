use crate::model::{Priority, Status};
use crate::store::ListQuery;

use super::pagination::PAGE_COUNT;

pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Client-side view state: the current page and the active filters.
///
/// Owned by the UI loop; flows receive a snapshot of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub current_page: u32,
    pub status_filter: Option<Status>,
    pub priority_filter: Option<Priority>,
    pub page_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChange {
    StatusFilter(Option<Status>),
    PriorityFilter(Option<Priority>),
    Page(u32),
}

impl ViewState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            status_filter: None,
            priority_filter: None,
            page_size,
        }
    }

    /// Applies a change and tells whether the page must be refetched.
    ///
    /// Filter changes always go back to page 1. Selecting the current page, or one
    /// outside the page buttons, is a no-op.
    pub fn apply(&mut self, change: ViewChange) -> bool {
        match change {
            ViewChange::StatusFilter(status) => {
                self.status_filter = status;
                self.current_page = 1;
                true
            }
            ViewChange::PriorityFilter(priority) => {
                self.priority_filter = priority;
                self.current_page = 1;
                true
            }
            ViewChange::Page(page) => {
                if page == self.current_page || !(1..=PAGE_COUNT).contains(&page) {
                    return false;
                }
                self.current_page = page;
                true
            }
        }
    }

    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.current_page,
            limit: self.page_size,
            status: self.status_filter,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
