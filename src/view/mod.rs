mod pagination;
mod render;
mod state;

#[cfg(test)]
pub use pagination::page_buttons;
pub use pagination::{PageButton, PAGE_COUNT};
pub use render::{Screen, TaskCard};
pub use state::{ViewChange, ViewState, DEFAULT_PAGE_SIZE};
