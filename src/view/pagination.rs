use super::state::ViewState;

/// The store reports no total count, so the page row is fixed.
pub const PAGE_COUNT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub page: u32,
    pub disabled: bool,
}

pub fn page_buttons(state: &ViewState) -> Vec<PageButton> {
    (1..=PAGE_COUNT)
        .map(|page| PageButton {
            page,
            disabled: page == state.current_page,
        })
        .collect()
}
