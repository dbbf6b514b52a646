use std::sync::Arc;

use crossterm::event::KeyCode;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing::error;

use crate::config::CHANNEL_SIZE;
use crate::controller::{TaskController, UserAction};
use crate::model::{Priority, Status, TaskId};
use crate::store::TaskStore;
use crate::view::{Screen, TaskCard, ViewChange, ViewState, PAGE_COUNT};

/// What the terminal loop has to do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
    CreateForm,
    EditForm(TaskId),
}

/// UI-side state: the view state, the last screen received and the selection.
pub struct App<S: TaskStore> {
    pub state: ViewState,
    pub screen: Option<Screen>,
    pub selected: usize,
    controller: Arc<TaskController<S>>,
    runtime: Handle,
    tx_screen: Sender<Screen>,
    rx_screen: Receiver<Screen>,
}

impl<S: TaskStore> App<S> {
    pub fn new(controller: Arc<TaskController<S>>, runtime: Handle, page_size: u32) -> Self {
        let (tx_screen, rx_screen) = mpsc::channel::<Screen>(CHANNEL_SIZE);
        Self {
            state: ViewState::new(page_size),
            screen: None,
            selected: 0,
            controller,
            runtime,
            tx_screen,
            rx_screen,
        }
    }

    /// Starts a flow for `action` against a snapshot of the current view state.
    ///
    /// Flows are never cancelled; whichever screen arrives last is shown.
    pub fn dispatch(&self, action: UserAction) {
        let controller = self.controller.clone();
        let tx_screen = self.tx_screen.clone();
        let state = self.state.clone();
        self.runtime.spawn(async move {
            if let Some(screen) = controller.run(action, state).await {
                if let Err(err) = tx_screen.send(screen).await {
                    error!(reason = %err, "Unable to deliver rendered screen.");
                }
            }
        });
    }

    /// Takes every screen delivered so far, keeping the latest.
    pub fn receive(&mut self) -> bool {
        let mut updated = false;
        while let Ok(screen) = self.rx_screen.try_recv() {
            self.install(screen);
            updated = true;
        }
        updated
    }

    fn install(&mut self, screen: Screen) {
        self.selected = self.selected.min(screen.cards.len().saturating_sub(1));
        self.screen = Some(screen);
    }

    pub fn selected_card(&self) -> Option<&TaskCard> {
        self.screen
            .as_ref()
            .and_then(|screen| screen.cards.get(self.selected))
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Control {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('a') => return Control::CreateForm,
            KeyCode::Char('e') => {
                if let Some(card) = self.selected_card() {
                    return Control::EditForm(card.id.clone());
                }
            }
            KeyCode::Char('d') => {
                if let Some(card) = self.selected_card() {
                    let id = card.id.clone();
                    self.dispatch(UserAction::Delete(id));
                }
            }
            KeyCode::Char('r') => self.dispatch(UserAction::Refresh),
            KeyCode::Char('s') => {
                let next = next_status(self.state.status_filter);
                self.change_view(ViewChange::StatusFilter(next));
            }
            KeyCode::Char('p') => {
                let next = next_priority(self.state.priority_filter);
                self.change_view(ViewChange::PriorityFilter(next));
            }
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(page) = c.to_digit(10) {
                    self.change_view(ViewChange::Page(page));
                }
            }
            KeyCode::Left => {
                let page = self.state.current_page.saturating_sub(1).max(1);
                self.change_view(ViewChange::Page(page));
            }
            KeyCode::Right => {
                let page = (self.state.current_page + 1).min(PAGE_COUNT);
                self.change_view(ViewChange::Page(page));
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                let cards = self.screen.as_ref().map_or(0, |s| s.cards.len());
                if self.selected + 1 < cards {
                    self.selected += 1;
                }
            }
            _ => {}
        }
        Control::Continue
    }

    fn change_view(&mut self, change: ViewChange) {
        if self.state.apply(change) {
            self.selected = 0;
            self.dispatch(UserAction::Refresh);
        }
    }
}

/// All, Open, In Progress, Closed, then back to All.
fn next_status(current: Option<Status>) -> Option<Status> {
    match current {
        None => Some(Status::Open),
        Some(Status::Open) => Some(Status::InProgress),
        Some(Status::InProgress) => Some(Status::Closed),
        Some(Status::Closed) => None,
    }
}

fn next_priority(current: Option<Priority>) -> Option<Priority> {
    match current {
        None => Some(Priority::High),
        Some(Priority::High) => Some(Priority::Medium),
        Some(Priority::Medium) => Some(Priority::Low),
        Some(Priority::Low) => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};

    use crate::model::NewTask;
    use crate::store::memory::MemoryTaskStore;

    use super::*;

    async fn seeded_app(titles: &[&str]) -> (App<MemoryTaskStore>, Arc<MemoryTaskStore>) {
        let store = Arc::new(MemoryTaskStore::new());
        let controller = Arc::new(TaskController::new(store.clone()));
        for title in titles {
            controller
                .run(
                    UserAction::Submit(NewTask::new(
                        *title,
                        "d",
                        Status::Open,
                        Local::now() + Duration::hours(1),
                    )),
                    ViewState::default(),
                )
                .await;
        }
        let app = App::new(controller, Handle::current(), 5);
        (app, store)
    }

    async fn next_screen(app: &mut App<MemoryTaskStore>) {
        let screen = app.rx_screen.recv().await.unwrap();
        app.install(screen);
    }

    #[tokio::test]
    async fn test_page_key_refetches_page() {
        let (mut app, store) = seeded_app(&[]).await;

        assert_eq!(app.handle_key(KeyCode::Char('3')), Control::Continue);
        next_screen(&mut app).await;

        assert_eq!(app.state.current_page, 3);
        assert_eq!(store.list_calls().last().unwrap().page, 3);
        let screen = app.screen.as_ref().unwrap();
        assert!(screen.pages[2].disabled);
    }

    #[tokio::test]
    async fn test_filter_keys_reset_page() {
        let (mut app, store) = seeded_app(&[]).await;
        app.handle_key(KeyCode::Char('4'));
        next_screen(&mut app).await;

        app.handle_key(KeyCode::Char('s'));
        next_screen(&mut app).await;
        assert_eq!(app.state.current_page, 1);
        assert_eq!(app.state.status_filter, Some(Status::Open));
        let last = *store.list_calls().last().unwrap();
        assert_eq!((last.page, last.status), (1, Some(Status::Open)));

        app.handle_key(KeyCode::Right);
        next_screen(&mut app).await;
        app.handle_key(KeyCode::Char('p'));
        next_screen(&mut app).await;
        assert_eq!(app.state.current_page, 1);
        assert_eq!(app.state.priority_filter, Some(Priority::High));
    }

    #[tokio::test]
    async fn test_current_page_key_is_ignored() {
        let (mut app, store) = seeded_app(&[]).await;
        let calls = store.list_calls().len();

        app.handle_key(KeyCode::Char('1'));
        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Char('9'));
        tokio::task::yield_now().await;

        assert_eq!(store.list_calls().len(), calls);
        assert_eq!(app.state.current_page, 1);
    }

    #[tokio::test]
    async fn test_delete_selected_without_confirmation() {
        let (mut app, store) = seeded_app(&["one", "two"]).await;
        app.handle_key(KeyCode::Char('r'));
        next_screen(&mut app).await;

        app.handle_key(KeyCode::Down);
        assert_eq!(app.selected_card().unwrap().title, "two");
        app.handle_key(KeyCode::Char('d'));
        next_screen(&mut app).await;

        assert_eq!(store.len(), 1);
        let titles: Vec<_> = app
            .screen
            .as_ref()
            .unwrap()
            .cards
            .iter()
            .map(|c| c.title.clone())
            .collect();
        assert_eq!(titles, vec!["one".to_string()]);
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn test_latest_screen_wins_and_selection_is_clamped() {
        // GIVEN five cards on page one, two on page two, the last card selected
        let (mut app, store) = seeded_app(&["a", "b", "c", "d", "e", "f", "g"]).await;
        app.handle_key(KeyCode::Char('r'));
        next_screen(&mut app).await;
        for _ in 0..4 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.selected, 4);

        // WHEN two flows finish before the UI looks at the channel
        let calls = store.list_calls().len();
        app.dispatch(UserAction::Refresh);
        app.state.apply(ViewChange::Page(2));
        app.dispatch(UserAction::Refresh);
        while store.list_calls().len() < calls + 2 {
            tokio::task::yield_now().await;
        }
        tokio::task::yield_now().await;

        // THEN only the last screen is kept
        assert!(app.receive());
        let screen = app.screen.as_ref().unwrap();
        assert_eq!(
            screen.cards.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
            vec!["f", "g"]
        );
        assert!(screen.pages[1].disabled);
        assert_eq!(app.selected, 1);
        assert!(!app.receive());
    }

    #[tokio::test]
    async fn test_edit_and_create_open_forms() {
        let (mut app, _store) = seeded_app(&["one"]).await;
        assert_eq!(app.handle_key(KeyCode::Char('e')), Control::Continue);

        app.handle_key(KeyCode::Char('r'));
        next_screen(&mut app).await;

        assert_eq!(
            app.handle_key(KeyCode::Char('e')),
            Control::EditForm(TaskId::from(1))
        );
        assert_eq!(app.handle_key(KeyCode::Char('a')), Control::CreateForm);
        assert_eq!(app.handle_key(KeyCode::Char('q')), Control::Quit);
    }

    #[test]
    fn test_filter_cycles() {
        let mut status = None;
        let mut seen = vec![];
        for _ in 0..4 {
            status = next_status(status);
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                Some(Status::Open),
                Some(Status::InProgress),
                Some(Status::Closed),
                None
            ]
        );
        assert_eq!(next_priority(Some(Priority::Low)), None);
    }
}
