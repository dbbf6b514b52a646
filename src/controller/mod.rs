mod action;

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, error, info_span, Instrument};

use crate::model::CorrelationId;
use crate::store::TaskStore;
use crate::view::{Screen, ViewState};

pub use action::UserAction;

/// Runs the request/response cycle: optional mutation, then fetch and render.
pub struct TaskController<S>
where
    S: TaskStore,
{
    store: Arc<S>,
}

impl<S> TaskController<S>
where
    S: TaskStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Performs `action` and renders the page described by `state`.
    ///
    /// A failed mutation is logged and the page is fetched anyway. Returns `None`
    /// when the fetch fails, in which case the previous screen stays up.
    pub async fn run(&self, action: UserAction, state: ViewState) -> Option<Screen> {
        let cid = CorrelationId::new();
        let span = info_span!("flow", cid = %cid, action = action.name());
        async move {
            self.mutate(&cid, action).await;
            self.refresh(&cid, &state).await
        }
        .instrument(span)
        .await
    }

    async fn mutate(&self, cid: &CorrelationId, action: UserAction) {
        let result = match &action {
            UserAction::Submit(draft) => self.store.create_task(cid, draft).await,
            UserAction::Edit(id, patch) => self.store.update_task(cid, id, patch).await,
            UserAction::Delete(id) => self.store.delete_task(cid, id).await,
            UserAction::Refresh => return,
        };
        if let Err(err) = result {
            error!(reason = %err, action = action.name(), "Unable to apply task change.");
        }
    }

    async fn refresh(&self, cid: &CorrelationId, state: &ViewState) -> Option<Screen> {
        match self.store.list_tasks(cid, &state.query()).await {
            Ok(tasks) => {
                let screen = Screen::render(&tasks, state, Local::now());
                debug!(
                    page = state.current_page,
                    fetched = tasks.len(),
                    rendered = screen.cards.len(),
                    "page rendered"
                );
                Some(screen)
            }
            Err(err) => {
                error!(reason = %err, page = state.current_page, "Unable to fetch tasks.");
                None
            }
        }
    }
}
