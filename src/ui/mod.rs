mod app;
mod draw;
mod prompt;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::runtime::Handle;
use tracing::{info, warn};

use crate::controller::{TaskController, UserAction};
use crate::store::TaskStore;

use app::{App, Control};

const TICK: Duration = Duration::from_millis(100);

pub fn start<S: TaskStore>(
    controller: TaskController<S>,
    runtime: Handle,
    page_size: u32,
) -> anyhow::Result<()> {
    enable_raw_mode().context("unable to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Arc::new(controller), runtime, page_size);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("terminal loop failed")
}

fn run_app<B: Backend, S: TaskStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    info!("Starting UI loop...");
    app.dispatch(UserAction::Refresh);
    loop {
        app.receive();
        terminal.draw(|f| draw::draw(f, &app.state, app.screen.as_ref(), app.selected))?;

        if !event::poll(TICK)? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };
        match app.handle_key(key.code) {
            Control::Continue => {}
            Control::Quit => {
                info!("Finishing UI loop...");
                return Ok(());
            }
            Control::CreateForm => {
                match suspended(terminal, |input, output| prompt::create_form(input, output))? {
                    Some(draft) => app.dispatch(UserAction::Submit(draft)),
                    None => warn!("Task creation cancelled."),
                }
            }
            Control::EditForm(id) => {
                let patch = suspended(terminal, |input, output| prompt::edit_form(input, output))?;
                app.dispatch(UserAction::Edit(id, patch));
            }
        }
    }
}

/// Hands the terminal back to line mode for the duration of `form`.
fn suspended<B: Backend, T>(
    terminal: &mut Terminal<B>,
    form: impl FnOnce(&mut io::StdinLock<'static>, &mut io::Stdout) -> io::Result<T>,
) -> io::Result<T> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    let result = form(&mut io::stdin().lock(), &mut io::stdout());

    execute!(io::stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    terminal.clear()?;
    result
}
