// full-screen terminal ui

pub mod app;
pub mod overlay;
pub mod screens;
pub mod widgets;

use std::io;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result, bail};
use crossterm::{
    ExecutableCommand,
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, warn};

pub use app::{App, AppEvent};

use crate::config::ConfigStore;
use crate::generation::LlmClient;
use crate::theme::Theme;

/// restores the terminal when dropped, also on early return
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let guard = Self;
        io::stdout()
            .execute(EnterAlternateScreen)
            .context("failed to enter alternate screen")?;
        io::stdout().execute(EnableBracketedPaste)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = io::stdout().execute(DisableBracketedPaste);
        let _ = io::stdout().execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// blocking reader for the terminal; stops once the loop is gone
fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Paste(text)) => AppEvent::Paste(text),
                Ok(Event::Resize(width, height)) => AppEvent::Resize(width, height),
                Ok(_) => continue,
                Err(e) => {
                    let _ = tx.send(AppEvent::InputFailed(e.to_string()));
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    });
}

/// run the tui application until the user quits
pub async fn run(store: ConfigStore, theme: Theme, client: Arc<dyn LlmClient>) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("failed to start terminal")?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(store, theme);

    let size = terminal.size()?;
    app.dispatch(AppEvent::Resize(size.width, size.height));
    spawn_input_reader(tx.clone());
    info!("tui started");

    loop {
        terminal.draw(|frame| app.render(frame))?;

        let Some(event) = rx.recv().await else {
            break;
        };
        if let AppEvent::InputFailed(cause) = &event {
            bail!("terminal input failed: {cause}");
        }

        if let Some(request) = app.dispatch(event) {
            let client = Arc::clone(&client);
            let tx = tx.clone();
            debug!(dir = %request.project_dir.display(), "spawning generation");
            tokio::spawn(async move {
                let outcome = request.run(client.as_ref()).await;
                if tx.send(AppEvent::Generation(outcome)).is_err() {
                    warn!("generation finished after the ui closed");
                }
            });
        }

        if app.should_quit() {
            break;
        }
    }

    info!("tui stopped");
    Ok(())
}
