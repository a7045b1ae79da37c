use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event, execute,
    style::ResetColor,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::sampler::TcpStatsSource;
use crate::tui::dashboard::Dashboard;
use crate::tui::draw::get_theme;
use crate::tui::state::{AppEvent, RenderState, INPUT_QUEUE_CAP};

const INPUT_POLL: Duration = Duration::from_millis(50);

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Take over the terminal, run the dashboard, and hand the terminal back.
///
/// The terminal is restored on every exit path that returns; the first
/// error (dashboard first, then restore) is reported.
pub async fn run_tui(config: Config) -> anyhow::Result<()> {
    let mut terminal = setup_terminal()?;

    let (tx, rx) = mpsc::channel::<AppEvent>(INPUT_QUEUE_CAP);
    spawn_interrupt_listener(tx.downgrade());
    spawn_input_reader(tx);

    let source = TcpStatsSource::new(config.address.clone(), config.timeout);
    let state = RenderState::new(config.address.clone(), config.interval);
    let mut dashboard = Dashboard::new(source, state, get_theme(config.theme));

    info!(address = %config.address, "dashboard started");
    let outcome = dashboard
        .run(&mut terminal, rx)
        .await
        .context("dashboard loop failed");
    if let Some(err) = &dashboard.state().error {
        warn!(error = %err, "last sample before exit failed");
    }
    info!(frames = dashboard.frames_drawn(), "dashboard stopped");

    let restored = restore_terminal(&mut terminal).context("failed to restore terminal");
    outcome.and(restored)
}

fn setup_terminal() -> anyhow::Result<CrosstermTerminal> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, ResetColor) {
        let _ = disable_raw_mode();
        return Err(e).context("failed to enter alternate screen");
    }
    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(t) => t,
        Err(e) => {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            return Err(e).context("failed to create terminal");
        }
    };
    let prepared = terminal.hide_cursor().and_then(|_| terminal.clear());
    if let Err(e) = prepared {
        let _ = restore_terminal(&mut terminal);
        return Err(e).context("failed to prepare terminal");
    }
    Ok(terminal)
}

fn restore_terminal(terminal: &mut CrosstermTerminal) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();
    raw.and(screen).and(cursor)
}

/// Blocking reader for crossterm events. Exits once the dashboard drops
/// its end of the queue or the terminal stops producing events.
fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    tokio::task::spawn_blocking(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(INPUT_POLL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                warn!(error = %e, "terminal poll failed, input reader stopping");
                break;
            }
        }
        match event::read() {
            Ok(evt) => {
                if tx.blocking_send(AppEvent::Input(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "terminal read failed, input reader stopping");
                break;
            }
        }
    });
}

/// Forward SIGINT into the queue. Only a weak handle is held, so once the
/// input reader is gone the queue closes and the dashboard stops.
fn spawn_interrupt_listener(tx: mpsc::WeakSender<AppEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                debug!("interrupt received");
                if let Some(tx) = tx.upgrade() {
                    let _ = tx.send(AppEvent::Interrupt).await;
                }
            }
            Err(e) => warn!(error = %e, "could not listen for interrupt"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queue_closes_when_reader_sender_drops() {
        let (tx, mut rx) = mpsc::channel::<AppEvent>(INPUT_QUEUE_CAP);
        let listener = spawn_interrupt_listener(tx.downgrade());

        tx.send(AppEvent::Interrupt).await.unwrap();
        drop(tx);

        assert!(matches!(rx.recv().await, Some(AppEvent::Interrupt)));
        let closed = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
        assert!(matches!(closed, Ok(None)), "queue stayed open: {closed:?}");
        listener.abort();
    }
}
