use std::io;
use std::sync::Arc;

use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use common::{compute_rates, RateTable, Snapshot};

use crate::sampler::StatsSource;
use crate::tui::draw::{draw_dashboard, ThemeColors};
use crate::tui::events::{classify, Action};
use crate::tui::state::{AppEvent, RenderState};

/// Sampling/render loop for one server.
///
/// Owns the render state and the baseline snapshot; nothing else mutates
/// them. Every state change is followed by exactly one frame.
pub struct Dashboard<S> {
    source: S,
    theme: ThemeColors,
    state: RenderState,
    previous: Option<Arc<Snapshot>>,
    frames: u64,
}

impl<S: StatsSource> Dashboard<S> {
    pub fn new(source: S, state: RenderState, theme: ThemeColors) -> Self {
        Self {
            source,
            theme,
            state,
            previous: None,
            frames: 0,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    /// Run until a quit key, an interrupt, or the input queue closing.
    ///
    /// The first sample is taken one interval after entry; the initial frame
    /// is drawn immediately so the screen is never blank.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut events: mpsc::Receiver<AppEvent>,
    ) -> io::Result<()> {
        self.render(terminal)?;

        let period = self.state.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sample().await;
                    self.render(terminal)?;
                }
                evt = events.recv() => {
                    let Some(evt) = evt else {
                        info!("input stream closed, leaving dashboard");
                        break;
                    };
                    match classify(&evt) {
                        Action::Quit => {
                            info!(?evt, "quit requested");
                            break;
                        }
                        Action::ResetBaseline => {
                            self.reset_baseline();
                            self.render(terminal)?;
                        }
                        Action::Resize => {
                            terminal.autoresize()?;
                            terminal.clear()?;
                            self.render(terminal)?;
                        }
                        Action::Ignore => {}
                    }
                }
            }
        }
        Ok(())
    }

    /// Take one sample and fold it into the render state.
    ///
    /// On failure only the error changes; the last good snapshot and rates
    /// stay on screen.
    pub async fn sample(&mut self) {
        match self.source.sample().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.state.rates = compute_rates(Some(&*snapshot), self.previous.as_deref());
                self.state.error = None;
                self.previous = Some(Arc::clone(&snapshot));
                self.state.latest = Some(snapshot);
                debug!(
                    address = %self.state.address,
                    rates = self.state.rates.len(),
                    "sample ok"
                );
            }
            Err(err) => {
                warn!(address = %self.state.address, error = %err, "sample failed");
                self.state.error = Some(err);
            }
        }
    }

    /// Forget the baseline so rates restart from the next sample.
    pub fn reset_baseline(&mut self) {
        self.previous = None;
        self.state.rates = RateTable::default();
        debug!("rate baseline reset");
    }

    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let (state, theme) = (&self.state, &self.theme);
        terminal.draw(|f| draw_dashboard(f, state, theme))?;
        self.frames += 1;
        trace!(frame = self.frames, "frame drawn");
        Ok(())
    }
}
