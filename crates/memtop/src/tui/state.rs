use std::sync::Arc;
use std::time::Duration;

use crossterm::event::Event;

use common::{RateTable, Snapshot};

use crate::sampler::SampleError;

/// Capacity of the queue between the input reader and the dashboard loop.
pub const INPUT_QUEUE_CAP: usize = 8;

#[derive(Clone, Debug)]
pub enum AppEvent {
    /// Raw terminal event (key, resize, mouse, ...).
    Input(Event),
    /// Process interrupt signal.
    Interrupt,
}

/// Everything the renderer needs for one frame.
#[derive(Debug)]
pub struct RenderState {
    pub address: String,
    pub interval: Duration,
    pub latest: Option<Arc<Snapshot>>,
    pub rates: RateTable,
    pub error: Option<SampleError>,
}

impl RenderState {
    pub fn new(address: impl Into<String>, interval: Duration) -> Self {
        Self {
            address: address.into(),
            interval,
            latest: None,
            rates: RateTable::default(),
            error: None,
        }
    }
}
