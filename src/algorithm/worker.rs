//! Background solving
//!
//! The engine moves onto its own thread and its notifications come back over a
//! channel, so the caller handles them on its own thread at its own pace.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryIter};

use crate::algorithm::executor::ModelSynthesis;
use crate::algorithm::observer::{SynthesisEvent, SynthesisObserver};
use crate::catalog::Possibility;
use crate::io::error::{Result, SynthesisError};
use crate::spatial::GridPosition;

/// Observer that forwards every notification into a channel
#[derive(Clone, Debug)]
pub struct ChannelObserver {
    sender: Sender<SynthesisEvent>,
}

impl ChannelObserver {
    /// Forward events into `sender`
    pub const fn new(sender: Sender<SynthesisEvent>) -> Self {
        Self { sender }
    }
}

impl SynthesisObserver for ChannelObserver {
    fn on_place_tile(&mut self, position: GridPosition, possibility: Possibility) {
        // The receiver may have been dropped; the solve carries on regardless
        let _ = self.sender.send(SynthesisEvent::Placed {
            position,
            possibility,
        });
    }

    fn on_finish(&mut self) {
        let _ = self.sender.send(SynthesisEvent::Finished);
    }
}

/// A solve running on a background thread
#[derive(Debug)]
pub struct SynthesisHandle {
    events: Receiver<SynthesisEvent>,
    thread: JoinHandle<Result<ModelSynthesis>>,
}

impl SynthesisHandle {
    /// Channel carrying placement and finish events in engine order
    pub const fn events(&self) -> &Receiver<SynthesisEvent> {
        &self.events
    }

    /// Events that have arrived so far, without blocking
    pub fn drain(&self) -> TryIter<'_, SynthesisEvent> {
        self.events.try_iter()
    }

    /// Whether the solver thread has ended
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the solve and take the engine back
    ///
    /// Events not yet received stay readable only until the handle is consumed, so
    /// drain them first if they matter.
    ///
    /// # Errors
    ///
    /// Returns the solve's own error, or [`SynthesisError::Worker`] if the thread
    /// panicked.
    pub fn join(self) -> Result<ModelSynthesis> {
        self.thread.join().map_err(|panic| SynthesisError::Worker {
            reason: panic_message(panic.as_ref()),
        })?
    }

    /// Wait for the solve, collecting every event it raised
    ///
    /// # Errors
    ///
    /// See [`join`](Self::join).
    pub fn join_with_events(self) -> Result<(ModelSynthesis, Vec<SynthesisEvent>)> {
        let Self { events, thread } = self;
        // The sender lives in the solver thread, so this ends when the solve does
        let collected: Vec<SynthesisEvent> = events.iter().collect();
        let engine = thread.join().map_err(|panic| SynthesisError::Worker {
            reason: panic_message(panic.as_ref()),
        })??;
        Ok((engine, collected))
    }
}

/// Run `engine` to completion on a new thread
///
/// # Errors
///
/// Returns [`SynthesisError::Worker`] if the thread cannot be spawned.
pub fn spawn_synthesis(mut engine: ModelSynthesis) -> Result<SynthesisHandle> {
    let (sender, events) = crossbeam_channel::unbounded();
    let thread = thread::Builder::new()
        .name("synthesis".into())
        .spawn(move || {
            let mut observer = ChannelObserver::new(sender);
            engine.synthesize_with(&mut observer).map(|()| engine)
        })
        .map_err(|error| SynthesisError::Worker {
            reason: error.to_string(),
        })?;
    Ok(SynthesisHandle { events, thread })
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "solver thread panicked".to_string())
}
