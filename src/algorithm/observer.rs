//! Placement and completion notifications
//!
//! Observers receive one event per resolved footprint, in scan order, and a final event
//! once the scan completes. They are borrowed mutably for the whole solve, so they can
//! record but never reach back into the engine.

use crate::catalog::Possibility;
use crate::spatial::GridPosition;

/// Receiver of synthesis notifications
pub trait SynthesisObserver {
    /// A possibility was observed at `position`, the root cell of its footprint
    fn on_place_tile(&mut self, position: GridPosition, possibility: Possibility) {
        let _ = (position, possibility);
    }

    /// The scan completed without a contradiction
    fn on_finish(&mut self) {}
}

/// Observer that ignores every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SynthesisObserver for NoopObserver {}

/// One notification raised by the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SynthesisEvent {
    /// A footprint was resolved
    Placed {
        /// Root cell of the footprint
        position: GridPosition,
        /// The chosen possibility
        possibility: Possibility,
    },
    /// The scan completed
    Finished,
}

/// Observer that keeps every event in order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementLog {
    events: Vec<SynthesisEvent>,
}

impl PlacementLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far
    pub fn events(&self) -> &[SynthesisEvent] {
        &self.events
    }

    /// Placement events only, as `(position, possibility)` pairs
    pub fn placements(&self) -> impl Iterator<Item = (GridPosition, Possibility)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            SynthesisEvent::Placed {
                position,
                possibility,
            } => Some((position, possibility)),
            SynthesisEvent::Finished => None,
        })
    }

    /// Whether the finish event arrived
    pub fn is_finished(&self) -> bool {
        self.events.last() == Some(&SynthesisEvent::Finished)
    }
}

impl SynthesisObserver for PlacementLog {
    fn on_place_tile(&mut self, position: GridPosition, possibility: Possibility) {
        self.events.push(SynthesisEvent::Placed {
            position,
            possibility,
        });
    }

    fn on_finish(&mut self) {
        self.events.push(SynthesisEvent::Finished);
    }
}
