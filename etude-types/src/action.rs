//! Actions dispatched against session state, and the dispatch result.

use crate::chord::ChordSet;
use crate::key::{Clef, KeySignature};
use crate::pitch::PitchId;

/// Everything that can mutate a session, grouped by concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Device(DeviceAction),
    Round(RoundAction),
    Filter(FilterAction),
    /// Freeze the session: scoring and timer stop, note processing is
    /// suppressed, final counters stay for display.
    EndSession,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceAction {
    /// The MIDI backend initialized. Primes the first round so content is
    /// ready the instant a device is chosen.
    Ready { ports: Vec<String> },
    /// Backend initialization failed; non-fatal, retried by rescanning.
    Failed { error: String },
    /// Re-enumerate ports while selecting.
    Rescan { ports: Vec<String> },
    /// User picked an input port; starts the first real round.
    Select { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundAction {
    /// A note-on arrived from the active device.
    NoteOn { note: PitchId },
    /// Periodic timer update; display only, no correctness logic.
    Tick { elapsed_ms: u64 },
    /// The feedback delay elapsed. Ignored unless `generation` still
    /// matches the session's round generation.
    Advance { generation: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    ToggleChordSet(ChordSet),
    ToggleKey(KeySignature),
    ToggleClef(Clef),
}

/// Work the caller must schedule after a dispatch returns. Dispatch itself
/// owns no timers; the UI loop turns these into deadlines and re-dispatches
/// when they fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Advance to the next round after the feedback delay.
    AdvanceRound { generation: u64, delay_ms: u64 },
}

/// Side effects of a dispatch, consumed by the UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub deferred: Vec<Deferred>,
    pub status: Vec<String>,
}

impl DispatchResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn push_deferred(&mut self, d: Deferred) {
        self.deferred.push(d);
    }

    pub fn push_status(&mut self, message: impl Into<String>) {
        self.status.push(message.into());
    }

    pub fn merge(&mut self, other: DispatchResult) {
        self.deferred.extend(other.deferred);
        self.status.extend(other.status);
    }
}
