//! Practice-session state: phase machine, scoring, round timer fields.

use serde::{Deserialize, Serialize};

use crate::chord::Chord;
use crate::filters::Filters;
use crate::key::{Clef, KeySignature};
use crate::pitch::Pitch;

/// Lifecycle phase of a practice session. No transition leaves
/// `SessionEnded`; a fresh session is constructed to practice again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// MIDI backend not yet available.
    Waiting,
    /// Backend up, user is picking an input device.
    SelectingDevice,
    /// Active round loop.
    DeviceSelected,
    /// Frozen; counters retained for display.
    SessionEnded,
}

/// Mutable session state. Created once per practice visit; all mutation
/// flows through the dispatch layer in `etude-core`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    /// Name of the chosen input port, `None` until selected.
    pub device_id: Option<String>,
    /// Port names from the last scan, for the selection list.
    pub ports: Vec<String>,

    pub active_chord: Option<Chord>,
    pub active_key: KeySignature,
    pub active_clef: Clef,
    /// Raw pitches received this round, respelled for display, in arrival
    /// order. Cleared at the start of each round.
    pub played_notes: Vec<Pitch>,

    pub success_count: u32,
    pub total_count: u32,

    /// While locked, note-ons are still recorded for display but do not
    /// trigger evaluation (the post-answer feedback window).
    pub input_locked: bool,
    /// Elapsed time of the round in progress.
    pub elapsed_ms: u64,
    /// Running mean duration of completed rounds.
    pub mean_ms: f64,
    /// Bumped on every round change; deferred round-advance callbacks
    /// carry the generation they were scheduled under and are dropped on
    /// mismatch.
    pub round_generation: u64,

    pub filters: Filters,
    /// Outcome text for the feedback window.
    pub feedback: Option<String>,
    /// Last device-layer failure, surfaced while `Waiting`.
    pub last_error: Option<String>,
}

impl SessionState {
    pub fn new(filters: Filters) -> Self {
        Self {
            phase: Phase::Waiting,
            device_id: None,
            ports: Vec::new(),
            active_chord: None,
            active_key: KeySignature::C,
            active_clef: Clef::Treble,
            played_notes: Vec::new(),
            success_count: 0,
            total_count: 0,
            input_locked: false,
            elapsed_ms: 0,
            mean_ms: 0.0,
            round_generation: 0,
            filters,
            feedback: None,
            last_error: None,
        }
    }

    /// Install a freshly drawn round: clears played notes, unlocks input,
    /// resets the timer, and bumps the generation so any still-pending
    /// advance for the previous round becomes a no-op.
    pub fn install_round(&mut self, chord: Chord, key: KeySignature, clef: Clef) {
        self.active_chord = Some(chord);
        self.active_key = key;
        self.active_clef = clef;
        self.played_notes.clear();
        self.input_locked = false;
        self.elapsed_ms = 0;
        self.feedback = None;
        self.round_generation = self.round_generation.wrapping_add(1);
    }

    /// Record a completed round: bump counters and fold the round's
    /// elapsed time into the running mean. Counters only ever grow.
    pub fn record_round(&mut self, correct: bool) {
        self.total_count += 1;
        if correct {
            self.success_count += 1;
        }
        let n = self.total_count as f64;
        self.mean_ms += (self.elapsed_ms as f64 - self.mean_ms) / n;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Filters::default())
    }
}
