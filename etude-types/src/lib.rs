//! # etude-types
//!
//! Shared type definitions for the etude chord trainer: pitch spelling and
//! enharmonic normalization, the chord catalogue, user filters, chord
//! matching, and session state. Pure data and pure functions — the engine
//! that drives them lives in `etude-core`.

pub mod action;
pub mod chord;
pub mod evaluate;
pub mod filters;
pub mod key;
pub mod pitch;
pub mod session;

pub use action::{Action, Deferred, DeviceAction, DispatchResult, FilterAction, RoundAction};
pub use chord::{Chord, ChordSet};
pub use evaluate::{evaluate, MatchOutcome};
pub use filters::Filters;
pub use key::{Clef, KeySignature};
pub use pitch::{Accidental, Letter, Pitch, PitchId, Spelling};
pub use session::{Phase, SessionState};
