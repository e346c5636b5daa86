//! # etude-core
//!
//! Backend library for the etude chord trainer. Owns the practice engine:
//! round selection, note evaluation, MIDI input, and configuration —
//! independent of any UI framework.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use etude_core::config::Config;
//! use etude_core::dispatch::dispatch_action;
//! use etude_core::midi::MidiInputManager;
//! use etude_types::{Action, DeviceAction, SessionState};
//!
//! // 1. Load config (embedded defaults + user override) and create state
//! let config = Config::load();
//! let settings = config.settings();
//! let mut state = SessionState::new(config.filters());
//! let mut rng: u64 = 0x9E3779B97F4A7C15;
//!
//! // 2. Bring up MIDI and report the outcome as an action
//! let mut midi = MidiInputManager::new();
//! midi.refresh_ports();
//!
//! // 3. Dispatch actions to mutate state; act on the DispatchResult
//! //    (deferred round advances, status messages) in the UI layer
//! let action = Action::Device(DeviceAction::Ready {
//!     ports: midi.list_ports().iter().map(|p| p.name.clone()).collect(),
//! });
//! let result = dispatch_action(&action, &mut state, &settings, &mut rng);
//! ```
//!
//! ## Module Overview
//!
//! - [`dispatch`] — `dispatch_action()` — the single entry point for
//!   session-state mutation
//! - [`selector`] — random round selection honoring the session filters
//! - [`respell`] — enharmonic re-spelling of played notes toward the
//!   active chord
//! - [`transpose`] — chromatic transposition, spelling-preserving for
//!   whole octaves
//! - [`midi`] — `MidiInputManager`: port enumeration, connection, polled
//!   note events over an MPSC channel
//! - [`config`] — TOML configuration loading (embedded + user override)

pub mod config;
pub mod dispatch;
pub mod midi;
pub mod respell;
pub mod selector;
pub mod transpose;
