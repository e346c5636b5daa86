//! The single entry point for session-state mutation. One handler module
//! per action group; the UI layer never touches state directly.

mod device;
mod filter;
mod round;

use etude_types::{Action, DispatchResult, Phase, SessionState};

use crate::config::PracticeSettings;

/// Dispatch an action against the session. Returns deferred work (the
/// feedback-delay advance) and status messages for the UI layer to act on.
pub fn dispatch_action(
    action: &Action,
    state: &mut SessionState,
    settings: &PracticeSettings,
    rng: &mut u64,
) -> DispatchResult {
    match action {
        Action::Device(a) => device::dispatch_device(a, state, settings, rng),
        Action::Round(a) => round::dispatch_round(a, state, settings, rng),
        Action::Filter(a) => filter::dispatch_filter(a, state),
        Action::EndSession => {
            if state.phase == Phase::DeviceSelected {
                state.phase = Phase::SessionEnded;
                log::info!(
                    "session ended: {}/{} correct",
                    state.success_count,
                    state.total_count
                );
            }
            DispatchResult::none()
        }
    }
}
