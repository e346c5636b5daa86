use etude_types::{DeviceAction, DispatchResult, Phase, SessionState};

use crate::config::PracticeSettings;
use crate::selector;

pub(super) fn dispatch_device(
    action: &DeviceAction,
    state: &mut SessionState,
    settings: &PracticeSettings,
    rng: &mut u64,
) -> DispatchResult {
    let mut result = DispatchResult::none();

    match action {
        DeviceAction::Ready { ports } => {
            if state.phase != Phase::Waiting {
                return result;
            }
            state.ports = ports.clone();
            state.last_error = None;
            state.phase = Phase::SelectingDevice;
            log::info!("MIDI ready, {} input port(s)", state.ports.len());

            // Prime a round now so content is on screen the instant a
            // device is chosen.
            match selector::next_round(&state.filters, settings.bass_octave_drop, rng) {
                Ok(round) => state.install_round(round.chord, round.key, round.clef),
                Err(e) => {
                    log::error!("selector: {}", e);
                    result.push_status(format!("No eligible content: {}", e));
                }
            }
        }
        DeviceAction::Failed { error } => {
            // Non-fatal: stay in Waiting, user retries by rescanning.
            log::warn!("MIDI backend unavailable: {}", error);
            state.last_error = Some(error.clone());
            result.push_status(format!("MIDI unavailable: {}", error));
        }
        DeviceAction::Rescan { ports } => {
            if state.phase != Phase::SelectingDevice {
                return result;
            }
            state.ports = ports.clone();
            result.push_status(format!("Found {} device(s)", state.ports.len()));
        }
        DeviceAction::Select { name } => {
            if state.phase != Phase::SelectingDevice {
                return result;
            }
            state.device_id = Some(name.clone());
            state.phase = Phase::DeviceSelected;
            log::info!("practicing with device {:?}", name);

            // First real round: fresh chord, cleared notes, timer running.
            match selector::next_round(&state.filters, settings.bass_octave_drop, rng) {
                Ok(round) => state.install_round(round.chord, round.key, round.clef),
                Err(e) => {
                    log::error!("selector: {}", e);
                    result.push_status(format!("No eligible content: {}", e));
                }
            }
        }
    }

    result
}
