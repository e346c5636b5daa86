use etude_types::{
    evaluate, Deferred, DispatchResult, MatchOutcome, Phase, Pitch, RoundAction, SessionState,
    Spelling,
};

use crate::config::PracticeSettings;
use crate::respell::respell;
use crate::selector;

pub(super) fn dispatch_round(
    action: &RoundAction,
    state: &mut SessionState,
    settings: &PracticeSettings,
    rng: &mut u64,
) -> DispatchResult {
    let mut result = DispatchResult::none();

    match action {
        RoundAction::NoteOn { note } => {
            if state.phase != Phase::DeviceSelected {
                return result;
            }

            // Default spelling follows the key context; the respeller then
            // gets the final say when the chord spells the pitch itself.
            let prefer = if state.active_key.prefers_flats() {
                Spelling::Flats
            } else {
                Spelling::Sharps
            };
            let default = Pitch::from_midi(*note, prefer);
            let shown = respell(default, state.active_chord.as_ref());
            state.played_notes.push(shown);

            // During the feedback window notes are recorded for display
            // only; the round has already been judged.
            if state.input_locked {
                return result;
            }
            let Some(chord) = &state.active_chord else {
                return result;
            };

            match evaluate(&state.played_notes, chord) {
                MatchOutcome::Pending => {}
                outcome => {
                    let correct = outcome == MatchOutcome::Correct;
                    let chord_name = chord.name.clone();
                    state.input_locked = true;
                    state.record_round(correct);
                    state.feedback = Some(
                        if correct {
                            format!("Correct! {}", chord_name)
                        } else {
                            format!("Incorrect — that was {}", chord_name)
                        },
                    );
                    log::debug!(
                        "round {}: {:?} after {} note(s), {} ms",
                        state.total_count,
                        outcome,
                        state.played_notes.len(),
                        state.elapsed_ms
                    );
                    result.push_deferred(Deferred::AdvanceRound {
                        generation: state.round_generation,
                        delay_ms: settings.feedback_delay_ms,
                    });
                }
            }
        }
        RoundAction::Tick { elapsed_ms } => {
            // Display only. Frozen once the round is judged.
            if state.phase == Phase::DeviceSelected && !state.input_locked {
                state.elapsed_ms = *elapsed_ms;
            }
        }
        RoundAction::Advance { generation } => {
            // A stale advance (session ended, or the round already moved
            // on) must be a no-op, never a mutation of newer state.
            if state.phase != Phase::DeviceSelected || *generation != state.round_generation {
                log::debug!("dropping stale round advance (generation {})", generation);
                return result;
            }
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
