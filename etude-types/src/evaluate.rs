//! Set-based chord matching over normalized pitch identities.

use std::collections::HashSet;

use crate::chord::Chord;
use crate::pitch::{Pitch, PitchId};

/// Outcome of comparing the notes played so far against the target chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Some target pitches are still missing; keep listening.
    Pending,
    /// A note outside the target was struck. One wrong note fails the
    /// round even when every right note is also down.
    Incorrect,
    /// Every target pitch has been struck. Octave duplicates of target
    /// tones are tolerated: matching is by equivalence class, not exact
    /// spelling or octave count.
    Correct,
}

/// Evaluate the played notes against the target chord. Order-independent:
/// both sides collapse to sets of canonical pitch ids.
pub fn evaluate(played: &[Pitch], target: &Chord) -> MatchOutcome {
    let target_ids: HashSet<PitchId> = target.pitches.iter().map(|p| p.normalize()).collect();
    let played_ids: HashSet<PitchId> = played.iter().map(|p| p.normalize()).collect();

    if played_ids.iter().any(|id| !target_ids.contains(id)) {
        MatchOutcome::Incorrect
    } else if target_ids.is_subset(&played_ids) {
        MatchOutcome::Correct
    } else {
        MatchOutcome::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(spelled: &[&str]) -> Chord {
        Chord {
            name: "test".to_string(),
            pitches: spelled.iter().map(|s| s.parse().unwrap()).collect(),
        }
    }

    fn played(spelled: &[&str]) -> Vec<Pitch> {
        spelled.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn exact_match_is_correct() {
        let c = chord(&["C4", "E4", "G4"]);
        assert_eq!(evaluate(&played(&["C4", "E4", "G4"]), &c), MatchOutcome::Correct);
    }

    #[test]
    fn octave_duplicate_of_target_tone_is_tolerated() {
        let c = chord(&["C4", "E4", "G4"]);
        assert_eq!(
            evaluate(&played(&["C4", "E4", "G4", "C5"]), &c),
            MatchOutcome::Correct
        );
    }

    #[test]
    fn one_wrong_note_fails_immediately() {
        let c = chord(&["C4", "E4", "G4"]);
        assert_eq!(
            evaluate(&played(&["C4", "E4", "F4"]), &c),
            MatchOutcome::Incorrect
        );
        // Even when all correct notes are present too.
        assert_eq!(
            evaluate(&played(&["C4", "E4", "G4", "F4"]), &c),
            MatchOutcome::Incorrect
        );
    }

    #[test]
    fn partial_match_is_pending() {
        let c = chord(&["C4", "E4", "G4"]);
        assert_eq!(evaluate(&played(&["C4"]), &c), MatchOutcome::Pending);
        assert_eq!(evaluate(&played(&[]), &c), MatchOutcome::Pending);
    }

    #[test]
    fn enharmonic_spellings_match() {
        let c = chord(&["Eb4", "G4", "Bb4"]);
        assert_eq!(
            evaluate(&played(&["D#4", "G4", "A#4"]), &c),
            MatchOutcome::Correct
        );
    }

    #[test]
    fn order_independent() {
        let c = chord(&["C4", "E4", "G4"]);
        let permutations: [&[&str]; 6] = [
            &["C4", "E4", "G4"],
            &["C4", "G4", "E4"],
            &["E4", "C4", "G4"],
            &["E4", "G4", "C4"],
            &["G4", "C4", "E4"],
            &["G4", "E4", "C4"],
        ];
        for perm in permutations {
            assert_eq!(evaluate(&played(perm), &c), MatchOutcome::Correct);
        }
    }
}
