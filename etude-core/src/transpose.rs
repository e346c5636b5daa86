//! Pitch-correct interval transposition.

use etude_types::{Accidental, Chord, Pitch, PitchId, Spelling};

/// Shift a pitch by a signed number of semitones, recomputing letter,
/// accidental, and octave. Whole-octave shifts preserve the spelling
/// exactly, so `Cb5` an octave down is `Cb4`, not `B3`.
pub fn transpose_pitch(p: Pitch, semitones: i32) -> Pitch {
    if semitones % 12 == 0 {
        let octave = (p.octave as i32 + semitones / 12).clamp(-1, 9) as i8;
        return Pitch::new(p.letter, p.accidental, octave);
    }
    // Non-octave intervals go through the sounding pitch and respell,
    // keeping the flat/sharp flavor of the original.
    let id = p.normalize().get() as i32 + semitones;
    let prefer = if p.accidental == Accidental::Flat {
        Spelling::Flats
    } else {
        Spelling::Sharps
    };
    Pitch::from_midi(PitchId::new(id.clamp(0, 127) as u8), prefer)
}

/// Transpose every pitch of a chord, keeping its name.
pub fn transpose_chord(chord: &Chord, semitones: i32) -> Chord {
    Chord {
        name: chord.name.clone(),
        pitches: chord
            .pitches
            .iter()
            .map(|p| transpose_pitch(*p, semitones))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etude_types::ChordSet;

    fn p(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    #[test]
    fn octave_down_preserves_spelling() {
        assert_eq!(transpose_pitch(p("C4"), -12), p("C3"));
        assert_eq!(transpose_pitch(p("Eb5"), -12), p("Eb4"));
        assert_eq!(transpose_pitch(p("Cb5"), -12), p("Cb4"));
        assert_eq!(transpose_pitch(p("B#4"), -12), p("B#3"));
    }

    #[test]
    fn octave_shift_moves_sounding_pitch_by_12() {
        for s in ["C4", "F#4", "Bb3", "Cb5"] {
            let before = p(s).normalize().get() as i32;
            let after = transpose_pitch(p(s), -12).normalize().get() as i32;
            assert_eq!(before - after, 12, "{}", s);
        }
    }

    #[test]
    fn semitone_shifts_are_pitch_correct() {
        assert_eq!(transpose_pitch(p("C4"), 1), p("C#4"));
        assert_eq!(transpose_pitch(p("Bb3"), -1), p("Ab3"));
        assert_eq!(transpose_pitch(p("B4"), 1).normalize(), p("C5").normalize());
    }

    #[test]
    fn chord_transposition_covers_the_whole_bank() {
        for set in ChordSet::ALL {
            for chord in set.chords() {
                let down = transpose_chord(&chord, -12);
                assert_eq!(down.name, chord.name);
                for (orig, moved) in chord.pitches.iter().zip(&down.pitches) {
                    assert_eq!(
                        orig.normalize().get() as i32 - moved.normalize().get() as i32,
                        12,
                        "{} in {}",
                        orig,
                        chord.name
                    );
                    // Spelling survives the octave drop.
                    assert_eq!(orig.letter, moved.letter);
                    assert_eq!(orig.accidental, moved.accidental);
                }
            }
        }
    }

    #[test]
    fn shifts_clamp_at_the_range_edges() {
        let low = transpose_pitch(p("C0"), -48);
        assert_eq!(low.octave, -1);
        let high = transpose_pitch(p("B8"), 48);
        assert_eq!(high.octave, 9);
    }
}
