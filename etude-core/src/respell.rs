//! Display respelling of played notes toward the active chord's notation.

use etude_types::{Chord, Pitch};

/// Pick the display spelling for a just-played pitch. If the active chord
/// spells the same sounding pitch differently (the user plays what reads as
/// `D#4` against a chord written with `Eb4`), prefer the chord's spelling so
/// the feedback matches the notation. Matching is untouched: the result is
/// always enharmonically equal to the input.
pub fn respell(played: Pitch, active_chord: Option<&Chord>) -> Pitch {
    let Some(chord) = active_chord else {
        return played;
    };
    let id = played.normalize();
    chord
        .pitches
        .iter()
        .copied()
        .find(|q| q.normalize() == id)
        .unwrap_or(played)
}
