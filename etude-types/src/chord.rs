//! The chord catalogue: named chords grouped into chord sets.

use serde::{Deserialize, Serialize};

use crate::pitch::Pitch;

/// A named, ordered, non-empty collection of spelled pitches. Order matters
/// for notation; matching treats the pitches as a set of sounding notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub name: String,
    pub pitches: Vec<Pitch>,
}

impl Chord {
    /// Build a chord from spelled note strings. The catalogue below is the
    /// only caller; a malformed entry there is a bug in this file.
    fn from_spellings(name: &str, spelled: &[&str]) -> Chord {
        assert!(!spelled.is_empty(), "chord {} has no pitches", name);
        let pitches = spelled
            .iter()
            .map(|s| {
                s.parse()
                    .unwrap_or_else(|e| panic!("bad spelling in chord {}: {}", name, e))
            })
            .collect();
        Chord {
            name: name.to_string(),
            pitches,
        }
    }
}

/// A group of chords enabled or disabled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordSet {
    MajorTriads,
    MinorTriads,
}

/// Root-position triads in octave 4, spelled with the conventional
/// accidentals for each root (flats for flat roots, sharps for sharp roots).
const MAJOR_TRIADS: [(&str, [&str; 3]); 12] = [
    ("C", ["C4", "E4", "G4"]),
    ("Db", ["Db4", "F4", "Ab4"]),
    ("D", ["D4", "F#4", "A4"]),
    ("Eb", ["Eb4", "G4", "Bb4"]),
    ("E", ["E4", "G#4", "B4"]),
    ("F", ["F4", "A4", "C5"]),
    ("Gb", ["Gb4", "Bb4", "Db5"]),
    ("G", ["G4", "B4", "D5"]),
    ("Ab", ["Ab4", "C5", "Eb5"]),
    ("A", ["A4", "C#5", "E5"]),
    ("Bb", ["Bb4", "D5", "F5"]),
    ("B", ["B4", "D#5", "F#5"]),
];

const MINOR_TRIADS: [(&str, [&str; 3]); 12] = [
    ("Cm", ["C4", "Eb4", "G4"]),
    ("C#m", ["C#4", "E4", "G#4"]),
    ("Dm", ["D4", "F4", "A4"]),
    ("Ebm", ["Eb4", "Gb4", "Bb4"]),
    ("Em", ["E4", "G4", "B4"]),
    ("Fm", ["F4", "Ab4", "C5"]),
    ("F#m", ["F#4", "A4", "C#5"]),
    ("Gm", ["G4", "Bb4", "D5"]),
    ("G#m", ["G#4", "B4", "D#5"]),
    ("Am", ["A4", "C5", "E5"]),
    ("Bbm", ["Bb4", "Db5", "F5"]),
    ("Bm", ["B4", "D5", "F#5"]),
];

impl ChordSet {
    pub const ALL: [ChordSet; 2] = [ChordSet::MajorTriads, ChordSet::MinorTriads];

    pub fn name(&self) -> &'static str {
        match self {
            ChordSet::MajorTriads => "Major triads",
            ChordSet::MinorTriads => "Minor triads",
        }
    }

    /// The chords belonging to this set.
    pub fn chords(&self) -> Vec<Chord> {
        let table: &[(&str, [&str; 3])] = match self {
            ChordSet::MajorTriads => &MAJOR_TRIADS,
            ChordSet::MinorTriads => &MINOR_TRIADS,
        };
        table
            .iter()
            .map(|(name, spelled)| Chord::from_spellings(name, spelled))
            .collect()
    }
}
