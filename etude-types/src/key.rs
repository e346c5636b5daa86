//! Key signatures and clefs for the practice display.

use serde::{Deserialize, Serialize};

/// The fifteen standard key signatures, C major through seven sharps/flats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySignature {
    C,
    G,
    D,
    A,
    E,
    B,
    Fs,
    Cs,
    F,
    Bb,
    Eb,
    Ab,
    Db,
    Gb,
    Cb,
}

impl KeySignature {
    pub const ALL: [KeySignature; 15] = [
        KeySignature::C,
        KeySignature::G,
        KeySignature::D,
        KeySignature::A,
        KeySignature::E,
        KeySignature::B,
        KeySignature::Fs,
        KeySignature::Cs,
        KeySignature::F,
        KeySignature::Bb,
        KeySignature::Eb,
        KeySignature::Ab,
        KeySignature::Db,
        KeySignature::Gb,
        KeySignature::Cb,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            KeySignature::C => "C",
            KeySignature::G => "G",
            KeySignature::D => "D",
            KeySignature::A => "A",
            KeySignature::E => "E",
            KeySignature::B => "B",
            KeySignature::Fs => "F#",
            KeySignature::Cs => "C#",
            KeySignature::F => "F",
            KeySignature::Bb => "Bb",
            KeySignature::Eb => "Eb",
            KeySignature::Ab => "Ab",
            KeySignature::Db => "Db",
            KeySignature::Gb => "Gb",
            KeySignature::Cb => "Cb",
        }
    }

    /// Position on the circle of fifths: sharps positive, flats negative.
    pub fn fifths(&self) -> i8 {
        match self {
            KeySignature::C => 0,
            KeySignature::G => 1,
            KeySignature::D => 2,
            KeySignature::A => 3,
            KeySignature::E => 4,
            KeySignature::B => 5,
            KeySignature::Fs => 6,
            KeySignature::Cs => 7,
            KeySignature::F => -1,
            KeySignature::Bb => -2,
            KeySignature::Eb => -3,
            KeySignature::Ab => -4,
            KeySignature::Db => -5,
            KeySignature::Gb => -6,
            KeySignature::Cb => -7,
        }
    }

    pub fn prefers_flats(&self) -> bool {
        self.fifths() < 0
    }
}

/// Staff clef. The bass clef transposes the drawn chord into its register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clef {
    Treble,
    Bass,
}

impl Clef {
    pub const ALL: [Clef; 2] = [Clef::Treble, Clef::Bass];

    pub fn name(&self) -> &'static str {
        match self {
            Clef::Treble => "treble",
            Clef::Bass => "bass",
        }
    }
}
