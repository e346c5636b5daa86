//! Spelled pitches and enharmonic normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Note letter A–G.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        }
    }

    /// Semitone offset of the natural letter from C.
    pub fn semitone(&self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

/// Accidental applied to a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn offset(&self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }
}

/// Which spelling to prefer when deriving a pitch from a MIDI number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
    Sharps,
    Flats,
}

/// Canonical enharmonic identity of a pitch: the MIDI note number of the
/// sounding pitch. `p.normalize() == q.normalize()` iff `p` and `q` sound
/// the same, whatever their spelling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PitchId(u8);

impl PitchId {
    pub fn new(id: u8) -> Self {
        Self(id.min(127))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A spelled note: letter, accidental, octave. `C4` is middle C (MIDI 60).
///
/// The octave number belongs to the spelling, not the sound: `Cb4` sounds at
/// the height of `B3` (MIDI 59) and `B#4` at the height of `C5` (MIDI 72).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub letter: Letter,
    pub accidental: Accidental,
    pub octave: i8,
}

impl Pitch {
    pub fn new(letter: Letter, accidental: Accidental, octave: i8) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    /// Collapse this spelling to its enharmonic equivalence class.
    /// Pure and total; out-of-range spellings clamp to the MIDI range.
    pub fn normalize(&self) -> PitchId {
        let semis =
            (self.octave as i32 + 1) * 12 + self.letter.semitone() + self.accidental.offset();
        PitchId::new(semis.clamp(0, 127) as u8)
    }

    /// Default spelling for a MIDI note number. Naturals spell as
    /// themselves; the five black keys spell per `prefer`.
    pub fn from_midi(id: PitchId, prefer: Spelling) -> Pitch {
        let octave = (id.get() / 12) as i8 - 1;
        let flats = prefer == Spelling::Flats;
        let (letter, accidental) = match id.get() % 12 {
            0 => (Letter::C, Accidental::Natural),
            1 if flats => (Letter::D, Accidental::Flat),
            1 => (Letter::C, Accidental::Sharp),
            2 => (Letter::D, Accidental::Natural),
            3 if flats => (Letter::E, Accidental::Flat),
            3 => (Letter::D, Accidental::Sharp),
            4 => (Letter::E, Accidental::Natural),
            5 => (Letter::F, Accidental::Natural),
            6 if flats => (Letter::G, Accidental::Flat),
            6 => (Letter::F, Accidental::Sharp),
            7 => (Letter::G, Accidental::Natural),
            8 if flats => (Letter::A, Accidental::Flat),
            8 => (Letter::G, Accidental::Sharp),
            9 => (Letter::A, Accidental::Natural),
            10 if flats => (Letter::B, Accidental::Flat),
            10 => (Letter::A, Accidental::Sharp),
            _ => (Letter::B, Accidental::Natural),
        };
        Pitch::new(letter, accidental, octave)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.letter.name(),
            self.accidental.suffix(),
            self.octave
        )
    }
}

impl FromStr for Pitch {
    type Err = String;

    /// Parse spellings like `C#4`, `Bb3`, `A4`. Unknown marks between the
    /// letter and the octave are stripped rather than rejected, so a chord
    /// entry with an unmapped spelling degrades to letter + octave.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(|| format!("no note letter in {:?}", s))?;

        let rest: String = chars.collect();
        let digits_at = rest
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or_else(|| format!("no octave in {:?}", s))?;
        let (marks, digits) = rest.split_at(digits_at);

        let accidental = if marks.contains('#') {
            Accidental::Sharp
        } else if marks.contains('b') {
            Accidental::Flat
        } else {
            Accidental::Natural
        };

        let octave: i8 = digits
            .parse()
            .map_err(|_| format!("bad octave in {:?}", s))?;

        Ok(Pitch::new(letter, accidental, octave))
    }
}
