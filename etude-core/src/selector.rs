//! Random round selection under the user's filters.

use etude_types::{Chord, Clef, Filters, KeySignature};

use crate::transpose::transpose_chord;

/// One drawn round: the target chord, plus the key and clef context it is
/// presented in. The chord is already transposed for the clef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub chord: Chord,
    pub key: KeySignature,
    pub clef: Clef,
}

/// A filter category had nothing enabled. This is a contract violation —
/// the filter-editing boundary refuses to empty a category — so it is
/// reported distinctly rather than papered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorError {
    EmptyChordPool,
    EmptyKeyPool,
    EmptyClefPool,
}

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyChordPool => write!(f, "no chord sets enabled"),
            Self::EmptyKeyPool => write!(f, "no keys enabled"),
            Self::EmptyClefPool => write!(f, "no clefs enabled"),
        }
    }
}

impl std::error::Error for SelectorError {}

/// Advance the LCG and draw an index in `0..len`.
fn draw(rng: &mut u64, len: usize) -> usize {
    *rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
    ((*rng >> 33) as usize) % len
}

/// Draw the next round uniformly from the enabled pools. Pure apart from
/// advancing `rng`; the caller installs the round into session state.
pub fn next_round(
    filters: &Filters,
    bass_octave_drop: u8,
    rng: &mut u64,
) -> Result<Round, SelectorError> {
    let pool: Vec<Chord> = filters
        .enabled_chord_sets()
        .iter()
        .flat_map(|set| set.chords())
        .collect();
    if pool.is_empty() {
        return Err(SelectorError::EmptyChordPool);
    }

    let keys = filters.enabled_keys();
    if keys.is_empty() {
        return Err(SelectorError::EmptyKeyPool);
    }
    let clefs = filters.enabled_clefs();
    if clefs.is_empty() {
        return Err(SelectorError::EmptyClefPool);
    }

    let chord = pool[draw(rng, pool.len())].clone();
    let key = keys[draw(rng, keys.len())];
    let clef = clefs[draw(rng, clefs.len())];

    let chord = match clef {
        Clef::Treble => chord,
        Clef::Bass => transpose_chord(&chord, -12 * bass_octave_drop as i32),
    };

    Ok(Round { chord, key, clef })
}

#[cfg(test)]
mod tests {
    use super::*;
    use etude_types::ChordSet;
    use std::collections::HashSet;

    #[test]
    fn draws_stay_inside_enabled_chord_sets() {
        let filters = Filters::new(
            vec![ChordSet::MinorTriads],
            vec![KeySignature::C],
            vec![Clef::Treble],
        );
        let minor_names: HashSet<String> = ChordSet::MinorTriads
            .chords()
            .into_iter()
            .map(|c| c.name)
            .collect();
        let mut rng = 7u64;
        for _ in 0..200 {
            let round = next_round(&filters, 1, &mut rng).unwrap();
            assert!(minor_names.contains(&round.chord.name), "{}", round.chord.name);
            assert_eq!(round.key, KeySignature::C);
            assert_eq!(round.clef, Clef::Treble);
        }
    }

    #[test]
    fn union_pool_reaches_both_sets() {
        let filters = Filters::default();
        let mut rng = 42u64;
        let mut seen = HashSet::new();
        for _ in 0..400 {
            let round = next_round(&filters, 1, &mut rng).unwrap();
            seen.insert(round.chord.name);
        }
        // 24 chords in the default pool; 400 draws should hit most of them.
        assert!(seen.len() > 20, "only saw {} chords", seen.len());
    }

    #[test]
    fn empty_categories_fail_distinctly() {
        let mut rng = 1u64;
        let no_chords = Filters::new(vec![], vec![KeySignature::C], vec![Clef::Treble]);
        assert_eq!(
            next_round(&no_chords, 1, &mut rng),
            Err(SelectorError::EmptyChordPool)
        );
        let no_keys = Filters::new(vec![ChordSet::MajorTriads], vec![], vec![Clef::Treble]);
        assert_eq!(
            next_round(&no_keys, 1, &mut rng),
            Err(SelectorError::EmptyKeyPool)
        );
        let no_clefs = Filters::new(vec![ChordSet::MajorTriads], vec![KeySignature::C], vec![]);
        assert_eq!(
            next_round(&no_clefs, 1, &mut rng),
            Err(SelectorError::EmptyClefPool)
        );
    }

    #[test]
    fn bass_clef_transposes_down() {
        let filters = Filters::new(
            vec![ChordSet::MajorTriads],
            vec![KeySignature::C],
            vec![Clef::Bass],
        );
        let treble_roots: std::collections::HashMap<String, u8> = ChordSet::MajorTriads
            .chords()
            .into_iter()
            .map(|c| (c.name.clone(), c.pitches[0].normalize().get()))
            .collect();
        let mut rng = 3u64;
        for _ in 0..50 {
            let round = next_round(&filters, 1, &mut rng).unwrap();
            assert_eq!(round.clef, Clef::Bass);
            let drawn_root = round.chord.pitches[0].normalize().get();
            assert_eq!(
                treble_roots[&round.chord.name] - drawn_root,
                12,
                "{}",
                round.chord.name
            );
        }
    }

    #[test]
    fn zero_octave_drop_leaves_bass_chords_in_place() {
        let filters = Filters::new(
            vec![ChordSet::MajorTriads],
            vec![KeySignature::C],
            vec![Clef::Bass],
        );
        let mut rng = 3u64;
        let round = next_round(&filters, 0, &mut rng).unwrap();
        let original = ChordSet::MajorTriads
            .chords()
            .into_iter()
            .find(|c| c.name == round.chord.name)
            .unwrap();
        assert_eq!(round.chord.pitches, original.pitches);
    }

    #[test]
    fn seeded_draws_are_deterministic() {
        let filters = Filters::default();
        let mut a = 99u64;
        let mut b = 99u64;
        for _ in 0..20 {
            assert_eq!(
                next_round(&filters, 1, &mut a),
                next_round(&filters, 1, &mut b)
            );
        }
    }
}
