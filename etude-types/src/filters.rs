//! User-enabled filters over chord sets, key signatures, and clefs.
//!
//! The selector never draws outside the enabled entries, and every toggle
//! refuses to empty its category — an empty pool is a contract violation
//! that must be stopped here, at the editing boundary.

use serde::{Deserialize, Serialize};

use crate::chord::ChordSet;
use crate::key::{Clef, KeySignature};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    chord_sets: Vec<ChordSet>,
    keys: Vec<KeySignature>,
    clefs: Vec<Clef>,
}

impl Filters {
    /// Build from explicit enabled lists. Callers (config loading, tests)
    /// are responsible for keeping each category non-empty; the selector
    /// reports a distinct error if one slips through.
    pub fn new(chord_sets: Vec<ChordSet>, keys: Vec<KeySignature>, clefs: Vec<Clef>) -> Self {
        Self {
            chord_sets,
            keys,
            clefs,
        }
    }

    pub fn enabled_chord_sets(&self) -> &[ChordSet] {
        &self.chord_sets
    }

    pub fn enabled_keys(&self) -> &[KeySignature] {
        &self.keys
    }

    pub fn enabled_clefs(&self) -> &[Clef] {
        &self.clefs
    }

    pub fn chord_set_enabled(&self, set: ChordSet) -> bool {
        self.chord_sets.contains(&set)
    }

    pub fn key_enabled(&self, key: KeySignature) -> bool {
        self.keys.contains(&key)
    }

    pub fn clef_enabled(&self, clef: Clef) -> bool {
        self.clefs.contains(&clef)
    }

    /// Toggle a chord set. Returns false (unchanged) if the toggle would
    /// disable the last enabled set.
    pub fn toggle_chord_set(&mut self, set: ChordSet) -> bool {
        if let Some(at) = self.chord_sets.iter().position(|s| *s == set) {
            if self.chord_sets.len() == 1 {
                return false;
            }
            self.chord_sets.remove(at);
        } else {
            self.chord_sets.push(set);
            self.chord_sets
                .sort_by_key(|s| ChordSet::ALL.iter().position(|a| a == s));
        }
        true
    }

    pub fn toggle_key(&mut self, key: KeySignature) -> bool {
        if let Some(at) = self.keys.iter().position(|k| *k == key) {
            if self.keys.len() == 1 {
                return false;
            }
            self.keys.remove(at);
        } else {
            self.keys.push(key);
            self.keys
                .sort_by_key(|k| KeySignature::ALL.iter().position(|a| a == k));
        }
        true
    }

    pub fn toggle_clef(&mut self, clef: Clef) -> bool {
        if let Some(at) = self.clefs.iter().position(|c| *c == clef) {
            if self.clefs.len() == 1 {
                return false;
            }
            self.clefs.remove(at);
        } else {
            self.clefs.push(clef);
            self.clefs
                .sort_by_key(|c| Clef::ALL.iter().position(|a| a == c));
        }
        true
    }
}

impl Default for Filters {
    /// Both triad sets, the key of C, treble clef.
    fn default() -> Self {
        Self {
            chord_sets: vec![ChordSet::MajorTriads, ChordSet::MinorTriads],
            keys: vec![KeySignature::C],
            clefs: vec![Clef::Treble],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_every_category_enabled() {
        let f = Filters::default();
        assert!(!f.enabled_chord_sets().is_empty());
        assert!(!f.enabled_keys().is_empty());
        assert!(!f.enabled_clefs().is_empty());
    }

    #[test]
    fn toggle_disables_and_reenables() {
        let mut f = Filters::default();
        assert!(f.toggle_chord_set(ChordSet::MinorTriads));
        assert!(!f.chord_set_enabled(ChordSet::MinorTriads));
        assert!(f.toggle_chord_set(ChordSet::MinorTriads));
        assert!(f.chord_set_enabled(ChordSet::MinorTriads));
    }

    #[test]
    fn last_entry_cannot_be_disabled() {
        let mut f = Filters::default();
        assert!(f.toggle_chord_set(ChordSet::MajorTriads));
        assert!(!f.toggle_chord_set(ChordSet::MinorTriads));
        assert!(f.chord_set_enabled(ChordSet::MinorTriads));

        assert!(!f.toggle_key(KeySignature::C));
        assert!(f.key_enabled(KeySignature::C));

        assert!(!f.toggle_clef(Clef::Treble));
        assert!(f.clef_enabled(Clef::Treble));
    }

    #[test]
    fn reenabling_keeps_catalogue_order() {
        let mut f = Filters::default();
        f.toggle_chord_set(ChordSet::MajorTriads);
        f.toggle_chord_set(ChordSet::MajorTriads);
        assert_eq!(
            f.enabled_chord_sets(),
            &[ChordSet::MajorTriads, ChordSet::MinorTriads]
        );
    }

    #[test]
    fn toggling_clefs_enables_bass() {
        let mut f = Filters::default();
        assert!(f.toggle_clef(Clef::Bass));
        assert_eq!(f.enabled_clefs(), &[Clef::Treble, Clef::Bass]);
    }
}
