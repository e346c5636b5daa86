use std::path::PathBuf;

use serde::Deserialize;

use etude_types::{ChordSet, Clef, Filters, KeySignature};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    practice: PracticeConfig,
    #[serde(default)]
    filters: FiltersConfig,
}

#[derive(Deserialize, Default)]
struct PracticeConfig {
    feedback_delay_ms: Option<u64>,
    bass_octave_drop: Option<u8>,
}

#[derive(Deserialize, Default)]
struct FiltersConfig {
    chord_sets: Option<Vec<String>>,
    keys: Option<Vec<String>>,
    clefs: Option<Vec<String>>,
}

/// Engine knobs threaded into dispatch and the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeSettings {
    pub feedback_delay_ms: u64,
    pub bass_octave_drop: u8,
}

impl Default for PracticeSettings {
    fn default() -> Self {
        Self {
            feedback_delay_ms: 1000,
            bass_octave_drop: 1,
        }
    }
}

pub struct Config {
    practice: PracticeConfig,
    filters: FiltersConfig,
}

impl Config {
    pub fn load() -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => {
                        if let Err(e) = apply_user_config(&mut base, &contents) {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    }
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            practice: base.practice,
            filters: base.filters,
        }
    }

    pub fn settings(&self) -> PracticeSettings {
        let fallback = PracticeSettings::default();
        PracticeSettings {
            feedback_delay_ms: self
                .practice
                .feedback_delay_ms
                .unwrap_or(fallback.feedback_delay_ms)
                .clamp(0, 60_000),
            bass_octave_drop: self
                .practice
                .bass_octave_drop
                .unwrap_or(fallback.bass_octave_drop)
                .clamp(0, 4),
        }
    }

    /// Startup filters. Unknown names are logged and skipped; a category
    /// that ends up empty falls back to its default so the selector always
    /// has a pool.
    pub fn filters(&self) -> Filters {
        let defaults = Filters::default();

        let chord_sets = parse_list(
            self.filters.chord_sets.as_deref(),
            parse_chord_set,
            defaults.enabled_chord_sets(),
        );
        let keys = parse_list(
            self.filters.keys.as_deref(),
            parse_key_signature,
            defaults.enabled_keys(),
        );
        let clefs = parse_list(
            self.filters.clefs.as_deref(),
            parse_clef,
            defaults.enabled_clefs(),
        );

        Filters::new(chord_sets, keys, clefs)
    }
}

fn parse_list<T: Clone>(
    names: Option<&[String]>,
    parse: fn(&str) -> Option<T>,
    fallback: &[T],
) -> Vec<T> {
    let Some(names) = names else {
        return fallback.to_vec();
    };
    let parsed: Vec<T> = names
        .iter()
        .filter_map(|n| {
            let v = parse(n);
            if v.is_none() {
                log::warn!(target: "config", "unknown filter entry {:?}", n);
            }
            v
        })
        .collect();
    if parsed.is_empty() {
        fallback.to_vec()
    } else {
        parsed
    }
}

/// Merge a user config file into the base. A file that fails to parse
/// leaves the base untouched.
fn apply_user_config(base: &mut ConfigFile, contents: &str) -> Result<(), toml::de::Error> {
    let user: ConfigFile = toml::from_str(contents)?;
    merge_practice(&mut base.practice, user.practice);
    merge_filters(&mut base.filters, user.filters);
    Ok(())
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("etude").join("config.toml"))
}

fn merge_practice(base: &mut PracticeConfig, user: PracticeConfig) {
    if user.feedback_delay_ms.is_some() {
        base.feedback_delay_ms = user.feedback_delay_ms;
    }
    if user.bass_octave_drop.is_some() {
        base.bass_octave_drop = user.bass_octave_drop;
    }
}

fn merge_filters(base: &mut FiltersConfig, user: FiltersConfig) {
    if user.chord_sets.is_some() {
        base.chord_sets = user.chord_sets;
    }
    if user.keys.is_some() {
        base.keys = user.keys;
    }
    if user.clefs.is_some() {
        base.clefs = user.clefs;
    }
}

fn parse_chord_set(s: &str) -> Option<ChordSet> {
    match s.to_lowercase().as_str() {
        "major" | "major_triads" => Some(ChordSet::MajorTriads),
        "minor" | "minor_triads" => Some(ChordSet::MinorTriads),
        _ => None,
    }
}

fn parse_key_signature(s: &str) -> Option<KeySignature> {
    match s {
        "C" => Some(KeySignature::C),
        "G" => Some(KeySignature::G),
        "D" => Some(KeySignature::D),
        "A" => Some(KeySignature::A),
        "E" => Some(KeySignature::E),
        "B" => Some(KeySignature::B),
        "F#" | "Fs" => Some(KeySignature::Fs),
        "C#" | "Cs" => Some(KeySignature::Cs),
        "F" => Some(KeySignature::F),
        "Bb" => Some(KeySignature::Bb),
        "Eb" => Some(KeySignature::Eb),
        "Ab" => Some(KeySignature::Ab),
        "Db" => Some(KeySignature::Db),
        "Gb" => Some(KeySignature::Gb),
        "Cb" => Some(KeySignature::Cb),
        _ => None,
    }
}

fn parse_clef(s: &str) -> Option<Clef> {
    match s.to_lowercase().as_str() {
        "treble" => Some(Clef::Treble),
        "bass" => Some(Clef::Bass),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let base: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();
        let config = Config {
            practice: base.practice,
            filters: base.filters,
        };
        let settings = config.settings();
        assert_eq!(settings.feedback_delay_ms, 1000);
        assert_eq!(settings.bass_octave_drop, 1);

        let filters = config.filters();
        assert_eq!(
            filters.enabled_chord_sets(),
            &[ChordSet::MajorTriads, ChordSet::MinorTriads]
        );
        assert_eq!(filters.enabled_keys(), &[KeySignature::C]);
        assert_eq!(filters.enabled_clefs(), &[Clef::Treble]);
    }

    #[test]
    fn parse_chord_sets() {
        assert_eq!(parse_chord_set("major"), Some(ChordSet::MajorTriads));
        assert_eq!(parse_chord_set("Minor"), Some(ChordSet::MinorTriads));
        assert_eq!(parse_chord_set("diminished"), None);
    }

    #[test]
    fn parse_key_signatures() {
        assert_eq!(parse_key_signature("C"), Some(KeySignature::C));
        assert_eq!(parse_key_signature("F#"), Some(KeySignature::Fs));
        assert_eq!(parse_key_signature("Fs"), Some(KeySignature::Fs));
        assert_eq!(parse_key_signature("Cb"), Some(KeySignature::Cb));
        assert_eq!(parse_key_signature("X"), None);
    }

    #[test]
    fn parse_clefs() {
        assert_eq!(parse_clef("treble"), Some(Clef::Treble));
        assert_eq!(parse_clef("BASS"), Some(Clef::Bass));
        assert_eq!(parse_clef("alto"), None);
    }

    #[test]
    fn unknown_filter_entries_fall_back() {
        let filters_cfg = FiltersConfig {
            chord_sets: Some(vec!["diminished".to_string()]),
            keys: Some(vec!["G".to_string()]),
            clefs: None,
        };
        let config = Config {
            practice: PracticeConfig::default(),
            filters: filters_cfg,
        };
        let filters = config.filters();
        // All entries unknown: category falls back to defaults.
        assert_eq!(
            filters.enabled_chord_sets(),
            Filters::default().enabled_chord_sets()
        );
        // Valid entries are honored.
        assert_eq!(filters.enabled_keys(), &[KeySignature::G]);
        // Missing category keeps defaults.
        assert_eq!(filters.enabled_clefs(), &[Clef::Treble]);
    }

    #[test]
    fn user_values_override_base_and_absent_values_keep_it() {
        let mut base: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();
        apply_user_config(
            &mut base,
            "[practice]\nfeedback_delay_ms = 250\n\n[filters]\nkeys = [\"G\", \"D\"]\n",
        )
        .unwrap();
        // Overridden fields take the user's value.
        assert_eq!(base.practice.feedback_delay_ms, Some(250));
        assert_eq!(
            base.filters.keys,
            Some(vec!["G".to_string(), "D".to_string()])
        );
        // Fields the user file omits keep the embedded defaults.
        assert_eq!(base.practice.bass_octave_drop, Some(1));
        assert_eq!(
            base.filters.chord_sets,
            Some(vec!["major".to_string(), "minor".to_string()])
        );
        assert_eq!(base.filters.clefs, Some(vec!["treble".to_string()]));
    }

    #[test]
    fn malformed_user_file_leaves_base_untouched() {
        let mut base: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();
        let delay_before = base.practice.feedback_delay_ms;
        let keys_before = base.filters.keys.clone();

        assert!(apply_user_config(&mut base, "[practice\nfeedback_delay_ms = ]").is_err());
        assert_eq!(base.practice.feedback_delay_ms, delay_before);
        assert_eq!(base.filters.keys, keys_before);

        // Well-formed TOML with a wrong type is rejected the same way.
        assert!(apply_user_config(&mut base, "[practice]\nfeedback_delay_ms = \"slow\"\n").is_err());
        assert_eq!(base.practice.feedback_delay_ms, delay_before);
    }

    #[test]
    fn settings_are_clamped() {
        let config = Config {
            practice: PracticeConfig {
                feedback_delay_ms: Some(10_000_000),
                bass_octave_drop: Some(9),
            },
            filters: FiltersConfig::default(),
        };
        let s = config.settings();
        assert_eq!(s.feedback_delay_ms, 60_000);
        assert_eq!(s.bass_octave_drop, 4);
    }
}
