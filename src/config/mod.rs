//! Vocabulary and registry seed configuration.
//!
//! The addition vocabulary and the pot seed are data, not code: both load
//! once at startup, with defaults matching RFC 2324 §2.1.1 and the stock
//! four-pot registry. A JSON file can override either.

use crate::core::PotKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Allowed values per addition key.
///
/// Identical for every pot: RFC 7168 extends the full addition vocabulary
/// to tea, so there is no per-appliance carve-out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdditionVocabulary {
    keys: BTreeMap<String, Vec<String>>,
}

impl AdditionVocabulary {
    /// Whether `key` is a known addition key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Whether `key=value` is inside the vocabulary.
    pub fn allows(&self, key: &str, value: &str) -> bool {
        self.keys
            .get(key)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// The known addition keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Full `key -> allowed values` view, for the PROPFIND listing.
    pub fn entries(&self) -> &BTreeMap<String, Vec<String>> {
        &self.keys
    }
}

impl Default for AdditionVocabulary {
    /// The RFC 2324 §2.1.1 vocabulary.
    fn default() -> Self {
        let table: [(&str, &[&str]); 5] = [
            (
                "milk-type",
                &[
                    "Cream",
                    "Half-and-half",
                    "Whole-milk",
                    "Part-Skim",
                    "Skim",
                    "Non-Dairy",
                ],
            ),
            ("syrup-type", &["Vanilla", "Almond", "Raspberry", "Chocolate"]),
            ("sweetener-type", &["Sugar", "Honey", "Artificial"]),
            ("spice-type", &["Cinnamon", "Cardamom"]),
            ("alcohol-type", &["Whisky", "Rum", "Kahlua", "Aquavit"]),
        ];

        let mut keys = BTreeMap::new();
        for (key, values) in table {
            let _ = keys.insert(
                key.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            );
        }
        Self { keys }
    }
}

/// One pot in the registry seed. All seeded pots start `idle`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotSeed {
    /// Unique pot id.
    pub id: String,
    /// Appliance kind, immutable for the process lifetime.
    pub kind: PotKind,
    /// Supported varieties. Must be non-empty.
    pub varieties: Vec<String>,
}

impl PotSeed {
    /// Convenience constructor.
    pub fn new(id: &str, kind: PotKind, varieties: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            kind,
            varieties: varieties.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Process-start configuration: the addition vocabulary plus the pot seed.
///
/// # Example
///
/// ```rust
/// use percolate::config::BrewConfig;
///
/// let config = BrewConfig::default();
/// assert_eq!(config.pots.len(), 4);
/// assert!(config.vocabulary.allows("milk-type", "Whole-milk"));
/// assert!(!config.vocabulary.allows("milk-type", "Oat"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrewConfig {
    /// Allowed addition values per key.
    #[serde(default)]
    pub vocabulary: AdditionVocabulary,
    /// Pots registered at startup.
    #[serde(default = "default_pots")]
    pub pots: Vec<PotSeed>,
}

impl Default for BrewConfig {
    fn default() -> Self {
        Self {
            vocabulary: AdditionVocabulary::default(),
            pots: default_pots(),
        }
    }
}

fn default_pots() -> Vec<PotSeed> {
    vec![
        PotSeed::new(
            "pot-1",
            PotKind::CoffeePot,
            &["Espresso", "Lungo", "Americano"],
        ),
        PotSeed::new("pot-2", PotKind::CoffeePot, &["Espresso"]),
        PotSeed::new(
            "kettle-1",
            PotKind::Teapot,
            &["Earl Grey", "Chamomile", "Darjeeling"],
        ),
        PotSeed::new("kettle-2", PotKind::Teapot, &["Oolong"]),
    ]
}

/// Errors from loading or checking configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config declares no pots")]
    NoPots,

    #[error("pot '{0}' declared more than once")]
    DuplicatePot(String),

    #[error("pot '{0}' has no varieties")]
    NoVarieties(String),
}

impl BrewConfig {
    /// Parse and check a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Load and check a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.pots.is_empty() {
            return Err(ConfigError::NoPots);
        }
        let mut seen = std::collections::HashSet::new();
        for pot in &self.pots {
            if !seen.insert(pot.id.as_str()) {
                return Err(ConfigError::DuplicatePot(pot.id.clone()));
            }
            if pot.varieties.is_empty() {
                return Err(ConfigError::NoVarieties(pot.id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_seeds_the_stock_registry() {
        let config = BrewConfig::default();
        let ids: Vec<&str> = config.pots.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["pot-1", "pot-2", "kettle-1", "kettle-2"]);
        assert_eq!(config.pots[0].kind, PotKind::CoffeePot);
        assert_eq!(config.pots[2].kind, PotKind::Teapot);
    }

    #[test]
    fn default_vocabulary_covers_the_rfc_keys() {
        let vocabulary = AdditionVocabulary::default();
        for key in [
            "milk-type",
            "syrup-type",
            "sweetener-type",
            "spice-type",
            "alcohol-type",
        ] {
            assert!(vocabulary.contains_key(key), "missing key {key}");
        }
        assert!(vocabulary.allows("alcohol-type", "Whisky"));
        assert!(!vocabulary.allows("alcohol-type", "Gin"));
        assert!(!vocabulary.contains_key("decaf"));
    }

    #[test]
    fn config_parses_from_json() {
        let config = BrewConfig::from_json(
            r#"{
                "pots": [
                    {"id": "solo", "kind": "coffee-pot", "varieties": ["Espresso"]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.pots.len(), 1);
        // Vocabulary falls back to the RFC default when omitted.
        assert!(config.vocabulary.allows("spice-type", "Cinnamon"));
    }

    #[test]
    fn duplicate_pot_ids_are_rejected() {
        let err = BrewConfig::from_json(
            r#"{
                "pots": [
                    {"id": "pot-1", "kind": "coffee-pot", "varieties": ["Espresso"]},
                    {"id": "pot-1", "kind": "teapot", "varieties": ["Oolong"]}
                ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePot(id) if id == "pot-1"));
    }

    #[test]
    fn potless_and_variety_less_configs_are_rejected() {
        let err = BrewConfig::from_json(r#"{"pots": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoPots));

        let err = BrewConfig::from_json(
            r#"{"pots": [{"id": "pot-1", "kind": "coffee-pot", "varieties": []}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NoVarieties(id) if id == "pot-1"));
    }
}
