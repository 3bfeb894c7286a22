//! Family-income codebook
//!
//! Maps INCFAM07ON category codes to bracket labels. Aggregate codes that
//! overlap real brackets are marked excluded, and every code at or above
//! the sentinel floor (NIU / refused / not ascertained / don't know) is
//! excluded regardless of the table. A new survey year only needs a new
//! codebook file.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Lowest reserved "not applicable / unknown" code
pub const SENTINEL_FLOOR: u16 = 96;

/// One codebook line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: u16,
    pub label: String,
    /// Not a usable bracket (e.g. an aggregate of other brackets)
    #[serde(default)]
    pub excluded: bool,
}

/// How a code is treated in income breakdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeClass<'a> {
    Bracket(&'a str),
    Excluded(&'a str),
    Sentinel,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct Codebook {
    entries: BTreeMap<u16, CodeEntry>,
}

impl Codebook {
    /// Build from entries, rejecting tables that would treat a sentinel as a bracket
    pub fn from_entries(entries: Vec<CodeEntry>) -> Result<Self, ConfigError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.code >= SENTINEL_FLOOR && !entry.excluded {
                return Err(ConfigError::SentinelBracket(entry.code));
            }
            map.insert(entry.code, entry);
        }
        Ok(Self { entries: map })
    }

    /// Parse a JSON array of entries
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let entries: Vec<CodeEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Load a JSON codebook file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Codebook for the 2007-onward family income recode
    pub fn incfam07on() -> Self {
        let rows: &[(u16, &str, bool)] = &[
            (10, "$0 - $34,999 (undifferentiated)", true),
            (11, "$0 - $14,999", false),
            (12, "$15,000 - $24,999", false),
            (13, "$25,000 - $34,999", false),
            (20, "$35,000 - $49,999", false),
            (21, "$35,000 or more (undifferentiated)", true),
            (22, "$50,000 - $74,999", false),
            (23, "$75,000 - $99,999", false),
            (24, "$100,000 and over", false),
        ];

        let entries = rows
            .iter()
            .map(|&(code, label, excluded)| {
                (code, CodeEntry { code, label: label.to_string(), excluded })
            })
            .collect();
        Self { entries }
    }

    pub fn classify(&self, code: u16) -> CodeClass<'_> {
        if code >= SENTINEL_FLOOR {
            return CodeClass::Sentinel;
        }
        match self.entries.get(&code) {
            Some(entry) if entry.excluded => CodeClass::Excluded(&entry.label),
            Some(entry) => CodeClass::Bracket(&entry.label),
            None => CodeClass::Unknown,
        }
    }

    /// Label for a usable bracket, `None` for anything excluded from breakdowns
    pub fn bracket_label(&self, code: u16) -> Option<&str> {
        match self.classify(code) {
            CodeClass::Bracket(label) => Some(label),
            _ => None,
        }
    }

    pub fn is_bracket(&self, code: u16) -> bool {
        self.bracket_label(code).is_some()
    }
}

impl Default for Codebook {
    fn default() -> Self {
        Self::incfam07on()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exclusions() {
        let cb = Codebook::default();

        assert_eq!(cb.bracket_label(11), Some("$0 - $14,999"));
        assert_eq!(cb.bracket_label(24), Some("$100,000 and over"));
        assert!(matches!(cb.classify(10), CodeClass::Excluded(_)));
        assert!(matches!(cb.classify(21), CodeClass::Excluded(_)));
        for code in 96..=99 {
            assert_eq!(cb.classify(code), CodeClass::Sentinel);
        }
        assert_eq!(cb.classify(50), CodeClass::Unknown);
    }

    #[test]
    fn test_json_codebook() {
        let json = r#"[
            {"code": 1, "label": "Low"},
            {"code": 2, "label": "High"},
            {"code": 3, "label": "Any", "excluded": true}
        ]"#;
        let cb = Codebook::from_json_str(json).expect("valid codebook");

        assert!(cb.is_bracket(1));
        assert!(cb.is_bracket(2));
        assert!(!cb.is_bracket(3));
        // Codes from the default table are not implied
        assert!(!cb.is_bracket(22));
    }

    #[test]
    fn test_shipped_codebook_matches_default() {
        let shipped = Codebook::from_json_str(include_str!("../../config/incfam07on.json"))
            .expect("shipped codebook is valid");
        let default = Codebook::default();

        for code in 0..=120 {
            assert_eq!(shipped.bracket_label(code), default.bracket_label(code), "code {}", code);
        }
    }

    #[test]
    fn test_sentinel_cannot_be_bracket() {
        let json = r#"[{"code": 97, "label": "Refused"}]"#;
        assert!(matches!(
            Codebook::from_json_str(json),
            Err(ConfigError::SentinelBracket(97))
        ));
    }
}
