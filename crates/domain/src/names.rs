//! Character names as stored in the blob.
//!
//! The store keys characters by name, so the name typed into the sheet is
//! normalized into a filename-safe token before it is used.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Maximum length of a stored character name.
pub const MAX_CHARACTER_NAME_LENGTH: usize = 50;

/// Fallback when sanitization leaves nothing behind.
const FALLBACK_NAME: &str = "Character";

fn invalid_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("valid regex"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn underscore_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_{2,}").expect("valid regex"))
}

/// A normalized character name (`Aria_Stormborn`).
///
/// Deserialization accepts any string so documents written by older sheets
/// load unchanged; only [`CharacterName::from_sheet_input`] normalizes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterName(String);

impl CharacterName {
    /// Normalize the raw `character-name` field value.
    ///
    /// An empty name becomes `Unnamed_Character_YYYYMMDD` for `today`.
    pub fn from_sheet_input(raw: &str, today: NaiveDate) -> Self {
        let trimmed = raw.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed_Character_{}", today.format("%Y%m%d"))
        } else {
            trimmed.to_string()
        };

        let replaced = invalid_chars().replace_all(&base, "_");
        let replaced = whitespace_runs().replace_all(&replaced, "_");
        let replaced = underscore_runs().replace_all(&replaced, "_");
        let stripped = replaced.trim_matches('_');

        let name = if stripped.is_empty() {
            FALLBACK_NAME.to_string()
        } else {
            stripped.chars().take(MAX_CHARACTER_NAME_LENGTH).collect()
        };

        Self(name)
    }

    /// Wrap a stored name without normalizing it.
    pub fn from_stored(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name shown in character pickers (underscores read as spaces).
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn spaces_become_underscores() {
        let name = CharacterName::from_sheet_input("  Aria   Stormborn ", today());
        assert_eq!(name.as_str(), "Aria_Stormborn");
        assert_eq!(name.display_name(), "Aria Stormborn");
    }

    #[test]
    fn invalid_filename_characters_are_replaced_and_collapsed() {
        let name = CharacterName::from_sheet_input("Kor: the <Bold>/?", today());
        assert_eq!(name.as_str(), "Kor_the_Bold");
    }

    #[test]
    fn empty_input_uses_dated_placeholder() {
        let name = CharacterName::from_sheet_input("   ", today());
        assert_eq!(name.as_str(), "Unnamed_Character_20240309");
    }

    #[test]
    fn only_invalid_characters_fall_back() {
        let name = CharacterName::from_sheet_input("???", today());
        assert_eq!(name.as_str(), "Character");
    }

    #[test]
    fn long_names_are_truncated() {
        let raw = "x".repeat(80);
        let name = CharacterName::from_sheet_input(&raw, today());
        assert_eq!(name.as_str().chars().count(), MAX_CHARACTER_NAME_LENGTH);
    }
}
