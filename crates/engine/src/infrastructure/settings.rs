//! Sheet settings.
//!
//! Every field has a default so a host can pass a partial JSON object (or
//! nothing at all) and still get a working sheet.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============================================================================
// Defaults
// ============================================================================

/// Version literal stamped into every assembled document.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Field id of the "clear storage" button; never persisted.
pub const CLEAR_STORAGE_FIELD: &str = "clear-storage";

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

fn default_notes_debounce_ms() -> u64 {
    1000
}

fn default_autosave_interval_secs() -> u64 {
    30
}

fn default_notification_dismiss_secs() -> u64 {
    5
}

fn default_reserved_field_ids() -> Vec<String> {
    vec![CLEAR_STORAGE_FIELD.to_string()]
}

// ============================================================================
// SheetSettings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSettings {
    #[serde(default = "default_version")]
    pub version: String,

    /// Quiet period after the last notes keystroke before saving.
    #[serde(default = "default_notes_debounce_ms")]
    pub notes_debounce_ms: u64,

    #[serde(default = "default_autosave_interval_secs")]
    pub autosave_interval_secs: u64,

    #[serde(default = "default_notification_dismiss_secs")]
    pub notification_dismiss_secs: u64,

    /// Field ids that are enumerated by the registry but never saved.
    #[serde(default = "default_reserved_field_ids")]
    pub reserved_field_ids: Vec<String>,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            notes_debounce_ms: default_notes_debounce_ms(),
            autosave_interval_secs: default_autosave_interval_secs(),
            notification_dismiss_secs: default_notification_dismiss_secs(),
            reserved_field_ids: default_reserved_field_ids(),
        }
    }
}

impl SheetSettings {
    /// Parse host-supplied settings; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn notes_debounce(&self) -> Duration {
        Duration::from_millis(self.notes_debounce_ms)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    pub fn notification_dismiss(&self) -> Duration {
        Duration::from_secs(self.notification_dismiss_secs)
    }

    pub fn is_reserved(&self, field_id: &str) -> bool {
        self.reserved_field_ids.iter().any(|id| id == field_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let settings = SheetSettings::from_json("{}").unwrap();
        assert_eq!(settings, SheetSettings::default());
        assert_eq!(settings.version, "1.0");
        assert_eq!(settings.notes_debounce(), Duration::from_millis(1000));
        assert_eq!(settings.autosave_interval(), Duration::from_secs(30));
        assert!(settings.is_reserved("clear-storage"));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let settings = SheetSettings::from_json(r#"{"notes_debounce_ms": 250}"#).unwrap();
        assert_eq!(settings.notes_debounce(), Duration::from_millis(250));
        assert_eq!(settings.notification_dismiss(), Duration::from_secs(5));
    }
}
