//! Multi-character storage on top of the host's single blob slot.
//!
//! The blob holds `{"characters": {<id>: <document>, ...}}`. Every operation
//! reads the whole blob, changes it in memory and writes it back. There is
//! no locking: two saves that overlap both read the same starting blob and
//! the second write replaces the first.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use herosheet_domain::common::{format_timestamp, parse_datetime_or};
use herosheet_domain::{
    keys, CharacterDocument, CharacterId, CharacterName, CharacterSummary, CHARACTER_NAME_FIELD,
};

use crate::infrastructure::ports::{BlobError, BlobStore, ClockPort, RandomPort};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Character not found: {0}")]
    NotFound(String),
    #[error("Failed to write character storage: {0}")]
    StorageWrite(#[source] BlobError),
    #[error("Character storage is corrupt: {0}")]
    CorruptStorage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

// =============================================================================
// Results
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub character_id: CharacterId,
    pub character_name: CharacterName,
    pub action: SaveAction,
}

// =============================================================================
// Blob layout
// =============================================================================

/// Entries are kept as raw JSON so one malformed character never prevents
/// reading or rewriting the others.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreBlob {
    #[serde(default)]
    characters: BTreeMap<CharacterId, Value>,
    /// Top-level keys written by other tools.
    #[serde(flatten)]
    other: serde_json::Map<String, Value>,
}

fn stored_name(entry: &Value) -> Option<&str> {
    entry.get(keys::CHARACTER_NAME).and_then(Value::as_str)
}

fn stored_saved_at(entry: &Value) -> DateTime<Utc> {
    entry
        .get(keys::SAVED_AT)
        .and_then(Value::as_str)
        .map(|s| parse_datetime_or(s, DateTime::<Utc>::MIN_UTC))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

impl StoreBlob {
    /// Last entry stored under `name`, in blob order. Until duplicates are
    /// cleaned up, saves keep updating that one entry.
    fn find_by_name(&self, name: &str) -> Option<CharacterId> {
        self.characters
            .iter()
            .rev()
            .find(|(_, entry)| stored_name(entry) == Some(name))
            .map(|(id, _)| id.clone())
    }
}

// =============================================================================
// CharacterStore
// =============================================================================

pub struct CharacterStore {
    blob: Arc<dyn BlobStore>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl CharacterStore {
    pub fn new(
        blob: Arc<dyn BlobStore>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            blob,
            clock,
            random,
        }
    }

    /// Store `document` under its character name.
    ///
    /// An existing entry with the same name is replaced in place and keeps
    /// its id; otherwise a new entry is created under a fresh id.
    pub async fn save(&self, mut document: CharacterDocument) -> Result<SaveOutcome, StoreError> {
        let now = self.clock.now();
        let raw_name = document
            .field_text(CHARACTER_NAME_FIELD)
            .map(str::to_string)
            .or_else(|| document.character_name.as_ref().map(|n| n.as_str().to_string()))
            .unwrap_or_default();
        let name = CharacterName::from_sheet_input(&raw_name, now.date_naive());

        let mut blob = self.read_blob().await?;
        let (character_id, action) = match blob.find_by_name(name.as_str()) {
            Some(id) => (id, SaveAction::Updated),
            None => (self.mint_id(&blob), SaveAction::Created),
        };

        document.character_name = Some(name.clone());
        document.character_id = Some(character_id.clone());
        document.saved_at = Some(format_timestamp(now));

        let entry =
            serde_json::to_value(&document).map_err(|e| StoreError::Serialization(e.to_string()))?;
        blob.characters.insert(character_id.clone(), entry);
        self.write_blob(&blob).await?;

        tracing::info!(
            character_id = %character_id,
            character_name = %name,
            action = ?action,
            "Character saved"
        );

        Ok(SaveOutcome {
            character_id,
            character_name: name,
            action,
        })
    }

    /// Every stored character, most recently saved first.
    ///
    /// Never fails: unreadable storage lists as empty and entries that do not
    /// parse are skipped.
    pub async fn list_all(&self) -> Vec<CharacterSummary> {
        let blob = match self.read_blob().await {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!(error = %e, "Listing characters from unusable storage");
                return Vec::new();
            }
        };

        let mut summaries: Vec<CharacterSummary> = blob
            .characters
            .into_iter()
            .filter_map(|(id, entry)| match serde_json::from_value(entry) {
                Ok(document) => Some(CharacterSummary::from_document(id, document)),
                Err(e) => {
                    tracing::warn!(character_id = %id, error = %e, "Skipping unreadable character");
                    None
                }
            })
            .collect();

        summaries.sort_by_key(|s| std::cmp::Reverse(s.document.saved_at_or_min()));
        summaries
    }

    pub async fn load_by_id(&self, id: &CharacterId) -> Result<CharacterDocument, StoreError> {
        let mut blob = self.read_blob_or_empty().await;
        let entry = blob
            .characters
            .remove(id)
            .ok_or_else(|| StoreError::not_found(id.as_str()))?;
        let document = parse_entry(entry)?;
        tracing::debug!(character_id = %id, "Character loaded");
        Ok(document)
    }

    pub async fn load_by_name(&self, name: &str) -> Result<CharacterDocument, StoreError> {
        let mut blob = self.read_blob_or_empty().await;
        let id = blob
            .find_by_name(name)
            .ok_or_else(|| StoreError::not_found(name))?;
        let entry = blob
            .characters
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(name))?;
        let document = parse_entry(entry)?;
        tracing::debug!(character_id = %id, character_name = %name, "Character loaded");
        Ok(document)
    }

    /// Keep only the most recently saved entry for each character name.
    ///
    /// Returns how many entries were removed. Nothing is written when there
    /// is nothing to remove.
    pub async fn deduplicate(&self) -> Result<usize, StoreError> {
        let mut blob = self.read_blob().await?;

        let mut latest: HashMap<String, (CharacterId, DateTime<Utc>)> = HashMap::new();
        let mut losers = Vec::new();
        for (id, entry) in &blob.characters {
            let Some(name) = stored_name(entry) else {
                continue;
            };
            let saved_at = stored_saved_at(entry);
            match latest.get_mut(name) {
                Some((kept_id, kept_at)) if saved_at > *kept_at => {
                    losers.push(std::mem::replace(kept_id, id.clone()));
                    *kept_at = saved_at;
                }
                Some(_) => losers.push(id.clone()),
                None => {
                    latest.insert(name.to_string(), (id.clone(), saved_at));
                }
            }
        }

        if losers.is_empty() {
            tracing::debug!("No duplicate characters found");
            return Ok(0);
        }

        for id in &losers {
            blob.characters.remove(id);
        }
        self.write_blob(&blob).await?;

        tracing::info!(removed = losers.len(), "Duplicate characters removed");
        Ok(losers.len())
    }

    // -------------------------------------------------------------------------
    // Blob access
    // -------------------------------------------------------------------------

    /// Current blob. Missing, empty or unreadable storage counts as empty;
    /// storage that holds something other than a character blob is an error
    /// so it is never overwritten.
    async fn read_blob(&self) -> Result<StoreBlob, StoreError> {
        let raw = match self.blob.get_blob().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Character storage unreadable, treating as empty");
                None
            }
        };

        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(StoreBlob::default()),
            Some(text) => {
                serde_json::from_str(text).map_err(|e| StoreError::CorruptStorage(e.to_string()))
            }
        }
    }

    async fn read_blob_or_empty(&self) -> StoreBlob {
        self.read_blob().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Reading characters from unusable storage");
            StoreBlob::default()
        })
    }

    async fn write_blob(&self, blob: &StoreBlob) -> Result<(), StoreError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        blob.serialize(&mut serializer)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let text = String::from_utf8(out).map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.blob.set_blob(text).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to write character storage");
            StoreError::StorageWrite(e)
        })
    }

    fn mint_id(&self, blob: &StoreBlob) -> CharacterId {
        loop {
            let id = CharacterId::from_uuid(self.random.gen_uuid());
            if !blob.characters.contains_key(&id) {
                return id;
            }
            tracing::debug!(character_id = %id, "Minted id already in use, retrying");
        }
    }
}

fn parse_entry(entry: Value) -> Result<CharacterDocument, StoreError> {
    serde_json::from_value(entry).map_err(|e| StoreError::Serialization(e.to_string()))
}
