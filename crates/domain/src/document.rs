//! The normalized record of one character's sheet.
//!
//! A document is a flat map of form field ids to scalar values, plus the
//! structured keys owned by the dynamic sections and the save metadata. The
//! JSON shape is shared with sheets already stored in hosts, so every
//! structured key is optional and unknown keys are kept as flat fields.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::abilities::Ability;
use crate::common::{parse_datetime_or, StringExt};
use crate::ids::{CharacterId, NotesPageId};
use crate::inventory::InventoryItem;
use crate::names::CharacterName;
use crate::notes::NotesPage;
use crate::values::FieldValue;

/// JSON keys with a fixed meaning in a stored document.
pub mod keys {
    pub const INVENTORY_ITEMS: &str = "inventoryItems";
    pub const SKILLS: &str = "skills";
    pub const CHARACTER_ABILITIES: &str = "characterAbilities";
    pub const NEXT_ABILITY_ID: &str = "nextAbilityId";
    pub const NOTES_PAGES: &str = "notesPages";
    pub const CURRENT_NOTES_PAGE_ID: &str = "currentNotesPageId";
    pub const NEXT_NOTES_PAGE_ID: &str = "nextNotesPageId";
    pub const NOTES: &str = "notes";
    pub const VICTORY_COUNT: &str = "victoryCount";
    pub const CHARACTER_NAME: &str = "characterName";
    pub const CHARACTER_ID: &str = "characterId";
    pub const SAVED_AT: &str = "savedAt";
    pub const LAST_SAVED: &str = "lastSaved";
    pub const VERSION: &str = "version";
    /// Written by very old sheets; never restored.
    pub const SAVED_CHARACTERS: &str = "savedCharacters";

    /// Keys that belong to a dynamic section or to save metadata rather than
    /// to a single form field.
    pub const STRUCTURED: &[&str] = &[
        INVENTORY_ITEMS,
        SKILLS,
        CHARACTER_ABILITIES,
        NEXT_ABILITY_ID,
        NOTES_PAGES,
        CURRENT_NOTES_PAGE_ID,
        NEXT_NOTES_PAGE_ID,
        NOTES,
        VICTORY_COUNT,
        CHARACTER_NAME,
        CHARACTER_ID,
        SAVED_AT,
        LAST_SAVED,
        VERSION,
        SAVED_CHARACTERS,
    ];

    pub fn is_structured(key: &str) -> bool {
        STRUCTURED.contains(&key)
    }
}

/// Field id of the name input on the main tab.
pub const CHARACTER_NAME_FIELD: &str = "character-name";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDocument {
    /// Primitive form fields by id.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_items: Option<Vec<InventoryItem>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_abilities: Option<Vec<Ability>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_ability_id: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_pages: Option<Vec<NotesPage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_notes_page_id: Option<NotesPageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_notes_page_id: Option<u32>,
    /// Single free-text notes field from sheets that predate notes pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub victory_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_name: Option<CharacterName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<CharacterId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl CharacterDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, id: &str) -> Option<&FieldValue> {
        self.fields.get(id)
    }

    pub fn set_field(&mut self, id: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(id.into(), value.into());
    }

    /// Text value of a flat field, if it holds text.
    pub fn field_text(&self, id: &str) -> Option<&str> {
        self.field(id).and_then(FieldValue::as_str)
    }

    /// Name the document is stored under, falling back to the raw name field.
    pub fn display_character_name(&self) -> Option<String> {
        self.character_name
            .as_ref()
            .map(|name| name.as_str().to_string())
            .or_else(|| self.field_text(CHARACTER_NAME_FIELD).and_then(|s| s.into_option()))
    }

    /// Merge a section's partial document into this one.
    ///
    /// Keys the partial sets win over what is already here, including flat
    /// fields that happen to share a structured key's name.
    pub fn overlay(&mut self, partial: CharacterDocument) {
        let CharacterDocument {
            fields,
            inventory_items,
            skills,
            character_abilities,
            next_ability_id,
            notes_pages,
            current_notes_page_id,
            next_notes_page_id,
            notes,
            victory_count,
            character_name,
            character_id,
            saved_at,
            last_saved,
            version,
        } = partial;

        self.fields.extend(fields);
        overlay_opt(&mut self.inventory_items, inventory_items);
        overlay_opt(&mut self.skills, skills);
        overlay_opt(&mut self.character_abilities, character_abilities);
        overlay_opt(&mut self.next_ability_id, next_ability_id);
        overlay_opt(&mut self.notes_pages, notes_pages);
        overlay_opt(&mut self.current_notes_page_id, current_notes_page_id);
        overlay_opt(&mut self.next_notes_page_id, next_notes_page_id);
        overlay_opt(&mut self.notes, notes);
        overlay_opt(&mut self.victory_count, victory_count);
        overlay_opt(&mut self.character_name, character_name);
        overlay_opt(&mut self.character_id, character_id);
        overlay_opt(&mut self.saved_at, saved_at);
        overlay_opt(&mut self.last_saved, last_saved);
        overlay_opt(&mut self.version, version);

        self.fields.retain(|key, _| !keys::is_structured(key));
    }

    /// `savedAt` as a timestamp; missing or malformed sorts oldest.
    pub fn saved_at_or_min(&self) -> DateTime<Utc> {
        self.saved_at
            .as_deref()
            .map(|s| parse_datetime_or(s, DateTime::<Utc>::MIN_UTC))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

fn overlay_opt<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// One row in the character picker.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSummary {
    pub id: CharacterId,
    pub name: String,
    pub display_name: String,
    pub last_saved: Option<String>,
    pub level: u32,
    pub class: String,
    pub ancestry: String,
    pub subclass: String,
    pub career: String,
    pub document: CharacterDocument,
}

impl CharacterSummary {
    pub const UNKNOWN_NAME: &'static str = "Unknown Character";

    pub fn from_document(id: CharacterId, document: CharacterDocument) -> Self {
        let name = document
            .character_name
            .as_ref()
            .map(|n| n.as_str().to_string())
            .unwrap_or_else(|| Self::UNKNOWN_NAME.to_string());
        let text = |key: &str| document.field_text(key).unwrap_or_default().to_string();
        let level = document
            .field("level")
            .and_then(FieldValue::as_i64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0);

        Self {
            id,
            display_name: name.replace('_', " "),
            name,
            last_saved: document.saved_at.clone(),
            level,
            class: text("class"),
            ancestry: text("ancestry"),
            subclass: text("subclass"),
            career: text("career"),
            document,
        }
    }

    /// "Fury Human Reaver Soldier (Level 3)" style subtitle.
    pub fn details_line(&self) -> String {
        let details: Vec<&str> = [
            self.class.as_str(),
            self.ancestry.as_str(),
            self.subclass.as_str(),
            self.career.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
        let mut line = details.join(" ");
        if self.level > 0 {
            line.push_str(&format!(" (Level {})", self.level));
        }
        line
    }
}
