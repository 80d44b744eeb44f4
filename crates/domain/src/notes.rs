use serde::{Deserialize, Serialize};

use crate::ids::NotesPageId;

/// Name given to the page created from a legacy single `notes` field.
pub const LEGACY_NOTES_PAGE_NAME: &str = "Notes";

/// One named page of free-text notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesPage {
    pub id: NotesPageId,
    pub name: String,
    #[serde(default)]
    pub content: String,
}

impl NotesPage {
    pub fn new(id: NotesPageId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content: String::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}
