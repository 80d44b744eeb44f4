//! Notes pages.
//!
//! Only the visible page is editable. Keystrokes go to an edit buffer that is
//! written back into the page when the user switches pages or the sheet is
//! collected for saving.

use std::collections::HashSet;

use herosheet_domain::{
    keys, CharacterDocument, DomainError, NotesPage, NotesPageId, LEGACY_NOTES_PAGE_NAME,
};

use super::{SectionError, SheetSection};

#[derive(Debug, Clone)]
pub struct NotesSection {
    pages: Vec<NotesPage>,
    current: Option<NotesPageId>,
    next_id: u32,
    buffer: String,
}

impl Default for NotesSection {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            current: None,
            next_id: 1,
            buffer: String::new(),
        }
    }
}

impl NotesSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[NotesPage] {
        &self.pages
    }

    pub fn current_page_id(&self) -> Option<&NotesPageId> {
        self.current.as_ref()
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Text currently shown in the editor.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Create a page and make it the visible one.
    pub fn add_page(&mut self, name: &str) -> Result<NotesPageId, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Page name cannot be empty"));
        }
        if self.pages.iter().any(|p| p.name == name) {
            return Err(DomainError::duplicate("notes page", name));
        }

        let next = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| DomainError::validation("No notes page ids left to assign"))?;
        let id = NotesPageId::from_counter(self.next_id);
        self.next_id = next;
        self.pages.push(NotesPage::new(id.clone(), name));
        self.switch_to(&id)?;
        Ok(id)
    }

    /// Save the visible page's buffer, then show `id`.
    pub fn switch_to(&mut self, id: &NotesPageId) -> Result<(), DomainError> {
        let content = self
            .pages
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.content.clone())
            .ok_or_else(|| DomainError::not_found("notes page", id.as_str()))?;

        if self.current.as_ref() != Some(id) {
            self.flush();
        }
        self.current = Some(id.clone());
        self.buffer = content;
        Ok(())
    }

    /// Replace the editor text. Returns `false` when no page is visible.
    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.buffer = text.into();
        true
    }

    /// Remove a page. Deleting the visible page shows the first remaining
    /// one, or nothing when none are left.
    pub fn delete_page(&mut self, id: &NotesPageId) -> bool {
        let before = self.pages.len();
        self.pages.retain(|p| &p.id != id);
        if self.pages.len() == before {
            return false;
        }

        if self.current.as_ref() == Some(id) {
            match self.pages.first() {
                Some(first) => {
                    self.current = Some(first.id.clone());
                    self.buffer = first.content.clone();
                }
                None => {
                    self.current = None;
                    self.buffer.clear();
                }
            }
        }
        true
    }

    /// Write the editor buffer into the visible page.
    pub fn flush(&mut self) {
        let Some(current) = &self.current else {
            return;
        };
        if let Some(page) = self.pages.iter_mut().find(|p| &p.id == current) {
            page.content.clone_from(&self.buffer);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Numeric suffix of a `notes-page-N` id.
fn counter_of(id: &NotesPageId) -> Option<u32> {
    id.as_str()
        .strip_prefix(NotesPageId::PREFIX)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|n| n.parse().ok())
}

/// Stored pages minus any whose id or name repeats an earlier page.
fn distinct_pages(stored: &[NotesPage]) -> Vec<NotesPage> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    let mut pages = Vec::with_capacity(stored.len());
    for page in stored {
        if ids.contains(&page.id) || names.contains(page.name.as_str()) {
            tracing::warn!(page_id = %page.id, name = %page.name, "Skipping duplicate notes page");
            continue;
        }
        ids.insert(page.id.clone());
        names.insert(page.name.as_str());
        pages.push(page.clone());
    }
    pages
}

impl SheetSection for NotesSection {
    fn name(&self) -> &'static str {
        keys::NOTES_PAGES
    }

    fn collect(&mut self) -> CharacterDocument {
        self.flush();
        CharacterDocument {
            notes_pages: Some(self.pages.clone()),
            current_notes_page_id: self.current.clone(),
            next_notes_page_id: Some(self.next_id),
            ..CharacterDocument::default()
        }
    }

    fn reset(&mut self) {
        self.clear();
    }

    fn restore(&mut self, document: &CharacterDocument) -> Result<(), SectionError> {
        let mut pages = distinct_pages(document.notes_pages.as_deref().unwrap_or_default());

        let past_existing = pages
            .iter()
            .filter_map(|p| counter_of(&p.id))
            .max()
            .map_or(1, |max| max.saturating_add(1));
        let mut next_id = document.next_notes_page_id.unwrap_or(1).max(past_existing);

        let legacy = document
            .notes
            .as_deref()
            .filter(|n| pages.is_empty() && !n.trim().is_empty());
        if let Some(text) = legacy {
            tracing::debug!("Converting legacy notes field into a page");
            pages.push(
                NotesPage::new(NotesPageId::from_counter(next_id), LEGACY_NOTES_PAGE_NAME)
                    .with_content(text),
            );
            // A saturated counter is never minted from, so the page keeps
            // that id to itself.
            next_id = next_id.saturating_add(1);
        }

        let current = document
            .current_notes_page_id
            .as_ref()
            .filter(|id| pages.iter().any(|p| &p.id == *id))
            .or_else(|| pages.first().map(|p| &p.id))
            .cloned();
        let buffer = current
            .as_ref()
            .and_then(|id| pages.iter().find(|p| &p.id == id))
            .map(|p| p.content.clone())
            .unwrap_or_default();

        self.pages = pages;
        self.current = current;
        self.next_id = next_id;
        self.buffer = buffer;
        Ok(())
    }
}
