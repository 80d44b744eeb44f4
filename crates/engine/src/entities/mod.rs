//! Sheet state: the fixed form fields and the dynamic sections.
//!
//! Each dynamic section owns a variable-length list the user edits and
//! converts it to and from its slice of a [`CharacterDocument`].

mod abilities;
mod fields;
mod inventory;
mod notes;
mod skills;

pub use abilities::AbilitiesSection;
pub use fields::{FieldGroup, FieldKind, FieldRegistry, FormField};
pub use inventory::{InventoryRow, InventorySection};
pub use notes::NotesSection;
pub use skills::SkillsSection;

use herosheet_domain::{CharacterDocument, DomainError};

#[derive(Debug, thiserror::Error)]
pub enum SectionError {
    #[error("{section}: {message}")]
    InvalidData {
        section: &'static str,
        message: String,
    },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl SectionError {
    pub fn invalid(section: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidData {
            section,
            message: message.into(),
        }
    }
}

/// A dynamic part of the sheet that contributes structured keys to a document.
pub trait SheetSection: Send {
    /// Short name used in logs and restore reports.
    fn name(&self) -> &'static str;

    /// This section's slice of the document. Only the keys the section owns
    /// are set.
    fn collect(&mut self) -> CharacterDocument;

    /// Replace the section's state with what `document` holds.
    ///
    /// Stored records that a live edit would reject (a repeated skill, a
    /// duplicate page name) are skipped with a warning.
    fn restore(&mut self, document: &CharacterDocument) -> Result<(), SectionError>;

    /// Drop all state, as if the section had just been mounted.
    fn reset(&mut self);
}
