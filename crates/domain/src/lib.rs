//! HeroSheet domain: the character document and the records it is built from.
//!
//! Pure types only. Nothing here performs I/O or depends on an async runtime;
//! the engine crate owns storage, sessions and scheduling.

pub mod abilities;
pub mod common;
pub mod document;
pub mod error;
pub mod ids;
pub mod inventory;
pub mod names;
pub mod notes;
pub mod skills;
pub mod values;

pub use abilities::{Ability, AbilityDraft, DamageOption, ACTION_FILTER_ALL, DEFAULT_DAMAGE_TYPE};
pub use document::{keys, CharacterDocument, CharacterSummary, CHARACTER_NAME_FIELD};
pub use error::DomainError;
pub use ids::{AbilityId, CharacterId, NotesPageId};
pub use inventory::{total_bonuses, InventoryItem, StatKey};
pub use names::{CharacterName, MAX_CHARACTER_NAME_LENGTH};
pub use notes::{NotesPage, LEGACY_NOTES_PAGE_NAME};
pub use skills::{
    legacy_skill_key, skill_category, skill_from_legacy_key, SelectedSkills, SkillCategory,
    SkillGroup, SKILL_CATALOG,
};
pub use values::FieldValue;
