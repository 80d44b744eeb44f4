//! HeroSheet engine library.
//!
//! Persistence model for the hero character sheet: the in-memory sheet
//! state, the documents it is saved as, and the multi-character store in the
//! host's blob slot.
//!
//! ## Structure
//!
//! - `entities/` - Form fields and the dynamic sheet sections
//! - `stores/` - Sheet session and character storage
//! - `use_cases/` - Save/load orchestration and the dice bridge
//! - `infrastructure/` - Host ports and their adapters

pub mod entities;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use stores::{CharacterStore, SheetSession};
pub use use_cases::SheetController;
