//! State storage modules.
//!
//! - `SheetSession` - the open sheet's in-memory state
//! - `CharacterStore` - saved characters in the host blob

pub mod character_store;
pub mod session;

pub use character_store::{CharacterStore, SaveAction, SaveOutcome, StoreError};
pub use session::SheetSession;
