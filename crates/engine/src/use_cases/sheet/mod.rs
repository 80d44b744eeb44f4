//! Sheet use cases.
//!
//! Assembling documents from the open sheet, restoring them into it, and
//! the controller that ties both to the character store.

mod assemble;
mod controller;
mod error;
mod restore;

pub use assemble::DocumentAssembler;
pub use controller::SheetController;
pub use error::SheetError;
pub use restore::{RestoreReport, SectionFailure, SheetLoader};
