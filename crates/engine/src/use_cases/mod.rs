//! Use cases - User story orchestration.
//!
//! - `sheet` - saving, loading and importing characters
//! - `dice` - rolls placed in the host's dice tray

pub mod dice;
pub mod sheet;

pub use dice::{DiceEvent, ResolvedRoll, RollTracker};
pub use sheet::{
    DocumentAssembler, RestoreReport, SectionFailure, SheetController, SheetError, SheetLoader,
};
