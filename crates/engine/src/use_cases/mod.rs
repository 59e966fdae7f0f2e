//! Use cases - User story orchestration.
//!
//! Each module contains use cases for one area. Use cases talk to storage
//! only through the port traits.

pub mod character;
pub mod character_sheet;

pub use character::{CharacterDraft, CharacterError, CharacterManagementUseCases};
pub use character_sheet::{CharacterSheetError, CharacterSheetUseCases, SheetOutcome};
