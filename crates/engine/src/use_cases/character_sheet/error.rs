//! Character sheet derivation errors.

use crate::infrastructure::ports::RepoError;
use starsheet_domain::{CharacterId, DomainError};

/// Errors that can occur while deriving a character sheet.
#[derive(Debug, thiserror::Error)]
pub enum CharacterSheetError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
