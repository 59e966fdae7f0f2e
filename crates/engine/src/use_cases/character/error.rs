//! Character management errors.

use crate::infrastructure::ports::RepoError;
use starsheet_domain::{CharacterId, DomainError};

#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
