//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Ports exist for:
//! - Character storage
//! - Reference data (races, classes, themes, equipment, feats, setting rows)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::{CharacterRepo, ReferenceDataRepo};
pub use testing::ClockPort;

#[cfg(test)]
pub use repos::{MockCharacterRepo, MockReferenceDataRepo};
#[cfg(test)]
pub use testing::MockClockPort;
