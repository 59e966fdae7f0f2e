//! Character sheet use cases.
//!
//! Reads a character's reference rows through the ports, then runs the pure
//! derivation over that one snapshot.

mod error;

pub use error::CharacterSheetError;

use std::sync::Arc;

use starsheet_domain::derivation::require_level;
use starsheet_domain::{
    applicable_modifiers, derive_character_sheet, Character, CharacterId, DerivedSheet,
    DomainError, SheetInputs,
};

use crate::infrastructure::ports::{CharacterRepo, ReferenceDataRepo};

/// Result of deriving one stored character.
#[derive(Debug)]
pub struct SheetOutcome {
    pub character_id: CharacterId,
    pub name: String,
    pub result: Result<DerivedSheet, CharacterSheetError>,
}

/// Container for character sheet use cases.
pub struct CharacterSheetUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    reference_repo: Arc<dyn ReferenceDataRepo>,
}

impl CharacterSheetUseCases {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        reference_repo: Arc<dyn ReferenceDataRepo>,
    ) -> Self {
        Self {
            character_repo,
            reference_repo,
        }
    }

    /// Derive the sheet for a stored character.
    pub async fn derive(&self, character_id: CharacterId) -> Result<DerivedSheet, CharacterSheetError> {
        let character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterSheetError::CharacterNotFound(character_id))?;

        self.derive_for(&character).await
    }

    /// Derive a sheet for every stored character.
    ///
    /// A character that fails to derive does not stop the others; its error
    /// is reported in its outcome.
    pub async fn derive_all(&self) -> Result<Vec<SheetOutcome>, CharacterSheetError> {
        let characters = self.character_repo.list().await?;
        let mut outcomes = Vec::with_capacity(characters.len());

        for character in characters {
            let result = self.derive_for(&character).await;
            if let Err(e) = &result {
                tracing::warn!(
                    character_id = %character.id,
                    name = %character.name,
                    error = %e,
                    "Character sheet derivation failed"
                );
            }
            outcomes.push(SheetOutcome {
                character_id: character.id,
                name: character.name,
                result,
            });
        }

        tracing::info!(
            characters = outcomes.len(),
            failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
            "Derived character sheets"
        );
        Ok(outcomes)
    }

    /// Derive the sheet for a character that is not necessarily stored.
    pub async fn derive_for(&self, character: &Character) -> Result<DerivedSheet, CharacterSheetError> {
        let level = require_level(character.level)?;

        let race = match character.race_id {
            Some(id) => Some(
                self.reference_repo
                    .get_race(id)
                    .await?
                    .ok_or_else(|| DomainError::missing_row("Race", id))?,
            ),
            None => None,
        };
        let class = match character.class_id {
            Some(id) => Some(
                self.reference_repo
                    .get_class(id)
                    .await?
                    .ok_or_else(|| DomainError::missing_row("Class", id))?,
            ),
            None => None,
        };
        let theme = match character.theme_id {
            Some(id) => Some(
                self.reference_repo
                    .get_theme(id)
                    .await?
                    .ok_or_else(|| DomainError::missing_row("Theme", id))?,
            ),
            None => None,
        };
        let armor = match character.equipped_armor_id {
            Some(id) => Some(
                self.reference_repo
                    .get_armor(id)
                    .await?
                    .ok_or_else(|| DomainError::missing_row("Armor", id))?,
            ),
            None => None,
        };

        let mut feats = Vec::with_capacity(character.feat_ids.len());
        for id in &character.feat_ids {
            let feat = self
                .reference_repo
                .get_feat(*id)
                .await?
                .ok_or_else(|| DomainError::missing_row("Feat", id))?;
            feats.push(feat);
        }

        // Without both rows the derivation reports which one is absent
        let modifiers = match (&race, &class) {
            (Some(race), Some(class)) => applicable_modifiers(race, class, &feats, level),
            _ => Vec::new(),
        };

        let sheet = derive_character_sheet(&SheetInputs {
            character,
            race: race.as_ref(),
            class: class.as_ref(),
            theme: theme.as_ref(),
            equipped_armor: armor.as_ref(),
            modifiers: &modifiers,
        })?;

        tracing::debug!(
            character_id = %character.id,
            level = level,
            modifiers = modifiers.len(),
            "Derived character sheet"
        );
        Ok(sheet)
    }
}
