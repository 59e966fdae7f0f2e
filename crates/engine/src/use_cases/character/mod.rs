//! Character management use cases.
//!
//! Create, update and delete characters as the builder wizard does, plus the
//! option listings its selection steps show.

mod error;

pub use error::CharacterError;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use starsheet_domain::derivation::require_level;
use starsheet_domain::{
    AbilityScores, Alignment, AlignmentId, Character, CharacterClass, CharacterId, ClassId,
    Deity, DeityId, DomainError, EquipmentId, FeatId, Race, RaceId, SizeId, SkillRanks, SpellId,
    Theme, ThemeId, World, WorldId,
};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, ReferenceDataRepo};

/// Every field the builder collects. Used for both create and update; an
/// update replaces all editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDraft {
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub abilities: AbilityScores,
    #[serde(default)]
    pub race_id: Option<RaceId>,
    #[serde(default)]
    pub class_id: Option<ClassId>,
    #[serde(default)]
    pub theme_id: Option<ThemeId>,
    #[serde(default)]
    pub deity_id: Option<DeityId>,
    #[serde(default)]
    pub home_world_id: Option<WorldId>,
    #[serde(default)]
    pub alignment_id: Option<AlignmentId>,
    #[serde(default)]
    pub size_id: Option<SizeId>,
    #[serde(default)]
    pub feat_ids: Vec<FeatId>,
    #[serde(default)]
    pub spell_ids: Vec<SpellId>,
    #[serde(default)]
    pub equipped_armor_id: Option<EquipmentId>,
    #[serde(default)]
    pub skill_ranks: SkillRanks,
}

/// Choices for the builder's selection steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderOptions {
    pub races: Vec<Race>,
    pub classes: Vec<CharacterClass>,
    pub themes: Vec<Theme>,
    pub deities: Vec<Deity>,
    pub worlds: Vec<World>,
    pub alignments: Vec<Alignment>,
}

/// Choices narrowed to one home world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldOptions {
    pub native_races: Vec<Race>,
    pub deities: Vec<Deity>,
}

pub struct CharacterManagementUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    reference_repo: Arc<dyn ReferenceDataRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CharacterManagementUseCases {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        reference_repo: Arc<dyn ReferenceDataRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            character_repo,
            reference_repo,
            clock,
        }
    }

    pub async fn create(&self, draft: CharacterDraft) -> Result<Character, CharacterError> {
        self.check_references(&draft).await?;

        let mut character = Character::new(draft.name.clone(), self.clock.now())?;
        apply_draft(&mut character, draft)?;
        self.character_repo.save(&character).await?;

        tracing::info!(
            character_id = %character.id,
            name = %character.name,
            "Created character"
        );
        Ok(character)
    }

    pub async fn update(
        &self,
        character_id: CharacterId,
        draft: CharacterDraft,
    ) -> Result<Character, CharacterError> {
        let mut character = self
            .character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterError::NotFound(character_id))?;

        self.check_references(&draft).await?;
        apply_draft(&mut character, draft)?;
        character.touch(self.clock.now());
        self.character_repo.save(&character).await?;

        tracing::info!(character_id = %character_id, "Updated character");
        Ok(character)
    }

    pub async fn delete(&self, character_id: CharacterId) -> Result<(), CharacterError> {
        if self.character_repo.get(character_id).await?.is_none() {
            return Err(CharacterError::NotFound(character_id));
        }
        self.character_repo.delete(character_id).await?;

        tracing::info!(character_id = %character_id, "Deleted character");
        Ok(())
    }

    pub async fn builder_options(&self) -> Result<BuilderOptions, CharacterError> {
        Ok(BuilderOptions {
            races: self.reference_repo.list_races().await?,
            classes: self.reference_repo.list_classes().await?,
            themes: self.reference_repo.list_themes().await?,
            deities: self.reference_repo.list_deities().await?,
            worlds: self.reference_repo.list_worlds().await?,
            alignments: self.reference_repo.list_alignments().await?,
        })
    }

    pub async fn world_options(&self, world_id: WorldId) -> Result<WorldOptions, CharacterError> {
        if self.reference_repo.get_world(world_id).await?.is_none() {
            return Err(DomainError::missing_row("World", world_id).into());
        }
        Ok(WorldOptions {
            native_races: self.reference_repo.list_native_races(world_id).await?,
            deities: self.reference_repo.list_deities_for_world(world_id).await?,
        })
    }

    /// Every id on the draft must name an existing reference row.
    async fn check_references(&self, draft: &CharacterDraft) -> Result<(), CharacterError> {
        let repo = &self.reference_repo;

        if let Some(id) = draft.race_id {
            repo.get_race(id)
                .await?
                .ok_or_else(|| DomainError::missing_row("Race", id))?;
        }
        if let Some(id) = draft.class_id {
            repo.get_class(id)
                .await?
                .ok_or_else(|| DomainError::missing_row("Class", id))?;
        }
        if let Some(id) = draft.theme_id {
            repo.get_theme(id)
                .await?
                .ok_or_else(|| DomainError::missing_row("Theme", id))?;
        }
        if let Some(id) = draft.deity_id {
            repo.get_deity(id)
                .await?
                .ok_or_else(|| DomainError::missing_row("Deity", id))?;
        }
        if let Some(id) = draft.home_world_id {
            repo.get_world(id)
                .await?
                .ok_or_else(|| DomainError::missing_row("World", id))?;
        }
        if let Some(id) = draft.alignment_id {
            repo.get_alignment(id)
                .await?
                .ok_or_else(|| DomainError::missing_row("Alignment", id))?;
        }
        if let Some(id) = draft.size_id {
            repo.get_size(id)
                .await?
                .ok_or_else(|| DomainError::missing_row("Size", id))?;
        }
        if let Some(id) = draft.equipped_armor_id {
            repo.get_armor(id)
                .await?
                .ok_or_else(|| DomainError::missing_row("Armor", id))?;
        }
        for id in &draft.feat_ids {
            repo.get_feat(*id)
                .await?
                .ok_or_else(|| DomainError::missing_row("Feat", id))?;
        }
        for id in &draft.spell_ids {
            repo.get_spell(*id)
                .await?
                .ok_or_else(|| DomainError::missing_row("Spell", id))?;
        }
        Ok(())
    }
}

/// Validates the draft's own values and copies them onto `character`.
fn apply_draft(character: &mut Character, draft: CharacterDraft) -> Result<(), DomainError> {
    if let Some(level) = draft.level {
        require_level(Some(level))?;
    }
    draft.abilities.validate()?;
    let max_ranks = i32::from(draft.level.unwrap_or(0));
    for (skill, ranks) in draft.skill_ranks.iter() {
        if !(0..=max_ranks).contains(&ranks) {
            return Err(DomainError::invalid_range(
                format!("{skill} ranks"),
                ranks,
                0,
                max_ranks,
            ));
        }
    }

    character.rename(draft.name)?;
    character.set_description(draft.description.unwrap_or_default())?;
    character.set_gender(draft.gender)?;
    character.level = draft.level;
    character.abilities = draft.abilities;
    character.race_id = draft.race_id;
    character.class_id = draft.class_id;
    character.theme_id = draft.theme_id;
    character.deity_id = draft.deity_id;
    character.home_world_id = draft.home_world_id;
    character.alignment_id = draft.alignment_id;
    character.size_id = draft.size_id;
    character.feat_ids = draft.feat_ids;
    character.spell_ids = draft.spell_ids;
    character.equipped_armor_id = draft.equipped_armor_id;
    character.skill_ranks = draft.skill_ranks;
    Ok(())
}
