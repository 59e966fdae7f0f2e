//! Repository port traits for character and reference data access.

use async_trait::async_trait;
use starsheet_domain::{
    Alignment, AlignmentId, Armor, Character, CharacterClass, CharacterId, ClassId, Deity,
    DeityId, EquipmentId, Feat, FeatId, Race, RaceId, Size, SizeId, Spell, SpellId, Theme,
    ThemeId, World, WorldId,
};

use super::error::RepoError;

// =============================================================================
// Characters
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn list(&self) -> Result<Vec<Character>, RepoError>;
    async fn save(&self, character: &Character) -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
}

// =============================================================================
// Reference data (the rows a character points at)
// =============================================================================

/// Read-only access to the setting's reference rows.
///
/// Getters return `Ok(None)` for an unknown id; callers decide whether that
/// is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceDataRepo: Send + Sync {
    async fn get_race(&self, id: RaceId) -> Result<Option<Race>, RepoError>;
    async fn get_class(&self, id: ClassId) -> Result<Option<CharacterClass>, RepoError>;
    async fn get_theme(&self, id: ThemeId) -> Result<Option<Theme>, RepoError>;
    /// The equipment row read as armor. A row of another kind is an error.
    async fn get_armor(&self, id: EquipmentId) -> Result<Option<Armor>, RepoError>;
    async fn get_feat(&self, id: FeatId) -> Result<Option<Feat>, RepoError>;
    async fn get_deity(&self, id: DeityId) -> Result<Option<Deity>, RepoError>;
    async fn get_world(&self, id: WorldId) -> Result<Option<World>, RepoError>;
    async fn get_alignment(&self, id: AlignmentId) -> Result<Option<Alignment>, RepoError>;
    async fn get_size(&self, id: SizeId) -> Result<Option<Size>, RepoError>;
    async fn get_spell(&self, id: SpellId) -> Result<Option<Spell>, RepoError>;

    // Listings for the builder's selection steps
    async fn list_races(&self) -> Result<Vec<Race>, RepoError>;
    async fn list_classes(&self) -> Result<Vec<CharacterClass>, RepoError>;
    async fn list_themes(&self) -> Result<Vec<Theme>, RepoError>;
    async fn list_deities(&self) -> Result<Vec<Deity>, RepoError>;
    async fn list_worlds(&self) -> Result<Vec<World>, RepoError>;
    async fn list_alignments(&self) -> Result<Vec<Alignment>, RepoError>;
    /// Races native to `world_id`.
    async fn list_native_races(&self, world_id: WorldId) -> Result<Vec<Race>, RepoError>;
    /// Deities with a place of worship on `world_id`.
    async fn list_deities_for_world(&self, world_id: WorldId) -> Result<Vec<Deity>, RepoError>;
}
