//! Starfinder character sheet domain
//!
//! Entities for characters and the reference data they point at, plus the
//! pure derivation of every computed number on the sheet.

pub mod derivation;
pub mod entities;
pub mod error;
pub mod ids;

pub use derivation::{
    ability_modifier, applicable_modifiers, derive_character_sheet, AbilityValues, AttackBonuses,
    DerivedSheet, ModifierTotals, SavingThrows, SheetInputs, SkillTotal, StatTarget,
};
pub use entities::{
    Ability, AbilityAdjustment, AbilityScores, Alignment, Armor, ArmorCategory, AttackProgression,
    Character, CharacterClass, ClassFeature, ClassLevel, ClassProgression, Deity, Equipment,
    EquipmentKind, Feat, Modifier, ModifierSource, NativeRace, PlaceOfWorship, Race, RacialTrait,
    SaveProgression, Size, Skill, SkillRanks, Spell, Theme, ThemeTier, World, MAX_LEVEL,
};
pub use error::DomainError;
pub use ids::{
    AlignmentId, CharacterId, ClassFeatureId, ClassId, DeityId, EquipmentId, FeatId, ModifierId,
    RaceId, RacialTraitId, SizeId, SpellId, ThemeId, WorldId,
};
