//! Domain entities: the character record and the reference data it points at.

mod ability;
mod character;
mod class;
mod equipment;
mod modifier;
mod race;
mod reference;
mod skill;
mod theme;

pub use ability::{Ability, AbilityAdjustment, AbilityScores, MAX_ABILITY_SCORE, MIN_ABILITY_SCORE};
pub use character::{Character, MAX_DESCRIPTION_LEN, MAX_GENDER_LEN};
pub use class::{
    AttackProgression, CharacterClass, ClassFeature, ClassLevel, ClassProgression,
    SaveProgression, MAX_LEVEL,
};
pub use equipment::{Armor, ArmorCategory, Equipment, EquipmentKind};
pub use modifier::{Modifier, ModifierSource};
pub use race::{Race, RacialTrait};
pub use reference::{Alignment, Deity, Feat, NativeRace, PlaceOfWorship, Size, Spell, World};
pub use skill::{Skill, SkillRanks};
pub use theme::{Theme, ThemeTier, THEME_TIER_LEVELS};
