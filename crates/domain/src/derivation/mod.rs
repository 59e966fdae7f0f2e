//! Character sheet derivation
//!
//! Pure functions from a character and its reference rows to the numbers on
//! the sheet. Nothing here does I/O or logging.

mod abilities;
mod combat;
mod modifiers;
mod sheet;
mod skills;

pub use abilities::{ability_modifier, final_ability_scores, modifier_for, AbilityValues};
pub use combat::{
    armor_class, compose_combat_stats, max_hit_points, max_resolve_points, max_stamina_points,
    progression_row, require_level, AttackBonuses, CombatStats, SavingThrows, BASE_ARMOR_CLASS,
};
pub use modifiers::{applicable_modifiers, theme_modifiers, ModifierTotals, StatTarget};
pub use sheet::{derive_character_sheet, DerivedSheet, SheetInputs};
pub use skills::{compose_skill_totals, skill_total, SkillTotal, CLASS_SKILL_BONUS};
