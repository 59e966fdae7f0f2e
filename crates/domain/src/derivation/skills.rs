//! Skill total composer

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use super::abilities::AbilityValues;
use super::modifiers::ModifierTotals;
use crate::entities::{CharacterClass, Skill, SkillRanks};
use crate::error::{ensure_range, fit_stat, DomainError};

/// Bonus for a class skill the character has put at least one rank into.
pub const CLASS_SKILL_BONUS: i32 = 3;

/// Result of one skill line on the sheet.
///
/// `Untrained` is not a number: a character without ranks in a trained-only
/// skill cannot attempt the check at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillTotal {
    Total(i32),
    Untrained,
}

impl SkillTotal {
    pub fn value(&self) -> Option<i32> {
        match self {
            SkillTotal::Total(total) => Some(*total),
            SkillTotal::Untrained => None,
        }
    }

    pub fn is_untrained(&self) -> bool {
        matches!(self, SkillTotal::Untrained)
    }
}

// Serialized as the bare number, or the string "untrained".
impl Serialize for SkillTotal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SkillTotal::Total(total) => serializer.serialize_i32(*total),
            SkillTotal::Untrained => serializer.serialize_str("untrained"),
        }
    }
}

/// Total for a single skill from already-resolved parts.
pub fn skill_total(
    skill: Skill,
    ranks: i32,
    ability_modifier: i32,
    is_class_skill: bool,
    misc: i32,
) -> Result<SkillTotal, DomainError> {
    if skill.trained_only() && ranks == 0 {
        return Ok(SkillTotal::Untrained);
    }
    let class_bonus = if is_class_skill && ranks > 0 {
        CLASS_SKILL_BONUS
    } else {
        0
    };
    let total = i64::from(ranks) + i64::from(ability_modifier) + i64::from(class_bonus) + i64::from(misc);
    fit_stat(skill.as_str(), total).map(SkillTotal::Total)
}

/// Totals for all twenty skills. Ranks must lie within `0..=level`.
pub fn compose_skill_totals(
    ranks: &SkillRanks,
    modifiers: &AbilityValues,
    class: &CharacterClass,
    level: u8,
    totals: &ModifierTotals,
) -> Result<BTreeMap<Skill, SkillTotal>, DomainError> {
    Skill::ALL
        .into_iter()
        .map(|skill| {
            let invested = ensure_range(
                &format!("{skill} ranks"),
                ranks.get(skill),
                0,
                i32::from(level),
            )?;
            let total = skill_total(
                skill,
                invested,
                modifiers.get(skill.governing_ability()),
                class.is_class_skill(skill),
                totals.skill(skill),
            )?;
            Ok((skill, total))
        })
        .collect()
}
