//! Character sheet derivation entry point

use std::collections::BTreeMap;

use serde::Serialize;

use super::abilities::{final_ability_scores, AbilityValues};
use super::combat::{compose_combat_stats, require_level, AttackBonuses, SavingThrows};
use super::modifiers::{theme_modifiers, ModifierTotals};
use super::skills::{compose_skill_totals, SkillTotal};
use crate::entities::{Armor, Character, CharacterClass, Modifier, Race, Skill, Theme};
use crate::error::DomainError;
use crate::ids::CharacterId;

/// A consistent snapshot of everything a sheet is derived from.
///
/// `modifiers` holds the race trait, feat and class feature modifiers that
/// apply to the character; theme modifiers come from `theme` itself.
#[derive(Debug, Clone, Copy)]
pub struct SheetInputs<'a> {
    pub character: &'a Character,
    pub race: Option<&'a Race>,
    pub class: Option<&'a CharacterClass>,
    pub theme: Option<&'a Theme>,
    pub equipped_armor: Option<&'a Armor>,
    pub modifiers: &'a [Modifier],
}

/// Every derived number on a character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedSheet {
    pub character_id: CharacterId,
    pub level: u8,
    pub ability_scores: AbilityValues,
    pub ability_modifiers: AbilityValues,
    pub eac: i32,
    pub kac: i32,
    pub initiative: i32,
    pub saves: SavingThrows,
    pub attacks: AttackBonuses,
    pub max_hit_points: i32,
    pub max_stamina_points: i32,
    pub max_resolve_points: i32,
    pub skills: BTreeMap<Skill, SkillTotal>,
}

impl DerivedSheet {
    pub fn skill(&self, skill: Skill) -> SkillTotal {
        // compose_skill_totals fills every skill
        self.skills
            .get(&skill)
            .copied()
            .unwrap_or(SkillTotal::Untrained)
    }
}

/// Derives the full sheet. Pure: the same inputs always give the same sheet
/// or the same error.
pub fn derive_character_sheet(inputs: &SheetInputs<'_>) -> Result<DerivedSheet, DomainError> {
    let character = inputs.character;
    let level = require_level(character.level)?;

    let race = inputs.race.ok_or_else(|| {
        DomainError::missing_reference("Race", format!("character {} has no race", character.id))
    })?;
    let class = inputs.class.ok_or_else(|| {
        DomainError::missing_reference("Class", format!("character {} has no class", character.id))
    })?;

    let totals = match inputs.theme {
        Some(theme) => {
            ModifierTotals::from_modifiers(inputs.modifiers.iter().chain(theme_modifiers(theme, level)))?
        }
        None => ModifierTotals::from_modifiers(inputs.modifiers)?,
    };

    let ability_scores = final_ability_scores(&character.abilities, race, inputs.theme, &totals)?;
    let ability_modifiers = ability_scores.modifiers();

    let combat = compose_combat_stats(
        &ability_modifiers,
        race,
        class,
        level,
        inputs.equipped_armor,
        &totals,
    )?;
    let skills = compose_skill_totals(
        &character.skill_ranks,
        &ability_modifiers,
        class,
        level,
        &totals,
    )?;

    Ok(DerivedSheet {
        character_id: character.id,
        level,
        ability_scores,
        ability_modifiers,
        eac: combat.eac,
        kac: combat.kac,
        initiative: combat.initiative,
        saves: combat.saves,
        attacks: combat.attacks,
        max_hit_points: combat.max_hit_points,
        max_stamina_points: combat.max_stamina_points,
        max_resolve_points: combat.max_resolve_points,
        skills,
    })
}
