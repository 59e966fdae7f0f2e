//! Derived combat stat composer
//!
//! Combines ability modifiers, the class progression row for the character's
//! level, race and class pools and worn armor into defenses, saves, attack
//! bonuses and the three point pools.

use serde::{Deserialize, Serialize};

use super::abilities::AbilityValues;
use super::modifiers::ModifierTotals;
use crate::entities::{Armor, CharacterClass, ClassLevel, Race, MAX_LEVEL};
use crate::error::{fit_stat, DomainError};

/// Armor class before any armor, dexterity or modifiers.
pub const BASE_ARMOR_CLASS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingThrows {
    pub fortitude: i32,
    pub reflex: i32,
    pub will: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackBonuses {
    pub melee: i32,
    pub ranged: i32,
    pub thrown: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub eac: i32,
    pub kac: i32,
    pub initiative: i32,
    pub saves: SavingThrows,
    pub attacks: AttackBonuses,
    pub max_hit_points: i32,
    pub max_stamina_points: i32,
    pub max_resolve_points: i32,
}

/// Checks the level is present and within `1..=MAX_LEVEL`.
pub fn require_level(level: Option<u8>) -> Result<u8, DomainError> {
    let level = level.ok_or_else(|| DomainError::missing_input("level"))?;
    if (1..=MAX_LEVEL).contains(&level) {
        Ok(level)
    } else {
        Err(DomainError::invalid_range("level", level, 1, MAX_LEVEL))
    }
}

/// The class progression row for `level`, or `MissingReferenceData`.
pub fn progression_row(class: &CharacterClass, level: u8) -> Result<&ClassLevel, DomainError> {
    class.level_row(level).ok_or_else(|| {
        DomainError::missing_reference(
            "ClassLevel",
            format!("class '{}' has no progression row for level {level}", class.name),
        )
    })
}

/// One armor class value. The dexterity cap is applied before the sum, so a
/// high dexterity in heavy armor contributes only up to the cap.
pub fn armor_class(
    field: &str,
    armor_bonus: i32,
    dexterity_modifier: i32,
    max_dex: Option<i32>,
    misc: i32,
) -> Result<i32, DomainError> {
    let dexterity = match max_dex {
        Some(cap) => dexterity_modifier.min(cap),
        None => dexterity_modifier,
    };
    sum_stat(field, [BASE_ARMOR_CLASS, armor_bonus, dexterity, misc])
}

/// Race hit points plus class hit points for each level.
pub fn max_hit_points(
    race: &Race,
    class: &CharacterClass,
    level: u8,
    misc: i32,
) -> Result<i32, DomainError> {
    let total = i64::from(race.hit_points)
        + i64::from(class.hit_points_per_level) * i64::from(level)
        + i64::from(misc);
    fit_stat("hit_points", total)
}

/// Class stamina plus constitution modifier for each level, never below zero.
pub fn max_stamina_points(
    stamina_points_per_level: i32,
    constitution_modifier: i32,
    level: u8,
    misc: i32,
) -> Result<i32, DomainError> {
    let per_level = i64::from(stamina_points_per_level) + i64::from(constitution_modifier);
    let total = (per_level * i64::from(level)).max(0) + i64::from(misc);
    fit_stat("stamina_points", total)
}

/// Half the level plus the key ability modifier, at least 1.
pub fn max_resolve_points(
    level: u8,
    key_ability_modifier: i32,
    misc: i32,
) -> Result<i32, DomainError> {
    let total = (i64::from(level) / 2 + i64::from(key_ability_modifier)).max(1) + i64::from(misc);
    fit_stat("resolve_points", total)
}

fn sum_stat<const N: usize>(field: &str, parts: [i32; N]) -> Result<i32, DomainError> {
    fit_stat(field, parts.into_iter().map(i64::from).sum())
}

/// Composes every combat stat for a character at `level`.
pub fn compose_combat_stats(
    modifiers: &AbilityValues,
    race: &Race,
    class: &CharacterClass,
    level: u8,
    armor: Option<&Armor>,
    totals: &ModifierTotals,
) -> Result<CombatStats, DomainError> {
    let row = progression_row(class, level)?;

    let (eac_bonus, kac_bonus, max_dex) = match armor {
        Some(armor) => (armor.eac_bonus, armor.kac_bonus, armor.max_dex_bonus),
        None => (0, 0, None),
    };

    Ok(CombatStats {
        eac: armor_class("eac", eac_bonus, modifiers.dexterity, max_dex, totals.eac)?,
        kac: armor_class("kac", kac_bonus, modifiers.dexterity, max_dex, totals.kac)?,
        initiative: sum_stat("initiative", [modifiers.dexterity, totals.initiative])?,
        saves: SavingThrows {
            fortitude: sum_stat("fortitude", [row.fortitude, modifiers.strength, totals.fortitude])?,
            reflex: sum_stat("reflex", [row.reflex, modifiers.dexterity, totals.reflex])?,
            will: sum_stat("will", [row.will, modifiers.wisdom, totals.will])?,
        },
        attacks: AttackBonuses {
            melee: sum_stat(
                "melee_attack",
                [row.base_attack_bonus, modifiers.strength, totals.melee_attack],
            )?,
            ranged: sum_stat(
                "ranged_attack",
                [row.base_attack_bonus, modifiers.dexterity, totals.ranged_attack],
            )?,
            thrown: sum_stat(
                "thrown_attack",
                [row.base_attack_bonus, modifiers.strength, totals.thrown_attack],
            )?,
        },
        max_hit_points: max_hit_points(race, class, level, totals.hit_points)?,
        max_stamina_points: max_stamina_points(
            class.stamina_points_per_level,
            modifiers.constitution,
            level,
            totals.stamina_points,
        )?,
        max_resolve_points: max_resolve_points(
            level,
            modifiers.get(class.key_ability),
            totals.resolve_points,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        Ability, ArmorCategory, AttackProgression, ClassProgression, SaveProgression,
    };

    fn soldier() -> CharacterClass {
        CharacterClass::new(
            "Soldier",
            Ability::Strength,
            7,
            7,
            ClassProgression::standard(
                AttackProgression::Full,
                SaveProgression::Good,
                SaveProgression::Poor,
                SaveProgression::Good,
                MAX_LEVEL,
            ),
        )
    }

    fn mods(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> AbilityValues {
        AbilityValues {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    #[test]
    fn heavy_armor_caps_dexterity_before_addition() {
        // dex 18 (+4), cap 2, armor bonus 6: 10 + 6 + 2, not 10 + 6 + 4
        assert_eq!(armor_class("kac", 6, 4, Some(2), 0), Ok(18));
    }

    #[test]
    fn no_armor_is_uncapped() {
        assert_eq!(armor_class("eac", 0, 5, None, 0), Ok(15));
    }

    #[test]
    fn cap_does_not_raise_low_dexterity() {
        assert_eq!(armor_class("eac", 3, -1, Some(2), 0), Ok(12));
    }

    #[test]
    fn level_must_be_present_and_in_range() {
        assert_eq!(require_level(Some(1)), Ok(1));
        assert_eq!(require_level(Some(20)), Ok(20));
        assert_eq!(require_level(None), Err(DomainError::missing_input("level")));
        assert_eq!(
            require_level(Some(0)),
            Err(DomainError::invalid_range("level", 0, 1, 20))
        );
        assert!(require_level(Some(21)).is_err());
    }

    #[test]
    fn missing_progression_row_is_reported() {
        let class = CharacterClass::new("Envoy", Ability::Charisma, 6, 6, Vec::new());
        assert!(matches!(
            progression_row(&class, 3),
            Err(DomainError::MissingReferenceData { entity_type: "ClassLevel", .. })
        ));
    }

    #[test]
    fn stamina_scales_with_level_and_constitution() {
        assert_eq!(max_stamina_points(7, 1, 1, 0), Ok(8));
        assert_eq!(max_stamina_points(7, 1, 5, 0), Ok(40));
        assert_eq!(max_stamina_points(5, -2, 2, 1), Ok(7));
        // a large penalty bottoms out at zero before misc
        assert_eq!(max_stamina_points(1, -4, 3, 0), Ok(0));
    }

    #[test]
    fn resolve_has_a_floor_of_one() {
        assert_eq!(max_resolve_points(1, 0, 0), Ok(1));
        assert_eq!(max_resolve_points(1, -1, 0), Ok(1));
        assert_eq!(max_resolve_points(6, 4, 0), Ok(7));
    }

    #[test]
    fn composes_full_stat_block() {
        let race = Race::new("Human", 4);
        let class = soldier();
        let armor = Armor::new("Hardlight Series", ArmorCategory::Heavy, 5, 7, Some(2));
        let modifiers = mods(2, 3, 1, 0, -1, 0);
        let mut totals = ModifierTotals::default();
        totals.kac = 1;
        totals.initiative = 4;

        let stats = compose_combat_stats(&modifiers, &race, &class, 3, Some(&armor), &totals)
            .expect("complete inputs");

        assert_eq!(stats.eac, 10 + 5 + 2);
        assert_eq!(stats.kac, 10 + 7 + 2 + 1);
        assert_eq!(stats.initiative, 3 + 4);
        // level 3: fort good 3, reflex poor 1, will good 3
        assert_eq!(
            stats.saves,
            SavingThrows {
                fortitude: 3 + 2,
                reflex: 1 + 3,
                will: 3 - 1,
            }
        );
        assert_eq!(
            stats.attacks,
            AttackBonuses {
                melee: 3 + 2,
                ranged: 3 + 3,
                thrown: 3 + 2,
            }
        );
        assert_eq!(stats.max_hit_points, 4 + 7 * 3);
        assert_eq!(stats.max_stamina_points, (7 + 1) * 3);
        assert_eq!(stats.max_resolve_points, 1 + 2);
    }

    #[test]
    fn oversized_modifier_total_is_a_range_error() {
        let race = Race::new("Human", 4);
        let mut totals = ModifierTotals::default();
        totals.eac = i32::MAX;

        let result = compose_combat_stats(
            &mods(0, 1, 0, 0, 0, 0),
            &race,
            &soldier(),
            1,
            None,
            &totals,
        );
        assert_eq!(
            result,
            Err(DomainError::invalid_range(
                "eac",
                i64::from(i32::MAX) + 11,
                i32::MIN,
                i32::MAX
            ))
        );
    }

    #[test]
    fn oversized_class_pool_is_a_range_error() {
        let race = Race::new("Human", 4);
        let mut class = soldier();
        class.hit_points_per_level = i32::MAX;
        assert!(matches!(
            max_hit_points(&race, &class, 2, 0),
            Err(DomainError::InvalidRange { ref field, .. }) if field == "hit_points"
        ));
    }

    #[test]
    fn composition_fails_past_the_table() {
        let race = Race::new("Human", 4);
        let mut class = soldier();
        class.progression.truncate(5);
        let result = compose_combat_stats(
            &mods(0, 0, 0, 0, 0, 0),
            &race,
            &class,
            6,
            None,
            &ModifierTotals::default(),
        );
        assert!(matches!(
            result,
            Err(DomainError::MissingReferenceData { .. })
        ));
    }
}
