//! Modifier resolution
//!
//! Turns free-text `effected_stat` names into typed targets and sums the
//! deltas per stat. Aggregate names (`armor_class`, `saves`, `attack`,
//! `skills`) fan out to every stat they cover.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::entities::{Ability, CharacterClass, Feat, Modifier, Race, Skill, Theme};
use crate::error::{fit_stat, DomainError};

/// A stat a modifier can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatTarget {
    Ability(Ability),
    Eac,
    Kac,
    /// Both EAC and KAC
    ArmorClass,
    Initiative,
    Fortitude,
    Reflex,
    Will,
    /// All three saving throws
    Saves,
    MeleeAttack,
    RangedAttack,
    ThrownAttack,
    /// All three attack bonuses
    Attack,
    HitPoints,
    StaminaPoints,
    ResolvePoints,
    Skill(Skill),
    /// Every skill
    Skills,
}

impl FromStr for StatTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let target = match normalized.as_str() {
            "eac" | "energy_armor_class" => StatTarget::Eac,
            "kac" | "kinetic_armor_class" => StatTarget::Kac,
            "ac" | "armor_class" => StatTarget::ArmorClass,
            "initiative" => StatTarget::Initiative,
            "fortitude" | "fort" => StatTarget::Fortitude,
            "reflex" | "ref" => StatTarget::Reflex,
            "will" => StatTarget::Will,
            "saves" | "saving_throws" => StatTarget::Saves,
            "melee_attack" | "melee" => StatTarget::MeleeAttack,
            "ranged_attack" | "ranged" => StatTarget::RangedAttack,
            "thrown_attack" | "thrown" => StatTarget::ThrownAttack,
            "attack" | "attacks" | "attack_bonus" => StatTarget::Attack,
            "hit_points" | "hp" => StatTarget::HitPoints,
            "stamina_points" | "stamina" | "sp" => StatTarget::StaminaPoints,
            "resolve_points" | "resolve" | "rp" => StatTarget::ResolvePoints,
            "skills" | "all_skills" => StatTarget::Skills,
            other => {
                if let Ok(ability) = other.parse::<Ability>() {
                    StatTarget::Ability(ability)
                } else if let Ok(skill) = other.parse::<Skill>() {
                    StatTarget::Skill(skill)
                } else {
                    return Err(DomainError::unknown_modifier_target(s));
                }
            }
        };
        Ok(target)
    }
}

/// Summed modifier deltas for every concrete stat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierTotals {
    abilities: BTreeMap<Ability, i32>,
    skills: BTreeMap<Skill, i32>,
    pub eac: i32,
    pub kac: i32,
    pub initiative: i32,
    pub fortitude: i32,
    pub reflex: i32,
    pub will: i32,
    pub melee_attack: i32,
    pub ranged_attack: i32,
    pub thrown_attack: i32,
    pub hit_points: i32,
    pub stamina_points: i32,
    pub resolve_points: i32,
}

impl ModifierTotals {
    /// Resolves and sums every modifier. Fails on the first unknown target.
    pub fn from_modifiers<'a>(
        modifiers: impl IntoIterator<Item = &'a Modifier>,
    ) -> Result<Self, DomainError> {
        let mut totals = Self::default();
        for modifier in modifiers {
            let target: StatTarget = modifier.effected_stat.parse()?;
            totals.add(target, modifier.modification)?;
        }
        Ok(totals)
    }

    /// Adds `delta` to every stat `target` covers. A running total that would
    /// leave the `i32` range is an `InvalidRange` error naming the stat.
    pub fn add(&mut self, target: StatTarget, delta: i32) -> Result<(), DomainError> {
        match target {
            StatTarget::Ability(ability) => bump(
                self.abilities.entry(ability).or_insert(0),
                ability.as_str(),
                delta,
            ),
            StatTarget::Eac => bump(&mut self.eac, "eac", delta),
            StatTarget::Kac => bump(&mut self.kac, "kac", delta),
            StatTarget::ArmorClass => {
                bump(&mut self.eac, "eac", delta)?;
                bump(&mut self.kac, "kac", delta)
            }
            StatTarget::Initiative => bump(&mut self.initiative, "initiative", delta),
            StatTarget::Fortitude => bump(&mut self.fortitude, "fortitude", delta),
            StatTarget::Reflex => bump(&mut self.reflex, "reflex", delta),
            StatTarget::Will => bump(&mut self.will, "will", delta),
            StatTarget::Saves => {
                bump(&mut self.fortitude, "fortitude", delta)?;
                bump(&mut self.reflex, "reflex", delta)?;
                bump(&mut self.will, "will", delta)
            }
            StatTarget::MeleeAttack => bump(&mut self.melee_attack, "melee_attack", delta),
            StatTarget::RangedAttack => bump(&mut self.ranged_attack, "ranged_attack", delta),
            StatTarget::ThrownAttack => bump(&mut self.thrown_attack, "thrown_attack", delta),
            StatTarget::Attack => {
                bump(&mut self.melee_attack, "melee_attack", delta)?;
                bump(&mut self.ranged_attack, "ranged_attack", delta)?;
                bump(&mut self.thrown_attack, "thrown_attack", delta)
            }
            StatTarget::HitPoints => bump(&mut self.hit_points, "hit_points", delta),
            StatTarget::StaminaPoints => bump(&mut self.stamina_points, "stamina_points", delta),
            StatTarget::ResolvePoints => bump(&mut self.resolve_points, "resolve_points", delta),
            StatTarget::Skill(skill) => {
                bump(self.skills.entry(skill).or_insert(0), skill.as_str(), delta)
            }
            StatTarget::Skills => Skill::ALL.into_iter().try_for_each(|skill| {
                bump(self.skills.entry(skill).or_insert(0), skill.as_str(), delta)
            }),
        }
    }

    pub fn ability(&self, ability: Ability) -> i32 {
        self.abilities.get(&ability).copied().unwrap_or(0)
    }

    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }
}

fn bump(slot: &mut i32, field: &str, delta: i32) -> Result<(), DomainError> {
    *slot = fit_stat(field, i64::from(*slot) + i64::from(delta))?;
    Ok(())
}

/// Modifiers that apply to a character from its race traits, feats and the
/// class features gained by `level`.
///
/// Theme modifiers are not included: the theme is passed to the derivation
/// whole so its tiers can be unlocked against the level there.
pub fn applicable_modifiers(
    race: &Race,
    class: &CharacterClass,
    feats: &[Feat],
    level: u8,
) -> Vec<Modifier> {
    race.trait_modifiers()
        .chain(feats.iter().flat_map(|feat| feat.modifiers.iter()))
        .chain(class.feature_modifiers(level))
        .cloned()
        .collect()
}

/// Modifiers from the theme tiers unlocked at `level`.
pub fn theme_modifiers(theme: &Theme, level: u8) -> impl Iterator<Item = &Modifier> {
    theme
        .unlocked_tiers(level)
        .flat_map(|tier| tier.modifiers.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ClassFeature, ModifierSource, RacialTrait, ThemeTier};
    use crate::ids::{FeatId, ThemeId};

    fn feat_modifier(stat: &str, delta: i32) -> Modifier {
        Modifier::new(stat, delta, ModifierSource::Feat(FeatId::new()))
    }

    #[test]
    fn parses_concrete_targets() {
        assert_eq!("KAC".parse::<StatTarget>(), Ok(StatTarget::Kac));
        assert_eq!("Hit Points".parse::<StatTarget>(), Ok(StatTarget::HitPoints));
        assert_eq!("dexterity".parse::<StatTarget>(), Ok(StatTarget::Ability(Ability::Dexterity)));
        assert_eq!(
            "sense-motive".parse::<StatTarget>(),
            Ok(StatTarget::Skill(Skill::SenseMotive))
        );
    }

    #[test]
    fn unknown_target_is_an_error() {
        let result = "luck".parse::<StatTarget>();
        assert_eq!(result, Err(DomainError::unknown_modifier_target("luck")));
    }

    #[test]
    fn sums_deltas_per_stat() {
        let modifiers = vec![
            feat_modifier("initiative", 4),
            feat_modifier("initiative", -1),
            feat_modifier("perception", 2),
            feat_modifier("strength", 2),
        ];
        let totals = ModifierTotals::from_modifiers(&modifiers).expect("known targets");
        assert_eq!(totals.initiative, 3);
        assert_eq!(totals.skill(Skill::Perception), 2);
        assert_eq!(totals.skill(Skill::Stealth), 0);
        assert_eq!(totals.ability(Ability::Strength), 2);
        assert_eq!(totals.ability(Ability::Wisdom), 0);
    }

    #[test]
    fn aggregate_targets_fan_out() {
        let modifiers = vec![
            feat_modifier("armor_class", 1),
            feat_modifier("saves", 2),
            feat_modifier("attack", -1),
            feat_modifier("skills", 1),
        ];
        let totals = ModifierTotals::from_modifiers(&modifiers).expect("known targets");
        assert_eq!((totals.eac, totals.kac), (1, 1));
        assert_eq!((totals.fortitude, totals.reflex, totals.will), (2, 2, 2));
        assert_eq!(
            (totals.melee_attack, totals.ranged_attack, totals.thrown_attack),
            (-1, -1, -1)
        );
        assert!(Skill::ALL.iter().all(|s| totals.skill(*s) == 1));
    }

    #[test]
    fn first_unknown_target_aborts() {
        let modifiers = vec![feat_modifier("kac", 1), feat_modifier("charm", 1)];
        assert!(matches!(
            ModifierTotals::from_modifiers(&modifiers),
            Err(DomainError::UnknownModifierTarget(_))
        ));
    }

    #[test]
    fn overflowing_total_is_a_range_error() {
        let modifiers = vec![feat_modifier("hit_points", i32::MAX), feat_modifier("hp", 1)];
        assert_eq!(
            ModifierTotals::from_modifiers(&modifiers),
            Err(DomainError::invalid_range(
                "hit_points",
                i64::from(i32::MAX) + 1,
                i32::MIN,
                i32::MAX
            ))
        );

        let mut totals = ModifierTotals::default();
        totals.add(StatTarget::Skill(Skill::Stealth), i32::MIN).expect("fits");
        assert!(matches!(
            totals.add(StatTarget::Skills, -1),
            Err(DomainError::InvalidRange { ref field, .. }) if field == "stealth"
        ));
    }

    #[test]
    fn applicable_modifiers_gathers_traits_feats_and_features() {
        let mut racial_trait = RacialTrait::new("Sharp Senses");
        racial_trait.modifiers.push(Modifier::new(
            "perception",
            2,
            ModifierSource::RacialTrait(racial_trait.id),
        ));
        let race = Race::new("Kasatha", 4).with_trait(racial_trait);

        let mut feat = Feat::new("Improved Initiative");
        feat.modifiers.push(Modifier::new(
            "initiative",
            4,
            ModifierSource::Feat(feat.id),
        ));

        let mut feature = ClassFeature::new(3, "Fighting Style");
        feature.modifiers.push(Modifier::new(
            "kac",
            1,
            ModifierSource::ClassFeature(feature.id),
        ));
        let class = CharacterClass::new("Soldier", Ability::Strength, 7, 7, Vec::new())
            .with_feature(feature);

        assert_eq!(applicable_modifiers(&race, &class, &[feat.clone()], 1).len(), 2);
        assert_eq!(applicable_modifiers(&race, &class, &[feat], 3).len(), 3);
    }

    #[test]
    fn theme_modifiers_follow_unlocked_tiers() {
        let theme_id = ThemeId::new();
        let mut first = ThemeTier::new(1, "Theme Knowledge");
        first
            .modifiers
            .push(Modifier::new("piloting", 1, ModifierSource::Theme(theme_id)));
        let mut sixth = ThemeTier::new(6, "Lone Wolf");
        sixth
            .modifiers
            .push(Modifier::new("initiative", 1, ModifierSource::Theme(theme_id)));
        let theme = Theme::new("Ace Pilot")
            .with_tier(first)
            .and_then(|t| t.with_tier(sixth))
            .expect("valid tiers");

        assert_eq!(theme_modifiers(&theme, 5).count(), 1);
        assert_eq!(theme_modifiers(&theme, 6).count(), 2);
    }
}
