//! Ability modifier calculator
//!
//! Final ability scores are the entered score plus racial, theme and modifier
//! adjustments. Each final score maps to a modifier with the usual
//! `floor((score - 10) / 2)` table.

use serde::{Deserialize, Serialize};

use super::modifiers::ModifierTotals;
use crate::entities::{Ability, AbilityScores, Race, Theme, MAX_ABILITY_SCORE, MIN_ABILITY_SCORE};
use crate::error::{ensure_range, ensure_wide_range, DomainError};

/// Converts an ability score to its modifier.
///
/// Rounds toward negative infinity, so 7 gives -2 rather than -1. Written as
/// `floor(score / 2) - 5` so no `i32` input overflows.
pub fn ability_modifier(score: i32) -> i32 {
    score.div_euclid(2) - 5
}

/// Modifier for one ability of a possibly incomplete score set.
pub fn modifier_for(scores: &AbilityScores, ability: Ability) -> Result<i32, DomainError> {
    scores.require(ability).map(ability_modifier)
}

/// One integer per ability; used for both final scores and their modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityValues {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityValues {
    /// Builds the set by evaluating `f` for each ability in `Ability::ALL` order.
    pub fn try_from_fn<F>(mut f: F) -> Result<Self, DomainError>
    where
        F: FnMut(Ability) -> Result<i32, DomainError>,
    {
        Ok(Self {
            strength: f(Ability::Strength)?,
            dexterity: f(Ability::Dexterity)?,
            constitution: f(Ability::Constitution)?,
            intelligence: f(Ability::Intelligence)?,
            wisdom: f(Ability::Wisdom)?,
            charisma: f(Ability::Charisma)?,
        })
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// The modifier for each score in this set.
    pub fn modifiers(&self) -> Self {
        Self {
            strength: ability_modifier(self.strength),
            dexterity: ability_modifier(self.dexterity),
            constitution: ability_modifier(self.constitution),
            intelligence: ability_modifier(self.intelligence),
            wisdom: ability_modifier(self.wisdom),
            charisma: ability_modifier(self.charisma),
        }
    }
}

/// Sums entered scores with every adjustment and checks the result stays in
/// `MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE`.
///
/// The entered score is range-checked on its own first, and the sum is taken
/// in `i64`, so out-of-range rows fail with `InvalidRange` instead of wrapping.
pub fn final_ability_scores(
    base: &AbilityScores,
    race: &Race,
    theme: Option<&Theme>,
    totals: &ModifierTotals,
) -> Result<AbilityValues, DomainError> {
    AbilityValues::try_from_fn(|ability| {
        let entered = ensure_range(
            ability.as_str(),
            base.require(ability)?,
            MIN_ABILITY_SCORE,
            MAX_ABILITY_SCORE,
        )?;
        let racial: i64 = race
            .ability_adjustments
            .iter()
            .filter(|adj| adj.ability == ability)
            .map(|adj| i64::from(adj.value))
            .sum();
        let thematic = theme
            .and_then(|t| t.ability_adjustment)
            .filter(|adj| adj.ability == ability)
            .map_or(0, |adj| i64::from(adj.value));

        let score = i64::from(entered) + racial + thematic + i64::from(totals.ability(ability));
        ensure_wide_range(ability.as_str(), score, MIN_ABILITY_SCORE, MAX_ABILITY_SCORE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AbilityAdjustment, Modifier, ModifierSource};
    use crate::ids::FeatId;

    #[test]
    fn modifier_boundaries() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn odd_scores_below_ten_round_down() {
        // (7 - 10) / 2 = -1.5, floored to -2
        assert_eq!(ability_modifier(7), -2);
        assert_eq!(ability_modifier(5), -3);
        assert_eq!(ability_modifier(3), -4);
    }

    #[test]
    fn modifier_matches_floor_formula_for_whole_range() {
        for score in MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE {
            let expected = ((score as f64 - 10.0) / 2.0).floor() as i32;
            assert_eq!(ability_modifier(score), expected, "score {score}");
        }
    }

    #[test]
    fn modifier_is_total_over_i32() {
        assert_eq!(ability_modifier(i32::MAX), i32::MAX / 2 - 5);
        assert_eq!(ability_modifier(i32::MIN), i32::MIN / 2 - 5);
    }

    #[test]
    fn absent_score_is_missing_input() {
        let mut scores = AbilityScores::new(10, 12, 14, 16, 18, 8);
        assert_eq!(modifier_for(&scores, Ability::Wisdom), Ok(4));
        scores.charisma = None;
        assert_eq!(
            modifier_for(&scores, Ability::Charisma),
            Err(DomainError::missing_input("charisma"))
        );
    }

    #[test]
    fn final_scores_sum_every_adjustment() {
        let base = AbilityScores::new(10, 10, 10, 10, 10, 10);
        let race = Race::new("Android", 4)
            .with_adjustment(AbilityAdjustment::new(Ability::Dexterity, 2))
            .with_adjustment(AbilityAdjustment::new(Ability::Intelligence, 2))
            .with_adjustment(AbilityAdjustment::new(Ability::Charisma, -2));
        let mut theme = Theme::new("Ace Pilot");
        theme.ability_adjustment = Some(AbilityAdjustment::new(Ability::Dexterity, 1));
        let totals = ModifierTotals::from_modifiers(&[Modifier::new(
            "wisdom",
            1,
            ModifierSource::Feat(FeatId::new()),
        )])
        .expect("known target");

        let scores = final_ability_scores(&base, &race, Some(&theme), &totals).expect("in range");
        assert_eq!(scores.strength, 10);
        assert_eq!(scores.dexterity, 13);
        assert_eq!(scores.intelligence, 12);
        assert_eq!(scores.wisdom, 11);
        assert_eq!(scores.charisma, 8);
        assert_eq!(scores.modifiers().dexterity, 1);
    }

    #[test]
    fn final_score_out_of_range_is_rejected() {
        let base = AbilityScores::new(29, 10, 10, 10, 10, 10);
        let race = Race::new("Vesk", 6)
            .with_adjustment(AbilityAdjustment::new(Ability::Strength, 2));

        let result = final_ability_scores(&base, &race, None, &ModifierTotals::default());
        assert_eq!(
            result,
            Err(DomainError::invalid_range("strength", 31, 1, 30))
        );
    }

    #[test]
    fn penalty_below_one_is_rejected() {
        let base = AbilityScores::new(10, 10, 10, 10, 10, 1);
        let race = Race::new("Android", 4)
            .with_adjustment(AbilityAdjustment::new(Ability::Charisma, -2));

        assert!(matches!(
            final_ability_scores(&base, &race, None, &ModifierTotals::default()),
            Err(DomainError::InvalidRange { .. })
        ));
    }

    #[test]
    fn entered_score_out_of_range_fails_before_adjustments() {
        let base = AbilityScores::new(i32::MAX, 10, 10, 10, 10, 10);
        let race = Race::new("Vesk", 6)
            .with_adjustment(AbilityAdjustment::new(Ability::Strength, 2));

        assert_eq!(
            final_ability_scores(&base, &race, None, &ModifierTotals::default()),
            Err(DomainError::invalid_range("strength", i32::MAX, 1, 30))
        );
    }

    #[test]
    fn huge_adjustments_are_a_range_error() {
        let base = AbilityScores::new(30, 10, 10, 10, 10, 10);
        let race = Race::new("Vesk", 6)
            .with_adjustment(AbilityAdjustment::new(Ability::Strength, i32::MAX))
            .with_adjustment(AbilityAdjustment::new(Ability::Strength, i32::MAX));

        let expected = 30 + 2 * i64::from(i32::MAX);
        assert_eq!(
            final_ability_scores(&base, &race, None, &ModifierTotals::default()),
            Err(DomainError::invalid_range("strength", expected, 1, 30))
        );
    }

    #[test]
    fn missing_base_score_fails_before_range_check() {
        let mut base = AbilityScores::new(10, 10, 10, 10, 10, 10);
        base.constitution = None;
        let race = Race::new("Human", 4);
        assert_eq!(
            final_ability_scores(&base, &race, None, &ModifierTotals::default()),
            Err(DomainError::missing_input("constitution"))
        );
    }
}
