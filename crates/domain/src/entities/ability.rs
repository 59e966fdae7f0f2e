//! Ability scores - the six raw attributes every character has

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_range, DomainError};

/// Lowest ability score the ruleset allows after all adjustments.
pub const MIN_ABILITY_SCORE: i32 = 1;
/// Highest ability score the ruleset allows after all adjustments.
pub const MAX_ABILITY_SCORE: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strength" | "str" => Ok(Ability::Strength),
            "dexterity" | "dex" => Ok(Ability::Dexterity),
            "constitution" | "con" => Ok(Ability::Constitution),
            "intelligence" | "int" => Ok(Ability::Intelligence),
            "wisdom" | "wis" => Ok(Ability::Wisdom),
            "charisma" | "cha" => Ok(Ability::Charisma),
            other => Err(DomainError::parse(format!("Unknown ability: {other}"))),
        }
    }
}

/// Raw ability scores as entered in the builder.
///
/// A score is `None` until the player fills it in. Derivation refuses to run
/// on an absent score rather than assuming an average 10.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: Option<i32>,
    pub dexterity: Option<i32>,
    pub constitution: Option<i32>,
    pub intelligence: Option<i32>,
    pub wisdom: Option<i32>,
    pub charisma: Option<i32>,
}

impl AbilityScores {
    /// All six scores present, in `Ability::ALL` order.
    pub fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength: Some(strength),
            dexterity: Some(dexterity),
            constitution: Some(constitution),
            intelligence: Some(intelligence),
            wisdom: Some(wisdom),
            charisma: Some(charisma),
        }
    }

    pub fn get(&self, ability: Ability) -> Option<i32> {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, score: Option<i32>) {
        let slot = match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        };
        *slot = score;
    }

    /// Returns the score or `MissingInput` naming the ability.
    pub fn require(&self, ability: Ability) -> Result<i32, DomainError> {
        self.get(ability)
            .ok_or_else(|| DomainError::missing_input(ability.as_str()))
    }

    /// Checks every entered score lies within the legal range. Absent scores pass.
    pub fn validate(&self) -> Result<(), DomainError> {
        for ability in Ability::ALL {
            if let Some(score) = self.get(ability) {
                ensure_range(ability.as_str(), score, MIN_ABILITY_SCORE, MAX_ABILITY_SCORE)?;
            }
        }
        Ok(())
    }
}

/// A flat adjustment to one ability score (racial or theme bonus/penalty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityAdjustment {
    pub ability: Ability,
    pub value: i32,
}

impl AbilityAdjustment {
    pub fn new(ability: Ability, value: i32) -> Self {
        Self { ability, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_abbreviations() {
        assert_eq!("Strength".parse::<Ability>(), Ok(Ability::Strength));
        assert_eq!("dex".parse::<Ability>(), Ok(Ability::Dexterity));
        assert_eq!(" WIS ".parse::<Ability>(), Ok(Ability::Wisdom));
        assert!("luck".parse::<Ability>().is_err());
    }

    #[test]
    fn require_reports_the_missing_ability() {
        let mut scores = AbilityScores::new(10, 10, 10, 10, 10, 10);
        scores.set(Ability::Wisdom, None);

        assert_eq!(scores.require(Ability::Strength), Ok(10));
        assert_eq!(
            scores.require(Ability::Wisdom),
            Err(DomainError::missing_input("wisdom"))
        );
    }

    #[test]
    fn validate_checks_entered_scores_only() {
        let mut scores = AbilityScores::default();
        assert_eq!(scores.validate(), Ok(()));

        scores.set(Ability::Dexterity, Some(18));
        assert_eq!(scores.validate(), Ok(()));

        scores.set(Ability::Charisma, Some(0));
        assert_eq!(
            scores.validate(),
            Err(DomainError::invalid_range("charisma", 0, 1, 30))
        );
    }

    #[test]
    fn default_scores_are_absent() {
        let scores = AbilityScores::default();
        assert!(Ability::ALL.iter().all(|a| scores.get(*a).is_none()));
    }
}
