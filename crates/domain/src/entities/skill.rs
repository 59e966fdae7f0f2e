//! Skills - the twenty fixed skills and per-character skill ranks

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ability::Ability;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Acrobatics,
    Athletics,
    Bluff,
    Computers,
    Culture,
    Diplomacy,
    Disguise,
    Engineering,
    Intimidate,
    LifeScience,
    Medicine,
    Mysticism,
    Perception,
    PhysicalScience,
    Piloting,
    Profession,
    SenseMotive,
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    pub const ALL: [Skill; 20] = [
        Skill::Acrobatics,
        Skill::Athletics,
        Skill::Bluff,
        Skill::Computers,
        Skill::Culture,
        Skill::Diplomacy,
        Skill::Disguise,
        Skill::Engineering,
        Skill::Intimidate,
        Skill::LifeScience,
        Skill::Medicine,
        Skill::Mysticism,
        Skill::Perception,
        Skill::PhysicalScience,
        Skill::Piloting,
        Skill::Profession,
        Skill::SenseMotive,
        Skill::SleightOfHand,
        Skill::Stealth,
        Skill::Survival,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "acrobatics",
            Skill::Athletics => "athletics",
            Skill::Bluff => "bluff",
            Skill::Computers => "computers",
            Skill::Culture => "culture",
            Skill::Diplomacy => "diplomacy",
            Skill::Disguise => "disguise",
            Skill::Engineering => "engineering",
            Skill::Intimidate => "intimidate",
            Skill::LifeScience => "life_science",
            Skill::Medicine => "medicine",
            Skill::Mysticism => "mysticism",
            Skill::Perception => "perception",
            Skill::PhysicalScience => "physical_science",
            Skill::Piloting => "piloting",
            Skill::Profession => "profession",
            Skill::SenseMotive => "sense_motive",
            Skill::SleightOfHand => "sleight_of_hand",
            Skill::Stealth => "stealth",
            Skill::Survival => "survival",
        }
    }

    /// The ability whose modifier is added to checks with this skill.
    ///
    /// Profession can key off Charisma, Intelligence or Wisdom depending on
    /// the trade; the builder records a single profession, keyed to Wisdom.
    pub fn governing_ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::Piloting | Skill::SleightOfHand | Skill::Stealth => {
                Ability::Dexterity
            }
            Skill::Computers
            | Skill::Culture
            | Skill::Engineering
            | Skill::LifeScience
            | Skill::Medicine
            | Skill::PhysicalScience => Ability::Intelligence,
            Skill::Mysticism
            | Skill::Perception
            | Skill::Profession
            | Skill::SenseMotive
            | Skill::Survival => Ability::Wisdom,
            Skill::Bluff | Skill::Diplomacy | Skill::Disguise | Skill::Intimidate => {
                Ability::Charisma
            }
        }
    }

    /// Whether a character needs at least one rank to attempt the check.
    pub fn trained_only(&self) -> bool {
        matches!(
            self,
            Skill::Computers
                | Skill::Culture
                | Skill::Engineering
                | Skill::LifeScience
                | Skill::Medicine
                | Skill::Mysticism
                | Skill::PhysicalScience
                | Skill::Profession
                | Skill::SleightOfHand
        )
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        // Older records spell mysticism without the second 'i'.
        if normalized == "mysticsm" {
            return Ok(Skill::Mysticism);
        }
        Skill::ALL
            .into_iter()
            .find(|skill| skill.as_str() == normalized)
            .ok_or_else(|| DomainError::parse(format!("Unknown skill: {s}")))
    }
}

/// Ranks a character has invested per skill. Skills without an entry have 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillRanks(BTreeMap<Skill, i32>);

impl SkillRanks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, skill: Skill) -> i32 {
        self.0.get(&skill).copied().unwrap_or(0)
    }

    /// Sets ranks for a skill; zero removes the entry.
    pub fn set(&mut self, skill: Skill, ranks: i32) {
        if ranks == 0 {
            self.0.remove(&skill);
        } else {
            self.0.insert(skill, ranks);
        }
    }

    pub fn with(mut self, skill: Skill, ranks: i32) -> Self {
        self.set(skill, ranks);
        self
    }

    /// Total ranks spent across all skills.
    pub fn total(&self) -> i32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, i32)> + '_ {
        self.0.iter().map(|(skill, ranks)| (*skill, *ranks))
    }
}
