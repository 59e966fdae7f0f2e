//! Character entity - the record the builder wizard fills in step by step
//!
//! Every selection is optional until its wizard step is completed. Nothing
//! derived (modifiers, AC, saves, skill totals) is stored here; the sheet is
//! recomputed from these fields on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ability::AbilityScores;
use super::class::MAX_LEVEL;
use super::skill::SkillRanks;
use crate::error::DomainError;
use crate::ids::{
    AlignmentId, CharacterId, ClassId, DeityId, EquipmentId, FeatId, RaceId, SizeId, SpellId,
    ThemeId, WorldId,
};

/// Longest description the builder accepts.
pub const MAX_DESCRIPTION_LEN: usize = 160;
/// Longest gender entry the builder accepts.
pub const MAX_GENDER_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub abilities: AbilityScores,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub race_id: Option<RaceId>,
    #[serde(default)]
    pub class_id: Option<ClassId>,
    #[serde(default)]
    pub theme_id: Option<ThemeId>,
    #[serde(default)]
    pub deity_id: Option<DeityId>,
    #[serde(default)]
    pub home_world_id: Option<WorldId>,
    #[serde(default)]
    pub alignment_id: Option<AlignmentId>,
    #[serde(default)]
    pub size_id: Option<SizeId>,
    #[serde(default)]
    pub feat_ids: Vec<FeatId>,
    #[serde(default)]
    pub spell_ids: Vec<SpellId>,
    #[serde(default)]
    pub equipped_armor_id: Option<EquipmentId>,
    #[serde(default)]
    pub skill_ranks: SkillRanks,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// Starts a new character with only a name, as the first wizard step does.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let name = validate_name(name.into())?;
        Ok(Self {
            id: CharacterId::new(),
            name,
            gender: None,
            description: String::new(),
            abilities: AbilityScores::default(),
            level: Some(1),
            race_id: None,
            class_id: None,
            theme_id: None,
            deity_id: None,
            home_world_id: None,
            alignment_id: None,
            size_id: None,
            feat_ids: Vec::new(),
            spell_ids: Vec::new(),
            equipped_armor_id: None,
            skill_ranks: SkillRanks::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), DomainError> {
        let description = description.into();
        check_description(&description)?;
        self.description = description;
        Ok(())
    }

    /// Sets the gender. A blank entry clears it.
    pub fn set_gender(&mut self, gender: Option<String>) -> Result<(), DomainError> {
        let gender = gender
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());
        if let Some(g) = &gender {
            check_gender(g)?;
        }
        self.gender = gender;
        Ok(())
    }

    /// Checks a record that did not come through the builder, such as one
    /// read from a data file. Absent scores and level are allowed here; the
    /// derivation reports those.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(self.name.clone())?;
        check_description(&self.description)?;
        if let Some(gender) = &self.gender {
            check_gender(gender)?;
        }
        if let Some(level) = self.level {
            if !(1..=MAX_LEVEL).contains(&level) {
                return Err(DomainError::invalid_range("level", level, 1, MAX_LEVEL));
            }
        }
        self.abilities.validate()
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

fn check_description(description: &str) -> Result<(), DomainError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DomainError::validation(format!(
            "Character description cannot exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

fn check_gender(gender: &str) -> Result<(), DomainError> {
    if gender.chars().count() > MAX_GENDER_LEN {
        return Err(DomainError::validation(format!(
            "Character gender cannot exceed {MAX_GENDER_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_name(name: String) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Character name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn new_character_starts_at_level_one_with_no_selections() {
        let character = Character::new("  Navasi ", now()).expect("valid name");
        assert_eq!(character.name, "Navasi");
        assert_eq!(character.level, Some(1));
        assert!(character.race_id.is_none());
        assert!(character.abilities.strength.is_none());
        assert_eq!(character.created_at, character.updated_at);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            Character::new("   ", now()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn description_length_is_limited() {
        let mut character = Character::new("Obozaya", now()).expect("valid name");
        assert!(character.set_description("x".repeat(160)).is_ok());
        assert!(character.set_description("x".repeat(161)).is_err());
    }

    #[test]
    fn gender_length_is_limited_and_blank_clears() {
        let mut character = Character::new("Navasi", now()).expect("valid name");
        character.set_gender(Some(" female ".to_string())).expect("six characters");
        assert_eq!(character.gender.as_deref(), Some("female"));

        assert!(matches!(
            character.set_gender(Some("nonbinary".to_string())),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(character.gender.as_deref(), Some("female"));

        character.set_gender(Some("  ".to_string())).expect("blank clears");
        assert_eq!(character.gender, None);
    }

    #[test]
    fn validate_checks_records_built_elsewhere() {
        let mut character = Character::new("Quig", now()).expect("valid name");
        character.abilities.wisdom = Some(12);
        assert_eq!(character.validate(), Ok(()));

        character.level = None;
        character.abilities.charisma = None;
        assert_eq!(character.validate(), Ok(()));

        let mut strong = character.clone();
        strong.abilities.strength = Some(i32::MAX);
        assert_eq!(
            strong.validate(),
            Err(DomainError::invalid_range("strength", i32::MAX, 1, 30))
        );

        let mut veteran = character.clone();
        veteran.level = Some(21);
        assert!(matches!(veteran.validate(), Err(DomainError::InvalidRange { .. })));

        let mut unnamed = character.clone();
        unnamed.name = " ".to_string();
        assert!(matches!(unnamed.validate(), Err(DomainError::Validation(_))));

        let mut verbose = character;
        verbose.gender = Some("x".repeat(7));
        assert!(matches!(verbose.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn rename_validates() {
        let mut character = Character::new("Keskodai", now()).expect("valid name");
        assert!(character.rename("").is_err());
        assert_eq!(character.name, "Keskodai");
        character.rename("Iseph").expect("valid name");
        assert_eq!(character.name, "Iseph");
    }
}
