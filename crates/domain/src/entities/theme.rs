//! Theme entity - background chosen alongside race and class
//!
//! A theme grants benefits in tiers that unlock as the character levels.

use serde::{Deserialize, Serialize};

use super::ability::AbilityAdjustment;
use super::modifier::Modifier;
use crate::error::DomainError;
use crate::ids::ThemeId;

/// Character levels at which theme tiers unlock.
pub const THEME_TIER_LEVELS: [u8; 4] = [1, 6, 12, 18];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeTier {
    pub level: u8,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl ThemeTier {
    pub fn new(level: u8, name: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
            description: String::new(),
            modifiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: ThemeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ability score bonus granted at first level, if any
    #[serde(default)]
    pub ability_adjustment: Option<AbilityAdjustment>,
    #[serde(default)]
    pub tiers: Vec<ThemeTier>,
}

impl Theme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ThemeId::new(),
            name: name.into(),
            description: String::new(),
            ability_adjustment: None,
            tiers: Vec::new(),
        }
    }

    /// Adds a tier, rejecting levels other than 1, 6, 12 and 18.
    pub fn with_tier(mut self, tier: ThemeTier) -> Result<Self, DomainError> {
        validate_tier_level(tier.level)?;
        self.tiers.push(tier);
        Ok(self)
    }

    /// Tiers unlocked at `level`.
    pub fn unlocked_tiers(&self, level: u8) -> impl Iterator<Item = &ThemeTier> {
        self.tiers.iter().filter(move |tier| tier.level <= level)
    }

    /// Checks every tier sits on an unlock level. Used on rows read from storage.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.tiers
            .iter()
            .try_for_each(|tier| validate_tier_level(tier.level))
    }
}

fn validate_tier_level(level: u8) -> Result<(), DomainError> {
    if THEME_TIER_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "Theme tier level must be one of {THEME_TIER_LEVELS:?}, got {level}"
        )))
    }
}
