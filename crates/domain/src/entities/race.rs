//! Race entity - ancestry chosen in the first step of the builder

use serde::{Deserialize, Serialize};

use super::ability::AbilityAdjustment;
use super::modifier::Modifier;
use crate::ids::{RaceId, RacialTraitId, SizeId, WorldId};

/// A playable race.
///
/// Descriptive fields are carried for the builder's race page; derivation only
/// reads `hit_points`, `ability_adjustments` and the trait modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub name: String,
    pub home_world_id: Option<WorldId>,
    pub size_id: Option<SizeId>,
    /// Hit points granted once at first level
    pub hit_points: i32,
    #[serde(default)]
    pub ability_adjustments: Vec<AbilityAdjustment>,
    #[serde(default)]
    pub traits: Vec<RacialTrait>,
    #[serde(default)]
    pub creature_type: String,
    #[serde(default)]
    pub avg_height: String,
    #[serde(default)]
    pub avg_weight: String,
    #[serde(default)]
    pub age_of_maturity: u32,
    #[serde(default)]
    pub max_age: String,
    #[serde(default)]
    pub description: String,
}

impl Race {
    pub fn new(name: impl Into<String>, hit_points: i32) -> Self {
        Self {
            id: RaceId::new(),
            name: name.into(),
            home_world_id: None,
            size_id: None,
            hit_points,
            ability_adjustments: Vec::new(),
            traits: Vec::new(),
            creature_type: String::new(),
            avg_height: String::new(),
            avg_weight: String::new(),
            age_of_maturity: 0,
            max_age: String::new(),
            description: String::new(),
        }
    }

    pub fn with_adjustment(mut self, adjustment: AbilityAdjustment) -> Self {
        self.ability_adjustments.push(adjustment);
        self
    }

    pub fn with_trait(mut self, racial_trait: RacialTrait) -> Self {
        self.traits.push(racial_trait);
        self
    }

    /// All modifiers granted by this race's traits.
    pub fn trait_modifiers(&self) -> impl Iterator<Item = &Modifier> {
        self.traits.iter().flat_map(|t| t.modifiers.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacialTrait {
    pub id: RacialTraitId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl RacialTrait {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RacialTraitId::new(),
            name: name.into(),
            description: String::new(),
            modifiers: Vec::new(),
        }
    }
}
