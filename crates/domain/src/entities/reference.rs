//! Setting reference rows used by the builder's selection steps
//!
//! None of these affect derived numbers except feats, whose modifiers feed the
//! sheet. They are plain data structs with public fields.

use serde::{Deserialize, Serialize};

use super::modifier::Modifier;
use crate::ids::{AlignmentId, DeityId, FeatId, RaceId, SizeId, SpellId, WorldId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub id: AlignmentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub id: SizeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deity {
    pub id: DeityId,
    pub name: String,
    pub alignment_id: AlignmentId,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub id: WorldId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A deity worshipped on a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOfWorship {
    pub world_id: WorldId,
    pub deity_id: DeityId,
}

/// A race native to a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeRace {
    pub world_id: WorldId,
    pub race_id: RaceId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feat {
    pub id: FeatId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-text prerequisites as printed (e.g. "Dex 15, base attack bonus +1")
    #[serde(default)]
    pub prerequisites: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl Feat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: FeatId::new(),
            name: name.into(),
            description: String::new(),
            prerequisites: None,
            modifiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}
