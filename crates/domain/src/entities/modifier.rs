//! Modifier entity - a named (stat, delta) adjustment
//!
//! Modifiers are attached to racial traits, feats, theme tiers and class
//! features. The stat is stored as free text (`effected_stat`) the way the
//! reference data authors wrote it; it is resolved to a typed target only when
//! a sheet is derived, so an unrecognized name surfaces as an error there.

use serde::{Deserialize, Serialize};

use crate::ids::{ClassFeatureId, FeatId, ModifierId, RacialTraitId, ThemeId};

/// Where a modifier row comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ModifierSource {
    RacialTrait(RacialTraitId),
    Feat(FeatId),
    Theme(ThemeId),
    ClassFeature(ClassFeatureId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub id: ModifierId,
    /// Name of the stat this modifier changes (e.g. "kac", "perception")
    pub effected_stat: String,
    /// Signed delta added to the stat
    pub modification: i32,
    pub source: ModifierSource,
}

impl Modifier {
    pub fn new(effected_stat: impl Into<String>, modification: i32, source: ModifierSource) -> Self {
        Self {
            id: ModifierId::new(),
            effected_stat: effected_stat.into(),
            modification,
            source,
        }
    }
}
