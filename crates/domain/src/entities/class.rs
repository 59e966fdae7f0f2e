//! Character class entity and its per-level progression table

use serde::{Deserialize, Serialize};

use super::ability::Ability;
use super::modifier::Modifier;
use super::skill::Skill;
use crate::ids::{ClassFeatureId, ClassId};

/// Highest level any class progression covers.
pub const MAX_LEVEL: u8 = 20;

/// One row of a class progression table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevel {
    pub level: u8,
    pub base_attack_bonus: i32,
    pub fortitude: i32,
    pub reflex: i32,
    pub will: i32,
}

/// Base attack bonus curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackProgression {
    /// +1 per level
    Full,
    /// +3 per 4 levels
    ThreeQuarter,
}

impl AttackProgression {
    pub fn at(&self, level: u8) -> i32 {
        let level = i32::from(level);
        match self {
            AttackProgression::Full => level,
            AttackProgression::ThreeQuarter => level * 3 / 4,
        }
    }
}

/// Base saving throw curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveProgression {
    Good,
    Poor,
}

impl SaveProgression {
    pub fn at(&self, level: u8) -> i32 {
        let level = i32::from(level);
        match self {
            SaveProgression::Good => 2 + level / 2,
            SaveProgression::Poor => level / 3,
        }
    }
}

/// Builder for the standard progression tables.
pub struct ClassProgression;

impl ClassProgression {
    /// Builds rows for levels `1..=max_level` from the standard curves.
    pub fn standard(
        attack: AttackProgression,
        fortitude: SaveProgression,
        reflex: SaveProgression,
        will: SaveProgression,
        max_level: u8,
    ) -> Vec<ClassLevel> {
        (1..=max_level)
            .map(|level| ClassLevel {
                level,
                base_attack_bonus: attack.at(level),
                fortitude: fortitude.at(level),
                reflex: reflex.at(level),
                will: will.at(level),
            })
            .collect()
    }
}

/// A feature gained at a class level, optionally carrying modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFeature {
    pub id: ClassFeatureId,
    pub level: u8,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl ClassFeature {
    pub fn new(level: u8, name: impl Into<String>) -> Self {
        Self {
            id: ClassFeatureId::new(),
            level,
            name: name.into(),
            description: String::new(),
            modifiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterClass {
    pub id: ClassId,
    pub name: String,
    pub key_ability: Ability,
    pub hit_points_per_level: i32,
    pub stamina_points_per_level: i32,
    #[serde(default)]
    pub skill_ranks_per_level: i32,
    #[serde(default)]
    pub class_skills: Vec<Skill>,
    pub progression: Vec<ClassLevel>,
    #[serde(default)]
    pub features: Vec<ClassFeature>,
    #[serde(default)]
    pub description: String,
}

impl CharacterClass {
    pub fn new(
        name: impl Into<String>,
        key_ability: Ability,
        hit_points_per_level: i32,
        stamina_points_per_level: i32,
        progression: Vec<ClassLevel>,
    ) -> Self {
        Self {
            id: ClassId::new(),
            name: name.into(),
            key_ability,
            hit_points_per_level,
            stamina_points_per_level,
            skill_ranks_per_level: 0,
            class_skills: Vec::new(),
            progression,
            features: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_class_skills(mut self, skills: impl IntoIterator<Item = Skill>) -> Self {
        self.class_skills.extend(skills);
        self
    }

    pub fn with_feature(mut self, feature: ClassFeature) -> Self {
        self.features.push(feature);
        self
    }

    /// Progression row for `level`, if the table defines one.
    pub fn level_row(&self, level: u8) -> Option<&ClassLevel> {
        self.progression.iter().find(|row| row.level == level)
    }

    pub fn is_class_skill(&self, skill: Skill) -> bool {
        self.class_skills.contains(&skill)
    }

    /// Modifiers from every feature gained at or below `level`.
    pub fn feature_modifiers(&self, level: u8) -> impl Iterator<Item = &Modifier> {
        self.features
            .iter()
            .filter(move |f| f.level <= level)
            .flat_map(|f| f.modifiers.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ModifierSource;

    #[test]
    fn attack_curves() {
        assert_eq!(AttackProgression::Full.at(1), 1);
        assert_eq!(AttackProgression::Full.at(20), 20);
        assert_eq!(AttackProgression::ThreeQuarter.at(1), 0);
        assert_eq!(AttackProgression::ThreeQuarter.at(4), 3);
        assert_eq!(AttackProgression::ThreeQuarter.at(20), 15);
    }

    #[test]
    fn save_curves() {
        assert_eq!(SaveProgression::Good.at(1), 2);
        assert_eq!(SaveProgression::Good.at(20), 12);
        assert_eq!(SaveProgression::Poor.at(1), 0);
        assert_eq!(SaveProgression::Poor.at(3), 1);
        assert_eq!(SaveProgression::Poor.at(20), 6);
    }

    #[test]
    fn standard_progression_covers_every_level() {
        let rows = ClassProgression::standard(
            AttackProgression::Full,
            SaveProgression::Good,
            SaveProgression::Poor,
            SaveProgression::Good,
            MAX_LEVEL,
        );
        assert_eq!(rows.len(), 20);
        assert_eq!(
            rows[4],
            ClassLevel {
                level: 5,
                base_attack_bonus: 5,
                fortitude: 4,
                reflex: 1,
                will: 4,
            }
        );
    }

    #[test]
    fn level_row_lookup() {
        let class = CharacterClass::new(
            "Soldier",
            Ability::Strength,
            7,
            7,
            ClassProgression::standard(
                AttackProgression::Full,
                SaveProgression::Good,
                SaveProgression::Poor,
                SaveProgression::Good,
                3,
            ),
        );
        assert_eq!(class.level_row(3).map(|r| r.base_attack_bonus), Some(3));
        assert!(class.level_row(4).is_none());
    }

    #[test]
    fn feature_modifiers_respect_level() {
        let mut early = ClassFeature::new(1, "Armor Training");
        early.modifiers.push(Modifier::new(
            "kac",
            1,
            ModifierSource::ClassFeature(early.id),
        ));
        let mut late = ClassFeature::new(5, "Weapon Focus");
        late.modifiers.push(Modifier::new(
            "melee_attack",
            1,
            ModifierSource::ClassFeature(late.id),
        ));

        let class = CharacterClass::new("Soldier", Ability::Strength, 7, 7, Vec::new())
            .with_feature(early)
            .with_feature(late);

        assert_eq!(class.feature_modifiers(1).count(), 1);
        assert_eq!(class.feature_modifiers(5).count(), 2);
    }
}
