//! Equipment and armor
//!
//! Equipment rows keep their kind-specific data in a JSON `attributes`
//! document. Armor is the only kind the sheet derivation reads, so it gets a
//! typed view built from those attributes.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::EquipmentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Armor,
    ArmorUpgrade,
    Ammunition,
    Augmentation,
    Computer,
    ComputerUpgrade,
    Fusion,
    Grenade,
    MeleeWeapon,
    RangedWeapon,
    Gear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub kind: EquipmentKind,
    pub name: String,
    /// Kind-specific attributes (e.g. armor bonuses, weapon damage)
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl Equipment {
    pub fn new(kind: EquipmentKind, name: impl Into<String>, attributes: serde_json::Value) -> Self {
        Self {
            id: EquipmentId::new(),
            kind,
            name: name.into(),
            attributes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorCategory {
    Light,
    Heavy,
    Powered,
}

/// Worn armor as seen by the combat composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub id: EquipmentId,
    pub name: String,
    pub category: ArmorCategory,
    pub eac_bonus: i32,
    pub kac_bonus: i32,
    /// Highest dexterity modifier that still counts toward AC; `None` is uncapped
    pub max_dex_bonus: Option<i32>,
}

/// Shape of the `attributes` document on an armor row.
#[derive(Debug, Deserialize)]
struct ArmorAttributes {
    category: ArmorCategory,
    #[serde(default)]
    eac_bonus: i32,
    #[serde(default)]
    kac_bonus: i32,
    #[serde(default)]
    max_dex_bonus: Option<i32>,
}

impl Armor {
    pub fn new(
        name: impl Into<String>,
        category: ArmorCategory,
        eac_bonus: i32,
        kac_bonus: i32,
        max_dex_bonus: Option<i32>,
    ) -> Self {
        Self {
            id: EquipmentId::new(),
            name: name.into(),
            category,
            eac_bonus,
            kac_bonus,
            max_dex_bonus,
        }
    }

    /// Reads the typed armor view out of an equipment row.
    pub fn from_equipment(equipment: &Equipment) -> Result<Self, DomainError> {
        if equipment.kind != EquipmentKind::Armor {
            return Err(DomainError::validation(format!(
                "Equipment '{}' is {:?}, not armor",
                equipment.name, equipment.kind
            )));
        }

        let attributes: ArmorAttributes = serde_json::from_value(equipment.attributes.clone())
            .map_err(|e| {
                DomainError::parse(format!(
                    "Invalid armor attributes on '{}': {e}",
                    equipment.name
                ))
            })?;

        Ok(Self {
            id: equipment.id,
            name: equipment.name.clone(),
            category: attributes.category,
            eac_bonus: attributes.eac_bonus,
            kac_bonus: attributes.kac_bonus,
            max_dex_bonus: attributes.max_dex_bonus,
        })
    }

    /// Caps a dexterity modifier at this armor's limit.
    pub fn cap_dexterity(&self, dexterity_modifier: i32) -> i32 {
        match self.max_dex_bonus {
            Some(cap) => dexterity_modifier.min(cap),
            None => dexterity_modifier,
        }
    }
}
