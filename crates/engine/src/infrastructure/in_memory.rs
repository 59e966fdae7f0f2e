//! In-memory character and reference data store.
//!
//! The whole reference data set is read from one JSON document at startup.
//! Characters listed in that document are seeded into the character map;
//! characters saved afterwards live only for the life of the process.

use std::hash::Hash;
use std::path::Path;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use starsheet_domain::{
    Alignment, AlignmentId, Armor, Character, CharacterClass, CharacterId, ClassId, Deity,
    DeityId, Equipment, EquipmentId, Feat, FeatId, NativeRace, PlaceOfWorship, Race, RaceId,
    Size, SizeId, Spell, SpellId, Theme, ThemeId, World, WorldId,
};

use crate::infrastructure::ports::{CharacterRepo, ReferenceDataRepo, RepoError};

/// On-disk shape of the reference data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceDataSet {
    #[serde(default)]
    pub races: Vec<Race>,
    #[serde(default)]
    pub classes: Vec<CharacterClass>,
    #[serde(default)]
    pub themes: Vec<Theme>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub feats: Vec<Feat>,
    #[serde(default)]
    pub spells: Vec<Spell>,
    #[serde(default)]
    pub deities: Vec<Deity>,
    #[serde(default)]
    pub worlds: Vec<World>,
    #[serde(default)]
    pub alignments: Vec<Alignment>,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub places_of_worship: Vec<PlaceOfWorship>,
    #[serde(default)]
    pub native_races: Vec<NativeRace>,
    #[serde(default)]
    pub characters: Vec<Character>,
}

pub struct InMemoryStore {
    characters: DashMap<CharacterId, Character>,
    races: DashMap<RaceId, Race>,
    classes: DashMap<ClassId, CharacterClass>,
    themes: DashMap<ThemeId, Theme>,
    equipment: DashMap<EquipmentId, Equipment>,
    feats: DashMap<FeatId, Feat>,
    spells: DashMap<SpellId, Spell>,
    deities: DashMap<DeityId, Deity>,
    worlds: DashMap<WorldId, World>,
    alignments: DashMap<AlignmentId, Alignment>,
    sizes: DashMap<SizeId, Size>,
    places_of_worship: Vec<PlaceOfWorship>,
    native_races: Vec<NativeRace>,
}

fn index<K, V>(rows: Vec<V>, key: impl Fn(&V) -> K) -> DashMap<K, V>
where
    K: Eq + Hash,
{
    rows.into_iter().map(|row| (key(&row), row)).collect()
}

/// Clones every row out of `map`, ordered by name so listings are stable.
fn sorted_by_name<K, V>(map: &DashMap<K, V>, name: impl Fn(&V) -> &str) -> Vec<V>
where
    K: Eq + Hash,
    V: Clone,
{
    let mut rows: Vec<V> = map.iter().map(|entry| entry.value().clone()).collect();
    rows.sort_by(|a, b| name(a).cmp(name(b)));
    rows
}

fn cloned<K, V>(map: &DashMap<K, V>, id: &K) -> Option<V>
where
    K: Eq + Hash,
    V: Clone,
{
    map.get(id).map(|entry| entry.value().clone())
}

impl InMemoryStore {
    /// Reads and indexes a reference data file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            RepoError::storage("load_reference_data", format!("{}: {e}", path.display()))
        })?;
        let data: ReferenceDataSet = serde_json::from_str(&contents)
            .map_err(|e| RepoError::serialization(format!("{}: {e}", path.display())))?;

        let store = Self::from_data_set(data)?;
        tracing::info!(
            path = %path.display(),
            races = store.races.len(),
            classes = store.classes.len(),
            themes = store.themes.len(),
            equipment = store.equipment.len(),
            feats = store.feats.len(),
            characters = store.characters.len(),
            "Loaded reference data"
        );
        Ok(store)
    }

    /// Indexes an already parsed data set. Theme tiers and seeded characters
    /// are checked here so a bad row fails at load rather than on the first
    /// derivation.
    pub fn from_data_set(data: ReferenceDataSet) -> Result<Self, RepoError> {
        for theme in &data.themes {
            theme.validate().map_err(|e| {
                RepoError::serialization(format!("theme '{}': {e}", theme.name))
            })?;
        }
        for character in &data.characters {
            character.validate().map_err(|e| {
                RepoError::serialization(format!("character '{}': {e}", character.name))
            })?;
        }

        Ok(Self {
            characters: index(data.characters, |c| c.id),
            races: index(data.races, |r| r.id),
            classes: index(data.classes, |c| c.id),
            themes: index(data.themes, |t| t.id),
            equipment: index(data.equipment, |e| e.id),
            feats: index(data.feats, |f| f.id),
            spells: index(data.spells, |s| s.id),
            deities: index(data.deities, |d| d.id),
            worlds: index(data.worlds, |w| w.id),
            alignments: index(data.alignments, |a| a.id),
            sizes: index(data.sizes, |s| s.id),
            places_of_worship: data.places_of_worship,
            native_races: data.native_races,
        })
    }
}

#[async_trait]
impl CharacterRepo for InMemoryStore {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        Ok(cloned(&self.characters, &id))
    }

    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        let mut characters: Vec<Character> = self
            .characters
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        characters.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(characters)
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        self.characters.insert(character.id, character.clone());
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        self.characters
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Character", id))
    }
}

#[async_trait]
impl ReferenceDataRepo for InMemoryStore {
    async fn get_race(&self, id: RaceId) -> Result<Option<Race>, RepoError> {
        Ok(cloned(&self.races, &id))
    }

    async fn get_class(&self, id: ClassId) -> Result<Option<CharacterClass>, RepoError> {
        Ok(cloned(&self.classes, &id))
    }

    async fn get_theme(&self, id: ThemeId) -> Result<Option<Theme>, RepoError> {
        Ok(cloned(&self.themes, &id))
    }

    async fn get_armor(&self, id: EquipmentId) -> Result<Option<Armor>, RepoError> {
        self.equipment
            .get(&id)
            .map(|row| Armor::from_equipment(row.value()))
            .transpose()
            .map_err(RepoError::serialization)
    }

    async fn get_feat(&self, id: FeatId) -> Result<Option<Feat>, RepoError> {
        Ok(cloned(&self.feats, &id))
    }

    async fn get_deity(&self, id: DeityId) -> Result<Option<Deity>, RepoError> {
        Ok(cloned(&self.deities, &id))
    }

    async fn get_world(&self, id: WorldId) -> Result<Option<World>, RepoError> {
        Ok(cloned(&self.worlds, &id))
    }

    async fn get_alignment(&self, id: AlignmentId) -> Result<Option<Alignment>, RepoError> {
        Ok(cloned(&self.alignments, &id))
    }

    async fn get_size(&self, id: SizeId) -> Result<Option<Size>, RepoError> {
        Ok(cloned(&self.sizes, &id))
    }

    async fn get_spell(&self, id: SpellId) -> Result<Option<Spell>, RepoError> {
        Ok(cloned(&self.spells, &id))
    }

    async fn list_races(&self) -> Result<Vec<Race>, RepoError> {
        Ok(sorted_by_name(&self.races, |r| r.name.as_str()))
    }

    async fn list_classes(&self) -> Result<Vec<CharacterClass>, RepoError> {
        Ok(sorted_by_name(&self.classes, |c| c.name.as_str()))
    }

    async fn list_themes(&self) -> Result<Vec<Theme>, RepoError> {
        Ok(sorted_by_name(&self.themes, |t| t.name.as_str()))
    }

    async fn list_deities(&self) -> Result<Vec<Deity>, RepoError> {
        Ok(sorted_by_name(&self.deities, |d| d.name.as_str()))
    }

    async fn list_worlds(&self) -> Result<Vec<World>, RepoError> {
        Ok(sorted_by_name(&self.worlds, |w| w.name.as_str()))
    }

    async fn list_alignments(&self) -> Result<Vec<Alignment>, RepoError> {
        Ok(sorted_by_name(&self.alignments, |a| a.name.as_str()))
    }

    async fn list_native_races(&self, world_id: WorldId) -> Result<Vec<Race>, RepoError> {
        let mut races: Vec<Race> = self
            .native_races
            .iter()
            .filter(|link| link.world_id == world_id)
            .filter_map(|link| cloned(&self.races, &link.race_id))
            .collect();
        races.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(races)
    }

    async fn list_deities_for_world(&self, world_id: WorldId) -> Result<Vec<Deity>, RepoError> {
        let mut deities: Vec<Deity> = self
            .places_of_worship
            .iter()
            .filter(|link| link.world_id == world_id)
            .filter_map(|link| cloned(&self.deities, &link.deity_id))
            .collect();
        deities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(deities)
    }
}
