//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    in_memory::InMemoryStore,
    ports::{CharacterRepo, ClockPort, ReferenceDataRepo},
};
use crate::use_cases::{CharacterManagementUseCases, CharacterSheetUseCases};

/// Main application state.
///
/// Holds the repositories and the use cases built on them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Port traits injected directly.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub reference: Arc<dyn ReferenceDataRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub character_sheet: CharacterSheetUseCases,
    pub character: CharacterManagementUseCases,
}

impl App {
    /// Wires every use case to the given ports.
    pub fn new(
        character: Arc<dyn CharacterRepo>,
        reference: Arc<dyn ReferenceDataRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let use_cases = UseCases {
            character_sheet: CharacterSheetUseCases::new(character.clone(), reference.clone()),
            character: CharacterManagementUseCases::new(
                character.clone(),
                reference.clone(),
                clock,
            ),
        };

        Self {
            repositories: Repositories {
                character,
                reference,
            },
            use_cases,
        }
    }

    /// One in-memory store serves both ports.
    pub fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store, Arc::new(SystemClock::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::in_memory::ReferenceDataSet;
    use crate::use_cases::CharacterDraft;
    use chrono::{TimeZone, Utc};
    use starsheet_domain::{
        Ability, AbilityScores, AttackProgression, CharacterClass, ClassProgression, Race,
        SaveProgression, MAX_LEVEL,
    };

    #[tokio::test]
    async fn created_character_derives_through_the_same_store() {
        let race = Race::new("Kasatha", 4);
        let class = CharacterClass::new(
            "Solarian",
            Ability::Charisma,
            7,
            7,
            ClassProgression::standard(
                AttackProgression::Full,
                SaveProgression::Good,
                SaveProgression::Poor,
                SaveProgression::Good,
                MAX_LEVEL,
            ),
        );
        let draft = CharacterDraft {
            name: "Altronus".to_string(),
            level: Some(1),
            abilities: AbilityScores::new(14, 12, 12, 10, 10, 16),
            race_id: Some(race.id),
            class_id: Some(class.id),
            ..CharacterDraft::default()
        };
        let store = InMemoryStore::from_data_set(ReferenceDataSet {
            races: vec![race],
            classes: vec![class],
            ..ReferenceDataSet::default()
        })
        .unwrap();
        let store = Arc::new(store);
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let app = App::new(store.clone(), store, Arc::new(clock));

        let character = app.use_cases.character.create(draft).await.unwrap();
        let sheet = app
            .use_cases
            .character_sheet
            .derive(character.id)
            .await
            .unwrap();

        assert_eq!(sheet.max_hit_points, 11);
        assert_eq!(sheet.max_resolve_points, 3);
        assert_eq!(sheet.eac, 11);

        let listed = app.repositories.character.list().await.unwrap();
        assert_eq!(listed.len(), 1);
    }
}
