//! Starsheet Engine - derives every stored character sheet and prints it as JSON.
//!
//! Usage: `starsheet-engine [CHARACTER_ID]`. With an id only that character is
//! derived.

use anyhow::Context;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use starsheet_domain::{CharacterId, DerivedSheet};
use starsheet_engine::infrastructure::{config::AppConfig, in_memory::InMemoryStore};
use starsheet_engine::use_cases::SheetOutcome;
use starsheet_engine::App;

#[derive(Serialize)]
struct SheetReport<'a> {
    character_id: CharacterId,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sheet: Option<&'a DerivedSheet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a SheetOutcome> for SheetReport<'a> {
    fn from(outcome: &'a SheetOutcome) -> Self {
        Self {
            character_id: outcome.character_id,
            name: &outcome.name,
            sheet: outcome.result.as_ref().ok(),
            error: outcome.result.as_ref().err().map(|e| e.to_string()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(reference_data = %config.reference_data.display(), "Starting Starsheet Engine");

    let store = InMemoryStore::load(&config.reference_data)
        .await
        .with_context(|| {
            format!(
                "Failed to load reference data from {}",
                config.reference_data.display()
            )
        })?;
    let app = App::in_memory(store);

    let output = match std::env::args().nth(1) {
        Some(arg) => {
            let character_id = arg
                .parse::<uuid::Uuid>()
                .map(CharacterId::from_uuid)
                .with_context(|| format!("'{arg}' is not a character id"))?;
            let sheet = app.use_cases.character_sheet.derive(character_id).await?;
            to_json(&sheet, config.pretty_output)?
        }
        None => {
            let outcomes = app.use_cases.character_sheet.derive_all().await?;
            let reports: Vec<SheetReport<'_>> = outcomes.iter().map(SheetReport::from).collect();
            to_json(&reports, config.pretty_output)?
        }
    };

    println!("{output}");
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
