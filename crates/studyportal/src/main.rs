//! Command-line entry point: restores the session, optionally logs in with
//! env-provided credentials, and prints the dashboard.

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use studyportal::actions::{auth, dashboard};
use studyportal::guard::{self, GuardState};
use studyportal::storage::SqliteTokenStore;
use studyportal::text::strip_tags;
use studyportal::theme::subject_color;
use studyportal::{PortalConfig, PortalState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => PortalConfig::load_from_file(Path::new(&path))
            .with_context(|| format!("Loading config from {}", path))?,
        None => PortalConfig::from_env().context("Building config from environment")?,
    };

    let storage = Arc::new(
        SqliteTokenStore::open(&config.db_path)
            .with_context(|| format!("Opening token store at {}", config.db_path))?,
    );
    let state = PortalState::new(config, storage).context("Building portal state")?;

    let mut guard_state = guard::decide_initial_state(&state);
    info!(state = ?guard_state, "Session restored");

    if guard_state == GuardState::Unauthenticated {
        let (email, password) = match (
            std::env::var("PORTAL_EMAIL"),
            std::env::var("PORTAL_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) => (email, password),
            _ => {
                println!("No session. Set PORTAL_EMAIL and PORTAL_PASSWORD to log in.");
                return Ok(());
            }
        };
        let status = auth::login(&state, &email, &password)
            .await
            .context("Login failed")?;
        info!(status = status.as_u16(), "Logged in");
        guard_state = GuardState::Authenticated;
    }

    debug_assert_eq!(guard_state, GuardState::Authenticated);
    dashboard::fetch_subjects(&state)
        .await
        .context("Fetching dashboard")?;

    let resources = state.resources();
    let subjects = resources.subjects.get().map(Vec::as_slice).unwrap_or(&[]);
    println!("Enrolled subjects ({}):", subjects.len());
    for (index, subject) in subjects.iter().enumerate() {
        println!(
            "  [{}] {} - {}",
            subject_color(index),
            subject.name,
            strip_tags(&subject.description)
        );
    }

    Ok(())
}
