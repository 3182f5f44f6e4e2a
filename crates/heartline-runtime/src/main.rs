//! Heartline headless runtime entry point.

use std::sync::Arc;

use chrono::Utc;
use heartline_core::clock::Clock;
use heartline_core::rng::StdRngSource;
use heartline_core::store::Stores;
use heartline_runtime::autopilot::Autopilot;
use heartline_runtime::config::RuntimeConfig;
use heartline_runtime::driver::{Journey, TokioClock};
use heartline_runtime::error::AppError;
use heartline_runtime::page::PageConfig;
use heartline_store::{JsonFileStore, MemoryStore};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Heartline headless runtime");

    // Read configuration from environment.
    let config = RuntimeConfig::from_env()?;

    // The durable store outlives the process; the session store is the
    // browsing session and lives exactly as long as this run.
    let durable = JsonFileStore::open(config.store_path.clone())?;
    let session = MemoryStore::new();
    tracing::info!(store = %durable.path().display(), "durable store opened");

    let clock: Arc<dyn Clock> = Arc::new(TokioClock::starting_at(Utc::now()));
    let (mut page_rng, autopilot_rng) = match config.autopilot_seed {
        Some(seed) => (
            StdRngSource::seeded(seed),
            StdRngSource::seeded(seed.wrapping_add(1)),
        ),
        None => (StdRngSource::from_os(), StdRngSource::from_os()),
    };
    let mut autopilot = Autopilot::new(autopilot_rng);

    let mut journey = Journey {
        stores: Stores {
            durable: &durable,
            session: &session,
        },
        clock,
        rng: &mut page_rng,
        page_config: PageConfig {
            music_asset: config.music_asset.clone(),
        },
        frame: config.frame,
    };

    let visited = journey.run(config.start_scene, &mut autopilot).await;
    let scenes: Vec<&str> = visited.iter().map(|scene| scene.identity()).collect();
    tracing::info!(?scenes, "journey finished");

    Ok(())
}
