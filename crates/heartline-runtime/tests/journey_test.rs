//! End-to-end journeys through the driver with paused tokio time.

mod common;

use std::sync::Arc;
use std::time::Duration;

use heartline_core::clock::Clock;
use heartline_core::rng::StdRngSource;
use heartline_core::store::{KeyValueStore, StoreKey, Stores};
use heartline_narrative::domain::scene::Scene;
use heartline_runtime::autopilot::Autopilot;
use heartline_runtime::driver::{Journey, TokioClock};
use heartline_runtime::page::PageConfig;
use heartline_store::{JsonFileStore, MemoryStore};
use heartline_test_support::fixed_now;

#[tokio::test(start_paused = true)]
async fn test_autopilot_walks_every_scene_and_persists_state() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let durable = JsonFileStore::open(path.clone()).unwrap();
    let session = MemoryStore::new();
    let clock: Arc<dyn Clock> = Arc::new(TokioClock::starting_at(fixed_now()));
    let mut rng = StdRngSource::seeded(4);
    let mut autopilot = Autopilot::new(StdRngSource::seeded(5));
    let mut journey = Journey {
        stores: Stores {
            durable: &durable,
            session: &session,
        },
        clock,
        rng: &mut rng,
        page_config: PageConfig::default(),
        frame: Duration::from_millis(16),
    };

    // Act
    let visited = journey.run(Scene::Intro, &mut autopilot).await;

    // Assert
    assert_eq!(visited, Scene::ALL.to_vec());
    let reopened = JsonFileStore::open(path).unwrap();
    assert_eq!(reopened.get(StoreKey::Muted).unwrap().as_deref(), Some("0"));
    assert_eq!(
        reopened.get(StoreKey::WasPlaying).unwrap().as_deref(),
        Some("1")
    );
    let position: f64 = reopened
        .get(StoreKey::PositionSeconds)
        .unwrap()
        .unwrap()
        .parse()
        .unwrap();
    assert!(position > 30.0, "music kept running across pages: {position}");
    assert_eq!(reopened.get(StoreKey::SessionMarker).unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_journey_can_start_mid_story() {
    let durable = MemoryStore::new();
    let session = MemoryStore::new();
    let clock: Arc<dyn Clock> = Arc::new(TokioClock::starting_at(fixed_now()));
    let mut rng = StdRngSource::seeded(11);
    let mut autopilot = Autopilot::new(StdRngSource::seeded(12));
    let mut journey = Journey {
        stores: Stores {
            durable: &durable,
            session: &session,
        },
        clock,
        rng: &mut rng,
        page_config: PageConfig::default(),
        frame: Duration::from_millis(16),
    };

    let visited = journey.run(Scene::Hold, &mut autopilot).await;

    assert_eq!(visited, vec![Scene::Hold, Scene::Finale]);
    assert!(session.get(StoreKey::SessionMarker).unwrap().is_some());
}
