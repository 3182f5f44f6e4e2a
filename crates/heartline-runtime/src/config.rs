//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use heartline_narrative::domain::scene::Scene;

use crate::error::AppError;

/// Default location of the durable store file.
pub const DEFAULT_STORE_PATH: &str = "heartline-state.json";

/// Default path of the background music asset.
pub const DEFAULT_MUSIC_ASSET: &str = "assets/music/ambient-love.mp3";

/// Default frame interval of the driver.
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Settings for one run of the headless runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub store_path: PathBuf,
    pub start_scene: Scene,
    pub music_asset: String,
    pub frame: Duration,
    /// Seeds both the page RNG and the autopilot; `None` draws from the OS.
    pub autopilot_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            start_scene: Scene::Intro,
            music_asset: DEFAULT_MUSIC_ASSET.to_owned(),
            frame: Duration::from_millis(DEFAULT_FRAME_MS),
            autopilot_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Reads configuration from `HEARTLINE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store_path = lookup("HEARTLINE_STORE_PATH").map_or(defaults.store_path, PathBuf::from);

        let start_scene = match lookup("HEARTLINE_START_SCENE") {
            Some(value) => value
                .parse::<Scene>()
                .map_err(|e| AppError::Config(format!("HEARTLINE_START_SCENE: {e}")))?,
            None => defaults.start_scene,
        };

        let music_asset = lookup("HEARTLINE_MUSIC_ASSET").unwrap_or(defaults.music_asset);

        let frame = match lookup("HEARTLINE_FRAME_MS") {
            Some(value) => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(AppError::Config(format!(
                        "HEARTLINE_FRAME_MS must be a positive integer, got {value:?}"
                    )));
                }
            },
            None => defaults.frame,
        };

        let autopilot_seed = lookup("HEARTLINE_AUTOPILOT_SEED")
            .map(|value| {
                value.parse::<u64>().map_err(|e| {
                    AppError::Config(format!("HEARTLINE_AUTOPILOT_SEED must be a u64: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            store_path,
            start_scene,
            music_asset,
            frame,
            autopilot_seed,
        })
    }
}
