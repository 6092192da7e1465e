/// Console host configuration
use crate::error::{ConsoleError, Result};
use mood_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, read from the working directory if present
pub const DEFAULT_CONFIG_FILE: &str = "mood.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Behaviour of the simulated audio engine
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Length of one display frame in milliseconds
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,

    /// Frames between `load()` and metadata becoming available
    #[serde(default = "default_metadata_frames")]
    pub metadata_frames: u32,

    /// Duration reported for every track
    #[serde(default = "default_track_duration_secs")]
    pub track_duration_secs: f64,

    /// Seconds of media buffered per second of wall time
    #[serde(default = "default_buffer_rate")]
    pub buffer_rate: f64,

    /// Whether handles advertise keyframe seeking
    #[serde(default)]
    pub fast_seek: bool,
}

impl ConsoleConfig {
    /// Load configuration from file and environment
    ///
    /// `path` is required to exist when given; otherwise `mood.toml` is read
    /// if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (MOOD_PLAYER__VOLUME=40)
        settings = settings.add_source(
            config::Environment::with_prefix("MOOD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ConsoleError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConsoleError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.player
            .validate()
            .map_err(|e| ConsoleError::Config(e.to_string()))?;

        if self.simulation.frame_ms == 0 {
            return Err(ConsoleError::Config(
                "simulation.frame_ms must be greater than zero".to_string(),
            ));
        }

        let duration = self.simulation.track_duration_secs;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ConsoleError::Config(format!(
                "simulation.track_duration_secs must be positive, got {}",
                duration
            )));
        }

        if !self.simulation.buffer_rate.is_finite() || self.simulation.buffer_rate < 0.0 {
            return Err(ConsoleError::Config(format!(
                "simulation.buffer_rate must not be negative, got {}",
                self.simulation.buffer_rate
            )));
        }

        Ok(())
    }

    /// Frame length in seconds
    pub fn frame_secs(&self) -> f64 {
        self.simulation.frame_ms as f64 / 1000.0
    }
}

// Default values
fn default_frame_ms() -> u64 {
    16
}

fn default_metadata_frames() -> u32 {
    3
}

fn default_track_duration_secs() -> f64 {
    180.0
}

fn default_buffer_rate() -> f64 {
    4.0
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
            metadata_frames: default_metadata_frames(),
            track_duration_secs: default_track_duration_secs(),
            buffer_rate: default_buffer_rate(),
            fast_seek: false,
        }
    }
}
