//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// A playlist was built without any tracks
    #[error("Playlist '{0}' has no tracks")]
    EmptyPlaylist(String),

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Invalid seek position (negative or not a number)
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Audio engine error
    #[error("Audio engine error: {0}")]
    Engine(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
