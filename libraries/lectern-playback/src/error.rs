//! Error types for playback management
//!
//! Only caller mistakes on the navigation API are errors. Resource failures
//! never surface here; they become a `LoadError` view instead.

use lectern_core::MaterialId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Playlist has no video items
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Index out of bounds
    #[error("Index out of bounds: {index} (playlist length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Material is not part of the playlist (missing or not a video)
    #[error("Material {0} is not in the playlist")]
    NotInPlaylist(MaterialId),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
