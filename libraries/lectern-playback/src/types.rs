//! Core types for playback management

use crate::volume::Volume;
use lectern_core::MediaItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selection generation
///
/// Bumped on every selection and every resequencing. Resource events are
/// tagged with the generation that was active when their load was requested;
/// events from any other generation are discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The generation following this one
    ///
    /// Saturates at `u64::MAX`. From there every further selection shares
    /// that generation, so late events are no longer told apart; at one
    /// selection per nanosecond the ceiling is centuries away.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Player status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Selected but never started (or reset by a selection / load failure)
    Idle,

    /// Currently playing
    Playing,

    /// Paused mid-item
    Paused,

    /// Reached the natural end of the resource
    Ended,
}

/// Playback state snapshot
///
/// An immutable value: the reducer produces a new one for every applied
/// action, and the controller is its only writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Selected material, `None` until something is selected
    pub current_item: Option<MediaItem>,

    /// Position of `current_item` in the playlist
    pub current_index: usize,

    pub status: PlayerStatus,

    /// Always `status == Playing`
    pub is_playing: bool,

    /// Seconds, as last reported by the resource
    pub current_time: f64,

    /// Seconds, 0 until metadata is loaded
    pub duration: f64,

    pub volume: Volume,

    /// Whether the playlist side panel is shown
    pub playlist_visible: bool,

    /// Generation of the active selection
    pub generation: Generation,

    /// Message of the last resource failure for the current selection
    pub load_error: Option<String>,
}

impl PlaybackState {
    /// Initial state: nothing selected
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            current_item: None,
            current_index: 0,
            status: PlayerStatus::Idle,
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: Volume::new(config.initial_volume),
            playlist_visible: config.playlist_visible,
            generation: Generation::default(),
            load_error: None,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.current_item.is_some()
    }

    /// Played fraction in percent, 0 when the duration is unknown
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub initial_volume: f64,

    /// Show the playlist panel initially (default: true)
    pub playlist_visible: bool,

    /// Select the next item after one ends naturally (default: false)
    ///
    /// The next item is selected but not started.
    pub auto_advance: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            playlist_visible: true,
            auto_advance: false,
        }
    }
}
