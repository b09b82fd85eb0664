//! Playback Events
//!
//! Event-based communication for UI synchronization and observability.
//! The controller emits events only at defined points:
//! - Status transitions (idle/playing/paused/ended)
//! - Selection changes and playlist rebuilds
//! - Position, duration and volume changes
//! - Completions, load errors and discarded stale resource events
//!
//! Events are queued for the UI (`drain_events`) and forwarded to the
//! installed [`PlaybackObserver`].

use crate::types::{Generation, PlayerStatus};
use lectern_core::MaterialId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Player status changed
    StateChanged {
        from: PlayerStatus,
        to: PlayerStatus,
    },

    /// A new item was selected
    TrackChanged {
        material_id: MaterialId,
        index: usize,
        generation: Generation,
        previous_material_id: Option<MaterialId>,
    },

    /// Position reported by the resource
    PositionUpdate { current_time: f64, duration: f64 },

    /// Duration became known
    DurationChanged { duration: f64 },

    /// Volume changed
    VolumeChanged { level: f64 },

    /// Item played to its natural end
    TrackFinished { material_id: MaterialId },

    /// Playlist was rebuilt from a new material collection
    PlaylistChanged { length: usize },

    /// Playlist panel shown or hidden
    PlaylistVisibilityChanged { visible: bool },

    /// Resource event from a superseded selection was dropped
    StaleEventDiscarded {
        event_generation: Generation,
        active_generation: Generation,
    },

    /// Resource failed to load or play
    Error {
        material_id: Option<MaterialId>,
        message: String,
    },
}

/// Hook invoked for every emitted event
pub trait PlaybackObserver {
    fn on_event(&mut self, event: &PlaybackEvent);
}

/// Default observer: structured `tracing` output
///
/// Errors and discarded events at `warn`, selections and completions at
/// `info`, other transitions at `debug`, positions at `trace`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PlaybackObserver for TracingObserver {
    fn on_event(&mut self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::StateChanged { from, to } => {
                debug!(?from, ?to, "playback state changed");
            }
            PlaybackEvent::TrackChanged {
                material_id,
                index,
                generation,
                previous_material_id,
            } => {
                info!(
                    material_id = %material_id,
                    index,
                    generation = %generation,
                    previous = ?previous_material_id,
                    "selected playlist item"
                );
            }
            PlaybackEvent::PositionUpdate {
                current_time,
                duration,
            } => {
                trace!(current_time, duration, "position update");
            }
            PlaybackEvent::DurationChanged { duration } => {
                debug!(duration, "duration loaded");
            }
            PlaybackEvent::VolumeChanged { level } => {
                debug!(level, "volume changed");
            }
            PlaybackEvent::TrackFinished { material_id } => {
                info!(material_id = %material_id, "playback completed");
            }
            PlaybackEvent::PlaylistChanged { length } => {
                debug!(length, "playlist rebuilt");
            }
            PlaybackEvent::PlaylistVisibilityChanged { visible } => {
                trace!(visible, "playlist visibility changed");
            }
            PlaybackEvent::StaleEventDiscarded {
                event_generation,
                active_generation,
            } => {
                warn!(
                    event_generation = %event_generation,
                    active_generation = %active_generation,
                    "discarded resource event from superseded selection"
                );
            }
            PlaybackEvent::Error {
                material_id,
                message,
            } => {
                warn!(material_id = ?material_id, error = %message, "media resource failed");
            }
        }
    }
}

/// Observer that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PlaybackObserver for NoopObserver {
    fn on_event(&mut self, _event: &PlaybackEvent) {}
}
