//! Read-only rendering projection
//!
//! Renderers never look at `PlaybackState` directly; they get a `PlayerView`
//! that already distinguishes the empty, prompt, degraded and ready states.

use crate::mime::mime_type_for;
use crate::navigation::NavigationPolicy;
use crate::playlist::Playlist;
use crate::types::{PlaybackState, PlayerStatus};
use lectern_core::{MaterialId, MediaItem};
use serde::Serialize;

/// What the player area should show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlayerView {
    /// No video materials in the course
    EmptyPlaylist,

    /// Videos exist but none is selected yet
    NoSelection { playlist_len: usize },

    /// The selected item failed to load or play; the playlist stays usable
    LoadError { item: MediaItem, message: String },

    Ready(NowPlaying),
}

/// Snapshot of the selected item for the player area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    pub material_id: MaterialId,
    pub title: String,
    pub description: String,
    pub url: String,
    pub mime_type: &'static str,
    pub thumbnail_url: Option<String>,
    pub status: PlayerStatus,
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub progress_percent: f64,
    pub elapsed_label: String,
    pub duration_label: String,
    /// Volume as a whole percentage
    pub volume_percent: u8,
    pub muted: bool,
    /// 1-based position and playlist length, e.g. "2 of 5"
    pub position: usize,
    pub playlist_len: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// One row of the playlist panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistEntry {
    pub index: usize,
    pub material_id: MaterialId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub duration_label: Option<String>,
    pub uploader_name: Option<String>,
    pub is_current: bool,
}

impl PlayerView {
    pub fn is_ready(&self) -> bool {
        matches!(self, PlayerView::Ready(_))
    }

    /// Placeholder heading for the non-ready states
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            PlayerView::EmptyPlaylist => Some("No videos available"),
            PlayerView::NoSelection { .. } => Some("Select a video to start watching"),
            PlayerView::LoadError { .. } => Some("This video could not be played"),
            PlayerView::Ready(_) => None,
        }
    }
}

/// Project the state for the player area
pub fn project(state: &PlaybackState, playlist: &Playlist) -> PlayerView {
    if playlist.is_empty() {
        return PlayerView::EmptyPlaylist;
    }

    let Some(item) = state.current_item.as_ref() else {
        return PlayerView::NoSelection {
            playlist_len: playlist.len(),
        };
    };

    if let Some(message) = state.load_error.as_ref() {
        return PlayerView::LoadError {
            item: item.clone(),
            message: message.clone(),
        };
    }

    let navigation = NavigationPolicy::new(playlist, state);

    PlayerView::Ready(NowPlaying {
        material_id: item.id,
        title: item.title.clone(),
        description: item.description.clone(),
        url: item.url.clone(),
        mime_type: mime_type_for(item),
        thumbnail_url: item.thumbnail_url.clone(),
        status: state.status,
        is_playing: state.is_playing,
        current_time: state.current_time,
        duration: state.duration,
        progress_percent: state.progress_percent(),
        elapsed_label: format_time(state.current_time),
        duration_label: format_time(state.duration),
        volume_percent: state.volume.percent(),
        muted: state.volume.is_muted(),
        position: state.current_index + 1,
        playlist_len: playlist.len(),
        has_next: navigation.has_next(),
        has_previous: navigation.has_previous(),
    })
}

/// Project the playlist panel rows
pub fn playlist_entries(state: &PlaybackState, playlist: &Playlist) -> Vec<PlaylistEntry> {
    let current = state.current_item.as_ref().map(|_| state.current_index);

    playlist
        .iter()
        .enumerate()
        .map(|(index, item)| PlaylistEntry {
            index,
            material_id: item.id,
            title: item.title.clone(),
            thumbnail_url: item.thumbnail_url.clone(),
            duration_label: item.duration.map(format_time),
            uploader_name: item.uploader_name.clone(),
            is_current: current == Some(index),
        })
        .collect()
}

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour on
///
/// Negative and non-finite inputs render as `0:00`.
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
