//! Playback state transitions
//!
//! `reduce` is a pure function from (state, playlist, action) to the next
//! state plus the side effects the driver must perform. It never touches the
//! media resource itself, so every transition is testable without a player.
//!
//! ```text
//!          play            pause
//!   Idle ────────► Playing ──────► Paused
//!                   ▲  │  ◄──────
//!             play  │  │ ended      play
//!                   │  ▼
//!                  Ended
//! ```
//!
//! Selecting an item always lands in `Idle` with a fresh generation.

use crate::mime::mime_type_for;
use crate::playlist::Playlist;
use crate::types::{Generation, PlaybackState, PlayerStatus};
use crate::volume::Volume;
use lectern_core::MaterialId;
use serde::{Deserialize, Serialize};

/// Event reported by the media resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResourceEvent {
    /// Playback position, in seconds
    TimeUpdate(f64),

    /// Duration became known, in seconds
    MetadataLoaded(f64),

    /// Reached the natural end
    Ended,

    /// Load or playback failure
    Error(String),
}

/// Inputs to the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Play,
    Pause,
    TogglePlayback,

    /// Jump to a percentage of the duration (0-100)
    Seek { percent: f64 },

    SetVolume(f64),

    /// Select a playlist index (bounds are checked by the caller)
    Select { index: usize },

    /// The playlist was rebuilt
    ///
    /// `initial_resolved` means `start_index` points at the requested initial
    /// item, which is selected unless it is already current. Otherwise the
    /// current item is kept if it survived, else `start_index` is selected.
    PlaylistReplaced {
        start_index: usize,
        initial_resolved: bool,
    },

    TogglePlaylist,
    SetPlaylistVisible(bool),

    /// Event from the resource, tagged with the generation of its load
    Resource {
        generation: Generation,
        event: ResourceEvent,
    },
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Drop listeners and the loaded resource
    Release,

    /// Load a resource and subscribe listeners tagged with `generation`
    Load {
        url: String,
        mime_type: &'static str,
        generation: Generation,
    },

    Play,
    Pause,

    /// Move the resource's playhead, in seconds
    SetCurrentTime(f64),

    SetVolume(f64),

    /// Natural end of an item; the completion callback fires
    ReportCompletion(MaterialId),
}

/// How an action was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// State and/or effects changed
    Applied,

    /// Not valid in the current state; nothing changed
    Ignored,

    /// Resource event from a superseded generation; discarded
    Stale,
}

/// Result of one reducer step
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: PlaybackState,
    pub effects: Vec<Effect>,
    pub disposition: Disposition,
}

impl Transition {
    fn applied(state: PlaybackState, effects: Vec<Effect>) -> Self {
        Self {
            state,
            effects,
            disposition: Disposition::Applied,
        }
    }

    fn unchanged(state: &PlaybackState, disposition: Disposition) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
            disposition,
        }
    }
}

/// Compute the next state for `action`
pub fn reduce(state: &PlaybackState, playlist: &Playlist, action: Action) -> Transition {
    match action {
        Action::Play => play(state),
        Action::Pause => pause(state),
        Action::TogglePlayback => {
            if state.is_playing {
                pause(state)
            } else {
                play(state)
            }
        }
        Action::Seek { percent } => seek(state, percent),
        Action::SetVolume(level) => match Volume::try_new(level) {
            Some(volume) => {
                let mut next = state.clone();
                next.volume = volume;
                Transition::applied(next, vec![Effect::SetVolume(volume.level())])
            }
            None => Transition::unchanged(state, Disposition::Ignored),
        },
        Action::Select { index } => select(state, playlist, index),
        Action::PlaylistReplaced {
            start_index,
            initial_resolved,
        } => playlist_replaced(state, playlist, start_index, initial_resolved),
        Action::TogglePlaylist => {
            let mut next = state.clone();
            next.playlist_visible = !state.playlist_visible;
            Transition::applied(next, Vec::new())
        }
        Action::SetPlaylistVisible(visible) => {
            if state.playlist_visible == visible {
                return Transition::unchanged(state, Disposition::Ignored);
            }
            let mut next = state.clone();
            next.playlist_visible = visible;
            Transition::applied(next, Vec::new())
        }
        Action::Resource { generation, event } => resource_event(state, generation, event),
    }
}

fn play(state: &PlaybackState) -> Transition {
    // A failed load is only retried by selecting the item again
    if !state.has_selection() || state.load_error.is_some() {
        return Transition::unchanged(state, Disposition::Ignored);
    }

    match state.status {
        PlayerStatus::Playing => Transition::unchanged(state, Disposition::Ignored),
        PlayerStatus::Idle | PlayerStatus::Paused => {
            Transition::applied(with_status(state, PlayerStatus::Playing), vec![Effect::Play])
        }
        PlayerStatus::Ended => Transition::applied(
            with_status(state, PlayerStatus::Playing),
            vec![Effect::SetCurrentTime(0.0), Effect::Play],
        ),
    }
}

fn pause(state: &PlaybackState) -> Transition {
    if state.status == PlayerStatus::Playing {
        Transition::applied(with_status(state, PlayerStatus::Paused), vec![Effect::Pause])
    } else {
        Transition::unchanged(state, Disposition::Ignored)
    }
}

fn seek(state: &PlaybackState, percent: f64) -> Transition {
    if !state.has_selection() || !percent.is_finite() {
        return Transition::unchanged(state, Disposition::Ignored);
    }

    let target = percent.clamp(0.0, 100.0) / 100.0 * state.duration;

    // current_time follows the resource's next report, not the request
    let next = if state.status == PlayerStatus::Ended {
        with_status(state, PlayerStatus::Paused)
    } else {
        state.clone()
    };

    Transition::applied(next, vec![Effect::SetCurrentTime(target)])
}

fn select(state: &PlaybackState, playlist: &Playlist, index: usize) -> Transition {
    let Some(item) = playlist.get(index) else {
        return Transition::unchanged(state, Disposition::Ignored);
    };

    let generation = state.generation.next();
    let effects = vec![
        Effect::Release,
        Effect::Load {
            url: item.url.clone(),
            mime_type: mime_type_for(item),
            generation,
        },
        Effect::SetVolume(state.volume.level()),
    ];

    let next = PlaybackState {
        current_item: Some(item.clone()),
        current_index: index,
        status: PlayerStatus::Idle,
        is_playing: false,
        current_time: 0.0,
        duration: 0.0,
        generation,
        load_error: None,
        ..state.clone()
    };

    Transition::applied(next, effects)
}

fn playlist_replaced(
    state: &PlaybackState,
    playlist: &Playlist,
    start_index: usize,
    initial_resolved: bool,
) -> Transition {
    if playlist.is_empty() {
        let next = PlaybackState {
            current_item: None,
            current_index: 0,
            status: PlayerStatus::Idle,
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            generation: state.generation.next(),
            load_error: None,
            ..state.clone()
        };
        return Transition::applied(next, vec![Effect::Release]);
    }

    let surviving = state
        .current_item
        .as_ref()
        .and_then(|item| playlist.position_of(item.id));

    if initial_resolved && surviving != Some(start_index) {
        return select(state, playlist, start_index);
    }

    match surviving {
        Some(index) => {
            // Same item, possibly at a new position; the resource stays loaded
            let mut next = state.clone();
            next.current_index = index;
            next.current_item = playlist.get(index).cloned();
            Transition::applied(next, Vec::new())
        }
        None => {
            let index = if start_index < playlist.len() { start_index } else { 0 };
            select(state, playlist, index)
        }
    }
}

fn resource_event(state: &PlaybackState, generation: Generation, event: ResourceEvent) -> Transition {
    if generation != state.generation || !state.has_selection() {
        return Transition::unchanged(state, Disposition::Stale);
    }

    match event {
        ResourceEvent::TimeUpdate(secs) => {
            if !secs.is_finite() {
                return Transition::unchanged(state, Disposition::Ignored);
            }
            let mut next = state.clone();
            next.current_time = secs.clamp(0.0, state.duration);
            Transition::applied(next, Vec::new())
        }
        ResourceEvent::MetadataLoaded(secs) => {
            let mut next = state.clone();
            next.duration = if secs.is_finite() && secs > 0.0 { secs } else { 0.0 };
            next.current_time = state.current_time.min(next.duration);
            Transition::applied(next, Vec::new())
        }
        ResourceEvent::Ended => {
            let Some(item) = state.current_item.as_ref() else {
                return Transition::unchanged(state, Disposition::Ignored);
            };
            // a failed load never counts as watched
            if state.status == PlayerStatus::Ended || state.load_error.is_some() {
                return Transition::unchanged(state, Disposition::Ignored);
            }
            let mut next = with_status(state, PlayerStatus::Ended);
            next.current_time = state.duration;
            Transition::applied(next, vec![Effect::ReportCompletion(item.id)])
        }
        ResourceEvent::Error(message) => {
            let mut next = with_status(state, PlayerStatus::Idle);
            next.load_error = Some(message);
            Transition::applied(next, Vec::new())
        }
    }
}

fn with_status(state: &PlaybackState, status: PlayerStatus) -> PlaybackState {
    PlaybackState {
        status,
        is_playing: status == PlayerStatus::Playing,
        ..state.clone()
    }
}
