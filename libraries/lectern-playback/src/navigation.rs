//! Bounds-checked playlist navigation
//!
//! Decides which index a next/previous/select request lands on. No
//! wraparound in either direction; the selection itself is applied by the
//! reducer.

use crate::error::{PlaybackError, Result};
use crate::playlist::Playlist;
use crate::types::PlaybackState;
use lectern_core::MaterialId;

/// Navigation over a playlist from the current selection
#[derive(Debug, Clone, Copy)]
pub struct NavigationPolicy<'a> {
    playlist: &'a Playlist,
    current: Option<usize>,
}

impl<'a> NavigationPolicy<'a> {
    pub fn new(playlist: &'a Playlist, state: &PlaybackState) -> Self {
        let current = state
            .has_selection()
            .then_some(state.current_index)
            .filter(|&index| index < playlist.len());

        Self { playlist, current }
    }

    /// Index `next()` would select, `None` at the last item or without a selection
    pub fn next_target(&self) -> Option<usize> {
        let current = self.current?;
        let next = current + 1;
        (next < self.playlist.len()).then_some(next)
    }

    /// Index `previous()` would select, `None` at the first item or without a selection
    pub fn previous_target(&self) -> Option<usize> {
        self.current?.checked_sub(1)
    }

    /// Validate a direct jump
    pub fn select_target(&self, index: usize) -> Result<usize> {
        if self.playlist.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }
        if index >= self.playlist.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.playlist.len(),
            });
        }
        Ok(index)
    }

    /// Validate a jump by material identifier
    pub fn select_id_target(&self, id: MaterialId) -> Result<usize> {
        if self.playlist.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }
        self.playlist
            .position_of(id)
            .ok_or(PlaybackError::NotInPlaylist(id))
    }

    pub fn has_next(&self) -> bool {
        self.next_target().is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous_target().is_some()
    }
}
