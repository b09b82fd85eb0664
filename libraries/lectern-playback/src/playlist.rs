//! Video playlist derived from the course material collection
//!
//! The playlist is a filtered view: only `video` materials, in the order the
//! portal supplied them. It is rebuilt whenever the collection changes and
//! never re-sorted.

use lectern_core::{MaterialId, MediaItem};

/// Ordered sequence of playable materials
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    items: Vec<MediaItem>,
}

/// Result of deriving a playlist
#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistBuild {
    /// No video materials in the collection
    Empty,

    /// At least one video, with the position to start from
    Ready {
        playlist: Playlist,
        start_index: usize,
    },
}

impl PlaylistBuild {
    /// Split into the playlist and start index, `Empty` becoming an empty playlist at 0
    pub fn into_parts(self) -> (Playlist, usize) {
        match self {
            PlaylistBuild::Empty => (Playlist::default(), 0),
            PlaylistBuild::Ready {
                playlist,
                start_index,
            } => (playlist, start_index),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PlaylistBuild::Empty)
    }
}

impl Playlist {
    /// Derive the playlist and its start position
    ///
    /// `initial` selects the start position when it names a video in the
    /// collection; otherwise playback starts at the first video.
    pub fn build(materials: &[MediaItem], initial: Option<MaterialId>) -> PlaylistBuild {
        let playlist = Self::from_materials(materials);

        if playlist.is_empty() {
            return PlaylistBuild::Empty;
        }

        let start_index = initial
            .and_then(|id| playlist.position_of(id))
            .unwrap_or(0);

        PlaylistBuild::Ready {
            playlist,
            start_index,
        }
    }

    /// Keep only video materials, preserving their relative order
    pub fn from_materials(materials: &[MediaItem]) -> Self {
        Self {
            items: materials.iter().filter(|m| m.is_video()).cloned().collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    /// Position of a material, if it is in the playlist
    pub fn position_of(&self, id: MaterialId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn contains(&self, id: MaterialId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the last item, `None` when empty
    pub fn last_index(&self) -> Option<usize> {
        self.items.len().checked_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }
}
