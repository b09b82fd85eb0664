//! Playback controller - core orchestration
//!
//! Owns the playlist, the current `PlaybackState`, and the bound media
//! resource. Every input goes through [`reduce`]; the controller then applies
//! the resulting effects to the resource and the completion reporter, and
//! emits events for whatever changed. It is the single writer of the state.

use crate::{
    completion::CompletionReporter,
    error::Result,
    events::{PlaybackEvent, PlaybackObserver, TracingObserver},
    navigation::NavigationPolicy,
    playlist::Playlist,
    reducer::{reduce, Action, Disposition, Effect, ResourceEvent},
    resource::MediaResource,
    types::{Generation, PlaybackState, PlayerConfig},
    view::{playlist_entries, project, PlayerView, PlaylistEntry},
};
use lectern_core::{MaterialId, MediaItem};

/// Playback controller bound to one media resource
pub struct PlaybackController {
    config: PlayerConfig,
    materials: Vec<MediaItem>,
    initial_item: Option<MaterialId>,
    playlist: Playlist,
    state: PlaybackState,
    resource: Box<dyn MediaResource>,
    reporter: CompletionReporter,
    observer: Box<dyn PlaybackObserver>,
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller with an empty playlist
    pub fn new(config: PlayerConfig, resource: Box<dyn MediaResource>) -> Self {
        let state = PlaybackState::new(&config);

        Self {
            config,
            materials: Vec::new(),
            initial_item: None,
            playlist: Playlist::default(),
            state,
            resource,
            reporter: CompletionReporter::silent(),
            observer: Box::new(TracingObserver),
            pending_events: Vec::new(),
        }
    }

    /// Install the completion callback
    #[must_use]
    pub fn with_completion(mut self, reporter: CompletionReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the default tracing observer
    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn PlaybackObserver>) -> Self {
        self.observer = observer;
        self
    }

    // ===== Inputs from the surrounding page =====

    /// Replace the material collection
    ///
    /// A requested initial item present in the new collection is selected
    /// unless it is already current. Otherwise the current item stays selected
    /// if it is still a video in the new collection, and failing that the
    /// first video is selected. An empty playlist releases the resource.
    pub fn set_materials(&mut self, materials: Vec<MediaItem>) {
        self.materials = materials;
        self.rebuild();
    }

    /// Request a starting item
    ///
    /// Selects it immediately when it is in the playlist and not already
    /// selected. Unknown identifiers are remembered for later collections.
    pub fn set_initial_item(&mut self, id: Option<MaterialId>) {
        self.initial_item = id;

        let Some(index) = id.and_then(|id| self.playlist.position_of(id)) else {
            return;
        };
        let already_selected = self.state.current_item.as_ref().map(|item| item.id) == id;
        if !already_selected {
            self.dispatch(Action::Select { index });
        }
    }

    fn rebuild(&mut self) {
        let (playlist, start_index) = Playlist::build(&self.materials, self.initial_item).into_parts();
        let initial_resolved = self.initial_item.is_some_and(|id| playlist.contains(id));
        self.playlist = playlist;
        self.emit(PlaybackEvent::PlaylistChanged {
            length: self.playlist.len(),
        });
        self.dispatch(Action::PlaylistReplaced {
            start_index,
            initial_resolved,
        });
    }

    // ===== Playback Control =====

    /// Start or resume playback
    pub fn play(&mut self) {
        self.dispatch(Action::Play);
    }

    pub fn pause(&mut self) {
        self.dispatch(Action::Pause);
    }

    pub fn toggle_playback(&mut self) {
        self.dispatch(Action::TogglePlayback);
    }

    /// Seek to a percentage (0-100) of the duration
    pub fn seek(&mut self, percent: f64) {
        self.dispatch(Action::Seek { percent });
    }

    /// Set volume (clamped to 0.0-1.0)
    pub fn set_volume(&mut self, level: f64) {
        self.dispatch(Action::SetVolume(level));
    }

    pub fn toggle_playlist(&mut self) {
        self.dispatch(Action::TogglePlaylist);
    }

    pub fn set_playlist_visible(&mut self, visible: bool) {
        self.dispatch(Action::SetPlaylistVisible(visible));
    }

    // ===== Navigation =====

    /// Select the next item; returns false at the end of the playlist
    pub fn next(&mut self) -> bool {
        match self.navigation().next_target() {
            Some(index) => self.dispatch(Action::Select { index }) == Disposition::Applied,
            None => false,
        }
    }

    /// Select the previous item; returns false at the start of the playlist
    pub fn previous(&mut self) -> bool {
        match self.navigation().previous_target() {
            Some(index) => self.dispatch(Action::Select { index }) == Disposition::Applied,
            None => false,
        }
    }

    /// Jump to a playlist index
    pub fn select(&mut self, index: usize) -> Result<()> {
        let index = self.navigation().select_target(index)?;
        self.dispatch(Action::Select { index });
        Ok(())
    }

    /// Jump to a material by identifier
    pub fn select_id(&mut self, id: MaterialId) -> Result<()> {
        let index = self.navigation().select_id_target(id)?;
        self.dispatch(Action::Select { index });
        Ok(())
    }

    pub fn has_next(&self) -> bool {
        self.navigation().has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.navigation().has_previous()
    }

    fn navigation(&self) -> NavigationPolicy<'_> {
        NavigationPolicy::new(&self.playlist, &self.state)
    }

    // ===== Resource events =====

    pub fn on_time_update(&mut self, generation: Generation, secs: f64) {
        self.on_resource_event(generation, ResourceEvent::TimeUpdate(secs));
    }

    pub fn on_metadata_loaded(&mut self, generation: Generation, duration: f64) {
        self.on_resource_event(generation, ResourceEvent::MetadataLoaded(duration));
    }

    pub fn on_ended(&mut self, generation: Generation) {
        self.on_resource_event(generation, ResourceEvent::Ended);
    }

    /// Surface a load/playback failure; never propagates
    pub fn on_error(&mut self, generation: Generation, message: impl Into<String>) {
        self.on_resource_event(generation, ResourceEvent::Error(message.into()));
    }

    pub fn on_resource_event(&mut self, generation: Generation, event: ResourceEvent) {
        self.dispatch(Action::Resource { generation, event });
    }

    // ===== Reducer driver =====

    /// Run one action through the reducer and apply its effects
    pub fn dispatch(&mut self, action: Action) -> Disposition {
        let stale_generation = match &action {
            Action::Resource { generation, .. } => Some(*generation),
            _ => None,
        };
        let failure = match &action {
            Action::Resource {
                event: ResourceEvent::Error(message),
                ..
            } => Some(message.clone()),
            _ => None,
        };

        let transition = reduce(&self.state, &self.playlist, action);

        match transition.disposition {
            Disposition::Ignored => return Disposition::Ignored,
            Disposition::Stale => {
                if let Some(event_generation) = stale_generation {
                    self.emit(PlaybackEvent::StaleEventDiscarded {
                        event_generation,
                        active_generation: self.state.generation,
                    });
                }
                return Disposition::Stale;
            }
            Disposition::Applied => {}
        }

        let previous = std::mem::replace(&mut self.state, transition.state);
        self.emit_changes(&previous);

        if let Some(message) = failure {
            self.emit(PlaybackEvent::Error {
                material_id: self.state.current_item.as_ref().map(|item| item.id),
                message,
            });
        }

        let mut finished = false;
        for effect in transition.effects {
            finished |= matches!(effect, Effect::ReportCompletion(_));
            self.apply(effect);
        }

        if finished && self.config.auto_advance {
            self.next();
        }

        Disposition::Applied
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Release => self.resource.release(),
            Effect::Load {
                url,
                mime_type,
                generation,
            } => self.resource.load(&url, mime_type, generation),
            Effect::Play => self.resource.play(),
            Effect::Pause => self.resource.pause(),
            Effect::SetCurrentTime(secs) => self.resource.set_current_time(secs),
            Effect::SetVolume(level) => self.resource.set_volume(level),
            Effect::ReportCompletion(material_id) => {
                self.emit(PlaybackEvent::TrackFinished { material_id });
                self.reporter.report(material_id);
            }
        }
    }

    /// Emit events for every field that differs from `previous`
    fn emit_changes(&mut self, previous: &PlaybackState) {
        let current = &self.state;
        let mut events = Vec::new();

        if current.generation != previous.generation {
            if let Some(item) = current.current_item.as_ref() {
                events.push(PlaybackEvent::TrackChanged {
                    material_id: item.id,
                    index: current.current_index,
                    generation: current.generation,
                    previous_material_id: previous.current_item.as_ref().map(|item| item.id),
                });
            }
        }
        if current.status != previous.status {
            events.push(PlaybackEvent::StateChanged {
                from: previous.status,
                to: current.status,
            });
        }
        if current.duration != previous.duration && current.duration > 0.0 {
            events.push(PlaybackEvent::DurationChanged {
                duration: current.duration,
            });
        }
        if current.current_time != previous.current_time {
            events.push(PlaybackEvent::PositionUpdate {
                current_time: current.current_time,
                duration: current.duration,
            });
        }
        if current.volume != previous.volume {
            events.push(PlaybackEvent::VolumeChanged {
                level: current.volume.level(),
            });
        }
        if current.playlist_visible != previous.playlist_visible {
            events.push(PlaybackEvent::PlaylistVisibilityChanged {
                visible: current.playlist_visible,
            });
        }

        for event in events {
            self.emit(event);
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.observer.on_event(&event);
        self.pending_events.push(event);
    }

    // ===== Readers =====

    /// Current state snapshot
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Generation that resource events must carry to be accepted
    pub fn generation(&self) -> Generation {
        self.state.generation
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.state.current_item.as_ref()
    }

    /// Rendering projection of the player area
    pub fn view(&self) -> PlayerView {
        project(&self.state, &self.playlist)
    }

    /// Rows for the playlist panel
    pub fn playlist_entries(&self) -> Vec<PlaylistEntry> {
        playlist_entries(&self.state, &self.playlist)
    }

    pub fn completions_reported(&self) -> u64 {
        self.reporter.reported()
    }

    /// Drain all pending events (call after each input)
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.resource.release();
    }
}
