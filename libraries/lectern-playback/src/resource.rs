//! Platform-agnostic media resource trait
//!
//! Abstracts the element that actually decodes and renders a video (an HTML
//! media element, a native player, a test double). The controller drives it
//! with commands; the platform feeds its events back through the controller's
//! `on_*` methods, tagged with the generation passed to [`MediaResource::load`].

use crate::types::Generation;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Playable resource bound to the controller
///
/// Commands are fire-and-forget. Failures are reported asynchronously as
/// error events, never as return values.
pub trait MediaResource {
    /// Start loading `url` and subscribe listeners for `generation`
    fn load(&mut self, url: &str, mime_type: &str, generation: Generation);

    /// Start or resume playback
    fn play(&mut self);

    fn pause(&mut self);

    /// Move the playhead, in seconds
    fn set_current_time(&mut self, secs: f64);

    /// Apply a linear level in `[0.0, 1.0]`
    fn set_volume(&mut self, level: f64);

    /// Unsubscribe listeners and drop the loaded resource
    ///
    /// Called before every new load and when the controller is dropped.
    fn release(&mut self);
}

/// Command received by a [`RecordingResource`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCommand {
    Load {
        url: String,
        mime_type: String,
        generation: Generation,
    },
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f64),
    Release,
}

/// Shared handle to the commands a [`RecordingResource`] received
pub type CommandLog = Rc<RefCell<Vec<ResourceCommand>>>;

/// Resource that only records the commands it receives
///
/// Used by the CLI simulator and by tests. Keep a clone of [`Self::log`]
/// before handing the resource to a controller.
#[derive(Debug, Default)]
pub struct RecordingResource {
    log: CommandLog,
    listening: Option<Generation>,
}

impl RecordingResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the command log
    pub fn log(&self) -> CommandLog {
        Rc::clone(&self.log)
    }

    /// Generation whose listeners are currently subscribed
    pub fn listening(&self) -> Option<Generation> {
        self.listening
    }

    fn record(&self, command: ResourceCommand) {
        self.log.borrow_mut().push(command);
    }
}

impl MediaResource for RecordingResource {
    fn load(&mut self, url: &str, mime_type: &str, generation: Generation) {
        self.listening = Some(generation);
        self.record(ResourceCommand::Load {
            url: url.to_string(),
            mime_type: mime_type.to_string(),
            generation,
        });
    }

    fn play(&mut self) {
        self.record(ResourceCommand::Play);
    }

    fn pause(&mut self) {
        self.record(ResourceCommand::Pause);
    }

    fn set_current_time(&mut self, secs: f64) {
        self.record(ResourceCommand::SetCurrentTime(secs));
    }

    fn set_volume(&mut self, level: f64) {
        self.record(ResourceCommand::SetVolume(level));
    }

    fn release(&mut self) {
        self.listening = None;
        self.record(ResourceCommand::Release);
    }
}
