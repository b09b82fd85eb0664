//! Lectern - Course Video Playback
//!
//! Plays the videos of a course as an ordered playlist, tracks progress, and
//! reports each natural completion.
//!
//! This crate provides:
//! - Playlist derivation (video-only, original order, initial item lookup)
//! - A pure playback reducer (`Idle → Playing ⇄ Paused → Ended`)
//! - Bounds-checked next/previous/select navigation, no wraparound
//! - Completion reporting through an injected callback
//! - Selection generations that discard events from superseded loads
//! - MIME type resolution and a read-only rendering projection
//!
//! # Architecture
//!
//! `lectern-playback` is platform-agnostic: the element that actually plays
//! video is reached through the [`MediaResource`] trait. Data flows one way:
//! materials → [`Playlist`] → [`PlaybackController`] → [`PlayerView`], and
//! resource events flow back into the controller tagged with the
//! [`Generation`] of the load that produced them.
//!
//! # Example
//!
//! ```rust
//! use lectern_core::{MaterialId, MediaItem, MediaKind};
//! use lectern_playback::{
//!     CompletionReporter, PlaybackController, PlayerConfig, PlayerView, RecordingResource,
//! };
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let finished = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&finished);
//!
//! let mut controller = PlaybackController::new(
//!     PlayerConfig::default(),
//!     Box::new(RecordingResource::new()),
//! )
//! .with_completion(CompletionReporter::new(move |id| sink.borrow_mut().push(id)));
//!
//! controller.set_materials(vec![
//!     MediaItem::new(MaterialId::new(1), "Welcome", MediaKind::Video, "/m/welcome.mp4"),
//!     MediaItem::new(MaterialId::new(2), "Syllabus", MediaKind::Pdf, "/m/syllabus.pdf"),
//! ]);
//!
//! // The platform reports back with the generation it was loaded under
//! let generation = controller.generation();
//! controller.on_metadata_loaded(generation, 300.0);
//! controller.play();
//! controller.on_ended(generation);
//!
//! assert_eq!(*finished.borrow(), vec![MaterialId::new(1)]);
//! assert!(matches!(controller.view(), PlayerView::Ready(_)));
//! ```

mod completion;
mod controller;
mod error;
pub mod events;
pub mod mime;
mod navigation;
mod playlist;
pub mod reducer;
mod resource;
pub mod types;
pub mod view;
mod volume;

// Public exports
pub use completion::{CompletionCallback, CompletionReporter};
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::{NoopObserver, PlaybackEvent, PlaybackObserver, TracingObserver};
pub use mime::{resolve_mime_type, VideoContainer, DEFAULT_MIME_TYPE};
pub use navigation::NavigationPolicy;
pub use playlist::{Playlist, PlaylistBuild};
pub use reducer::{reduce, Action, Disposition, Effect, ResourceEvent, Transition};
pub use resource::{CommandLog, MediaResource, RecordingResource, ResourceCommand};
pub use types::{Generation, PlaybackState, PlayerConfig, PlayerStatus};
pub use view::{format_time, NowPlaying, PlayerView, PlaylistEntry};
pub use volume::Volume;
