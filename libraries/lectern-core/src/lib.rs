//! Lectern Core
//!
//! Course material domain types shared by the playback engine and its hosts.
//!
//! The portal hands the engine an unordered collection of material records
//! (videos, documents, PDFs, ...). This crate defines those records and the
//! error type used when decoding them.
//!
//! # Example
//!
//! ```rust
//! use lectern_core::types::{MaterialId, MediaItem, MediaKind};
//!
//! let lecture = MediaItem::new(MaterialId::new(1), "Intro", MediaKind::Video, "/media/intro.mp4")
//!     .with_file_name("intro.mp4");
//!
//! assert!(lecture.is_video());
//! assert_eq!(lecture.source_name(), "intro.mp4");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{parse_materials, MaterialId, MediaItem, MediaKind};
