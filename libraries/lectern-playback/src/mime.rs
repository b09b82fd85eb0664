//! Container format and MIME type resolution
//!
//! The platform player is handed the resource URL together with a content
//! type guessed from the file extension.

use lectern_core::MediaItem;

/// Content type used when the extension is missing or unrecognized
pub const DEFAULT_MIME_TYPE: &str = "video/mp4";

/// Video containers the player knows how to label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoContainer {
    Mp4,
    Webm,
    Ogg,
    Avi,
    Mov,
    Mkv,
    Flv,
    Wmv,
}

impl VideoContainer {
    /// Look up a container by file extension (case-insensitive, no dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "mp4" => Some(VideoContainer::Mp4),
            "webm" => Some(VideoContainer::Webm),
            "ogg" => Some(VideoContainer::Ogg),
            "avi" => Some(VideoContainer::Avi),
            "mov" => Some(VideoContainer::Mov),
            "mkv" => Some(VideoContainer::Mkv),
            "flv" => Some(VideoContainer::Flv),
            "wmv" => Some(VideoContainer::Wmv),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            VideoContainer::Mp4 => "video/mp4",
            VideoContainer::Webm => "video/webm",
            VideoContainer::Ogg => "video/ogg",
            VideoContainer::Avi => "video/avi",
            VideoContainer::Mov => "video/quicktime",
            VideoContainer::Mkv => "video/x-matroska",
            VideoContainer::Flv => "video/x-flv",
            VideoContainer::Wmv => "video/x-ms-wmv",
        }
    }
}

/// Extract the extension from a file name or URL
///
/// Query strings and fragments are ignored, and only the last path segment
/// is considered, so `/v1.2/intro` has no extension.
pub fn extension_of(name: &str) -> Option<&str> {
    let path = name.split(['?', '#']).next().unwrap_or(name);
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);

    match file.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Resolve the content type for a file name or URL
pub fn resolve_mime_type(name: &str) -> &'static str {
    extension_of(name)
        .and_then(VideoContainer::from_extension)
        .map_or(DEFAULT_MIME_TYPE, |container| container.mime_type())
}

/// Resolve the content type to hand the player for a material
pub fn mime_type_for(item: &MediaItem) -> &'static str {
    resolve_mime_type(item.source_name())
}
