/// Course material domain types
use crate::error::Result;
use crate::types::MaterialId;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of course material
///
/// Serialized as the lowercase tag the portal uses. Tags outside the known set
/// are preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaKind {
    Video,
    Document,
    Pdf,
    Image,
    Audio,
    Link,
    Other(String),
}

impl MediaKind {
    /// Tag as sent by the portal
    pub fn as_str(&self) -> &str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Document => "document",
            MediaKind::Pdf => "pdf",
            MediaKind::Image => "image",
            MediaKind::Audio => "audio",
            MediaKind::Link => "link",
            MediaKind::Other(tag) => tag,
        }
    }
}

impl From<String> for MediaKind {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "video" => MediaKind::Video,
            "document" => MediaKind::Document,
            "pdf" => MediaKind::Pdf,
            "image" => MediaKind::Image,
            "audio" => MediaKind::Audio,
            "link" => MediaKind::Link,
            _ => MediaKind::Other(tag),
        }
    }
}

impl From<&str> for MediaKind {
    fn from(tag: &str) -> Self {
        MediaKind::from(tag.to_string())
    }
}

impl From<MediaKind> for String {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// One course material record
///
/// Immutable once received from the portal. The playback engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Identifier, unique within the course
    pub id: MaterialId,

    /// Display title
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Where the resource is served from
    #[serde(alias = "file_url", alias = "file_path")]
    pub url: String,

    /// Optional poster image
    #[serde(default, alias = "thumbnail")]
    pub thumbnail_url: Option<String>,

    /// Duration in seconds, if the portal knows it
    #[serde(default, alias = "duration_secs")]
    pub duration: Option<f64>,

    /// Material type tag
    #[serde(rename = "type", alias = "material_type")]
    pub kind: MediaKind,

    /// Upload timestamp
    #[serde(
        rename = "upload_date",
        alias = "uploaded_at",
        deserialize_with = "deserialize_timestamp"
    )]
    pub uploaded_at: DateTime<Utc>,

    /// Original file name
    #[serde(default)]
    pub file_name: String,

    /// File type as reported at upload time
    #[serde(default)]
    pub file_type: String,

    /// Name of the uploader
    #[serde(default, alias = "uploaded_by")]
    pub uploader_name: Option<String>,
}

impl MediaItem {
    /// Create a material with only the required fields set
    pub fn new(
        id: MaterialId,
        title: impl Into<String>,
        kind: MediaKind,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            url: url.into(),
            thumbnail_url: None,
            duration: None,
            kind,
            uploaded_at: Utc::now(),
            file_name: String::new(),
            file_type: String::new(),
            uploader_name: None,
        }
    }

    /// Set the original file name
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Set the known duration in seconds
    #[must_use]
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }

    /// Check if this material is playable in the video player
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    /// Name used to guess the container format
    ///
    /// The original file name when present, the resource URL otherwise.
    pub fn source_name(&self) -> &str {
        if self.file_name.trim().is_empty() {
            &self.url
        } else {
            &self.file_name
        }
    }
}

/// Decode a material collection as returned by the portal
pub fn parse_materials(json: &str) -> Result<Vec<MediaItem>> {
    Ok(serde_json::from_str(json)?)
}

/// Accept RFC 3339 timestamps and the naive ISO form the portal emits for UTC
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
}
