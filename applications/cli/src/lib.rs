//! Lectern command-line tools
//!
//! Loads a course material collection exported by the portal, prints the
//! derived video playlist, and replays scripted playback sessions against a
//! recording resource.

pub mod config;
pub mod error;
pub mod render;
pub mod script;
pub mod session;

pub use config::CliConfig;
pub use error::{CliError, Result};
pub use script::{parse_script, ScriptCommand, ScriptLine};
pub use session::{run_session, Rejection, SessionReport};

use lectern_core::{parse_materials, MediaItem};
use std::path::Path;

/// Read a material collection from a JSON file
pub fn load_materials(path: &Path) -> Result<Vec<MediaItem>> {
    let json = std::fs::read_to_string(path)?;
    Ok(parse_materials(&json)?)
}

/// Read and parse a session script
pub fn load_script(path: &Path) -> Result<Vec<ScriptLine>> {
    let source = std::fs::read_to_string(path)?;
    parse_script(&source)
}
