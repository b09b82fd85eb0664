/// CLI configuration
use crate::error::{CliError, Result};
use lectern_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when none is given
const DEFAULT_CONFIG_FILE: &str = "lectern.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    /// `tracing` filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `lectern.toml` in the
    /// working directory is used if present. `LECTERN_`-prefixed variables
    /// override both, with `__` between nested keys
    /// (`LECTERN_PLAYER__AUTO_ADVANCE=true`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("LECTERN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let volume = self.player.initial_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(CliError::Config(format!(
                "player.initial_volume must be within 0.0-1.0, got {volume}"
            )));
        }
        Ok(())
    }
}

fn default_log_filter() -> String {
    "lectern_cli=info,lectern_playback=info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_player_section_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "log_filter = \"debug\"\n\n[player]\nauto_advance = true\ninitial_volume = 0.5"
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.log_filter, "debug");
        assert!(config.player.auto_advance);
        assert_eq!(config.player.initial_volume, 0.5);
        assert!(config.player.playlist_visible);
        config.validate().unwrap();
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let mut config = CliConfig::default();
        config.player.initial_volume = 1.5;
        assert!(config.validate().is_err());
    }
}
