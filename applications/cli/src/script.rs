//! Session script parsing
//!
//! One command per line. Blank lines and lines starting with `#` are skipped.
//! Resource events (`meta`, `time`, `ended`, `error`) accept a trailing
//! `@<generation>` tag; untagged events are delivered with the controller's
//! active generation at the time they run.

use crate::error::{CliError, Result};
use lectern_core::MaterialId;
use lectern_playback::Generation;

/// One parsed script command
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Play,
    Pause,
    Toggle,
    Seek(f64),
    Volume(f64),
    Next,
    Previous,
    Select(usize),
    SelectId(MaterialId),
    TogglePlaylist,
    Metadata {
        duration: f64,
        generation: Option<Generation>,
    },
    Time {
        secs: f64,
        generation: Option<Generation>,
    },
    Ended {
        generation: Option<Generation>,
    },
    Error {
        message: String,
        generation: Option<Generation>,
    },
}

/// A command with the line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

impl ScriptCommand {
    /// Whether this command simulates a resource event
    pub fn is_resource_event(&self) -> bool {
        matches!(
            self,
            Self::Metadata { .. } | Self::Time { .. } | Self::Ended { .. } | Self::Error { .. }
        )
    }
}

/// Parse a whole script
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            Some(parse_line(i + 1, trimmed).map(|command| ScriptLine {
                line: i + 1,
                command,
            }))
        })
        .collect()
}

fn parse_line(line: usize, text: &str) -> Result<ScriptCommand> {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();

    let tag = tokens.last().copied().and_then(|last| last.strip_prefix('@'));
    let generation = match tag {
        Some(tag) if tokens.len() > 1 => {
            let value = tag
                .parse::<u64>()
                .map_err(|_| CliError::script(line, format!("invalid generation tag '@{tag}'")))?;
            tokens.pop();
            Some(Generation::new(value))
        }
        _ => None,
    };

    let (verb, args) = match tokens.split_first() {
        Some((verb, args)) => (verb.to_ascii_lowercase(), args),
        None => return Err(CliError::script(line, "empty command")),
    };

    let command = match verb.as_str() {
        "play" => ScriptCommand::Play,
        "pause" => ScriptCommand::Pause,
        "toggle" => ScriptCommand::Toggle,
        "next" => ScriptCommand::Next,
        "previous" | "prev" => ScriptCommand::Previous,
        "playlist" => ScriptCommand::TogglePlaylist,
        "seek" => ScriptCommand::Seek(number(line, &verb, args)?),
        "volume" => ScriptCommand::Volume(number(line, &verb, args)?),
        "select" => ScriptCommand::Select(single(line, &verb, args)?),
        "select-id" => ScriptCommand::SelectId(single(line, &verb, args)?),
        "meta" => ScriptCommand::Metadata {
            duration: number(line, &verb, args)?,
            generation,
        },
        "time" => ScriptCommand::Time {
            secs: number(line, &verb, args)?,
            generation,
        },
        "ended" => ScriptCommand::Ended { generation },
        "error" => ScriptCommand::Error {
            message: if args.is_empty() {
                "playback failed".to_string()
            } else {
                args.join(" ")
            },
            generation,
        },
        other => return Err(CliError::script(line, format!("unknown command '{other}'"))),
    };

    if generation.is_some() && !command.is_resource_event() {
        return Err(CliError::script(
            line,
            format!("'{verb}' does not take a generation tag"),
        ));
    }
    let takes_args = matches!(
        command,
        ScriptCommand::Seek(_)
            | ScriptCommand::Volume(_)
            | ScriptCommand::Select(_)
            | ScriptCommand::SelectId(_)
            | ScriptCommand::Metadata { .. }
            | ScriptCommand::Time { .. }
            | ScriptCommand::Error { .. }
    );
    if !takes_args && !args.is_empty() {
        return Err(CliError::script(line, format!("'{verb}' takes no arguments")));
    }

    Ok(command)
}

fn single<T: std::str::FromStr>(line: usize, verb: &str, args: &[&str]) -> Result<T> {
    match args {
        [value] => value
            .parse()
            .map_err(|_| CliError::script(line, format!("invalid argument '{value}' for '{verb}'"))),
        _ => Err(CliError::script(
            line,
            format!("'{verb}' expects exactly one argument"),
        )),
    }
}

fn number(line: usize, verb: &str, args: &[&str]) -> Result<f64> {
    single(line, verb, args)
}
