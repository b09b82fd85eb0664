//! Scripted playback sessions
//!
//! Replays a parsed script against a controller bound to a
//! [`RecordingResource`], then collects everything an observer of the real
//! player would have seen.

use crate::script::{ScriptCommand, ScriptLine};
use lectern_core::{MaterialId, MediaItem};
use lectern_playback::{
    CompletionReporter, PlaybackController, PlaybackEvent, PlayerConfig, PlayerView,
    PlaylistEntry, RecordingResource, ResourceCommand,
};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

/// Everything observed while replaying a script
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Commands the resource received, in order
    pub commands: Vec<ResourceCommand>,
    /// Material ids passed to the completion callback
    pub completions: Vec<MaterialId>,
    pub events: Vec<PlaybackEvent>,
    /// Lines whose navigation request was rejected
    pub rejected: Vec<Rejection>,
    pub view: PlayerView,
    pub playlist: Vec<PlaylistEntry>,
    pub playlist_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub line: usize,
    pub reason: String,
}

/// Replay `script` from a fresh controller
pub fn run_session(
    materials: Vec<MediaItem>,
    initial: Option<MaterialId>,
    config: PlayerConfig,
    script: &[ScriptLine],
) -> SessionReport {
    let resource = RecordingResource::new();
    let log = resource.log();
    let completions = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&completions);

    let mut controller = PlaybackController::new(config, Box::new(resource))
        .with_completion(CompletionReporter::new(move |id| sink.borrow_mut().push(id)));

    controller.set_initial_item(initial);
    controller.set_materials(materials);

    let mut events = controller.drain_events();
    let mut rejected = Vec::new();

    for step in script {
        debug!(line = step.line, command = ?step.command, "Replaying");
        if let Err(reason) = apply(&mut controller, &step.command) {
            warn!(line = step.line, %reason, "Command rejected");
            rejected.push(Rejection {
                line: step.line,
                reason,
            });
        }
        events.extend(controller.drain_events());
    }

    let view = controller.view();
    let playlist = controller.playlist_entries();
    let playlist_visible = controller.state().playlist_visible;

    // teardown releases the resource; keep that in the log
    drop(controller);

    SessionReport {
        commands: log.take(),
        completions: completions.take(),
        events,
        rejected,
        view,
        playlist,
        playlist_visible,
    }
}

fn apply(controller: &mut PlaybackController, command: &ScriptCommand) -> Result<(), String> {
    let active = controller.generation();

    match command {
        ScriptCommand::Play => controller.play(),
        ScriptCommand::Pause => controller.pause(),
        ScriptCommand::Toggle => controller.toggle_playback(),
        ScriptCommand::Seek(percent) => controller.seek(*percent),
        ScriptCommand::Volume(level) => controller.set_volume(*level),
        ScriptCommand::TogglePlaylist => controller.toggle_playlist(),
        ScriptCommand::Next => {
            if !controller.next() {
                return Err("already at the last video".to_string());
            }
        }
        ScriptCommand::Previous => {
            if !controller.previous() {
                return Err("already at the first video".to_string());
            }
        }
        ScriptCommand::Select(index) => controller.select(*index).map_err(|e| e.to_string())?,
        ScriptCommand::SelectId(id) => controller.select_id(*id).map_err(|e| e.to_string())?,
        ScriptCommand::Metadata {
            duration,
            generation,
        } => controller.on_metadata_loaded(generation.unwrap_or(active), *duration),
        ScriptCommand::Time { secs, generation } => {
            controller.on_time_update(generation.unwrap_or(active), *secs);
        }
        ScriptCommand::Ended { generation } => controller.on_ended(generation.unwrap_or(active)),
        ScriptCommand::Error {
            message,
            generation,
        } => controller.on_error(generation.unwrap_or(active), message.clone()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use lectern_core::MediaKind;
    use lectern_playback::{Generation, PlayerStatus};

    fn videos(count: i64) -> Vec<MediaItem> {
        (1..=count)
            .map(|id| {
                MediaItem::new(
                    MaterialId::new(id),
                    format!("Lecture {id}"),
                    MediaKind::Video,
                    format!("/media/{id}.webm"),
                )
            })
            .collect()
    }

    #[test]
    fn replays_to_completion() {
        let script = parse_script("meta 90\nplay\ntime 45\nended").unwrap();
        let report = run_session(videos(2), None, PlayerConfig::default(), &script);

        assert_eq!(report.completions, vec![MaterialId::new(1)]);
        assert!(report.rejected.is_empty());
        match &report.view {
            PlayerView::Ready(now) => {
                assert_eq!(now.status, PlayerStatus::Ended);
                assert_eq!(now.elapsed_label, "1:30");
            }
            other => panic!("unexpected view {other:?}"),
        }
        assert!(report.commands.contains(&ResourceCommand::Play));
        assert_eq!(report.commands.last(), Some(&ResourceCommand::Release));
    }

    #[test]
    fn late_events_are_discarded() {
        let script = parse_script("next\nended @1\nmeta 500 @1").unwrap();
        let report = run_session(videos(2), None, PlayerConfig::default(), &script);

        assert!(report.completions.is_empty());
        let stale = report
            .events
            .iter()
            .filter(|e| matches!(e, PlaybackEvent::StaleEventDiscarded { .. }))
            .count();
        assert_eq!(stale, 2);
        assert!(report.events.iter().any(|e| matches!(
            e,
            PlaybackEvent::TrackChanged { generation, .. } if *generation == Generation::new(2)
        )));
    }

    #[test]
    fn rejected_navigation_is_recorded() {
        let script = parse_script("next\nselect 9\nprevious\nprevious").unwrap();
        let report = run_session(videos(2), Some(MaterialId::new(2)), PlayerConfig::default(), &script);

        let lines: Vec<_> = report.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 2, 4]);
    }

    #[test]
    fn empty_collection_stays_empty() {
        let script = parse_script("play\nended").unwrap();
        let report = run_session(Vec::new(), None, PlayerConfig::default(), &script);

        assert_eq!(report.view, PlayerView::EmptyPlaylist);
        assert!(report.completions.is_empty());
        assert!(report.playlist.is_empty());
    }
}
