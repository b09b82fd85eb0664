//! Integration tests for the playback controller
//!
//! These tests drive the controller the way a page would: materials in,
//! user actions and resource events, then inspect the snapshot, the view,
//! the resource command log and the completion callback.

use lectern_core::{MaterialId, MediaItem, MediaKind};
use lectern_playback::{
    CommandLog, CompletionReporter, Generation, PlaybackController, PlaybackError, PlaybackEvent,
    PlayerConfig, PlayerStatus, PlayerView, RecordingResource, ResourceCommand,
};
use std::cell::RefCell;
use std::rc::Rc;

// ===== Test Helpers =====

struct Harness {
    controller: PlaybackController,
    log: CommandLog,
    completed: Rc<RefCell<Vec<MaterialId>>>,
}

fn harness(materials: Vec<MediaItem>, initial: Option<i64>) -> Harness {
    let resource = RecordingResource::new();
    let log = resource.log();
    let completed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&completed);

    let mut controller = PlaybackController::new(PlayerConfig::default(), Box::new(resource))
        .with_completion(CompletionReporter::new(move |id| sink.borrow_mut().push(id)));

    controller.set_initial_item(initial.map(MaterialId::new));
    controller.set_materials(materials);

    Harness {
        controller,
        log,
        completed,
    }
}

fn video(id: i64) -> MediaItem {
    MediaItem::new(
        MaterialId::new(id),
        format!("Lecture {id}"),
        MediaKind::Video,
        format!("/media/lecture-{id}.mp4"),
    )
}

fn document(id: i64) -> MediaItem {
    MediaItem::new(
        MaterialId::new(id),
        format!("Handout {id}"),
        MediaKind::Document,
        format!("/media/handout-{id}.docx"),
    )
}

fn last_set_time(log: &CommandLog) -> Option<f64> {
    log.borrow().iter().rev().find_map(|command| match command {
        ResourceCommand::SetCurrentTime(secs) => Some(*secs),
        _ => None,
    })
}

// ===== Scenarios =====

#[test]
fn initial_item_selects_its_position() {
    let h = harness(vec![video(1), video(2)], Some(2));

    let state = h.controller.state();
    assert_eq!(state.current_index, 1);
    assert_eq!(state.current_item.as_ref().map(|i| i.id), Some(MaterialId::new(2)));

    let loads: Vec<_> = h
        .log
        .borrow()
        .iter()
        .filter(|c| matches!(c, ResourceCommand::Load { .. }))
        .cloned()
        .collect();
    assert_eq!(
        loads,
        vec![ResourceCommand::Load {
            url: "/media/lecture-2.mp4".to_string(),
            mime_type: "video/mp4".to_string(),
            generation: Generation::new(1),
        }]
    );
}

#[test]
fn empty_collection_renders_empty_state() {
    let mut h = harness(Vec::new(), None);

    assert_eq!(h.controller.view(), PlayerView::EmptyPlaylist);
    assert!(h.controller.current_item().is_none());

    // every input is harmless
    h.controller.play();
    h.controller.seek(50.0);
    assert!(!h.controller.next());
    assert!(!h.controller.previous());
    assert_eq!(h.controller.select(0), Err(PlaybackError::EmptyPlaylist));
    h.controller.on_ended(h.controller.generation());

    assert!(h.completed.borrow().is_empty());
    assert!(h
        .log
        .borrow()
        .iter()
        .all(|c| matches!(c, ResourceCommand::Release | ResourceCommand::SetVolume(_))));
}

#[test]
fn initial_item_arriving_in_later_collection_is_selected() {
    let mut h = harness(vec![video(1), video(2)], Some(3));
    assert_eq!(h.controller.current_item().map(|i| i.id), Some(MaterialId::new(1)));

    h.controller.set_materials(vec![video(1), video(2), video(3)]);

    let state = h.controller.state();
    assert_eq!(state.current_item.as_ref().map(|i| i.id), Some(MaterialId::new(3)));
    assert_eq!(state.current_index, 2);
    assert_eq!(
        h.log.borrow().iter().rev().find(|c| matches!(c, ResourceCommand::Load { .. })),
        Some(&ResourceCommand::Load {
            url: "/media/lecture-3.mp4".to_string(),
            mime_type: "video/mp4".to_string(),
            generation: h.controller.generation(),
        })
    );

    // a refresh that still contains it does not reload
    let generation = h.controller.generation();
    h.controller.set_materials(vec![video(3), video(1), video(2)]);
    assert_eq!(h.controller.generation(), generation);
    assert_eq!(h.controller.state().current_index, 0);
}

#[test]
fn documents_only_collection_is_empty() {
    let h = harness(vec![document(1), document(2)], Some(1));
    assert_eq!(h.controller.view(), PlayerView::EmptyPlaylist);
}

#[test]
fn ended_at_last_index_reports_once_and_stays() {
    let mut h = harness(vec![video(1), video(2), video(3)], Some(3));
    let generation = h.controller.generation();

    h.controller.on_metadata_loaded(generation, 600.0);
    h.controller.play();
    assert_eq!(h.controller.state().status, PlayerStatus::Playing);

    h.controller.on_ended(generation);

    let state = h.controller.state();
    assert_eq!(state.status, PlayerStatus::Ended);
    assert!(!state.is_playing);
    assert_eq!(state.current_index, 2);
    assert_eq!(*h.completed.borrow(), vec![MaterialId::new(3)]);

    // a duplicate ended signal does not report again
    h.controller.on_ended(generation);
    assert_eq!(h.completed.borrow().len(), 1);
}

#[test]
fn late_metadata_from_superseded_selection_is_discarded() {
    let mut h = harness(vec![video(1), video(2)], None);
    let g1 = h.controller.generation();

    assert!(h.controller.next());
    let g2 = h.controller.generation();
    assert!(g2 > g1);
    h.controller.drain_events();

    let before = h.controller.state().clone();
    h.controller.on_metadata_loaded(g1, 999.0);
    h.controller.on_time_update(g1, 12.0);
    h.controller.on_ended(g1);
    h.controller.on_error(g1, "aborted");

    assert_eq!(*h.controller.state(), before);
    assert!(h.completed.borrow().is_empty());

    let events = h.controller.drain_events();
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| matches!(
        e,
        PlaybackEvent::StaleEventDiscarded { event_generation, active_generation }
            if *event_generation == g1 && *active_generation == g2
    )));

    h.controller.on_metadata_loaded(g2, 300.0);
    assert_eq!(h.controller.state().duration, 300.0);
}

// ===== Playback Control =====

#[test]
fn seek_waits_for_resource_report() {
    let mut h = harness(vec![video(1)], None);
    let generation = h.controller.generation();
    h.controller.on_metadata_loaded(generation, 240.0);

    h.controller.seek(75.0);
    assert_eq!(h.controller.state().current_time, 0.0);

    let requested = last_set_time(&h.log).unwrap();
    assert!((requested - 180.0).abs() < 1e-9);

    // the resource echoes its new position
    h.controller.on_time_update(generation, requested);
    assert!((h.controller.state().current_time - 180.0).abs() < 1e-9);
}

#[test]
fn seek_to_end_is_not_ended() {
    let mut h = harness(vec![video(1)], None);
    let generation = h.controller.generation();
    h.controller.on_metadata_loaded(generation, 100.0);
    h.controller.play();

    h.controller.seek(100.0);
    h.controller.on_time_update(generation, 100.0);

    assert_eq!(h.controller.state().status, PlayerStatus::Playing);
    assert!(h.completed.borrow().is_empty());
}

#[test]
fn volume_is_clamped_and_applied() {
    let mut h = harness(vec![video(1)], None);

    h.controller.set_volume(1.8);
    assert_eq!(h.controller.state().volume.level(), 1.0);
    assert_eq!(h.log.borrow().last(), Some(&ResourceCommand::SetVolume(1.0)));

    h.controller.set_volume(0.25);
    assert_eq!(h.controller.state().volume.level(), 0.25);

    h.controller.set_volume(f64::NAN);
    assert_eq!(h.controller.state().volume.level(), 0.25);
}

#[test]
fn volume_survives_selection() {
    let mut h = harness(vec![video(1), video(2)], None);
    h.controller.set_volume(0.4);

    h.controller.next();

    assert_eq!(h.controller.state().volume.level(), 0.4);
    assert_eq!(h.log.borrow().last(), Some(&ResourceCommand::SetVolume(0.4)));
}

#[test]
fn replaying_after_end_reports_again() {
    let mut h = harness(vec![video(7)], None);
    let generation = h.controller.generation();

    h.controller.play();
    h.controller.on_ended(generation);
    h.controller.play();
    assert_eq!(last_set_time(&h.log), Some(0.0));
    h.controller.on_ended(generation);

    assert_eq!(*h.completed.borrow(), vec![MaterialId::new(7), MaterialId::new(7)]);
    assert_eq!(h.controller.completions_reported(), 2);
}

// ===== Navigation =====

#[test]
fn select_resets_position_and_does_not_autoplay() {
    let mut h = harness(vec![video(1), video(2), video(3)], None);
    let generation = h.controller.generation();
    h.controller.on_metadata_loaded(generation, 50.0);
    h.controller.play();
    h.controller.on_time_update(generation, 30.0);

    h.controller.select(2).unwrap();

    let state = h.controller.state();
    assert_eq!(state.current_item.as_ref().map(|i| i.id), Some(MaterialId::new(3)));
    assert_eq!(state.current_time, 0.0);
    assert_eq!(state.duration, 0.0);
    assert!(!state.is_playing);
    assert_eq!(state.status, PlayerStatus::Idle);
    assert_ne!(h.log.borrow().last(), Some(&ResourceCommand::Play));
}

#[test]
fn navigation_has_no_wraparound() {
    let mut h = harness(vec![video(1), video(2)], None);

    assert!(!h.controller.previous());
    assert_eq!(h.controller.state().current_index, 0);

    assert!(h.controller.next());
    assert!(!h.controller.next());
    assert_eq!(h.controller.state().current_index, 1);

    assert!(h.controller.previous());
    assert_eq!(h.controller.state().current_index, 0);
}

#[test]
fn select_rejects_bad_targets() {
    let mut h = harness(vec![video(1), document(2), video(3)], None);

    assert_eq!(
        h.controller.select(2),
        Err(PlaybackError::IndexOutOfBounds { index: 2, len: 2 })
    );
    assert_eq!(
        h.controller.select_id(MaterialId::new(2)),
        Err(PlaybackError::NotInPlaylist(MaterialId::new(2)))
    );
    assert_eq!(h.controller.state().current_index, 0);

    h.controller.select_id(MaterialId::new(3)).unwrap();
    assert_eq!(h.controller.state().current_index, 1);
}

#[test]
fn every_selection_releases_before_loading() {
    let mut h = harness(vec![video(1), video(2), video(3)], None);
    h.controller.next();
    h.controller.next();
    h.controller.previous();

    let log = h.log.borrow();
    for (i, command) in log.iter().enumerate() {
        if matches!(command, ResourceCommand::Load { .. }) {
            assert_eq!(log[i - 1], ResourceCommand::Release, "load at {i} without release");
        }
    }
}

// ===== Failure handling =====

#[test]
fn load_error_is_degraded_but_navigable() {
    let mut h = harness(vec![video(1), video(2)], None);
    let generation = h.controller.generation();
    h.controller.play();

    h.controller.on_error(generation, "MEDIA_ERR_SRC_NOT_SUPPORTED");

    match h.controller.view() {
        PlayerView::LoadError { item, message } => {
            assert_eq!(item.id, MaterialId::new(1));
            assert_eq!(message, "MEDIA_ERR_SRC_NOT_SUPPORTED");
        }
        other => panic!("expected load error view, got {other:?}"),
    }
    assert!(!h.controller.state().is_playing);
    assert_eq!(h.controller.playlist_entries().len(), 2);

    // no automatic retry
    let commands = h.log.borrow().len();
    h.controller.play();
    assert_eq!(h.log.borrow().len(), commands);

    // re-selecting the same item retries
    h.controller.select(0).unwrap();
    assert!(h.controller.view().is_ready());
}

#[test]
fn ended_after_load_error_does_not_complete() {
    let mut h = harness(vec![video(1), video(2)], None);
    let generation = h.controller.generation();
    h.controller.play();

    h.controller.on_error(generation, "MEDIA_ERR_DECODE");
    h.controller.on_ended(generation);

    assert!(h.completed.borrow().is_empty());
    assert_ne!(h.controller.state().status, PlayerStatus::Ended);
    assert!(matches!(h.controller.view(), PlayerView::LoadError { .. }));
}

#[test]
fn playlist_panel_toggles() {
    let mut h = harness(vec![video(1)], None);
    assert!(h.controller.state().playlist_visible);

    h.controller.toggle_playlist();
    assert!(!h.controller.state().playlist_visible);

    h.controller.set_playlist_visible(true);
    assert!(h.controller.state().playlist_visible);
}
