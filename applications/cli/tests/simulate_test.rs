//! End-to-end tests for the CLI library: files in, report out

use lectern_cli::{load_materials, load_script, render, run_session, CliError};
use lectern_core::MaterialId;
use lectern_playback::{PlayerConfig, PlayerView, Playlist, ResourceCommand};
use std::fs;
use tempfile::TempDir;

const MATERIALS: &str = r#"[
    {"id": 10, "title": "Orientation", "url": "/u/orientation.mp4", "type": "video",
     "upload_date": "2024-09-01T09:00:00Z", "duration": 300},
    {"id": 11, "title": "Reading list", "url": "/u/reading.pdf", "type": "pdf",
     "upload_date": "2024-09-01T09:05:00Z"},
    {"id": 12, "title": "Lab safety", "file_path": "/u/lab", "file_name": "lab.MOV",
     "material_type": "VIDEO", "upload_date": "2024-09-03T10:00:00"}
]"#;

fn workspace(script: &str) -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let materials = dir.path().join("materials.json");
    let script_path = dir.path().join("session.txt");
    fs::write(&materials, MATERIALS).unwrap();
    fs::write(&script_path, script).unwrap();
    (dir, materials, script_path)
}

#[test]
fn playlist_keeps_only_videos_in_order() {
    let (_dir, materials, _) = workspace("");
    let items = load_materials(&materials).unwrap();
    assert_eq!(items.len(), 3);

    let (playlist, start) = Playlist::build(&items, Some(MaterialId::new(12))).into_parts();
    assert_eq!(start, 1);

    let text = render::render_playlist(&playlist, start);
    assert!(text.contains("Orientation"));
    assert!(!text.contains("Reading list"));
    assert!(text.contains("video/quicktime"));
    assert!(text.ends_with("start index: 1\n"));
}

#[test]
fn full_session_reports_completion_and_final_view() {
    let (_dir, materials, script) = workspace(
        "# watch the orientation to the end\n\
         meta 300\n\
         play\n\
         seek 50\n\
         time 150\n\
         volume 0.6\n\
         ended\n\
         next\n\
         ended @1\n",
    );
    let items = load_materials(&materials).unwrap();
    let lines = load_script(&script).unwrap();

    let report = run_session(items, None, PlayerConfig::default(), &lines);

    assert_eq!(report.completions, vec![MaterialId::new(10)]);
    assert!(report.commands.contains(&ResourceCommand::SetCurrentTime(150.0)));
    assert!(report.commands.contains(&ResourceCommand::SetVolume(0.6)));

    let PlayerView::Ready(now) = &report.view else {
        panic!("expected ready view, got {:?}", report.view);
    };
    assert_eq!(now.material_id, MaterialId::new(12));
    assert_eq!(now.volume_percent, 60);
    assert!(!now.has_next);

    let text = render::render_report(&report);
    assert!(text.contains("Completions:\n  #10\n"));
    assert!(text.contains("load /u/lab (video/quicktime) g2"));
}

#[test]
fn auto_advance_moves_to_next_video() {
    let (_dir, materials, script) = workspace("play\nended\n");
    let config = PlayerConfig {
        auto_advance: true,
        ..Default::default()
    };

    let report = run_session(
        load_materials(&materials).unwrap(),
        None,
        config,
        &load_script(&script).unwrap(),
    );

    assert_eq!(report.completions, vec![MaterialId::new(10)]);
    assert!(matches!(&report.view, PlayerView::Ready(now) if now.material_id == MaterialId::new(12)));
}

#[test]
fn load_failure_is_reported_not_raised() {
    let (_dir, materials, script) = workspace("error MEDIA_ERR_NETWORK\nplay\nnext\n");

    let report = run_session(
        load_materials(&materials).unwrap(),
        None,
        PlayerConfig::default(),
        &load_script(&script).unwrap(),
    );

    assert!(report.view.is_ready());
    assert!(!report.commands.contains(&ResourceCommand::Play));
}

#[test]
fn bad_inputs_surface_as_errors() {
    let (dir, _, script) = workspace("play\nfast-forward\n");
    assert!(matches!(
        load_script(&script),
        Err(CliError::Script { line: 2, .. })
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{not json").unwrap();
    assert!(matches!(load_materials(&broken), Err(CliError::Core(_))));

    assert!(matches!(
        load_materials(&dir.path().join("missing.json")),
        Err(CliError::Io(_))
    ));
}
