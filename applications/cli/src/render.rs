//! Plain-text output for the `lectern` commands

use crate::session::SessionReport;
use lectern_core::MediaItem;
use lectern_playback::{format_time, mime::mime_type_for, PlayerView, Playlist, ResourceCommand};
use std::fmt;

/// A derived playlist with its start index marked
pub struct PlaylistListing<'a> {
    pub playlist: &'a Playlist,
    pub start_index: usize,
}

impl fmt::Display for PlaylistListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.playlist.is_empty() {
            return writeln!(f, "No videos available");
        }

        for (index, item) in self.playlist.iter().enumerate() {
            let marker = if index == self.start_index { '>' } else { ' ' };
            writeln!(f, "{marker} {}", playlist_row(index, item))?;
        }
        writeln!(f, "start index: {}", self.start_index)
    }
}

/// Render a derived playlist and its start index
pub fn render_playlist(playlist: &Playlist, start_index: usize) -> String {
    PlaylistListing {
        playlist,
        start_index,
    }
    .to_string()
}

fn playlist_row(index: usize, item: &MediaItem) -> String {
    let duration = item.duration.map_or_else(|| "-".to_string(), format_time);
    format!(
        "{index:>3}  #{:<6} {:<40} {:<18} {duration}",
        item.id.get(),
        item.title,
        mime_type_for(item)
    )
}

pub fn render_command(command: &ResourceCommand) -> String {
    match command {
        ResourceCommand::Load {
            url,
            mime_type,
            generation,
        } => format!("load {url} ({mime_type}) {generation}"),
        ResourceCommand::Play => "play".to_string(),
        ResourceCommand::Pause => "pause".to_string(),
        ResourceCommand::SetCurrentTime(secs) => format!("set-time {secs:.3}"),
        ResourceCommand::SetVolume(level) => format!("set-volume {level:.2}"),
        ResourceCommand::Release => "release".to_string(),
    }
}

/// One-paragraph summary of the player area
pub fn render_view(view: &PlayerView) -> String {
    match view {
        PlayerView::EmptyPlaylist | PlayerView::NoSelection { .. } => {
            view.placeholder().unwrap_or_default().to_string()
        }
        PlayerView::LoadError { item, message } => format!(
            "{}: {} (#{}): {message}",
            view.placeholder().unwrap_or_default(),
            item.title,
            item.id
        ),
        PlayerView::Ready(now) => {
            let volume = if now.muted {
                "muted".to_string()
            } else {
                format!("volume {}%", now.volume_percent)
            };
            let summary = format!(
                "{} (#{}) [{}/{}] {:?}\n{} / {} ({:.1}%) {volume}",
                now.title,
                now.material_id,
                now.position,
                now.playlist_len,
                now.status,
                now.elapsed_label,
                now.duration_label,
                now.progress_percent,
            );
            if now.description.is_empty() {
                summary
            } else {
                format!("{summary}\n{}", now.description)
            }
        }
    }
}

/// A full session report
pub struct ReportListing<'a>(pub &'a SessionReport);

impl fmt::Display for ReportListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "Resource commands:")?;
        for command in &report.commands {
            writeln!(f, "  {}", render_command(command))?;
        }

        writeln!(f, "\nCompletions:")?;
        if report.completions.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for id in &report.completions {
            writeln!(f, "  #{id}")?;
        }

        if !report.rejected.is_empty() {
            writeln!(f, "\nRejected:")?;
            for rejection in &report.rejected {
                writeln!(f, "  line {}: {}", rejection.line, rejection.reason)?;
            }
        }

        writeln!(f, "\nPlayer:\n{}", render_view(&report.view))?;

        if report.playlist_visible && !report.playlist.is_empty() {
            writeln!(f, "\nPlaylist:")?;
            for entry in &report.playlist {
                let marker = if entry.is_current { '>' } else { ' ' };
                writeln!(
                    f,
                    "{marker} {:>3}  {} {}",
                    entry.index + 1,
                    entry.title,
                    entry.duration_label.as_deref().unwrap_or("")
                )?;
            }
        }

        Ok(())
    }
}

/// Render a full session report
pub fn render_report(report: &SessionReport) -> String {
    ReportListing(report).to_string()
}
