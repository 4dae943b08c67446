//! UI rendering helpers for the terminal user interface.
//!
//! This module renders a controller `Snapshot` and the playlist using
//! `ratatui`, and provides the gauge that stands in for the seek slider.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::controller::{PlaybackState, SeekBar, Snapshot};
use crate::library::Track;

/// The progress gauge. The controller writes it; keys that seek go through
/// `PlaybackController::request_seek`, so the gauge never notifies anyone.
#[derive(Debug, Default)]
pub struct GaugeSeekBar {
    value: f64,
    enabled: bool,
}

impl GaugeSeekBar {
    /// Gauge fill in `0.0..=1.0`.
    fn ratio(&self) -> f64 {
        if self.enabled && self.value.is_finite() {
            (self.value / 100.0).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl SeekBar for GaugeSeekBar {
    fn set_value(&mut self, percent: f64) -> Option<f64> {
        self.value = percent;
        None
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Format an optional duration as `MM:SS`, or `--:--` when unknown.
pub fn format_time(d: Option<Duration>) -> String {
    match d {
        Some(d) => {
            let secs = d.as_secs();
            format!("{:02}:{:02}", secs / 60, secs % 60)
        }
        None => "--:--".to_string(),
    }
}

/// Render the controls help text, incorporating scrub seconds and volume step.
fn controls_text(controls: &ControlsSettings) -> String {
    [
        "[j/k] up/down".to_string(),
        "[gg/G] top/bottom".to_string(),
        "[enter] play selected".to_string(),
        "[v] select".to_string(),
        "[space/p] play/pause".to_string(),
        "[s] stop".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] scrub -/+{}s", controls.scrub_seconds),
        "[0-9] seek to n0%".to_string(),
        format!("[+/-] volume ±{}", controls.volume_step),
        "[o] rescan".to_string(),
        "[K] metadata".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn status_text(snapshot: &Snapshot, app: &App) -> String {
    let mut parts: Vec<String> = vec![
        format!("{} {}", snapshot.button_label, snapshot.state),
        format!("Song: {}", snapshot.track_label),
        format!(
            "{} / {}",
            format_time(snapshot.position()),
            format_time(snapshot.duration())
        ),
        format!("Vol: {:.0}%", snapshot.volume),
    ];
    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {}", dir.display()));
    }
    format!("{}\n{}", parts.join(" • "), snapshot.status)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn metadata_text(track: Option<&Track>) -> String {
    let Some(track) = track else {
        return "No track selected".to_string();
    };
    format!(
        "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nPath: {}",
        track.title,
        track.artist.as_deref().unwrap_or("-"),
        track.album.as_deref().unwrap_or("-"),
        format_time(track.duration),
        track.path.display()
    )
}

/// Visible window `[start, end)` of a list of `total` rows that keeps
/// `selected` roughly centered in `height` rows.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Render the entire UI into `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    snapshot: &Snapshot,
    tracks: &[Track],
    seek_bar: &GaugeSeekBar,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" rondo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(snapshot, app))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    let gauge_style = if snapshot.slider_enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let gauge = Gauge::default()
        .block(Block::bordered().title(" position "))
        .gauge_style(gauge_style)
        .ratio(seek_bar.ratio())
        .label(format!(
            "{} / {}",
            format_time(snapshot.position()),
            format_time(snapshot.duration())
        ));
    frame.render_widget(gauge, chunks[2]);

    {
        let total = tracks.len();
        let (start, end) = visible_window(total, chunks[3].height as usize, app.cursor);
        let items: Vec<ListItem> = tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let item = ListItem::new(track.display.as_str());
                let playing = snapshot.state != PlaybackState::Stopped
                    && snapshot.current_index == Some(start + offset);
                if playing { item.bold() } else { item }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(app.cursor.min(total - 1) - start));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 9, chunks[3]);
        frame.render_widget(Clear, popup_area);
        let meta = Paragraph::new(metadata_text(tracks.get(app.cursor)))
            .block(
                Block::default()
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    })
                    .borders(Borders::ALL)
                    .title(" metadata (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta, popup_area);
    }

    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests;
