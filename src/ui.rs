//! UI rendering helpers for the terminal user interface.
//!
//! The main window and the popout draw the same player layout. The main window
//! reads the owner's state; the popout pane reads only what its own mirror has
//! received.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus};
use crate::catalog::Track;
use crate::config::{ControlsSettings, UiSettings};
use crate::mirror::MirrorState;
use crate::popout::{OpenRequest, PX_PER_COL, PX_PER_ROW};

/// Format whole seconds as `m:ss`. Minutes are not padded.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Gauge ratio for `value` out of `max`, kept within `[0, 1]`.
///
/// Field updates arrive independently, so a mirror can briefly hold a time
/// from the previous track, and a permissive seek can go past the end.
fn ratio(value: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (f64::from(value) / f64::from(max)).clamp(0.0, 1.0)
}

/// Render the controls help text with the configured slider steps.
fn controls_text(scrub_seconds: u32, volume_step: u32) -> String {
    [
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] seek -/+{scrub_seconds}s"),
        format!("[-/+] volume -/+{volume_step}%"),
        "[o] popout".to_string(),
        "[tab] focus".to_string(),
        "[x] close popout".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Where the popout pane lands inside `area`.
///
/// The terminal is treated as a screen of `PX_PER_COL`/`PX_PER_ROW` sized
/// cells, so the pane sits bottom-right with the requested margin, shrunk to
/// fit small terminals.
pub fn popout_area(area: Rect, request: &OpenRequest) -> Rect {
    let screen_w = u32::from(area.width) * PX_PER_COL;
    let screen_h = u32::from(area.height) * PX_PER_ROW;
    let (left, top) = request.placement(screen_w, screen_h);
    let (cols, rows) = request.cells();

    let width = cols.min(area.width);
    let height = rows.min(area.height);
    let x = u16::try_from(left / PX_PER_COL)
        .unwrap_or(u16::MAX)
        .min(area.width - width);
    let y = u16::try_from(top / PX_PER_ROW)
        .unwrap_or(u16::MAX)
        .min(area.height - height);

    Rect {
        x: area.x + x,
        y: area.y + y,
        width,
        height,
    }
}

/// What both windows render: a track (once known) and the three scalar fields.
struct PlayerView<'a> {
    track: Option<&'a Track>,
    is_playing: bool,
    current_time: u32,
    volume: u32,
}

impl<'a> From<&'a MirrorState> for PlayerView<'a> {
    fn from(s: &'a MirrorState) -> Self {
        Self {
            track: s.track.as_ref(),
            is_playing: s.is_playing,
            current_time: s.current_time,
            volume: s.volume,
        }
    }
}

fn render_player(frame: &mut Frame, area: Rect, view: &PlayerView<'_>) {
    let Some(track) = view.track else {
        let loading = Paragraph::new("Loading player...")
            .alignment(Alignment::Center)
            .italic();
        frame.render_widget(loading, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let info = Paragraph::new(format!(
        "{}\n{}\n{}\n{}",
        track.title, track.artist, track.album, track.cover
    ))
    .wrap(Wrap { trim: true });
    frame.render_widget(info, rows[0]);

    let progress = Gauge::default()
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(ratio(view.current_time, track.duration))
        .label(format!(
            "{} / {}",
            format_time(view.current_time),
            format_time(track.duration)
        ));
    frame.render_widget(progress, rows[1]);

    let transport = if view.is_playing {
        "|<<   ||   >>|"
    } else {
        "|<<   >    >>|"
    };
    frame.render_widget(
        Paragraph::new(transport).alignment(Alignment::Center),
        rows[3],
    );

    let volume = Gauge::default()
        .ratio(ratio(view.volume, 100))
        .label(format!("vol {}%", view.volume));
    frame.render_widget(volume, rows[4]);
}

fn render_popout(frame: &mut Frame, app: &App) {
    let Some(popout) = app.popout.as_ref().filter(|p| !p.is_closed()) else {
        return;
    };

    let area = popout_area(frame.area(), popout.request());
    frame.render_widget(Clear, area);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", popout.request().target))
        .padding(Padding::horizontal(1));
    if app.focus == Focus::Popout {
        block = block.border_style(Style::default().add_modifier(Modifier::BOLD));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = popout.view();
    render_player(frame, inner, &PlayerView::from(&state));
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tandem ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Player
    let state = app.owner.state();
    let view = PlayerView {
        track: Some(&state.current_track),
        is_playing: state.is_playing,
        current_time: state.current_time,
        volume: state.volume,
    };
    let catalog = app.owner.catalog();
    let position = catalog
        .position_of(state.current_track.id)
        .map_or(0, |p| p + 1);
    let mut player_block = Block::bordered()
        .title(format!(" now playing {}/{} ", position, catalog.len()))
        .padding(Padding::horizontal(1));
    if app.focus == Focus::Main {
        player_block = player_block.border_style(Style::default().add_modifier(Modifier::BOLD));
    }
    let player_area = player_block.inner(chunks[1]);
    frame.render_widget(player_block, chunks[1]);
    render_player(frame, player_area, &view);

    // Status
    let mut parts = vec![ui_settings.footer_text.clone()];
    if app.popout_active() {
        parts.push("Popout player is active".to_string());
    }
    if let Some(notice) = &app.notice {
        parts.push(notice.clone());
    }
    let status = Paragraph::new(parts.join(" • "))
        .block(
            Block::bordered()
                .padding(Padding::horizontal(1))
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[2]);

    let footer = Paragraph::new(controls_text(
        controls_settings.scrub_seconds,
        controls_settings.volume_step,
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" controls ")
            .padding(Padding::horizontal(1)),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    render_popout(frame, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Hub;
    use crate::catalog::Catalog;
    use crate::config::PopoutSettings;
    use crate::owner::Owner;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app(channel: &str, allowed: bool) -> App {
        let hub = Hub::new();
        let owner = Owner::join(
            &hub,
            channel,
            Catalog::default(),
            80,
            Duration::from_secs(3600),
        )
        .unwrap();
        let popout = PopoutSettings {
            allowed,
            ..PopoutSettings::default()
        };
        App::new(owner, hub, channel.to_string(), popout)
    }

    #[test]
    fn format_time_pads_seconds_only() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(245), "4:05");
        assert_eq!(format_time(600), "10:00");
    }

    #[test]
    fn ratio_stays_in_range() {
        assert_eq!(ratio(0, 0), 0.0);
        assert_eq!(ratio(50, 100), 0.5);
        assert_eq!(ratio(120, 100), 1.0);
    }

    #[test]
    fn popout_area_is_anchored_bottom_right() {
        let area = Rect::new(0, 0, 100, 40);
        let r = popout_area(area, &OpenRequest::default());
        // 1000x1000 px screen: left 600 px, top 400 px.
        assert_eq!(r, Rect::new(60, 16, 40, 20));
    }

    #[test]
    fn popout_area_shrinks_to_small_terminals() {
        let area = Rect::new(0, 0, 30, 10);
        let r = popout_area(area, &OpenRequest::default());
        assert_eq!(r, Rect::new(0, 0, 30, 10));
    }

    #[test]
    fn controls_text_uses_configured_steps() {
        let text = controls_text(10, 2);
        assert!(text.contains("-/+10s"));
        assert!(text.contains("-/+2%"));
    }

    #[test]
    fn main_window_shows_current_track() {
        let app = app("ui_main", true);
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|f| draw(f, &app, &UiSettings::default(), &ControlsSettings::default()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Breathe"));
        assert!(text.contains("0:00 / 4:05"));
        assert!(!text.contains("Popout player is active"));
    }

    #[test]
    fn open_popout_shows_indicator() {
        let mut app = app("ui_popout", true);
        app.open_popout().unwrap();
        let mut terminal = Terminal::new(TestBackend::new(200, 40)).unwrap();
        terminal
            .draw(|f| draw(f, &app, &UiSettings::default(), &ControlsSettings::default()))
            .unwrap();

        assert!(screen_text(&terminal).contains("Popout player is active"));
    }

    #[test]
    fn blocked_popout_leaves_a_notice() {
        let mut app = app("ui_blocked", false);
        assert!(app.open_popout().is_err());
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal
            .draw(|f| draw(f, &app, &UiSettings::default(), &ControlsSettings::default()))
            .unwrap();

        assert!(screen_text(&terminal).contains("Popout unavailable"));
    }
}
