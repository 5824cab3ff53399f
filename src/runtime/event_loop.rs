use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Focus};
use crate::config::{self, ControlsSettings};
use crate::controls::Gesture;
use crate::mpris::ControlCmd;
use crate::ui;

/// What a key press asks for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Action {
    Quit,
    Gesture(Gesture),
    OpenPopout,
    ToggleFocus,
    ClosePopout,
}

fn action_for(key: KeyEvent, controls: &ControlsSettings) -> Option<Action> {
    let scrub = i64::from(controls.scrub_seconds);
    let step = i64::from(controls.volume_step);
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::Gesture(Gesture::TogglePlayPause),
        KeyCode::Char('h') | KeyCode::Left => Action::Gesture(Gesture::Previous),
        KeyCode::Char('l') | KeyCode::Right => Action::Gesture(Gesture::Next),
        KeyCode::Char('H') => Action::Gesture(Gesture::SeekBy(-scrub)),
        KeyCode::Char('L') => Action::Gesture(Gesture::SeekBy(scrub)),
        KeyCode::Char('-') => Action::Gesture(Gesture::VolumeBy(-step)),
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Gesture(Gesture::VolumeBy(step)),
        KeyCode::Char('o') => Action::OpenPopout,
        KeyCode::Tab => Action::ToggleFocus,
        KeyCode::Char('x') | KeyCode::Esc => Action::ClosePopout,
        _ => return None,
    };
    Some(action)
}

/// Apply `action` to `app`. Returns true when the loop should stop.
fn apply(action: Action, app: &mut App) -> bool {
    match action {
        Action::Quit => return true,
        Action::Gesture(g) => app.dispatch(g),
        Action::OpenPopout => {
            // Failure is already logged and shown as a notice.
            let _ = app.open_popout();
        }
        Action::ToggleFocus => app.toggle_focus(),
        Action::ClosePopout => {
            if app.focus == Focus::Popout {
                app.close_popout();
            }
        }
    }
    false
}

/// Main terminal event loop: relays channel intents and ticks to the owner,
/// watches the popout, draws and handles input. Returns `Ok(())` when
/// shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> anyhow::Result<()> {
    loop {
        app.owner.pump();
        app.poll_popout_closed(Instant::now());

        while let Ok(cmd) = control_rx.try_recv() {
            match cmd {
                ControlCmd::Quit => {
                    log::info!("quit requested over MPRIS");
                    return Ok(());
                }
            }
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = action_for(key, &settings.controls) {
                    if apply(action, app) {
                        return Ok(());
                    }
                }
            }
        }
    }
}
