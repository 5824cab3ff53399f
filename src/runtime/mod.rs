use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::bus::Hub;
use crate::logging::init_logger;
use crate::mpris::ControlCmd;
use crate::owner::Owner;

mod event_loop;
mod settings;

pub fn run() -> anyhow::Result<()> {
    let settings = settings::load_settings();
    if let Err(e) = init_logger(&settings.log) {
        eprintln!("tandem: logging disabled: {e}");
    }

    let catalog = settings::load_catalog(&settings);
    for track in catalog.tracks() {
        log::debug!("catalog: #{} {} ({}s)", track.id, track.display(), track.duration);
    }
    let channel = settings.channel.name.clone();
    let hub = Hub::new();

    let owner = Owner::join(
        &hub,
        &channel,
        catalog,
        settings.player.default_volume,
        Duration::from_millis(settings.player.tick_ms),
    )
    .context("joining the player channel")?;
    owner.publish();
    log::info!("owning channel '{channel}'");

    let mut app = App::new(owner, hub.clone(), channel.clone(), settings.popout.clone());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    if settings.mpris.enabled {
        if let Err(e) = crate::mpris::spawn_mpris(&hub, &channel, control_tx) {
            log::warn!("MPRIS unavailable: {e}");
        }
    }
    log::debug!("{} endpoint(s) on '{channel}'", hub.listeners(&channel));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &control_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.close_popout();
    run_result
}
