//! Application model types: `App` and `Focus`.

use std::time::{Duration, Instant};

use crate::bus::Hub;
use crate::config::PopoutSettings;
use crate::controls::{Gesture, slider_value};
use crate::error::SyncError;
use crate::owner::Owner;
use crate::popout::{OpenRequest, PX_PER_COL, PX_PER_ROW, PopoutWindow};

/// Which window receives key presses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Main,
    Popout,
}

/// The main application model.
pub struct App {
    pub owner: Owner,
    pub popout: Option<PopoutWindow>,
    pub focus: Focus,
    /// One-line notice shown in the status area, e.g. a blocked popout.
    pub notice: Option<String>,

    hub: Hub,
    channel: String,
    popout_settings: PopoutSettings,
    pub(super) last_closed_check: Instant,
}

impl App {
    /// Create a new `App` around an owner already joined to `channel` on `hub`.
    pub fn new(owner: Owner, hub: Hub, channel: String, popout_settings: PopoutSettings) -> Self {
        Self {
            owner,
            popout: None,
            focus: Focus::Main,
            notice: None,
            hub,
            channel,
            popout_settings,
            last_closed_check: Instant::now(),
        }
    }

    /// Apply a gesture made in the main window directly to the owner.
    ///
    /// Sliders are the trusted callers of `seek`/`set_volume`, so the range
    /// clamping happens here and not in the owner.
    pub fn apply_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::TogglePlayPause => self.owner.toggle_play_pause(),
            Gesture::Previous => self.owner.previous(),
            Gesture::Next => self.owner.next(),
            Gesture::SeekBy(delta) => {
                let s = self.owner.state();
                let time = slider_value(s.current_time, delta, s.current_track.duration);
                self.owner.seek(time);
            }
            Gesture::VolumeBy(delta) => {
                let volume = slider_value(self.owner.state().volume, delta, 100);
                self.owner.set_volume(volume);
            }
        }
    }

    /// Send a gesture to whichever window is focused.
    pub fn dispatch(&mut self, gesture: Gesture) {
        if self.focus == Focus::Popout {
            if let Some(popout) = self.popout.as_ref().filter(|p| !p.is_closed()) {
                popout.gesture(gesture);
                return;
            }
        }
        self.apply_gesture(gesture);
    }

    /// Open the popout, or focus it if one is already open.
    pub fn open_popout(&mut self) -> Result<(), SyncError> {
        if self.popout_active() {
            self.focus = Focus::Popout;
            return Ok(());
        }

        let request = OpenRequest::from_settings(&self.popout_settings);
        match PopoutWindow::open(&self.hub, &self.channel, request, self.popout_settings.allowed) {
            Ok(popout) => {
                if let Ok((cols, rows)) = crossterm::terminal::size() {
                    let (w, h) = (u32::from(cols) * PX_PER_COL, u32::from(rows) * PX_PER_ROW);
                    log::debug!("popout features: {}", popout.request().features(w, h));
                }
                self.popout = Some(popout);
                self.focus = Focus::Popout;
                self.notice = None;
                Ok(())
            }
            Err(e) => {
                log::warn!("popout unavailable: {e}");
                self.notice = Some(format!("Popout unavailable: {e}"));
                Err(e)
            }
        }
    }

    /// Close the popout if it is open. The handle stays until polling sees it closed.
    pub fn close_popout(&mut self) {
        if let Some(popout) = &self.popout {
            popout.close();
        }
        self.focus = Focus::Main;
    }

    /// True while a popout exists and has not reported closed.
    pub fn popout_active(&self) -> bool {
        self.popout.as_ref().is_some_and(|p| !p.is_closed())
    }

    /// Switch focus between the two windows; stays on main without a popout.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Main if self.popout_active() => Focus::Popout,
            _ => Focus::Main,
        };
    }

    /// Check whether the popout closed, at most once per configured interval.
    /// Returns true when a closed popout was dropped.
    pub fn poll_popout_closed(&mut self, now: Instant) -> bool {
        let interval = Duration::from_millis(self.popout_settings.closed_poll_ms);
        if now.saturating_duration_since(self.last_closed_check) < interval {
            return false;
        }
        self.last_closed_check = now;

        if self.popout.as_ref().is_some_and(PopoutWindow::is_closed) {
            self.popout = None;
            self.focus = Focus::Main;
            log::info!("popout window is gone");
            return true;
        }
        false
    }
}
