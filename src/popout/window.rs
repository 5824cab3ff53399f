use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::bus::Hub;
use crate::controls::{Gesture, slider_value};
use crate::error::SyncError;
use crate::mirror::{Mirror, MirrorState};

use super::request::OpenRequest;

/// How often the popout thread checks its queues.
const POLL: Duration = Duration::from_millis(50);

/// The popout's last rendered state, shared with whoever draws it.
pub type ViewHandle = Arc<Mutex<MirrorState>>;

#[derive(Debug)]
enum PopoutCmd {
    Gesture(Gesture),
    Close,
}

pub struct PopoutWindow {
    request: OpenRequest,
    tx: Sender<PopoutCmd>,
    view: ViewHandle,
    join: Option<JoinHandle<()>>,
}

impl PopoutWindow {
    /// Open a popout mirroring `channel`. `allowed == false` behaves like a
    /// blocked popup: nothing is opened and the caller keeps going without one.
    pub fn open(
        hub: &Hub,
        channel: &str,
        request: OpenRequest,
        allowed: bool,
    ) -> Result<Self, SyncError> {
        if !allowed {
            return Err(SyncError::PopoutBlocked);
        }

        let mirror = Mirror::connect(hub, channel)?;
        let view: ViewHandle = Arc::new(Mutex::new(mirror.state().clone()));
        let (tx, rx) = mpsc::channel::<PopoutCmd>();

        let view_for_thread = view.clone();
        let join = thread::Builder::new()
            .name(format!("popout:{}", request.target))
            .spawn(move || run_popout(mirror, rx, view_for_thread))
            .map_err(|source| SyncError::Spawn {
                what: "popout",
                source,
            })?;

        log::info!(
            "opened popout '{}' ({}x{})",
            request.target,
            request.width,
            request.height
        );
        Ok(Self {
            request,
            tx,
            view,
            join: Some(join),
        })
    }

    pub fn request(&self) -> &OpenRequest {
        &self.request
    }

    /// Forward a gesture to the popout. Returns false once it has closed.
    pub fn gesture(&self, gesture: Gesture) -> bool {
        self.tx.send(PopoutCmd::Gesture(gesture)).is_ok()
    }

    /// Ask the popout to close. It goes away asynchronously.
    pub fn close(&self) {
        let _ = self.tx.send(PopoutCmd::Close);
    }

    pub fn is_closed(&self) -> bool {
        self.join.as_ref().is_none_or(|j| j.is_finished())
    }

    /// Copy of what the popout currently renders.
    pub fn view(&self) -> MirrorState {
        self.view.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Drop for PopoutWindow {
    fn drop(&mut self) {
        self.close();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

fn run_popout(mut mirror: Mirror, rx: Receiver<PopoutCmd>, view: ViewHandle) {
    loop {
        match rx.recv_timeout(POLL) {
            Ok(PopoutCmd::Gesture(g)) => apply_gesture(&mirror, g),
            Ok(PopoutCmd::Close) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        if mirror.pump() > 0 {
            if let Ok(mut v) = view.lock() {
                *v = mirror.state().clone();
            }
        }
    }
    log::info!("popout closed");
}

fn apply_gesture(mirror: &Mirror, gesture: Gesture) {
    let state = mirror.state();
    // The loading view has no controls.
    let Some(track) = state.track.as_ref() else {
        log::debug!("popout still loading, ignoring {gesture:?}");
        return;
    };

    match gesture {
        Gesture::TogglePlayPause => mirror.toggle_play_pause(),
        Gesture::Previous => mirror.previous(),
        Gesture::Next => mirror.next(),
        Gesture::SeekBy(delta) => {
            mirror.seek(slider_value(state.current_time, delta, track.duration))
        }
        Gesture::VolumeBy(delta) => mirror.set_volume(slider_value(state.volume, delta, 100)),
    }
}
