//! Cancellable periodic task.
//!
//! A `Ticker` owns a thread that sends a `Tick` every `period` until it is
//! cancelled or dropped. Dropping joins the thread, so no tick is produced
//! after the ticker is gone.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::SyncError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tick;

pub struct Ticker {
    stop: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start ticking every `period`. A zero period is refused since it would spin.
    pub fn start(period: Duration, ticks: Sender<Tick>) -> Result<Self, SyncError> {
        if period.is_zero() {
            return Err(SyncError::ZeroPeriod);
        }
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let join = thread::Builder::new()
            .name("ticker".into())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => {
                            if ticks.send(Tick).is_err() {
                                break;
                            }
                        }
                        // Explicit stop or the handle went away.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .map_err(|source| SyncError::Spawn {
                what: "ticker",
                source,
            })?;

        log::debug!("ticker started ({}ms)", period.as_millis());
        Ok(Self {
            stop: Some(stop_tx),
            join: Some(join),
        })
    }

    /// Stop ticking and wait for the thread to exit.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
        log::debug!("ticker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn ticks_repeatedly_until_cancelled() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::start(Duration::from_millis(10), tx).unwrap();

        for _ in 0..3 {
            assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(Tick));
        }

        ticker.cancel();
        // Drain anything sent before the cancel landed; then the sender is gone.
        while rx.try_recv().is_ok() {}
        assert_eq!(
            rx.recv_timeout(Duration::from_millis(50)),
            Err(RecvTimeoutError::Disconnected)
        );
    }

    #[test]
    fn dropping_stops_a_slow_ticker_promptly() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::start(Duration::from_secs(3600), tx).unwrap();

        let started = Instant::now();
        drop(ticker);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn zero_period_is_refused() {
        let (tx, _rx) = mpsc::channel();
        assert!(matches!(
            Ticker::start(Duration::ZERO, tx),
            Err(SyncError::ZeroPeriod)
        ));
    }

    #[test]
    fn stops_by_itself_when_nobody_listens() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::start(Duration::from_millis(5), tx).unwrap();
        drop(rx);
        // The thread exits on the first failed send; drop still joins cleanly.
        thread::sleep(Duration::from_millis(30));
        drop(ticker);
    }
}
