//! Cancelable periodic driver.
//!
//! One thread per ticker. The stop signal doubles as the pacing wait: the
//! thread blocks on a zero-capacity channel with a timeout of one period, so
//! cancellation is prompt even for multi-second periods. The thread is
//! joined when the `Ticker` is dropped, preventing leaked callbacks.

use crossbeam_channel as xch;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

pub struct Ticker {
    name: &'static str,
    stop_tx: Option<xch::Sender<()>>,
    join: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl Ticker {
    /// Spawn a thread invoking `tick` every `period` until the ticker is
    /// stopped or dropped.
    pub fn spawn(name: &'static str, period: Duration, mut tick: impl FnMut() + Send + 'static) -> Self {
        let (stop_tx, stop_rx) = xch::bounded::<()>(0);
        let ticks = Arc::new(AtomicU64::new(0));
        let tick_count = ticks.clone();

        let join = std::thread::Builder::new()
            .name(format!("bf-tick-{name}"))
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(period) {
                        Err(xch::RecvTimeoutError::Timeout) => {
                            tick();
                            tick_count.fetch_add(1, Ordering::Relaxed);
                        }
                        // Stop requested, or the handle is gone.
                        _ => break,
                    }
                }
                tracing::debug!(ticker = name, "ticker stopped");
            })
            .expect("failed to spawn ticker thread");

        Self {
            name,
            stop_tx: Some(stop_tx),
            join: Some(join),
            ticks,
        }
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Stop the ticker and wait for the thread to exit.
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.stop_tx.take();
        if let Some(join) = self.join.take()
            && join.join().is_err()
        {
            tracing::warn!(ticker = self.name, "ticker thread panicked during shutdown");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.halt();
    }
}
