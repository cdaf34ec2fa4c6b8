//! Live ("running") mode — periodic recomputation on a single timer
//!
//! The driving mechanism is one periodic tokio task. Starting, stopping,
//! or changing the tick interval always cancels the previous task before
//! (possibly) spawning a new one, so two timers are never live at once.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::engine::SimulationEngine;

type TickFn = Arc<dyn Fn() + Send + Sync>;

/// Scoped handle over a periodic tokio task.
///
/// Holds at most one running task; `start` and `set_interval` abort the
/// previous task before spawning a replacement, and dropping the ticker
/// cancels it. Must be used within a tokio runtime.
pub struct Ticker {
    interval_ms: u64,
    callback: Option<TickFn>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            callback: None,
            handle: None,
        }
    }

    /// Start ticking, cancelling any previous timer task. The first
    /// callback fires one full period after start.
    pub fn start(&mut self, callback: TickFn) {
        self.stop_task();
        self.handle = Some(Self::spawn(self.interval_ms, Arc::clone(&callback)));
        self.callback = Some(callback);
    }

    /// Change the period. A running ticker is cancelled and restarted
    /// with the retained callback; an idle one just records the period.
    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
        if self.handle.is_some() {
            if let Some(callback) = self.callback.clone() {
                self.stop_task();
                self.handle = Some(Self::spawn(interval_ms, callback));
            }
        }
    }

    /// Cancel the timer task, if any.
    pub fn stop(&mut self) {
        self.stop_task();
        self.callback = None;
    }

    fn stop_task(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    fn spawn(interval_ms: u64, callback: TickFn) -> JoinHandle<()> {
        let period = Duration::from_millis(interval_ms.max(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // interval() completes its first tick immediately; consume it
            // so the first callback lands a full period after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                callback();
            }
        })
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A simulation engine driven by a periodic timer.
///
/// Wraps the engine in a shared handle the presentation layer can read
/// from while the ticker recomputes in the background.
pub struct LiveSimulation {
    engine: Arc<Mutex<SimulationEngine>>,
    ticker: Ticker,
    running: bool,
}

impl LiveSimulation {
    pub fn new(engine: SimulationEngine) -> Self {
        let interval_ms = engine.config().tick_interval_ms;
        Self {
            engine: Arc::new(Mutex::new(engine)),
            ticker: Ticker::new(interval_ms),
            running: false,
        }
    }

    /// Shared engine handle for the presentation layer.
    pub fn engine(&self) -> Arc<Mutex<SimulationEngine>> {
        Arc::clone(&self.engine)
    }

    /// Begin periodic recomputation: one immediate update, then one per
    /// tick interval. Restarting swaps the timer.
    pub fn start(&mut self) {
        let engine = Arc::clone(&self.engine);
        let tick: TickFn = Arc::new(move || {
            if let Ok(mut engine) = engine.lock() {
                engine.update();
            }
        });
        self.ticker.start(tick);
        if let Ok(mut engine) = self.engine.lock() {
            engine.update();
        }
        self.running = true;
        log::info!(
            "live simulation started ({}ms tick)",
            self.ticker.interval_ms()
        );
    }

    /// Stop ticking and publish one final idle-state snapshot.
    pub fn stop(&mut self) {
        self.ticker.stop();
        self.running = false;
        if let Ok(mut engine) = self.engine.lock() {
            engine.update();
        }
        log::info!("live simulation stopped");
    }

    /// Change the tick interval. When running, the previous timer is
    /// cancelled and exactly one new timer is started in its place.
    pub fn set_tick_interval(&mut self, interval_ms: u64) {
        if let Ok(mut engine) = self.engine.lock() {
            engine.set_tick_interval(interval_ms);
        }
        self.ticker.set_interval(interval_ms);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
