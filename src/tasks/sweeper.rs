//! Expiry Sweep Task
//!
//! Dedicated worker thread that runs a sweep closure at a fixed period until
//! it is told to stop.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
struct SweepState {
    stopped: bool,
    finished: bool,
}

/// Stop request and completion notice shared with the worker thread.
#[derive(Debug, Default)]
struct SweepSignal {
    state: Mutex<SweepState>,
    changed: Condvar,
}

impl SweepSignal {
    /// Sleeps until the next tick is due. Returns true if a stop was requested.
    fn wait_for_tick(&self, period: Duration) -> bool {
        // A period past the end of the clock never ticks.
        let deadline = Instant::now().checked_add(period);
        let mut state = self.state.lock();
        while !state.stopped {
            match deadline {
                Some(deadline) => {
                    if self.changed.wait_until(&mut state, deadline).timed_out() {
                        return state.stopped;
                    }
                }
                None => self.changed.wait(&mut state),
            }
        }
        true
    }

    fn request_stop(&self) {
        self.state.lock().stopped = true;
        self.changed.notify_all();
    }

    /// Waits until the worker has exited or `grace` has elapsed.
    fn wait_finished(&self, grace: Duration) -> bool {
        let deadline = Instant::now().checked_add(grace);
        let mut state = self.state.lock();
        while !state.finished {
            match deadline {
                Some(deadline) => {
                    if self.changed.wait_until(&mut state, deadline).timed_out() {
                        break;
                    }
                }
                None => self.changed.wait(&mut state),
            }
        }
        state.finished
    }
}

/// Marks the worker finished however its loop ends.
struct FinishGuard(Arc<SweepSignal>);

impl Drop for FinishGuard {
    fn drop(&mut self) {
        self.0.state.lock().finished = true;
        self.0.changed.notify_all();
    }
}

// == Sweeper ==
/// Handle to a running sweep worker.
#[derive(Debug)]
pub struct Sweeper {
    handle: Option<JoinHandle<()>>,
    signal: Arc<SweepSignal>,
    period: Duration,
}

impl Sweeper {
    /// Interval between sweeps.
    pub fn period(&self) -> Duration {
        self.period
    }

    // == Stop ==
    /// Asks the worker to exit and waits up to `grace` for it.
    ///
    /// A worker still inside a sweep when the grace period runs out is
    /// detached; it exits on its own once that sweep returns. Returns whether
    /// the worker finished within the grace period.
    pub fn stop(mut self, grace: Duration) -> bool {
        self.shutdown(grace)
    }

    fn shutdown(&mut self, grace: Duration) -> bool {
        let Some(handle) = self.handle.take() else {
            return true;
        };

        self.signal.request_stop();

        if self.signal.wait_finished(grace) {
            if handle.join().is_err() {
                error!("Sweep worker terminated with a panic");
            }
            true
        } else {
            warn!(
                grace_ms = grace.as_millis() as u64,
                "Sweep worker did not finish within grace period, detaching it"
            );
            false
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.shutdown(Duration::ZERO);
    }
}

/// Spawns a thread that calls `sweep` every `period` until stopped.
///
/// A panic escaping `sweep` is logged and the next tick still runs, so one
/// failed cycle never ends maintenance.
///
/// # Example
/// ```ignore
/// let sweeper = spawn_sweeper(Duration::from_secs(60), move || {
///     registry.sweep(SweepScope::Scheduled);
/// })?;
/// // Later, during shutdown:
/// sweeper.stop(Duration::from_secs(5));
/// ```
pub fn spawn_sweeper<F>(period: Duration, sweep: F) -> io::Result<Sweeper>
where
    F: Fn() + Send + 'static,
{
    let signal = Arc::new(SweepSignal::default());
    let worker_signal = signal.clone();

    let handle = thread::Builder::new()
        .name("cache-sweeper".to_string())
        .spawn(move || {
            let _finished = FinishGuard(worker_signal.clone());
            info!(
                period_ms = period.as_millis() as u64,
                "Starting cache expiry sweeper"
            );

            while !worker_signal.wait_for_tick(period) {
                if panic::catch_unwind(AssertUnwindSafe(&sweep)).is_err() {
                    error!("Sweep cycle panicked, next cycle remains scheduled");
                }
            }

            debug!("Cache expiry sweeper exiting");
        })?;

    Ok(Sweeper {
        handle: Some(handle),
        signal,
        period,
    })
}
