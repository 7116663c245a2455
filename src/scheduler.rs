// Frame Scheduler - Drives periodic ticks for a host rendering surface
// Replaces animation-frame recursion with an injected scheduling interface

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// ~60 FPS
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub type TickFn = Box<dyn FnMut() + Send + 'static>;

// =============================================================================
// CANCEL HANDLE
// =============================================================================

/// Stops further ticks of a scheduled callback. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<RwLock<bool>>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        *self.cancelled.write() = true;
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.read()
    }
}

pub trait Scheduler {
    /// Run `tick` once per frame until the returned handle is cancelled
    fn schedule(&self, tick: TickFn) -> CancelHandle;
}

// =============================================================================
// FRAME SCHEDULER (background thread)
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct FrameScheduler {
    frame_interval: Duration,
}

impl FrameScheduler {
    pub fn new(frame_interval: Duration) -> Self {
        Self { frame_interval }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl Scheduler for FrameScheduler {
    fn schedule(&self, mut tick: TickFn) -> CancelHandle {
        let handle = CancelHandle::new();
        let loop_handle = handle.clone();
        let target_frame_time = self.frame_interval;

        thread::spawn(move || {
            log::debug!(
                "event=frame_loop_start interval_ms={}",
                target_frame_time.as_millis()
            );
            loop {
                let start = Instant::now();

                if loop_handle.is_cancelled() {
                    break;
                }
                tick();

                // Sleep to maintain frame rate
                let elapsed = start.elapsed();
                if elapsed < target_frame_time {
                    thread::sleep(target_frame_time - elapsed);
                }
            }
            log::debug!("event=frame_loop_stop");
        });

        handle
    }
}

// =============================================================================
// MANUAL SCHEDULER (caller-driven)
// =============================================================================

/// Ticks only when the caller advances it. For headless hosts and tests.
#[derive(Default)]
pub struct ManualScheduler {
    tasks: Mutex<Vec<(CancelHandle, TickFn)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `frames` frames of every live callback; returns the number of ticks run.
    /// Callbacks may schedule on this scheduler; new tasks join from the next frame.
    pub fn advance(&self, frames: usize) -> usize {
        let mut ran = 0;
        for _ in 0..frames {
            // Ticks run unlocked so they can call back into `schedule`
            let mut running = std::mem::take(&mut *self.tasks.lock());
            running.retain(|(handle, _)| !handle.is_cancelled());

            for (handle, tick) in running.iter_mut() {
                if !handle.is_cancelled() {
                    tick();
                    ran += 1;
                }
            }

            let mut tasks = self.tasks.lock();
            let added = std::mem::replace(&mut *tasks, running);
            tasks.extend(added);
        }
        self.tasks.lock().retain(|(handle, _)| !handle.is_cancelled());
        ran
    }

    /// Callbacks that have not been cancelled
    pub fn live_tasks(&self) -> usize {
        self.tasks
            .lock()
            .iter()
            .filter(|(handle, _)| !handle.is_cancelled())
            .count()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, tick: TickFn) -> CancelHandle {
        let handle = CancelHandle::new();
        self.tasks.lock().push((handle.clone(), tick));
        handle
    }
}
