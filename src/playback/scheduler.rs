//! Timer abstraction behind the playback controller.
//!
//! A [`Scheduler`] never calls back into the controller.  Each due timer
//! becomes a [`TimerEvent`] that the owner of the controller hands to
//! `on_timer`, so the controller is only touched through `&mut self`.
//!
//! * [`TokioScheduler`] — real timers on the tokio runtime; events arrive on
//!   an unbounded mpsc channel.
//! * [`ManualScheduler`] — a virtual clock for deterministic tests.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

// ---------------------------------------------------------------------------
// Handles and events
// ---------------------------------------------------------------------------

/// Opaque identifier of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// What a timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Emit the next word.
    Tick,
    /// End of the pause after `restart`; start playing.
    RestartGrace,
}

/// A timer came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub handle: TimerHandle,
    pub kind: TimerKind,
}

// ---------------------------------------------------------------------------
// Scheduler trait
// ---------------------------------------------------------------------------

pub trait Scheduler {
    /// Fire every `every`, first after one full interval.
    fn schedule_repeating(&mut self, every: Duration, kind: TimerKind) -> TimerHandle;

    /// Fire once after `after`.
    fn schedule_once(&mut self, after: Duration, kind: TimerKind) -> TimerHandle;

    /// Stop `handle`.  Unknown or already-finished handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

// ---------------------------------------------------------------------------
// TokioScheduler
// ---------------------------------------------------------------------------

/// Spawns one tokio task per timer; `cancel` aborts the task.
///
/// An event sent just before cancellation may still be sitting in the
/// channel; the controller discards events whose handle is no longer live.
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TimerEvent>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Must be called inside a tokio runtime.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (scheduler, rx)
    }

    fn next_handle(&mut self) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id += 1;
        TimerHandle(self.next_id)
    }

    /// Timers that have been scheduled and are neither cancelled nor done.
    pub fn live_timers(&self) -> usize {
        self.tasks.values().filter(|t| !t.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, every: Duration, kind: TimerKind) -> TimerHandle {
        let handle = self.next_handle();
        let tx = self.tx.clone();
        let event = TimerEvent { handle, kind };

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + every, every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        self.tasks.insert(handle, task);
        handle
    }

    fn schedule_once(&mut self, after: Duration, kind: TimerKind) -> TimerHandle {
        let handle = self.next_handle();
        let tx = self.tx.clone();
        let event = TimerEvent { handle, kind };

        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(event);
        });

        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// ManualScheduler
// ---------------------------------------------------------------------------

/// One call made to a [`ManualScheduler`], for asserting on call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCall {
    Repeating(TimerHandle, Duration),
    Once(TimerHandle, Duration),
    Cancel(TimerHandle),
}

#[derive(Debug, Clone, Copy)]
struct ManualTimer {
    handle: TimerHandle,
    kind: TimerKind,
    due: Duration,
    every: Option<Duration>,
}

/// Virtual-clock scheduler.  Time only moves when [`fire_next`] is called.
///
/// [`fire_next`]: ManualScheduler::fire_next
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    timers: Vec<ManualTimer>,
    calls: Vec<SchedulerCall>,
    max_live: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    /// Largest number of simultaneously live timers ever observed.
    pub fn max_live_timers(&self) -> usize {
        self.max_live
    }

    pub fn calls(&self) -> &[SchedulerCall] {
        &self.calls
    }

    /// Advance the clock to the earliest timer due at or before `until` and
    /// return its event.  With nothing due, the clock moves to `until` and
    /// `None` is returned.
    pub fn fire_next(&mut self, until: Duration) -> Option<TimerEvent> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.handle.0))
            .map(|(i, _)| i);

        let Some(pos) = pos else {
            self.now = self.now.max(until);
            return None;
        };

        let ManualTimer {
            handle,
            kind,
            due,
            every,
        } = self.timers[pos];
        self.now = due;
        match every {
            Some(every) => self.timers[pos].due += every,
            None => {
                self.timers.remove(pos);
            }
        }
        Some(TimerEvent { handle, kind })
    }

    fn push(&mut self, kind: TimerKind, after: Duration, every: Option<Duration>) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.timers.push(ManualTimer {
            handle,
            kind,
            due: self.now + after,
            every,
        });
        self.max_live = self.max_live.max(self.timers.len());
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, every: Duration, kind: TimerKind) -> TimerHandle {
        let handle = self.push(kind, every, Some(every));
        self.calls.push(SchedulerCall::Repeating(handle, every));
        handle
    }

    fn schedule_once(&mut self, after: Duration, kind: TimerKind) -> TimerHandle {
        let handle = self.push(kind, after, None);
        self.calls.push(SchedulerCall::Once(handle, after));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
        self.calls.push(SchedulerCall::Cancel(handle));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
