//! Frame and timer scheduling for menu animations.
//!
//! Nodes never sleep or spawn timers themselves. They ask a [`Scheduler`] for
//! "the next frame" or "after this delay" and get a [`TaskHandle`] back. The
//! owner of the scheduler (the panel, driven by the UI tick) drains due tasks
//! with [`FrameScheduler::take_due`] and routes each one back to the node that
//! requested it.
//!
//! Time comes from an injected [`Clock`], so tests can step a [`ManualClock`]
//! and observe every intermediate state.

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source measured from an arbitrary origin.
pub trait Clock: Debug {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Opaque identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Runs on the next drained frame.
    Frame,
    /// Runs once its deadline has passed.
    Timeout,
}

/// A task handed back to its owner when it becomes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub handle: TaskHandle,
    /// Index of the node that requested the task.
    pub owner: usize,
    pub kind: TaskKind,
    deadline: Option<Duration>,
}

/// The scheduling surface nodes are written against.
pub trait Scheduler {
    fn now(&self) -> Duration;

    /// Schedules a callback for the next animation frame.
    fn request_frame(&mut self, owner: usize) -> TaskHandle;

    /// Schedules a callback `delay` from now.
    fn set_timeout(&mut self, owner: usize, delay: Duration) -> TaskHandle;

    /// Cancels a pending task. Returns `false` when it already ran or was
    /// cancelled.
    fn cancel(&mut self, handle: TaskHandle) -> bool;
}

/// Queue-based scheduler drained once per UI frame.
#[derive(Debug)]
pub struct FrameScheduler {
    clock: Box<dyn Clock>,
    next_handle: u64,
    queue: Vec<ScheduledTask>,
}

impl FrameScheduler {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            next_handle: 0,
            queue: Vec::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn pending_for(&self, owner: usize) -> usize {
        self.queue.iter().filter(|task| task.owner == owner).count()
    }

    /// Removes and returns the tasks due on this frame.
    ///
    /// Every frame request queued before the call is due. Timeouts are due
    /// once their deadline is not in the future. Frames come first in request
    /// order, then timeouts by deadline. Tasks scheduled while the caller
    /// processes the returned batch wait for the next call.
    pub fn take_due(&mut self) -> Vec<ScheduledTask> {
        let now = self.clock.now();
        let (mut due, pending): (Vec<ScheduledTask>, Vec<ScheduledTask>) =
            self.queue.drain(..).partition(|task| task.deadline.is_none_or(|deadline| deadline <= now));
        self.queue = pending;
        due.sort_by_key(|task| (task.deadline.is_some(), task.deadline, task.handle));
        due
    }

    fn push(&mut self, owner: usize, kind: TaskKind, deadline: Option<Duration>) -> TaskHandle {
        self.next_handle += 1;
        let handle = TaskHandle(self.next_handle);
        self.queue.push(ScheduledTask {
            handle,
            owner,
            kind,
            deadline,
        });
        handle
    }
}

impl Scheduler for FrameScheduler {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn request_frame(&mut self, owner: usize) -> TaskHandle {
        self.push(owner, TaskKind::Frame, None)
    }

    fn set_timeout(&mut self, owner: usize, delay: Duration) -> TaskHandle {
        let deadline = self.clock.now() + delay;
        self.push(owner, TaskKind::Timeout, Some(deadline))
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.queue.len();
        self.queue.retain(|task| task.handle != handle);
        before != self.queue.len()
    }
}
