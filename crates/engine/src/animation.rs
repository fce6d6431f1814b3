//! Measured height animation for collapsible menu bodies.
//!
//! A body cannot be animated straight to or from its intrinsic height, so
//! every transition goes through a concrete snapshot:
//!
//! ```text
//! open:  Closed ─▶ OpeningMeasured{full} ──frame──▶ OpeningAnimating{full} ──settle──▶ Open
//!        height:   0                               full                              auto
//! close: Open ─▶ ClosingMeasured{from} ──frame──▶ ClosingAnimating ──settle──▶ Closed
//!        height:  from                           0                           0
//! ```
//!
//! [`HeightAnimation`] owns the committed height value and the pending
//! scheduler tasks. [`HeightTween`] turns committed values into the row count
//! actually drawn on a given frame.

use std::time::Duration;

use tracing::{debug, trace};

use crate::schedule::{ScheduledTask, Scheduler, TaskHandle, TaskKind};

/// Committed height of a collapsible body, in terminal rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightValue {
    Px(u16),
    /// Follow the content's intrinsic height.
    Auto,
}

impl Default for HeightValue {
    fn default() -> Self {
        Self::Px(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Closed,
    OpeningMeasured {
        full: u16,
    },
    OpeningAnimating {
        full: u16,
    },
    Open,
    ClosingMeasured {
        from: u16,
    },
    ClosingAnimating,
}

impl AnimationPhase {
    pub fn is_closing(&self) -> bool {
        matches!(self, Self::ClosingMeasured { .. } | Self::ClosingAnimating)
    }
}

/// Layout measurements of a body at the moment a transition starts.
pub trait ContentMeasure {
    /// Height the content needs to be fully visible.
    fn scroll_height(&self) -> u16;
    /// Height the body occupies right now.
    fn rendered_height(&self) -> u16;
}

/// Fixed measurements, handy for hosts that lay content out themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedMeasure {
    pub scroll_height: u16,
    pub rendered_height: u16,
}

impl ContentMeasure for FixedMeasure {
    fn scroll_height(&self) -> u16 {
        self.scroll_height
    }

    fn rendered_height(&self) -> u16 {
        self.rendered_height
    }
}

/// Interpolates the drawn height toward the committed value.
///
/// Moving to a concrete value eases over the transition duration. Moving to
/// [`HeightValue::Auto`] snaps, matching how a height transition behaves when
/// its end value is not a length.
#[derive(Debug, Clone, Copy)]
pub struct HeightTween {
    from: f32,
    target: HeightValue,
    started: Duration,
    duration: Duration,
}

impl HeightTween {
    pub fn new(duration: Duration) -> Self {
        Self {
            from: 0.0,
            target: HeightValue::Px(0),
            started: Duration::ZERO,
            duration,
        }
    }

    pub fn target(&self) -> HeightValue {
        self.target
    }

    pub fn retarget(&mut self, target: HeightValue, now: Duration, intrinsic: u16) {
        self.from = self.sample(now, intrinsic);
        self.target = target;
        self.started = now;
    }

    /// Rows drawn at `now` for content of `intrinsic` rows.
    pub fn displayed(&self, now: Duration, intrinsic: u16) -> u16 {
        self.sample(now, intrinsic).round().clamp(0.0, f32::from(u16::MAX)) as u16
    }

    pub fn is_running(&self, now: Duration) -> bool {
        matches!(self.target, HeightValue::Px(_)) && self.progress(now) < 1.0
    }

    fn sample(&self, now: Duration, intrinsic: u16) -> f32 {
        match self.target {
            HeightValue::Auto => f32::from(intrinsic),
            HeightValue::Px(to) => {
                let eased = ease_in_out(self.progress(now));
                self.from + (f32::from(to) - self.from) * eased
            }
        }
    }

    fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

// Smoothstep; close enough to the usual ease-in-out curve at row resolution.
fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Two-phase open/close state machine for one node's body.
#[derive(Debug, Clone)]
pub struct HeightAnimation {
    owner: usize,
    settle_delay: Duration,
    phase: AnimationPhase,
    height: HeightValue,
    pending_frame: Option<TaskHandle>,
    pending_settle: Option<TaskHandle>,
    tween: HeightTween,
}

impl HeightAnimation {
    /// `settle_delay` doubles as the tween duration.
    pub fn new(owner: usize, settle_delay: Duration) -> Self {
        Self {
            owner,
            settle_delay,
            phase: AnimationPhase::Closed,
            height: HeightValue::Px(0),
            pending_frame: None,
            pending_settle: None,
            tween: HeightTween::new(settle_delay),
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn height(&self) -> HeightValue {
        self.height
    }

    pub fn has_pending(&self) -> bool {
        self.pending_frame.is_some() || self.pending_settle.is_some()
    }

    /// `true` while a task is queued or the drawn height is still moving.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.has_pending() || self.tween.is_running(now)
    }

    pub fn displayed_rows(&self, now: Duration, intrinsic: u16) -> u16 {
        self.tween.displayed(now, intrinsic)
    }

    /// Enters the opening path: measure, commit `0`, then grow on the next
    /// frame and settle to `Auto` after the delay.
    pub fn open(&mut self, measure: &dyn ContentMeasure, scheduler: &mut dyn Scheduler) {
        self.cancel_pending(scheduler);
        let full = measure.scroll_height();
        self.commit(HeightValue::Px(0), scheduler.now(), full);
        self.phase = AnimationPhase::OpeningMeasured { full };
        self.pending_frame = Some(scheduler.request_frame(self.owner));
        self.pending_settle = Some(scheduler.set_timeout(self.owner, self.settle_delay));
        debug!(owner = self.owner, full, "opening");
    }

    /// Enters the closing path: freeze `Auto` to the rendered height, then
    /// shrink to `0` on the next frame.
    pub fn close(&mut self, measure: &dyn ContentMeasure, scheduler: &mut dyn Scheduler) {
        self.cancel_pending(scheduler);
        let from = match self.height {
            HeightValue::Auto => measure.rendered_height(),
            HeightValue::Px(rows) => rows,
        };
        self.commit(HeightValue::Px(from), scheduler.now(), measure.scroll_height());
        self.phase = AnimationPhase::ClosingMeasured { from };
        self.pending_frame = Some(scheduler.request_frame(self.owner));
        debug!(owner = self.owner, from, "closing");
    }

    /// Applies a due task. Returns `true` when the committed height or the
    /// phase changed. Tasks this animation no longer waits for are ignored.
    pub fn on_task(&mut self, task: &ScheduledTask, measure: &dyn ContentMeasure, scheduler: &mut dyn Scheduler) -> bool {
        let now = scheduler.now();
        let intrinsic = measure.scroll_height();
        match task.kind {
            TaskKind::Frame => {
                if self.pending_frame != Some(task.handle) {
                    trace!(owner = self.owner, handle = ?task.handle, "dropping stale frame");
                    return false;
                }
                self.pending_frame = None;
                match self.phase {
                    AnimationPhase::OpeningMeasured { full } => {
                        self.commit(HeightValue::Px(full), now, intrinsic);
                        self.phase = AnimationPhase::OpeningAnimating { full };
                        true
                    }
                    AnimationPhase::ClosingMeasured { .. } => {
                        self.commit(HeightValue::Px(0), now, intrinsic);
                        self.phase = AnimationPhase::ClosingAnimating;
                        self.pending_settle = Some(scheduler.set_timeout(self.owner, self.settle_delay));
                        true
                    }
                    _ => false,
                }
            }
            TaskKind::Timeout => {
                if self.pending_settle != Some(task.handle) {
                    trace!(owner = self.owner, handle = ?task.handle, "dropping stale settle timer");
                    return false;
                }
                self.pending_settle = None;
                match self.phase {
                    AnimationPhase::OpeningMeasured { .. } | AnimationPhase::OpeningAnimating { .. } => {
                        // A frame that never arrived is pointless once settled.
                        if let Some(frame) = self.pending_frame.take() {
                            scheduler.cancel(frame);
                        }
                        self.commit(HeightValue::Auto, now, intrinsic);
                        self.phase = AnimationPhase::Open;
                        debug!(owner = self.owner, "open settled");
                        true
                    }
                    AnimationPhase::ClosingAnimating => {
                        self.phase = AnimationPhase::Closed;
                        debug!(owner = self.owner, "closed settled");
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    /// Cancels every queued task; used on supersede and on disposal.
    pub fn cancel_pending(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(frame) = self.pending_frame.take() {
            scheduler.cancel(frame);
        }
        if let Some(settle) = self.pending_settle.take() {
            scheduler.cancel(settle);
        }
    }

    fn commit(&mut self, height: HeightValue, now: Duration, intrinsic: u16) {
        self.height = height;
        self.tween.retarget(height, now, intrinsic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{FrameScheduler, ManualClock};

    const SETTLE: Duration = Duration::from_millis(300);

    fn measure(rows: u16) -> FixedMeasure {
        FixedMeasure {
            scroll_height: rows,
            rendered_height: rows,
        }
    }

    fn drain(animation: &mut HeightAnimation, scheduler: &mut FrameScheduler, rows: u16) -> Vec<HeightValue> {
        let mut seen = Vec::new();
        for task in scheduler.take_due() {
            if animation.on_task(&task, &measure(rows), scheduler) {
                seen.push(animation.height());
            }
        }
        seen
    }

    #[test]
    fn open_goes_zero_full_auto() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let mut animation = HeightAnimation::new(0, SETTLE);

        animation.open(&measure(5), &mut scheduler);
        assert_eq!(animation.height(), HeightValue::Px(0));
        assert_eq!(animation.phase(), AnimationPhase::OpeningMeasured { full: 5 });

        assert_eq!(drain(&mut animation, &mut scheduler, 5), vec![HeightValue::Px(5)]);
        assert_eq!(animation.phase(), AnimationPhase::OpeningAnimating { full: 5 });

        clock.advance(SETTLE);
        assert_eq!(drain(&mut animation, &mut scheduler, 5), vec![HeightValue::Auto]);
        assert_eq!(animation.phase(), AnimationPhase::Open);
        assert!(!animation.has_pending());
    }

    #[test]
    fn close_from_rest_freezes_then_collapses() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let mut animation = HeightAnimation::new(0, SETTLE);
        animation.open(&measure(4), &mut scheduler);
        drain(&mut animation, &mut scheduler, 4);
        clock.advance(SETTLE);
        drain(&mut animation, &mut scheduler, 4);
        assert_eq!(animation.height(), HeightValue::Auto);

        animation.close(&measure(4), &mut scheduler);
        assert_eq!(animation.height(), HeightValue::Px(4));
        assert_eq!(drain(&mut animation, &mut scheduler, 4), vec![HeightValue::Px(0)]);
        assert_eq!(animation.phase(), AnimationPhase::ClosingAnimating);

        clock.advance(SETTLE);
        drain(&mut animation, &mut scheduler, 4);
        assert_eq!(animation.phase(), AnimationPhase::Closed);
        assert_eq!(animation.height(), HeightValue::Px(0));
    }

    #[test]
    fn closing_mid_open_cancels_the_settle_timer() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let mut animation = HeightAnimation::new(7, SETTLE);
        animation.open(&measure(6), &mut scheduler);
        drain(&mut animation, &mut scheduler, 6);

        clock.advance(Duration::from_millis(100));
        animation.close(&measure(6), &mut scheduler);
        drain(&mut animation, &mut scheduler, 6);

        clock.advance(SETTLE * 2);
        drain(&mut animation, &mut scheduler, 6);
        assert_eq!(animation.height(), HeightValue::Px(0));
        assert_eq!(animation.phase(), AnimationPhase::Closed);
        assert_eq!(scheduler.pending_for(7), 0);
    }

    #[test]
    fn tasks_from_a_superseded_transition_are_ignored() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let mut animation = HeightAnimation::new(0, SETTLE);
        animation.open(&measure(3), &mut scheduler);
        let stale = scheduler.take_due();

        animation.close(&measure(3), &mut scheduler);
        for task in &stale {
            assert!(!animation.on_task(task, &measure(3), &mut scheduler));
        }
        assert_eq!(animation.phase(), AnimationPhase::ClosingMeasured { from: 0 });
    }

    #[test]
    fn tween_eases_toward_concrete_targets_and_snaps_to_auto() {
        let mut tween = HeightTween::new(SETTLE);
        tween.retarget(HeightValue::Px(10), Duration::ZERO, 10);
        assert_eq!(tween.displayed(Duration::ZERO, 10), 0);
        assert_eq!(tween.displayed(Duration::from_millis(150), 10), 5);
        assert_eq!(tween.displayed(SETTLE, 10), 10);
        assert!(tween.is_running(Duration::from_millis(299)));
        assert!(!tween.is_running(SETTLE));

        tween.retarget(HeightValue::Auto, SETTLE, 12);
        assert_eq!(tween.displayed(SETTLE, 12), 12);
        assert!(!tween.is_running(SETTLE));
    }
}
