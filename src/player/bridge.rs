use crate::foundation::core::FrameIndex;

/// Map a continuous progress value onto a frame index.
///
/// `index = clamp(floor(clamp(p, 0, 1) * (count - 1)), 0, count - 1)`.
/// Out-of-range and NaN input is tolerated via clamping; progress past `1.0`
/// holds the last frame rather than entering any distinct terminal state.
pub fn frame_for_progress(progress: f64, count: u32) -> FrameIndex {
    debug_assert!(count >= 1);
    if count <= 1 {
        return FrameIndex(0);
    }
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let raw = (p * f64::from(count - 1)).floor();
    FrameIndex((raw as u32).min(count - 1))
}

/// A redraw that has been scheduled but not yet executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledRedraw {
    /// Frame the redraw will display.
    pub frame: FrameIndex,
}

/// The "at most one pending redraw" token.
///
/// Scheduling cancels and replaces any existing pending redraw, so a burst of
/// schedule requests within one rendering tick collapses into a single draw
/// bound to the latest frame. The tick drains the token through
/// [`RedrawScheduler::take_due`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RedrawScheduler {
    pending: Option<ScheduledRedraw>,
}

impl RedrawScheduler {
    /// Create a scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending redraw and schedule one for `frame`.
    pub fn schedule(&mut self, frame: FrameIndex) {
        self.cancel();
        self.pending = Some(ScheduledRedraw { frame });
    }

    /// Drop the pending redraw, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Take the single due redraw for execution on this tick.
    pub fn take_due(&mut self) -> Option<ScheduledRedraw> {
        self.pending.take()
    }

    /// Return `true` when a redraw is scheduled but not yet executed.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Bridges the external progress signal to frame indexes and redraw scheduling.
///
/// Every update is evaluated synchronously (the mapping is cheap); the draw
/// itself is deferred to the next tick through the scheduler, bounding draw
/// rate by tick rate independent of input event rate.
#[derive(Clone, Copy, Debug)]
pub struct ProgressBridge {
    count: u32,
    current: FrameIndex,
    scheduler: RedrawScheduler,
}

impl ProgressBridge {
    /// Create a bridge for a sequence of `count` frames, positioned at frame 0.
    pub fn new(count: u32) -> Self {
        Self {
            count,
            current: FrameIndex(0),
            scheduler: RedrawScheduler::new(),
        }
    }

    /// Latest mapped frame index.
    pub fn current_frame(&self) -> FrameIndex {
        self.current
    }

    /// Access the pending-redraw token.
    pub fn scheduler_mut(&mut self) -> &mut RedrawScheduler {
        &mut self.scheduler
    }

    /// Return `true` when a redraw is scheduled but not yet executed.
    pub fn has_pending_redraw(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Consume one progress update: map, record, cancel-and-replace the redraw.
    pub fn on_progress(&mut self, progress: f64) -> FrameIndex {
        self.current = frame_for_progress(progress, self.count);
        self.scheduler.schedule(self.current);
        self.current
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/bridge.rs"]
mod tests;
