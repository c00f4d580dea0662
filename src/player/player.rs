use std::cell::RefCell;
use std::rc::Rc;

use crate::assets::loader::{FrameFetcher, SequenceLoader};
use crate::foundation::core::{FrameIndex, FrameSet};
use crate::foundation::error::FilmstripResult;
use crate::player::bridge::ProgressBridge;
use crate::player::signal::{ProgressSignal, ProgressSubscription};
use crate::render::compositor::draw_frame;
use crate::render::surface::{DrawSurface, SurfaceSizer};

/// Scroll-synchronized frame player.
///
/// Composes the sequence loader, the surface sizer, and the progress bridge,
/// and owns the only mutable cross-cutting state. Hosts drive it with four
/// event kinds, all on one thread:
///
/// - [`ScrubPlayer::on_progress`] for every progress update (cheap, schedules),
/// - [`ScrubPlayer::on_resize`] for layout changes (immediate redraw),
/// - [`ScrubPlayer::on_tick`] once per rendering tick (executes at most one
///   redraw and consolidates load completions),
/// - [`ScrubPlayer::unmount`] / drop for teardown.
///
/// Drawing is gated on loader state per frame: pending or failed frames render
/// as a clear, never as garbage.
#[derive(Debug)]
pub struct ScrubPlayer<S: DrawSurface> {
    loader: SequenceLoader,
    sizer: SurfaceSizer,
    bridge: ProgressBridge,
    surface: Option<S>,
}

impl<S: DrawSurface> ScrubPlayer<S> {
    /// Create an unmounted player for `frames`. Loader first, bridge second;
    /// no draw happens before a surface is mounted.
    pub fn new(frames: FrameSet) -> Self {
        let count = frames.count();
        Self {
            loader: SequenceLoader::new(frames),
            sizer: SurfaceSizer::new(),
            bridge: ProgressBridge::new(count),
            surface: None,
        }
    }

    /// Issue the load of every frame through `fetcher`.
    pub fn start(&mut self, fetcher: &mut dyn FrameFetcher) -> FilmstripResult<()> {
        self.loader.begin_loading(fetcher)
    }

    /// Acquire `surface`, size it to the observed viewport, and paint once.
    pub fn mount(&mut self, mut surface: S, logical_width: f64, logical_height: f64, ratio: f64) {
        let geometry = self.sizer.resize(logical_width, logical_height, ratio);
        surface.set_backing_size(geometry);
        self.surface = Some(surface);
        self.redraw_now();
    }

    /// Release the surface, cancelling any pending scheduled redraw.
    ///
    /// Idempotent: returns `None` when already unmounted. Outstanding loads are
    /// abandoned, not cancelled: their completions settle into the loader but
    /// can no longer produce a draw.
    pub fn unmount(&mut self) -> Option<S> {
        self.bridge.scheduler_mut().cancel();
        self.surface.take()
    }

    /// `true` once every frame's load attempt has settled.
    pub fn is_ready(&self) -> bool {
        self.loader.is_ready()
    }

    /// Latest frame index mapped from the progress signal.
    pub fn current_frame(&self) -> FrameIndex {
        self.bridge.current_frame()
    }

    /// Loader access for readiness details.
    pub fn loader(&self) -> &SequenceLoader {
        &self.loader
    }

    /// Mounted surface, if any.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Consume one progress update: map to a frame index and schedule (not
    /// execute) a redraw. A burst of updates within one tick coalesces into a
    /// single draw bound to the last value.
    pub fn on_progress(&mut self, progress: f64) {
        self.bridge.on_progress(progress);
    }

    /// Recompute geometry from freshly observed viewport values and repaint.
    ///
    /// No-op while unmounted (missing drawing context is not an error). The
    /// immediate repaint supersedes any pending scheduled redraw.
    pub fn on_resize(&mut self, logical_width: f64, logical_height: f64, ratio: f64) {
        if self.surface.is_none() {
            return;
        }
        let geometry = self.sizer.resize(logical_width, logical_height, ratio);
        if let Some(surface) = self.surface.as_mut() {
            surface.set_backing_size(geometry);
        }
        self.bridge.scheduler_mut().cancel();
        self.redraw_now();
    }

    /// Run one rendering tick.
    ///
    /// Consolidates asset-load completions first; a `Loading -> Ready`
    /// transition repaints immediately so late-arriving readiness does not wait
    /// for the next progress event. Otherwise at most the single pending
    /// scheduled redraw executes.
    pub fn on_tick(&mut self) {
        let became_ready = self.loader.pump();
        if became_ready {
            // The pending redraw (if any) is bound to the same current index;
            // the readiness repaint supersedes it.
            self.bridge.scheduler_mut().cancel();
            self.redraw_now();
            return;
        }
        if let Some(due) = self.bridge.scheduler_mut().take_due() {
            self.draw(due.frame);
        }
    }

    fn redraw_now(&mut self) {
        self.draw(self.bridge.current_frame());
    }

    fn draw(&mut self, frame: FrameIndex) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Some(geometry) = self.sizer.geometry() else {
            return;
        };
        draw_frame(surface, geometry, self.loader.frame(frame));
    }
}

/// Subscribe a shared player to `signal`.
///
/// Each published progress value forwards into
/// [`ScrubPlayer::on_progress`]. Dropping the returned guard (or the player
/// itself) tears the subscription down without leaks.
pub fn subscribe_player<S: DrawSurface + 'static>(
    signal: &mut ProgressSignal,
    player: Rc<RefCell<ScrubPlayer<S>>>,
) -> ProgressSubscription {
    signal.subscribe(move |progress| {
        player.borrow_mut().on_progress(progress);
    })
}

#[cfg(test)]
#[path = "../../tests/unit/player/player.rs"]
mod tests;
