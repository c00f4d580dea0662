use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context;

use crate::assets::decode::{PreparedFrame, decode_image};
use crate::foundation::core::{FrameIndex, FrameSet};
use crate::foundation::error::{FilmstripError, FilmstripResult};

/// Result of a single frame load attempt.
#[derive(Clone, Debug)]
pub enum LoadOutcome {
    /// The asset decoded into a drawable frame.
    Loaded(PreparedFrame),
    /// The load or decode failed; the frame will render as a skip.
    Failed(String),
}

/// Settled completion for one frame, delivered back to the loader.
#[derive(Clone, Debug)]
pub struct LoadCompletion {
    /// Frame the completion settles.
    pub frame: FrameIndex,
    /// Load outcome.
    pub outcome: LoadOutcome,
}

/// One-shot settle channel handed to a [`FrameFetcher`] per frame.
///
/// Settling after the owning loader is gone is silently discarded, so a late
/// completion can never mutate freed state.
#[derive(Clone, Debug)]
pub struct CompletionSender {
    tx: mpsc::Sender<LoadCompletion>,
}

impl CompletionSender {
    /// Deliver the load outcome for `frame`.
    pub fn settle(self, frame: FrameIndex, outcome: LoadOutcome) {
        let _ = self.tx.send(LoadCompletion { frame, outcome });
    }
}

/// Host seam for issuing asynchronous frame loads.
///
/// `fetch` must not block the caller on the load itself; the host settles the
/// sender whenever the load finishes, in any order. Each frame gets exactly one
/// fetch; the loader performs no retries.
pub trait FrameFetcher {
    /// Begin loading the asset at `path` for `frame`.
    fn fetch(&mut self, frame: FrameIndex, path: &str, completion: CompletionSender);
}

/// Load-attempt state of a single frame record.
///
/// Records transition exactly once away from [`FrameLoadState::Pending`] and
/// never revert.
#[derive(Clone, Debug)]
pub enum FrameLoadState {
    /// Load issued (or not yet issued), no outcome so far.
    Pending,
    /// Decoded and drawable.
    Loaded(PreparedFrame),
    /// Settled unsuccessfully; carries the reason for diagnostics only.
    Failed(String),
}

impl FrameLoadState {
    fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Loader lifecycle phase.
///
/// `Idle -> Loading` on [`SequenceLoader::begin_loading`], `Loading -> Ready`
/// once every record has settled. `Ready` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderPhase {
    /// Constructed, loads not yet issued.
    Idle,
    /// Loads issued, at least one record still pending.
    Loading,
    /// Every load attempt settled (successfully or not).
    Ready,
}

/// Preloader for a whole [`FrameSet`].
///
/// Issues one fetch per frame and consolidates completions into per-frame
/// records plus a settled count. Readiness means "every attempt settled", not
/// "every attempt succeeded": failed frames are skipped at draw time instead of
/// failing the sequence.
#[derive(Debug)]
pub struct SequenceLoader {
    frames: FrameSet,
    records: Vec<FrameLoadState>,
    settled: usize,
    phase: LoaderPhase,
    rx: mpsc::Receiver<LoadCompletion>,
    tx: Option<mpsc::Sender<LoadCompletion>>,
}

impl SequenceLoader {
    /// Create an idle loader with one pending record per frame.
    pub fn new(frames: FrameSet) -> Self {
        let (tx, rx) = mpsc::channel();
        let records = vec![FrameLoadState::Pending; frames.count() as usize];
        Self {
            frames,
            records,
            settled: 0,
            phase: LoaderPhase::Idle,
            rx,
            tx: Some(tx),
        }
    }

    /// Frame set this loader serves.
    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    /// Return `true` once every load attempt has settled. Monotonic.
    pub fn is_ready(&self) -> bool {
        self.phase == LoaderPhase::Ready
    }

    /// Number of records that have left `Pending`.
    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Issue one fetch per frame, transitioning `Idle -> Loading`.
    ///
    /// Calling this twice on the same loader is a validation error; the single
    /// attempt per frame is the full contract.
    #[tracing::instrument(skip(self, fetcher), fields(count = self.frames.count()))]
    pub fn begin_loading(&mut self, fetcher: &mut dyn FrameFetcher) -> FilmstripResult<()> {
        if self.phase != LoaderPhase::Idle {
            return Err(FilmstripError::validation(
                "begin_loading may only be called once per loader",
            ));
        }
        let tx = self
            .tx
            .take()
            .ok_or_else(|| FilmstripError::validation("loader completion channel missing"))?;

        self.phase = LoaderPhase::Loading;
        for i in 0..self.frames.count() {
            let frame = FrameIndex(i);
            let path = self.frames.asset_path(frame);
            fetcher.fetch(frame, &path, CompletionSender { tx: tx.clone() });
        }
        // `tx` drops here: once every fetcher-held sender is gone the channel
        // disconnects and `pump` stops seeing traffic.
        Ok(())
    }

    /// Drain queued completions into the records.
    ///
    /// Returns `true` exactly once: on the call where the last record settles
    /// and the loader transitions `Loading -> Ready`.
    pub fn pump(&mut self) -> bool {
        if self.phase != LoaderPhase::Loading {
            // Drain and discard: completions cannot mutate a loader that is
            // idle or already terminal.
            while self.rx.try_recv().is_ok() {}
            return false;
        }

        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
        }

        if self.settled == self.records.len() {
            self.phase = LoaderPhase::Ready;
            tracing::debug!(settled = self.settled, "frame sequence ready");
            return true;
        }
        false
    }

    /// Decoded frame for `frame`, if its record is `Loaded`.
    pub fn frame(&self, frame: FrameIndex) -> Option<&PreparedFrame> {
        match self.records.get(frame.0 as usize) {
            Some(FrameLoadState::Loaded(prepared)) => Some(prepared),
            _ => None,
        }
    }

    /// Load record for `frame`; out-of-range indexes read as `Pending`.
    pub fn record(&self, frame: FrameIndex) -> &FrameLoadState {
        static PENDING: FrameLoadState = FrameLoadState::Pending;
        self.records.get(frame.0 as usize).unwrap_or(&PENDING)
    }

    fn apply(&mut self, completion: LoadCompletion) {
        let Some(record) = self.records.get_mut(completion.frame.0 as usize) else {
            tracing::trace!(frame = completion.frame.0, "completion for unknown frame");
            return;
        };
        if !record.is_pending() {
            // Records settle exactly once; duplicates are dropped.
            return;
        }
        *record = match completion.outcome {
            LoadOutcome::Loaded(prepared) => FrameLoadState::Loaded(prepared),
            LoadOutcome::Failed(reason) => {
                tracing::trace!(frame = completion.frame.0, %reason, "frame load failed");
                FrameLoadState::Failed(reason)
            }
        };
        self.settled += 1;
    }
}

/// Filesystem fetcher: reads `root/<path>` and decodes it on the spot.
///
/// Completion is synchronous (the sender is settled before `fetch` returns),
/// which is the degenerate-but-legal case of the fetch contract. Hosts with a
/// real async source keep the sender and settle later.
#[derive(Clone, Debug)]
pub struct FsFrameFetcher {
    root: PathBuf,
}

impl FsFrameFetcher {
    /// Create a fetcher rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn load(&self, path: &str) -> FilmstripResult<PreparedFrame> {
        let full = self.root.join(path);
        let bytes = std::fs::read(&full)
            .with_context(|| format!("read frame asset '{}'", full.display()))?;
        decode_image(&bytes)
    }
}

impl FrameFetcher for FsFrameFetcher {
    fn fetch(&mut self, frame: FrameIndex, path: &str, completion: CompletionSender) {
        match self.load(path) {
            Ok(prepared) => completion.settle(frame, LoadOutcome::Loaded(prepared)),
            Err(e) => completion.settle(frame, LoadOutcome::Failed(e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
