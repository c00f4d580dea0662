//! Filmstrip renders a "scrubbable" cinematic sequence: an externally driven
//! progress value in `[0,1]` (typically page scroll) selects one frame out of a
//! pre-loaded still-image sequence, which is composited aspect-preservingly
//! onto a 2D pixel surface: the illusion of a scroll-controlled video.
//!
//! The public API is player-oriented:
//!
//! - Describe the sequence with a [`FrameSet`]
//! - Create a [`ScrubPlayer`], [`mount`](ScrubPlayer::mount) a surface, and
//!   [`start`](ScrubPlayer::start) preloading through a [`FrameFetcher`]
//! - Feed it progress updates and call [`on_tick`](ScrubPlayer::on_tick) once
//!   per rendering tick; redraws coalesce to at most one per tick
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame asset preloading (decode + settle-counting loader).
pub mod assets;
/// Progress bridging, the progress signal, and the orchestrating player.
pub mod player;
/// Drawing-surface seam and aspect-fit composition.
pub mod render;

pub use crate::foundation::core::{FRAME_PLACEHOLDER, FrameIndex, FrameSet, SurfaceGeometry};
pub use crate::foundation::error::{FilmstripError, FilmstripResult};

pub use crate::assets::decode::{PreparedFrame, decode_image};
pub use crate::assets::loader::{
    CompletionSender, FrameFetcher, FrameLoadState, FsFrameFetcher, LoadCompletion, LoadOutcome,
    LoaderPhase, SequenceLoader,
};
pub use crate::player::bridge::{
    ProgressBridge, RedrawScheduler, ScheduledRedraw, frame_for_progress,
};
pub use crate::player::player::{ScrubPlayer, subscribe_player};
pub use crate::player::signal::{ProgressSignal, ProgressSubscription};
pub use crate::render::compositor::{contain_placement, draw_frame};
pub use crate::render::surface::{DrawSurface, PixelSurface, SurfaceSizer};
