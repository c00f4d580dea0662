//! Progress-driven playback: mapping, redraw scheduling, the progress signal,
//! and the orchestrating player.

/// Progress-to-frame mapping and redraw scheduling.
pub mod bridge;
/// The orchestrating scrub player.
pub mod player;
/// Single-subscriber progress signal.
pub mod signal;
