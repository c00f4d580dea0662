//! Drawing-surface seam, the CPU pixel surface, and aspect-fit composition.

/// Aspect-fit placement and the clear-then-draw compositing step.
pub mod compositor;
/// Drawing-surface trait, sizing, and the CPU pixel surface.
pub mod surface;
