//! Frame asset preloading: decode plus the settle-counting sequence loader.

/// Image decoding into premultiplied RGBA frames.
pub mod decode;
/// Fetch seam and the settle-counting sequence loader.
pub mod loader;
