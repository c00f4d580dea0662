use crate::foundation::error::{FilmstripError, FilmstripResult};

pub use kurbo::{Rect, Size};

/// Placeholder substituted with the 1-based frame number in asset path templates.
pub const FRAME_PLACEHOLDER: &str = "{frame}";

/// 0-based index into a frame sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

/// Immutable description of a still-image sequence.
///
/// Frames are addressed by a path template containing `{frame}`, substituted with
/// the **1-based** frame number (sequences are conventionally exported as
/// `frames/1.jpg .. frames/N.jpg`).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "FrameSetDef")]
pub struct FrameSet {
    count: u32,
    template: String,
}

/// Raw serde shape for [`FrameSet`]; conversion runs the validated constructor.
#[derive(serde::Deserialize)]
struct FrameSetDef {
    count: u32,
    template: String,
}

impl TryFrom<FrameSetDef> for FrameSet {
    type Error = FilmstripError;

    fn try_from(def: FrameSetDef) -> FilmstripResult<Self> {
        Self::new(def.count, def.template)
    }
}

impl FrameSet {
    /// Create a validated frame set with `count >= 1` and a template containing
    /// the `{frame}` placeholder.
    pub fn new(count: u32, template: impl Into<String>) -> FilmstripResult<Self> {
        let template = template.into();
        if count == 0 {
            return Err(FilmstripError::validation("FrameSet count must be >= 1"));
        }
        if !template.contains(FRAME_PLACEHOLDER) {
            return Err(FilmstripError::validation(format!(
                "FrameSet template must contain '{FRAME_PLACEHOLDER}'"
            )));
        }
        Ok(Self { count, template })
    }

    /// Total frame count `N`.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Index of the last frame, `N - 1`.
    pub fn last_frame(&self) -> FrameIndex {
        FrameIndex(self.count - 1)
    }

    /// Return `true` when `frame` addresses a frame in this set.
    pub fn contains(&self, frame: FrameIndex) -> bool {
        frame.0 < self.count
    }

    /// Resolve the asset path for a 0-based frame index.
    ///
    /// The template placeholder receives the 1-based frame number.
    pub fn asset_path(&self, frame: FrameIndex) -> String {
        self.template
            .replace(FRAME_PLACEHOLDER, &(frame.0 as u64 + 1).to_string())
    }
}

/// Drawing-surface dimensions: logical extent plus the pixel-density ratio that
/// maps it to the physical backing store.
///
/// Geometry is always recomputed wholesale from observed values (never merged
/// with a previous observation), so repeated resizes cannot accumulate drift.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceGeometry {
    /// Logical width in CSS-like units.
    pub logical_width: f64,
    /// Logical height in CSS-like units.
    pub logical_height: f64,
    /// Scale factor from logical units to physical device pixels.
    pub pixel_ratio: f64,
}

impl SurfaceGeometry {
    /// Build geometry from raw observed values.
    ///
    /// Non-finite or non-positive ratios fall back to `1.0` (hosts report the
    /// density as "ratio or nothing"); non-finite or negative logical extents
    /// clamp to zero rather than erroring, since a zero-sized surface is a legal
    /// clear-only target.
    pub fn from_observed(logical_width: f64, logical_height: f64, pixel_ratio: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            logical_width: sanitize(logical_width),
            logical_height: sanitize(logical_height),
            pixel_ratio: ratio,
        }
    }

    /// Logical extent as a [`Size`].
    pub fn logical_size(&self) -> Size {
        Size::new(self.logical_width, self.logical_height)
    }

    /// Physical backing-store width in device pixels.
    pub fn physical_width(&self) -> u32 {
        (self.logical_width * self.pixel_ratio).round() as u32
    }

    /// Physical backing-store height in device pixels.
    pub fn physical_height(&self) -> u32 {
        (self.logical_height * self.pixel_ratio).round() as u32
    }

    /// Return `true` when either extent collapses to zero physical pixels.
    pub fn is_degenerate(&self) -> bool {
        self.physical_width() == 0 || self.physical_height() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
