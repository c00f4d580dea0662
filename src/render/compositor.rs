use crate::assets::decode::PreparedFrame;
use crate::foundation::core::{Rect, Size, SurfaceGeometry};
use crate::render::surface::DrawSurface;

/// Resolve the centered "contain" placement of a `frame_w x frame_h` image
/// inside `area` (logical units).
///
/// The image is scaled to fit fully inside the area without cropping or
/// distortion; the uncovered axis letterboxes implicitly. Returns `None` when
/// either the image or the area has a non-drawable extent.
pub fn contain_placement(frame_w: u32, frame_h: u32, area: Size) -> Option<Rect> {
    if frame_w == 0 || frame_h == 0 {
        return None;
    }
    if !(area.width > 0.0) || !(area.height > 0.0) {
        return None;
    }

    let frame_aspect = frame_w as f64 / frame_h as f64;
    let area_aspect = area.width / area.height;

    let (draw_w, draw_h) = if frame_aspect > area_aspect {
        // Image is wider than the surface: fit to width.
        (area.width, area.width / frame_aspect)
    } else {
        // Image is taller (or equal): fit to height.
        (area.height * frame_aspect, area.height)
    };

    let x = (area.width - draw_w) / 2.0;
    let y = (area.height - draw_h) / 2.0;
    Some(Rect::new(x, y, x + draw_w, y + draw_h))
}

/// Clear the surface and composite `frame` at its contain placement.
///
/// The clear is unconditional so stale pixels from a previous frame never
/// persist beneath a skipped draw. Passing `None` (frame pending or failed) or a
/// zero-dimension frame yields a clear-only call. Never errors.
pub fn draw_frame(
    surface: &mut dyn DrawSurface,
    geometry: SurfaceGeometry,
    frame: Option<&PreparedFrame>,
) {
    surface.clear();

    let Some(frame) = frame else {
        tracing::trace!("draw skipped: frame not loaded");
        return;
    };
    let Some(placement) = contain_placement(frame.width, frame.height, geometry.logical_size())
    else {
        return;
    };
    surface.draw_frame(frame, placement);
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
