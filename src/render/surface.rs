use crate::assets::decode::PreparedFrame;
use crate::foundation::core::{Rect, SurfaceGeometry};

/// Narrow seam over a 2D drawing surface.
///
/// The surface is an explicitly owned resource: the player acquires it on mount
/// and releases it on teardown, and every geometry/draw operation goes through
/// this handle. Draw calls are expressed in *logical* units; the implementation
/// maps them onto the physical backing store using the geometry installed by the
/// last [`DrawSurface::set_backing_size`].
pub trait DrawSurface {
    /// Reallocate the backing store for `geometry` and reset any scaling state.
    ///
    /// Must fully recompute from `geometry`: physical dimensions afterwards are
    /// exactly `logical * ratio`, with no residue from the previous size.
    fn set_backing_size(&mut self, geometry: SurfaceGeometry);

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    /// Draw `frame` scaled into `placement` (logical units).
    fn draw_frame(&mut self, frame: &PreparedFrame, placement: Rect);
}

/// Owner of the current [`SurfaceGeometry`].
///
/// Each resize fully recomputes geometry from the observed values, so repeated
/// layout notifications are idempotent and cannot accumulate drift. Other
/// components read the geometry through [`SurfaceSizer::geometry`] only.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceSizer {
    geometry: Option<SurfaceGeometry>,
}

impl SurfaceSizer {
    /// Create a sizer with no observation yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute geometry from freshly observed values.
    pub fn resize(
        &mut self,
        logical_width: f64,
        logical_height: f64,
        pixel_ratio: f64,
    ) -> SurfaceGeometry {
        let geometry = SurfaceGeometry::from_observed(logical_width, logical_height, pixel_ratio);
        self.geometry = Some(geometry);
        geometry
    }

    /// Current geometry, if a resize has been observed.
    pub fn geometry(&self) -> Option<SurfaceGeometry> {
        self.geometry
    }
}

/// CPU pixel surface backed by a premultiplied RGBA8 buffer.
#[derive(Clone, Debug)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixel_ratio: f64,
    pixels: Vec<u8>,
}

impl Default for PixelSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelSurface {
    /// Create an unsized surface (zero pixels until the first resize).
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            pixel_ratio: 1.0,
            pixels: Vec::new(),
        }
    }

    /// Physical backing width in device pixels.
    pub fn physical_width(&self) -> u32 {
        self.width
    }

    /// Physical backing height in device pixels.
    pub fn physical_height(&self) -> u32 {
        self.height
    }

    /// Backing pixels in row-major premultiplied RGBA8.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Read one physical pixel as `[r, g, b, a]`; out-of-range reads transparent.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Copy the backing store into an [`image::RgbaImage`] (straight alpha).
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut out = image::RgbaImage::new(self.width, self.height);
        for (x, y, px) in out.enumerate_pixels_mut() {
            let [r, g, b, a] = self.pixel(x, y);
            // Un-premultiply for the straight-alpha export format.
            let un = |c: u8| -> u8 {
                if a == 0 {
                    0
                } else {
                    (((c as u32) * 255 + (a as u32) / 2) / (a as u32)).min(255) as u8
                }
            };
            *px = image::Rgba([un(r), un(g), un(b), a]);
        }
        out
    }
}

impl DrawSurface for PixelSurface {
    fn set_backing_size(&mut self, geometry: SurfaceGeometry) {
        self.width = geometry.physical_width();
        self.height = geometry.physical_height();
        self.pixel_ratio = geometry.pixel_ratio;
        self.pixels = vec![0u8; (self.width as usize) * (self.height as usize) * 4];
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn draw_frame(&mut self, frame: &PreparedFrame, placement: Rect) {
        if frame.is_degenerate() || self.width == 0 || self.height == 0 {
            return;
        }

        // Map the logical placement onto the physical backing store.
        let dst_x0 = (placement.x0 * self.pixel_ratio).round() as i64;
        let dst_y0 = (placement.y0 * self.pixel_ratio).round() as i64;
        let dst_x1 = (placement.x1 * self.pixel_ratio).round() as i64;
        let dst_y1 = (placement.y1 * self.pixel_ratio).round() as i64;
        let dst_w = dst_x1 - dst_x0;
        let dst_h = dst_y1 - dst_y0;
        if dst_w <= 0 || dst_h <= 0 {
            return;
        }

        let src = frame.rgba8_premul.as_slice();
        for y in dst_y0.max(0)..dst_y1.min(self.height as i64) {
            for x in dst_x0.max(0)..dst_x1.min(self.width as i64) {
                // Nearest-neighbor inverse mapping into the source frame.
                let sx = (((x - dst_x0) as f64 + 0.5) / dst_w as f64 * frame.width as f64) as u32;
                let sy = (((y - dst_y0) as f64 + 0.5) / dst_h as f64 * frame.height as f64) as u32;
                let sx = sx.min(frame.width - 1);
                let sy = sy.min(frame.height - 1);

                let si = ((sy as usize) * (frame.width as usize) + (sx as usize)) * 4;
                let di = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
                let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
                let d = &mut self.pixels[di..di + 4];
                let out = over_premul([d[0], d[1], d[2], d[3]], s);
                d.copy_from_slice(&out);
            }
        }
    }
}

/// Source-over for premultiplied RGBA8 pixels.
fn over_premul(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 255 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
