//! Software rasterizer: a [`Surface`] implementation over an RGBA buffer.
//!
//! Good enough for headless rendering of frames to PNG/GIF and for the wasm
//! host to hand pixels to a canvas. Arcs are stroked by stamping round discs
//! along the arc at sub-step spacing, which gives round caps for free;
//! compositing is standard source-over.

use image::{Rgba, RgbaImage};

use crate::surface::Surface;

/// An owned RGBA frame buffer implementing [`Surface`].
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Create a buffer of the given size, fully transparent.
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::new(width, height) }
    }

    /// Replace the buffer with a fresh one of the given size.
    ///
    /// Like a canvas element, resizing discards the existing bitmap.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The current frame contents.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the surface, returning the buffer.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Stamp a filled disc, source-over composited.
    fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba<u8>, opacity: f64) {
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);
        let min_x = ((cx - radius).floor() as i64).max(0);
        let max_x = ((cx + radius).ceil() as i64).min(w - 1);
        let min_y = ((cy - radius).floor() as i64).max(0);
        let max_y = ((cy + radius).ceil() as i64).min(h - 1);
        let r2 = radius * radius;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                composite(&mut self.image, x as u32, y as u32, color, opacity);
            }
        }
    }
}

impl Surface for RasterSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba<u8>) {
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);
        let min_x = (x.floor() as i64).max(0);
        let max_x = ((x + width).ceil() as i64).min(w) - 1;
        let min_y = (y.floor() as i64).max(0);
        let max_y = ((y + height).ceil() as i64).min(h) - 1;

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                composite(&mut self.image, px as u32, py as u32, color, 1.0);
            }
        }
    }

    fn stroke_arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        line_width: f64,
        color: Rgba<u8>,
    ) {
        if radius <= 0.0 || line_width <= 0.0 {
            return;
        }
        let half = (line_width / 2.0).max(0.5);
        let sweep = end_angle - start_angle;

        // Step small enough that consecutive stamps overlap heavily
        let arc_len = radius * sweep.abs();
        let steps = ((arc_len / (half * 0.5)).ceil() as usize).max(1);
        for i in 0..=steps {
            let theta = start_angle + sweep * (i as f64 / steps as f64);
            let x = cx + radius * theta.cos();
            let y = cy + radius * theta.sin();
            self.fill_disc(x, y, half, color, 1.0);
        }
    }

    fn fill_glow(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba<u8>, opacity: f64) {
        if radius <= 0.0 || opacity <= 0.0 {
            return;
        }
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);
        let min_x = ((cx - radius).floor() as i64).max(0);
        let max_x = ((cx + radius).ceil() as i64).min(w - 1);
        let min_y = ((cy - radius).floor() as i64).max(0);
        let max_y = ((cy + radius).ceil() as i64).min(h - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist >= radius {
                    continue;
                }
                // Linear falloff from full opacity at the center to zero at the rim
                let strength = opacity * (1.0 - dist / radius);
                composite(&mut self.image, x as u32, y as u32, color, strength);
            }
        }
    }
}

/// Source-over blend of `color` at `opacity` onto one pixel.
fn composite(image: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>, opacity: f64) {
    let src_alpha = (color[3] as f64 / 255.0) * opacity.clamp(0.0, 1.0);
    if src_alpha <= 0.0 {
        return;
    }
    let dst = *image.get_pixel(x, y);
    image.put_pixel(x, y, source_over(&color, &dst, src_alpha));
}

/// Standard "source over" compositing with an explicit source alpha.
fn source_over(src: &Rgba<u8>, dst: &Rgba<u8>, src_alpha: f64) -> Rgba<u8> {
    let sa = src_alpha;
    let da = dst[3] as f64 / 255.0;

    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |s: u8, d: u8| -> u8 {
        let sf = s as f64 / 255.0;
        let df = d as f64 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 174, 255, 255]);

    #[test]
    fn test_fill_rect_covers_viewport() {
        let mut surface = RasterSurface::new(8, 6);
        surface.fill_rect(0.0, 0.0, 8.0, 6.0, BLACK);
        for pixel in surface.image().pixels() {
            assert_eq!(*pixel, BLACK);
        }
    }

    #[test]
    fn test_fill_rect_clips_to_bounds() {
        let mut surface = RasterSurface::new(4, 4);
        // Larger than the buffer and offset off the top-left corner
        surface.fill_rect(-10.0, -10.0, 100.0, 100.0, WHITE);
        for pixel in surface.image().pixels() {
            assert_eq!(*pixel, WHITE);
        }
    }

    #[test]
    fn test_fill_rect_partial() {
        let mut surface = RasterSurface::new(4, 4);
        surface.fill_rect(0.0, 0.0, 2.0, 2.0, WHITE);
        assert_eq!(*surface.image().get_pixel(0, 0), WHITE);
        assert_eq!(*surface.image().get_pixel(1, 1), WHITE);
        assert_eq!(*surface.image().get_pixel(3, 3), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_stroke_arc_paints_on_circle() {
        let mut surface = RasterSurface::new(64, 64);
        surface.fill_rect(0.0, 0.0, 64.0, 64.0, BLACK);
        surface.stroke_arc(32.0, 32.0, 20.0, 0.0, 2.0 * PI, 3.0, WHITE);

        // A point on the circle at angle 0 is painted
        assert_eq!(*surface.image().get_pixel(52, 32), WHITE);
        // The center is not
        assert_eq!(*surface.image().get_pixel(32, 32), BLACK);
    }

    #[test]
    fn test_stroke_arc_partial_sweep() {
        let mut surface = RasterSurface::new(64, 64);
        surface.fill_rect(0.0, 0.0, 64.0, 64.0, BLACK);
        // Quarter arc on the right-then-down side (screen-space y grows down)
        surface.stroke_arc(32.0, 32.0, 20.0, 0.0, PI / 2.0, 3.0, WHITE);

        assert_eq!(*surface.image().get_pixel(52, 32), WHITE);
        assert_eq!(*surface.image().get_pixel(32, 52), WHITE);
        // Opposite side untouched
        assert_eq!(*surface.image().get_pixel(12, 32), BLACK);
        assert_eq!(*surface.image().get_pixel(32, 12), BLACK);
    }

    #[test]
    fn test_stroke_arc_offscreen_is_clipped() {
        let mut surface = RasterSurface::new(16, 16);
        // Arc entirely outside the buffer must not panic or wrap
        surface.stroke_arc(100.0, 100.0, 10.0, 0.0, 2.0 * PI, 2.0, WHITE);
        for pixel in surface.image().pixels() {
            assert_eq!(pixel[3], 0);
        }
    }

    #[test]
    fn test_degenerate_arc_draws_nothing() {
        let mut surface = RasterSurface::new(16, 16);
        surface.stroke_arc(8.0, 8.0, 0.0, 0.0, 1.0, 2.0, WHITE);
        surface.stroke_arc(8.0, 8.0, 4.0, 0.0, 1.0, 0.0, WHITE);
        for pixel in surface.image().pixels() {
            assert_eq!(pixel[3], 0);
        }
    }

    #[test]
    fn test_glow_fades_from_center() {
        let mut surface = RasterSurface::new(32, 32);
        surface.fill_rect(0.0, 0.0, 32.0, 32.0, BLACK);
        surface.fill_glow(16.0, 16.0, 10.0, BLUE, 0.5);

        let center = surface.image().get_pixel(16, 16);
        let edge = surface.image().get_pixel(23, 16);
        let outside = surface.image().get_pixel(28, 16);

        // Blue contribution is strongest at the center and zero past the rim
        assert!(center[2] > edge[2], "center {} should out-glow edge {}", center[2], edge[2]);
        assert!(edge[2] > 0);
        assert_eq!(*outside, BLACK);
    }

    #[test]
    fn test_glow_zero_opacity_is_noop() {
        let mut surface = RasterSurface::new(8, 8);
        surface.fill_glow(4.0, 4.0, 3.0, BLUE, 0.0);
        for pixel in surface.image().pixels() {
            assert_eq!(pixel[3], 0);
        }
    }

    #[test]
    fn test_resize_discards_bitmap() {
        let mut surface = RasterSurface::new(4, 4);
        surface.fill_rect(0.0, 0.0, 4.0, 4.0, WHITE);
        surface.resize(6, 3);
        assert_eq!(surface.width(), 6);
        assert_eq!(surface.height(), 3);
        for pixel in surface.image().pixels() {
            assert_eq!(pixel[3], 0);
        }
    }

    #[test]
    fn test_source_over_opaque_replaces() {
        let result = source_over(&Rgba([255, 0, 0, 255]), &Rgba([0, 0, 255, 255]), 1.0);
        assert_eq!(result, Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_source_over_half_mixes() {
        let result = source_over(&Rgba([255, 0, 0, 255]), &Rgba([0, 0, 255, 255]), 0.5);
        assert!(result[0] > 100);
        assert!(result[2] > 100);
        assert_eq!(result[3], 255);
    }

    #[test]
    fn test_source_over_transparent_dst() {
        let result = source_over(&Rgba([10, 20, 30, 255]), &Rgba([0, 0, 0, 0]), 1.0);
        assert_eq!(result, Rgba([10, 20, 30, 255]));
    }
}
