//! The drawing-surface abstraction the engine renders through.
//!
//! The engine never touches pixels directly; every frame is expressed as
//! fills, stroked arcs, and glows against this trait. Hosts decide what
//! those mean: the bundled rasterizer paints an RGBA buffer, a browser host
//! forwards to a 2D canvas context.

use image::Rgba;

/// Receiver for one frame's draw operations.
pub trait Surface {
    /// Fill an axis-aligned rectangle with a solid color.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba<u8>);

    /// Stroke a circular arc centered at `(cx, cy)` from `start_angle` to
    /// `end_angle` (radians, increasing clockwise in screen space), with
    /// round line caps.
    fn stroke_arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        line_width: f64,
        color: Rgba<u8>,
    );

    /// Paint a radial glow centered at `(cx, cy)`: `color` at `opacity` in
    /// the center, fading to fully transparent at `radius`.
    fn fill_glow(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba<u8>, opacity: f64);
}

/// One recorded draw operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba<u8>,
    },
    StrokeArc {
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        line_width: f64,
        color: Rgba<u8>,
    },
    FillGlow {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Rgba<u8>,
        opacity: f64,
    },
}

/// A surface that records draw calls instead of painting.
///
/// Used by tests to assert on pass ordering and palette colors, and handy
/// for host-side debugging of what a frame would draw.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba<u8>) {
        self.calls.push(DrawCall::FillRect { x, y, width, height, color });
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
        self.calls.push(DrawCall::StrokeArc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
            line_width,
            color,
        });
    }

    fn fill_glow(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba<u8>, opacity: f64) {
        self.calls.push(DrawCall::FillGlow { cx, cy, radius, color, opacity });
    }
}
