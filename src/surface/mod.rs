//! Drawing surface adapter.
//!
//! Phase handlers only talk to the `Surface` trait. Every call carries the
//! transform it must be drawn under, so the adapter itself never holds
//! context state. Two implementations exist: a tiny-skia `Pixmap` for real
//! output and a recorder used in tests.

pub mod pixmap;
pub mod recording;
pub mod text;

use std::f32::consts::TAU;

use tiny_skia::{Path, PathBuilder, Transform};

pub use pixmap::PixmapSurface;
pub use recording::RecordingSurface;
pub use text::LabelRenderer;

// ---------------------------------------------------------------------------
// Draw parameters
// ---------------------------------------------------------------------------

/// Axis-aligned rectangle in the (possibly transformed) drawing frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Round-capped arc stroke, canvas `arc(cx, cy, r, start, end)` semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStroke {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub width: f32,
    pub color: [u8; 4],
}

/// Filled circle shaded from `inner` at the center to `outer` at the edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialFill {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub inner: [u8; 4],
    pub outer: [u8; 4],
}

/// Text centered horizontally on `x` with its baseline on `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: [u8; 4],
    pub alpha: f32,
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect(ClearRect, Transform),
    StrokeArc(ArcStroke, Transform),
    FillRadial(RadialFill, Transform),
    FillText(String, TextStyle, Transform),
}

// ---------------------------------------------------------------------------
// Surface trait
// ---------------------------------------------------------------------------

pub trait Surface {
    /// Make the pixels covered by `rect` (mapped through `transform`) transparent.
    fn clear_rect(&mut self, rect: ClearRect, transform: Transform);

    fn stroke_arc(&mut self, arc: &ArcStroke, transform: Transform);

    fn fill_radial(&mut self, fill: &RadialFill, transform: Transform);

    fn fill_text(&mut self, text: &str, style: &TextStyle, transform: Transform);
}

// ---------------------------------------------------------------------------
// Arc geometry
// ---------------------------------------------------------------------------

/// Clockwise sweep from `start` to `end` the way a 2D canvas draws it:
/// anything below a full turn wraps into `[0, 2π)`, a full turn or more
/// draws the whole circle.
pub fn canvas_sweep(start: f32, end: f32) -> f32 {
    let sweep = end - start;
    if sweep >= TAU {
        TAU
    } else {
        sweep.rem_euclid(TAU)
    }
}

/// Polyline approximation of an arc, dense enough that segments stay a few
/// pixels long at any radius.
pub fn arc_path(arc: &ArcStroke) -> Option<Path> {
    let sweep = canvas_sweep(arc.start_angle, arc.end_angle);
    if arc.radius <= 0.0 || sweep <= 0.0 {
        return None;
    }

    let steps = ((sweep * arc.radius) / 3.0).ceil().clamp(8.0, 720.0) as usize;
    let mut pb = PathBuilder::new();
    for i in 0..=steps {
        let t = arc.start_angle + sweep * (i as f32 / steps as f32);
        let x = arc.cx + arc.radius * t.cos();
        let y = arc.cy + arc.radius * t.sin();
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.finish()
}
