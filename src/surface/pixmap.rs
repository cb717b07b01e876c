//! tiny-skia backed surface.

use tiny_skia::{
    BlendMode, FillRule, GradientStop, Paint, PathBuilder, Pixmap, Point, RadialGradient, Rect,
    SpreadMode, Stroke, Transform,
};
use tracing::warn;

use super::{ArcStroke, ClearRect, LabelRenderer, RadialFill, Surface, TextStyle, arc_path};
use crate::error::PreloaderError;
use crate::settings::color;

pub struct PixmapSurface {
    pixmap: Pixmap,
    label: Option<LabelRenderer>,
    warned_no_font: bool,
}

impl PixmapSurface {
    /// Create a transparent surface. Zero dimensions are bumped to one pixel
    /// so a minimized window never fails to allocate.
    pub fn new(width: u32, height: u32) -> Result<Self, PreloaderError> {
        Ok(Self {
            pixmap: new_pixmap(width, height)?,
            label: None,
            warned_no_font: false,
        })
    }

    pub fn with_label(mut self, label: Option<LabelRenderer>) -> Self {
        self.label = label;
        self
    }

    /// Replace the backing pixmap with a fresh, transparent one.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), PreloaderError> {
        self.pixmap = new_pixmap(width, height)?;
        Ok(())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Composite the premultiplied pixels over an opaque `background` and
    /// pack them as `0x00RRGGBB`, the layout softbuffer expects.
    pub fn write_xrgb(&self, background: [u8; 4], out: &mut [u32]) {
        for (dst, px) in out.iter_mut().zip(self.pixmap.pixels()) {
            let inv = 255 - px.alpha() as u32;
            let r = px.red() as u32 + background[0] as u32 * inv / 255;
            let g = px.green() as u32 + background[1] as u32 * inv / 255;
            let b = px.blue() as u32 + background[2] as u32 * inv / 255;
            *dst = (r.min(255) << 16) | (g.min(255) << 8) | b.min(255);
        }
    }
}

fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, PreloaderError> {
    Pixmap::new(width.max(1), height.max(1))
        .ok_or_else(|| PreloaderError::Surface(format!("cannot allocate {width}x{height} pixmap")))
}

impl Surface for PixmapSurface {
    fn clear_rect(&mut self, rect: ClearRect, transform: Transform) {
        let Some(rect) = Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        self.pixmap.fill_rect(rect, &paint, transform, None);
    }

    fn stroke_arc(&mut self, arc: &ArcStroke, transform: Transform) {
        let Some(path) = arc_path(arc) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color(arc.color));
        paint.anti_alias = true;
        let stroke = Stroke {
            width: arc.width,
            line_cap: tiny_skia::LineCap::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, transform, None);
    }

    fn fill_radial(&mut self, fill: &RadialFill, transform: Transform) {
        let Some(path) = PathBuilder::from_circle(fill.cx, fill.cy, fill.radius) else {
            return;
        };

        let center = Point::from_xy(fill.cx, fill.cy);
        let stops = vec![
            GradientStop::new(0.0, color(fill.inner)),
            GradientStop::new(1.0, color(fill.outer)),
        ];

        let mut paint = Paint::default();
        paint.anti_alias = true;
        match RadialGradient::new(
            center,
            center,
            fill.radius,
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ) {
            Some(shader) => paint.shader = shader,
            None => paint.set_color(color(fill.inner)),
        }
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, transform, None);
    }

    fn fill_text(&mut self, text: &str, style: &TextStyle, transform: Transform) {
        match self.label.as_mut() {
            Some(label) => label.draw(&mut self.pixmap, text, style, transform),
            None => {
                if !self.warned_no_font {
                    warn!("no font loaded, label not drawn");
                    self.warned_no_font = true;
                }
            }
        }
    }
}
