//! Label rasterization with fontdue.
//!
//! tiny-skia has no text support, so the label is rendered once into its own
//! pixmap and blitted under the frame transform. The cached pixmap is only
//! rebuilt when the text, size or color changes; per-frame alpha is applied
//! as paint opacity.

use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use tiny_skia::{
    BlendMode, FilterQuality, Pixmap, PixmapPaint, PremultipliedColorU8, Transform,
};
use tracing::{info, warn};

use super::TextStyle;
use crate::error::PreloaderError;

/// Fonts tried, in order, when the config does not name one.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/roboto/unhinted/RobotoTTF/Roboto-Regular.ttf",
    "/usr/share/fonts/TTF/Roboto-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

struct CachedLabel {
    text: String,
    size: f32,
    color: [u8; 4],
    pixmap: Pixmap,
    ascent: f32,
}

pub struct LabelRenderer {
    font: Font,
    cached: Option<CachedLabel>,
}

impl LabelRenderer {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PreloaderError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| PreloaderError::Font(e.to_string()))?;
        Ok(Self { font, cached: None })
    }

    pub fn load(path: &Path) -> Result<Self, PreloaderError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Load `explicit` if given, otherwise the first readable system font.
    /// Returns `None` (after logging) when nothing usable is found.
    pub fn discover(explicit: Option<&Path>) -> Option<Self> {
        let candidates: Vec<PathBuf> = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
        };

        for candidate in candidates {
            if !candidate.exists() {
                continue;
            }
            match Self::load(&candidate) {
                Ok(renderer) => {
                    info!(path = %candidate.display(), "loaded label font");
                    return Some(renderer);
                }
                Err(e) => {
                    warn!(path = %candidate.display(), error = %e, "failed to load font");
                }
            }
        }

        warn!("no usable font found, label will not be drawn");
        None
    }

    /// Blit `text` onto `target`, centered on `style.x` with its baseline on
    /// `style.y`, mapped through `transform`.
    pub fn draw(&mut self, target: &mut Pixmap, text: &str, style: &TextStyle, transform: Transform) {
        let stale = match &self.cached {
            Some(c) => c.text != text || c.size != style.size || c.color != style.color,
            None => true,
        };
        if stale {
            self.cached = self.rasterize(text, style.size, style.color);
        }
        let Some(label) = &self.cached else {
            return;
        };

        let x = (style.x - label.pixmap.width() as f32 / 2.0).round() as i32;
        let y = (style.y - label.ascent).round() as i32;
        let paint = PixmapPaint {
            opacity: style.alpha.clamp(0.0, 1.0),
            blend_mode: BlendMode::SourceOver,
            quality: FilterQuality::Bilinear,
        };
        target.draw_pixmap(x, y, label.pixmap.as_ref(), &paint, transform, None);
    }

    fn rasterize(&self, text: &str, size: f32, color: [u8; 4]) -> Option<CachedLabel> {
        let (ascent, descent) = self
            .font
            .horizontal_line_metrics(size)
            .map(|m| (m.ascent, m.descent))
            .unwrap_or((size, 0.0));

        let glyphs: Vec<_> = text.chars().map(|c| self.font.rasterize(c, size)).collect();
        let width: f32 = glyphs.iter().map(|(m, _)| m.advance_width).sum();

        let mut pixmap = Pixmap::new(
            (width.ceil() as u32).max(1),
            ((ascent - descent).ceil() as u32).max(1),
        )?;
        let stride = pixmap.width() as i32;
        let rows = pixmap.height() as i32;
        let pixels = pixmap.pixels_mut();

        let mut pen = 0.0_f32;
        for (metrics, bitmap) in &glyphs {
            let left = (pen + metrics.xmin as f32).round() as i32;
            let top = (ascent - metrics.height as f32 - metrics.ymin as f32).round() as i32;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = bitmap[row * metrics.width + col] as u32;
                    let x = left + col as i32;
                    let y = top + row as i32;
                    if coverage == 0 || x < 0 || y < 0 || x >= stride || y >= rows {
                        continue;
                    }

                    let a = coverage * color[3] as u32 / 255;
                    let premul = |c: u8| (c as u32 * a / 255) as u8;
                    let idx = (y * stride + x) as usize;
                    if let Some(px) = PremultipliedColorU8::from_rgba(
                        premul(color[0]),
                        premul(color[1]),
                        premul(color[2]),
                        a as u8,
                    ) {
                        // Neighbouring glyph boxes may overlap; keep the denser one.
                        if px.alpha() > pixels[idx].alpha() {
                            pixels[idx] = px;
                        }
                    }
                }
            }
            pen += metrics.advance_width;
        }

        Some(CachedLabel {
            text: text.to_string(),
            size,
            color,
            pixmap,
            ascent,
        })
    }
}
