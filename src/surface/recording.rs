//! Surface that records calls instead of drawing them.

use tiny_skia::Transform;

use super::{ArcStroke, ClearRect, DrawCommand, RadialFill, Surface, TextStyle};

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn arcs(&self) -> Vec<&ArcStroke> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeArc(arc, _) => Some(arc),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, rect: ClearRect, transform: Transform) {
        self.commands.push(DrawCommand::ClearRect(rect, transform));
    }

    fn stroke_arc(&mut self, arc: &ArcStroke, transform: Transform) {
        self.commands.push(DrawCommand::StrokeArc(*arc, transform));
    }

    fn fill_radial(&mut self, fill: &RadialFill, transform: Transform) {
        self.commands.push(DrawCommand::FillRadial(*fill, transform));
    }

    fn fill_text(&mut self, text: &str, style: &TextStyle, transform: Transform) {
        self.commands
            .push(DrawCommand::FillText(text.to_string(), *style, transform));
    }
}
