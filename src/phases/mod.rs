//! Per-phase frame handlers.
//!
//! Add a phase by implementing `PhaseHandler` and registering it in the
//! `PhaseRegistry`. Phases without a handler draw nothing.

mod contract;
mod pulse;

use std::collections::HashMap;

use tiny_skia::Transform;

pub use contract::{ContractingArcs, quadrant_spans};
pub use pulse::{PulsingLoader, fade_label, gradual_increase, loader_ring_radius, loader_spans};

use crate::state::{AnimationState, Phase};
use crate::surface::{ClearRect, Surface};
use crate::transform::rotate_about;

/// Draws one frame of a phase and returns the state for the next frame.
///
/// Handlers never mutate the state they are given; the driver applies the
/// returned value.
pub trait PhaseHandler {
    fn phase(&self) -> Phase;

    fn frame(&self, state: &AnimationState, surface: &mut dyn Surface) -> AnimationState;
}

pub struct PhaseRegistry {
    handlers: HashMap<Phase, Box<dyn PhaseHandler>>,
}

impl PhaseRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with the contracting arcs and the pulsing loader.
    pub fn with_builtin(label: impl Into<String>, font_size: f32) -> Self {
        let mut registry = Self::new();
        registry.register(ContractingArcs);
        registry.register(PulsingLoader::new(label).with_font_size(font_size));
        registry
    }

    /// Register a handler, replacing any earlier one for the same phase.
    pub fn register<H: PhaseHandler + 'static>(&mut self, handler: H) {
        self.handlers.insert(handler.phase(), Box::new(handler));
    }

    pub fn get(&self, phase: Phase) -> Option<&dyn PhaseHandler> {
        self.handlers.get(&phase).map(|h| h.as_ref())
    }
}

impl Default for PhaseRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared rotation step: clear the area the previous frame may have drawn
/// into, then rotate the context around the surface center.
///
/// After a resize the context transform is fresh, so `resumed_angle` (the
/// whole accumulated rotation) is applied instead of the per-frame step.
/// Returns the transform this frame draws under.
pub(crate) fn rotate_frame(
    state: &AnimationState,
    surface: &mut dyn Surface,
    resumed_angle: f64,
    default_angle: f64,
) -> Transform {
    let d = state.device_diagonal as f32;
    surface.clear_rect(
        ClearRect {
            x: -d,
            y: -d,
            width: d * 3.0,
            height: d * 3.0,
        },
        state.transform,
    );

    let angle = if state.resume {
        resumed_angle
    } else {
        default_angle
    };
    let (cx, cy) = state.center();
    state
        .transform
        .pre_concat(rotate_about(cx as f32, cy as f32, angle))
}
