//! Phase 1: four quadrant arcs rotating and contracting toward the center.

use std::f64::consts::PI;

use tracing::{info, trace};

use super::{PhaseHandler, rotate_frame};
use crate::settings::{FIRST_ANIMATION, MAIN};
use crate::state::{AnimationState, Phase};
use crate::surface::{ArcStroke, ClearRect, Surface};

/// Start/end angles of the four arcs, one centered in each quadrant, each
/// shortened by `offset` on both ends.
pub fn quadrant_spans(offset: f64) -> [(f64, f64); 4] {
    [
        (offset, PI / 2.0 - offset),
        (PI / 2.0 + offset, PI - offset),
        (PI + offset, PI * 1.5 - offset),
        (PI * 1.5 + offset, PI * 2.0 - offset),
    ]
}

pub struct ContractingArcs;

impl PhaseHandler for ContractingArcs {
    fn phase(&self) -> Phase {
        Phase::First
    }

    fn frame(&self, state: &AnimationState, surface: &mut dyn Surface) -> AnimationState {
        let s = FIRST_ANIMATION;
        let mut next = state.clone();

        if state.radius - s.radius_speed - state.radius_accel < s.min_radius_value {
            surface.clear_rect(
                ClearRect {
                    x: 0.0,
                    y: 0.0,
                    width: state.surface_width as f32,
                    height: state.surface_height as f32,
                },
                state.transform,
            );
            next.phase = Phase::Second;
            next.radius = s.min_radius_value;
            info!(
                rotate = state.rotate_accum,
                offset = state.offset,
                "arcs contracted, starting loader"
            );
            return next;
        }

        let transform = rotate_frame(state, surface, state.rotate_accum, s.default_rotate_value);

        let (cx, cy) = state.center();
        for (start, end) in quadrant_spans(state.offset) {
            let arc = ArcStroke {
                cx: cx as f32,
                cy: cy as f32,
                radius: state.radius as f32,
                start_angle: start as f32,
                end_angle: end as f32,
                width: s.part_line_width,
                color: MAIN,
            };
            surface.stroke_arc(&arc, transform);
        }

        next.transform = transform;
        next.resume = false;
        next.radius = state.radius - s.radius_speed - state.radius_accel;
        next.offset = state.offset - s.offset_speed;
        next.rotate_accum = state.rotate_accum + s.default_rotate_value;
        next.radius_accel = state.radius_accel + s.radius_acceleration;

        trace!(radius = next.radius, offset = next.offset, "contract frame");
        next
    }
}
