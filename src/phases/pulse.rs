//! Phase 2: radial gradient background with a two-part loader ring.
//!
//! The ring first grows from nothing to `min_loader_radius`. From then on it
//! is drawn at the halo radius, which keeps growing toward
//! `max_loader_radius` with a speed that decays past a threshold.

use std::f64::consts::PI;

use tracing::trace;

use super::{PhaseHandler, rotate_frame};
use crate::settings::{LABEL, LABEL_FONT_SIZE, LIGHTER_MAIN, MAIN, SECOND_ANIMATION, WHITE};
use crate::state::{AnimationState, Phase};
use crate::surface::{ArcStroke, RadialFill, Surface, TextStyle};

/// Start/end angles of the bottom and top halves of the loader ring.
pub fn loader_spans() -> [(f64, f64); 2] {
    let gap = SECOND_ANIMATION.loader_offset_between_parts;
    [(gap, PI - gap), (PI + gap, PI * 2.0 - gap)]
}

/// Radius the ring is drawn at: its own radius while growing, the halo
/// radius once fully grown.
pub fn loader_ring_radius(state: &AnimationState) -> f64 {
    if state.loader_radius >= SECOND_ANIMATION.min_loader_radius {
        state.increase_radius
    } else {
        state.loader_radius
    }
}

/// One step of the halo growth. Returns the new `(radius, speed)`.
///
/// The radius always advances by the speed it had entering this step; any
/// decay only shows up on the following step.
pub fn gradual_increase(increase_radius: f64, increase_speed: f64) -> (f64, f64) {
    let s = SECOND_ANIMATION;
    if increase_radius.trunc() >= s.max_loader_radius {
        return (increase_radius, increase_speed);
    }

    let threshold = (s.max_loader_radius - s.min_loader_radius) * s.percent_of_decrease / 100.0
        + s.min_loader_radius;

    let next_speed = if increase_radius >= threshold {
        (increase_speed - s.decrease_speed_of_increase_speed).max(s.min_increase_speed)
    } else {
        increase_speed
    };

    (increase_radius + increase_speed, next_speed)
}

/// One step of the label fade, bouncing between the min and max alpha.
pub fn fade_label(alpha: f64, rising: bool) -> (f64, bool) {
    let s = SECOND_ANIMATION;
    if rising {
        let next = alpha + s.text_alpha_speed;
        if next >= s.max_text_alpha {
            (s.max_text_alpha, false)
        } else {
            (next, true)
        }
    } else {
        let next = alpha - s.text_alpha_speed;
        if next <= s.min_text_alpha {
            (s.min_text_alpha, true)
        } else {
            (next, false)
        }
    }
}

pub struct PulsingLoader {
    label: String,
    font_size: f32,
}

impl PulsingLoader {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            font_size: LABEL_FONT_SIZE,
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }
}

impl PhaseHandler for PulsingLoader {
    fn phase(&self) -> Phase {
        Phase::Second
    }

    fn frame(&self, state: &AnimationState, surface: &mut dyn Surface) -> AnimationState {
        let s = SECOND_ANIMATION;
        let mut next = state.clone();

        let transform = rotate_frame(
            state,
            surface,
            state.rotate_accum + state.loader_rotate_accum,
            s.default_rotate_loader_value,
        );

        let (cx, cy) = state.center();
        let (cx, cy) = (cx as f32, cy as f32);

        surface.fill_radial(
            &RadialFill {
                cx,
                cy,
                radius: state.radius as f32,
                inner: MAIN,
                outer: LIGHTER_MAIN,
            },
            transform,
        );

        let ring = loader_ring_radius(state) as f32;
        for (start, end) in loader_spans() {
            let arc = ArcStroke {
                cx,
                cy,
                radius: ring,
                start_angle: start as f32,
                end_angle: end as f32,
                width: s.loader_line_width,
                color: WHITE,
            };
            surface.stroke_arc(&arc, transform);
        }

        // The label turns together with the background.
        surface.fill_text(
            &self.label,
            &TextStyle {
                x: cx,
                y: cy,
                size: self.font_size,
                color: LABEL,
                alpha: state.text_alpha as f32,
            },
            transform,
        );

        if state.loader_radius >= s.min_loader_radius {
            let (radius, speed) = gradual_increase(state.increase_radius, state.increase_speed);
            next.increase_radius = radius;
            next.increase_speed = speed;
        }

        next.transform = transform;
        next.resume = false;
        next.radius = if state.radius > state.device_diagonal {
            state.radius
        } else {
            (state.radius + s.background_radius_speed) * s.background_radius_acceleration
        };
        next.loader_radius = if state.loader_radius >= s.min_loader_radius {
            s.min_loader_radius
        } else {
            ((state.loader_radius + s.loader_speed) * s.loader_acceleration)
                .min(s.min_loader_radius)
        };
        next.loader_rotate_accum = state.loader_rotate_accum + s.default_rotate_loader_value;
        (next.text_alpha, next.text_alpha_rising) =
            fade_label(state.text_alpha, state.text_alpha_rising);

        trace!(
            radius = next.radius,
            loader = next.loader_radius,
            halo = next.increase_radius,
            "pulse frame"
        );
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use crate::transform::{rotate_about, rotation_of};
    use tiny_skia::Transform;

    fn second_phase_state() -> AnimationState {
        let mut state = AnimationState::new(1000.0, 1000.0);
        state.phase = Phase::Second;
        state.radius = 1.0;
        state
    }

    #[test]
    fn test_gradual_increase_before_threshold_keeps_speed() {
        let (r, v) = gradual_increase(150.0, 0.3);
        assert!((r - 150.3).abs() < 1e-9);
        assert_eq!(v, 0.3);
    }

    #[test]
    fn test_gradual_increase_decay_applies_next_tick() {
        let (r, v) = gradual_increase(160.0, 0.3);
        assert!((r - 160.3).abs() < 1e-9);
        assert!((v - 0.295).abs() < 1e-9);
    }

    #[test]
    fn test_gradual_increase_speed_floor() {
        let mut r = 160.0;
        let mut v = 0.3;
        for _ in 0..1000 {
            (r, v) = gradual_increase(r, v);
            assert!(v >= 0.1);
        }
        assert_eq!(v, 0.1);
    }

    #[test]
    fn test_gradual_increase_stops_at_max() {
        let (r, v) = gradual_increase(200.0, 0.1);
        assert_eq!((r, v), (200.0, 0.1));
        let (r2, v2) = gradual_increase(r, v);
        assert_eq!((r2, v2), (r, v));
        let (r3, v3) = gradual_increase(203.7, 0.25);
        assert_eq!((r3, v3), (203.7, 0.25));
    }

    #[test]
    fn test_gradual_increase_truncates_radius() {
        // 199.9 still counts as below the maximum.
        let (r, _) = gradual_increase(199.9, 0.1);
        assert!((r - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_fade_label_bounces() {
        let (a, rising) = fade_label(1.0, false);
        assert!((a - 0.992).abs() < 1e-9);
        assert!(!rising);

        let (a, rising) = fade_label(0.305, false);
        assert_eq!(a, 0.3);
        assert!(rising);

        let (a, rising) = fade_label(0.995, true);
        assert_eq!(a, 1.0);
        assert!(!rising);
    }

    #[test]
    fn test_frame_draws_background_ring_and_label() {
        let loader = PulsingLoader::new("Loading...");
        let state = second_phase_state();
        let mut surface = RecordingSurface::new();
        loader.frame(&state, &mut surface);

        let commands = &surface.commands;
        assert!(matches!(commands[0], DrawCommand::ClearRect(..)));
        assert!(matches!(
            commands[1],
            DrawCommand::FillRadial(fill, _) if fill.radius == 1.0 && fill.inner == MAIN
        ));
        assert_eq!(surface.arcs().len(), 2);
        assert!(commands.iter().any(
            |c| matches!(c, DrawCommand::FillText(text, style, _) if text == "Loading..." && style.alpha == 1.0)
        ));
    }

    fn label_and_background_transforms(surface: &RecordingSurface) -> (Transform, Transform) {
        let text = surface
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::FillText(_, _, t) => Some(*t),
                _ => None,
            })
            .expect("label drawn");
        let fill = surface
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::FillRadial(_, t) => Some(*t),
                _ => None,
            })
            .expect("background drawn");
        for cmd in &surface.commands {
            if let DrawCommand::StrokeArc(_, t) = cmd {
                assert_eq!(*t, fill);
            }
        }
        (text, fill)
    }

    #[test]
    fn test_label_turns_with_background() {
        let loader = PulsingLoader::new("Loading...");
        let mut state = second_phase_state();
        state.rotate_accum = 0.3;
        state.loader_rotate_accum = 0.2;
        state.transform = rotate_about(500.0, 500.0, 0.4);
        let base = rotation_of(&state.transform);

        let mut surface = RecordingSurface::new();
        loader.frame(&state, &mut surface);
        let (text, fill) = label_and_background_transforms(&surface);
        assert_eq!(text, fill);
        assert!((rotation_of(&text) - (base + PI / 50.0)).abs() < 1e-5);

        state.resume = true;
        let mut surface = RecordingSurface::new();
        loader.frame(&state, &mut surface);
        let (text, fill) = label_and_background_transforms(&surface);
        assert_eq!(text, fill);
        assert!((rotation_of(&text) - (base + 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_background_grows_then_holds() {
        let loader = PulsingLoader::new("");
        let mut state = second_phase_state();
        let next = loader.frame(&state, &mut RecordingSurface::new());
        assert!((next.radius - (1.0 + 5.0) * 1.15).abs() < 1e-9);

        state.radius = state.device_diagonal + 10.0;
        let held = loader.frame(&state, &mut RecordingSurface::new());
        assert_eq!(held.radius, state.radius);
    }

    #[test]
    fn test_ring_grows_to_minimum_then_halo_takes_over() {
        let loader = PulsingLoader::new("");
        let mut state = second_phase_state();
        let mut surface = RecordingSurface::new();

        let mut ticks = 0;
        while state.loader_radius < 150.0 {
            state = loader.frame(&state, &mut surface);
            assert!(state.loader_radius <= 150.0);
            assert_eq!(state.increase_radius, 150.0);
            ticks += 1;
            assert!(ticks < 100);
        }

        surface.take();
        let next = loader.frame(&state, &mut surface);
        assert_eq!(surface.arcs()[0].radius, 150.0);
        assert!((next.increase_radius - 150.3).abs() < 1e-9);
        assert_eq!(next.loader_radius, 150.0);
    }

    #[test]
    fn test_resume_uses_both_accumulators() {
        let loader = PulsingLoader::new("");
        let mut state = second_phase_state();
        state.rotate_accum = 0.5;
        state.loader_rotate_accum = 0.25;
        state.resume = true;

        let next = loader.frame(&state, &mut RecordingSurface::new());
        assert!(!next.resume);
        assert!((rotation_of(&next.transform) - 0.75).abs() < 1e-5);
        assert!((next.loader_rotate_accum - (0.25 + PI / 50.0)).abs() < 1e-9);
        assert_eq!(next.rotate_accum, 0.5);
    }

    #[test]
    fn test_never_leaves_second_phase() {
        let loader = PulsingLoader::new("");
        let mut state = second_phase_state();
        for _ in 0..2000 {
            state = loader.frame(&state, &mut RecordingSurface::new());
        }
        assert_eq!(state.phase, Phase::Second);
        assert!(state.increase_radius.trunc() >= 200.0);
    }
}
