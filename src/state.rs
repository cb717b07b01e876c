//! Animation state shared by every phase.
//!
//! One `AnimationState` exists per mounted surface. Phase handlers receive it
//! by reference and return the next value; only the driver replaces it.

use tiny_skia::Transform;

use crate::settings::{FIRST_ANIMATION, SECOND_ANIMATION};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Current stage of the animation. Ordered so the driver can check that a
/// transition never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Four quadrant arcs contracting toward the center.
    First = 1,
    /// Radial gradient loader with the growing ring and halo.
    Second = 2,
    Third = 3,
    Fourth = 4,
}

impl Phase {
    /// Whether the driver stops requesting frames once this phase is current.
    pub fn is_terminal(self) -> bool {
        self == Phase::Third
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Logical viewport size plus the device pixel ratio reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Surface size in device pixels.
    pub fn device_size(&self) -> (f64, f64) {
        (self.width * self.pixel_ratio, self.height * self.pixel_ratio)
    }
}

/// Normalized reference radius: the surface diagonal divided by
/// `range_radius`. A zero-sized surface yields zero.
pub fn device_diagonal(width: f64, height: f64) -> f64 {
    (width * width + height * height).sqrt() / FIRST_ANIMATION.range_radius
}

// ---------------------------------------------------------------------------
// AnimationState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Surface size in device pixels.
    pub surface_width: f64,
    pub surface_height: f64,
    pub device_diagonal: f64,

    pub phase: Phase,
    /// Set by a resize; the next frame rotates by the accumulated angle
    /// instead of the per-frame increment.
    pub resume: bool,
    /// Transform the surface context has accumulated so far. Reset to
    /// identity whenever the surface is recreated.
    pub transform: Transform,

    pub radius: f64,
    pub offset: f64,
    pub rotate_accum: f64,
    pub radius_accel: f64,

    pub loader_radius: f64,
    pub loader_rotate_accum: f64,
    pub increase_radius: f64,
    pub increase_speed: f64,

    pub text_alpha: f64,
    pub text_alpha_rising: bool,
}

impl AnimationState {
    /// Fresh state for a surface of `width` x `height` device pixels.
    pub fn new(width: f64, height: f64) -> Self {
        let diagonal = device_diagonal(width, height);
        Self {
            surface_width: width,
            surface_height: height,
            device_diagonal: diagonal,

            phase: Phase::First,
            resume: false,
            transform: Transform::identity(),

            radius: diagonal,
            offset: FIRST_ANIMATION.offset_between_parts,
            rotate_accum: 0.0,
            radius_accel: 0.0,

            loader_radius: 0.0,
            loader_rotate_accum: 0.0,
            increase_radius: SECOND_ANIMATION.min_loader_radius,
            increase_speed: SECOND_ANIMATION.increase_speed,

            text_alpha: SECOND_ANIMATION.max_text_alpha,
            text_alpha_rising: false,
        }
    }

    /// Center of the surface in device pixels.
    pub fn center(&self) -> (f64, f64) {
        (self.surface_width / 2.0, self.surface_height / 2.0)
    }

    /// Adopt a new surface size. Animation progress is kept; the context
    /// transform starts over, so the next frame must resume the accumulated
    /// rotation.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface_width = width;
        self.surface_height = height;
        self.device_diagonal = device_diagonal(width, height);
        self.transform = Transform::identity();
        self.resume = true;
    }
}
