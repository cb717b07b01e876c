//! Fixed animation constants.
//!
//! Every phase has its own block of tuning values. These are not exposed
//! through the config file; the animation is only guaranteed to look right
//! with exactly these numbers.

use std::f64::consts::PI;
use std::time::Duration;

use tiny_skia::Color;

/// Minimum spacing between two resize-triggered redraws.
pub const REDRAW_CANVAS_TIME: Duration = Duration::from_millis(300);

/// Target interval between two animation frames (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Label shown in the middle of the loader when none is configured.
pub const DEFAULT_LABEL: &str = "Loading...";

/// Label font size in device pixels.
pub const LABEL_FONT_SIZE: f32 = 22.0;

// ---------------------------------------------------------------------------
// Phase 1: contracting quadrant arcs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct FirstAnimation {
    /// Divisor applied to the surface diagonal to get the starting radius.
    pub range_radius: f64,
    /// Rotation applied to the frame on every tick (radians).
    pub default_rotate_value: f64,
    /// Radius below which the arcs hand off to phase 2.
    pub min_radius_value: f64,
    pub radius_speed: f64,
    /// Added to the accumulated deceleration term every tick.
    pub radius_acceleration: f64,
    /// Initial angular gap between neighbouring arcs.
    pub offset_between_parts: f64,
    pub offset_speed: f64,
    pub part_line_width: f32,
}

pub const FIRST_ANIMATION: FirstAnimation = FirstAnimation {
    range_radius: 1.9,
    default_rotate_value: PI / 100.0,
    min_radius_value: 1.0,
    radius_speed: 5.0,
    radius_acceleration: 0.2,
    offset_between_parts: 0.4,
    offset_speed: 0.001,
    part_line_width: 20.0,
};

// ---------------------------------------------------------------------------
// Phase 2: pulsing radial loader
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct SecondAnimation {
    pub loader_speed: f64,
    pub loader_acceleration: f64,
    pub loader_offset_between_parts: f64,
    pub default_rotate_loader_value: f64,
    pub slowdown_rotate: f64,
    pub min_loader_radius: f64,
    pub max_loader_radius: f64,
    pub loader_line_width: f32,

    pub background_radius_speed: f64,
    pub background_radius_acceleration: f64,

    /// Initial growth speed of the halo once the ring is fully grown.
    pub increase_speed: f64,
    pub decrease_speed_of_increase_speed: f64,
    /// Share of the halo range (in percent) after which growth starts to decay.
    pub percent_of_decrease: f64,
    pub min_increase_speed: f64,

    pub min_text_alpha: f64,
    pub max_text_alpha: f64,
    pub text_alpha_speed: f64,
}

pub const SECOND_ANIMATION: SecondAnimation = SecondAnimation {
    loader_speed: 3.0,
    loader_acceleration: 1.1,
    loader_offset_between_parts: 0.6,
    default_rotate_loader_value: PI / 50.0,
    slowdown_rotate: 0.0007,
    min_loader_radius: 150.0,
    max_loader_radius: 200.0,
    loader_line_width: 4.0,

    background_radius_speed: 5.0,
    background_radius_acceleration: 1.15,

    increase_speed: 0.3,
    decrease_speed_of_increase_speed: 0.005,
    percent_of_decrease: 20.0,
    min_increase_speed: 0.1,

    min_text_alpha: 0.3,
    max_text_alpha: 1.0,
    text_alpha_speed: 0.008,
};

// ---------------------------------------------------------------------------
// Phases 3 and 4: twist and clear (no handler registered yet)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct ThirdAnimation {
    pub max_twisted_value: f64,
    pub twist_duration: f64,
    pub twist_speed_first_part: f64,
    pub twist_speed_second_part: f64,
    pub twist_speed_third_part: f64,
    pub radius_speed_first_part: f64,
    pub radius_speed_second_part: f64,
    pub radius_speed_third_part: f64,
}

pub const THIRD_ANIMATION: ThirdAnimation = ThirdAnimation {
    max_twisted_value: 250.0,
    twist_duration: 20.0,
    twist_speed_first_part: 0.15,
    twist_speed_second_part: 0.005,
    twist_speed_third_part: 0.2,
    radius_speed_first_part: 5.0,
    radius_speed_second_part: 0.1,
    radius_speed_third_part: 10.0,
};

#[derive(Debug, Clone, Copy)]
pub struct FourthAnimation {
    pub circle_line_width: f64,
    pub default_clear_circle_radius: f64,
    pub clear_circle_radius_speed: f64,
    pub clear_circle_radius_acceleration: f64,
}

pub const FOURTH_ANIMATION: FourthAnimation = FourthAnimation {
    circle_line_width: 4.0,
    default_clear_circle_radius: 0.0,
    clear_circle_radius_speed: 1.0,
    clear_circle_radius_acceleration: 1.2,
};

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Stroke color of the phase 1 arcs and gradient center (#700000).
pub const MAIN: [u8; 4] = [0x70, 0x00, 0x00, 0xff];

/// Gradient edge color (#FF6633).
pub const LIGHTER_MAIN: [u8; 4] = [0xff, 0x66, 0x33, 0xff];

/// Loader ring color and page background.
pub const WHITE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Label fill color; alpha is applied per frame.
pub const LABEL: [u8; 4] = [0xff, 0x00, 0x00, 0xff];

/// Convert one of the RGBA constants above into a tiny-skia color.
pub fn color(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}
