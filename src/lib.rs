//! Multi-phase loading animation.
//!
//! Four rotating quadrant arcs contract toward the center of the surface and
//! hand off to a pulsing radial-gradient loader with a growing halo ring and
//! a fading label. The animation core (`state`, `phases`, `engine`) is
//! independent of any window system; drawing goes through the `Surface`
//! trait and frame callbacks through `FrameScheduler`.

pub mod config;
pub mod engine;
pub mod error;
pub mod phases;
pub mod scheduler;
pub mod settings;
pub mod state;
pub mod surface;
pub mod throttle;
pub mod transform;

#[cfg(feature = "window")]
pub mod window;

pub use engine::{AnimationEngine, DriverState};
pub use error::PreloaderError;
pub use scheduler::{FrameHandle, FrameScheduler};
pub use state::{AnimationState, Phase};
