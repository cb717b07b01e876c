//! Frame driver.
//!
//! The engine owns the animation state and at most one outstanding frame
//! request. Each frame runs the handler registered for the current phase,
//! applies the returned state and asks the scheduler for the next frame
//! unless the terminal phase has been reached.

use tracing::{debug, info, warn};

use crate::phases::PhaseRegistry;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::state::{AnimationState, Phase};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Not mounted yet.
    Idle,
    Running,
    /// A resize restarted the loop; the next frame resumes rotation.
    Resuming,
    /// Terminal phase reached, no more frames are requested.
    Stopped,
}

pub struct AnimationEngine {
    state: AnimationState,
    phases: PhaseRegistry,
    pending: Option<FrameHandle>,
    driver: DriverState,
    frames: u64,
}

impl AnimationEngine {
    pub fn new(state: AnimationState, phases: PhaseRegistry) -> Self {
        Self {
            state,
            phases,
            pending: None,
            driver: DriverState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn driver_state(&self) -> DriverState {
        self.driver
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Start the loop by requesting the first frame.
    pub fn mount(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.driver != DriverState::Idle {
            debug!(driver = ?self.driver, "already mounted");
            return;
        }
        self.driver = DriverState::Running;
        self.pending = Some(scheduler.request_frame());
        info!(
            width = self.state.surface_width,
            height = self.state.surface_height,
            diagonal = self.state.device_diagonal,
            "animation mounted"
        );
    }

    /// Run one frame for the request `handle`.
    ///
    /// Callbacks for anything other than the outstanding request are stale
    /// and ignored, so a cancelled loop can never draw.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
    ) {
        if self.pending != Some(handle) {
            debug!(?handle, pending = ?self.pending, "ignoring stale frame");
            return;
        }
        self.pending = None;

        let current = self.state.phase;
        if let Some(handler) = self.phases.get(current) {
            let mut next = handler.frame(&self.state, surface);
            if next.phase < current {
                warn!(from = ?current, to = ?next.phase, "phase regression ignored");
                next.phase = current;
            } else if next.phase != current {
                info!(from = ?current, to = ?next.phase, frame = self.frames, "phase transition");
            }
            self.state = next;
        }
        self.frames += 1;

        if self.state.phase.is_terminal() {
            self.driver = DriverState::Stopped;
            info!(phase = ?self.state.phase, frames = self.frames, "animation finished");
        } else {
            self.driver = DriverState::Running;
            self.pending = Some(scheduler.request_frame());
        }
    }

    /// Adopt a new surface size and restart the loop from a single fresh
    /// request, carrying the accumulated rotation over.
    pub fn on_resize(&mut self, width: f64, height: f64, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }

        self.state.resize(width, height);
        info!(
            width,
            height,
            diagonal = self.state.device_diagonal,
            "surface resized"
        );

        if self.state.phase.is_terminal() {
            return;
        }
        self.driver = DriverState::Resuming;
        self.pending = Some(scheduler.request_frame());
    }

    /// Current phase, for hosts that want to report progress.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::PhaseHandler;
    use crate::surface::RecordingSurface;

    #[derive(Default)]
    struct MockScheduler {
        next_id: u64,
        requested: Vec<FrameHandle>,
        cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for MockScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next_id += 1;
            let handle = FrameHandle(self.next_id);
            self.requested.push(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancelled.push(handle);
        }
    }

    fn engine() -> AnimationEngine {
        AnimationEngine::new(
            AnimationState::new(1000.0, 800.0),
            PhaseRegistry::with_builtin("Loading...", 22.0),
        )
    }

    fn tick(engine: &mut AnimationEngine, scheduler: &mut MockScheduler) {
        let handle = engine.pending().expect("no pending frame");
        engine.on_frame(handle, &mut RecordingSurface::new(), scheduler);
    }

    #[test]
    fn test_mount_requests_one_frame() {
        let mut engine = engine();
        let mut scheduler = MockScheduler::default();
        engine.mount(&mut scheduler);
        engine.mount(&mut scheduler);
        assert_eq!(scheduler.requested.len(), 1);
        assert_eq!(engine.driver_state(), DriverState::Running);
    }

    #[test]
    fn test_each_frame_requests_the_next() {
        let mut engine = engine();
        let mut scheduler = MockScheduler::default();
        engine.mount(&mut scheduler);
        for _ in 0..10 {
            tick(&mut engine, &mut scheduler);
        }
        assert_eq!(scheduler.requested.len(), 11);
        assert_eq!(engine.frames(), 10);
        assert!(engine.pending().is_some());
    }

    #[test]
    fn test_resize_cancels_one_and_requests_one() {
        let mut engine = engine();
        let mut scheduler = MockScheduler::default();
        engine.mount(&mut scheduler);
        tick(&mut engine, &mut scheduler);
        tick(&mut engine, &mut scheduler);

        let before = scheduler.requested.len();
        let outstanding = engine.pending();
        engine.on_resize(1200.0, 900.0, &mut scheduler);

        assert_eq!(scheduler.cancelled, vec![outstanding.unwrap()]);
        assert_eq!(scheduler.requested.len(), before + 1);
        assert_eq!(engine.driver_state(), DriverState::Resuming);
        assert!(engine.state().resume);

        tick(&mut engine, &mut scheduler);
        assert!(!engine.state().resume);
        assert_eq!(engine.driver_state(), DriverState::Running);
    }

    #[test]
    fn test_stale_frame_is_ignored() {
        let mut engine = engine();
        let mut scheduler = MockScheduler::default();
        engine.mount(&mut scheduler);
        let stale = engine.pending().unwrap();
        engine.on_resize(1200.0, 900.0, &mut scheduler);

        let mut surface = RecordingSurface::new();
        engine.on_frame(stale, &mut surface, &mut scheduler);
        assert!(surface.commands.is_empty());
        assert_eq!(engine.frames(), 0);
        assert!(engine.state().resume);
    }

    #[test]
    fn test_resize_without_pending_frame_is_harmless() {
        let mut engine = engine();
        let mut scheduler = MockScheduler::default();
        engine.on_resize(640.0, 480.0, &mut scheduler);
        assert!(scheduler.cancelled.is_empty());
        assert_eq!(scheduler.requested.len(), 1);
    }

    struct JumpTo(Phase, Phase);

    impl PhaseHandler for JumpTo {
        fn phase(&self) -> Phase {
            self.0
        }

        fn frame(&self, state: &AnimationState, _surface: &mut dyn Surface) -> AnimationState {
            let mut next = state.clone();
            next.phase = self.1;
            next
        }
    }

    #[test]
    fn test_terminal_phase_stops_requesting() {
        let mut phases = PhaseRegistry::new();
        phases.register(JumpTo(Phase::First, Phase::Third));
        let mut engine = AnimationEngine::new(AnimationState::new(100.0, 100.0), phases);
        let mut scheduler = MockScheduler::default();
        engine.mount(&mut scheduler);
        tick(&mut engine, &mut scheduler);

        assert_eq!(engine.phase(), Phase::Third);
        assert_eq!(engine.driver_state(), DriverState::Stopped);
        assert!(engine.pending().is_none());
        assert_eq!(scheduler.requested.len(), 1);
    }

    #[test]
    fn test_phase_never_regresses() {
        let mut phases = PhaseRegistry::new();
        phases.register(JumpTo(Phase::Second, Phase::First));
        let mut state = AnimationState::new(100.0, 100.0);
        state.phase = Phase::Second;
        let mut engine = AnimationEngine::new(state, phases);
        let mut scheduler = MockScheduler::default();
        engine.mount(&mut scheduler);
        tick(&mut engine, &mut scheduler);
        assert_eq!(engine.phase(), Phase::Second);
    }

    #[test]
    fn test_unhandled_phase_keeps_ticking_without_drawing() {
        let mut state = AnimationState::new(100.0, 100.0);
        state.phase = Phase::Fourth;
        let mut engine = AnimationEngine::new(state, PhaseRegistry::with_builtin("", 22.0));
        let mut scheduler = MockScheduler::default();
        engine.mount(&mut scheduler);

        let mut surface = RecordingSurface::new();
        let handle = engine.pending().unwrap();
        engine.on_frame(handle, &mut surface, &mut scheduler);
        assert!(surface.commands.is_empty());
        assert!(engine.pending().is_some());
    }
}
