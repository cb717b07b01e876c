//! Desktop host for the animation.
//!
//! A plain tao window whose contents come from a tiny-skia `Pixmap`, blitted
//! through softbuffer. The event loop wakes on the earliest of two deadlines:
//! the next animation frame and the trailing edge of the resize throttle.
//!
//! Resize flow: `Resized` → `Throttle::schedule` (leading edge applies at
//! once) → later calls collapse into one trailing resize released from
//! `tick`. Applying a resize reallocates the pixmap and restarts the engine.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use softbuffer::{Context as SoftContext, Surface as SoftSurface};
use tao::dpi::{LogicalSize, PhysicalSize};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopWindowTarget};
use tao::window::{Window, WindowBuilder};
use tracing::{debug, info, warn};

use crate::config::PreloaderConfig;
use crate::engine::AnimationEngine;
use crate::error::PreloaderError;
use crate::phases::PhaseRegistry;
use crate::scheduler::IntervalScheduler;
use crate::settings::{FRAME_INTERVAL, REDRAW_CANVAS_TIME, WHITE};
use crate::state::{AnimationState, Viewport};
use crate::surface::{LabelRenderer, PixmapSurface};
use crate::throttle::Throttle;

pub struct LoaderWindow {
    window: Arc<Window>,
    surface: SoftSurface<Arc<Window>, Arc<Window>>,
    canvas: PixmapSurface,
    engine: AnimationEngine,
    scheduler: IntervalScheduler,
    resize: Throttle<PhysicalSize<u32>>,
}

impl LoaderWindow {
    /// Create the window and everything drawn into it. Must be called on the
    /// main thread.
    pub fn new<T: 'static>(
        event_loop: &EventLoopWindowTarget<T>,
        config: &PreloaderConfig,
    ) -> Result<Self, PreloaderError> {
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&config.window.title)
                .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
                .build(event_loop)?,
        );

        // softbuffer keeps owned handles to both display and window for the
        // lifetime of the surface.
        let context = SoftContext::new(Arc::clone(&window))?;
        let surface = SoftSurface::new(&context, Arc::clone(&window))?;

        let viewport = viewport_of(&window);
        let (width, height) = viewport.device_size();
        info!(
            width = viewport.width,
            height = viewport.height,
            pixel_ratio = viewport.pixel_ratio,
            "window created"
        );

        let label = LabelRenderer::discover(config.label.font_path.as_deref());
        let canvas = PixmapSurface::new(width.round() as u32, height.round() as u32)?.with_label(label);

        let phases =
            PhaseRegistry::with_builtin(config.label.text.clone(), config.label.font_size);

        Ok(Self {
            window,
            surface,
            canvas,
            engine: AnimationEngine::new(AnimationState::new(width, height), phases),
            scheduler: IntervalScheduler::new(FRAME_INTERVAL),
            resize: Throttle::new(REDRAW_CANVAS_TIME),
        })
    }

    pub fn mount(&mut self) {
        self.engine.mount(&mut self.scheduler);
    }

    /// Feed a resize notification through the throttle.
    pub fn handle_resize(&mut self, size: PhysicalSize<u32>, now: Instant) {
        if let Some(size) = self.resize.schedule(now, size) {
            self.apply_resize(size);
        } else {
            debug!(
                width = size.width,
                height = size.height,
                pending = self.resize.has_pending(),
                "resize deferred"
            );
        }
    }

    /// Release a due trailing resize and run the animation frame if due.
    pub fn tick(&mut self, now: Instant) {
        if let Some(size) = self.resize.poll(now) {
            self.apply_resize(size);
        }

        if let Some(handle) = self.scheduler.take_due(now) {
            self.engine
                .on_frame(handle, &mut self.canvas, &mut self.scheduler);
            self.present();
        }
    }

    /// Earliest moment the event loop has work to do.
    pub fn next_wakeup(&self) -> Option<Instant> {
        match (self.scheduler.deadline(), self.resize.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn apply_resize(&mut self, size: PhysicalSize<u32>) {
        if let Err(e) = self.canvas.resize(size.width, size.height) {
            warn!(error = %e, "failed to resize canvas");
            return;
        }
        self.engine
            .on_resize(size.width as f64, size.height as f64, &mut self.scheduler);
    }

    /// Blit the current canvas into the window.
    pub fn present(&mut self) {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return; // minimized
        }

        let (Some(w), Some(h)) = (
            NonZeroU32::new(self.canvas.width()),
            NonZeroU32::new(self.canvas.height()),
        ) else {
            return;
        };
        if let Err(e) = self.surface.resize(w, h) {
            warn!(error = %e, "softbuffer resize failed");
            return;
        }

        let mut buffer = match self.surface.buffer_mut() {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "softbuffer buffer unavailable");
                return;
            }
        };
        self.canvas.write_xrgb(WHITE, &mut buffer);
        if let Err(e) = buffer.present() {
            warn!(error = %e, "softbuffer present failed");
        }
    }
}

fn viewport_of(window: &Window) -> Viewport {
    let scale = window.scale_factor();
    let logical = window.inner_size().to_logical::<f64>(scale);
    Viewport::new(logical.width, logical.height, scale)
}

/// Open the window and run the animation until the window is closed.
pub fn run(config: PreloaderConfig) -> Result<(), PreloaderError> {
    let event_loop = EventLoopBuilder::new().build();
    let mut loader = LoaderWindow::new(&event_loop, &config)?;
    loader.mount();

    event_loop.run(move |event, _target, control_flow| {
        let now = Instant::now();

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
                return;
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => loader.handle_resize(size, now),
            Event::WindowEvent {
                event: WindowEvent::ScaleFactorChanged { new_inner_size, .. },
                ..
            } => loader.handle_resize(*new_inner_size, now),
            Event::MainEventsCleared => loader.tick(now),
            Event::RedrawRequested(_) => loader.present(),
            _ => {}
        }

        *control_flow = match loader.next_wakeup() {
            Some(at) => ControlFlow::WaitUntil(at),
            None => ControlFlow::Wait,
        };
    })
}
