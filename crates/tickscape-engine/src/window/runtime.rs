use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit};
use crate::frame::{FrameLoop, LoopControl};
use crate::time::HostClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tickscape".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the windowed host.
///
/// The runtime is the frame scheduler: it asks winit for a redraw after every
/// frame and runs one `FrameLoop::frame` per `RedrawRequested`, timestamped
/// from a `HostClock`.
pub struct Runtime;

impl Runtime {
    /// Runs until the window closes, `Escape` is pressed, or presentation fails.
    ///
    /// A presenter error ends the loop and is returned.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, frame_loop: FrameLoop) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = HostState::new(config, gpu_init, frame_loop);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        log::info!("render loop stopped after {} frames", state.frame_loop.stats().frames);

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct HostState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    frame_loop: FrameLoop,
    host_clock: HostClock,

    window: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
}

impl HostState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, frame_loop: FrameLoop) -> Self {
        Self {
            config,
            gpu_init,
            frame_loop,
            host_clock: HostClock::new(),
            window: None,
            fatal: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
            .try_build()
            .context("GPU initialization failed for window")?;

        self.window = Some(entry);
        Ok(id)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (frame_loop, window) = (&mut self.frame_loop, &mut self.window);
        let Some(entry) = window.as_mut() else {
            return;
        };

        let timestamp_ms = self.host_clock.now_ms();

        let result = entry.with_mut(|fields| {
            fields.window.pre_present_notify();
            frame_loop.frame(timestamp_ms, fields.gpu)
        });

        match result {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => event_loop.exit(),
            Err(err) => self.fail(event_loop, err.context("frame failed")),
        }
    }
}

impl ApplicationHandler for HostState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(id) => {
                log::info!("window {id:?} created");
                if let Some(entry) = &self.window {
                    entry.with_window(|w| w.request_redraw());
                }
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // Don't simulate the time spent suspended.
        self.frame_loop.reset_clock();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the frame loop animates every frame.
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.window = None;
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
