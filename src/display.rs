//! Display collaborator: surface creation, frame presentation, and quit
//! polling. The pipeline only sees the `Display` trait, so rendering runs
//! identically against a window or a headless buffer.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use log::trace;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::EventLoopExtPumpEvents;
use winit::window::{Window, WindowBuilder};

use crate::error::RasterError;

/// What the pipeline needs from a presentation backend.
pub trait Display {
    /// Creates a presentable surface. Called once by pipeline
    /// initialization; failure is the only way initialization fails.
    fn create_surface(&mut self, title: &str, width: u32, height: u32)
        -> Result<(), RasterError>;

    /// Presents one finished frame of packed ARGB pixels.
    fn present(&mut self, pixels: &[u32], width: u32, height: u32) -> Result<(), RasterError>;

    /// Drains and reports any pending quit request.
    fn poll_quit_requested(&mut self) -> bool;
}

fn surface_error(err: impl std::fmt::Display) -> RasterError {
    RasterError::Surface(err.to_string())
}

/// winit window + softbuffer surface.
///
/// Events are pumped with a zero timeout around every present, so the window
/// stays responsive without handing the event loop a callback for the
/// lifetime of the program.
pub struct WindowDisplay {
    event_loop: EventLoop<()>,
    window: Option<Arc<Window>>,
    context: Option<softbuffer::Context<Arc<Window>>>,
    surface: Option<softbuffer::Surface<Arc<Window>, Arc<Window>>>,
    quit_requested: bool,
}

impl WindowDisplay {
    pub fn new() -> Result<Self, RasterError> {
        let event_loop = EventLoop::new().map_err(surface_error)?;
        Ok(Self {
            event_loop,
            window: None,
            context: None,
            surface: None,
            quit_requested: false,
        })
    }

    fn pump(&mut self) {
        let quit_requested = &mut self.quit_requested;
        let _status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, elwt| {
                if let Event::WindowEvent { event, .. } = event {
                    match event {
                        WindowEvent::CloseRequested => {
                            *quit_requested = true;
                            elwt.exit();
                        }
                        WindowEvent::KeyboardInput { event, .. } => {
                            if event.state == ElementState::Pressed
                                && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                            {
                                *quit_requested = true;
                            }
                        }
                        _ => {}
                    }
                }
            });
    }
}

impl Display for WindowDisplay {
    fn create_surface(
        &mut self,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<(), RasterError> {
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(false)
            .build(&self.event_loop)
            .map(Arc::new)
            .map_err(surface_error)?;

        let context = softbuffer::Context::new(window.clone()).map_err(surface_error)?;
        let mut surface =
            softbuffer::Surface::new(&context, window.clone()).map_err(surface_error)?;

        let surface_width = NonZeroU32::new(width)
            .ok_or_else(|| RasterError::Surface("surface width must be nonzero".into()))?;
        let surface_height = NonZeroU32::new(height)
            .ok_or_else(|| RasterError::Surface("surface height must be nonzero".into()))?;
        surface
            .resize(surface_width, surface_height)
            .map_err(surface_error)?;

        self.window = Some(window);
        self.context = Some(context);
        self.surface = Some(surface);
        Ok(())
    }

    fn present(&mut self, pixels: &[u32], width: u32, height: u32) -> Result<(), RasterError> {
        trace!("presenting {}x{} frame", width, height);
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| RasterError::Surface("surface not created".into()))?;

        let mut buffer = surface.buffer_mut().map_err(surface_error)?;
        buffer.copy_from_slice(pixels);
        buffer.present().map_err(surface_error)?;

        self.pump();
        Ok(())
    }

    fn poll_quit_requested(&mut self) -> bool {
        std::mem::take(&mut self.quit_requested)
    }
}

/// Keeps the last presented frame in memory instead of opening a window.
/// This is how the integration tests drive the full pipeline.
#[derive(Default)]
pub struct HeadlessDisplay {
    width: u32,
    height: u32,
    last_frame: Vec<u32>,
    presented_frames: usize,
    quit_after: Option<usize>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports a quit request once the given number of frames has been
    /// presented.
    pub fn quit_after(frames: usize) -> Self {
        Self {
            quit_after: Some(frames),
            ..Self::default()
        }
    }

    pub fn last_frame(&self) -> &[u32] {
        &self.last_frame
    }

    pub fn presented_frames(&self) -> usize {
        self.presented_frames
    }
}

impl Display for HeadlessDisplay {
    fn create_surface(
        &mut self,
        _title: &str,
        width: u32,
        height: u32,
    ) -> Result<(), RasterError> {
        self.width = width;
        self.height = height;
        self.last_frame = vec![0; (width * height) as usize];
        Ok(())
    }

    fn present(&mut self, pixels: &[u32], _width: u32, _height: u32) -> Result<(), RasterError> {
        self.last_frame.clear();
        self.last_frame.extend_from_slice(pixels);
        self.presented_frames += 1;
        Ok(())
    }

    fn poll_quit_requested(&mut self) -> bool {
        self.quit_after
            .map_or(false, |frames| self.presented_frames >= frames)
    }
}
