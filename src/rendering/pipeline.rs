//! Pipeline lifecycle: surface acquisition, per-frame clear/draw/present
//! cycle, and quit handling.

use glam::Vec4;
use log::{debug, info};

use crate::display::Display;
use crate::error::RasterError;
use crate::mesh::Mesh;
use crate::shading::{FragmentShader, ShaderProgram, VertexShader};

use super::framebuffer::{rgba_to_u32, Framebuffer};
use super::rasterizer::Rasterizer;

/// Where the current frame stands. Draws are only legal between `clear()`
/// and `show()`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FramePhase {
    Presented,
    Cleared,
}

/// Owns the framebuffer, the scan-conversion core, and the display
/// collaborator. One instance per window, single-threaded; the only
/// blocking point is the present/poll inside `show()`.
pub struct RasterPipeline<D: Display> {
    display: D,
    frame: Framebuffer,
    rasterizer: Rasterizer,
    phase: FramePhase,
    quit: bool,
}

impl<D: Display> RasterPipeline<D> {
    /// Acquires a surface from the display and sets up the pipeline. Fails
    /// only when the display cannot create a surface of the requested size.
    pub fn initialize(
        mut display: D,
        title: &str,
        width: u32,
        height: u32,
        samples_per_pixel: u32,
    ) -> Result<Self, RasterError> {
        display.create_surface(title, width, height)?;
        let rasterizer = Rasterizer::new(samples_per_pixel);
        info!(
            "pipeline initialized: {}x{}, {} samples per pixel",
            width,
            height,
            rasterizer.samples_per_pixel()
        );
        Ok(Self {
            display,
            frame: Framebuffer::new(width as usize, height as usize),
            rasterizer,
            phase: FramePhase::Presented,
            quit: false,
        })
    }

    /// Builds a shader program from a stage pair.
    pub fn create_shader_program(
        &self,
        vertex: VertexShader,
        fragment: FragmentShader,
    ) -> ShaderProgram {
        ShaderProgram::new(vertex, fragment)
    }

    /// Creates an empty drawable object.
    pub fn create_object(&self) -> Mesh {
        Mesh::new()
    }

    /// Fills every pixel with `color` and resets the depth plane when depth
    /// testing is enabled. Must run before the frame's draws.
    pub fn clear(&mut self, color: Vec4) {
        self.frame.clear(rgba_to_u32(color));
        self.phase = FramePhase::Cleared;
    }

    /// Allocates the depth buffer; from here on draws are depth tested and
    /// every `clear` resets the stored depths.
    pub fn enable_depth_test(&mut self) {
        self.frame.enable_depth();
    }

    /// Draws `mesh` through `program` into the current frame. The program is
    /// an explicit per-call parameter; the pipeline keeps no active-program
    /// state.
    pub fn draw_object(&mut self, mesh: &Mesh, program: &ShaderProgram) -> Result<(), RasterError> {
        if self.phase != FramePhase::Cleared {
            return Err(RasterError::FrameNotCleared);
        }
        debug!("draw_object: {} triangles", mesh.triangle_count());
        self.rasterizer.draw_mesh(mesh, program, &mut self.frame)
    }

    /// Presents the finished frame through the display and drains pending
    /// quit signals into the flag reported by `should_quit`. Ends the frame:
    /// the next draw requires a new `clear`.
    pub fn show(&mut self) -> Result<(), RasterError> {
        self.display.present(
            self.frame.color_buffer(),
            self.frame.width as u32,
            self.frame.height as u32,
        )?;
        if self.display.poll_quit_requested() {
            self.quit = true;
        }
        self.phase = FramePhase::Presented;
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Clears both stages of `program` and resets its uniform store.
    pub fn delete_shader_program(&self, program: &mut ShaderProgram) {
        program.clear();
    }

    /// Read access to the framebuffer, for tests and headless rendering.
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
