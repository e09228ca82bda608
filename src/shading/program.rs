//! Shader programs: a vertex stage, a fragment stage, and an owned uniform
//! store. Stages are pure functions over their explicit inputs; every piece
//! of per-draw state they see arrives through the `Uniforms` parameter.

use glam::{Mat4, Vec4};

use crate::error::RasterError;

use super::attribs::Attribs;
use super::uniforms::{Uniform, Uniforms};

/// Vertex stage: reads one vertex's input attributes, writes forwarded
/// attributes into the output bag, and returns the clip-space position.
///
/// The output bag is seeded with a copy of the input bag before the stage
/// runs, so channels the stage does not write are forwarded unchanged.
pub type VertexShader = Box<dyn Fn(&Uniforms, &Attribs, &mut Attribs) -> Result<Vec4, RasterError>>;

/// Fragment stage: reads the perspective-correct interpolated attributes of
/// one covered pixel and returns an RGBA color in [0, 1] per channel.
pub type FragmentShader = Box<dyn Fn(&Uniforms, &Attribs) -> Result<Vec4, RasterError>>;

/// An immutable stage pair plus a mutable uniform store.
pub struct ShaderProgram {
    vertex: Option<VertexShader>,
    fragment: Option<FragmentShader>,
    uniforms: Uniforms,
}

impl ShaderProgram {
    pub fn new(vertex: VertexShader, fragment: FragmentShader) -> Self {
        Self {
            vertex: Some(vertex),
            fragment: Some(fragment),
            uniforms: Uniforms::new(),
        }
    }

    /// Binds a uniform in this program's own store.
    pub fn set_uniform<T: Uniform>(&mut self, name: &str, value: T) {
        self.uniforms.set(name, value);
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    /// Drops both stages and resets the uniform store to empty. Drawing with
    /// a cleared program reports `InvalidProgram`.
    pub fn clear(&mut self) {
        self.vertex = None;
        self.fragment = None;
        self.uniforms = Uniforms::new();
    }

    pub(crate) fn stages(&self) -> Result<(&VertexShader, &FragmentShader), RasterError> {
        match (&self.vertex, &self.fragment) {
            (Some(vertex), Some(fragment)) => Ok((vertex, fragment)),
            _ => Err(RasterError::InvalidProgram),
        }
    }
}

/// Passes input channel 0 through as the clip position.
pub fn vertex_identity() -> VertexShader {
    Box::new(|_uniforms, input, _output| input.get::<Vec4>(0))
}

/// Applies the `"transform"` Mat4 uniform to input channel 0.
pub fn vertex_transform() -> VertexShader {
    Box::new(|uniforms, input, _output| {
        let position = input.get::<Vec4>(0)?;
        let transform = uniforms.get::<Mat4>("transform")?;
        Ok(transform * position)
    })
}

/// Forwards the vec4 color in input channel 1 to output channel 0; position
/// is passed through untransformed.
pub fn vertex_color() -> VertexShader {
    Box::new(|_uniforms, input, output| {
        let color = input.get::<Vec4>(1)?;
        output.set(0, color);
        input.get::<Vec4>(0)
    })
}

/// Color forwarding plus the `"transform"` uniform applied to the position.
pub fn vertex_color_transform() -> VertexShader {
    Box::new(|uniforms, input, output| {
        let color = input.get::<Vec4>(1)?;
        output.set(0, color);
        let position = input.get::<Vec4>(0)?;
        let transform = uniforms.get::<Mat4>("transform")?;
        Ok(transform * position)
    })
}

/// Returns the `"color"` vec4 uniform for every fragment.
pub fn fragment_constant() -> FragmentShader {
    Box::new(|uniforms, _input| uniforms.get::<Vec4>("color"))
}

/// Returns the interpolated vec4 in channel 0.
pub fn fragment_interpolated() -> FragmentShader {
    Box::new(|_uniforms, input| input.get::<Vec4>(0))
}
