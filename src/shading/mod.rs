/// Attribute bags, uniform stores, and shader programs.
/// These are the data carriers between the application and the two
/// programmable stages of the pipeline.
pub mod attribs;
pub mod program;
pub mod uniforms;

pub use attribs::{AttribDim, Attribs, Attribute};
pub use program::{
    fragment_constant, fragment_interpolated, vertex_color, vertex_color_transform,
    vertex_identity, vertex_transform, FragmentShader, ShaderProgram, VertexShader,
};
pub use uniforms::{Uniform, UniformValue, Uniforms};
