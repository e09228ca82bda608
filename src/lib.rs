/// Camera helper for demo scenes.
pub mod camera;
/// Display collaborator: window or headless presentation.
pub mod display;
pub mod error;
pub mod mesh;
/// Optional draw-loop instrumentation counters.
pub mod perf;
/// Software rasterization pipeline: framebuffer, scan conversion, lifecycle.
pub mod rendering;
/// Attribute bags, uniform stores, and shader programs.
pub mod shading;

pub use camera::Camera;
pub use display::{Display, HeadlessDisplay, WindowDisplay};
pub use error::RasterError;
pub use mesh::Mesh;
pub use perf::{CounterSnapshot, FunctionCounters, FUNCTION_COUNTERS};
pub use rendering::{rgba_to_u32, u32_to_rgba, Framebuffer, RasterPipeline, Rasterizer};
pub use shading::{
    fragment_constant, fragment_interpolated, vertex_color, vertex_color_transform,
    vertex_identity, vertex_transform, AttribDim, Attribs, Attribute, FragmentShader,
    ShaderProgram, Uniform, UniformValue, Uniforms, VertexShader,
};
