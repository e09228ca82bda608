pub mod framebuffer;
/// Scan-conversion pipeline: coverage, interpolation, depth, present.
pub mod pipeline;
pub mod rasterizer;

pub use framebuffer::{rgba_to_u32, u32_to_rgba, Framebuffer};
pub use pipeline::RasterPipeline;
pub use rasterizer::Rasterizer;
