//! Scan-conversion core.
//!
//! Draws are referentially transparent: the mesh, the shader program, and
//! the framebuffer all arrive as explicit parameters, so the core runs under
//! test without a live display. By contract the scan is brute force: every
//! triangle is tested against every pixel of the frame, with no bounding
//! box and no spatial acceleration. There is likewise no near-plane
//! clipping (a clip position with w <= 0 projects to whatever the divide
//! yields), no back-face culling, and no alpha blending.

use glam::{Vec2, Vec4};

use crate::count_call;
use crate::error::RasterError;
use crate::mesh::Mesh;
use crate::perf::FUNCTION_COUNTERS;
use crate::shading::{Attribs, FragmentShader, ShaderProgram, Uniforms, VertexShader};

use super::framebuffer::{rgba_to_u32, Framebuffer};

/// A shaded, projected triangle corner: post-divide NDC position, the
/// perspective denominator captured before the divide, and the vertex
/// stage's output attributes.
struct Corner {
    ndc: Vec4,
    inv_w: f32,
    attribs: Attribs,
}

impl Corner {
    fn project(clip: Vec4, attribs: Attribs) -> Self {
        let inv_w = 1.0 / clip.w;
        Self {
            ndc: Vec4::new(clip.x * inv_w, clip.y * inv_w, clip.z * inv_w, 1.0),
            inv_w,
            attribs,
        }
    }
}

/// 2D edge function for the directed edge a -> b evaluated at `p`.
#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    -(b.y - a.y) * (p.x - a.x) + (b.x - a.x) * (p.y - a.y)
}

/// Coverage test oriented by the triangle's doubled signed area: all three
/// edge functions must agree in sign with the area, so both windings
/// rasterize identically.
#[inline]
fn inside(p: Vec2, p0: Vec2, p1: Vec2, p2: Vec2, area: f32) -> bool {
    let e0 = edge(p0, p1, p);
    let e1 = edge(p1, p2, p);
    let e2 = edge(p2, p0, p);
    if area >= 0.0 {
        e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0
    } else {
        e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0
    }
}

/// Unsigned doubled area of the triangle (a, b, c).
#[inline]
fn doubled_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let ab = b - a;
    let ac = c - a;
    (ab.x * ac.y - ab.y * ac.x).abs()
}

/// NDC position of the sample for pixel grid coordinate (i, j), where i and
/// j may carry fractional subsample offsets. Row 0 maps to the top of the
/// frame.
#[inline]
fn sample_position(i: f32, j: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        2.0 * (i + 0.5) / width - 1.0,
        1.0 - 2.0 * (j + 0.5) / height,
    )
}

/// Perspective-correct blend of the three corners' output bags:
/// `(sum b_k * v_k / w_k) / (sum b_k / w_k)` per component, arity per the
/// channel's stored tag.
fn interpolate(corners: &[Corner; 3], weights: [f32; 3]) -> Result<Attribs, RasterError> {
    let denom = weights[0] * corners[0].inv_w
        + weights[1] * corners[1].inv_w
        + weights[2] * corners[2].inv_w;

    let mut blended = Attribs::new();
    for slot in 0..corners[0].attribs.len() {
        let (dim, a) = match corners[0].attribs.slot_raw(slot) {
            Some(raw) => raw,
            None => continue,
        };
        let (dim_b, b) = corners[1].attribs.slot_raw(slot).ok_or(RasterError::OutOfRange {
            what: "attribute slot",
            index: slot,
            len: corners[1].attribs.len(),
        })?;
        let (dim_c, c) = corners[2].attribs.slot_raw(slot).ok_or(RasterError::OutOfRange {
            what: "attribute slot",
            index: slot,
            len: corners[2].attribs.len(),
        })?;
        if dim_b != dim {
            return Err(RasterError::DimensionMismatch {
                index: slot,
                stored: dim.len(),
                requested: dim_b.len(),
            });
        }
        if dim_c != dim {
            return Err(RasterError::DimensionMismatch {
                index: slot,
                stored: dim.len(),
                requested: dim_c.len(),
            });
        }

        let mut values = [0.0f32; 4];
        for comp in 0..dim.len() {
            let numer = weights[0] * a[comp] * corners[0].inv_w
                + weights[1] * b[comp] * corners[1].inv_w
                + weights[2] * c[comp] * corners[2].inv_w;
            values[comp] = numer / denom;
        }
        blended.set_raw(slot, dim, values);
    }
    Ok(blended)
}

/// The scan-conversion core. Holds only the sampling configuration; all
/// per-draw state is passed into `draw_mesh`.
pub struct Rasterizer {
    samples_per_pixel: u32,
    grid: u32,
}

impl Rasterizer {
    /// `samples_per_pixel` selects the supersampling subgrid: the grid side
    /// is `floor(sqrt(spp))`, never less than 1.
    pub fn new(samples_per_pixel: u32) -> Self {
        let samples_per_pixel = samples_per_pixel.max(1);
        let grid = ((samples_per_pixel as f32).sqrt() as u32).max(1);
        Self {
            samples_per_pixel,
            grid,
        }
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    /// Draws every triangle of `mesh`, in list order, through `program` into
    /// `frame`. The mesh is validated before any pixel is written; a
    /// malformed mesh fails the whole call.
    pub fn draw_mesh(
        &self,
        mesh: &Mesh,
        program: &ShaderProgram,
        frame: &mut Framebuffer,
    ) -> Result<(), RasterError> {
        count_call!(FUNCTION_COUNTERS.draw_mesh_calls);
        let (vertex_stage, fragment_stage) = program.stages()?;
        let uniforms = program.uniforms();
        mesh.validate()?;

        for triangle in mesh.triangles() {
            let corners = [
                shade_vertex(mesh, triangle[0] as usize, vertex_stage, uniforms)?,
                shade_vertex(mesh, triangle[1] as usize, vertex_stage, uniforms)?,
                shade_vertex(mesh, triangle[2] as usize, vertex_stage, uniforms)?,
            ];
            self.scan_triangle(&corners, fragment_stage, uniforms, frame)?;
        }
        Ok(())
    }

    fn scan_triangle(
        &self,
        corners: &[Corner; 3],
        fragment_stage: &FragmentShader,
        uniforms: &Uniforms,
        frame: &mut Framebuffer,
    ) -> Result<(), RasterError> {
        count_call!(FUNCTION_COUNTERS.triangles_processed);

        let p = [
            corners[0].ndc.truncate().truncate(),
            corners[1].ndc.truncate().truncate(),
            corners[2].ndc.truncate().truncate(),
        ];
        // Doubled signed area; its sign orients the coverage test.
        let area = edge(p[0], p[1], p[2]);
        if area == 0.0 {
            return Ok(());
        }

        let z = [corners[0].ndc.z, corners[1].ndc.z, corners[2].ndc.z];
        let width = frame.width;
        let height = frame.height;
        let (width_f, height_f) = (width as f32, height as f32);

        for j in 0..height {
            for i in 0..width {
                count_call!(FUNCTION_COUNTERS.pixels_tested);
                let center = sample_position(i as f32, j as f32, width_f, height_f);
                if !inside(center, p[0], p[1], p[2], area) {
                    continue;
                }
                count_call!(FUNCTION_COUNTERS.pixels_covered);

                let weights = self.coverage_weights(i, j, &p, area, width_f, height_f);
                let depth = weights[0] * z[0] + weights[1] * z[1] + weights[2] * z[2];

                match frame.test_depth(i, j, depth) {
                    Some(index) => {
                        let attribs = interpolate(corners, weights)?;
                        let color = fragment_stage(uniforms, &attribs)?;
                        frame.write_color(index, rgba_to_u32(color));
                        count_call!(FUNCTION_COUNTERS.depth_test_passed);
                    }
                    None => {
                        count_call!(FUNCTION_COUNTERS.depth_test_failed);
                    }
                }
            }
        }
        Ok(())
    }

    /// Accumulates un-normalized area-ratio barycentric weights over the
    /// S x S subsample grid of pixel (i, j), then divides by the configured
    /// sample count.
    fn coverage_weights(
        &self,
        i: usize,
        j: usize,
        p: &[Vec2; 3],
        area: f32,
        width: f32,
        height: f32,
    ) -> [f32; 3] {
        let grid = self.grid as f32;
        let total = doubled_area(p[0], p[1], p[2]);
        let mut weights = [0.0f32; 3];

        for k in 0..self.grid {
            for l in 0..self.grid {
                let sub = sample_position(
                    i as f32 + k as f32 / grid,
                    j as f32 + l as f32 / grid,
                    width,
                    height,
                );
                if !inside(sub, p[0], p[1], p[2], area) {
                    continue;
                }
                count_call!(FUNCTION_COUNTERS.samples_inside);
                weights[0] += doubled_area(sub, p[1], p[2]) / total;
                weights[1] += doubled_area(sub, p[2], p[0]) / total;
                weights[2] += doubled_area(sub, p[0], p[1]) / total;
            }
        }

        for weight in &mut weights {
            *weight /= self.samples_per_pixel as f32;
        }

        // A sample landing exactly on a vertex or an edge can zero out a
        // weight; the triple collapses to the first corner instead of
        // blending with an exact zero.
        if weights[0] == 0.0 || weights[1] == 0.0 || weights[2] == 0.0 {
            weights = [1.0, 0.0, 0.0];
        }
        weights
    }
}

fn shade_vertex(
    mesh: &Mesh,
    index: usize,
    vertex_stage: &VertexShader,
    uniforms: &Uniforms,
) -> Result<Corner, RasterError> {
    let input = mesh.gather(index)?;
    // Channels the stage does not write are forwarded from the input.
    let mut output = input.clone();
    let clip = vertex_stage(uniforms, &input, &mut output)?;
    Ok(Corner::project(clip, output))
}
