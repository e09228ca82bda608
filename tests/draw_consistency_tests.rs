//! Consistency properties of the draw loop: repeatability, supersampling
//! invariants, partial overlap under depth testing, and the present path.

use glam::Vec4;
use softraster::{
    fragment_constant, fragment_interpolated, vertex_color, vertex_identity, HeadlessDisplay,
    Mesh, RasterPipeline, ShaderProgram,
};

const WIDTH: u32 = 64;
const HEIGHT: u32 = 64;

fn make_pipeline(samples_per_pixel: u32) -> RasterPipeline<HeadlessDisplay> {
    RasterPipeline::initialize(HeadlessDisplay::new(), "test", WIDTH, HEIGHT, samples_per_pixel)
        .expect("headless surface creation should not fail")
}

/// Full-height quad spanning [x0, x1] in NDC at a constant depth.
fn vertical_quad(x0: f32, x1: f32, depth: f32) -> Mesh {
    let mut mesh = Mesh::new();
    mesh.set_vertex_attribs(
        0,
        &[
            Vec4::new(x0, -1.0, depth, 1.0),
            Vec4::new(x1, -1.0, depth, 1.0),
            Vec4::new(x0, 1.0, depth, 1.0),
            Vec4::new(x1, 1.0, depth, 1.0),
        ],
    )
    .unwrap();
    mesh.set_triangle_indices(&[[0, 1, 2], [1, 3, 2]]);
    mesh
}

fn constant_program(color: Vec4) -> ShaderProgram {
    let mut program = ShaderProgram::new(vertex_identity(), fragment_constant());
    program.set_uniform("color", color);
    program
}

/// Gradient quad used where repeated draws must reproduce non-trivial
/// per-pixel values.
fn gradient_quad() -> (Mesh, ShaderProgram) {
    let mut mesh = vertical_quad(-1.0, 1.0, 0.0);
    mesh.set_vertex_attribs(
        1,
        &[
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
            Vec4::new(1.0, 1.0, 0.0, 1.0),
        ],
    )
    .unwrap();
    (mesh, ShaderProgram::new(vertex_color(), fragment_interpolated()))
}

#[test]
fn drawing_the_same_mesh_twice_changes_nothing() {
    let (mesh, program) = gradient_quad();

    let mut once = make_pipeline(1);
    once.clear(Vec4::ZERO);
    once.draw_object(&mesh, &program).unwrap();

    let mut twice = make_pipeline(1);
    twice.clear(Vec4::ZERO);
    twice.draw_object(&mesh, &program).unwrap();
    twice.draw_object(&mesh, &program).unwrap();

    assert_eq!(once.frame().color_buffer(), twice.frame().color_buffer());
}

#[test]
fn overlapping_quads_resolve_by_depth_in_both_orders() {
    let near = vertical_quad(-1.0, 0.5, -0.5);
    let far = vertical_quad(-0.5, 1.0, 0.5);
    let near_program = constant_program(Vec4::new(1.0, 0.0, 0.0, 1.0));
    let far_program = constant_program(Vec4::new(0.0, 0.0, 1.0, 1.0));

    let expectations = [
        (8usize, [255, 0, 0, 255]),  // near quad only
        (32, [255, 0, 0, 255]),      // overlap: nearer quad wins
        (56, [0, 0, 255, 255]),      // far quad only
    ];

    for order in [[&near, &far], [&far, &near]] {
        let mut pipeline = make_pipeline(1);
        pipeline.enable_depth_test();
        pipeline.clear(Vec4::ZERO);
        for mesh in order {
            let program = if std::ptr::eq(mesh, &near) {
                &near_program
            } else {
                &far_program
            };
            pipeline.draw_object(mesh, program).unwrap();
        }
        for (x, expected) in expectations {
            assert_eq!(
                pipeline.frame().pixel(x, 32),
                expected,
                "column {} resolved wrongly",
                x
            );
        }
    }
}

#[test]
fn supersampling_does_not_change_fully_covered_frames() {
    let mesh = vertical_quad(-1.0, 1.0, 0.0);
    let program = constant_program(Vec4::new(0.2, 0.6, 0.9, 1.0));

    let mut plain = make_pipeline(1);
    plain.clear(Vec4::ZERO);
    plain.draw_object(&mesh, &program).unwrap();

    let mut sampled = make_pipeline(4);
    sampled.clear(Vec4::ZERO);
    sampled.draw_object(&mesh, &program).unwrap();

    assert_eq!(plain.frame().color_buffer(), sampled.frame().color_buffer());
}

#[test]
fn show_presents_the_framebuffer_verbatim() {
    let (mesh, program) = gradient_quad();

    let mut pipeline = make_pipeline(1);
    pipeline.clear(Vec4::new(0.0, 0.0, 0.0, 1.0));
    pipeline.draw_object(&mesh, &program).unwrap();
    pipeline.show().unwrap();

    assert_eq!(
        pipeline.display().last_frame(),
        pipeline.frame().color_buffer()
    );
    assert_eq!(pipeline.display().presented_frames(), 1);
}

#[test]
fn quit_flag_latches_after_the_display_requests_it() {
    let display = HeadlessDisplay::quit_after(1);
    let mut pipeline =
        RasterPipeline::initialize(display, "test", 8, 8, 1).expect("initialize should succeed");

    assert!(!pipeline.should_quit());
    pipeline.clear(Vec4::ZERO);
    pipeline.show().unwrap();
    assert!(pipeline.should_quit());
}
