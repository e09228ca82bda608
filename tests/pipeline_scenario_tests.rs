//! End-to-end scenarios driven through the full pipeline with a headless
//! display: full-viewport fills, depth ordering, and perspective-correct
//! color interpolation.

use glam::Vec4;
use softraster::{
    fragment_constant, fragment_interpolated, vertex_color, vertex_identity, HeadlessDisplay,
    Mesh, RasterPipeline, ShaderProgram,
};

const WIDTH: u32 = 64;
const HEIGHT: u32 = 64;

fn make_pipeline() -> RasterPipeline<HeadlessDisplay> {
    RasterPipeline::initialize(HeadlessDisplay::new(), "test", WIDTH, HEIGHT, 1)
        .expect("headless surface creation should not fail")
}

/// Two triangles covering all of NDC [-1, 1] x [-1, 1] at the given depth.
fn full_viewport_quad(depth: f32) -> Mesh {
    let mut mesh = Mesh::new();
    mesh.set_vertex_attribs(
        0,
        &[
            Vec4::new(-1.0, -1.0, depth, 1.0),
            Vec4::new(1.0, -1.0, depth, 1.0),
            Vec4::new(-1.0, 1.0, depth, 1.0),
            Vec4::new(1.0, 1.0, depth, 1.0),
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

fn assert_uniform_frame(pipeline: &RasterPipeline<HeadlessDisplay>, expected: [u8; 4]) {
    for y in 0..HEIGHT as usize {
        for x in 0..WIDTH as usize {
            assert_eq!(
                pipeline.frame().pixel(x, y),
                expected,
                "pixel ({}, {})",
                x,
                y
            );
        }
    }
}

#[test]
fn full_viewport_quad_paints_every_pixel_red() {
    let mut pipeline = make_pipeline();
    let quad = full_viewport_quad(0.0);
    let program = constant_program(Vec4::new(1.0, 0.0, 0.0, 1.0));

    pipeline.clear(Vec4::ZERO);
    pipeline.draw_object(&quad, &program).unwrap();

    assert_uniform_frame(&pipeline, [255, 0, 0, 255]);
}

#[test]
fn nearer_geometry_wins_regardless_of_submission_order() {
    let near = full_viewport_quad(-0.5);
    let far = full_viewport_quad(0.5);
    let near_program = constant_program(Vec4::new(1.0, 0.0, 0.0, 1.0));
    let far_program = constant_program(Vec4::new(0.0, 0.0, 1.0, 1.0));

    // Near first, far second: the far quad fails every depth test.
    let mut pipeline = make_pipeline();
    pipeline.enable_depth_test();
    pipeline.clear(Vec4::ZERO);
    pipeline.draw_object(&near, &near_program).unwrap();
    pipeline.draw_object(&far, &far_program).unwrap();
    assert_uniform_frame(&pipeline, [255, 0, 0, 255]);

    // Far first, near second: the near quad overwrites everything.
    let mut pipeline = make_pipeline();
    pipeline.enable_depth_test();
    pipeline.clear(Vec4::ZERO);
    pipeline.draw_object(&far, &far_program).unwrap();
    pipeline.draw_object(&near, &near_program).unwrap();
    assert_uniform_frame(&pipeline, [255, 0, 0, 255]);
}

#[test]
fn without_depth_testing_the_last_draw_wins() {
    let near = full_viewport_quad(-0.5);
    let far = full_viewport_quad(0.5);
    let near_program = constant_program(Vec4::new(1.0, 0.0, 0.0, 1.0));
    let far_program = constant_program(Vec4::new(0.0, 0.0, 1.0, 1.0));

    let mut pipeline = make_pipeline();
    pipeline.clear(Vec4::ZERO);
    pipeline.draw_object(&near, &near_program).unwrap();
    pipeline.draw_object(&far, &far_program).unwrap();

    assert_uniform_frame(&pipeline, [0, 0, 255, 255]);
}

#[test]
fn equal_depths_favor_the_most_recent_triangle() {
    let first = full_viewport_quad(0.25);
    let second = full_viewport_quad(0.25);
    let first_program = constant_program(Vec4::new(1.0, 0.0, 0.0, 1.0));
    let second_program = constant_program(Vec4::new(0.0, 1.0, 0.0, 1.0));

    let mut pipeline = make_pipeline();
    pipeline.enable_depth_test();
    pipeline.clear(Vec4::ZERO);
    pipeline.draw_object(&first, &first_program).unwrap();
    pipeline.draw_object(&second, &second_program).unwrap();

    assert_uniform_frame(&pipeline, [0, 255, 0, 255]);
}

#[test]
fn interpolated_colors_are_convex_combinations_of_the_vertices() {
    // Corner colors: red, green, blue, white. The lower-left triangle is
    // spanned by red/green/blue, so its interior blends must keep
    // r + g + b at full intensity and alpha saturated.
    let mut quad = full_viewport_quad(0.0);
    quad.set_vertex_attribs(
        1,
        &[
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
            Vec4::new(1.0, 1.0, 1.0, 1.0),
        ],
    )
    .unwrap();
    let program = ShaderProgram::new(vertex_color(), fragment_interpolated());

    let mut pipeline = make_pipeline();
    pipeline.clear(Vec4::ZERO);
    pipeline.draw_object(&quad, &program).unwrap();

    // Interior pixels of the lower-left triangle (screen-space: left/bottom).
    for (x, y) in [(10usize, 40usize), (20, 50), (5, 35), (30, 60)] {
        let [r, g, b, a] = pipeline.frame().pixel(x, y);
        let sum = r as u32 + g as u32 + b as u32;
        assert!(
            (250..=255).contains(&sum),
            "pixel ({}, {}): channels {:?} should sum to full intensity",
            x,
            y,
            [r, g, b]
        );
        assert_eq!(a, 255);
    }

    // A pixel hugging the red corner reproduces that vertex's color.
    let [r, g, b, _] = pipeline.frame().pixel(0, HEIGHT as usize - 1);
    assert!(r >= 240, "red channel near the red vertex was {}", r);
    assert!(g <= 15 && b <= 15, "foreign channels were {} / {}", g, b);
}
