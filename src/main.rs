//! Demo driver: a software-rasterized scene with a ground plane, a figure
//! assembled from transformed cubes, and a slowly turning flag, viewed
//! through an orbiting fly camera.

use std::time::Instant;

use glam::{Mat4, Vec3, Vec4};
use softraster::{
    fragment_interpolated, vertex_color_transform, Camera, Mesh, RasterError, RasterPipeline,
    ShaderProgram, WindowDisplay,
};

const WIDTH: u32 = 480;
const HEIGHT: u32 = 480;
const SAMPLES_PER_PIXEL: u32 = 4;

fn main() {
    env_logger::init();

    println!("=== softraster demo ===");
    println!("Controls:");
    println!("  ESC or close the window to exit");
    println!();

    if let Err(err) = run() {
        eprintln!("demo failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), RasterError> {
    let display = WindowDisplay::new()?;
    let mut pipeline =
        RasterPipeline::initialize(display, "softraster", WIDTH, HEIGHT, SAMPLES_PER_PIXEL)?;
    pipeline.enable_depth_test();

    let mut program =
        pipeline.create_shader_program(vertex_color_transform(), fragment_interpolated());

    let cube = unit_cube(
        Vec4::new(0.74, 0.45, 0.23, 1.0),
        Vec4::new(0.1, 0.1, 0.1, 1.0),
    )?;
    let ground = flat_quad(10.0, Vec4::new(0.0, 0.6, 0.1, 1.0))?;
    let pole = unit_cube(
        Vec4::new(0.2, 0.2, 0.2, 1.0),
        Vec4::new(0.35, 0.35, 0.35, 1.0),
    )?;
    let flag = flag_banner()?;

    let mut camera = Camera::new(
        Vec3::new(-10.0, 3.0, -7.0),
        Vec3::new(1.0, -0.1, 0.7),
        Vec3::Y,
    );
    let projection = Mat4::perspective_rh(
        60.0f32.to_radians(),
        WIDTH as f32 / HEIGHT as f32,
        0.1,
        100.0,
    );

    let start = Instant::now();
    let mut frame_count = 0u32;
    let mut fps_timer = Instant::now();

    while !pipeline.should_quit() {
        pipeline.clear(Vec4::new(0.25, 0.45, 0.85, 1.0));

        let time = start.elapsed().as_secs_f32();
        let view = camera.view_matrix();
        let view_proj = projection * view;

        draw_ground(&mut pipeline, &mut program, &ground, view_proj)?;
        draw_person(&mut pipeline, &mut program, &cube, view_proj)?;
        draw_flag(&mut pipeline, &mut program, &pole, &flag, view_proj, time)?;

        pipeline.show()?;

        // Slow orbit around the scene.
        camera.move_right(0.05);
        camera.rotate_right(0.45);

        frame_count += 1;
        if fps_timer.elapsed().as_secs() >= 1 {
            println!("FPS: {}", frame_count);
            frame_count = 0;
            fps_timer = Instant::now();
        }
    }

    pipeline.delete_shader_program(&mut program);
    Ok(())
}

fn draw_with_transform(
    pipeline: &mut RasterPipeline<WindowDisplay>,
    program: &mut ShaderProgram,
    mesh: &Mesh,
    transform: Mat4,
) -> Result<(), RasterError> {
    program.set_uniform("transform", transform);
    pipeline.draw_object(mesh, program)
}

fn draw_ground(
    pipeline: &mut RasterPipeline<WindowDisplay>,
    program: &mut ShaderProgram,
    ground: &Mesh,
    view_proj: Mat4,
) -> Result<(), RasterError> {
    let model = Mat4::from_translation(Vec3::new(0.0, -3.0, 0.0));
    draw_with_transform(pipeline, program, ground, view_proj * model)
}

fn draw_person(
    pipeline: &mut RasterPipeline<WindowDisplay>,
    program: &mut ShaderProgram,
    cube: &Mesh,
    view_proj: Mat4,
) -> Result<(), RasterError> {
    let head = Mat4::from_translation(Vec3::new(1.7, 0.5, 0.0));
    let body = Mat4::from_translation(Vec3::new(1.7, -0.85, 0.0))
        * Mat4::from_scale(Vec3::new(0.6, 1.7, 0.9));

    let arm_scale = Mat4::from_scale(Vec3::new(0.3, 1.6, 0.3));
    let arm_down = Mat4::from_translation(Vec3::new(0.0, -0.8, 0.0));
    let left_arm = Mat4::from_translation(Vec3::new(1.9, 0.0, 0.6))
        * Mat4::from_axis_angle(Vec3::Z, (-45.0f32).to_radians())
        * arm_down
        * arm_scale;
    let right_arm = Mat4::from_translation(Vec3::new(1.9, 0.0, -0.6))
        * Mat4::from_axis_angle(Vec3::Z, 45.0f32.to_radians())
        * arm_down
        * arm_scale;

    let leg_scale = Mat4::from_scale(Vec3::new(0.4, 1.7, 0.4));
    let leg_down = Mat4::from_translation(Vec3::new(0.0, -0.85, 0.0));
    let left_leg = Mat4::from_translation(Vec3::new(1.7, -1.7, 0.25))
        * Mat4::from_axis_angle(Vec3::Z, 45.0f32.to_radians())
        * leg_down
        * leg_scale;
    let right_leg = Mat4::from_translation(Vec3::new(1.7, -1.7, -0.25))
        * Mat4::from_axis_angle(Vec3::Z, (-45.0f32).to_radians())
        * leg_down
        * leg_scale;

    for model in [head, body, left_arm, right_arm, left_leg, right_leg] {
        draw_with_transform(pipeline, program, cube, view_proj * model)?;
    }
    Ok(())
}

fn draw_flag(
    pipeline: &mut RasterPipeline<WindowDisplay>,
    program: &mut ShaderProgram,
    pole: &Mesh,
    flag: &Mesh,
    view_proj: Mat4,
    time: f32,
) -> Result<(), RasterError> {
    let pole_model = Mat4::from_translation(Vec3::new(0.0, -0.25, 0.0))
        * Mat4::from_scale(Vec3::new(0.15, 5.5, 0.15));
    draw_with_transform(pipeline, program, pole, view_proj * pole_model)?;

    let flag_model = Mat4::from_axis_angle(Vec3::Y, (time * 40.0).to_radians())
        * Mat4::from_translation(Vec3::new(-1.55, 1.6, 0.0))
        * Mat4::from_scale(Vec3::new(1.4, 1.0, 1.0));
    draw_with_transform(pipeline, program, flag, view_proj * flag_model)
}

/// Unit cube centered on the origin, corner colors alternating between two
/// tones so the faces shade visibly without lighting.
fn unit_cube(near_color: Vec4, far_color: Vec4) -> Result<Mesh, RasterError> {
    let mut mesh = Mesh::new();
    mesh.set_vertex_attribs(
        0,
        &[
            Vec4::new(-0.5, -0.5, 0.5, 1.0),
            Vec4::new(0.5, -0.5, 0.5, 1.0),
            Vec4::new(-0.5, 0.5, 0.5, 1.0),
            Vec4::new(0.5, 0.5, 0.5, 1.0),
            Vec4::new(-0.5, -0.5, -0.5, 1.0),
            Vec4::new(0.5, -0.5, -0.5, 1.0),
            Vec4::new(-0.5, 0.5, -0.5, 1.0),
            Vec4::new(0.5, 0.5, -0.5, 1.0),
        ],
    )?;
    mesh.set_vertex_attribs(
        1,
        &[
            near_color, near_color, far_color, far_color, near_color, near_color, far_color,
            far_color,
        ],
    )?;
    mesh.set_triangle_indices(&[
        [0, 1, 2],
        [1, 2, 3],
        [4, 5, 6],
        [5, 6, 7],
        [0, 1, 4],
        [1, 4, 5],
        [2, 3, 6],
        [3, 6, 7],
        [0, 2, 4],
        [2, 4, 6],
        [1, 3, 5],
        [3, 5, 7],
    ]);
    Ok(mesh)
}

/// Horizontal square of the given half-extent at y = 0.
fn flat_quad(half_extent: f32, color: Vec4) -> Result<Mesh, RasterError> {
    let mut mesh = Mesh::new();
    mesh.set_vertex_attribs(
        0,
        &[
            Vec4::new(-half_extent, 0.0, half_extent, 1.0),
            Vec4::new(half_extent, 0.0, half_extent, 1.0),
            Vec4::new(-half_extent, 0.0, -half_extent, 1.0),
            Vec4::new(half_extent, 0.0, -half_extent, 1.0),
        ],
    )?;
    mesh.set_vertex_attribs(1, &[color, color, color, color])?;
    mesh.set_triangle_indices(&[[0, 1, 2], [1, 2, 3]]);
    Ok(mesh)
}

/// Three horizontal color bands forming the banner.
fn flag_banner() -> Result<Mesh, RasterError> {
    let white = Vec4::new(1.0, 1.0, 1.0, 1.0);
    let saffron = Vec4::new(0.96, 0.77, 0.19, 1.0);
    let green = Vec4::new(0.0, 1.0, 0.0, 1.0);

    let mut mesh = Mesh::new();
    mesh.set_vertex_attribs(
        0,
        &[
            Vec4::new(1.5, 0.2, 0.0, 1.0),
            Vec4::new(-1.5, 0.2, 0.0, 1.0),
            Vec4::new(1.5, 1.5, 0.0, 1.0),
            Vec4::new(-1.5, 1.5, 0.0, 1.0),
            Vec4::new(1.5, -0.2, 0.0, 1.0),
            Vec4::new(-1.5, -0.2, 0.0, 1.0),
            Vec4::new(1.5, -1.5, 0.0, 1.0),
            Vec4::new(-1.5, -1.5, 0.0, 1.0),
        ],
    )?;
    mesh.set_vertex_attribs(
        1,
        &[white, white, saffron, saffron, white, white, green, green],
    )?;
    mesh.set_triangle_indices(&[
        [0, 1, 2],
        [1, 2, 3],
        [0, 1, 5],
        [0, 4, 5],
        [4, 5, 6],
        [5, 6, 7],
    ]);
    Ok(mesh)
}
