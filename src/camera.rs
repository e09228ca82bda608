//! Fly-camera helper for demo scenes.

use glam::{Mat4, Quat, Vec3};

/// Position plus view/up basis, moved and rotated along its own axes.
pub struct Camera {
    pub position: Vec3,
    view_dir: Vec3,
    up: Vec3,
}

impl Camera {
    pub fn new(position: Vec3, view_dir: Vec3, up: Vec3) -> Self {
        Self {
            position,
            view_dir: view_dir.normalize(),
            up: up.normalize(),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.view_dir, self.up)
    }

    pub fn view_dir(&self) -> Vec3 {
        self.view_dir
    }

    pub fn move_forward(&mut self, delta: f32) {
        self.position += self.view_dir * delta;
    }

    pub fn move_right(&mut self, delta: f32) {
        self.position += self.view_dir.cross(self.up) * delta;
    }

    pub fn move_up(&mut self, delta: f32) {
        self.position += self.up * delta;
    }

    /// Yaw around the camera's up axis.
    pub fn rotate_right(&mut self, degrees: f32) {
        let rotation = Quat::from_axis_angle(self.up, -degrees.to_radians());
        self.view_dir = (rotation * self.view_dir).normalize();
    }

    /// Pitch around the camera's right axis; the up vector follows.
    pub fn rotate_up(&mut self, degrees: f32) {
        let right = self.view_dir.cross(self.up).normalize();
        let rotation = Quat::from_axis_angle(right, -degrees.to_radians());
        self.view_dir = (rotation * self.view_dir).normalize();
        self.up = (rotation * self.up).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
    }
}
