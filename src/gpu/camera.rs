//! Camera for 3D orbit view.

use glam::{Mat4, Vec3};

/// Orbit camera looking at the charge.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera on the +Z axis, 10 units out, with a 120° vertical field of view.
    pub fn new(aspect: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
            target: Vec3::ZERO,
            fov_y: 120f32.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        self.target + self.distance * self.offset_dir()
    }

    /// Unit vector from the target towards the eye.
    fn offset_dir(&self) -> Vec3 {
        let x = self.pitch.cos() * self.yaw.sin();
        let y = self.pitch.sin();
        let z = self.pitch.cos() * self.yaw.cos();
        Vec3::new(x, y, z)
    }

    /// Camera right and up vectors in world space.
    pub fn right_up(&self) -> (Vec3, Vec3) {
        let forward = -self.offset_dir();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        (right, up)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Recompute the aspect ratio from a viewport size. Zero heights are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

/// Pointer-driven orbit, pan and zoom with inertia.
///
/// Input accumulates into pending deltas; every [`update`](Self::update)
/// applies `damping_factor` of what is pending and keeps the rest for the
/// following frames. A damping factor of 0 applies everything at once.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub damping_factor: f32,
    /// Radians per pixel of drag.
    pub rotate_speed: f32,
    /// Fraction of the camera distance moved per pixel of pan.
    pub pan_speed: f32,
    /// Zoom ratio per scroll line.
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_pitch: f32,
    yaw_delta: f32,
    pitch_delta: f32,
    pan_delta: Vec3,
    zoom_scale: f32,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            damping_factor: 0.1,
            rotate_speed: 0.005,
            pan_speed: 0.0015,
            zoom_step: 0.95,
            min_distance: 0.5,
            max_distance: 200.0,
            max_pitch: 1.5,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            pan_delta: Vec3::ZERO,
            zoom_scale: 1.0,
        }
    }

    pub fn with_damping(mut self, damping_factor: f32) -> Self {
        self.damping_factor = damping_factor.clamp(0.0, 1.0);
        self
    }

    /// Queue an orbit from a drag of `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_delta -= dx * self.rotate_speed;
        self.pitch_delta += dy * self.rotate_speed;
    }

    /// Queue a pan in the camera plane from a drag of `(dx, dy)` pixels.
    pub fn pan(&mut self, camera: &Camera, dx: f32, dy: f32) {
        let (right, up) = camera.right_up();
        let scale = self.pan_speed * camera.distance;
        self.pan_delta += (-dx * scale) * right + (dy * scale) * up;
    }

    /// Queue a zoom. Positive `lines` moves closer.
    pub fn zoom(&mut self, lines: f32) {
        self.zoom_scale *= self.zoom_step.powf(lines);
    }

    /// Apply pending motion to `camera`. Returns true while motion remains.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let f = if self.damping_factor > 0.0 {
            self.damping_factor
        } else {
            1.0
        };

        camera.yaw += self.yaw_delta * f;
        camera.pitch = (camera.pitch + self.pitch_delta * f).clamp(-self.max_pitch, self.max_pitch);
        camera.target += self.pan_delta * f;
        camera.distance =
            (camera.distance * self.zoom_scale).clamp(self.min_distance, self.max_distance);
        self.zoom_scale = 1.0;

        let keep = 1.0 - f;
        self.yaw_delta *= keep;
        self.pitch_delta *= keep;
        self.pan_delta *= keep;

        const EPS: f32 = 1e-6;
        self.yaw_delta.abs() > EPS || self.pitch_delta.abs() > EPS || self.pan_delta.length() > EPS
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_eye_on_z_axis() {
        let camera = Camera::new(1.0);
        let eye = camera.position();
        assert!((eye - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn test_origin_projects_to_screen_centre() {
        let camera = Camera::new(1.5);
        let clip = camera.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_zero_height_viewport_ignored() {
        let mut camera = Camera::new(2.0);
        camera.set_viewport(800, 0);
        assert_eq!(camera.aspect, 2.0);
        camera.set_viewport(800, 400);
        assert_eq!(camera.aspect, 2.0);
        camera.set_viewport(300, 600);
        assert_eq!(camera.aspect, 0.5);
    }

    #[test]
    fn test_damped_rotation_converges() {
        let mut camera = Camera::new(1.0);
        let mut controls = OrbitControls::new();
        controls.rotate(-100.0, 0.0);

        // First frame only applies a tenth
        assert!(controls.update(&mut camera));
        assert!((camera.yaw - 0.05).abs() < 1e-6);

        for _ in 0..300 {
            controls.update(&mut camera);
        }
        assert!((camera.yaw - 0.5).abs() < 1e-4);
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_undamped_rotation_is_immediate() {
        let mut camera = Camera::new(1.0);
        let mut controls = OrbitControls::new().with_damping(0.0);
        controls.rotate(-100.0, 0.0);
        assert!(!controls.update(&mut camera));
        assert!((camera.yaw - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::new(1.0);
        let mut controls = OrbitControls::new().with_damping(0.0);
        controls.rotate(0.0, 10_000.0);
        controls.update(&mut camera);
        assert_eq!(camera.pitch, 1.5);
    }

    #[test]
    fn test_zoom_in_and_clamp() {
        let mut camera = Camera::new(1.0);
        let mut controls = OrbitControls::new();
        controls.zoom(1.0);
        controls.update(&mut camera);
        assert!((camera.distance - 9.5).abs() < 1e-5);

        controls.zoom(1000.0);
        controls.update(&mut camera);
        assert_eq!(camera.distance, controls.min_distance);
    }

    #[test]
    fn test_pan_moves_target_in_view_plane() {
        let mut camera = Camera::new(1.0);
        let mut controls = OrbitControls::new().with_damping(0.0);
        controls.pan(&camera, 100.0, 0.0);
        controls.update(&mut camera);

        // Looking down -Z: right is +X, dragging right moves the target left
        assert!(camera.target.x < 0.0);
        assert!(camera.target.y.abs() < 1e-6);
        assert!(camera.target.z.abs() < 1e-6);
    }
}
