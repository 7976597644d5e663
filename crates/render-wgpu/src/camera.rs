use glam::{Mat4, Vec3};

const PITCH_LIMIT: f32 = 89.0_f32 * std::f32::consts::PI / 180.0;

/// Camera that orbits, zooms and pans around a target point.
/// Camera state lives outside the scene; moving it never regenerates meshes.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO)
    }
}

impl OrbitCamera {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.0015,
            min_distance: 0.5,
        }
    }

    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    /// Rotate the eye around the target. Pitch stops short of the poles.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let offset = self.eye - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let yaw = offset.x.atan2(offset.z) - dx * self.rotate_speed;
        let pitch = ((offset.y / radius).clamp(-1.0, 1.0).asin() + dy * self.rotate_speed)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let offset = Vec3::new(
            pitch.cos() * yaw.sin(),
            pitch.sin(),
            pitch.cos() * yaw.cos(),
        ) * radius;
        self.eye = self.target + offset;
    }

    /// Positive `delta` moves toward the target.
    pub fn zoom(&mut self, delta: f32) {
        let offset = self.eye - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let factor = (1.0 - delta * self.zoom_speed).max(0.1);
        let radius_new = (radius * factor).max(self.min_distance);
        self.eye = self.target + offset / radius * radius_new;
    }

    /// Slide eye and target together across the view plane.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.eye).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let cam_up = right.cross(forward);
        let scale = self.pan_speed * self.distance();
        let shift = (-right * dx + cam_up * dy) * scale;
        self.eye += shift;
        self.target += shift;
    }

    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
