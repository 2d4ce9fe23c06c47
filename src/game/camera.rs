use cgmath::prelude::*;
use cgmath::{Point3, Vector3};

/// Eye sits at head height above the player's feet-level origin.
pub const EYE_OFFSET: Vector3<f32> = Vector3::new(0.0, 1.7, 0.0);

// Straight up/down would make the view direction collinear with the
// up vector, so pitch stops just short of vertical.
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// First-person eye: world position plus yaw/pitch angles in radians.
/// Yaw rotates about +Y; yaw 0 looks along +X.
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera {
    pub fn new(position: Point3<f32>, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Keeps the eye glued to the player.
    pub fn follow(&mut self, player_position: Point3<f32>) {
        self.position = player_position + EYE_OFFSET;
    }

    /// Applies a mouse delta in pixels. Positive `delta_y` (mouse pulled
    /// down) pitches the view down.
    pub fn apply_look(&mut self, delta_x: f32, delta_y: f32, radians_per_pixel: f32) {
        self.yaw += delta_x * radians_per_pixel;
        self.pitch = (self.pitch - delta_y * radians_per_pixel).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn get_view_matrix(&self) -> cgmath::Matrix4<f32> {
        let target = self.position + self.get_direction();
        cgmath::Matrix4::look_at_rh(self.position, target, Vector3::unit_y())
    }

    pub fn get_direction(&self) -> Vector3<f32> {
        Vector3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn get_forward_horizontal(&self) -> Vector3<f32> {
        Vector3::new(self.yaw.cos(), 0.0, self.yaw.sin()).normalize()
    }

    pub fn get_right(&self) -> Vector3<f32> {
        self.get_forward_horizontal()
            .cross(Vector3::unit_y())
            .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn test_basis_at_yaw_zero() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), 0.0, 0.0);
        assert!(approx(camera.get_direction(), Vector3::new(1.0, 0.0, 0.0)));
        assert!(approx(camera.get_forward_horizontal(), Vector3::new(1.0, 0.0, 0.0)));
        assert!(approx(camera.get_right(), Vector3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_pitch_tilts_direction_only() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), 0.0, 0.5);
        assert!(camera.get_direction().y > 0.0);
        // The walking basis stays horizontal regardless of pitch.
        assert_eq!(camera.get_forward_horizontal().y, 0.0);
    }

    #[test]
    fn test_follow_applies_eye_offset() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), 0.0, 0.0);
        camera.follow(Point3::new(2.0, 10.0, -3.0));
        assert_eq!(camera.position, Point3::new(2.0, 11.7, -3.0));
    }

    #[test]
    fn test_look_clamps_pitch() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), 0.0, 0.0);
        camera.apply_look(0.0, -100_000.0, 0.005);
        assert!((camera.pitch - PITCH_LIMIT).abs() < 1e-6);
        camera.apply_look(0.0, 100_000.0, 0.005);
        assert!((camera.pitch + PITCH_LIMIT).abs() < 1e-6);
    }

    #[test]
    fn test_look_turns_yaw() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), 1.0, 0.0);
        camera.apply_look(100.0, 0.0, 0.005);
        assert!((camera.yaw - 1.5).abs() < 1e-6);
    }
}
