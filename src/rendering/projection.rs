use cgmath::{Matrix4, SquareMatrix};

use crate::game::camera::Camera;

#[rustfmt::skip]
const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::from_cols(
    cgmath::Vector4::new(1.0, 0.0, 0.0, 0.0),
    cgmath::Vector4::new(0.0, 1.0, 0.0, 0.0),
    cgmath::Vector4::new(0.0, 0.0, 0.5, 0.0),
    cgmath::Vector4::new(0.0, 0.0, 0.5, 1.0),
);

pub struct Projection {
    pub aspect: f32,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fov_degrees: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fov_degrees,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn set_fov(&mut self, fov_degrees: f32) {
        self.fov_degrees = fov_degrees;
    }

    pub fn get_projection_matrix(&self) -> Matrix4<f32> {
        cgmath::perspective(
            cgmath::Deg(self.fov_degrees),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    pub fn get_camera_uniform(&self, camera: &Camera) -> CameraUniform {
        let view_proj =
            OPENGL_TO_WGPU_MATRIX * self.get_projection_matrix() * camera.get_view_matrix();
        let inv_view_proj = view_proj.invert().unwrap_or_else(Matrix4::identity);

        CameraUniform {
            view_proj: view_proj.into(),
            inv_view_proj: inv_view_proj.into(),
            eye: camera.position.to_homogeneous().into(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Vector4};

    use super::*;

    #[test]
    fn test_resize_updates_aspect() {
        let mut projection = Projection::new(800, 600, 80.0);
        assert!((projection.aspect - 800.0 / 600.0).abs() < 1e-6);

        projection.resize(1920, 1080);
        assert!((projection.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_ahead_projects_to_screen_center() {
        let projection = Projection::new(1280, 720, 80.0);
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), 0.0, 0.0);

        let uniform = projection.get_camera_uniform(&camera);
        let view_proj: Matrix4<f32> = uniform.view_proj.into();

        // Yaw zero looks down +x, so a point on that axis sits dead center.
        let clip = view_proj * Vector4::new(10.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
        let depth = clip.z / clip.w;
        assert!(depth > 0.0 && depth < 1.0);
    }

    #[test]
    fn test_uniform_carries_eye_position() {
        let projection = Projection::new(1280, 720, 80.0);
        let camera = Camera::new(Point3::new(3.0, 11.7, -2.0), 0.3, -0.2);

        let uniform = projection.get_camera_uniform(&camera);
        assert_eq!(uniform.eye, [3.0, 11.7, -2.0, 1.0]);
    }

    #[test]
    fn test_inverse_round_trips_clip_space() {
        let projection = Projection::new(1280, 720, 80.0);
        let camera = Camera::new(Point3::new(0.0, 10.0, 0.0), 0.7, 0.1);

        let uniform = projection.get_camera_uniform(&camera);
        let view_proj: Matrix4<f32> = uniform.view_proj.into();
        let inverse: Matrix4<f32> = uniform.inv_view_proj.into();

        let clip = view_proj * Vector4::new(8.0, 9.0, 2.0, 1.0);
        let back = inverse * clip;
        assert!((back.x / back.w - 8.0).abs() < 1e-3);
        assert!((back.y / back.w - 9.0).abs() < 1e-3);
        assert!((back.z / back.w - 2.0).abs() < 1e-3);
    }
}
