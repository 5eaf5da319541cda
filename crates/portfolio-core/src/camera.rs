//! Scroll-driven camera distance and the perspective camera built from it.

use crate::scene::SceneParams;
use glam::{Mat4, Vec3};

/// Eases the eye distance toward `base - scroll * zoom`, floored so the eye
/// never enters the sphere. The ease is a fixed fraction per call.
#[derive(Clone, Debug)]
pub struct CameraRig {
    distance: f32,
}

impl CameraRig {
    pub fn new(params: &SceneParams) -> Self {
        Self {
            distance: params.base_distance,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub fn target_distance(params: &SceneParams, scroll_offset: f32) -> f32 {
        (params.base_distance - scroll_offset * params.scroll_zoom).max(params.min_distance)
    }

    pub fn step(&mut self, scroll_offset: f32, params: &SceneParams) {
        let target = Self::target_distance(params, scroll_offset);
        self.distance += (target - self.distance) * params.camera_smooth;
        // rounding must not push the eye past the floor
        self.distance = self.distance.max(params.min_distance);
    }

    pub fn camera(&self, aspect: f32, params: &SceneParams) -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, self.distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: params.fov_degrees.to_radians(),
            znear: params.z_near,
            zfar: params.z_far,
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect.max(1e-3), self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}
