//! Per-frame driver for the background sphere.
//!
//! `Scene` owns the mesh, the live position buffer and the three animators.
//! The buffer is allocated once and rewritten in place; the renderer is its
//! only reader and learns about changes through [`Scene::take_positions_dirty`].

use crate::bloom::BloomAnimator;
use crate::camera::{Camera, CameraRig};
use crate::constants::*;
use crate::input::InputSample;
use crate::mesh::SphereMesh;
use crate::orientation::OrientationAnimator;
use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Debug)]
pub struct SceneParams {
    pub radius: f32,
    pub spread_amount: f32,
    pub open_lerp: f32,
    pub reference_fps: f32,
    pub bloom_epsilon: f32,
    pub auto_rotate: Vec2,
    pub mouse_sens: f32,
    pub mouse_smooth: f32,
    pub scroll_x_sens: f32,
    pub scroll_zoom: f32,
    pub base_distance: f32,
    pub min_distance: f32,
    pub camera_smooth: f32,
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub max_frame_dt: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            radius: SPHERE_RADIUS,
            spread_amount: SPREAD_AMOUNT,
            open_lerp: OPEN_LERP,
            reference_fps: REFERENCE_FPS,
            bloom_epsilon: BLOOM_EPSILON,
            auto_rotate: Vec2::new(ROTATE_X, ROTATE_Y),
            mouse_sens: MOUSE_SENS,
            mouse_smooth: MOUSE_SMOOTH,
            scroll_x_sens: SCROLL_X_SENS,
            scroll_zoom: SCROLL_ZOOM,
            base_distance: CAMERA_Z,
            min_distance: CAMERA_MIN_DISTANCE,
            camera_smooth: CAMERA_SMOOTH,
            fov_degrees: FOV_DEGREES,
            z_near: Z_NEAR,
            z_far: Z_FAR,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

/// Snapshot of the numeric animation state after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub bloom_factor: f32,
    pub inner_rotation: Vec2,
    pub outer_rotation: Vec2,
    pub camera_distance: f32,
}

pub struct Scene {
    params: SceneParams,
    mesh: SphereMesh,
    positions: Vec<Vec3>,
    bloom: BloomAnimator,
    orientation: OrientationAnimator,
    rig: CameraRig,
    positions_dirty: bool,
}

impl Scene {
    pub fn new(params: SceneParams) -> Self {
        let mesh = SphereMesh::build(params.radius);
        Self::with_mesh(params, mesh)
    }

    pub fn with_mesh(params: SceneParams, mesh: SphereMesh) -> Self {
        let positions = mesh.rest_positions.clone();
        let rig = CameraRig::new(&params);
        log::info!(
            "[scene] built sphere: verts={} edges={} radius={:.2}",
            mesh.vertex_count(),
            mesh.edges.len(),
            params.radius
        );
        Self {
            params,
            mesh,
            positions,
            bloom: BloomAnimator::new(),
            orientation: OrientationAnimator::new(),
            rig,
            // first upload must happen regardless of bloom
            positions_dirty: true,
        }
    }

    #[inline]
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            dt.clamp(0.0, self.params.max_frame_dt)
        } else {
            0.0
        }
    }

    /// One frame: bloom, then orientation, then camera.
    pub fn tick(&mut self, dt: f32, input: &InputSample, is_open: bool) {
        let dt = self.clamp_dt(dt);
        if self
            .bloom
            .step(dt, is_open, &self.params, &self.mesh, &mut self.positions)
        {
            self.positions_dirty = true;
        }
        self.orientation.step(dt, input, &self.params);
        self.rig.step(input.scroll_offset, &self.params);
    }

    /// Returns whether positions changed since the last call, clearing the flag.
    pub fn take_positions_dirty(&mut self) -> bool {
        std::mem::take(&mut self.positions_dirty)
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn mesh(&self) -> &SphereMesh {
        &self.mesh
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.orientation.model_matrix()
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        self.rig.camera(aspect, &self.params)
    }

    pub fn state(&self) -> AnimationState {
        AnimationState {
            bloom_factor: self.bloom.factor(),
            inner_rotation: self.orientation.inner(),
            outer_rotation: self.orientation.outer(),
            camera_distance: self.rig.distance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_upload_is_flagged_once() {
        let mut scene = Scene::new(SceneParams::default());
        assert!(scene.take_positions_dirty());
        assert!(!scene.take_positions_dirty());
        scene.tick(1.0 / 60.0, &InputSample::default(), false);
        assert!(!scene.take_positions_dirty());
    }

    #[test]
    fn stalls_are_clamped() {
        let scene = Scene::new(SceneParams::default());
        assert_eq!(scene.clamp_dt(5.0), MAX_FRAME_DT);
        assert_eq!(scene.clamp_dt(-1.0), 0.0);
        assert_eq!(scene.clamp_dt(f32::NAN), 0.0);
        assert_eq!(scene.clamp_dt(0.02), 0.02);
    }

    #[test]
    fn long_stall_rotates_by_at_most_one_clamped_step() {
        let mut scene = Scene::new(SceneParams::default());
        scene.tick(30.0, &InputSample::default(), false);
        let inner = scene.state().inner_rotation;
        assert!((inner.y - ROTATE_Y * MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn opening_marks_buffer_dirty() {
        let mut scene = Scene::new(SceneParams::default());
        scene.take_positions_dirty();
        scene.tick(1.0 / 60.0, &InputSample::default(), true);
        assert!(scene.take_positions_dirty());
        assert!(scene.state().bloom_factor > 0.0);
    }
}
