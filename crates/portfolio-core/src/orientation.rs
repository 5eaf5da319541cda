use crate::input::InputSample;
use crate::scene::SceneParams;
use glam::{EulerRot, Mat4, Quat, Vec2};

/// Two nested rotations: `inner` spins at a constant rate, `outer` eases
/// toward a tilt derived from the pointer and the scroll offset.
///
/// The outer ease is a fixed fraction per call rather than per second, so
/// its feel depends on the display rate. Bloom is compensated; this is not.
#[derive(Clone, Debug, Default)]
pub struct OrientationAnimator {
    inner: Vec2,
    outer: Vec2,
}

impl OrientationAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> Vec2 {
        self.inner
    }

    pub fn outer(&self) -> Vec2 {
        self.outer
    }

    /// Tilt the outer group is pulled toward for a given input sample.
    #[inline]
    pub fn target_tilt(params: &SceneParams, input: &InputSample) -> Vec2 {
        Vec2::new(
            input.pointer_offset.y * params.mouse_sens + input.scroll_offset * params.scroll_x_sens,
            input.pointer_offset.x * params.mouse_sens,
        )
    }

    pub fn step(&mut self, dt: f32, input: &InputSample, params: &SceneParams) {
        self.inner += params.auto_rotate * dt;
        let target = Self::target_tilt(params, input);
        self.outer += (target - self.outer) * params.mouse_smooth;
    }

    /// Model transform: outer group applied around the inner group.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(euler_xy(self.outer) * euler_xy(self.inner))
    }
}

#[inline]
fn euler_xy(r: Vec2) -> Quat {
    Quat::from_euler(EulerRot::XYZ, r.x, r.y, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn inner_rotation_accumulates_without_input() {
        let params = SceneParams::default();
        let mut o = OrientationAnimator::new();
        for _ in 0..60 {
            o.step(1.0 / 60.0, &InputSample::default(), &params);
        }
        assert!((o.inner().x - params.auto_rotate.x).abs() < 1e-4);
        assert!((o.inner().y - params.auto_rotate.y).abs() < 1e-4);
        assert_eq!(o.outer(), Vec2::ZERO);
    }

    #[test]
    fn outer_rotation_eases_toward_pointer_target() {
        let params = SceneParams::default();
        let input = InputSample {
            pointer_offset: Vec2::new(400.0, -200.0),
            scroll_offset: 1000.0,
        };
        let target = OrientationAnimator::target_tilt(&params, &input);
        assert!((target.x - (-200.0 * 0.0003 + 1000.0 * 0.0005)).abs() < 1e-6);
        assert!((target.y - 400.0 * 0.0003).abs() < 1e-6);

        let mut o = OrientationAnimator::new();
        o.step(0.016, &input, &params);
        assert!((o.outer() - target * params.mouse_smooth).length() < 1e-6);
        for _ in 0..1000 {
            o.step(0.016, &input, &params);
        }
        assert!((o.outer() - target).length() < 1e-4);
    }

    #[test]
    fn identity_model_at_rest() {
        let o = OrientationAnimator::new();
        let p = o.model_matrix().transform_point3(Vec3::new(1.0, 2.0, 3.0));
        assert!((p - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    }
}
