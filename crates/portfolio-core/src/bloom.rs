use crate::mesh::SphereMesh;
use crate::scene::SceneParams;
use glam::Vec3;

/// Eases the bloom factor toward its target and rewrites vertex positions.
///
/// The factor moves a fraction `min(open_lerp * dt * 60, 1)` of the remaining
/// distance each step, so it approaches the target from one side only and
/// never overshoots.
#[derive(Clone, Debug, Default)]
pub struct BloomAnimator {
    factor: f32,
}

impl BloomAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    #[inline]
    pub fn target(params: &SceneParams, is_open: bool) -> f32 {
        if is_open {
            params.spread_amount
        } else {
            0.0
        }
    }

    /// Advance one frame. Returns `true` when `positions` was rewritten.
    pub fn step(
        &mut self,
        dt: f32,
        is_open: bool,
        params: &SceneParams,
        mesh: &SphereMesh,
        positions: &mut [Vec3],
    ) -> bool {
        let target = Self::target(params, is_open);
        if (self.factor - target).abs() <= params.bloom_epsilon {
            return false;
        }
        let t = (params.open_lerp * dt * params.reference_fps).min(1.0);
        self.factor += (target - self.factor) * t;
        apply_bloom(mesh, self.factor, positions);
        true
    }
}

/// `position[i] = rest[i] + direction[i] * factor`, written in place.
pub fn apply_bloom(mesh: &SphereMesh, factor: f32, positions: &mut [Vec3]) {
    for ((out, rest), dir) in positions
        .iter_mut()
        .zip(&mesh.rest_positions)
        .zip(&mesh.explosion_directions)
    {
        *out = *rest + *dir * factor;
    }
}
