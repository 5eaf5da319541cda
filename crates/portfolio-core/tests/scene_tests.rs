// Integration tests for the sphere mesh and the per-frame animation driver.

use portfolio_core::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn seeded_scene(radius: f32) -> Scene {
    let params = SceneParams {
        radius,
        ..SceneParams::default()
    };
    let mesh = SphereMesh::build_with_rng(radius, &mut StdRng::seed_from_u64(42));
    Scene::with_mesh(params, mesh)
}

#[test]
fn mesh_has_86_vertices_and_180_edges() {
    let mesh = SphereMesh::build(2.2);
    assert_eq!(mesh.vertex_count(), 86);
    assert_eq!(mesh.explosion_directions.len(), 86);
    assert_eq!(vertex_count(), 86);
    assert_eq!(mesh.edges.len(), W_SEG * 2 + (H_SEG - 1) * W_SEG + (H_SEG - 2) * W_SEG);
    assert_eq!(mesh.edges.len(), 180);
    assert_eq!(edge_count(), 180);
}

#[test]
fn every_edge_index_is_in_range_and_not_degenerate() {
    let mesh = SphereMesh::build(1.0);
    let n = mesh.vertex_count() as u32;
    for [a, b] in &mesh.edges {
        assert!(*a < n && *b < n);
        assert_ne!(a, b);
    }
}

#[test]
fn every_vertex_is_reached_by_some_edge() {
    let mesh = SphereMesh::build(1.0);
    let mut seen = vec![false; mesh.vertex_count()];
    for &i in mesh.edge_indices() {
        seen[i as usize] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn rings_have_constant_latitude() {
    let mesh = SphereMesh::build(1.0);
    for ring in 0..H_SEG - 1 {
        let base = 1 + ring * W_SEG;
        let y0 = mesh.rest_positions[base].y;
        for w in 0..W_SEG {
            assert!((mesh.rest_positions[base + w].y - y0).abs() < 1e-6);
        }
    }
}

proptest! {
    #[test]
    fn rest_positions_lie_on_radius(radius in 0.01f32..100.0) {
        let mesh = SphereMesh::build(radius);
        prop_assert_eq!(mesh.vertex_count(), 86);
        for p in &mesh.rest_positions {
            prop_assert!((p.length() - radius).abs() <= radius * 1e-5);
        }
    }

    #[test]
    fn camera_never_closer_than_floor(scroll in 0.0f32..1.0e7, frames in 1usize..400) {
        let params = SceneParams::default();
        let mut rig = CameraRig::new(&params);
        for _ in 0..frames {
            rig.step(scroll, &params);
            prop_assert!(rig.distance() >= CAMERA_MIN_DISTANCE);
        }
    }
}

#[test]
fn bloom_converges_without_overshoot() {
    let mut scene = seeded_scene(2.2);
    let mut steps = 0;
    loop {
        scene.tick(DT, &InputSample::default(), true);
        let f = scene.state().bloom_factor;
        assert!(f <= SPREAD_AMOUNT, "overshoot at step {}: {}", steps, f);
        steps += 1;
        if (SPREAD_AMOUNT - f).abs() <= BLOOM_EPSILON {
            break;
        }
        assert!(steps < 10_000, "bloom failed to converge");
    }
    // once settled, further ticks leave the buffer alone
    scene.take_positions_dirty();
    scene.tick(DT, &InputSample::default(), true);
    assert!(!scene.take_positions_dirty());
}

#[test]
fn closing_after_convergence_decreases_monotonically() {
    let mut scene = seeded_scene(2.2);
    for _ in 0..2_000 {
        scene.tick(DT, &InputSample::default(), true);
    }
    let mut prev = scene.state().bloom_factor;
    for _ in 0..2_000 {
        scene.tick(DT, &InputSample::default(), false);
        let f = scene.state().bloom_factor;
        assert!(f <= prev);
        assert!(f >= 0.0);
        prev = f;
    }
    assert!(prev <= BLOOM_EPSILON);
}

#[test]
fn hundred_frames_open_reaches_ninety_five_percent() {
    let mut scene = seeded_scene(2.2);
    for _ in 0..100 {
        scene.tick(DT, &InputSample::default(), true);
    }
    let f = scene.state().bloom_factor;
    assert!(f > 1.7, "bloom factor after 100 frames was {}", f);
}

#[test]
fn positions_follow_bloom_factor() {
    let mut scene = seeded_scene(2.2);
    for _ in 0..30 {
        scene.tick(DT, &InputSample::default(), true);
    }
    let f = scene.state().bloom_factor;
    let mesh = scene.mesh();
    for (i, p) in scene.positions().iter().enumerate() {
        let expected = mesh.rest_positions[i] + mesh.explosion_directions[i] * f;
        assert!((*p - expected).length() < 1e-5);
    }
}

#[test]
fn heavy_scroll_pins_camera_at_floor() {
    let mut scene = seeded_scene(2.2);
    let input = InputSample {
        scroll_offset: 50_000.0,
        ..InputSample::default()
    };
    for _ in 0..1_000 {
        scene.tick(DT, &input, false);
        assert!(scene.state().camera_distance >= 2.0);
    }
    assert!((scene.state().camera_distance - 2.0).abs() < 1e-3);
}

#[test]
fn camera_matrices_follow_rig_distance() {
    let mut scene = seeded_scene(2.2);
    let input = InputSample {
        scroll_offset: 1_000.0,
        ..InputSample::default()
    };
    for _ in 0..10 {
        scene.tick(DT, &input, false);
    }
    let cam = scene.camera(1.5);
    assert_eq!(cam.eye.z, scene.state().camera_distance);
    assert!((cam.fovy_radians - FOV_DEGREES.to_radians()).abs() < 1e-6);
}
