//! Procedural UV-sphere point cloud and wireframe topology.
//!
//! The product calls this shape an "icosahedron", but the layout is a
//! latitude/longitude sphere: two poles and `H_SEG - 1` rings of `W_SEG`
//! vertices each.

use crate::constants::{
    edge_count, vertex_count, EXPLOSION_SCALE_MAX, EXPLOSION_SCALE_MIN, H_SEG, W_SEG,
};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Immutable mesh data built once per mounted scene.
#[derive(Clone, Debug)]
pub struct SphereMesh {
    pub rest_positions: Vec<Vec3>,
    pub explosion_directions: Vec<Vec3>,
    pub edges: Vec<[u32; 2]>,
}

impl SphereMesh {
    /// Build with thread-local randomness for the explosion magnitudes.
    pub fn build(radius: f32) -> Self {
        Self::build_with_rng(radius, &mut rand::thread_rng())
    }

    pub fn build_with_rng<R: Rng>(radius: f32, rng: &mut R) -> Self {
        let normals = unit_normals();
        let rest_positions = normals.iter().map(|n| *n * radius).collect();
        let explosion_directions = normals
            .iter()
            .map(|n| *n * rng.gen_range(EXPLOSION_SCALE_MIN..EXPLOSION_SCALE_MAX))
            .collect();
        Self {
            rest_positions,
            explosion_directions,
            edges: build_edges(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.rest_positions.len()
    }

    /// Edge list flattened for a line-list index buffer.
    pub fn edge_indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.edges)
    }
}

fn unit_normals() -> Vec<Vec3> {
    let mut normals = Vec::with_capacity(vertex_count());
    normals.push(Vec3::Y);
    for h in 1..H_SEG {
        let theta = (h as f32 / H_SEG as f32) * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for w in 0..W_SEG {
            let phi = (w as f32 / W_SEG as f32) * TAU;
            let (sin_p, cos_p) = phi.sin_cos();
            normals.push(Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p));
        }
    }
    normals.push(Vec3::NEG_Y);
    normals
}

fn build_edges() -> Vec<[u32; 2]> {
    let rings = H_SEG - 1;
    let n = vertex_count();
    let ring_vertex = |ring: usize, w: usize| (1 + ring * W_SEG + w % W_SEG) as u32;
    let mut edges = Vec::with_capacity(edge_count());

    // top pole fan
    for w in 0..W_SEG {
        edges.push([0, ring_vertex(0, w)]);
    }
    // latitude loops
    for h in 0..rings {
        for w in 0..W_SEG {
            edges.push([ring_vertex(h, w), ring_vertex(h, w + 1)]);
        }
    }
    // longitude links
    for h in 0..rings - 1 {
        for w in 0..W_SEG {
            edges.push([ring_vertex(h, w), ring_vertex(h + 1, w)]);
        }
    }
    // bottom pole fan
    let bottom = (n - 1) as u32;
    for w in 0..W_SEG {
        edges.push([ring_vertex(rings - 1, w), bottom]);
    }
    edges
}
