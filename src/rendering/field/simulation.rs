//! Flat particle overlay in viewport pixel space (top-left origin, +y down).

use bevy::prelude::*;
use rand::Rng;

use crate::rendering::geometry::catalog::palette;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub color_index: usize,
}

fn span(rng: &mut impl Rng, max: f32) -> f32 {
    if max > 0.0 {
        rng.gen_range(0.0..max)
    } else {
        0.0
    }
}

/// A faint line between two particles closer than the link distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLink {
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
}

const LINK_ALPHA_SCALE: f32 = 0.15;

#[derive(Resource, Debug, Default, Clone)]
pub struct ParticleField {
    pub particles: Vec<FieldParticle>,
    pub bounds: Vec2,
    /// Last pointer position in pixels; `None` until the cursor enters.
    pub pointer: Option<Vec2>,
}

impl ParticleField {
    pub fn seed(count: usize, bounds: Vec2, rng: &mut impl Rng) -> Self {
        let particles = (0..count)
            .map(|_| FieldParticle {
                position: Vec2::new(span(rng, bounds.x), span(rng, bounds.y)),
                velocity: Vec2::new(rng.gen_range(-0.4..0.4), rng.gen_range(-0.4..0.4)),
                size: rng.gen_range(1.0..4.0),
                opacity: rng.gen_range(0.2..0.7),
                color_index: rng.gen_range(0..palette().len()),
            })
            .collect();
        Self {
            particles,
            bounds,
            pointer: None,
        }
    }

    /// Repel from the pointer, integrate, then flip velocity on any axis that left the viewport.
    pub fn step(&mut self, repel_radius: f32) {
        let bounds = self.bounds;
        for p in &mut self.particles {
            if let Some(pointer) = self.pointer {
                p.position += repel(p.position, pointer, repel_radius);
            }
            p.position += p.velocity;
            if p.position.x < 0.0 || p.position.x > bounds.x {
                p.velocity.x = -p.velocity.x;
            }
            if p.position.y < 0.0 || p.position.y > bounds.y {
                p.velocity.y = -p.velocity.y;
            }
        }
    }

    pub fn links(&self, max_distance: f32) -> Vec<FieldLink> {
        let mut out = Vec::new();
        for (a, pa) in self.particles.iter().enumerate() {
            for (offset, pb) in self.particles[a + 1..].iter().enumerate() {
                let d = pa.position.distance(pb.position);
                if d < max_distance {
                    out.push(FieldLink {
                        a,
                        b: a + 1 + offset,
                        alpha: (1.0 - d / max_distance) * LINK_ALPHA_SCALE,
                    });
                }
            }
        }
        out
    }
}

/// Displacement pushing `particle` away from `pointer`; strength falls off
/// linearly to zero at `radius`.
pub fn repel(particle: Vec2, pointer: Vec2, radius: f32) -> Vec2 {
    let delta = pointer - particle;
    let distance = delta.length();
    if radius <= 0.0 || distance >= radius {
        return Vec2::ZERO;
    }
    let force = (radius - distance) / radius;
    // coincident: atan2(0, 0) == 0, i.e. push along -x
    let dir = delta.try_normalize().unwrap_or(Vec2::X);
    -dir * force
}
