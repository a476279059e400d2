//! Per-tick particle integration and the retirement bounds check

use crate::particle::Particle;
use crate::random::RandomSource;
use confetti_core::Size;

/// Degrees to radians
pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;

/// Scales position integration
pub const MOVEMENT_SPEED: f32 = 0.5;

/// Scales both spin and gravity accumulation
pub const ROTATION_SPEED: f32 = 5.0;

/// Distance past the surface edges before a particle is retired; also the
/// height of the spawn band above the top edge in ambient mode
pub const BOUNDARY: f32 = 50.0;

/// Multiplicative velocity damping applied every step
pub const DRAG: f32 = 0.98;

/// Global animation tunables, carried per emitter so independent effects
/// can run with different settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunables {
    pub movement_speed: f32,
    pub rotation_speed: f32,
    pub boundary: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            movement_speed: MOVEMENT_SPEED,
            rotation_speed: ROTATION_SPEED,
            boundary: BOUNDARY,
        }
    }
}

/// Advance a live particle by `dt`. Dead particles are left untouched.
pub fn update_particle<R: RandomSource + ?Sized>(
    p: &mut Particle,
    dt: f32,
    tunables: &Tunables,
    rng: &mut R,
) {
    if p.dead {
        return;
    }
    p.life += dt;
    p.angle += p.da * dt * tunables.rotation_speed;
    // Gravity shares the rotation speed scalar
    p.dy += p.gy * dt * tunables.rotation_speed;
    p.dx += rng.random_range(4.0, 2.0) * (p.life * p.xw).sin() * dt;
    p.dx *= DRAG;
    p.dy *= DRAG;
    p.x += p.dx * tunables.movement_speed;
    p.y += p.dy * tunables.movement_speed;
}

/// True once the particle has left the surface to the left, right or bottom.
/// Particles above the top edge are never out of bounds.
pub fn is_out_of_bounds(size: Size, p: &Particle, boundary: f32) -> bool {
    p.x < -boundary || p.x > size.width + boundary || p.y > size.height + boundary
}
