//! Particle creation: initial kinematic state sampling

use crate::particle::{Particle, Style};
use crate::random::RandomSource;
use crate::stepper::{BOUNDARY, DEG_TO_RAD};
use confetti_core::{Size, Vec2};

/// Lower bound of the burst speed range
pub const MIN_BURST_SPEED: f32 = 5.0;

/// Spawn inputs shared by every particle of an emission
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams<'a> {
    /// Upper bound of the burst speed range. Ignored in ambient mode.
    pub force: f32,
    /// Burst direction in degrees. Ignored in ambient mode.
    pub angle: f32,
    /// Full width of the burst cone in degrees. Ignored in ambient mode.
    pub spread: f32,
    pub styles: &'a [Style],
    /// Height of the spawn band above the top edge in ambient mode
    pub boundary: f32,
}

impl<'a> SpawnParams<'a> {
    pub fn new(styles: &'a [Style]) -> Self {
        Self {
            force: 15.0,
            angle: 270.0,
            spread: 45.0,
            styles,
            boundary: BOUNDARY,
        }
    }
}

/// Create a particle.
///
/// With an `origin` the particle bursts out of that point along a cone
/// centered on `params.angle`; without one it drops in from a band just above
/// the top edge of a surface of `size`. `on_create`, when given, runs exactly
/// once on the finished particle and its result is returned.
///
/// An empty style set is not rejected here; the particle falls back to the
/// default style.
pub fn create_particle<R: RandomSource + ?Sized>(
    rng: &mut R,
    size: Size,
    origin: Option<Vec2>,
    params: &SpawnParams<'_>,
    on_create: Option<&dyn Fn(Particle) -> Particle>,
) -> Particle {
    let mut da = rng.random_range(90.0, -90.0);

    let (x, y, vx, vy, dir) = match origin {
        Some(origin) => {
            let vx = rng.random_range(params.force, MIN_BURST_SPEED);
            let vy = rng.random_range(params.force, MIN_BURST_SPEED);
            let half = params.spread / 2.0;
            let dir = rng.random_range(params.angle + half, params.angle - half) * DEG_TO_RAD;
            da *= 2.0;
            (origin.x, origin.y, vx, vy, dir)
        }
        None => {
            let x = rng.random(size.width);
            let y = rng.random_range(0.0, -params.boundary);
            let vx = rng.random(5.0);
            let vy = rng.random_range(5.0, 1.0);
            let dir = rng.random(180.0) * DEG_TO_RAD;
            (x, y, vx, vy, dir)
        }
    };

    let style = rng
        .pick_index(params.styles.len())
        .map(|i| params.styles[i].clone())
        .unwrap_or_default();

    let particle = Particle {
        dead: false,
        life: 0.0,
        x,
        y,
        angle: rng.random(360.0),
        da,
        dx: dir.cos() * vx,
        dy: dir.sin() * vy,
        w: rng.random_range(18.0, 10.0),
        h: rng.random_range(6.0, 4.0),
        gy: rng.random_range(4.5, 2.0),
        xw: rng.random_range(6.0, 1.0),
        style,
    };

    match on_create {
        Some(hook) => hook(particle),
        None => particle,
    }
}
