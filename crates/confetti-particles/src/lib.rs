//! Confetti Particles - 2D confetti particle lifecycle
//!
//! Provides the particle simulation behind the confetti effect:
//! - Uniform range sampling behind every stochastic decision
//! - Burst and ambient particle creation
//! - Per-tick integration with gravity, sway, drag and spin
//! - Rendering against any `DrawingSurface` with scoped save/restore
//! - Bounds-based retirement and a frame driver (`ConfettiSystem`)

pub mod emitter;
pub mod factory;
pub mod particle;
pub mod random;
pub mod render;
pub mod stepper;
pub mod system;

pub use emitter::{EmitterConfig, EmitterMode};
pub use factory::{create_particle, SpawnParams};
pub use particle::{OnCreate, OnUpdate, Particle, Sprite, Style};
pub use random::{ParticleRng, RandomSource};
pub use render::{render_particle, DrawingSurface, SurfaceGuard};
pub use stepper::{
    is_out_of_bounds, update_particle, Tunables, BOUNDARY, DEG_TO_RAD, DRAG, MOVEMENT_SPEED,
    ROTATION_SPEED,
};
pub use system::ConfettiSystem;
