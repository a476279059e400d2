//! Frame driver: owns the live particle set and runs spawn, step, retire and render

use crate::emitter::{EmitterConfig, EmitterMode};
use crate::factory::{create_particle, SpawnParams};
use crate::particle::{OnCreate, OnUpdate, Particle, Style};
use crate::random::ParticleRng;
use crate::render::{render_particle, DrawingSurface};
use crate::stepper::{is_out_of_bounds, update_particle};
use confetti_core::{ConfettiError, Result, Size, Vec2};

/// One confetti effect: an emitter plus the particles it has spawned
pub struct ConfettiSystem {
    config: EmitterConfig,
    styles: Vec<Style>,
    particles: Vec<Particle>,
    rng: ParticleRng,
    on_create: Option<Box<OnCreate>>,
    on_update: Option<Box<OnUpdate>>,
    /// Fractional particle accumulator for sub-frame emission
    accumulator: f32,
    /// How long continuous emission has been running
    emitter_time: f32,
    /// Whether the emitter still produces particles
    playing: bool,
    started: bool,
}

impl ConfettiSystem {
    /// Build a system from a validated config and its loaded styles
    pub fn new(config: EmitterConfig, styles: Vec<Style>) -> Result<Self> {
        config.validate()?;
        if styles.is_empty() {
            return Err(ConfettiError::MissingRequiredField("styles".into()));
        }
        Ok(Self {
            config,
            styles,
            particles: Vec::new(),
            rng: ParticleRng::from_entropy(),
            on_create: None,
            on_update: None,
            accumulator: 0.0,
            emitter_time: 0.0,
            playing: true,
            started: false,
        })
    }

    /// Build a system whose styles are the config's colors and images
    pub fn from_config(config: EmitterConfig, base_dir: Option<&std::path::Path>) -> Result<Self> {
        let styles = config.load_styles(base_dir)?;
        Self::new(config, styles)
    }

    pub fn with_rng(mut self, rng: ParticleRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_on_create(
        mut self,
        hook: impl Fn(Particle) -> Particle + Send + Sync + 'static,
    ) -> Self {
        self.on_create = Some(Box::new(hook));
        self
    }

    pub fn with_on_update(
        mut self,
        hook: impl Fn(Particle, f32) -> Particle + Send + Sync + 'static,
    ) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn alive_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True once emission is over and every particle has retired
    pub fn is_finished(&self) -> bool {
        self.started && !self.playing && self.particles.is_empty()
    }

    /// Spawn `count` particles the way the configured mode does
    pub fn emit(&mut self, size: Size, count: u32) {
        let origin = match self.config.mode {
            EmitterMode::Burst { origin } => Some(origin.unwrap_or_else(|| size.center())),
            EmitterMode::Ambient => None,
        };
        self.spawn(size, origin, count);
    }

    /// Burst `count` particles out of `origin`, whatever the configured mode
    pub fn burst_at(&mut self, size: Size, origin: Vec2, count: u32) {
        self.spawn(size, Some(origin), count);
    }

    fn spawn(&mut self, size: Size, origin: Option<Vec2>, count: u32) {
        let params = SpawnParams {
            force: self.config.force,
            angle: self.config.angle,
            spread: self.config.spread,
            styles: &self.styles,
            boundary: self.config.tunables.boundary,
        };
        let on_create = self
            .on_create
            .as_deref()
            .map(|hook| hook as &dyn Fn(Particle) -> Particle);
        self.particles.reserve(count as usize);
        for _ in 0..count {
            let p = create_particle(&mut self.rng, size, origin, &params, on_create);
            self.particles.push(p);
        }
        log::debug!("Spawned {} particle(s), {} alive", count, self.particles.len());
    }

    /// Advance the effect by `dt`: emit, step every particle, retire the ones
    /// that are dead or have left the surface
    pub fn update(&mut self, size: Size, dt: f32) {
        if !self.started {
            self.start(size);
        }

        if self.playing && self.config.rate > 0.0 {
            self.emitter_time += dt;
            self.accumulator += self.config.rate * dt;
            let spawn_count = self.accumulator as u32;
            self.accumulator -= spawn_count as f32;
            if spawn_count > 0 {
                self.emit(size, spawn_count);
            }
            if self.config.duration > 0.0 && self.emitter_time >= self.config.duration {
                log::info!("Emission finished after {:.2}s", self.emitter_time);
                self.playing = false;
            }
        }

        let tunables = self.config.tunables;
        for p in &mut self.particles {
            update_particle(p, dt, &tunables, &mut self.rng);
            if let Some(hook) = &self.on_update {
                if p.is_alive() {
                    *p = hook(std::mem::take(p), dt);
                }
            }
            if is_out_of_bounds(size, p, tunables.boundary) {
                p.kill();
            }
        }

        let retired = self.compact();
        if retired > 0 {
            log::debug!("Retired {} particle(s), {} alive", retired, self.particles.len());
        }
    }

    /// Draw every live particle
    pub fn render<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            render_particle(surface, p);
        }
    }

    fn start(&mut self, size: Size) {
        self.started = true;
        match self.config.mode {
            EmitterMode::Burst { .. } => {
                log::info!("Bursting {} particle(s)", self.config.count);
                self.emit(size, self.config.count);
                self.playing = false;
            }
            EmitterMode::Ambient if self.config.rate <= 0.0 => {
                log::info!("Dropping {} particle(s)", self.config.count);
                self.emit(size, self.config.count);
                self.playing = false;
            }
            EmitterMode::Ambient => {
                log::info!("Falling confetti at {} particle(s)/s", self.config.rate);
            }
        }
    }

    /// Swap-remove dead particles; returns how many were removed
    fn compact(&mut self) -> usize {
        let before = self.particles.len();
        let mut i = 0;
        while i < self.particles.len() {
            if !self.particles[i].is_alive() {
                self.particles.swap_remove(i);
                // Don't increment i: the swapped-in particle needs checking
            } else {
                i += 1;
            }
        }
        before - self.particles.len()
    }
}
