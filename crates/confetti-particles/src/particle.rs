//! Particle types: simulation state and visual style

use confetti_core::{Color, Result};
use image::RgbaImage;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Shared handle to a decoded RGBA image. Clones share the pixel data.
#[derive(Clone)]
pub struct Sprite {
    image: Arc<RgbaImage>,
}

impl Sprite {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Decode an image file (PNG or JPEG) into a sprite
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| {
            confetti_core::ConfettiError::ImageError(format!("{}: {}", path.display(), e))
        })?;
        log::debug!(
            "Loaded sprite {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::new(image.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl PartialEq for Sprite {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sprite({}x{})", self.width(), self.height())
    }
}

/// How a particle is drawn: a filled rectangle or an image
#[derive(Clone, Debug, PartialEq)]
pub enum Style {
    Color(Color),
    Image(Sprite),
}

impl Default for Style {
    fn default() -> Self {
        Style::Color(Color::WHITE)
    }
}

impl From<Color> for Style {
    fn from(color: Color) -> Self {
        Style::Color(color)
    }
}

impl From<Sprite> for Style {
    fn from(sprite: Sprite) -> Self {
        Style::Image(sprite)
    }
}

/// Simulation state of one confetti piece
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Once set, the particle is inert and awaits removal
    pub dead: bool,
    /// Elapsed time since creation
    pub life: f32,
    pub x: f32,
    pub y: f32,
    /// Velocity, before the movement speed scalar is applied
    pub dx: f32,
    pub dy: f32,
    /// Rotation in degrees
    pub angle: f32,
    /// Angular velocity in degrees per unit time
    pub da: f32,
    /// Rectangle extents, unused for image styles
    pub w: f32,
    pub h: f32,
    /// Per-particle gravity added to `dy` each step
    pub gy: f32,
    /// Per-particle sway frequency
    pub xw: f32,
    pub style: Style,
}

impl Particle {
    /// Flag the particle as retired. There is no way back.
    pub fn kill(&mut self) {
        self.dead = true;
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            dead: false,
            life: 0.0,
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            angle: 0.0,
            da: 0.0,
            w: 1.0,
            h: 1.0,
            gy: 0.0,
            xw: 0.0,
            style: Style::default(),
        }
    }
}

/// Transform applied once to every freshly created particle
pub type OnCreate = dyn Fn(Particle) -> Particle + Send + Sync;

/// Transform applied to every live particle after each step, with the step's `dt`
pub type OnUpdate = dyn Fn(Particle, f32) -> Particle + Send + Sync;
