//! Drawing surface contract and particle rendering

use crate::particle::{Particle, Sprite, Style};
use crate::stepper::DEG_TO_RAD;
use confetti_core::{Color, Size};
use std::ops::{Deref, DerefMut};

/// A 2D immediate-mode drawing surface with an affine transform stack
pub trait DrawingSurface {
    /// Current width and height in pixels
    fn size(&self) -> Size;

    /// Push the current transform and fill color
    fn save(&mut self);

    /// Pop the state pushed by the matching `save`
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);

    fn rotate(&mut self, radians: f32);

    fn set_fill_color(&mut self, color: Color);

    /// Fill an axis-aligned rectangle in local coordinates with the fill color
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Draw a sprite with its top-left corner at `(x, y)` in local coordinates
    fn draw_image(&mut self, sprite: &Sprite, x: f32, y: f32);

    /// Save the surface state and restore it when the guard drops
    fn scoped(&mut self) -> SurfaceGuard<'_, Self> {
        SurfaceGuard::new(self)
    }
}

/// Scoped save/restore. Restores on every exit path, unwinding included.
pub struct SurfaceGuard<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawingSurface + ?Sized> SurfaceGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawingSurface + ?Sized> Deref for SurfaceGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> DerefMut for SurfaceGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> Drop for SurfaceGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

/// Draw a live particle centered on its position and rotated by its angle.
/// Dead particles draw nothing.
pub fn render_particle<S: DrawingSurface + ?Sized>(surface: &mut S, p: &Particle) {
    if p.dead {
        return;
    }
    let mut s = surface.scoped();
    s.translate(p.x, p.y);
    s.rotate(p.angle * DEG_TO_RAD);
    match &p.style {
        Style::Image(sprite) => {
            let (w, h) = (sprite.width() as f32, sprite.height() as f32);
            s.draw_image(sprite, -w / 2.0, -h / 2.0);
        }
        Style::Color(color) => {
            s.set_fill_color(*color);
            s.fill_rect(p.w * -0.5, p.h * -0.5, p.w, p.h);
        }
    }
}
