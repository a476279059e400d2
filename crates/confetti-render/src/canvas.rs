//! CPU canvas implementing the particle drawing surface

use confetti_core::{Color, ConfettiError, Result, Size};
use confetti_particles::{DrawingSurface, Sprite};
use glam::{Affine2, Vec2};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// RGBA pixel buffer with a 2D affine transform stack.
///
/// Coordinates follow the usual 2D canvas convention: origin at the top-left,
/// y pointing down, positive rotation turning clockwise on screen.
pub struct Canvas {
    pixels: RgbaImage,
    transform: Affine2,
    fill: Color,
    stack: Vec<(Affine2, Color)>,
}

impl Canvas {
    /// A fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            transform: Affine2::IDENTITY,
            fill: Color::BLACK,
            stack: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Overwrite every pixel, ignoring the transform
    pub fn clear(&mut self, color: Color) {
        let px = Rgba(color.to_rgba8());
        for p in self.pixels.pixels_mut() {
            *p = px;
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Current local-to-device transform
    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    /// Number of unmatched `save` calls
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.pixels
            .save(path)
            .map_err(|e| ConfettiError::ImageError(format!("{}: {}", path.display(), e)))
    }

    /// Shade every pixel whose center falls inside the local rectangle
    /// `(x, y, w, h)`. `shade` receives the offset inside the rectangle.
    fn paint_quad(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        mut shade: impl FnMut(f32, f32) -> Option<[u8; 4]>,
    ) {
        if !(w > 0.0 && h > 0.0) {
            return;
        }
        let det = self.transform.matrix2.determinant();
        if det.is_nan() || det.abs() < f32::EPSILON {
            return;
        }
        let inverse = self.transform.inverse();

        let corners = [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x, y + h),
            Vec2::new(x + w, y + h),
        ]
        .map(|c| self.transform.transform_point2(c));
        // glam's min/max drop NaN operands, which would widen the box to the whole canvas
        if !corners.iter().all(|c| c.is_finite()) {
            return;
        }
        let (min, max) = corners.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(lo, hi), c| (lo.min(*c), hi.max(*c)),
        );

        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().min(self.width() as f32)).max(0.0) as u32;
        let y1 = (max.y.ceil().min(self.height() as f32)).max(0.0) as u32;

        for py in y0..y1 {
            for px in x0..x1 {
                let local = inverse.transform_point2(Vec2::new(px as f32 + 0.5, py as f32 + 0.5));
                let (u, v) = (local.x - x, local.y - y);
                if !(u >= 0.0 && u < w && v >= 0.0 && v < h) {
                    continue;
                }
                if let Some(src) = shade(u, v) {
                    blend(self.pixels.get_pixel_mut(px, py), src);
                }
            }
        }
    }
}

impl DrawingSurface for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    fn save(&mut self) {
        self.stack.push((self.transform, self.fill));
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some((transform, fill)) => {
                self.transform = transform;
                self.fill = fill;
            }
            None => log::warn!("Canvas restore without matching save"),
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.transform = self.transform * Affine2::from_translation(Vec2::new(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.transform = self.transform * Affine2::from_angle(radians);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let src = self.fill.to_rgba8();
        self.paint_quad(x, y, w, h, |_, _| Some(src));
    }

    fn draw_image(&mut self, sprite: &Sprite, x: f32, y: f32) {
        let image = sprite.image();
        let (sw, sh) = image.dimensions();
        if sw == 0 || sh == 0 {
            return;
        }
        self.paint_quad(x, y, sw as f32, sh as f32, |u, v| {
            let tx = (u as u32).min(sw - 1);
            let ty = (v as u32).min(sh - 1);
            Some(image.get_pixel(tx, ty).0)
        });
    }
}

/// Source-over compositing of a straight-alpha source onto `dst`
fn blend(dst: &mut Rgba<u8>, src: [u8; 4]) {
    let sa = src[3] as f32 / 255.0;
    if sa <= 0.0 {
        return;
    }
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let sc = src[i] as f32 / 255.0;
        let dc = dst.0[i] as f32 / 255.0;
        let c = (sc * sa + dc * da * (1.0 - sa)) / out_a;
        dst.0[i] = (c * 255.0).round() as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use confetti_particles::{render_particle, Particle, Style};
    use std::f32::consts::FRAC_PI_2;

    const RED: [u8; 4] = [255, 0, 0, 255];

    fn painted(canvas: &Canvas, x: u32, y: u32) -> bool {
        canvas.pixels().get_pixel(x, y).0[3] > 0
    }

    #[test]
    fn fill_rect_identity() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_fill_color(Color::RED);
        canvas.fill_rect(2.0, 2.0, 4.0, 3.0);

        assert_eq!(canvas.pixels().get_pixel(2, 2).0, RED);
        assert_eq!(canvas.pixels().get_pixel(5, 4).0, RED);
        assert!(!painted(&canvas, 6, 2));
        assert!(!painted(&canvas, 1, 2));
        assert!(!painted(&canvas, 2, 5));
    }

    #[test]
    fn restore_undoes_transform() {
        let mut canvas = Canvas::new(4, 4);
        canvas.save();
        canvas.translate(5.0, 5.0);
        canvas.rotate(1.0);
        canvas.set_fill_color(Color::BLUE);
        canvas.restore();

        assert_eq!(canvas.transform(), Affine2::IDENTITY);
        assert_eq!(canvas.fill, Color::BLACK);
        assert_eq!(canvas.depth(), 0);

        // Unbalanced restore is ignored
        canvas.restore();
        assert_eq!(canvas.depth(), 0);
    }

    #[test]
    fn rotated_rect_turns_vertical() {
        let mut canvas = Canvas::new(10, 10);
        canvas.translate(5.0, 5.0);
        canvas.rotate(FRAC_PI_2);
        canvas.set_fill_color(Color::RED);
        canvas.fill_rect(-3.0, -1.0, 6.0, 2.0);

        assert!(painted(&canvas, 5, 2));
        assert!(painted(&canvas, 4, 7));
        assert!(!painted(&canvas, 2, 5));
        assert!(!painted(&canvas, 8, 5));
    }

    #[test]
    fn rendered_particle_matches_manual_draw() {
        let p = Particle {
            x: 5.0,
            y: 5.0,
            angle: 90.0,
            w: 6.0,
            h: 2.0,
            style: Style::Color(Color::RED),
            ..Particle::default()
        };
        let mut canvas = Canvas::new(10, 10);
        render_particle(&mut canvas, &p);

        assert!(painted(&canvas, 5, 2));
        assert!(!painted(&canvas, 2, 5));
        assert_eq!(canvas.depth(), 0);
        assert_eq!(canvas.transform(), Affine2::IDENTITY);
    }

    #[test]
    fn blend_half_alpha_over_opaque() {
        let mut canvas = Canvas::new(1, 1);
        canvas.clear(Color::BLUE);
        canvas.set_fill_color(Color::parse("#ff000080").unwrap());
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);

        let [r, g, b, a] = canvas.pixels().get_pixel(0, 0).0;
        assert!((126..=129).contains(&r));
        assert_eq!(g, 0);
        assert!((126..=129).contains(&b));
        assert_eq!(a, 255);
    }

    #[test]
    fn draw_image_copies_texels() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 1, Rgba([40, 50, 60, 255]));
        let sprite = Sprite::new(img);

        let mut canvas = Canvas::new(8, 8);
        canvas.draw_image(&sprite, 3.0, 3.0);

        assert_eq!(canvas.pixels().get_pixel(3, 3).0, [10, 20, 30, 255]);
        assert_eq!(canvas.pixels().get_pixel(4, 4).0, [40, 50, 60, 255]);
        // Transparent texels leave the canvas alone
        assert!(!painted(&canvas, 4, 3));
        assert!(!painted(&canvas, 5, 5));
    }

    #[test]
    fn degenerate_input_draws_nothing() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set_fill_color(Color::RED);
        canvas.fill_rect(0.0, 0.0, f32::NAN, 2.0);
        canvas.fill_rect(0.0, 0.0, -2.0, 2.0);
        canvas.translate(f32::NAN, 0.0);
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0);
        assert!(canvas.pixels().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn particle_with_nan_position_is_invisible() {
        let mut canvas = Canvas::new(8, 8);
        for p in [
            Particle {
                x: f32::NAN,
                y: 4.0,
                w: 4.0,
                h: 4.0,
                style: Style::Color(Color::RED),
                ..Particle::default()
            },
            Particle {
                x: 4.0,
                y: 4.0,
                angle: f32::NAN,
                w: 4.0,
                h: 4.0,
                style: Style::Color(Color::RED),
                ..Particle::default()
            },
            Particle {
                x: f32::INFINITY,
                y: 4.0,
                w: 4.0,
                h: 4.0,
                style: Style::Color(Color::RED),
                ..Particle::default()
            },
        ] {
            render_particle(&mut canvas, &p);
        }

        let painted = canvas.pixels().pixels().filter(|p| p.0[3] > 0).count();
        assert_eq!(painted, 0);
        assert_eq!(canvas.depth(), 0);
    }
}
