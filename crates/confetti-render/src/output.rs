//! Frame output: numbered PNG sequences or animated GIFs

use crate::canvas::Canvas;
use confetti_core::{ConfettiError, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Sink for rendered frames
pub enum FrameWriter {
    /// `frame_00000.png`, `frame_00001.png`, ... inside a directory
    Png { dir: PathBuf, frames: u32 },
    /// One looping animated GIF
    Gif {
        encoder: GifEncoder<BufWriter<File>>,
        delay: Delay,
        frames: u32,
    },
}

impl FrameWriter {
    /// A `.gif` path produces an animated GIF; anything else is treated as a
    /// directory for PNG frames and created if missing
    pub fn create(path: impl AsRef<Path>, fps: u32) -> Result<Self> {
        let path = path.as_ref();
        let is_gif = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("gif"));

        if is_gif {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = File::create(path)?;
            let mut encoder = GifEncoder::new(BufWriter::new(file));
            encoder.set_repeat(Repeat::Infinite).map_err(image_err)?;
            Ok(FrameWriter::Gif {
                encoder,
                delay: Delay::from_numer_denom_ms(1000, fps.max(1)),
                frames: 0,
            })
        } else {
            fs::create_dir_all(path)?;
            Ok(FrameWriter::Png {
                dir: path.to_path_buf(),
                frames: 0,
            })
        }
    }

    pub fn write_frame(&mut self, canvas: &Canvas) -> Result<()> {
        match self {
            FrameWriter::Png { dir, frames } => {
                canvas.save_png(dir.join(format!("frame_{:05}.png", frames)))?;
                *frames += 1;
            }
            FrameWriter::Gif {
                encoder,
                delay,
                frames,
            } => {
                let frame = Frame::from_parts(canvas.pixels().clone(), 0, 0, *delay);
                encoder.encode_frame(frame).map_err(image_err)?;
                *frames += 1;
            }
        }
        Ok(())
    }

    pub fn frames_written(&self) -> u32 {
        match self {
            FrameWriter::Png { frames, .. } | FrameWriter::Gif { frames, .. } => *frames,
        }
    }

    /// Flush and close the output
    pub fn finish(self) -> Result<u32> {
        let frames = self.frames_written();
        // The GIF trailer is written when the encoder drops
        drop(self);
        log::info!("Wrote {} frame(s)", frames);
        Ok(frames)
    }
}

fn image_err(e: image::ImageError) -> ConfettiError {
    ConfettiError::ImageError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use confetti_core::Color;
    use confetti_particles::DrawingSurface;

    fn red_canvas() -> Canvas {
        let mut canvas = Canvas::new(6, 4);
        canvas.set_fill_color(Color::RED);
        canvas.fill_rect(1.0, 1.0, 2.0, 2.0);
        canvas
    }

    #[test]
    fn png_sequence_is_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("frames");
        let mut writer = FrameWriter::create(&out, 30).unwrap();
        let canvas = red_canvas();
        writer.write_frame(&canvas).unwrap();
        writer.write_frame(&canvas).unwrap();
        assert_eq!(writer.finish().unwrap(), 2);

        let first = image::open(out.join("frame_00000.png")).unwrap().to_rgba8();
        assert_eq!(first.dimensions(), (6, 4));
        assert_eq!(first.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert!(out.join("frame_00001.png").exists());
    }

    #[test]
    fn gif_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("burst.GIF");
        let mut writer = FrameWriter::create(&out, 30).unwrap();
        assert!(matches!(writer, FrameWriter::Gif { .. }));
        writer.write_frame(&red_canvas()).unwrap();
        writer.write_frame(&Canvas::new(6, 4)).unwrap();
        assert_eq!(writer.finish().unwrap(), 2);

        let decoded = image::open(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
    }
}
