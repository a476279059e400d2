//! Confetti Render - CPU drawing surface and frame output
//!
//! - `Canvas` - `DrawingSurface` over an RGBA pixel buffer with an affine transform stack
//! - `FrameWriter` - numbered PNG frames or an animated GIF

mod canvas;
mod output;

pub use canvas::Canvas;
pub use output::FrameWriter;
