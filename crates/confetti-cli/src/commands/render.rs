//! Headless effect-to-image render command

use super::EffectArgs;
use anyhow::{Context, Result};
use confetti_core::Color;
use confetti_particles::DrawingSurface;
use confetti_render::{Canvas, FrameWriter};

pub struct RenderArgs {
    pub effect: EffectArgs,
    pub output: String,
    pub max_frames: u32,
    pub background: Color,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let mut system = args.effect.build_system()?;
    log::info!("Rendering on a {} background", args.background);

    let mut canvas = Canvas::new(args.effect.width, args.effect.height);
    let size = canvas.size();
    let dt = args.effect.dt();

    let mut writer = FrameWriter::create(&args.output, args.effect.fps)
        .with_context(|| format!("Failed to create output {}", args.output))?;

    for _ in 0..args.max_frames {
        system.update(size, dt);
        canvas.clear(args.background);
        system.render(&mut canvas);
        writer
            .write_frame(&canvas)
            .with_context(|| format!("Failed to write frame to {}", args.output))?;

        if system.is_finished() {
            break;
        }
    }

    if !system.is_finished() {
        log::warn!(
            "Stopped after {} frames with {} particle(s) still alive",
            args.max_frames,
            system.alive_count()
        );
    }

    let frames = writer.finish()?;
    println!(
        "Rendered {} {}x{} frame(s) to {}",
        frames, args.effect.width, args.effect.height, args.output
    );

    Ok(())
}
