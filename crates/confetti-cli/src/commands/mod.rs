//! CLI command implementations

pub mod init;
pub mod render;
pub mod simulate;

use anyhow::{Context, Result};
use clap::Args;
use confetti_core::{Color, Size, Vec2};
use confetti_particles::{ConfettiSystem, EmitterConfig, EmitterMode, ParticleRng};
use std::path::Path;

/// Effect options shared by `render` and `simulate`
#[derive(Args, Debug, Clone)]
pub struct EffectArgs {
    /// Effect config file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Surface width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Surface height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Simulation steps per second
    #[arg(long, default_value = "60")]
    pub fps: u32,

    /// Seed for a reproducible effect
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emitter mode (burst or ambient)
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<String>,

    /// Burst origin (comma-separated x,y); implies burst mode
    #[arg(long, value_parser = parse_vec2)]
    pub origin: Option<[f32; 2]>,

    /// Particles per burst, or the initial drop in ambient mode
    #[arg(long)]
    pub count: Option<u32>,

    /// Maximum burst speed
    #[arg(long)]
    pub force: Option<f32>,

    /// Burst direction in degrees (270 is straight up)
    #[arg(long, allow_negative_numbers = true)]
    pub angle: Option<f32>,

    /// Burst cone width in degrees
    #[arg(long)]
    pub spread: Option<f32>,

    /// Ambient particles per second
    #[arg(long)]
    pub rate: Option<f32>,

    /// Seconds of ambient emission (0 = forever)
    #[arg(long)]
    pub duration: Option<f32>,

    /// Comma-separated palette, e.g. "red,#ffd700,#00f"
    #[arg(long)]
    pub colors: Option<String>,
}

impl EffectArgs {
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// Load the config file (if any) and apply command-line overrides
    pub fn emitter_config(&self) -> Result<EmitterConfig> {
        let mut config = match &self.config {
            Some(path) => EmitterConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path))?,
            None => EmitterConfig::default(),
        };

        if let Some(mode) = &self.mode {
            config.mode = match (mode.as_str(), config.mode) {
                ("ambient", _) => EmitterMode::Ambient,
                (_, EmitterMode::Burst { origin }) => EmitterMode::Burst { origin },
                _ => EmitterMode::Burst { origin: None },
            };
        }
        if let Some([x, y]) = self.origin {
            config.mode = EmitterMode::Burst {
                origin: Some(Vec2::new(x, y)),
            };
        }
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(force) = self.force {
            config.force = force;
        }
        if let Some(angle) = self.angle {
            config.angle = angle;
        }
        if let Some(spread) = self.spread {
            config.spread = spread;
        }
        if let Some(rate) = self.rate {
            config.rate = rate;
        }
        if let Some(duration) = self.duration {
            config.duration = duration;
        }
        if let Some(colors) = &self.colors {
            config.colors = colors
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Color::parse)
                .collect::<confetti_core::Result<_>>()
                .context("Invalid --colors")?;
        }

        Ok(config)
    }

    /// Build a ready-to-run system; images resolve relative to the config file
    pub fn build_system(&self) -> Result<ConfettiSystem> {
        let config = self.emitter_config()?;
        let base_dir = self
            .config
            .as_deref()
            .and_then(|p| Path::new(p).parent())
            .map(Path::to_path_buf);
        let system = ConfettiSystem::from_config(config, base_dir.as_deref())
            .context("Invalid confetti config")?;
        let rng = match self.seed {
            Some(seed) => ParticleRng::new(seed),
            None => ParticleRng::from_entropy(),
        };
        Ok(system.with_rng(rng))
    }

    /// Fixed step length in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

fn parse_mode(s: &str) -> Result<String, String> {
    match s {
        "burst" | "ambient" => Ok(s.to_string()),
        "falling" => Ok("ambient".to_string()),
        _ => Err(format!(
            "unknown mode '{}'; valid values: burst, ambient",
            s
        )),
    }
}

fn parse_vec2(s: &str) -> Result<[f32; 2], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected 2 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    Ok([x, y])
}
