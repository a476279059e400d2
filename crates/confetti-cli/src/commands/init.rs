//! Config scaffolding command

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Starting point for a new effect. Every key is optional.
pub const DEFAULT_CONFIG: &str = r##"# Confetti effect

# "burst" explodes out of `origin` (surface center when omitted),
# "ambient" drops confetti in from above the top edge
mode = "burst"
# origin = [400, 300]

# Particles per burst, or the initial drop when ambient `rate` is 0
count = 150

# Burst speed range is [5, force); direction in degrees, 270 is straight up
force = 15
angle = 270
spread = 45

# Ambient emission: particles per second and seconds to keep emitting (0 = forever)
rate = 0
duration = 0

colors = ["#f44336", "#e91e63", "#9c27b0", "#3f51b5", "#03a9f4", "#4caf50", "#ffeb3b", "#ff9800"]
# Sprite images, relative to this file
# images = ["star.png"]

[tunables]
movement_speed = 0.5
rotation_speed = 5.0
boundary = 50
"##;

pub fn run(path: &str, force: bool) -> Result<()> {
    let target = Path::new(path);

    if target.exists() && !force {
        anyhow::bail!("File '{}' already exists (use --force to overwrite)", path);
    }
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(target, DEFAULT_CONFIG)?;
    println!("Created {}", path);
    Ok(())
}
