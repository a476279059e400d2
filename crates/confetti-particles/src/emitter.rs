//! Emitter configuration (parsed from TOML)

use crate::factory::MIN_BURST_SPEED;
use crate::particle::{Sprite, Style};
use crate::stepper::Tunables;
use confetti_core::{Color, ConfettiError, Result, Vec2};
use std::path::Path;

/// Where particles come from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmitterMode {
    /// Explode out of a point. `None` means the surface center.
    Burst { origin: Option<Vec2> },
    /// Fall in from above the top edge
    Ambient,
}

/// Confetti effect configuration
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    pub mode: EmitterMode,
    /// Particles per burst, or the initial drop in ambient mode when `rate` is 0
    pub count: u32,
    /// Ambient particles per second. 0 disables continuous emission.
    pub rate: f32,
    /// Seconds of continuous emission. 0 emits forever.
    pub duration: f32,
    pub force: f32,
    pub angle: f32,
    pub spread: f32,
    pub colors: Vec<Color>,
    /// Sprite image paths, relative to the config file
    pub images: Vec<String>,
    pub tunables: Tunables,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            mode: EmitterMode::Burst { origin: None },
            count: 150,
            rate: 0.0,
            duration: 0.0,
            force: 15.0,
            angle: 270.0,
            spread: 45.0,
            colors: [
                0xF44336, 0xE91E63, 0x9C27B0, 0x3F51B5, 0x03A9F4, 0x4CAF50, 0xFFEB3B, 0xFF9800,
            ]
            .into_iter()
            .map(Color::from_hex)
            .collect(),
            images: Vec::new(),
            tunables: Tunables::default(),
        }
    }
}

impl EmitterConfig {
    /// Parse an EmitterConfig from a TOML table. Missing keys keep their defaults.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = table.get("mode") {
            let mode = v.as_str().unwrap_or_default();
            config.mode = match mode {
                "burst" => EmitterMode::Burst {
                    origin: table.get("origin").and_then(toml_vec2),
                },
                "ambient" | "falling" => EmitterMode::Ambient,
                _ => {
                    return Err(ConfettiError::InvalidEnumValue {
                        value: mode.to_string(),
                        allowed: vec!["burst".into(), "ambient".into(), "falling".into()],
                    })
                }
            };
        } else if let Some(origin) = table.get("origin").and_then(toml_vec2) {
            config.mode = EmitterMode::Burst {
                origin: Some(origin),
            };
        }

        if let Some(v) = table.get("count") {
            let n = v.as_integer().unwrap_or(i64::from(config.count));
            config.count = n.clamp(0, 10_000) as u32;
        }
        if let Some(v) = table.get("rate") {
            config.rate = toml_f32(v, config.rate);
        }
        if let Some(v) = table.get("duration") {
            config.duration = toml_f32(v, config.duration);
        }
        if let Some(v) = table.get("force") {
            config.force = toml_f32(v, config.force);
        }
        if let Some(v) = table.get("angle") {
            config.angle = toml_f32(v, config.angle);
        }
        if let Some(v) = table.get("spread") {
            config.spread = toml_f32(v, config.spread);
        }
        if let Some(arr) = table.get("colors").and_then(|v| v.as_array()) {
            config.colors = arr
                .iter()
                .map(|v| match v.as_str() {
                    Some(s) => Color::parse(s),
                    None => Err(ConfettiError::InvalidColor(v.to_string())),
                })
                .collect::<Result<_>>()?;
        }
        if let Some(arr) = table.get("images").and_then(|v| v.as_array()) {
            config.images = arr
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }

        // Tunables may live at the top level or in a [tunables] table
        let tunables = table
            .get("tunables")
            .and_then(|v| v.as_table())
            .unwrap_or(table);
        if let Some(v) = tunables.get("movement_speed") {
            config.tunables.movement_speed = toml_f32(v, config.tunables.movement_speed);
        }
        if let Some(v) = tunables.get("rotation_speed") {
            config.tunables.rotation_speed = toml_f32(v, config.tunables.rotation_speed);
        }
        if let Some(v) = tunables.get("boundary") {
            config.tunables.boundary = toml_f32(v, config.tunables.boundary);
        }

        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(s)?;
        Self::from_toml(&table)
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Reject configs the particle core cannot sample from
    pub fn validate(&self) -> Result<()> {
        if self.colors.is_empty() && self.images.is_empty() {
            return Err(ConfettiError::MissingRequiredField(
                "colors or images (at least one style)".into(),
            ));
        }
        if let EmitterMode::Burst { .. } = self.mode {
            if self.force < MIN_BURST_SPEED {
                return Err(ConfettiError::ValueOutOfRange {
                    field: "force".into(),
                    min: MIN_BURST_SPEED as f64,
                    max: f32::MAX as f64,
                    value: self.force as f64,
                });
            }
        }
        check_non_negative("rate", self.rate)?;
        check_non_negative("duration", self.duration)?;
        check_non_negative("spread", self.spread)?;
        check_non_negative("boundary", self.tunables.boundary)?;
        check_positive("movement_speed", self.tunables.movement_speed)?;
        check_positive("rotation_speed", self.tunables.rotation_speed)?;
        Ok(())
    }

    /// Build the style set: every color, then every image loaded relative to `base_dir`
    pub fn load_styles(&self, base_dir: Option<&Path>) -> Result<Vec<Style>> {
        let mut styles: Vec<Style> = self.colors.iter().copied().map(Style::Color).collect();
        for image in &self.images {
            let path = match base_dir {
                Some(dir) => dir.join(image),
                None => Path::new(image).to_path_buf(),
            };
            styles.push(Style::Image(Sprite::load(&path)?));
        }
        Ok(styles)
    }
}

fn check_non_negative(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfettiError::ValueOutOfRange {
            field: field.into(),
            min: 0.0,
            max: f32::MAX as f64,
            value: value as f64,
        })
    }
}

fn check_positive(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfettiError::InvalidConfig(format!(
            "{field} must be positive, got {value}"
        )))
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_vec2(v: &toml::Value) -> Option<Vec2> {
    let arr = v.as_array()?;
    if arr.len() < 2 {
        return None;
    }
    Some(Vec2::new(
        toml_f32(&arr[0], f32::NAN),
        toml_f32(&arr[1], f32::NAN),
    ))
    .filter(|o| o.x.is_finite() && o.y.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EmitterConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.count > 0);
        assert!(!config.colors.is_empty());
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r##"
mode = "burst"
origin = [400, 300.5]
count = 80
force = 12
angle = -90.0
spread = 60
colors = ["red", "#00ff00", "#00f"]

[tunables]
movement_speed = 0.75
boundary = 20
"##;
        let config = EmitterConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(
            config.mode,
            EmitterMode::Burst {
                origin: Some(Vec2::new(400.0, 300.5))
            }
        );
        assert_eq!(config.count, 80);
        assert!((config.force - 12.0).abs() < 0.01);
        assert!((config.angle + 90.0).abs() < 0.01);
        assert!((config.spread - 60.0).abs() < 0.01);
        assert_eq!(config.colors, vec![Color::RED, Color::GREEN, Color::BLUE]);
        assert!((config.tunables.movement_speed - 0.75).abs() < 0.01);
        assert!((config.tunables.boundary - 20.0).abs() < 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn ambient_mode_and_top_level_tunables() {
        let config = EmitterConfig::from_toml_str(
            "mode = \"falling\"\nrate = 30\nduration = 4.5\nrotation_speed = 2",
        )
        .unwrap();
        assert_eq!(config.mode, EmitterMode::Ambient);
        assert!((config.rate - 30.0).abs() < 0.01);
        assert!((config.duration - 4.5).abs() < 0.01);
        assert!((config.tunables.rotation_speed - 2.0).abs() < 0.01);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = EmitterConfig::from_toml_str("mode = \"sideways\"").unwrap_err();
        assert!(matches!(err, ConfettiError::InvalidEnumValue { .. }));
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = EmitterConfig::from_toml_str("colors = [\"red\", 3]").unwrap_err();
        assert!(matches!(err, ConfettiError::InvalidColor(_)));
    }

    #[test]
    fn empty_palette_fails_validation() {
        let config = EmitterConfig::from_toml_str("colors = []").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfettiError::MissingRequiredField(_))
        ));
    }

    #[test]
    fn weak_burst_force_fails_validation() {
        let config = EmitterConfig::from_toml_str("mode = \"burst\"\nforce = 3").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfettiError::ValueOutOfRange { .. })
        ));

        // Force is ignored in ambient mode
        let config = EmitterConfig::from_toml_str("mode = \"ambient\"\nforce = 3").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_speed_fails_validation() {
        let config = EmitterConfig::from_toml_str("movement_speed = 0").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfettiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn styles_from_colors() {
        let config = EmitterConfig::from_toml_str("colors = [\"gold\", \"silver\"]").unwrap();
        let styles = config.load_styles(None).unwrap();
        assert_eq!(styles.len(), 2);
        assert!(matches!(styles[0], Style::Color(_)));
    }

    #[test]
    fn missing_image_is_an_error() {
        let config =
            EmitterConfig::from_toml_str("images = [\"definitely/not/here.png\"]").unwrap();
        assert!(matches!(
            config.load_styles(None),
            Err(ConfettiError::ImageError(_))
        ));
    }
}
