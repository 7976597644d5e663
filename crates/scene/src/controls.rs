use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors from loading a controls file.
#[derive(Debug, thiserror::Error)]
pub enum ControlsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-tunable render parameters, edited live from the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Icosphere subdivision level.
    pub tesselations: u32,
    /// Multiplier on the shader clock.
    pub time_scale: f32,
    /// How far the plume displaces vertices along their normals.
    pub plume_height: f32,
    /// Brightness of the fire color ramp.
    pub color_gain: f32,
    pub show_cube: bool,
    pub show_square: bool,
}

impl Controls {
    pub const TESSELATIONS: RangeInclusive<u32> = 0..=8;
    pub const TIME_SCALE: RangeInclusive<f32> = 0.3..=3.0;
    pub const PLUME_HEIGHT: RangeInclusive<f32> = 0.0..=2.0;
    pub const COLOR_GAIN: RangeInclusive<f32> = 0.1..=0.99;

    const DEFAULT_TIME_SCALE: f32 = 1.0;
    const DEFAULT_PLUME_HEIGHT: f32 = 0.7;
    const DEFAULT_COLOR_GAIN: f32 = 0.7;

    /// Restore the shader parameters. Tessellation and visibility are kept.
    pub fn reset(&mut self) {
        self.plume_height = Self::DEFAULT_PLUME_HEIGHT;
        self.time_scale = Self::DEFAULT_TIME_SCALE;
        self.color_gain = Self::DEFAULT_COLOR_GAIN;
    }

    /// Copy with every numeric field pulled into its range.
    pub fn clamped(&self) -> Self {
        Self {
            tesselations: self
                .tesselations
                .clamp(*Self::TESSELATIONS.start(), *Self::TESSELATIONS.end()),
            time_scale: clamp_f32(self.time_scale, &Self::TIME_SCALE),
            plume_height: clamp_f32(self.plume_height, &Self::PLUME_HEIGHT),
            color_gain: clamp_f32(self.color_gain, &Self::COLOR_GAIN),
            ..*self
        }
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ControlsError> {
        let data = std::fs::read_to_string(path)?;
        let controls: Controls = serde_json::from_str(&data)?;
        Ok(controls.clamped())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ControlsError> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            tesselations: 5,
            time_scale: Self::DEFAULT_TIME_SCALE,
            plume_height: Self::DEFAULT_PLUME_HEIGHT,
            color_gain: Self::DEFAULT_COLOR_GAIN,
            show_cube: false,
            show_square: false,
        }
    }
}

fn clamp_f32(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Controls::default();
        assert_eq!(c.tesselations, 5);
        assert_eq!(c.time_scale, 1.0);
        assert_eq!(c.plume_height, 0.7);
        assert_eq!(c.color_gain, 0.7);
        assert!(!c.show_cube);
    }

    #[test]
    fn reset_keeps_tesselations() {
        let mut c = Controls {
            tesselations: 2,
            time_scale: 2.5,
            plume_height: 0.0,
            color_gain: 0.2,
            show_cube: true,
            show_square: false,
        };
        c.reset();
        assert_eq!(c.tesselations, 2);
        assert!(c.show_cube);
        assert_eq!(c.time_scale, 1.0);
        assert_eq!(c.plume_height, 0.7);
        assert_eq!(c.color_gain, 0.7);
    }

    #[test]
    fn clamped_pulls_into_ranges() {
        let c = Controls {
            tesselations: 12,
            time_scale: 0.0,
            plume_height: 5.0,
            color_gain: f32::NAN,
            ..Controls::default()
        }
        .clamped();
        assert_eq!(c.tesselations, 8);
        assert_eq!(c.time_scale, 0.3);
        assert_eq!(c.plume_height, 2.0);
        assert_eq!(c.color_gain, 0.1);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let c: Controls = serde_json::from_str(r#"{ "plume_height": 1.25 }"#).unwrap();
        assert_eq!(c.plume_height, 1.25);
        assert_eq!(c.tesselations, 5);
        assert_eq!(c.color_gain, 0.7);
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let c = Controls {
            tesselations: 3,
            show_square: true,
            ..Controls::default()
        };
        c.save(tmp.path()).unwrap();

        let loaded = Controls::load(tmp.path()).unwrap();
        assert_eq!(loaded, c);
    }

    #[test]
    fn load_clamps() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), r#"{ "tesselations": 40 }"#).unwrap();
        let loaded = Controls::load(tmp.path()).unwrap();
        assert_eq!(loaded.tesselations, 8);
    }

    #[test]
    fn load_bad_json() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "not json").unwrap();
        assert!(matches!(
            Controls::load(tmp.path()),
            Err(ControlsError::Json(_))
        ));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Controls::load(dir.path().join("missing.json")),
            Err(ControlsError::Io(_))
        ));
    }
}
