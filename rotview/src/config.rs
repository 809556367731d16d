use figures::FigureKind;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Written to the config directory the first time rotview runs.
pub const DEFAULT_CONFIG: &str = include_str!("../resources/config.ron");

#[derive(Debug, Error)]
pub enum ConfigErrors {
    #[error("could not access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Units of the angles typed at the prompt and shown by `status`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleUnits {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnits {
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnits::Degrees => angle.to_radians(),
            AngleUnits::Radians => angle,
        }
    }

    pub fn from_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnits::Degrees => angle.to_degrees(),
            AngleUnits::Radians => angle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AngleUnits::Degrees => "deg",
            AngleUnits::Radians => "rad",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotviewConfig {
    pub angle_units: AngleUnits,
    /// Decimal places printed by `status` and `vertices`.
    pub precision: usize,
    /// Largest single Euler increment, in `angle_units`.
    pub max_nudge: f64,
    pub monitor_refresh_ms: u64,
    /// Largest accepted element of `R^T R - I` for typed matrices.
    pub matrix_tolerance: f64,
    pub default_figure: FigureKind,
}

impl Default for RotviewConfig {
    fn default() -> Self {
        Self {
            angle_units: AngleUnits::Degrees,
            precision: 4,
            max_nudge: 5.0,
            monitor_refresh_ms: 100,
            matrix_tolerance: 1e-3,
            default_figure: FigureKind::Cube,
        }
    }
}

impl RotviewConfig {
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigErrors> {
        let config: Self = ron::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigErrors> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents)?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, otherwise the file in the user config directory,
    /// writing the default there first if it does not exist yet.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigErrors> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match default_path() {
            Some(path) => {
                write_default_if_missing(&path)?;
                Self::from_file(&path)
            }
            None => {
                warn!("no config directory available, using default settings");
                Self::from_ron_str(DEFAULT_CONFIG)
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigErrors> {
        // f64 formatting stops being meaningful past 17 significant digits
        if self.precision > 16 {
            return Err(ConfigErrors::Invalid {
                field: "precision",
                reason: format!("{} is more than 16 decimal places", self.precision),
            });
        }
        if !(self.max_nudge.is_finite() && self.max_nudge > 0.0) {
            return Err(ConfigErrors::Invalid {
                field: "max_nudge",
                reason: format!("{} must be finite and positive", self.max_nudge),
            });
        }
        if self.monitor_refresh_ms == 0 {
            return Err(ConfigErrors::Invalid {
                field: "monitor_refresh_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.matrix_tolerance.is_finite() && self.matrix_tolerance > 0.0) {
            return Err(ConfigErrors::Invalid {
                field: "matrix_tolerance",
                reason: format!("{} must be finite and positive", self.matrix_tolerance),
            });
        }
        Ok(())
    }
}

/// Directory holding the config file and command history.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|mut dir| {
        dir.push("rotview");
        dir
    })
}

fn default_path() -> Option<PathBuf> {
    config_dir().map(|mut path| {
        path.push("config.ron");
        path
    })
}

fn write_default_if_missing(path: &Path) -> Result<(), ConfigErrors> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)?;
    debug!("wrote default config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn scratch_dir(name: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("rotview-{}-{}", name, std::process::id()));
        dir
    }

    #[test]
    fn test_embedded_default_matches_default() {
        let config = RotviewConfig::from_ron_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, RotviewConfig::default());
    }

    #[test]
    fn test_angle_units() {
        assert_abs_diff_eq!(AngleUnits::Degrees.to_radians(180.0), PI, epsilon = 1e-15);
        assert_abs_diff_eq!(AngleUnits::Degrees.from_radians(PI), 180.0, epsilon = 1e-12);
        assert_eq!(AngleUnits::Radians.to_radians(1.5), 1.5);
        assert_eq!(AngleUnits::Radians.from_radians(1.5), 1.5);
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        let contents = DEFAULT_CONFIG.replace("max_nudge: 5.0", "max_nudge: -1.0");
        assert!(matches!(
            RotviewConfig::from_ron_str(&contents),
            Err(ConfigErrors::Invalid { field: "max_nudge", .. })
        ));

        let contents = DEFAULT_CONFIG.replace("monitor_refresh_ms: 100", "monitor_refresh_ms: 0");
        assert!(matches!(
            RotviewConfig::from_ron_str(&contents),
            Err(ConfigErrors::Invalid { field: "monitor_refresh_ms", .. })
        ));

        assert!(matches!(
            RotviewConfig::from_ron_str("(angle_units: Gradians)"),
            Err(ConfigErrors::Ron(_))
        ));
    }

    #[test]
    fn test_write_default_if_missing() {
        let dir = scratch_dir("config");
        let path = dir.join("config.ron");
        let _ = fs::remove_dir_all(&dir);

        write_default_if_missing(&path).unwrap();
        assert_eq!(RotviewConfig::load(Some(path.as_path())).unwrap(), RotviewConfig::default());

        // an existing file is left alone
        let custom = DEFAULT_CONFIG.replace("Degrees", "Radians");
        fs::write(&path, &custom).unwrap();
        write_default_if_missing(&path).unwrap();
        let config = RotviewConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.angle_units, AngleUnits::Radians);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let path = scratch_dir("missing").join("nope.ron");
        assert!(matches!(RotviewConfig::load(Some(path.as_path())), Err(ConfigErrors::Io(_))));
    }
}
