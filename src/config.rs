use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::depth::Depth;
use crate::error::{Result, RuioError};
use crate::marker::{ExclusionMarker, StyleMarker, DEFAULT_EXCLUSION_CLASS};
use crate::painter::BorderPainter;

/// Environment variable pointing at a config file used when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "RUIO_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub depth: DepthSettings,
    pub exclusion_class: String,
    pub border: StyleMarker,
    pub hover: StyleMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DepthSettings {
    pub default: u32,
    pub min: u32,
    pub max: u32,
}

impl Default for DepthSettings {
    fn default() -> Self {
        Self {
            default: Depth::DEFAULT.get(),
            min: Depth::MIN,
            max: Depth::MAX,
        }
    }
}

impl DepthSettings {
    /// Clamps any integer into these bounds.
    pub fn clamp(&self, value: i64) -> Depth {
        Depth::clamped_within(value, self.min, self.max)
    }

    pub fn initial(&self) -> Depth {
        self.clamp(i64::from(self.default))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depth: DepthSettings::default(),
            exclusion_class: DEFAULT_EXCLUSION_CLASS.to_string(),
            border: StyleMarker::border(),
            hover: StyleMarker::hover(),
        }
    }
}

impl Config {
    /// Loads config from an explicit path, else `$RUIO_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(Self::central_config_path) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        let DepthSettings { default, min, max } = self.depth;
        if min < Depth::MIN || max > Depth::MAX {
            return Err(RuioError::config(format!(
                "depth bounds {min}..={max} must lie within {}..={}",
                Depth::MIN,
                Depth::MAX
            )));
        }
        if min > max {
            return Err(RuioError::config(format!(
                "depth.min ({min}) is greater than depth.max ({max})"
            )));
        }
        if !(min..=max).contains(&default) {
            return Err(RuioError::config(format!(
                "depth.default ({default}) is outside {min}..={max}"
            )));
        }
        if self.exclusion_class.trim().is_empty()
            || self.exclusion_class.contains(char::is_whitespace)
        {
            return Err(RuioError::config(format!(
                "exclusion_class '{}' must be a single non-empty class token",
                self.exclusion_class
            )));
        }
        for (name, marker) in [("border", &self.border), ("hover", &self.hover)] {
            if marker.property.trim().is_empty() || marker.value.trim().is_empty() {
                return Err(RuioError::config(format!(
                    "{name} style marker needs both a property and a value"
                )));
            }
        }
        if self.border.property == self.hover.property {
            return Err(RuioError::config(format!(
                "border and hover markers must use different properties (both use '{}')",
                self.border.property
            )));
        }
        Ok(())
    }

    pub fn exclusion(&self) -> ExclusionMarker {
        ExclusionMarker::new(self.exclusion_class.clone())
    }

    pub fn painter(&self) -> BorderPainter {
        BorderPainter::new(self.border.clone(), self.hover.clone(), self.exclusion())
    }
}
