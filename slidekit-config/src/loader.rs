use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use slidekit_core::{Capabilities, HeadlessHost, SliderOptions};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::validation::{self, ConfigError, ConfigWarnings};

/// Environment variable naming a TOML or JSON config file.
pub const CONFIG_PATH_VAR: &str = "SLIDEKIT_CONFIG_PATH";
/// Environment variable holding an inline JSON config.
pub const CONFIG_JSON_VAR: &str = "SLIDEKIT_CONFIG_JSON";

const DEFAULT_FILES: &[&str] = &[
    "slider.toml",
    "slider.json",
    "config/slider.toml",
    "config/slider.json",
];

/// Source that produced the slider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Renderer feature set a headless slider pretends to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityProfile {
    #[default]
    Modern,
    /// No transforms, transitions, `calc()` or media queries.
    Legacy,
}

impl CapabilityProfile {
    pub fn capabilities(self) -> Capabilities {
        match self {
            CapabilityProfile::Modern => Capabilities::modern(),
            CapabilityProfile::Legacy => Capabilities::legacy(),
        }
    }
}

/// The surface a headless slider is mounted on.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StageConfig {
    /// Number of real slides.
    pub slides: usize,
    /// Outer viewport width in px.
    pub width: f64,
    /// Width inside the edge padding; defaults to `width`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_width: Option<f64>,
    /// Slide heights in px, cycled across the slides.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub heights: Vec<f64>,
    pub profile: CapabilityProfile,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            slides: 5,
            width: 800.0,
            inner_width: None,
            heights: Vec::new(),
            profile: CapabilityProfile::Modern,
        }
    }
}

impl StageConfig {
    pub fn host(&self) -> HeadlessHost {
        let mut host =
            HeadlessHost::new(self.slides, self.width).with_heights(self.heights.clone());
        if let Some(inner) = self.inner_width {
            host = host.with_inner_width(inner);
        }
        host
    }
}

/// Slider options plus the stage they are mounted on.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SliderConfig {
    pub slider: SliderOptions,
    pub stage: StageConfig,
}

impl SliderConfig {
    /// Load the configuration using environment variables.
    /// Evaluation order:
    /// 1) `$SLIDEKIT_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$SLIDEKIT_CONFIG_JSON` (inline JSON),
    /// 3) `slider.toml`, `slider.json`, `config/slider.toml` or
    ///    `config/slider.json` in the working directory,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        Self::load_with(|name| env::var(name).ok(), Path::new("."))
    }

    /// [`SliderConfig::load_from_env`] with an explicit variable lookup and
    /// a directory to search for default files.
    pub fn load_with(
        lookup: impl Fn(&str) -> Option<String>,
        base_dir: &Path,
    ) -> anyhow::Result<(Self, ConfigSource)> {
        if let Some(path_str) = lookup(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str.trim());
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(base_dir) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        debug!("no slider config found, using defaults");
        Ok((Self::default(), ConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read slider config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents)
                .with_context(|| format!("invalid slider config {}", path.display())),
            Some("toml") | Some("tml") => toml::from_str(&contents)
                .map_err(|err| anyhow!("invalid slider config {}: {}", path.display(), err)),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    /// Parse a document of unknown format: TOML first, then JSON.
    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse slider config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).map_err(|err| anyhow!("invalid slider config json: {err}"))
    }

    /// Guard rails first, then the non-fatal warnings.
    pub fn validated(&self) -> Result<ConfigWarnings, ConfigError> {
        validation::guard_rails(&self.slider)?;
        if self.stage.width.is_nan() || self.stage.width <= 0.0 {
            return Err(ConfigError::InvalidViewport(self.stage.width));
        }
        Ok(validation::validate(&self.slider, self.stage.slides))
    }

    /// Validate and log every warning.
    pub fn check(&self) -> Result<(), ConfigError> {
        let warnings = self.validated()?;
        for warning in &warnings.items {
            if let Some(hint) = &warning.hint {
                warn!(message = %warning.message, hint = %hint, "configuration warning");
            } else {
                warn!(message = %warning.message, "configuration warning");
            }
        }
        Ok(())
    }

    fn find_default_file(base_dir: &Path) -> Option<PathBuf> {
        DEFAULT_FILES
            .iter()
            .map(|name| base_dir.join(name))
            .find(|path| path.exists())
    }
}
