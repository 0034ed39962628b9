//! Configuration loading for slidekit sliders.
//!
//! A [`SliderConfig`] pairs the slider's [`SliderOptions`] with the stage a
//! headless slider is mounted on (slide count, viewport width, renderer
//! profile). Configs come from TOML or JSON files, inline JSON in the
//! environment, or defaults; [`validation`] reports settings that are legal
//! but probably not what the author meant.
//!
//! [`SliderOptions`]: slidekit_core::SliderOptions

#![allow(missing_docs)]

pub mod loader;
pub mod validation;

pub use loader::{CapabilityProfile, ConfigSource, SliderConfig, StageConfig};
pub use validation::{ConfigError, ConfigWarning, ConfigWarnings, guard_rails, validate};
