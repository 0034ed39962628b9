use slidekit_core::options::ResponsiveOverride;
use slidekit_core::{Axis, Mode, SliderOptions};
use thiserror::Error;

/// Settings a slider cannot be built from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("breakpoint key {key:?} is not a width in px")]
    InvalidBreakpoint { key: String },
    #[error("{field} must not be negative, got {value}")]
    NegativeLength { field: &'static str, value: f64 },
    #[error("stage width must be positive, got {0}")]
    InvalidViewport(f64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    /// True if any warning message contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.items.iter().any(|w| w.message.contains(needle))
    }
}

/// Reject settings the slider would refuse to mount with or could only
/// render as garbage.
pub fn guard_rails(options: &SliderOptions) -> Result<(), ConfigError> {
    for key in options.responsive.keys() {
        if key.trim().parse::<u32>().is_err() {
            return Err(ConfigError::InvalidBreakpoint { key: key.clone() });
        }
    }

    check_length("gutter", Some(options.gutter))?;
    check_length("edgePadding", options.edge_padding)?;
    check_length("fixedWidth", options.fixed_width)?;
    for entry in options.responsive.values() {
        let ov = entry.clone().into_override();
        check_length("gutter", ov.gutter)?;
        check_length("edgePadding", ov.edge_padding.flatten())?;
        check_length("fixedWidth", ov.fixed_width.flatten())?;
    }
    Ok(())
}

fn check_length(field: &'static str, value: Option<f64>) -> Result<(), ConfigError> {
    match value {
        Some(value) if value < 0.0 => Err(ConfigError::NegativeLength { field, value }),
        _ => Ok(()),
    }
}

/// Legal settings that probably do not do what the author meant.
pub fn validate(options: &SliderOptions, slide_count: usize) -> ConfigWarnings {
    let mut warnings = ConfigWarnings::default();
    let gallery = options.mode == Mode::Gallery;

    if slide_count < 2 {
        warnings.push_with_hint(
            format!("{slide_count} slide(s) configured; the slider stays inert"),
            "A slider needs at least 2 slides",
        );
    } else if options.items >= slide_count {
        warnings.push_with_hint(
            format!(
                "items ({}) covers all {slide_count} slides; the slider is frozen",
                options.items
            ),
            "Frozen sliders ignore navigation, gestures and autoplay",
        );
    }

    if options.rewind && options.looping {
        warnings.push_with_hint(
            "rewind and loop are both enabled; rewind wins",
            "Set loop = false to silence this warning",
        );
    }

    if gallery && options.axis == Axis::Vertical {
        warnings.push("gallery mode is always horizontal; axis = vertical is ignored");
    }

    if options.autoplay && options.autoplay_timeout == 0 {
        warnings.push_with_hint(
            "autoplayTimeout is 0; autoplay advances on every tick",
            "Use a timeout of at least the transition speed",
        );
    }

    if options.fixed_width == Some(0.0) {
        warnings.push("fixedWidth of 0 is treated as unset");
    }

    if options.speed > 0 && options.autoplay && options.autoplay_timeout < options.speed {
        warnings.push_with_hint(
            format!(
                "autoplayTimeout ({}) is shorter than speed ({})",
                options.autoplay_timeout, options.speed
            ),
            "Autoplay steps are dropped while a transition is running",
        );
    }

    if gallery {
        if options.edge_padding.is_some() || options.fixed_width.is_some() {
            warnings.push("edgePadding and fixedWidth only apply to carousel mode");
        }
        for (key, entry) in &options.responsive {
            let ignored = carousel_only(&entry.clone().into_override());
            if !ignored.is_empty() {
                warnings.push_with_hint(
                    format!(
                        "breakpoint {key} sets {} which gallery mode ignores",
                        ignored.join(", ")
                    ),
                    "Remove them or switch the slider to mode = \"carousel\"",
                );
            }
        }
    }

    warnings
}

fn carousel_only(ov: &ResponsiveOverride) -> Vec<&'static str> {
    let mut names = Vec::new();
    if ov.edge_padding.is_some() {
        names.push("edgePadding");
    }
    if ov.fixed_width.is_some() {
        names.push("fixedWidth");
    }
    if ov.touch.is_some() {
        names.push("touch");
    }
    if ov.mouse_drag.is_some() {
        names.push("mouseDrag");
    }
    names
}
