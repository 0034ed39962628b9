//! Base slider options and responsive overrides.
//!
//! Field names follow the slider's public option names (camelCase on the
//! wire) so existing JSON/TOML configurations deserialize unchanged. Options
//! that historically accept `false` in place of a value (`fixedWidth`,
//! `edgePadding`, `nested`, `animateDelay`) accept either form.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Carousel translates a track of slides; gallery cross-fades in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Carousel,
    Gallery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("horizontal"),
            Axis::Vertical => f.write_str("vertical"),
        }
    }
}

/// Role of a slider nested inside another slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nested {
    Inner,
    Outer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoplayDirection {
    #[default]
    Forward,
    Backward,
}

impl AutoplayDirection {
    pub fn step(self) -> isize {
        match self {
            AutoplayDirection::Forward => 1,
            AutoplayDirection::Backward => -1,
        }
    }
}

/// How far one prev/next step moves: a fixed count or a whole page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SlideByRepr", into = "SlideByRepr")]
pub enum SlideBy {
    Count(usize),
    Page,
}

impl Default for SlideBy {
    fn default() -> Self {
        SlideBy::Count(1)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SlideByRepr {
    Count(usize),
    Word(String),
}

impl TryFrom<SlideByRepr> for SlideBy {
    type Error = String;

    fn try_from(value: SlideByRepr) -> Result<Self, Self::Error> {
        match value {
            SlideByRepr::Count(n) => Ok(SlideBy::Count(n)),
            SlideByRepr::Word(word) if word == "page" => Ok(SlideBy::Page),
            SlideByRepr::Word(word) => {
                Err(format!("slideBy must be a number or \"page\", got {word:?}"))
            }
        }
    }
}

impl From<SlideBy> for SlideByRepr {
    fn from(value: SlideBy) -> Self {
        match value {
            SlideBy::Count(n) => SlideByRepr::Count(n),
            SlideBy::Page => SlideByRepr::Word("page".to_string()),
        }
    }
}

/// Accepts `false`, `null` or a value.
fn false_or<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr<T> {
        Flag(bool),
        Value(T),
    }

    match Option::<Repr<T>>::deserialize(deserializer)? {
        None | Some(Repr::Flag(false)) => Ok(None),
        Some(Repr::Flag(true)) => {
            Err(D::Error::custom("expected a value or `false`, got `true`"))
        }
        Some(Repr::Value(value)) => Ok(Some(value)),
    }
}

/// Like [`false_or`], but keeps "present and disabled" apart from "absent".
fn present_false_or<'de, D, T>(
    deserializer: D,
) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    false_or(deserializer).map(Some)
}

/// Options a breakpoint may override. `None` means "inherit".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponsiveOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_by: Option<SlideBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gutter: Option<f64>,
    #[serde(
        deserialize_with = "present_false_or",
        skip_serializing_if = "Option::is_none"
    )]
    pub edge_padding: Option<Option<f64>>,
    #[serde(
        deserialize_with = "present_false_or",
        skip_serializing_if = "Option::is_none"
    )]
    pub fixed_width: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls_text: Option<[String; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow_keys: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay_text: Option<[String; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay_hover_pause: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay_reset_on_visibility: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_height: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub touch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouse_drag: Option<bool>,
}

impl ResponsiveOverride {
    pub fn items(items: usize) -> Self {
        Self {
            items: Some(items),
            ..Self::default()
        }
    }

    /// True when this override touches anything that changes layout styles.
    pub fn touches_layout(&self) -> bool {
        self.items.is_some()
            || self.gutter.is_some()
            || self.edge_padding.is_some()
            || self.fixed_width.is_some()
    }
}

/// A breakpoint value: a bare number is shorthand for `{ items: n }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsiveEntry {
    Items(usize),
    Override(ResponsiveOverride),
}

impl ResponsiveEntry {
    pub fn into_override(self) -> ResponsiveOverride {
        match self {
            ResponsiveEntry::Items(items) => ResponsiveOverride::items(items),
            ResponsiveEntry::Override(ov) => ov,
        }
    }
}

fn default_items() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_speed() -> u64 {
    300
}

fn default_autoplay_timeout() -> u64 {
    5_000
}

fn default_controls_text() -> [String; 2] {
    ["prev".to_string(), "next".to_string()]
}

fn default_autoplay_text() -> [String; 2] {
    ["start".to_string(), "stop".to_string()]
}

fn default_animate_in() -> String {
    "fade-in".to_string()
}

fn default_animate_out() -> String {
    "fade-out".to_string()
}

fn default_animate_normal() -> String {
    "normal".to_string()
}

/// Base configuration of a slider, before breakpoint resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderOptions {
    pub mode: Mode,
    pub axis: Axis,
    #[serde(default = "default_items")]
    pub items: usize,
    pub gutter: f64,
    #[serde(deserialize_with = "false_or")]
    pub edge_padding: Option<f64>,
    #[serde(deserialize_with = "false_or")]
    pub fixed_width: Option<f64>,
    pub slide_by: SlideBy,
    #[serde(default = "default_true")]
    pub controls: bool,
    #[serde(default = "default_controls_text")]
    pub controls_text: [String; 2],
    /// The host supplies its own prev/next elements.
    pub controls_container: bool,
    #[serde(default = "default_true")]
    pub nav: bool,
    /// The host supplies its own nav items (e.g. thumbnails); they are never
    /// hidden by the visible-window logic.
    pub nav_container: bool,
    pub arrow_keys: bool,
    #[serde(default = "default_speed")]
    pub speed: u64,
    pub autoplay: bool,
    #[serde(default = "default_autoplay_timeout")]
    pub autoplay_timeout: u64,
    pub autoplay_direction: AutoplayDirection,
    #[serde(default = "default_autoplay_text")]
    pub autoplay_text: [String; 2],
    pub autoplay_hover_pause: bool,
    /// The host supplies its own start/stop button.
    pub autoplay_button: bool,
    #[serde(default = "default_true")]
    pub autoplay_button_output: bool,
    #[serde(default = "default_true")]
    pub autoplay_reset_on_visibility: bool,
    /// Gallery class for slides entering view.
    #[serde(default = "default_animate_in")]
    pub animate_in: String,
    #[serde(default = "default_animate_out")]
    pub animate_out: String,
    /// Resting class of gallery slides out of view.
    #[serde(default = "default_animate_normal")]
    pub animate_normal: String,
    /// Stagger between gallery slides, in milliseconds.
    #[serde(deserialize_with = "false_or")]
    pub animate_delay: Option<u64>,
    #[serde(rename = "loop", default = "default_true")]
    pub looping: bool,
    pub rewind: bool,
    pub auto_height: bool,
    /// Breakpoint width (px) to override. Keys are strings so that JSON and
    /// TOML tables map directly.
    pub responsive: BTreeMap<String, ResponsiveEntry>,
    pub lazyload: bool,
    #[serde(default = "default_true")]
    pub touch: bool,
    pub mouse_drag: bool,
    #[serde(deserialize_with = "false_or")]
    pub nested: Option<Nested>,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Carousel,
            axis: Axis::Horizontal,
            items: default_items(),
            gutter: 0.0,
            edge_padding: None,
            fixed_width: None,
            slide_by: SlideBy::default(),
            controls: true,
            controls_text: default_controls_text(),
            controls_container: false,
            nav: true,
            nav_container: false,
            arrow_keys: false,
            speed: default_speed(),
            autoplay: false,
            autoplay_timeout: default_autoplay_timeout(),
            autoplay_direction: AutoplayDirection::Forward,
            autoplay_text: default_autoplay_text(),
            autoplay_hover_pause: false,
            autoplay_button: false,
            autoplay_button_output: true,
            autoplay_reset_on_visibility: true,
            animate_in: default_animate_in(),
            animate_out: default_animate_out(),
            animate_normal: default_animate_normal(),
            animate_delay: None,
            looping: true,
            rewind: false,
            auto_height: false,
            responsive: BTreeMap::new(),
            lazyload: false,
            touch: true,
            mouse_drag: false,
            nested: None,
        }
    }
}

impl SliderOptions {
    pub fn is_carousel(&self) -> bool {
        self.mode == Mode::Carousel
    }

    /// Apply the constraints gallery mode imposes on the base options:
    /// horizontal axis, always looping, never rewinding.
    pub fn normalized(mut self) -> Self {
        if self.mode == Mode::Gallery {
            self.axis = Axis::Horizontal;
            self.rewind = false;
            self.looping = true;
        }
        self
    }

    /// Parse a JSON document into options.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responsive_shorthand_expands_to_items() {
        let opts = SliderOptions::from_json(
            r#"{ "items": 2, "responsive": { "640": 3, "900": { "loop": false, "gutter": 10 } } }"#,
        )
        .unwrap();

        let small = opts.responsive["640"].clone().into_override();
        assert_eq!(small.items, Some(3));
        let large = opts.responsive["900"].clone().into_override();
        assert_eq!(large.gutter, Some(10.0));
        assert_eq!(large.items, None);
    }

    #[test]
    fn false_is_accepted_for_optional_values() {
        let opts = SliderOptions::from_json(
            r#"{ "fixedWidth": false, "edgePadding": 40, "nested": false, "slideBy": "page" }"#,
        )
        .unwrap();
        assert_eq!(opts.fixed_width, None);
        assert_eq!(opts.edge_padding, Some(40.0));
        assert_eq!(opts.nested, None);
        assert_eq!(opts.slide_by, SlideBy::Page);
    }

    #[test]
    fn override_keeps_explicit_disable_apart_from_absent() {
        let ov: ResponsiveOverride =
            serde_json::from_str(r#"{ "edgePadding": false }"#).unwrap();
        assert_eq!(ov.edge_padding, Some(None));
        assert_eq!(ov.fixed_width, None);
    }

    #[test]
    fn unknown_slide_by_word_is_rejected() {
        let err = SliderOptions::from_json(r#"{ "slideBy": "half" }"#);
        assert!(err.is_err());
    }

    #[test]
    fn gallery_normalization_forces_loop() {
        let opts = SliderOptions {
            mode: Mode::Gallery,
            axis: Axis::Vertical,
            looping: false,
            rewind: true,
            ..SliderOptions::default()
        }
        .normalized();
        assert_eq!(opts.axis, Axis::Horizontal);
        assert!(opts.looping);
        assert!(!opts.rewind);
    }

    #[test]
    fn defaults_match_documented_values() {
        let opts = SliderOptions::default();
        assert_eq!(opts.items, 1);
        assert_eq!(opts.speed, 300);
        assert_eq!(opts.autoplay_timeout, 5_000);
        assert!(opts.looping);
        assert!(opts.touch);
        assert!(!opts.mouse_drag);
    }
}
