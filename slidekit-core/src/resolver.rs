//! Breakpoint-aware option resolution.
//!
//! A value is looked up by walking the breakpoint table in ascending order
//! and keeping the last override whose threshold is at or below the viewport
//! width. Derived options (items from a fixed width, gallery paging) are
//! computed rather than looked up.

use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, SliderError};
use crate::options::{
    Axis, Mode, Nested, ResponsiveOverride, SlideBy, SliderOptions,
};

/// Ascending breakpoint table.
#[derive(Debug, Clone, Default)]
pub struct Breakpoints {
    entries: Vec<(u32, ResponsiveOverride)>,
    /// 1 when there is no breakpoint at width 0, so zone 0 can mean
    /// "below every threshold".
    zone_adjust: usize,
}

impl Breakpoints {
    pub fn from_options(options: &SliderOptions) -> Result<Self> {
        let mut entries = Vec::with_capacity(options.responsive.len());
        for (key, entry) in &options.responsive {
            let width = key
                .trim()
                .parse::<u32>()
                .map_err(|_| SliderError::InvalidBreakpoint(key.clone()))?;
            entries.push((width, entry.clone().into_override()));
        }
        entries.sort_by_key(|(width, _)| *width);

        let zone_adjust = match entries.first() {
            Some((0, _)) => 0,
            _ => 1,
        };
        Ok(Self {
            entries,
            zone_adjust,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u32, ResponsiveOverride)> {
        self.entries.iter()
    }

    /// Zone for `viewport`. 0 means below all thresholds (when no breakpoint
    /// sits at 0).
    pub fn zone(&self, viewport: f64) -> usize {
        let mut zone = 0;
        for (i, (width, _)) in self.entries.iter().enumerate() {
            if viewport >= f64::from(*width) {
                zone = i + self.zone_adjust;
            }
        }
        zone
    }

    fn lookup<T>(
        &self,
        viewport: f64,
        pick: impl Fn(&ResponsiveOverride) -> Option<T>,
    ) -> Option<T> {
        let mut found = None;
        for (width, ov) in &self.entries {
            if viewport < f64::from(*width) {
                break;
            }
            if let Some(value) = pick(ov) {
                found = Some(value);
            }
        }
        found
    }

    fn any(&self, pick: impl Fn(&ResponsiveOverride) -> bool) -> bool {
        self.entries.iter().any(|(_, ov)| pick(ov))
    }
}

/// Feature flags that decide whether a feature's listeners are ever wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Controls,
    Nav,
    Autoplay,
    Touch,
    MouseDrag,
    ArrowKeys,
    EdgePadding,
    FixedWidth,
    Gutter,
}

/// Option names accepted by [`OptionResolver::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionName {
    Items,
    SlideBy,
    Gutter,
    EdgePadding,
    FixedWidth,
    Speed,
    Controls,
    Nav,
    ArrowKeys,
    Autoplay,
    AutoplayTimeout,
    AutoplayHoverPause,
    AutoplayResetOnVisibility,
    AutoHeight,
    Touch,
    MouseDrag,
}

/// A resolved option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Count(usize),
    Pixels(f64),
    OptionalPixels(Option<f64>),
    Millis(u64),
    Flag(bool),
}

/// The effective configuration for one breakpoint zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOptions {
    pub mode: Mode,
    pub axis: Axis,
    pub items: usize,
    pub slide_by: usize,
    pub gutter: f64,
    pub edge_padding: f64,
    pub fixed_width: Option<f64>,
    #[serde(with = "millis")]
    pub speed: Duration,
    pub looping: bool,
    pub rewind: bool,
    pub auto_height: bool,
    pub nested: Option<Nested>,
}

mod millis {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}

/// Resolves option values for a viewport width.
#[derive(Debug, Clone)]
pub struct OptionResolver {
    options: SliderOptions,
    breakpoints: Breakpoints,
    slide_count: usize,
}

impl OptionResolver {
    pub fn new(options: SliderOptions, slide_count: usize) -> Result<Self> {
        let options = options.normalized();
        let breakpoints = Breakpoints::from_options(&options)?;
        Ok(Self {
            options,
            breakpoints,
            slide_count,
        })
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    fn carousel(&self) -> bool {
        self.options.is_carousel()
    }

    pub fn zone(&self, viewport: f64) -> usize {
        self.breakpoints.zone(viewport)
    }

    /// `rewind` wins over `loop`. Galleries arrive here already looping,
    /// see [`SliderOptions::normalized`].
    pub fn looping(&self) -> bool {
        !self.options.rewind && self.options.looping
    }

    /// True if the base options or any breakpoint enable `feature`.
    pub fn has_feature(&self, feature: Feature) -> bool {
        let o = &self.options;
        let bp = &self.breakpoints;
        match feature {
            Feature::Controls => o.controls || bp.any(|ov| ov.controls == Some(true)),
            Feature::Nav => o.nav || bp.any(|ov| ov.nav == Some(true)),
            Feature::Autoplay => o.autoplay || bp.any(|ov| ov.autoplay == Some(true)),
            Feature::Touch => o.touch || bp.any(|ov| ov.touch == Some(true)),
            Feature::MouseDrag => {
                o.mouse_drag || bp.any(|ov| ov.mouse_drag == Some(true))
            }
            Feature::ArrowKeys => {
                o.arrow_keys || bp.any(|ov| ov.arrow_keys == Some(true))
            }
            Feature::EdgePadding => {
                is_positive(o.edge_padding)
                    || bp.any(|ov| is_positive(ov.edge_padding.flatten()))
            }
            Feature::FixedWidth => {
                is_positive(o.fixed_width)
                    || bp.any(|ov| is_positive(ov.fixed_width.flatten()))
            }
            Feature::Gutter => {
                o.gutter > 0.0 || bp.any(|ov| ov.gutter.is_some_and(|g| g > 0.0))
            }
        }
    }

    pub fn gutter(&self, viewport: f64) -> f64 {
        self.breakpoints
            .lookup(viewport, |ov| ov.gutter)
            .unwrap_or(self.options.gutter)
            .max(0.0)
    }

    pub fn fixed_width(&self, viewport: f64) -> Option<f64> {
        self.breakpoints
            .lookup(viewport, |ov| ov.fixed_width)
            .unwrap_or(self.options.fixed_width)
            .filter(|w| *w > 0.0)
    }

    /// Edge padding in px; 0 when disabled. Always 0 in gallery mode.
    pub fn edge_padding(&self, viewport: f64) -> f64 {
        if !self.carousel() {
            return 0.0;
        }
        self.breakpoints
            .lookup(viewport, |ov| ov.edge_padding)
            .unwrap_or(self.options.edge_padding)
            .filter(|p| *p > 0.0)
            .unwrap_or(0.0)
    }

    /// Visible slide count, clamped to `[1, slide_count]`.
    pub fn items(&self, viewport: f64) -> usize {
        let raw = match self.fixed_width(viewport) {
            Some(width) => {
                let stride = width + self.gutter(viewport);
                if stride > 0.0 && viewport.is_finite() && viewport > 0.0 {
                    (viewport / stride).floor() as usize
                } else {
                    1
                }
            }
            None => self
                .breakpoints
                .lookup(viewport, |ov| ov.items)
                .unwrap_or(self.options.items),
        };
        raw.clamp(1, self.slide_count.max(1))
    }

    pub fn slide_by(&self, viewport: f64) -> usize {
        let slide_by = if self.carousel() {
            self.breakpoints
                .lookup(viewport, |ov| ov.slide_by)
                .unwrap_or(self.options.slide_by)
        } else {
            SlideBy::Page
        };
        match slide_by {
            SlideBy::Page => self.items(viewport),
            SlideBy::Count(n) => n.max(1),
        }
    }

    pub fn speed(&self, viewport: f64) -> Duration {
        Duration::from_millis(
            self.breakpoints
                .lookup(viewport, |ov| ov.speed)
                .unwrap_or(self.options.speed),
        )
    }

    /// Forced on for galleries and for outer nested sliders.
    pub fn auto_height(&self, viewport: f64) -> bool {
        if !self.carousel() || self.options.nested == Some(Nested::Outer) {
            return true;
        }
        self.breakpoints
            .lookup(viewport, |ov| ov.auto_height)
            .unwrap_or(self.options.auto_height)
    }

    pub fn controls(&self, viewport: f64) -> bool {
        self.flag(viewport, |ov| ov.controls, self.options.controls)
    }

    pub fn controls_text(&self, viewport: f64) -> [String; 2] {
        self.breakpoints
            .lookup(viewport, |ov| ov.controls_text.clone())
            .unwrap_or_else(|| self.options.controls_text.clone())
    }

    pub fn nav(&self, viewport: f64) -> bool {
        self.flag(viewport, |ov| ov.nav, self.options.nav)
    }

    pub fn arrow_keys(&self, viewport: f64) -> bool {
        self.flag(viewport, |ov| ov.arrow_keys, self.options.arrow_keys)
    }

    pub fn touch(&self, viewport: f64) -> bool {
        self.flag(viewport, |ov| ov.touch, self.options.touch)
    }

    pub fn mouse_drag(&self, viewport: f64) -> bool {
        self.flag(viewport, |ov| ov.mouse_drag, self.options.mouse_drag)
    }

    pub fn autoplay(&self, viewport: f64) -> bool {
        self.flag(viewport, |ov| ov.autoplay, self.options.autoplay)
    }

    pub fn autoplay_timeout(&self, viewport: f64) -> Duration {
        Duration::from_millis(
            self.breakpoints
                .lookup(viewport, |ov| ov.autoplay_timeout)
                .unwrap_or(self.options.autoplay_timeout),
        )
    }

    pub fn autoplay_text(&self, viewport: f64) -> [String; 2] {
        self.breakpoints
            .lookup(viewport, |ov| ov.autoplay_text.clone())
            .unwrap_or_else(|| self.options.autoplay_text.clone())
    }

    pub fn autoplay_hover_pause(&self, viewport: f64) -> bool {
        self.flag(
            viewport,
            |ov| ov.autoplay_hover_pause,
            self.options.autoplay_hover_pause,
        )
    }

    pub fn autoplay_reset_on_visibility(&self, viewport: f64) -> bool {
        self.flag(
            viewport,
            |ov| ov.autoplay_reset_on_visibility,
            self.options.autoplay_reset_on_visibility,
        )
    }

    fn flag(
        &self,
        viewport: f64,
        pick: impl Fn(&ResponsiveOverride) -> Option<bool>,
        base: bool,
    ) -> bool {
        self.breakpoints.lookup(viewport, pick).unwrap_or(base)
    }

    /// Look an option up by name.
    pub fn get(&self, name: OptionName, viewport: f64) -> OptionValue {
        match name {
            OptionName::Items => OptionValue::Count(self.items(viewport)),
            OptionName::SlideBy => OptionValue::Count(self.slide_by(viewport)),
            OptionName::Gutter => OptionValue::Pixels(self.gutter(viewport)),
            OptionName::EdgePadding => {
                OptionValue::Pixels(self.edge_padding(viewport))
            }
            OptionName::FixedWidth => {
                OptionValue::OptionalPixels(self.fixed_width(viewport))
            }
            OptionName::Speed => {
                OptionValue::Millis(self.speed(viewport).as_millis() as u64)
            }
            OptionName::Controls => OptionValue::Flag(self.controls(viewport)),
            OptionName::Nav => OptionValue::Flag(self.nav(viewport)),
            OptionName::ArrowKeys => OptionValue::Flag(self.arrow_keys(viewport)),
            OptionName::Autoplay => OptionValue::Flag(self.autoplay(viewport)),
            OptionName::AutoplayTimeout => OptionValue::Millis(
                self.autoplay_timeout(viewport).as_millis() as u64,
            ),
            OptionName::AutoplayHoverPause => {
                OptionValue::Flag(self.autoplay_hover_pause(viewport))
            }
            OptionName::AutoplayResetOnVisibility => {
                OptionValue::Flag(self.autoplay_reset_on_visibility(viewport))
            }
            OptionName::AutoHeight => OptionValue::Flag(self.auto_height(viewport)),
            OptionName::Touch => OptionValue::Flag(self.touch(viewport)),
            OptionName::MouseDrag => OptionValue::Flag(self.mouse_drag(viewport)),
        }
    }

    /// Snapshot of the effective configuration at `viewport`.
    pub fn resolve(&self, viewport: f64) -> ResolvedOptions {
        ResolvedOptions {
            mode: self.options.mode,
            axis: self.options.axis,
            items: self.items(viewport),
            slide_by: self.slide_by(viewport),
            gutter: self.gutter(viewport),
            edge_padding: self.edge_padding(viewport),
            fixed_width: self.fixed_width(viewport),
            speed: self.speed(viewport),
            looping: self.looping(),
            rewind: self.options.rewind,
            auto_height: self.auto_height(viewport),
            nested: self.options.nested,
        }
    }
}

fn is_positive(value: Option<f64>) -> bool {
    value.is_some_and(|v| v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ResponsiveEntry;

    fn with_breakpoints(
        base: SliderOptions,
        entries: &[(&str, ResponsiveOverride)],
    ) -> SliderOptions {
        let mut opts = base;
        for (key, ov) in entries {
            opts.responsive
                .insert((*key).to_string(), ResponsiveEntry::Override(ov.clone()));
        }
        opts
    }

    #[test]
    fn highest_matching_breakpoint_wins() {
        let opts = with_breakpoints(
            SliderOptions {
                items: 1,
                ..SliderOptions::default()
            },
            &[
                ("600", ResponsiveOverride::items(2)),
                ("900", ResponsiveOverride::items(4)),
            ],
        );
        let resolver = OptionResolver::new(opts, 10).unwrap();

        assert_eq!(resolver.items(320.0), 1);
        assert_eq!(resolver.items(600.0), 2);
        assert_eq!(resolver.items(899.0), 2);
        assert_eq!(resolver.items(1200.0), 4);
    }

    #[test]
    fn breakpoints_without_the_option_fall_through() {
        let opts = with_breakpoints(
            SliderOptions {
                gutter: 5.0,
                ..SliderOptions::default()
            },
            &[
                (
                    "500",
                    ResponsiveOverride {
                        gutter: Some(10.0),
                        ..ResponsiveOverride::default()
                    },
                ),
                ("800", ResponsiveOverride::items(3)),
            ],
        );
        let resolver = OptionResolver::new(opts, 10).unwrap();
        assert_eq!(resolver.gutter(400.0), 5.0);
        assert_eq!(resolver.gutter(1000.0), 10.0);
    }

    #[test]
    fn items_are_clamped_to_slide_count() {
        let opts = SliderOptions {
            items: 12,
            ..SliderOptions::default()
        };
        let resolver = OptionResolver::new(opts, 4).unwrap();
        assert_eq!(resolver.items(1000.0), 4);

        let opts = SliderOptions {
            items: 0,
            ..SliderOptions::default()
        };
        let resolver = OptionResolver::new(opts, 4).unwrap();
        assert_eq!(resolver.items(1000.0), 1);
    }

    #[test]
    fn fixed_width_derives_items() {
        let opts = SliderOptions {
            fixed_width: Some(200.0),
            gutter: 10.0,
            items: 1,
            ..SliderOptions::default()
        };
        let resolver = OptionResolver::new(opts, 10).unwrap();
        assert_eq!(resolver.items(850.0), 4);
        assert_eq!(resolver.items(0.0), 1);
    }

    #[test]
    fn page_slide_by_follows_items() {
        let opts = with_breakpoints(
            SliderOptions {
                items: 2,
                slide_by: SlideBy::Page,
                ..SliderOptions::default()
            },
            &[("700", ResponsiveOverride::items(3))],
        );
        let resolver = OptionResolver::new(opts, 10).unwrap();
        assert_eq!(resolver.slide_by(300.0), 2);
        assert_eq!(resolver.slide_by(800.0), 3);
    }

    #[test]
    fn gallery_forces_paging_and_no_edge_padding() {
        let opts = SliderOptions {
            mode: Mode::Gallery,
            items: 2,
            slide_by: SlideBy::Count(1),
            edge_padding: Some(30.0),
            ..SliderOptions::default()
        };
        let resolver = OptionResolver::new(opts, 6).unwrap();
        assert_eq!(resolver.slide_by(500.0), 2);
        assert_eq!(resolver.edge_padding(500.0), 0.0);
        assert!(resolver.auto_height(500.0));
        assert!(resolver.looping());
    }

    #[test]
    fn feature_check_sees_any_breakpoint() {
        let opts = with_breakpoints(
            SliderOptions {
                autoplay: false,
                mouse_drag: false,
                ..SliderOptions::default()
            },
            &[(
                "1024",
                ResponsiveOverride {
                    autoplay: Some(true),
                    ..ResponsiveOverride::default()
                },
            )],
        );
        let resolver = OptionResolver::new(opts, 5).unwrap();
        assert!(resolver.has_feature(Feature::Autoplay));
        assert!(!resolver.autoplay(500.0));
        assert!(!resolver.has_feature(Feature::MouseDrag));
    }

    #[test]
    fn zone_counts_from_one_without_zero_breakpoint() {
        let opts = with_breakpoints(
            SliderOptions::default(),
            &[
                ("400", ResponsiveOverride::items(2)),
                ("800", ResponsiveOverride::items(3)),
            ],
        );
        let resolver = OptionResolver::new(opts, 5).unwrap();
        assert_eq!(resolver.zone(100.0), 0);
        assert_eq!(resolver.zone(400.0), 1);
        assert_eq!(resolver.zone(900.0), 2);

        let opts = with_breakpoints(
            SliderOptions::default(),
            &[
                ("0", ResponsiveOverride::items(1)),
                ("800", ResponsiveOverride::items(3)),
            ],
        );
        let resolver = OptionResolver::new(opts, 5).unwrap();
        assert_eq!(resolver.zone(100.0), 0);
        assert_eq!(resolver.zone(900.0), 1);
    }

    #[test]
    fn non_numeric_breakpoint_is_an_error() {
        let opts = with_breakpoints(
            SliderOptions::default(),
            &[("wide", ResponsiveOverride::items(2))],
        );
        let err = OptionResolver::new(opts, 5).unwrap_err();
        assert_eq!(err, SliderError::InvalidBreakpoint("wide".into()));
    }

    #[test]
    fn rewind_disables_loop() {
        let opts = SliderOptions {
            rewind: true,
            looping: true,
            ..SliderOptions::default()
        };
        let resolver = OptionResolver::new(opts, 5).unwrap();
        assert!(!resolver.looping());
        assert_eq!(
            resolver.get(OptionName::Items, 500.0),
            OptionValue::Count(1)
        );
    }
}
