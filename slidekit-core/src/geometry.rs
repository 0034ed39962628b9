//! Layout and transform geometry.
//!
//! Pure functions of the layout inputs. Nothing here panics or errors: a
//! degenerate input (zero viewport, zero items) produces zero-sized values.

use std::fmt;

use serde::Serialize;

use crate::options::{Axis, Mode};

/// A CSS length. `Calc` keeps percentage arithmetic exact by deferring the
/// division to the renderer: `calc(<percent>% / <divisor>)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Length {
    Px(f64),
    Percent(f64),
    Calc { percent: f64, divisor: f64 },
}

impl Length {
    pub const ZERO_PX: Length = Length::Px(0.0);

    /// Numeric value in the length's own unit (`Calc` is evaluated).
    pub fn value(&self) -> f64 {
        match *self {
            Length::Px(v) | Length::Percent(v) => v,
            Length::Calc { percent, divisor } => safe_div(percent, divisor),
        }
    }

    pub fn is_px(&self) -> bool {
        matches!(self, Length::Px(_))
    }

    /// Same unit as `self`, different value. `Calc` collapses to a percentage.
    pub fn with_value(&self, value: f64) -> Length {
        match self {
            Length::Px(_) => Length::Px(value),
            Length::Percent(_) | Length::Calc { .. } => Length::Percent(value),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}px"),
            Length::Percent(v) => write!(f, "{v}%"),
            Length::Calc { percent, divisor } => {
                write!(f, "calc({percent}% / {divisor})")
            }
        }
    }
}

fn safe_div(a: f64, b: f64) -> f64 {
    if b == 0.0 || !b.is_finite() {
        0.0
    } else {
        a / b
    }
}

/// Four-sided box values in px.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Inner wrapper style reserving edge padding or absorbing the trailing
/// gutter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "edges", rename_all = "lowercase")]
pub enum WrapperStyle {
    #[default]
    Plain,
    Margin(Edges),
    Padding(Edges),
}

impl fmt::Display for WrapperStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prop, e) = match self {
            WrapperStyle::Plain => return Ok(()),
            WrapperStyle::Margin(e) => ("margin", e),
            WrapperStyle::Padding(e) => ("padding", e),
        };
        write!(
            f,
            "{prop}: {}px {}px {}px {}px;",
            e.top, e.right, e.bottom, e.left
        )
    }
}

/// Slide gutter: right padding when horizontal, bottom margin when vertical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GutterStyle {
    pub axis: Axis,
    pub px: f64,
}

impl fmt::Display for GutterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.axis {
            Axis::Horizontal => write!(f, "padding-right: {}px;", self.px),
            Axis::Vertical => write!(f, "margin-bottom: {}px;", self.px),
        }
    }
}

/// Styles for one breakpoint zone. `None` leaves a property untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStyles {
    pub inner_wrapper: Option<WrapperStyle>,
    pub container_width: Option<Length>,
    pub slide_width: Option<Length>,
    pub slide_gutter: Option<GutterStyle>,
}

impl LayoutStyles {
    pub fn is_empty(&self) -> bool {
        self.inner_wrapper.is_none()
            && self.container_width.is_none()
            && self.slide_width.is_none()
            && self.slide_gutter.is_none()
    }
}

/// A `min-width` media rule; the threshold is emitted in `em` (px / 16).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRule {
    pub min_width_em: f64,
    pub styles: LayoutStyles,
}

/// Base styles plus one media rule per breakpoint that changes layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StyleSheetPlan {
    pub base: LayoutStyles,
    pub media: Vec<MediaRule>,
}

/// Inputs every geometry function reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub mode: Mode,
    pub axis: Axis,
    /// Outer viewport width in px.
    pub viewport: f64,
    pub slide_count: usize,
    pub slide_count_new: usize,
    /// Use `calc()` for percentages.
    pub calc: bool,
    /// Translate with transforms (true) or positional `left`/`top` (false).
    pub transform: bool,
}

impl Geometry {
    fn carousel(&self) -> bool {
        self.mode == Mode::Carousel
    }

    fn horizontal(&self) -> bool {
        self.axis == Axis::Horizontal
    }

    fn percent(&self, percent: f64, divisor: f64) -> Length {
        if self.calc {
            Length::Calc { percent, divisor }
        } else {
            Length::Percent(safe_div(percent, divisor))
        }
    }

    /// Inner wrapper margin/padding.
    pub fn inner_wrapper(
        &self,
        edge_padding: f64,
        gutter: f64,
        fixed_width: Option<f64>,
    ) -> WrapperStyle {
        if edge_padding > 0.0 {
            if let Some(width) = fixed_width {
                let stride = width + gutter;
                let rest = if stride > 0.0 {
                    self.viewport % stride
                } else {
                    0.0
                };
                let side = (rest + gutter) / 2.0;
                return WrapperStyle::Margin(Edges {
                    top: 0.0,
                    right: side,
                    bottom: 0.0,
                    left: side,
                });
            }
            let gap = edge_padding + gutter;
            return if self.horizontal() {
                WrapperStyle::Margin(Edges {
                    top: 0.0,
                    right: edge_padding,
                    bottom: 0.0,
                    left: gap,
                })
            } else {
                WrapperStyle::Padding(Edges {
                    top: gap,
                    right: 0.0,
                    bottom: edge_padding,
                    left: 0.0,
                })
            };
        }
        if gutter > 0.0 && fixed_width.is_none() {
            let mut edges = Edges::default();
            if self.horizontal() {
                edges.right = -gutter;
            } else {
                edges.bottom = -gutter;
            }
            return WrapperStyle::Margin(edges);
        }
        WrapperStyle::Plain
    }

    /// Total track width. Carousel + horizontal only.
    pub fn container_width(
        &self,
        fixed_width: Option<f64>,
        gutter: f64,
        items: usize,
    ) -> Option<Length> {
        if !(self.carousel() && self.horizontal()) {
            return None;
        }
        let scn = self.slide_count_new as f64;
        Some(match fixed_width {
            Some(width) => Length::Px((width + gutter) * scn),
            None => {
                let items = items.min(self.slide_count).max(1) as f64;
                self.percent(scn * 100.0, items)
            }
        })
    }

    /// Width of one slide. Horizontal only.
    pub fn slide_width(
        &self,
        fixed_width: Option<f64>,
        gutter: f64,
        items: usize,
    ) -> Option<Length> {
        if !self.horizontal() {
            return None;
        }
        Some(match fixed_width {
            Some(width) => Length::Px(width + gutter),
            None => {
                let dividend = if self.carousel() {
                    self.slide_count_new
                } else {
                    items.min(self.slide_count)
                };
                self.percent(100.0, dividend as f64)
            }
        })
    }

    pub fn slide_gutter(&self, gutter: f64) -> GutterStyle {
        GutterStyle {
            axis: self.axis,
            px: gutter,
        }
    }

    /// Per-slide left margin when the renderer lacks subpixel layout.
    pub fn slide_margin_left(&self, slide: usize) -> Length {
        self.percent(slide as f64 * 100.0, self.slide_count_new as f64)
    }

    /// Container offset that brings `index` to the leading edge.
    pub fn transform_offset(
        &self,
        index: usize,
        items: usize,
        fixed_width: Option<f64>,
        gutter: f64,
        offset_tops: &[f64],
    ) -> Length {
        if !self.horizontal() {
            return Length::Px(-offset_tops.get(index).copied().unwrap_or(0.0));
        }
        match fixed_width {
            Some(width) => Length::Px(-(width + gutter) * index as f64),
            None => {
                let denominator = if self.transform {
                    self.slide_count_new
                } else {
                    items
                };
                Length::Percent(-safe_div(index as f64 * 100.0, denominator as f64))
            }
        }
    }

    /// Clamp a fixed-width offset so the track never scrolls past its last
    /// slide into empty space.
    pub fn deadzone_clamp(
        &self,
        offset: Length,
        inner_width: f64,
        fixed_width: f64,
        gutter: f64,
    ) -> Length {
        match offset {
            Length::Px(value) => {
                let content = (fixed_width + gutter) * self.slide_count_new as f64;
                let edge = -(content - inner_width).max(0.0);
                Length::Px(value.max(edge))
            }
            other => other,
        }
    }

    /// Live drag preview offset from the value captured at gesture start.
    pub fn drag_preview(
        &self,
        initial: f64,
        dx: f64,
        dy: f64,
        items: usize,
        inner_width: f64,
        fixed_width: Option<f64>,
    ) -> Length {
        if !self.horizontal() {
            return Length::Px(initial + dy);
        }
        if fixed_width.is_some() {
            return Length::Px(initial + dx);
        }
        let delta = if self.transform {
            safe_div(
                dx * items as f64 * 100.0,
                inner_width * self.slide_count_new as f64,
            )
        } else {
            safe_div(dx * 100.0, inner_width)
        };
        Length::Percent(initial + delta)
    }
}

/// Vertical offsets of each extended slide relative to the first, plus the
/// bottom edge of the last one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OffsetTops {
    tops: Vec<f64>,
    extent: f64,
}

impl OffsetTops {
    pub fn new(tops: Vec<f64>, last_height: f64) -> Self {
        let extent = tops.last().copied().unwrap_or(0.0) + last_height.max(0.0);
        Self { tops, extent }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.tops
    }

    pub fn len(&self) -> usize {
        self.tops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tops.is_empty()
    }

    pub fn get(&self, slide: usize) -> Option<f64> {
        self.tops.get(slide).copied()
    }

    /// Top of `slide`, or the bottom extent past the end.
    fn edge(&self, slide: usize) -> f64 {
        self.tops.get(slide).copied().unwrap_or(self.extent)
    }

    /// Height of the window showing `items` slides starting at `index`.
    pub fn window_height(&self, index: usize, items: usize) -> f64 {
        (self.edge(index + items) - self.edge(index)).max(0.0)
    }

    /// Slide boundary nearest to a vertical drag release.
    pub fn drag_target(
        &self,
        initial: f64,
        dy: f64,
        index_min: usize,
        index_max: usize,
    ) -> usize {
        let moved = -(initial + dy);
        let last = self.tops.last().copied().unwrap_or(0.0);
        if moved <= 0.0 {
            return index_min;
        }
        if moved >= last {
            return index_max;
        }
        let mut i = 0;
        let mut index;
        loop {
            i += 1;
            index = if dy < 0.0 { i + 1 } else { i };
            let next = match self.tops.get(i + 1) {
                Some(top) => *top,
                None => break,
            };
            if i >= self.tops.len() || moved < next {
                break;
            }
        }
        index.clamp(index_min, index_max)
    }
}
