//! The DOM-like collaborator a carousel drives.
//!
//! A host answers a handful of layout queries and receives every mutation as
//! a [`HostCommand`]. Browser bindings translate commands into DOM writes;
//! [`crate::HeadlessHost`] records them.

use std::fmt;
use std::ops::Range;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use serde::Serialize;

use crate::autoplay::ButtonAction;
use crate::geometry::{LayoutStyles, Length, StyleSheetPlan, WrapperStyle};
use crate::nav::Control;
use crate::options::{Axis, Mode};

/// Property the container offset is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionProperty {
    /// `transform: translateX(..)` / `translateY(..)`.
    Transform,
    /// Legacy positional `left` / `top`.
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerTransform {
    pub property: PositionProperty,
    pub axis: Axis,
    pub value: Length,
}

impl ContainerTransform {
    /// CSS property name the value is written to.
    pub fn css_property(&self) -> &'static str {
        match (self.property, self.axis) {
            (PositionProperty::Transform, _) => "transform",
            (PositionProperty::Position, Axis::Horizontal) => "left",
            (PositionProperty::Position, Axis::Vertical) => "top",
        }
    }
}

impl fmt::Display for ContainerTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.property, self.axis) {
            (PositionProperty::Transform, Axis::Horizontal) => {
                write!(f, "translateX({})", self.value)
            }
            (PositionProperty::Transform, Axis::Vertical) => {
                write!(f, "translateY({})", self.value)
            }
            (PositionProperty::Position, _) => write!(f, "{}", self.value),
        }
    }
}

/// Element whose transition duration is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "slide", rename_all = "camelCase")]
pub enum DurationTarget {
    Container,
    InnerWrapper,
    Slide(usize),
}

/// Groups of host listeners attached and detached together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListenerGroup {
    /// Window resize.
    Resize,
    /// Container `transitionend` (carousel) or slide `transitionend` +
    /// `animationend` (gallery).
    TransitionEnd,
    /// Prev/next click and keydown.
    Controls,
    /// Nav click and keydown.
    Nav,
    /// Document arrow keys.
    DocumentKeys,
    Touch,
    MouseDrag,
    /// Container mouseover/mouseout for autoplay.
    Hover,
    /// Document visibility changes for autoplay.
    Visibility,
    AutoplayButton,
}

/// A mutation requested from the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum HostCommand {
    /// Wrap the container in outer and inner wrappers.
    MountWrappers { mode: Mode, axis: Axis },
    /// Insert clones. Each entry names the real slide being cloned.
    InstallClones { before: Vec<usize>, after: Vec<usize> },
    /// Stylesheet with media rules.
    InstallStyles { plan: StyleSheetPlan },
    /// Inline styles for renderers without media queries.
    InlineStyles { styles: LayoutStyles },
    SetSlideMarginLeft { slide: usize, margin: Length },
    SetTransform { transform: ContainerTransform },
    SetDuration {
        target: DurationTarget,
        duration: Duration,
    },
    /// Gallery: position a slide and swap its animation class.
    AnimateSlide {
        slide: usize,
        left: Option<Length>,
        duration: Option<Duration>,
        delay: Option<Duration>,
        remove_class: String,
        add_class: String,
    },
    /// Gallery: clear position, duration and delay, then swap classes.
    ResetSlide {
        slide: usize,
        remove_class: String,
        add_class: String,
    },
    SetSlideHidden { slide: usize, hidden: bool },
    SetNavItemHidden { nav: usize, hidden: bool },
    SetNavCurrent { nav: usize, current: bool },
    FocusNavItem { nav: usize },
    SetNavShown { shown: bool },
    SetControlsShown { shown: bool },
    SetControlDisabled { control: Control, disabled: bool },
    SetControlsText { text: [String; 2] },
    SetAutoplayButton { action: ButtonAction, text: String },
    SetAutoplayButtonShown { shown: bool },
    /// Swap `data-src` into `src` for the lazy images of a slide.
    LoadLazyImages { slide: usize },
    SetInnerHeight { px: f64 },
    ClearInnerHeight,
    SetInnerWrapperStyle { style: WrapperStyle },
    SetClonesTransparent { transparent: bool },
    Listen { group: ListenerGroup, attach: bool },
    /// Undo every mutation: remove wrappers, clones, styles and attributes.
    Restore,
}

/// The DOM-like collaborator of a carousel.
pub trait SlideHost {
    /// False when the slide container element is missing.
    fn has_container(&self) -> bool {
        true
    }

    /// Number of real slides.
    fn slide_count(&self) -> usize;

    /// Width of the outer wrapper (the viewport width used for breakpoints).
    fn outer_width(&self) -> f64;

    /// Width of the inner wrapper, inside edge padding.
    fn inner_width(&self) -> f64;

    /// Top of each extended slide relative to the first one.
    fn slide_offset_tops(&self) -> Vec<f64>;

    /// Rendered height of an extended slide.
    fn slide_height(&self, slide: usize) -> f64;

    /// One future per image in `slides` that has not finished loading.
    fn pending_image_loads(&mut self, slides: Range<usize>) -> Vec<LocalBoxFuture<'static, ()>>;

    fn apply(&mut self, command: HostCommand);
}

/// Real slide each clone copies, for the clones placed before and after the
/// real slides.
pub fn clone_sources(slide_count: usize, clone_count: usize, carousel: bool) -> (Vec<usize>, Vec<usize>) {
    if slide_count == 0 {
        return (Vec::new(), Vec::new());
    }
    let after = (0..clone_count).map(|j| j % slide_count).collect();
    let before = if carousel {
        (0..clone_count)
            .rev()
            .map(|j| slide_count - 1 - j % slide_count)
            .collect()
    } else {
        Vec::new()
    };
    (before, after)
}
