//! Host capability descriptor.
//!
//! Probing is the host's job. The result is computed once, wrapped in an
//! `Arc` and handed to every carousel the host mounts, so no carousel ever
//! re-detects anything or reads hidden global state.

use serde::{Deserialize, Serialize};

/// What the rendering surface can do natively.
///
/// Every `false` routes the state machine through a fallback: positional
/// styling instead of transforms, manual interpolation instead of native
/// transitions, a zero-delay completion instead of end events, plain
/// percentages instead of `calc()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub transform: bool,
    pub transition_duration: bool,
    pub transition_delay: bool,
    pub transition_end: bool,
    pub animation_duration: bool,
    pub animation_delay: bool,
    pub animation_end: bool,
    pub calc: bool,
    pub subpixel: bool,
    pub css_media_queries: bool,
}

impl Capabilities {
    /// Everything supported.
    pub const fn modern() -> Self {
        Self {
            transform: true,
            transition_duration: true,
            transition_delay: true,
            transition_end: true,
            animation_duration: true,
            animation_delay: true,
            animation_end: true,
            calc: true,
            subpixel: true,
            css_media_queries: true,
        }
    }

    /// Nothing supported; every fallback path is taken.
    pub const fn legacy() -> Self {
        Self {
            transform: false,
            transition_duration: false,
            transition_delay: false,
            transition_end: false,
            animation_duration: false,
            animation_delay: false,
            animation_end: false,
            calc: false,
            subpixel: false,
            css_media_queries: false,
        }
    }

    /// Gallery cross-fades can only be observed when both end events fire.
    pub fn gallery_events(&self) -> bool {
        self.transition_end && self.animation_end
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::modern()
    }
}
