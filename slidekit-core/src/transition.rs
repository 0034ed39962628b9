//! Transition bookkeeping and the manual interpolation fallback.
//!
//! Renderers with native CSS transitions animate the container themselves and
//! report completion through a `transitionend` event. Without that support
//! the carousel drives a [`Tween`] from [`crate::Carousel::tick`].

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::geometry::Length;

/// One animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub value: Length,
    pub finished: bool,
}

/// Linear time-based tween between two container offsets, matching the
/// fixed-step interpolation of the legacy fallback. The clock starts at the
/// first tick, like an animation frame callback.
#[derive(Debug, Clone)]
pub struct Tween {
    active: bool,
    from: f64,
    to: Length,
    started_at: Option<Instant>,
    duration: Duration,
}

impl Tween {
    pub fn new(from: f64, to: Length, duration: Duration) -> Self {
        Self {
            active: true,
            from,
            to,
            started_at: None,
            duration,
        }
    }

    /// Returns the frame for `now`, or `None` once finished.
    pub fn tick(&mut self, now: Instant) -> Option<Frame> {
        if !self.active {
            return None;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        if elapsed >= self.duration || self.duration.is_zero() {
            self.active = false;
            return Some(Frame {
                value: self.to,
                finished: true,
            });
        }
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        let value = self.from + (self.to.value() - self.from) * t;
        Some(Frame {
            value: self.to.with_value(value),
            finished: false,
        })
    }
}

/// How the current transition's completion will be observed.
#[derive(Debug, Clone)]
pub enum Driver {
    /// The host reports `transitionend`/`animationend`.
    Native,
    /// Driven by [`Tween`] frames on each tick.
    Manual(Tween),
    /// Completes on the next tick (gallery without animation events).
    Deferred,
}

/// Which completion events belong to the running transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionGate {
    /// The container's own transform/position property.
    Container,
    /// Any of these extended slide indexes (gallery cross-fade).
    Slides(Vec<usize>),
}

/// What a host-reported end event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "slide", rename_all = "camelCase")]
pub enum EndTarget {
    Container,
    Slide(usize),
    /// Bubbled from a descendant (nested slider, inner image).
    Other,
}

impl CompletionGate {
    pub fn accepts(&self, target: EndTarget) -> bool {
        match (self, target) {
            (CompletionGate::Container, EndTarget::Container) => true,
            (CompletionGate::Slides(slides), EndTarget::Slide(i)) => slides.contains(&i),
            _ => false,
        }
    }
}

/// A transition from the committed index to the current one.
#[derive(Debug, Clone)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub duration: Duration,
    pub driver: Driver,
    pub gate: CompletionGate,
}

impl Transition {
    /// Sign of the movement along the axis: 1 forward, -1 backward.
    pub fn direction(&self) -> i8 {
        match self.to.cmp(&self.from) {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
        }
    }
}
