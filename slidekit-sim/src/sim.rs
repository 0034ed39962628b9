//! A headless slider with a simulated renderer clock.
//!
//! The simulator plays the host's part: it feeds animation frames through
//! [`Carousel::tick`] and reports the end of a native transition once the
//! configured speed has elapsed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::bail;
use serde::Serialize;
use slidekit_config::SliderConfig;
use slidekit_core::{Carousel, EndTarget, HeadlessHost, SliderHandle, SliderInfo};
use tracing::{debug, info};

use crate::script::Step;

/// One frame at 60 Hz.
pub const FRAME: Duration = Duration::from_millis(16);

/// A step and the slider state after it.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub step: String,
    pub moved: bool,
    pub info: &'a SliderInfo,
}

#[derive(Debug)]
pub struct Simulator {
    carousel: Carousel<HeadlessHost>,
    now: Instant,
    end_at: Option<Instant>,
}

impl Simulator {
    /// Mount the configured slider. Inert setups are an error here.
    pub fn mount(config: &SliderConfig, now: Instant) -> anyhow::Result<Self> {
        let caps = Arc::new(config.stage.profile.capabilities());
        match SliderHandle::mount(config.stage.host(), config.slider.clone(), caps, now) {
            SliderHandle::Active(carousel) => {
                info!(
                    slides = config.stage.slides,
                    width = config.stage.width,
                    "slider mounted"
                );
                Ok(Self {
                    carousel: *carousel,
                    now,
                    end_at: None,
                })
            }
            SliderHandle::Inert { reason, .. } => bail!("slider is inert: {reason}"),
        }
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel<HeadlessHost> {
        &mut self.carousel
    }

    pub fn info(&self) -> SliderInfo {
        self.carousel.info()
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Apply one script step. Returns true when it started a transition.
    pub fn run(&mut self, step: &Step) -> bool {
        let now = self.now;
        let c = &mut self.carousel;
        let moved = match step {
            Step::Go(target) => c.go_to(*target),
            Step::Key(key) => c.on_document_key(*key),
            Step::Control(control) => c.click_control(*control),
            Step::ControlsKey(key) => c.on_controls_key(*key),
            Step::Nav(nav) => c.nav_click(*nav),
            Step::Drag { kind, from, to } => {
                let y = 10.0;
                c.pointer_start(*kind, *from, y);
                c.pointer_move(*to, y);
                c.pointer_end(*to, y);
                c.is_pending()
            }
            Step::Click => {
                c.on_click();
                false
            }
            Step::Wait(duration) => {
                self.advance(*duration);
                false
            }
            Step::End => {
                self.deliver_end();
                false
            }
            Step::Resize(width) => {
                c.host_mut().set_outer_width(*width);
                c.on_resize(now);
                false
            }
            Step::Play => c.play(now),
            Step::Pause => c.pause(),
            Step::Hover(entered) => c.on_hover(*entered, now),
            Step::Hidden(hidden) => c.on_visibility(*hidden, now),
            Step::Info => false,
        };
        self.arm_end();
        moved
    }

    /// Advance the clock frame by frame.
    pub fn advance(&mut self, by: Duration) {
        let target = self.now + by;
        while self.now < target {
            let next = (self.now + FRAME).min(target);
            self.tick_to(next);
        }
    }

    /// One renderer frame at `now`.
    pub fn tick_to(&mut self, now: Instant) {
        self.now = now;
        self.carousel.tick(now);
        if self.end_at.is_some_and(|at| now >= at) {
            self.deliver_end();
        }
        self.arm_end();
    }

    /// Report the end of the running transition the way a renderer would:
    /// on the container for carousels, on the entering slide for galleries.
    fn deliver_end(&mut self) {
        self.end_at = None;
        if !self.carousel.is_pending() {
            return;
        }
        let index = self.carousel.index();
        let delivered = self.carousel.on_transition_end(EndTarget::Container)
            || self.carousel.on_transition_end(EndTarget::Slide(index));
        debug!(delivered, index, "transition end reported");
    }

    fn arm_end(&mut self) {
        if !self.carousel.is_pending() {
            self.end_at = None;
        } else if self.end_at.is_none() {
            self.end_at = Some(self.now + self.carousel.resolved().speed);
        }
    }
}
