#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use slidekit_core::{
    Capabilities, Carousel, EndTarget, EventKind, HeadlessHost, HostCommand, SliderInfo,
    SliderOptions,
};

/// Monotonic test clock.
pub struct Clock {
    now: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            now: Instant::now(),
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn advance(&mut self, ms: u64) -> Instant {
        self.now += Duration::from_millis(ms);
        self.now
    }
}

pub fn mount(host: HeadlessHost, options: SliderOptions) -> Carousel<HeadlessHost> {
    mount_with(host, options, Capabilities::modern())
}

pub fn mount_with(
    host: HeadlessHost,
    options: SliderOptions,
    caps: Capabilities,
) -> Carousel<HeadlessHost> {
    mount_at(host, options, caps, Instant::now())
}

pub fn mount_at(
    host: HeadlessHost,
    options: SliderOptions,
    caps: Capabilities,
    now: Instant,
) -> Carousel<HeadlessHost> {
    Carousel::try_new(host, options, Arc::new(caps), now).expect("valid slider setup")
}

pub fn options(items: usize, looping: bool) -> SliderOptions {
    SliderOptions {
        items,
        looping,
        ..SliderOptions::default()
    }
}

/// Deliver the end event the running transition waits for.
pub fn settle(carousel: &mut Carousel<HeadlessHost>) {
    if !carousel.is_pending() {
        return;
    }
    let index = carousel.index();
    if !carousel.on_transition_end(EndTarget::Container) {
        carousel.on_transition_end(EndTarget::Slide(index));
    }
}

/// Record the snapshots of every `kind` event.
pub fn record(
    carousel: &mut Carousel<HeadlessHost>,
    kind: EventKind,
) -> Rc<RefCell<Vec<SliderInfo>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    carousel.subscribe(kind, move |event| sink.borrow_mut().push(event.info.clone()));
    seen
}

pub fn transforms(host: &HeadlessHost) -> usize {
    host.count(|c| matches!(c, HostCommand::SetTransform { .. }))
}
