//! Autoplay controls.

use std::time::Instant;

use tracing::{debug, trace};

use super::Carousel;
use crate::autoplay::{AutoplayPhase, ButtonAction};
use crate::events::RawEvent;
use crate::host::{HostCommand, SlideHost};

impl<H: SlideHost> Carousel<H> {
    pub fn autoplay_phase(&self) -> AutoplayPhase {
        self.autoplay.phase()
    }

    /// Start the autoplay timer. A running timer keeps its schedule.
    pub fn play(&mut self, now: Instant) -> bool {
        if !self.live.autoplay {
            return false;
        }
        self.start_autoplay(now)
    }

    pub fn pause(&mut self) -> bool {
        self.stop_autoplay()
    }

    /// The start/stop button was pressed.
    pub fn toggle_autoplay(&mut self, now: Instant) -> bool {
        if !self.live.autoplay {
            return false;
        }
        if self.autoplay.is_animating() {
            self.stop_autoplay()
        } else {
            self.start_autoplay(now)
        }
    }

    pub(super) fn start_autoplay(&mut self, now: Instant) -> bool {
        let changed = self.autoplay.start(now);
        self.sync_autoplay_button();
        if changed {
            debug!("autoplay started");
        }
        changed
    }

    pub(super) fn stop_autoplay(&mut self) -> bool {
        let changed = self.autoplay.stop();
        self.sync_autoplay_button();
        if changed {
            debug!("autoplay stopped");
        }
        changed
    }

    /// Pointer entered (`true`) or left the container.
    pub fn on_hover(&mut self, entered: bool, now: Instant) -> bool {
        if !self.live.autoplay_hover_pause {
            return false;
        }
        let changed = if entered {
            self.autoplay.hover_enter()
        } else {
            self.autoplay.hover_leave(now)
        };
        if changed {
            self.sync_autoplay_button();
        }
        changed
    }

    /// Page visibility changed.
    pub fn on_visibility(&mut self, hidden: bool, now: Instant) -> bool {
        if !self.live.autoplay_reset_on_visibility {
            return false;
        }
        let before = self.autoplay.phase();
        self.autoplay.visibility(hidden, now);
        before != self.autoplay.phase()
    }

    pub(super) fn sync_autoplay_button(&mut self) {
        if !self.autoplay_button {
            return;
        }
        let action = self.autoplay.button_action();
        let text = match action {
            ButtonAction::Start => self.live.autoplay_text[0].clone(),
            ButtonAction::Stop => self.live.autoplay_text[1].clone(),
        };
        self.host.apply(HostCommand::SetAutoplayButton { action, text });
    }

    pub(super) fn autoplay_fire(&mut self, now: Instant) {
        if self.autoplay.poll(now) {
            let step = self.autoplay.step();
            let moved = self.step(step, RawEvent::None);
            trace!(step, moved, "autoplay tick");
        }
    }
}
