//! Autoplay timer.
//!
//! The timer is a deadline checked from [`crate::Carousel::tick`]. Starting
//! an already-running timer keeps its deadline.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::options::AutoplayDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AutoplayPhase {
    #[default]
    Stopped,
    Running,
    /// Timer suspended while the page is hidden.
    Paused,
}

/// Label pair shown on the start/stop button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonAction {
    Start,
    Stop,
}

impl ButtonAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonAction::Start => "start",
            ButtonAction::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Autoplay {
    phase: AutoplayPhase,
    timeout: Duration,
    direction: AutoplayDirection,
    next_fire: Option<Instant>,
    hover_stopped: bool,
    hidden: bool,
}

impl Autoplay {
    pub fn new(timeout: Duration, direction: AutoplayDirection) -> Self {
        Self {
            phase: AutoplayPhase::Stopped,
            timeout,
            direction,
            next_fire: None,
            hover_stopped: false,
            hidden: false,
        }
    }

    pub fn phase(&self) -> AutoplayPhase {
        self.phase
    }

    /// Running or paused; the button shows "stop" in both.
    pub fn is_animating(&self) -> bool {
        self.phase != AutoplayPhase::Stopped
    }

    pub fn next_fire(&self) -> Option<Instant> {
        self.next_fire
    }

    pub fn step(&self) -> isize {
        self.direction.step()
    }

    pub fn button_action(&self) -> ButtonAction {
        if self.is_animating() {
            ButtonAction::Stop
        } else {
            ButtonAction::Start
        }
    }

    /// Takes effect from the next scheduled interval.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn arm(&mut self, now: Instant) {
        if self.phase == AutoplayPhase::Running && self.next_fire.is_some() {
            return;
        }
        self.next_fire = Some(now + self.timeout);
    }

    /// Returns true when the button label changes.
    pub fn start(&mut self, now: Instant) -> bool {
        self.arm(now);
        let was = self.is_animating();
        self.phase = AutoplayPhase::Running;
        !was
    }

    pub fn stop(&mut self) -> bool {
        self.next_fire = None;
        let was = self.is_animating();
        self.phase = AutoplayPhase::Stopped;
        was
    }

    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_animating() {
            self.stop()
        } else {
            self.start(now)
        }
    }

    pub fn hover_enter(&mut self) -> bool {
        if self.is_animating() {
            self.hover_stopped = true;
            return self.stop();
        }
        false
    }

    pub fn hover_leave(&mut self, now: Instant) -> bool {
        if !self.is_animating() && self.hover_stopped {
            self.hover_stopped = false;
            return self.start(now);
        }
        false
    }

    /// Page visibility changed. Only a real change while animating matters.
    pub fn visibility(&mut self, hidden: bool, now: Instant) {
        if hidden != self.hidden && self.is_animating() {
            if hidden {
                self.phase = AutoplayPhase::Paused;
                self.next_fire = None;
            } else {
                self.arm(now);
                self.phase = AutoplayPhase::Running;
            }
        }
        self.hidden = hidden;
    }

    /// True when the interval elapsed. Missed intervals are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_fire {
            Some(deadline) if self.phase == AutoplayPhase::Running && now >= deadline => {
                let mut next = deadline + self.timeout;
                if next <= now {
                    next = now + self.timeout;
                }
                self.next_fire = Some(next);
                true
            }
            _ => false,
        }
    }
}
