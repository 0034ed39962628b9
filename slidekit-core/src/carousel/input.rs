//! Navigation inputs: `goTo`, controls, keyboard, nav and pointer gestures.

use tracing::{debug, trace};

use super::Carousel;
use crate::events::{EventKind, RawEvent};
use crate::gesture::{GestureSession, PointerKind, Propagation, horizontal_index_delta};
use crate::host::{HostCommand, SlideHost};
use crate::index::GoTarget;
use crate::nav::{Control, Key, NavKeyAction};
use crate::options::Axis;

impl<H: SlideHost> Carousel<H> {
    /// Move to a slide. Returns true when a transition started.
    ///
    /// Ignored while frozen. Absolute targets are also ignored while a
    /// transition is pending.
    pub fn go_to(&mut self, target: GoTarget) -> bool {
        self.go_to_with(target, RawEvent::None)
    }

    /// [`Carousel::go_to`] with a textual target (`"next"`, `"3"`, ...).
    /// Unparsable targets are ignored.
    pub fn go_to_str(&mut self, target: &str) -> bool {
        match target.parse::<GoTarget>() {
            Ok(target) => self.go_to(target),
            Err(err) => {
                debug!("ignoring goTo: {err}");
                false
            }
        }
    }

    fn go_to_with(&mut self, target: GoTarget, raw: RawEvent) -> bool {
        if self.state.frozen() {
            return false;
        }
        match target {
            GoTarget::Prev => self.step(-1, raw),
            GoTarget::Next => self.step(1, raw),
            _ => {
                if self.transition.is_some() {
                    return false;
                }
                let Some(dest) = self.state.resolve_target(target) else {
                    return false;
                };
                self.state.set(dest);
                if self.state.logically_moved() {
                    self.render(raw)
                } else {
                    false
                }
            }
        }
    }

    /// One `slide_by` step backward (`dir < 0`) or forward.
    pub(super) fn step(&mut self, dir: isize, raw: RawEvent) -> bool {
        if self.state.frozen() || self.transition.is_some() || self.is_dragging() {
            return false;
        }
        let slide_by = self.state.slide_by() as isize;
        let index = self.state.index();
        // looping sliders never stop at a bound; `move_by` wraps the target
        let looping = self.state.looping();
        if dir < 0 {
            if looping || index > self.state.index_min() {
                self.state.move_by(-slide_by);
                return self.render(raw);
            }
        } else if self.resolver.options().rewind && index == self.state.index_max() {
            return self.go_to_with(GoTarget::Index(0), raw);
        } else if looping || index < self.state.index_max() {
            self.state.move_by(slide_by);
            return self.render(raw);
        }
        false
    }

    pub fn click_control(&mut self, control: Control) -> bool {
        if !self.live.controls {
            return false;
        }
        match control {
            Control::Prev => self.step(-1, RawEvent::None),
            Control::Next => self.step(1, RawEvent::None),
        }
    }

    /// Keydown on the controls container. Disabled controls do nothing.
    pub fn on_controls_key(&mut self, key: Key) -> bool {
        if !self.live.controls {
            return false;
        }
        let raw = RawEvent::Key { key };
        match key {
            Key::Left | Key::Up | Key::PageUp if !self.controls.prev_disabled => self.step(-1, raw),
            Key::Right | Key::Down | Key::PageDown if !self.controls.next_disabled => {
                self.step(1, raw)
            }
            Key::Home => self.go_to_with(GoTarget::First, raw),
            Key::End => self.go_to_with(GoTarget::Last, raw),
            _ => false,
        }
    }

    /// Document-level arrow keys.
    pub fn on_document_key(&mut self, key: Key) -> bool {
        if !self.live.arrow_keys {
            return false;
        }
        let raw = RawEvent::Key { key };
        match key {
            Key::Left => self.step(-1, raw),
            Key::Right => self.step(1, raw),
            _ => false,
        }
    }

    pub fn nav_click(&mut self, nav: usize) -> bool {
        self.nav_activate(nav, RawEvent::None)
    }

    fn nav_activate(&mut self, nav: usize, raw: RawEvent) -> bool {
        if !self.live.nav || self.transition.is_some() || nav >= self.state.slide_count() {
            return false;
        }
        self.nav.set_clicked(nav);
        let moved = self.go_to_with(GoTarget::Index(nav as isize), raw);
        if !moved {
            self.nav.clear_clicked();
        }
        moved
    }

    /// Keydown on a focused nav item.
    pub fn on_nav_key(&mut self, focused: usize, key: Key) -> bool {
        if !self.live.nav {
            return false;
        }
        match self.nav.key_action(focused, key, self.state.slide_count()) {
            NavKeyAction::Focus(nav) => {
                self.host.apply(HostCommand::FocusNavItem { nav });
                true
            }
            NavKeyAction::Activate(nav) => self.nav_activate(nav, RawEvent::Key { key }),
            NavKeyAction::Ignore => false,
        }
    }

    fn pointer_enabled(&self, kind: PointerKind) -> bool {
        self.is_carousel()
            && match kind {
                PointerKind::Touch => self.live.touch,
                PointerKind::Mouse => self.live.mouse_drag,
            }
    }

    /// Touch start or mouse down. Ignored while a transition is pending.
    pub fn pointer_start(&mut self, kind: PointerKind, x: f64, y: f64) -> Propagation {
        if !self.pointer_enabled(kind) || self.transition.is_some() {
            return Propagation::Continue;
        }
        self.emit(EventKind::pointer_start(kind), RawEvent::Pointer { kind, x, y });
        self.gesture = Some(GestureSession::begin(kind, x, y, self.translate.value()));
        match kind {
            PointerKind::Touch => Propagation::Continue,
            PointerKind::Mouse => Propagation::Prevent,
        }
    }

    /// Moves along the slider axis drive a live preview. Other moves are
    /// left to native scrolling.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Propagation {
        let axis = self.axis;
        let Some(gesture) = self.gesture.as_mut() else {
            return Propagation::Continue;
        };
        let kind = gesture.kind;
        let passthrough = match kind {
            PointerKind::Touch => Propagation::Continue,
            PointerKind::Mouse => Propagation::Prevent,
        };
        if !gesture.update(x, y, axis) {
            return passthrough;
        }
        let (initial, dx, dy) = (gesture.translate_init, gesture.dx, gesture.dy);
        trace!(dx, dy, "drag preview");

        self.emit(EventKind::pointer_move(kind), RawEvent::Pointer { kind, x, y });
        let preview = self.geometry().drag_preview(
            initial,
            dx,
            dy,
            self.state.items(),
            self.vp_inner,
            self.live.fixed_width,
        );
        if self.caps.transform {
            self.set_durations(std::time::Duration::ZERO);
        }
        self.write_transform(preview);
        Propagation::Prevent
    }

    /// Touch end or mouse up: settle on a slide boundary.
    pub fn pointer_end(&mut self, x: f64, y: f64) -> Propagation {
        let Some(mut gesture) = self.gesture.take() else {
            return Propagation::Continue;
        };
        let kind = gesture.kind;
        if !gesture.committed {
            return Propagation::Continue;
        }
        let raw = RawEvent::Pointer { kind, x, y };
        self.emit(EventKind::pointer_end(kind), raw);

        let (dx, dy) = gesture.release(x, y);
        let moved = match self.axis {
            Axis::Horizontal => {
                let delta = horizontal_index_delta(dx, self.state.items(), self.vp_inner);
                self.state.move_by(delta)
            }
            Axis::Vertical => {
                let target = self.offset_tops.drag_target(
                    gesture.translate_init,
                    dy,
                    self.state.index_min(),
                    self.state.index_max(),
                );
                self.state.set(target)
            }
        };
        if !(moved && self.render(raw)) {
            self.snap_back();
        }

        match kind {
            PointerKind::Touch => Propagation::Continue,
            PointerKind::Mouse => {
                self.click_guard.arm();
                Propagation::Prevent
            }
        }
    }

    /// Abandon the gesture and restore the committed position.
    pub fn pointer_cancel(&mut self) {
        if self.gesture.take().is_some_and(|g| g.committed) {
            self.snap_back();
        }
    }

    /// A click on the container. The first click after a mouse drag that
    /// moved is swallowed.
    pub fn on_click(&mut self) -> Propagation {
        self.click_guard.on_click()
    }
}
