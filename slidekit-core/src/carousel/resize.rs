//! Clock-driven work and breakpoint re-layout.

use std::time::{Duration, Instant};

use tracing::debug;

use super::{Carousel, Live, RESIZE_DEBOUNCE};
use crate::events::{EventKind, RawEvent};
use crate::geometry::{Edges, WrapperStyle};
use crate::host::{HostCommand, ListenerGroup, SlideHost};
use crate::options::Nested;
use crate::transition::Driver;

impl<H: SlideHost> Carousel<H> {
    /// Advance time: animation frames, deferred completions, the resize
    /// debounce and the autoplay interval.
    pub fn tick(&mut self, now: Instant) {
        self.tick_transition(now);

        let resize_due = self.resize_deadline.is_some_and(|deadline| now >= deadline);
        if resize_due {
            self.resize_deadline = None;
            let width = self.host.outer_width();
            if width != self.vp_outer {
                self.resize_tasks(now);
                if self.resolver.options().nested == Some(Nested::Outer) {
                    self.emit(EventKind::OuterResized, RawEvent::Resize { width });
                }
            }
        }

        self.autoplay_fire(now);
    }

    fn tick_transition(&mut self, now: Instant) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        let frame = match &mut transition.driver {
            Driver::Native => return,
            Driver::Deferred => None,
            Driver::Manual(tween) => match tween.tick(now) {
                Some(frame) => Some(frame),
                None => return,
            },
        };
        match frame {
            Some(frame) => {
                self.write_transform(frame.value);
                if frame.finished {
                    self.complete_transition(RawEvent::None);
                }
            }
            None => self.complete_transition(RawEvent::None),
        }
    }

    /// Window resized. Handled once resizing has been quiet for
    /// [`RESIZE_DEBOUNCE`].
    pub fn on_resize(&mut self, now: Instant) {
        if self.listeners.contains(&ListenerGroup::Resize) {
            self.resize_deadline = Some(now + RESIZE_DEBOUNCE);
        }
    }

    /// Time left before a debounced resize runs.
    pub fn resize_pending(&self, now: Instant) -> Option<Duration> {
        self.resize_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// The outer slider of a nested pair resized.
    pub fn on_outer_resized(&mut self, now: Instant) -> bool {
        if self.resolver.options().nested != Some(Nested::Inner) {
            return false;
        }
        self.resize_tasks(now);
        self.emit(EventKind::InnerLoaded, RawEvent::None);
        true
    }

    /// An inner slider finished loading; outer sliders re-measure.
    pub fn on_inner_loaded(&mut self) -> bool {
        if self.resolver.options().nested != Some(Nested::Outer) {
            return false;
        }
        self.run_auto_height();
        true
    }

    pub(super) fn resize_tasks(&mut self, now: Instant) {
        // a re-layout invalidates the running animation
        if self.transition.is_some() {
            self.complete_transition(RawEvent::None);
        }

        let zone_before = self.zone;
        let index_before = self.state.index();
        let items_before = self.state.items();
        let frozen_before = self.state.frozen();
        let live_before = self.live.clone();

        self.vp_outer = self.host.outer_width();
        self.vp_inner = self.host.inner_width();
        self.zone = self.resolver.zone(self.vp_outer);
        let raw = RawEvent::Resize {
            width: self.vp_outer,
        };

        if zone_before != self.zone || live_before.fixed_width.is_some() {
            let vp = self.vp_outer;
            self.state.set_items(self.resolver.items(vp));
            self.state.set_slide_by(self.resolver.slide_by(vp));
            let frozen = self.state.frozen();
            self.live = Live::resolve(&self.resolver, vp, frozen);
            self.refresh_trim();
            let items = self.state.items();

            if items != items_before {
                self.state.check_index();
            }
            if frozen && !frozen_before {
                self.state.reset();
            }

            if self.live.fixed_width != live_before.fixed_width {
                let offset = self.container_offset();
                self.write_transform(offset);
            }
            if live_before.auto_height && !self.live.auto_height {
                self.inner_height = None;
                self.host.apply(HostCommand::ClearInnerHeight);
            }

            self.refresh_listeners(&live_before, now);

            if !self.caps.css_media_queries {
                let styles = self.layout_styles();
                if let Some(style) = styles.inner_wrapper {
                    self.inner_wrapper = Some(style);
                }
                self.host.apply(HostCommand::InlineStyles { styles });
                if self.live.fixed_width.is_none() && self.state.index() == index_before {
                    let offset = self.container_offset();
                    self.write_transform(offset);
                }
            }

            if self.state.index() != index_before {
                self.emit(EventKind::IndexChanged, raw);
                if self.caps.transition_duration {
                    self.set_durations(Duration::ZERO);
                }
                let offset = self.container_offset();
                self.write_transform(offset);
                self.state.sync_cached();
            }

            if items != items_before {
                self.lazy_load();
                self.update_slide_status();
                self.update_controls_status();
                self.update_nav_visibility();
                self.update_nav_status();
            }
            debug!(
                zone = self.zone,
                items,
                frozen,
                index = self.state.index(),
                "layout updated for viewport"
            );
        }

        if !self.is_horizontal() {
            self.measure_offset_tops();
            self.update_content_height();
            let offset = self.container_offset();
            self.write_transform(offset);
        }

        self.check_fixed_width_slide_count();
        self.run_auto_height();
    }

    /// Show, hide, attach and detach whatever the new zone toggles.
    fn refresh_listeners(&mut self, before: &Live, now: Instant) {
        let live = self.live.clone();

        if live.arrow_keys != before.arrow_keys {
            self.listen(ListenerGroup::DocumentKeys, live.arrow_keys);
        }

        if self.features.controls {
            if live.controls != before.controls {
                self.host.apply(HostCommand::SetControlsShown {
                    shown: live.controls,
                });
            }
            if live.controls_text != before.controls_text
                && !self.resolver.options().controls_container
            {
                self.host.apply(HostCommand::SetControlsText {
                    text: live.controls_text.clone(),
                });
            }
        }

        if self.features.nav && live.nav != before.nav {
            self.host.apply(HostCommand::SetNavShown { shown: live.nav });
            if live.nav {
                self.update_nav_visibility();
            }
        }

        if self.is_carousel() {
            if self.features.touch && live.touch != before.touch {
                self.listen(ListenerGroup::Touch, live.touch);
            }
            if self.features.mouse_drag && live.mouse_drag != before.mouse_drag {
                self.listen(ListenerGroup::MouseDrag, live.mouse_drag);
            }
        }

        if self.features.autoplay {
            self.autoplay.set_timeout(live.autoplay_timeout);
            if live.autoplay != before.autoplay {
                if self.autoplay_button {
                    self.host.apply(HostCommand::SetAutoplayButtonShown {
                        shown: live.autoplay,
                    });
                }
                if live.autoplay {
                    if !self.autoplay.is_animating() {
                        self.start_autoplay(now);
                    }
                } else if self.autoplay.is_animating() {
                    self.stop_autoplay();
                }
            }
            if live.autoplay_hover_pause != before.autoplay_hover_pause {
                self.listen(ListenerGroup::Hover, live.autoplay_hover_pause);
            }
            if live.autoplay_reset_on_visibility != before.autoplay_reset_on_visibility {
                self.listen(
                    ListenerGroup::Visibility,
                    live.autoplay_reset_on_visibility,
                );
            }
            if live.autoplay_text != before.autoplay_text {
                self.sync_autoplay_button();
            }
        }
    }

    /// Frozen fixed-width sliders hide their clones and drop the edge
    /// margin; unfreezing restores both.
    pub(super) fn check_fixed_width_slide_count(&mut self) {
        let Some(width) = self.live.fixed_width else {
            return;
        };
        if self.state.clone_count() == 0 {
            return;
        }
        let gutter = self.live.gutter;
        let edge_padding = self.live.edge_padding;
        let flat = WrapperStyle::Margin(Edges::default());

        if self.state.frozen() {
            if !self.clones_transparent {
                if edge_padding > 0.0 {
                    self.set_inner_wrapper(flat);
                }
                self.clones_transparent = true;
                self.host
                    .apply(HostCommand::SetClonesTransparent { transparent: true });
            }
        } else {
            if edge_padding > 0.0 {
                let style = if self.vp_outer <= width + gutter {
                    flat
                } else {
                    self.geometry()
                        .inner_wrapper(edge_padding, gutter, Some(width))
                };
                self.set_inner_wrapper(style);
            }
            if self.clones_transparent {
                self.clones_transparent = false;
                self.host
                    .apply(HostCommand::SetClonesTransparent { transparent: false });
            }
        }
    }

    fn set_inner_wrapper(&mut self, style: WrapperStyle) {
        if self.inner_wrapper != Some(style) {
            self.inner_wrapper = Some(style);
            self.host.apply(HostCommand::SetInnerWrapperStyle { style });
        }
    }
}
