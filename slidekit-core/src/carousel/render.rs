//! Rendering and the completion protocol.

use std::time::Duration;

use futures::future::{LocalBoxFuture, join_all};
use tracing::{debug, trace, warn};

use super::Carousel;
use crate::events::{EventKind, RawEvent};
use crate::geometry::{LayoutStyles, Length, MediaRule, StyleSheetPlan};
use crate::host::{ContainerTransform, DurationTarget, HostCommand, PositionProperty, SlideHost};
use crate::options::Nested;
use crate::resolver::Feature;
use crate::transition::{CompletionGate, Driver, EndTarget, Transition, Tween};

/// Identifies one auto-height wait. A newer wait makes older tickets stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightTicket {
    generation: u64,
}

/// Pending image loads of the visible slides.
///
/// Await [`ImagesLoaded::wait`] on the host's executor, then hand the ticket
/// back through [`Carousel::on_images_loaded`].
pub struct ImagesLoaded {
    ticket: HeightTicket,
    loads: Vec<LocalBoxFuture<'static, ()>>,
}

impl std::fmt::Debug for ImagesLoaded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagesLoaded")
            .field("ticket", &self.ticket)
            .field("loads", &self.loads.len())
            .finish()
    }
}

impl ImagesLoaded {
    pub fn ticket(&self) -> HeightTicket {
        self.ticket
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Resolves once every image has loaded.
    pub async fn wait(self) -> HeightTicket {
        join_all(self.loads).await;
        self.ticket
    }
}

impl<H: SlideHost> Carousel<H> {
    /// Animate to the current index. Returns false when nothing moved or a
    /// transition is still pending.
    pub(super) fn render(&mut self, raw: RawEvent) -> bool {
        if self.transition.is_some() {
            debug!(index = self.state.index(), "render rejected, transition pending");
            return false;
        }
        if self.check_index_before_transform() {
            self.state.check_index();
        }
        if self.state.index() == self.state.cached() {
            return false;
        }

        self.emit(EventKind::IndexChanged, raw);
        self.emit(EventKind::TransitionStart, raw);
        self.state.begin();
        debug!(
            from = self.state.cached(),
            to = self.state.index(),
            "transition started"
        );

        let speed = self.live.speed;
        if self.caps.transition_duration {
            self.set_durations(speed);
        }
        if self.is_carousel() {
            self.transform_carousel(speed, raw);
        } else {
            self.transform_gallery(speed);
        }
        true
    }

    fn transform_carousel(&mut self, speed: Duration, raw: RawEvent) {
        let target = self.container_offset();
        let driver = if speed.is_zero() {
            None
        } else if !self.caps.transition_duration {
            Some(Driver::Manual(Tween::new(self.translate.value(), target, speed)))
        } else if self.caps.transition_end {
            Some(Driver::Native)
        } else {
            None
        };

        if !matches!(driver, Some(Driver::Manual(_))) {
            self.write_transform(target);
        }
        if !self.is_horizontal() {
            self.update_content_height();
        }

        match driver {
            Some(driver) => {
                self.transition = Some(Transition {
                    from: self.state.cached(),
                    to: self.state.index(),
                    duration: speed,
                    driver,
                    gate: CompletionGate::Container,
                });
            }
            None => {
                self.transition = Some(Transition {
                    from: self.state.cached(),
                    to: self.state.index(),
                    duration: Duration::ZERO,
                    driver: Driver::Deferred,
                    gate: CompletionGate::Container,
                });
                self.complete_transition(raw);
            }
        }
    }

    /// Cross-fade: the committed window fades out while the new one fades
    /// in at the same positions.
    fn transform_gallery(&mut self, speed: Duration) {
        let from = self.state.cached();
        let to = self.state.index();
        self.animate_slides(from, true, true);
        self.animate_slides(to, false, true);

        let driver = if !self.caps.gallery_events() || speed.is_zero() {
            Driver::Deferred
        } else {
            Driver::Native
        };
        self.transition = Some(Transition {
            from,
            to,
            duration: speed,
            driver,
            gate: CompletionGate::Slides(vec![to]),
        });
    }

    /// Swap the animation classes of the `items` slides starting at `start`.
    pub(super) fn animate_slides(&mut self, start: usize, exiting: bool, timed: bool) {
        let index = self.state.index();
        let items = self.state.items();
        let end = (start + items).min(self.state.slide_count_new());
        let options = self.resolver.options();
        let (remove_class, add_class) = if exiting {
            (options.animate_in.clone(), options.animate_out.clone())
        } else {
            (options.animate_normal.clone(), options.animate_in.clone())
        };
        let stagger = options.animate_delay;

        for slide in start..end {
            let left = (!exiting).then(|| {
                Length::Percent((slide as f64 - index as f64) * 100.0 / items as f64)
            });
            let duration = (timed && self.caps.transition_duration).then_some(self.live.speed);
            let delay = match stagger {
                Some(ms) if timed && self.caps.transition_delay => {
                    Some(Duration::from_millis(ms * (slide - start) as u64))
                }
                _ => None,
            };
            self.host.apply(HostCommand::AnimateSlide {
                slide,
                left,
                duration,
                delay,
                remove_class: remove_class.clone(),
                add_class: add_class.clone(),
            });
        }
    }

    /// A `transitionend`/`animationend` reported by the host. Returns true
    /// when it completed the running transition.
    pub fn on_transition_end(&mut self, target: EndTarget) -> bool {
        let Some(transition) = &self.transition else {
            return false;
        };
        if !matches!(transition.driver, Driver::Native) || !transition.gate.accepts(target) {
            trace!(?target, "ignoring unrelated end event");
            return false;
        }
        self.complete_transition(RawEvent::End { target });
        true
    }

    /// Runs at most once per transition.
    pub(super) fn complete_transition(&mut self, raw: RawEvent) {
        let Some(transition) = self.transition.take() else {
            return;
        };
        self.emit(EventKind::TransitionEnd, raw);

        if !self.is_carousel() {
            let options = self.resolver.options();
            let remove_class = options.animate_out.clone();
            let add_class = options.animate_normal.clone();
            let end = (transition.from + self.state.items()).min(self.state.slide_count_new());
            for slide in transition.from..end {
                self.host.apply(HostCommand::ResetSlide {
                    slide,
                    remove_class: remove_class.clone(),
                    add_class: add_class.clone(),
                });
            }
        }

        // looping carousels wrap only once the movement is over
        if !self.check_index_before_transform() && self.state.check_index() {
            if self.caps.transition_duration {
                self.set_durations(Duration::ZERO);
            }
            let offset = self.container_offset();
            self.write_transform(offset);
            self.emit(EventKind::IndexChanged, raw);
        }

        self.update_slide_status();
        let logical = self.state.logical_index();
        if self.live.nav && !self.nav.visible().contains(&logical) {
            self.update_nav_visibility();
        }
        self.update_nav_status();
        self.update_controls_status();
        self.lazy_load();
        self.run_auto_height();

        if self.resolver.options().nested == Some(Nested::Inner) {
            self.emit(EventKind::InnerLoaded, raw);
        }
        self.state.commit();
        debug!(index = self.state.index(), logical, "transition complete");
    }

    /// Put the container back where the committed index says it belongs.
    pub(super) fn snap_back(&mut self) {
        if self.caps.transition_duration {
            self.set_durations(self.live.speed);
        }
        let offset = self.container_offset();
        self.write_transform(offset);
    }

    /// Offset that shows the current index, clamped at the right deadzone.
    pub(super) fn container_offset(&self) -> Length {
        let geometry = self.geometry();
        let offset = geometry.transform_offset(
            self.state.index(),
            self.state.items(),
            self.live.fixed_width,
            self.live.gutter,
            self.offset_tops.as_slice(),
        );
        match self.live.fixed_width {
            Some(width) if self.has_right_deadzone() => {
                geometry.deadzone_clamp(offset, self.vp_inner, width, self.live.gutter)
            }
            _ => offset,
        }
    }

    fn has_right_deadzone(&self) -> bool {
        self.is_carousel()
            && self.live.fixed_width.is_some()
            && !self.state.looping()
            && self.live.edge_padding == 0.0
    }

    pub(super) fn write_transform(&mut self, value: Length) {
        self.translate = value;
        let property = if self.caps.transform {
            PositionProperty::Transform
        } else {
            PositionProperty::Position
        };
        self.host.apply(HostCommand::SetTransform {
            transform: ContainerTransform {
                property,
                axis: self.axis,
                value,
            },
        });
    }

    pub(super) fn set_durations(&mut self, duration: Duration) {
        self.host.apply(HostCommand::SetDuration {
            target: DurationTarget::Container,
            duration,
        });
        if !self.is_horizontal() {
            self.host.apply(HostCommand::SetDuration {
                target: DurationTarget::InnerWrapper,
                duration,
            });
        }
    }

    /// Hidden flags of every extended slide.
    pub(super) fn update_slide_status(&mut self) {
        let index = self.state.index();
        let items = self.state.items();
        for slide in 0..self.slide_hidden.len() {
            let hidden = !(slide >= index && slide < index + items);
            if self.slide_hidden[slide] != hidden {
                self.slide_hidden[slide] = hidden;
                self.host.apply(HostCommand::SetSlideHidden { slide, hidden });
            }
        }
    }

    pub(super) fn update_nav_visibility(&mut self) {
        if self.live.nav {
            self.update_nav_visibility_forced();
        }
    }

    pub(super) fn update_nav_visibility_forced(&mut self) {
        let diff = self.nav.update_visibility(
            self.state.logical_index(),
            self.state.slide_count(),
            self.state.items(),
            self.state.looping(),
        );
        let Some(diff) = diff else {
            return;
        };
        for nav in diff.hide {
            self.host.apply(HostCommand::SetNavItemHidden { nav, hidden: true });
        }
        for nav in diff.show {
            self.host.apply(HostCommand::SetNavItemHidden { nav, hidden: false });
        }
    }

    pub(super) fn update_nav_status(&mut self) {
        if !self.live.nav {
            return;
        }
        if let Some((prev, current)) = self.nav.update_current(self.state.logical_index()) {
            self.host.apply(HostCommand::SetNavCurrent {
                nav: prev,
                current: false,
            });
            self.host.apply(HostCommand::SetNavCurrent {
                nav: current,
                current: true,
            });
        }
    }

    pub(super) fn update_controls_status(&mut self) {
        if self.live.controls {
            self.update_controls_status_forced();
        }
    }

    pub(super) fn update_controls_status_forced(&mut self) {
        let changes = self.controls.update(
            self.state.index(),
            self.state.index_min(),
            self.state.index_max(),
            self.state.looping(),
            self.resolver.options().rewind,
        );
        for (control, disabled) in changes {
            self.host.apply(HostCommand::SetControlDisabled { control, disabled });
        }
    }

    /// Load lazy images of the visible slides (one extra on each side with
    /// edge padding). Each slide loads once.
    pub(super) fn lazy_load(&mut self) {
        if !self.resolver.options().lazyload {
            return;
        }
        let index = self.state.index();
        let mut start = index;
        let mut end = index + self.state.items();
        if self.live.edge_padding > 0.0 {
            start = start.saturating_sub(1);
            end += 1;
        }
        let end = end.min(self.lazy_loaded.len());
        for slide in start..end {
            if !self.lazy_loaded[slide] {
                self.lazy_loaded[slide] = true;
                self.host.apply(HostCommand::LoadLazyImages { slide });
            }
        }
    }

    /// Resize the inner wrapper to the tallest visible slide, once the
    /// visible images have loaded.
    pub(super) fn run_auto_height(&mut self) {
        if !self.live.auto_height {
            return;
        }
        self.image_generation += 1;
        let index = self.state.index();
        let end = (index + self.state.items()).min(self.state.slide_count_new());
        let loads = self.host.pending_image_loads(index..end);
        if loads.is_empty() {
            self.image_wait = None;
            self.update_inner_height();
        } else {
            debug!(images = loads.len(), "auto height waiting for images");
            self.image_wait = Some(ImagesLoaded {
                ticket: HeightTicket {
                    generation: self.image_generation,
                },
                loads,
            });
        }
    }

    /// The outstanding image wait, if auto height is blocked on one.
    pub fn take_image_wait(&mut self) -> Option<ImagesLoaded> {
        self.image_wait.take()
    }

    /// Finish an auto-height wait. Stale tickets are ignored.
    pub fn on_images_loaded(&mut self, ticket: HeightTicket) -> bool {
        if ticket.generation != self.image_generation {
            warn!(
                ticket = ticket.generation,
                current = self.image_generation,
                "discarding stale image wait"
            );
            return false;
        }
        self.update_inner_height();
        true
    }

    fn update_inner_height(&mut self) {
        let index = self.state.index();
        let end = (index + self.state.items()).min(self.state.slide_count_new());
        let tallest = (index..end)
            .map(|slide| self.host.slide_height(slide))
            .fold(0.0, f64::max);
        if self.inner_height != Some(tallest) {
            if self.caps.transition_duration {
                self.host.apply(HostCommand::SetDuration {
                    target: DurationTarget::InnerWrapper,
                    duration: self.live.speed,
                });
            }
            self.inner_height = Some(tallest);
            self.host.apply(HostCommand::SetInnerHeight { px: tallest });
        }
    }

    /// Vertical sliders show exactly the `items` slides from `index`.
    pub(super) fn update_content_height(&mut self) {
        let px = self
            .offset_tops
            .window_height(self.state.index(), self.state.items());
        self.inner_height = Some(px);
        self.host.apply(HostCommand::SetInnerHeight { px });
    }

    /// Styles for the current zone, used without media-query support.
    pub(super) fn layout_styles(&self) -> LayoutStyles {
        let geometry = self.geometry();
        let gutter = self.live.gutter;
        let fixed = self.live.fixed_width;
        let items = self.state.items();
        LayoutStyles {
            inner_wrapper: Some(geometry.inner_wrapper(self.live.edge_padding, gutter, fixed)),
            container_width: geometry.container_width(fixed, gutter, items),
            slide_width: geometry.slide_width(fixed, gutter, items),
            slide_gutter: (gutter > 0.0).then(|| geometry.slide_gutter(gutter)),
        }
    }

    /// Base styles from the base options plus one `min-width` rule per
    /// breakpoint that changes layout.
    pub(super) fn style_sheet_plan(&self) -> StyleSheetPlan {
        let geometry = self.geometry();
        let options = self.resolver.options();
        let slide_count = self.state.slide_count();
        let edge = if self.is_carousel() {
            options.edge_padding.filter(|p| *p > 0.0).unwrap_or(0.0)
        } else {
            0.0
        };
        let gutter = options.gutter.max(0.0);
        let fixed = options.fixed_width.filter(|w| *w > 0.0);
        let items = options.items.clamp(1, slide_count.max(1));

        let base = LayoutStyles {
            inner_wrapper: Some(geometry.inner_wrapper(edge, gutter, fixed)),
            container_width: geometry.container_width(fixed, gutter, items),
            slide_width: geometry.slide_width(fixed, gutter, items),
            slide_gutter: (gutter > 0.0).then(|| geometry.slide_gutter(gutter)),
        };

        let any_fixed = self.resolver.has_feature(Feature::FixedWidth);
        let mut media = Vec::new();
        for (bp, ov) in self.resolver.breakpoints().iter() {
            let vp = f64::from(*bp);
            let gutter = self.resolver.gutter(vp);
            let fixed = self.resolver.fixed_width(vp);
            let items = self.resolver.items(vp);
            let mut styles = LayoutStyles::default();

            if ov.edge_padding.is_some() || ov.gutter.is_some() {
                styles.inner_wrapper = Some(geometry.inner_wrapper(
                    self.resolver.edge_padding(vp),
                    gutter,
                    fixed,
                ));
            }
            if ov.fixed_width.is_some() || ov.gutter.is_some() || ov.items.is_some() {
                styles.container_width = geometry.container_width(fixed, gutter, items);
            }
            let gallery_items = !self.is_carousel() && ov.items.is_some();
            if ov.fixed_width.is_some() || (any_fixed && ov.gutter.is_some()) || gallery_items {
                styles.slide_width = geometry.slide_width(fixed, gutter, items);
            }
            if ov.gutter.is_some() {
                styles.slide_gutter = Some(geometry.slide_gutter(gutter));
            }

            if !styles.is_empty() {
                media.push(MediaRule {
                    min_width_em: vp / 16.0,
                    styles,
                });
            }
        }
        StyleSheetPlan { base, media }
    }
}
