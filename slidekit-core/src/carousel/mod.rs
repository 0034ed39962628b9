//! One mounted slider: owns the index state, the live options of the current
//! breakpoint zone and the host it drives.
//!
//! All inputs arrive through `&mut self` methods on a single thread. The only
//! re-entrancy guards are the pending transition, an in-progress drag and the
//! freeze rule.

mod input;
mod playback;
mod render;
mod resize;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

pub use render::{HeightTicket, ImagesLoaded};

use crate::autoplay::Autoplay;
use crate::capability::Capabilities;
use crate::error::{Result, SliderError};
use crate::events::{EventBus, EventKind, RawEvent, SliderEvent, SliderInfo, SubscriptionId};
use crate::geometry::{Geometry, Length, OffsetTops, WrapperStyle};
use crate::gesture::{ClickGuard, GestureSession};
use crate::host::{HostCommand, ListenerGroup, SlideHost, clone_sources};
use crate::index::{GoTarget, IndexState, SlideLayout};
use crate::nav::{ControlsState, NavState};
use crate::options::{Axis, Mode, Nested, SliderOptions};
use crate::resolver::{Feature, OptionResolver, ResolvedOptions};
use crate::transition::Transition;

/// Quiet period before a resize is handled.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Options resolved for the current breakpoint zone. Interactive features are
/// forced off while frozen.
#[derive(Debug, Clone, PartialEq)]
struct Live {
    gutter: f64,
    edge_padding: f64,
    fixed_width: Option<f64>,
    speed: Duration,
    auto_height: bool,
    controls: bool,
    controls_text: [String; 2],
    nav: bool,
    arrow_keys: bool,
    touch: bool,
    mouse_drag: bool,
    autoplay: bool,
    autoplay_timeout: Duration,
    autoplay_hover_pause: bool,
    autoplay_reset_on_visibility: bool,
    autoplay_text: [String; 2],
}

impl Live {
    fn resolve(resolver: &OptionResolver, vp: f64, frozen: bool) -> Self {
        let autoplay = !frozen && resolver.autoplay(vp);
        Self {
            gutter: resolver.gutter(vp),
            edge_padding: resolver.edge_padding(vp),
            fixed_width: resolver.fixed_width(vp),
            speed: resolver.speed(vp),
            auto_height: resolver.auto_height(vp),
            controls: !frozen && resolver.controls(vp),
            controls_text: resolver.controls_text(vp),
            nav: !frozen && resolver.nav(vp),
            arrow_keys: !frozen && resolver.arrow_keys(vp),
            touch: !frozen && resolver.touch(vp),
            mouse_drag: !frozen && resolver.mouse_drag(vp),
            autoplay,
            autoplay_timeout: resolver.autoplay_timeout(vp),
            autoplay_hover_pause: autoplay && resolver.autoplay_hover_pause(vp),
            autoplay_reset_on_visibility: autoplay
                && resolver.autoplay_reset_on_visibility(vp),
            autoplay_text: resolver.autoplay_text(vp),
        }
    }
}

/// Features enabled by the base options or any breakpoint. Their elements
/// and listeners exist for the whole life of the slider.
#[derive(Debug, Clone, Copy)]
struct Features {
    controls: bool,
    nav: bool,
    autoplay: bool,
    touch: bool,
    mouse_drag: bool,
}

/// A mounted carousel or gallery.
pub struct Carousel<H: SlideHost> {
    host: H,
    caps: Arc<Capabilities>,
    resolver: OptionResolver,
    state: IndexState,
    live: Live,
    features: Features,
    mode: Mode,
    axis: Axis,
    vp_outer: f64,
    vp_inner: f64,
    zone: usize,
    offset_tops: OffsetTops,
    /// Container offset last written to the host.
    translate: Length,
    transition: Option<Transition>,
    gesture: Option<GestureSession>,
    click_guard: ClickGuard,
    autoplay: Autoplay,
    autoplay_button: bool,
    nav: NavState,
    controls: ControlsState,
    slide_hidden: Vec<bool>,
    lazy_loaded: Vec<bool>,
    clones_transparent: bool,
    inner_wrapper: Option<WrapperStyle>,
    inner_height: Option<f64>,
    image_generation: u64,
    image_wait: Option<ImagesLoaded>,
    resize_deadline: Option<Instant>,
    listeners: BTreeSet<ListenerGroup>,
    events: EventBus,
}

impl<H: SlideHost> fmt::Debug for Carousel<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("mode", &self.mode)
            .field("axis", &self.axis)
            .field("state", &self.state)
            .field("zone", &self.zone)
            .field("pending", &self.transition.is_some())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl<H: SlideHost> Carousel<H> {
    /// Mount a slider on `host`.
    pub fn try_new(
        host: H,
        options: SliderOptions,
        caps: Arc<Capabilities>,
        now: Instant,
    ) -> Result<Self> {
        let resolver = Self::prepare(&host, options)?;
        Ok(Self::build(host, resolver, caps, now))
    }

    fn prepare(host: &H, options: SliderOptions) -> Result<OptionResolver> {
        if !host.has_container() {
            return Err(SliderError::MissingContainer);
        }
        let found = host.slide_count();
        if found < 2 {
            return Err(SliderError::NotEnoughSlides { found });
        }
        OptionResolver::new(options, found)
    }

    fn build(
        host: H,
        resolver: OptionResolver,
        caps: Arc<Capabilities>,
        now: Instant,
    ) -> Self {
        let options = resolver.options().clone();
        let mode = options.mode;
        let axis = options.axis;
        let carousel = mode == Mode::Carousel;
        let slide_count = resolver.slide_count();
        let vp_outer = host.outer_width();
        let vp_inner = host.inner_width();

        let layout = SlideLayout {
            slide_count,
            carousel,
            looping: resolver.looping(),
            edge_padding: carousel && resolver.has_feature(Feature::EdgePadding),
        };
        let state = IndexState::new(layout, resolver.items(vp_outer), resolver.slide_by(vp_outer));
        let live = Live::resolve(&resolver, vp_outer, state.frozen());
        let features = Features {
            controls: resolver.has_feature(Feature::Controls),
            nav: resolver.has_feature(Feature::Nav),
            autoplay: resolver.has_feature(Feature::Autoplay),
            touch: resolver.has_feature(Feature::Touch),
            mouse_drag: resolver.has_feature(Feature::MouseDrag),
        };
        let scn = state.slide_count_new();

        let mut this = Self {
            zone: resolver.zone(vp_outer),
            autoplay: Autoplay::new(live.autoplay_timeout, options.autoplay_direction),
            autoplay_button: options.autoplay_button || options.autoplay_button_output,
            nav: NavState::new(options.nav_container),
            host,
            caps,
            resolver,
            state,
            live,
            features,
            mode,
            axis,
            vp_outer,
            vp_inner,
            offset_tops: OffsetTops::default(),
            translate: Length::ZERO_PX,
            transition: None,
            gesture: None,
            click_guard: ClickGuard::default(),
            controls: ControlsState::default(),
            slide_hidden: vec![true; scn],
            lazy_loaded: vec![false; scn],
            clones_transparent: false,
            inner_wrapper: None,
            inner_height: None,
            image_generation: 0,
            image_wait: None,
            resize_deadline: None,
            listeners: BTreeSet::new(),
            events: EventBus::new(),
        };
        this.mount(now);
        this
    }

    fn mount(&mut self, now: Instant) {
        let options = self.resolver.options().clone();
        self.refresh_trim();
        self.host.apply(HostCommand::MountWrappers {
            mode: self.mode,
            axis: self.axis,
        });

        let clone_count = self.state.clone_count();
        if clone_count > 0 {
            let (before, after) =
                clone_sources(self.state.slide_count(), clone_count, self.is_carousel());
            self.host.apply(HostCommand::InstallClones { before, after });
        }

        // every slide starts hidden; the visible window is then revealed
        for slide in 0..self.state.slide_count_new() {
            self.host.apply(HostCommand::SetSlideHidden { slide, hidden: true });
        }
        self.update_slide_status();
        if !self.is_carousel() {
            let index = self.state.index();
            self.animate_slides(index, false, false);
        }

        if self.is_carousel() && self.is_horizontal() && !self.caps.subpixel {
            let geometry = self.geometry();
            for slide in 0..self.state.slide_count_new() {
                let margin = geometry.slide_margin_left(slide);
                self.host.apply(HostCommand::SetSlideMarginLeft { slide, margin });
            }
        }

        if self.caps.css_media_queries {
            let plan = self.style_sheet_plan();
            self.host.apply(HostCommand::InstallStyles { plan });
        } else {
            let styles = self.layout_styles();
            self.inner_wrapper = styles.inner_wrapper;
            self.host.apply(HostCommand::InlineStyles { styles });
        }

        if !self.is_horizontal() {
            self.measure_offset_tops();
            self.update_content_height();
        }
        if self.is_carousel() {
            let offset = self.container_offset();
            self.write_transform(offset);
        }

        if self.features.nav {
            if !self.nav.custom_items() {
                self.update_nav_visibility_forced();
                let hidden: Vec<usize> = (0..self.state.slide_count())
                    .filter(|nav| !self.nav.visible().contains(nav))
                    .collect();
                for nav in hidden {
                    self.host.apply(HostCommand::SetNavItemHidden { nav, hidden: true });
                }
            }
            self.host.apply(HostCommand::SetNavCurrent { nav: 0, current: true });
            self.listen(ListenerGroup::Nav, true);
            if !self.live.nav {
                self.host.apply(HostCommand::SetNavShown { shown: false });
            }
        }

        if self.features.autoplay {
            if self.autoplay_button {
                self.listen(ListenerGroup::AutoplayButton, true);
                self.sync_autoplay_button();
            }
            if self.live.autoplay {
                self.start_autoplay(now);
                if self.live.autoplay_hover_pause {
                    self.listen(ListenerGroup::Hover, true);
                }
                if self.live.autoplay_reset_on_visibility {
                    self.listen(ListenerGroup::Visibility, true);
                }
            } else if self.autoplay_button {
                self.host.apply(HostCommand::SetAutoplayButtonShown { shown: false });
            }
        }

        if self.features.controls {
            if !options.controls_container {
                self.host.apply(HostCommand::SetControlsText {
                    text: self.live.controls_text.clone(),
                });
            }
            self.update_controls_status_forced();
            self.listen(ListenerGroup::Controls, true);
            if !self.live.controls {
                self.host.apply(HostCommand::SetControlsShown { shown: false });
            }
        }

        if self.is_carousel() {
            if self.live.touch {
                self.listen(ListenerGroup::Touch, true);
            }
            if self.live.mouse_drag {
                self.listen(ListenerGroup::MouseDrag, true);
            }
        }
        if self.live.arrow_keys {
            self.listen(ListenerGroup::DocumentKeys, true);
        }
        self.listen(ListenerGroup::TransitionEnd, true);
        if options.nested != Some(Nested::Inner) {
            self.listen(ListenerGroup::Resize, true);
        }

        self.lazy_load();
        self.run_auto_height();
        self.check_fixed_width_slide_count();

        debug!(
            mode = ?self.mode,
            axis = %self.axis,
            slides = self.state.slide_count(),
            clones = clone_count,
            items = self.state.items(),
            "slider mounted"
        );
        if options.nested == Some(Nested::Inner) {
            self.emit(EventKind::InnerLoaded, RawEvent::None);
        }
    }

    /// Tear down: detach listeners, drop timers and subscribers, restore the
    /// host. Returns the host.
    pub fn destroy(mut self) -> H {
        let groups: Vec<ListenerGroup> = self.listeners.iter().copied().collect();
        for group in groups {
            self.listen(group, false);
        }
        self.autoplay.stop();
        self.resize_deadline = None;
        self.transition = None;
        self.gesture = None;
        self.image_wait = None;
        self.events.clear();
        self.host.apply(HostCommand::Restore);
        debug!("slider destroyed");
        self.host
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Effective options for the current viewport.
    pub fn resolved(&self) -> ResolvedOptions {
        self.resolver.resolve(self.vp_outer)
    }

    pub fn index(&self) -> usize {
        self.state.index()
    }

    pub fn index_cached(&self) -> usize {
        self.state.cached()
    }

    /// Logical slide currently shown first.
    pub fn displayed(&self) -> usize {
        self.state.logical_index()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn is_frozen(&self) -> bool {
        self.state.frozen()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.as_ref().is_some_and(|g| g.committed)
    }

    pub fn listeners(&self) -> impl Iterator<Item = ListenerGroup> + '_ {
        self.listeners.iter().copied()
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&SliderEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn info(&self) -> SliderInfo {
        self.info_with(RawEvent::None)
    }

    fn info_with(&self, event: RawEvent) -> SliderInfo {
        SliderInfo {
            index: self.state.index(),
            index_cached: self.state.cached(),
            displayed: self.state.logical_index(),
            items: self.state.items(),
            slide_by: self.state.slide_by(),
            clone_count: self.state.clone_count(),
            slide_count: self.state.slide_count(),
            slide_count_new: self.state.slide_count_new(),
            index_min: self.state.index_min(),
            index_max: self.state.index_max(),
            nav_current: self.nav.current(),
            visible_nav_indexes: self.nav.visible().to_vec(),
            prev_disabled: self.controls.prev_disabled,
            next_disabled: self.controls.next_disabled,
            frozen: self.state.frozen(),
            pending: self.state.is_pending(),
            autoplay: self.autoplay.phase(),
            breakpoint_zone: self.zone,
            event,
        }
    }

    fn emit(&mut self, kind: EventKind, event: RawEvent) {
        if !self.events.has_subscribers(kind) {
            return;
        }
        let info = self.info_with(event);
        self.events.emit(&SliderEvent { kind, info });
    }

    fn listen(&mut self, group: ListenerGroup, attach: bool) {
        let changed = if attach {
            self.listeners.insert(group)
        } else {
            self.listeners.remove(&group)
        };
        if changed {
            self.host.apply(HostCommand::Listen { group, attach });
        }
    }

    fn is_carousel(&self) -> bool {
        self.mode == Mode::Carousel
    }

    fn is_horizontal(&self) -> bool {
        self.axis == Axis::Horizontal
    }

    /// Non-loop sliders and galleries settle the index before moving;
    /// looping carousels wrap after the transition so the jump is invisible.
    fn check_index_before_transform(&self) -> bool {
        !self.is_carousel() || !self.state.looping()
    }

    fn geometry(&self) -> Geometry {
        Geometry {
            mode: self.mode,
            axis: self.axis,
            viewport: self.vp_outer,
            slide_count: self.state.slide_count(),
            slide_count_new: self.state.slide_count_new(),
            calc: self.caps.calc,
            transform: self.caps.transform,
        }
    }

    /// Fixed-width loops drop one slot from the right edge when the viewport
    /// shows part of a slide.
    fn refresh_trim(&mut self) {
        let gutter = self.live.gutter;
        let trim = self
            .live
            .fixed_width
            .is_some_and(|width| self.vp_outer % (width + gutter) > gutter);
        self.state.set_trim_right(trim);
    }

    fn measure_offset_tops(&mut self) {
        let tops = self.host.slide_offset_tops();
        let last = self.state.slide_count_new().saturating_sub(1);
        let last_height = self.host.slide_height(last);
        self.offset_tops = OffsetTops::new(tops, last_height);
    }
}

/// A slider handle that is either mounted or inert.
///
/// Mounting never fails: invalid input (missing container, fewer than two
/// slides, malformed breakpoints) yields an inert handle whose operations do
/// nothing.
#[derive(Debug)]
pub enum SliderHandle<H: SlideHost> {
    Active(Box<Carousel<H>>),
    Inert { host: H, reason: SliderError },
}

impl<H: SlideHost> SliderHandle<H> {
    pub fn mount(
        host: H,
        options: SliderOptions,
        caps: Arc<Capabilities>,
        now: Instant,
    ) -> Self {
        match Carousel::prepare(&host, options) {
            Ok(resolver) => {
                SliderHandle::Active(Box::new(Carousel::build(host, resolver, caps, now)))
            }
            Err(reason) => {
                warn!("slider left inert: {reason}");
                SliderHandle::Inert { host, reason }
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SliderHandle::Active(_))
    }

    pub fn carousel(&self) -> Option<&Carousel<H>> {
        match self {
            SliderHandle::Active(carousel) => Some(carousel),
            SliderHandle::Inert { .. } => None,
        }
    }

    pub fn carousel_mut(&mut self) -> Option<&mut Carousel<H>> {
        match self {
            SliderHandle::Active(carousel) => Some(carousel),
            SliderHandle::Inert { .. } => None,
        }
    }

    pub fn go_to(&mut self, target: GoTarget) -> bool {
        self.carousel_mut().is_some_and(|c| c.go_to(target))
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(carousel) = self.carousel_mut() {
            carousel.tick(now);
        }
    }

    pub fn info(&self) -> Option<SliderInfo> {
        self.carousel().map(Carousel::info)
    }

    pub fn host(&self) -> &H {
        match self {
            SliderHandle::Active(carousel) => carousel.host(),
            SliderHandle::Inert { host, .. } => host,
        }
    }

    /// Destroy the slider (if mounted) and hand the host back.
    pub fn destroy(self) -> H {
        match self {
            SliderHandle::Active(carousel) => carousel.destroy(),
            SliderHandle::Inert { host, .. } => host,
        }
    }
}
