//! Typed lifecycle events.

use std::fmt;

use serde::Serialize;

use crate::autoplay::AutoplayPhase;
use crate::gesture::PointerKind;
use crate::nav::Key;
use crate::transition::EndTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    IndexChanged,
    TransitionStart,
    TransitionEnd,
    TouchStart,
    TouchMove,
    TouchEnd,
    DragStart,
    DragMove,
    DragEnd,
    OuterResized,
    InnerLoaded,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::IndexChanged,
        EventKind::TransitionStart,
        EventKind::TransitionEnd,
        EventKind::TouchStart,
        EventKind::TouchMove,
        EventKind::TouchEnd,
        EventKind::DragStart,
        EventKind::DragMove,
        EventKind::DragEnd,
        EventKind::OuterResized,
        EventKind::InnerLoaded,
    ];

    pub fn pointer_start(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Touch => EventKind::TouchStart,
            PointerKind::Mouse => EventKind::DragStart,
        }
    }

    pub fn pointer_move(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Touch => EventKind::TouchMove,
            PointerKind::Mouse => EventKind::DragMove,
        }
    }

    pub fn pointer_end(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Touch => EventKind::TouchEnd,
            PointerKind::Mouse => EventKind::DragEnd,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::IndexChanged => "indexChanged",
            EventKind::TransitionStart => "transitionStart",
            EventKind::TransitionEnd => "transitionEnd",
            EventKind::TouchStart => "touchStart",
            EventKind::TouchMove => "touchMove",
            EventKind::TouchEnd => "touchEnd",
            EventKind::DragStart => "dragStart",
            EventKind::DragMove => "dragMove",
            EventKind::DragEnd => "dragEnd",
            EventKind::OuterResized => "outerResized",
            EventKind::InnerLoaded => "innerLoaded",
        };
        f.write_str(name)
    }
}

/// The input that caused an event, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RawEvent {
    #[default]
    None,
    Pointer {
        kind: PointerKind,
        x: f64,
        y: f64,
    },
    End {
        target: EndTarget,
    },
    Resize {
        width: f64,
    },
    Key {
        key: Key,
    },
}

/// Snapshot of the slider carried by every event and returned by `info()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderInfo {
    pub index: usize,
    pub index_cached: usize,
    /// Logical slide at `index`.
    pub displayed: usize,
    pub items: usize,
    pub slide_by: usize,
    pub clone_count: usize,
    pub slide_count: usize,
    pub slide_count_new: usize,
    pub index_min: usize,
    pub index_max: usize,
    pub nav_current: usize,
    pub visible_nav_indexes: Vec<usize>,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub frozen: bool,
    pub pending: bool,
    pub autoplay: AutoplayPhase,
    pub breakpoint_zone: usize,
    pub event: RawEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderEvent {
    pub kind: EventKind,
    pub info: SliderInfo,
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&SliderEvent)>;

/// Per-carousel subscriber registry.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, EventKind, Handler)>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&SliderEvent) + 'static,
    ) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push((id, kind, Box::new(handler)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _, _)| *sid != id);
        before != self.subscribers.len()
    }

    pub fn has_subscribers(&self, kind: EventKind) -> bool {
        self.subscribers.iter().any(|(_, k, _)| *k == kind)
    }

    pub fn emit(&mut self, event: &SliderEvent) {
        for (_, kind, handler) in &mut self.subscribers {
            if *kind == event.kind {
                handler(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}
