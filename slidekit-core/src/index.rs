//! Index state machine.
//!
//! Owns the current index into the clone-extended slide sequence and the
//! index committed by the last completed transition. Every mutation keeps
//! the index inside `[index_min, index_max]`; looping sliders additionally
//! wrap by whole `slide_count` jumps, which never change the logical slide.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SliderError;

/// Destination of a `goTo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GoTarget {
    /// A logical slide number; wrapped modulo the slide count.
    Index(isize),
    First,
    Last,
    Prev,
    Next,
}

impl FromStr for GoTarget {
    type Err = SliderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first" => Ok(GoTarget::First),
            "last" => Ok(GoTarget::Last),
            "prev" => Ok(GoTarget::Prev),
            "next" => Ok(GoTarget::Next),
            other => other
                .parse::<isize>()
                .map(GoTarget::Index)
                .map_err(|_| SliderError::InvalidTarget(other.to_string())),
        }
    }
}

impl fmt::Display for GoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoTarget::Index(i) => write!(f, "{i}"),
            GoTarget::First => f.write_str("first"),
            GoTarget::Last => f.write_str("last"),
            GoTarget::Prev => f.write_str("prev"),
            GoTarget::Next => f.write_str("next"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Idle,
    /// A render was issued and its transition has not completed.
    Pending,
}

/// Static shape of the extended slide sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideLayout {
    pub slide_count: usize,
    pub carousel: bool,
    pub looping: bool,
    /// Edge padding is enabled somewhere (base or any breakpoint).
    pub edge_padding: bool,
}

impl SlideLayout {
    pub fn clone_count(&self) -> usize {
        if self.looping {
            self.slide_count * 2
        } else if self.edge_padding {
            1
        } else {
            0
        }
    }

    /// Length of the clone-extended sequence. Galleries only clone after.
    pub fn slide_count_new(&self) -> usize {
        if self.carousel {
            self.slide_count + self.clone_count() * 2
        } else {
            self.slide_count + self.clone_count()
        }
    }

    /// Clones placed before the first real slide.
    pub fn leading_clones(&self) -> usize {
        if self.carousel { self.clone_count() } else { 0 }
    }

    pub fn index_adjust(&self) -> usize {
        usize::from(!self.looping && self.edge_padding)
    }
}

#[derive(Debug, Clone)]
pub struct IndexState {
    layout: SlideLayout,
    index: usize,
    cached: usize,
    items: usize,
    slide_by: usize,
    index_max: usize,
    /// Fixed-width loops whose viewport shows a partial slide give up one
    /// slot at the right edge.
    trim_right: bool,
    phase: Phase,
}

impl IndexState {
    pub fn new(layout: SlideLayout, items: usize, slide_by: usize) -> Self {
        let index = layout.leading_clones();
        let mut state = Self {
            layout,
            index,
            cached: index,
            items: items.max(1),
            slide_by: slide_by.max(1),
            index_max: 0,
            trim_right: false,
            phase: Phase::Idle,
        };
        state.recompute_max();
        state
    }

    fn recompute_max(&mut self) {
        self.index_max = self
            .layout
            .slide_count_new()
            .saturating_sub(self.items)
            .saturating_sub(self.layout.index_adjust());
    }

    pub fn layout(&self) -> &SlideLayout {
        &self.layout
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cached(&self) -> usize {
        self.cached
    }

    pub fn index_min(&self) -> usize {
        self.layout.index_adjust()
    }

    pub fn index_max(&self) -> usize {
        self.index_max
    }

    pub fn items(&self) -> usize {
        self.items
    }

    pub fn slide_by(&self) -> usize {
        self.slide_by
    }

    pub fn slide_count(&self) -> usize {
        self.layout.slide_count
    }

    pub fn slide_count_new(&self) -> usize {
        self.layout.slide_count_new()
    }

    pub fn clone_count(&self) -> usize {
        self.layout.clone_count()
    }

    pub fn looping(&self) -> bool {
        self.layout.looping
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    /// Nothing can move when every slide is already visible.
    pub fn frozen(&self) -> bool {
        self.layout.slide_count <= self.items
    }

    pub fn initial_index(&self) -> usize {
        self.layout.leading_clones()
    }

    pub fn set_items(&mut self, items: usize) {
        self.items = items.max(1);
        self.recompute_max();
    }

    pub fn set_slide_by(&mut self, slide_by: usize) {
        self.slide_by = slide_by.max(1);
    }

    pub fn set_trim_right(&mut self, trim: bool) {
        self.trim_right = trim;
    }

    /// Logical slide for an extended index.
    pub fn logical(&self, index: usize) -> usize {
        let n = self.layout.slide_count.max(1) as isize;
        (index as isize - self.layout.leading_clones() as isize).rem_euclid(n) as usize
    }

    pub fn logical_index(&self) -> usize {
        self.logical(self.index)
    }

    /// Bring a raw target into `[index_min, index_max]`. Looping sliders move
    /// by whole slide counts first so the logical slide is preserved.
    fn settle(&self, target: isize) -> usize {
        let min = self.index_min() as isize;
        let max = self.index_max as isize;
        let mut target = target;
        if self.layout.looping {
            let n = self.layout.slide_count.max(1) as isize;
            while target > max && target - n >= min {
                target -= n;
            }
            while target < min && target + n <= max {
                target += n;
            }
        }
        target.clamp(min, max.max(min)) as usize
    }

    /// Move by `delta` extended slots. Returns whether the index changed.
    pub fn move_by(&mut self, delta: isize) -> bool {
        if self.frozen() || delta == 0 {
            return false;
        }
        let next = self.settle(self.index as isize + delta);
        let changed = next != self.index;
        self.index = next;
        changed
    }

    /// Set an absolute extended index, kept in bounds.
    pub fn set(&mut self, index: usize) -> bool {
        if self.frozen() {
            return false;
        }
        let next = self.settle(index as isize);
        let changed = next != self.index;
        self.index = next;
        changed
    }

    /// Extended index a `goTo` would land on. `Prev`/`Next` are steps, not
    /// destinations, and resolve to `None`.
    pub fn resolve_target(&self, target: GoTarget) -> Option<usize> {
        let n = self.layout.slide_count as isize;
        if n == 0 {
            return None;
        }
        let current = self.logical_index() as isize;
        let gap = match target {
            GoTarget::First => -current,
            GoTarget::Last => n - self.items as isize - current,
            GoTarget::Index(i) => i.rem_euclid(n) - current,
            GoTarget::Prev | GoTarget::Next => return None,
        };
        Some(self.settle(self.index as isize + gap))
    }

    /// Wrap (loop) or clamp (non-loop) the index. Returns whether it moved.
    pub fn check_index(&mut self) -> bool {
        let before = self.index;
        if self.layout.looping {
            let n = self.layout.slide_count.max(1);
            let mut left = self.index_min();
            let mut right = self.index_max;
            if self.layout.carousel {
                left += self.slide_by;
                right = right.saturating_sub(self.slide_by);
            }
            if self.trim_right {
                right = right.saturating_sub(1);
            }

            if self.index > right {
                while self.index >= left + n {
                    self.index -= n;
                }
            } else if self.index < left {
                while self.index + n <= right {
                    self.index += n;
                }
            }
        } else {
            self.index = self.index.clamp(self.index_min(), self.index_max.max(self.index_min()));
        }
        before != self.index
    }

    /// Whether the index differs logically from the committed one.
    pub fn logically_moved(&self) -> bool {
        self.logical(self.index) != self.logical(self.cached)
    }

    pub fn begin(&mut self) {
        self.phase = Phase::Pending;
    }

    /// Complete a transition: the current index becomes the committed one.
    pub fn commit(&mut self) {
        self.cached = self.index;
        self.phase = Phase::Idle;
    }

    /// Commit without a transition (instant re-layout).
    pub fn sync_cached(&mut self) {
        self.cached = self.index;
    }

    pub fn reset(&mut self) {
        self.index = self.initial_index();
    }
}
