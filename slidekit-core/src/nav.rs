//! Nav dots and prev/next controls status.

use serde::{Deserialize, Serialize};

/// Keys the slider reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Space,
}

/// One dot per page, starting from the page the current slide sits on.
///
/// A leading `0` is added when the dots could not otherwise reach every
/// slide: 7 looping slides with 3 items at logical 2 give `[0, 2, 5]`.
pub fn visible_nav_indexes(
    logical: usize,
    slide_count: usize,
    items: usize,
    looping: bool,
) -> Vec<usize> {
    if slide_count == 0 {
        return Vec::new();
    }
    let items = items.clamp(1, slide_count);
    let mut visible = Vec::with_capacity(slide_count / items + 1);
    let mut abs = logical % slide_count % items;
    while abs < slide_count {
        if !looping && abs + items > slide_count {
            abs = slide_count - items;
        }
        visible.push(abs);
        abs += items;
    }

    let uncovered = if looping {
        visible.len() * items < slide_count
    } else {
        visible.first().is_some_and(|first| *first > 0)
    };
    if uncovered {
        visible.insert(0, 0);
    }
    visible
}

/// Visibility change for nav items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavVisibilityDiff {
    pub hide: Vec<usize>,
    pub show: Vec<usize>,
}

/// What a key press on a focused nav item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKeyAction {
    Focus(usize),
    Activate(usize),
    Ignore,
}

#[derive(Debug, Clone, Default)]
pub struct NavState {
    visible: Vec<usize>,
    current: usize,
    clicked: Option<usize>,
    /// Host-provided nav items are always all visible.
    custom_items: bool,
}

impl NavState {
    pub fn new(custom_items: bool) -> Self {
        Self {
            custom_items,
            ..Self::default()
        }
    }

    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn custom_items(&self) -> bool {
        self.custom_items
    }

    pub fn set_clicked(&mut self, nav: usize) {
        self.clicked = Some(nav);
    }

    pub fn clear_clicked(&mut self) {
        self.clicked = None;
    }

    /// Recompute the visible window. `None` if unchanged.
    pub fn update_visibility(
        &mut self,
        logical: usize,
        slide_count: usize,
        items: usize,
        looping: bool,
    ) -> Option<NavVisibilityDiff> {
        if self.custom_items {
            return None;
        }
        let next = visible_nav_indexes(logical, slide_count, items, looping);
        if next == self.visible {
            return None;
        }
        let diff = NavVisibilityDiff {
            hide: self.visible.clone(),
            show: next.clone(),
        };
        self.visible = next;
        Some(diff)
    }

    /// Move the current marker. Returns `(previous, current)` on change.
    pub fn update_current(&mut self, logical: usize) -> Option<(usize, usize)> {
        let next = self.clicked.take().unwrap_or(logical);
        if next == self.current {
            return None;
        }
        let prev = std::mem::replace(&mut self.current, next);
        Some((prev, next))
    }

    /// Keyboard navigation among the visible dots (or all dots for custom
    /// items).
    pub fn key_action(&self, focused: usize, key: Key, slide_count: usize) -> NavKeyAction {
        let (len, current) = if self.custom_items {
            (slide_count, Some(focused))
        } else {
            (
                self.visible.len(),
                self.visible.iter().position(|v| *v == focused),
            )
        };
        let nav_at = |pos: usize| -> usize {
            if self.custom_items {
                pos
            } else {
                self.visible.get(pos).copied().unwrap_or(pos)
            }
        };

        match key {
            Key::Enter | Key::Space => NavKeyAction::Activate(focused),
            _ => {
                let Some(current) = current else {
                    return NavKeyAction::Ignore;
                };
                match key {
                    Key::Left | Key::PageUp if current > 0 => {
                        NavKeyAction::Focus(nav_at(current - 1))
                    }
                    Key::Up | Key::Home if current > 0 => NavKeyAction::Focus(nav_at(0)),
                    Key::Right | Key::PageDown if current + 1 < len => {
                        NavKeyAction::Focus(nav_at(current + 1))
                    }
                    Key::Down | Key::End if current + 1 < len => {
                        NavKeyAction::Focus(nav_at(len - 1))
                    }
                    _ => NavKeyAction::Ignore,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Control {
    Prev,
    Next,
}

/// Disabled flags of the prev/next controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlsState {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl ControlsState {
    /// Update at the bounds. Looping sliders never disable controls.
    pub fn update(
        &mut self,
        index: usize,
        index_min: usize,
        index_max: usize,
        looping: bool,
        rewind: bool,
    ) -> Vec<(Control, bool)> {
        if looping {
            return Vec::new();
        }
        let prev = index == index_min;
        let next = !rewind && index == index_max;
        let mut changed = Vec::new();
        if prev != self.prev_disabled {
            self.prev_disabled = prev;
            changed.push((Control::Prev, prev));
        }
        if next != self.next_disabled {
            self.next_disabled = next;
            changed.push((Control::Next, next));
        }
        changed
    }

    pub fn is_disabled(&self, control: Control) -> bool {
        match control {
            Control::Prev => self.prev_disabled,
            Control::Next => self.next_disabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_dot_per_page() {
        assert_eq!(visible_nav_indexes(0, 6, 3, true), vec![0, 3]);
        assert_eq!(visible_nav_indexes(0, 5, 1, false), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn offset_window_adds_leading_zero() {
        // pages at 2 and 5 cover only six of seven slides
        assert_eq!(visible_nav_indexes(2, 7, 3, true), vec![0, 2, 5]);
        assert_eq!(visible_nav_indexes(1, 5, 3, true), vec![1, 4]);
        assert_eq!(visible_nav_indexes(1, 5, 3, false), vec![0, 1, 2]);
    }

    #[test]
    fn non_loop_clamps_last_page() {
        assert_eq!(visible_nav_indexes(0, 5, 2, false), vec![0, 2, 3]);
    }

    #[test]
    fn visibility_diff_reports_old_and_new() {
        let mut nav = NavState::new(false);
        let first = nav.update_visibility(0, 6, 3, true).unwrap();
        assert!(first.hide.is_empty());
        assert_eq!(first.show, vec![0, 3]);
        assert!(nav.update_visibility(3, 6, 3, true).is_none());
        let diff = nav.update_visibility(1, 6, 3, true).unwrap();
        assert_eq!(diff.hide, vec![0, 3]);
        assert_eq!(diff.show, vec![1, 4]);
    }

    #[test]
    fn custom_nav_items_are_never_hidden() {
        let mut nav = NavState::new(true);
        assert!(nav.update_visibility(1, 6, 3, true).is_none());
        assert_eq!(nav.key_action(5, Key::Right, 6), NavKeyAction::Ignore);
        assert_eq!(nav.key_action(2, Key::Right, 6), NavKeyAction::Focus(3));
    }

    #[test]
    fn clicked_dot_wins_once() {
        let mut nav = NavState::new(false);
        nav.set_clicked(4);
        assert_eq!(nav.update_current(3), Some((0, 4)));
        assert_eq!(nav.update_current(3), Some((4, 3)));
        assert_eq!(nav.update_current(3), None);
    }

    #[test]
    fn keyboard_moves_between_visible_dots() {
        let mut nav = NavState::new(false);
        nav.update_visibility(0, 6, 2, true);
        assert_eq!(nav.visible(), &[0, 2, 4]);
        assert_eq!(nav.key_action(2, Key::Left, 6), NavKeyAction::Focus(0));
        assert_eq!(nav.key_action(2, Key::End, 6), NavKeyAction::Focus(4));
        assert_eq!(nav.key_action(0, Key::Home, 6), NavKeyAction::Ignore);
        assert_eq!(nav.key_action(4, Key::Space, 6), NavKeyAction::Activate(4));
        assert_eq!(nav.key_action(3, Key::Right, 6), NavKeyAction::Ignore);
    }

    #[test]
    fn controls_disable_at_bounds() {
        let mut controls = ControlsState::default();
        assert_eq!(
            controls.update(0, 0, 4, false, false),
            vec![(Control::Prev, true)]
        );
        assert_eq!(
            controls.update(4, 0, 4, false, false),
            vec![(Control::Prev, false), (Control::Next, true)]
        );
        assert!(controls.update(4, 0, 4, false, true).contains(&(Control::Next, false)));
        assert!(controls.update(0, 0, 4, true, false).is_empty());
    }
}
