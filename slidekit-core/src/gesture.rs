//! Touch and mouse-drag gesture math.

use serde::Serialize;

use crate::options::Axis;

/// Angular tolerance (degrees) for deciding a gesture follows an axis.
pub const DIRECTION_TOLERANCE_DEG: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerKind {
    Touch,
    Mouse,
}

/// Angle of a movement vector in degrees, `(-180, 180]`.
pub fn to_degree(dy: f64, dx: f64) -> f64 {
    dy.atan2(dx).to_degrees()
}

/// Axis a movement follows, or `None` inside the ambiguous diagonal band.
pub fn touch_direction(angle: f64, range: f64) -> Option<Axis> {
    let gap = (90.0 - angle.abs()).abs();
    if gap >= 90.0 - range {
        Some(Axis::Horizontal)
    } else if gap <= range {
        Some(Axis::Vertical)
    } else {
        None
    }
}

/// Whole-slide delta for a horizontal release, rounded toward zero.
pub fn horizontal_index_delta(dx: f64, items: usize, inner_width: f64) -> isize {
    if inner_width <= 0.0 || !inner_width.is_finite() {
        return 0;
    }
    (-dx * items as f64 / inner_width).trunc() as isize
}

/// One pointer interaction, from press to release.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession {
    pub kind: PointerKind,
    pub start_x: f64,
    pub start_y: f64,
    /// Container offset value when the gesture began.
    pub translate_init: f64,
    pub dx: f64,
    pub dy: f64,
    /// Movement matched the axis at least once; the release will settle.
    pub committed: bool,
}

impl GestureSession {
    pub fn begin(kind: PointerKind, x: f64, y: f64, translate_init: f64) -> Self {
        Self {
            kind,
            start_x: x,
            start_y: y,
            translate_init,
            dx: 0.0,
            dy: 0.0,
            committed: false,
        }
    }

    /// Record a move. Returns true when the move follows `axis` and should be
    /// intercepted (preview updated, native scrolling prevented).
    pub fn update(&mut self, x: f64, y: f64, axis: Axis) -> bool {
        self.dx = x - self.start_x;
        self.dy = y - self.start_y;
        let along = match axis {
            Axis::Horizontal => self.dx,
            Axis::Vertical => self.dy,
        };
        let follows = touch_direction(to_degree(self.dy, self.dx), DIRECTION_TOLERANCE_DEG)
            == Some(axis)
            && along != 0.0;
        if follows {
            self.committed = true;
        }
        follows
    }

    /// Final displacement at release.
    pub fn release(&mut self, x: f64, y: f64) -> (f64, f64) {
        self.dx = x - self.start_x;
        self.dy = y - self.start_y;
        (self.dx, self.dy)
    }
}

/// Whether a click should reach its default handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Prevent,
}

/// Swallows exactly one click after a mouse drag that moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickGuard {
    armed: bool,
}

impl ClickGuard {
    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn on_click(&mut self) -> Propagation {
        if std::mem::take(&mut self.armed) {
            Propagation::Prevent
        } else {
            Propagation::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_bands() {
        assert_eq!(touch_direction(0.0, 15.0), Some(Axis::Horizontal));
        assert_eq!(touch_direction(170.0, 15.0), Some(Axis::Horizontal));
        assert_eq!(touch_direction(-10.0, 15.0), Some(Axis::Horizontal));
        assert_eq!(touch_direction(90.0, 15.0), Some(Axis::Vertical));
        assert_eq!(touch_direction(-100.0, 15.0), Some(Axis::Vertical));
        assert_eq!(touch_direction(45.0, 15.0), None);
        assert_eq!(touch_direction(to_degree(10.0, 100.0), 15.0), Some(Axis::Horizontal));
    }

    #[test]
    fn short_drag_rounds_toward_zero() {
        assert_eq!(horizontal_index_delta(50.0, 5, 500.0), 0);
        assert_eq!(horizontal_index_delta(-50.0, 5, 500.0), 0);
        assert_eq!(horizontal_index_delta(-250.0, 5, 500.0), 2);
        assert_eq!(horizontal_index_delta(130.0, 5, 500.0), -1);
        assert_eq!(horizontal_index_delta(130.0, 5, 0.0), 0);
    }

    #[test]
    fn diagonal_move_is_not_intercepted() {
        let mut session = GestureSession::begin(PointerKind::Touch, 100.0, 100.0, 0.0);
        assert!(!session.update(130.0, 130.0, Axis::Horizontal));
        assert!(!session.committed);
        assert!(session.update(160.0, 105.0, Axis::Horizontal));
        assert!(session.committed);
        assert_eq!(session.release(180.0, 100.0), (80.0, 0.0));
    }

    #[test]
    fn vertical_axis_follows_dy() {
        let mut session = GestureSession::begin(PointerKind::Mouse, 0.0, 0.0, -200.0);
        assert!(!session.update(40.0, 2.0, Axis::Vertical));
        assert!(session.update(1.0, -60.0, Axis::Vertical));
    }

    #[test]
    fn click_guard_prevents_once() {
        let mut guard = ClickGuard::default();
        assert_eq!(guard.on_click(), Propagation::Continue);
        guard.arm();
        assert_eq!(guard.on_click(), Propagation::Prevent);
        assert_eq!(guard.on_click(), Propagation::Continue);
    }
}
