/// Pointer-drag tracking shared by the hosts
use nalgebra::Point2;

/// Rotation produced by one pointer move, in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDelta {
    /// Turn about the Y axis, from horizontal movement
    pub yaw: f64,
    /// Turn about the X axis, from vertical movement
    pub pitch: f64,
}

/// Turns press/move/release pointer events into rotation deltas
#[derive(Debug, Clone)]
pub struct DragTracker {
    sensitivity: f64,
    last: Option<Point2<f64>>,
}

impl DragTracker {
    /// `sensitivity` is radians per pixel of pointer travel
    pub fn new(sensitivity: f64) -> Self {
        Self {
            sensitivity,
            last: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.last = Some(Point2::new(x, y));
    }

    pub fn release(&mut self) {
        self.last = None;
    }

    /// Pointer moved to `(x, y)`. Yields a delta only while pressed.
    pub fn move_to(&mut self, x: f64, y: f64) -> Option<DragDelta> {
        let last = self.last.as_mut()?;
        let current = Point2::new(x, y);
        let moved = current - *last;
        *last = current;
        Some(DragDelta {
            yaw: moved.x * self.sensitivity,
            pitch: moved.y * self.sensitivity,
        })
    }
}
