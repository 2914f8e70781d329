use serde::{Deserialize, Serialize};

/// Raw input a host forwards to the map, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Primary button pressed at a position
    PointerDown { x: i64, y: i64 },
    /// Pointer moved to a position
    PointerMove { x: i64, y: i64 },
    /// Primary button released
    PointerUp,
    /// Already-accumulated drag delta
    Drag { dx: i64, dy: i64 },
    /// Viewport/window resize
    Resize { width: i64, height: i64 },
    /// Zoom by whole levels; positive zooms in
    Zoom { delta: i32 },
}

impl InputEvent {
    /// Maps a vertical wheel delta to a one-level zoom.
    ///
    /// Only the sign matters, so pixel- and line-mode wheels behave alike:
    /// scrolling up (negative delta) zooms in.
    pub fn from_wheel(delta_y: f64) -> Option<InputEvent> {
        if delta_y < 0.0 {
            Some(InputEvent::Zoom { delta: 1 })
        } else if delta_y > 0.0 {
            Some(InputEvent::Zoom { delta: -1 })
        } else {
            None
        }
    }
}
