use crate::input::events::InputEvent;

/// Viewport command produced from input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pan by a screen delta
    Pan { dx: i64, dy: i64 },
    /// Change the screen size
    Resize { width: i64, height: i64 },
    /// Zoom by whole levels
    Zoom { delta: i32 },
}

/// Turns pointer events into viewport commands.
///
/// Drag deltas are accumulated here: every pointer move while the button is
/// held pans by the distance travelled since the previous event.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    dragging: bool,
    last_position: Option<(i64, i64)>,
    pointer: (i64, i64),
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Last known pointer position
    pub fn pointer(&self) -> (i64, i64) {
        self.pointer
    }

    pub fn handle(&mut self, event: InputEvent) -> Option<Action> {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.dragging = true;
                self.last_position = Some((x, y));
                self.pointer = (x, y);
                None
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer = (x, y);
                if !self.dragging {
                    return None;
                }
                let (last_x, last_y) = self.last_position.replace((x, y))?;
                let (dx, dy) = (x - last_x, y - last_y);
                if dx == 0 && dy == 0 {
                    None
                } else {
                    Some(Action::Pan { dx, dy })
                }
            }
            InputEvent::PointerUp => {
                self.dragging = false;
                self.last_position = None;
                None
            }
            InputEvent::Drag { dx, dy } => Some(Action::Pan { dx, dy }),
            InputEvent::Resize { width, height } => Some(Action::Resize { width, height }),
            InputEvent::Zoom { delta } if delta != 0 => Some(Action::Zoom { delta }),
            InputEvent::Zoom { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_accumulates_deltas_between_moves() {
        let mut handler = InputHandler::new();

        assert_eq!(handler.handle(InputEvent::PointerMove { x: 5, y: 5 }), None);
        assert_eq!(handler.handle(InputEvent::PointerDown { x: 10, y: 20 }), None);
        assert!(handler.is_dragging());

        assert_eq!(
            handler.handle(InputEvent::PointerMove { x: 15, y: 18 }),
            Some(Action::Pan { dx: 5, dy: -2 })
        );
        assert_eq!(
            handler.handle(InputEvent::PointerMove { x: 12, y: 18 }),
            Some(Action::Pan { dx: -3, dy: 0 })
        );
        assert_eq!(handler.handle(InputEvent::PointerMove { x: 12, y: 18 }), None);

        assert_eq!(handler.handle(InputEvent::PointerUp), None);
        assert!(!handler.is_dragging());
        assert_eq!(handler.handle(InputEvent::PointerMove { x: 50, y: 50 }), None);
        assert_eq!(handler.pointer(), (50, 50));
    }

    #[test]
    fn test_passthrough_commands() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.handle(InputEvent::Drag { dx: 1, dy: 2 }),
            Some(Action::Pan { dx: 1, dy: 2 })
        );
        assert_eq!(
            handler.handle(InputEvent::Resize { width: 640, height: 480 }),
            Some(Action::Resize { width: 640, height: 480 })
        );
        assert_eq!(
            handler.handle(InputEvent::Zoom { delta: -1 }),
            Some(Action::Zoom { delta: -1 })
        );
        assert_eq!(handler.handle(InputEvent::Zoom { delta: 0 }), None);
    }
}
