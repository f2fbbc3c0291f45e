use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::event::{InputEvent, Key};

/// Translates crossterm events into [`InputEvent`]s
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn translate(&self, event: &Event) -> Option<InputEvent> {
        match event {
            // Only process key press events, not release or repeat
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(*key),
            Event::Mouse(mouse) => self.handle_mouse_event(*mouse),
            Event::Resize(width, height) => Some(InputEvent::Resize {
                width: *width,
                height: *height,
            }),
            _ => None,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> Option<InputEvent> {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(InputEvent::Quit);
        }

        let key = match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Key::Up,
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Key::Down,
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
            KeyCode::Enter => Key::Enter,

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Some(InputEvent::Quit)
            }

            _ => return None,
        };

        Some(InputEvent::Key(key))
    }

    pub fn handle_mouse_event(&self, mouse: MouseEvent) -> Option<InputEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Click {
                column: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Option<InputEvent> {
        InputHandler::new().handle_key_event(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up, KeyModifiers::NONE), Some(InputEvent::Key(Key::Up)));
        assert_eq!(press(KeyCode::Down, KeyModifiers::NONE), Some(InputEvent::Key(Key::Down)));
        assert_eq!(press(KeyCode::Left, KeyModifiers::NONE), Some(InputEvent::Key(Key::Left)));
        assert_eq!(
            press(KeyCode::Right, KeyModifiers::NONE),
            Some(InputEvent::Key(Key::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(press(KeyCode::Char('w'), KeyModifiers::NONE), Some(InputEvent::Key(Key::Up)));
        assert_eq!(press(KeyCode::Char('a'), KeyModifiers::NONE), Some(InputEvent::Key(Key::Left)));
        assert_eq!(press(KeyCode::Char('s'), KeyModifiers::NONE), Some(InputEvent::Key(Key::Down)));
        assert_eq!(
            press(KeyCode::Char('D'), KeyModifiers::SHIFT),
            Some(InputEvent::Key(Key::Right))
        );
    }

    #[test]
    fn test_enter_key() {
        assert_eq!(press(KeyCode::Enter, KeyModifiers::NONE), Some(InputEvent::Key(Key::Enter)));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q'), KeyModifiers::NONE), Some(InputEvent::Quit));
        assert_eq!(press(KeyCode::Esc, KeyModifiers::NONE), Some(InputEvent::Quit));
        assert_eq!(press(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(InputEvent::Quit));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x'), KeyModifiers::NONE), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(InputHandler::new().translate(&Event::Key(key)), None);
    }

    #[test]
    fn test_left_click() {
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            InputHandler::new().translate(&Event::Mouse(click)),
            Some(InputEvent::Click { column: 12, row: 7 })
        );

        let right = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..click
        };
        assert_eq!(InputHandler::new().translate(&Event::Mouse(right)), None);
    }

    #[test]
    fn test_resize() {
        assert_eq!(
            InputHandler::new().translate(&Event::Resize(80, 30)),
            Some(InputEvent::Resize {
                width: 80,
                height: 30
            })
        );
    }
}
