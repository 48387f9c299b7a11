use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

/// What a key press asks the play loop to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    TogglePause,
    ToggleAutopilot,
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }
        if let Some(direction) = direction_key(key.code) {
            return KeyAction::GameAction(Action::Move(direction));
        }

        match key.code {
            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Char('i' | 'I') => KeyAction::ToggleAutopilot,
            KeyCode::Char('r' | 'R') => KeyAction::Restart,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrow keys and WASD
fn direction_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn moves(direction: Direction) -> KeyAction {
        KeyAction::GameAction(Action::Move(direction))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), moves(Direction::Up));
        assert_eq!(press(KeyCode::Down), moves(Direction::Down));
        assert_eq!(press(KeyCode::Left), moves(Direction::Left));
        assert_eq!(press(KeyCode::Right), moves(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(press(KeyCode::Char('w')), moves(Direction::Up));
        assert_eq!(press(KeyCode::Char('a')), moves(Direction::Left));
        assert_eq!(press(KeyCode::Char('s')), moves(Direction::Down));
        assert_eq!(press(KeyCode::Char('D')), moves(Direction::Right));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char('i')), KeyAction::ToggleAutopilot);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
        // Plain 'c' is not bound
        assert_eq!(press(KeyCode::Char('c')), KeyAction::None);
    }
}
