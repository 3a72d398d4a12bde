use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    TogglePause,
    Start,
    Restart,
    Faster,
    Slower,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        Self::action_for(key.code)
    }

    /// Map a key to what it does, independent of modifiers and event kind
    pub fn action_for(code: KeyCode) -> KeyAction {
        match code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            KeyCode::Enter => KeyAction::Start,
            KeyCode::Esc => KeyAction::Quit,

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                // Movement - WASD
                'w' => KeyAction::Turn(Direction::Up),
                's' => KeyAction::Turn(Direction::Down),
                'a' => KeyAction::Turn(Direction::Left),
                'd' => KeyAction::Turn(Direction::Right),

                // Controls
                ' ' | 'p' => KeyAction::TogglePause,
                'r' => KeyAction::Restart,
                'q' => KeyAction::Quit,
                '+' | '=' => KeyAction::Faster,
                '-' | '_' => KeyAction::Slower,
                _ => KeyAction::None,
            },

            _ => KeyAction::None,
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

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), KeyAction::Turn(Direction::Up));
        assert_eq!(press(KeyCode::Down), KeyAction::Turn(Direction::Down));
        assert_eq!(press(KeyCode::Left), KeyAction::Turn(Direction::Left));
        assert_eq!(press(KeyCode::Right), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(press(KeyCode::Char('w')), KeyAction::Turn(Direction::Up));
        assert_eq!(press(KeyCode::Char('a')), KeyAction::Turn(Direction::Left));
        assert_eq!(press(KeyCode::Char('s')), KeyAction::Turn(Direction::Down));
        assert_eq!(press(KeyCode::Char('d')), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::Turn(Direction::Up)
        );
        assert_eq!(press(KeyCode::Char('D')), KeyAction::Turn(Direction::Right));
    }

    #[test]
    fn test_pause_keys() {
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char('p')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Char('P')), KeyAction::TogglePause);
    }

    #[test]
    fn test_start_and_restart_keys() {
        assert_eq!(press(KeyCode::Enter), KeyAction::Start);
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
    }

    #[test]
    fn test_speed_keys() {
        assert_eq!(press(KeyCode::Char('+')), KeyAction::Faster);
        assert_eq!(press(KeyCode::Char('=')), KeyAction::Faster);
        assert_eq!(press(KeyCode::Char('-')), KeyAction::Slower);
        assert_eq!(press(KeyCode::Char('_')), KeyAction::Slower);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('Q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);

        // Plain 'c' does nothing
        assert_eq!(press(KeyCode::Char('c')), KeyAction::None);
    }
}
