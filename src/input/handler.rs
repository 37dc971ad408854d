use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Direction, InputEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(InputEvent),
    Quit,
    None,
}

/// Translates terminal key events into game input.
///
/// Terminals only report key releases when the keyboard enhancement
/// protocol is active. Without it, Space toggles the boost instead.
pub struct InputHandler {
    reports_release: bool,
}

impl InputHandler {
    pub fn new(reports_release: bool) -> Self {
        Self { reports_release }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if key.code == KeyCode::Char(' ') {
            return self.handle_boost(key.kind);
        }

        if key.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Game(Direction::Up.into()),
            KeyCode::Down => KeyAction::Game(Direction::Down.into()),
            KeyCode::Left => KeyAction::Game(Direction::Left.into()),
            KeyCode::Right => KeyAction::Game(Direction::Right.into()),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Game(Direction::Up.into()),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Game(Direction::Down.into()),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Game(Direction::Left.into()),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Game(Direction::Right.into()),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    fn handle_boost(&self, kind: KeyEventKind) -> KeyAction {
        if self.reports_release {
            return match kind {
                KeyEventKind::Press => KeyAction::Game(InputEvent::BoostPressed),
                KeyEventKind::Release => KeyAction::Game(InputEvent::BoostReleased),
                KeyEventKind::Repeat => KeyAction::None,
            };
        }

        match kind {
            KeyEventKind::Press => KeyAction::Game(InputEvent::BoostToggled),
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Controls;
    use crossterm::event::KeyEventState;
    use std::time::Duration;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind_and_state(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        )
    }

    fn steer(dir: Direction) -> KeyAction {
        KeyAction::Game(InputEvent::DirectionChange(dir))
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::default();

        assert_eq!(handler.handle_key_event(press(KeyCode::Up)), steer(Direction::Up));
        assert_eq!(handler.handle_key_event(press(KeyCode::Down)), steer(Direction::Down));
        assert_eq!(handler.handle_key_event(press(KeyCode::Left)), steer(Direction::Left));
        assert_eq!(handler.handle_key_event(press(KeyCode::Right)), steer(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::default();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('w'))), steer(Direction::Up));
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('a'))), steer(Direction::Left));
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('s'))), steer(Direction::Down));
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('d'))), steer(Direction::Right));

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(w_upper), steer(Direction::Up));
    }

    #[test]
    fn test_release_of_direction_ignored() {
        let handler = InputHandler::new(true);
        assert_eq!(handler.handle_key_event(release(KeyCode::Up)), KeyAction::None);
    }

    #[test]
    fn test_boost_with_release_events() {
        let handler = InputHandler::new(true);
        let space = KeyCode::Char(' ');

        assert_eq!(
            handler.handle_key_event(press(space)),
            KeyAction::Game(InputEvent::BoostPressed)
        );
        assert_eq!(
            handler.handle_key_event(release(space)),
            KeyAction::Game(InputEvent::BoostReleased)
        );
    }

    #[test]
    fn test_boost_toggle_without_release_events() {
        let handler = InputHandler::new(false);
        let space = KeyCode::Char(' ');

        assert_eq!(
            handler.handle_key_event(press(space)),
            KeyAction::Game(InputEvent::BoostToggled)
        );
        assert_eq!(
            handler.handle_key_event(press(space)),
            KeyAction::Game(InputEvent::BoostToggled)
        );
    }

    #[test]
    fn test_toggle_boosts_again_after_reset() {
        let handler = InputHandler::new(false);
        let controls = Controls::new(Direction::Up, Duration::from_millis(150));
        let space = press(KeyCode::Char(' '));

        let hit_space = || {
            if let KeyAction::Game(event) = handler.handle_key_event(space) {
                controls.apply(event);
            }
        };

        hit_space();
        assert_eq!(controls.tick_interval(), Duration::from_millis(75));

        controls.reset(Direction::Up, Duration::from_millis(150));
        hit_space();
        assert_eq!(controls.tick_interval(), Duration::from_millis(75));
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::default();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::default();
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::None);
    }
}
