use blockfall_engine::{Command, SessionState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Input {
    Game(Command),
    Quit,
}

/// Maps a key press to a player action.
///
/// Only presses count; repeats and releases are dropped. Letter keys match in
/// either case. Space depends on the state: hard drop while playing, restart
/// after game over.
pub(super) fn map_key(event: &KeyEvent, state: SessionState) -> Option<Input> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let is_playing = state.is_playing();
    let code = match event.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        code => code,
    };

    let command = match code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Input::Quit);
        }
        KeyCode::Esc => return Some(Input::Quit),
        KeyCode::Left | KeyCode::Char('a') => Command::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') => Command::MoveRight,
        KeyCode::Down | KeyCode::Char('s') => Command::SoftDrop,
        KeyCode::Up | KeyCode::Char('w') => Command::Rotate,
        KeyCode::Char(' ') if is_playing => Command::HardDrop,
        KeyCode::Char(' ') => Command::Restart,
        KeyCode::Char('p') => Command::ToggleMute,
        KeyCode::Char('o') => Command::NextTrack,
        _ => return None,
    };
    Some(Input::Game(command))
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    const PLAYING: SessionState = SessionState::Playing;
    const GAME_OVER: SessionState = SessionState::GameOver;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn game(command: Command) -> Option<Input> {
        Some(Input::Game(command))
    }

    #[test]
    fn test_arrow_and_letter_keys() {
        let cases = [
            (KeyCode::Left, Command::MoveLeft),
            (KeyCode::Char('a'), Command::MoveLeft),
            (KeyCode::Right, Command::MoveRight),
            (KeyCode::Char('d'), Command::MoveRight),
            (KeyCode::Down, Command::SoftDrop),
            (KeyCode::Char('s'), Command::SoftDrop),
            (KeyCode::Up, Command::Rotate),
            (KeyCode::Char('w'), Command::Rotate),
            (KeyCode::Char('p'), Command::ToggleMute),
            (KeyCode::Char('o'), Command::NextTrack),
        ];
        for (code, command) in cases {
            assert_eq!(map_key(&press(code), PLAYING), game(command), "{code:?}");
        }
    }

    #[test]
    fn test_letters_are_case_insensitive() {
        let event = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(map_key(&event, PLAYING), game(Command::MoveLeft));
        assert_eq!(
            map_key(&press(KeyCode::Char('P')), GAME_OVER),
            game(Command::ToggleMute)
        );
    }

    #[test]
    fn test_space_depends_on_state() {
        let space = press(KeyCode::Char(' '));
        assert_eq!(map_key(&space, PLAYING), game(Command::HardDrop));
        assert_eq!(map_key(&space, GAME_OVER), game(Command::Restart));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(&press(KeyCode::Esc), PLAYING), Some(Input::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c, GAME_OVER), Some(Input::Quit));
        assert_eq!(map_key(&press(KeyCode::Char('c')), PLAYING), None);
    }

    #[test]
    fn test_repeat_and_release_are_ignored() {
        for kind in [KeyEventKind::Repeat, KeyEventKind::Release] {
            let event = KeyEvent::new_with_kind_and_state(
                KeyCode::Left,
                KeyModifiers::NONE,
                kind,
                KeyEventState::NONE,
            );
            assert_eq!(map_key(&event, PLAYING), None);
        }
    }

    #[test]
    fn test_unbound_keys() {
        for code in [KeyCode::Enter, KeyCode::Char('q'), KeyCode::Tab] {
            assert_eq!(map_key(&press(code), PLAYING), None);
        }
    }
}
