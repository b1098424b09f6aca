use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use slidemenu_core::{ActionKind, PointerPhase};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    OpenRow,
    CloseRow,
    Activate(ActionKind),
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if app.mode == Mode::Help {
        // Any key exits help
        return Action::ExitMode;
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Selection
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::MoveUp,

        // Reveal / hide the action surface
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenRow,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::OpenRow,
        (KeyCode::Left, KeyModifiers::NONE) => Action::OpenRow,
        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::CloseRow,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::CloseRow,
        (KeyCode::Right, KeyModifiers::NONE) => Action::CloseRow,
        (KeyCode::Esc, _) => Action::CloseRow,

        // Action buttons
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Activate(ActionKind::Read),
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::Activate(ActionKind::Top),
        (KeyCode::Char('d'), KeyModifiers::NONE) => Action::Activate(ActionKind::Delete),

        // Help
        (KeyCode::Char('?'), _) => Action::ToggleHelp,

        _ => Action::None,
    }
}

/// Map a mouse event kind onto a pointer phase
///
/// Only the primary button drives swipes.
pub fn pointer_phase(kind: MouseEventKind) -> Option<PointerPhase> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerPhase::Down),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerPhase::Move),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerPhase::Up),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use slidemenu_core::AppConfig;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_keys() {
        let app = App::new(AppConfig::default(), Theme::default());
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::MoveDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('o')), &app), Action::OpenRow);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app), Action::CloseRow);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('d')), &app),
            Action::Activate(ActionKind::Delete)
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &app), Action::None);
    }

    #[test]
    fn test_any_key_exits_help() {
        let mut app = App::new(AppConfig::default(), Theme::default());
        app.toggle_help();
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::ExitMode);
    }

    #[test]
    fn test_pointer_phase_mapping() {
        assert_eq!(pointer_phase(MouseEventKind::Down(MouseButton::Left)), Some(PointerPhase::Down));
        assert_eq!(pointer_phase(MouseEventKind::Drag(MouseButton::Left)), Some(PointerPhase::Move));
        assert_eq!(pointer_phase(MouseEventKind::Up(MouseButton::Left)), Some(PointerPhase::Up));
        assert_eq!(pointer_phase(MouseEventKind::Down(MouseButton::Right)), None);
        assert_eq!(pointer_phase(MouseEventKind::ScrollDown), None);
        assert_eq!(pointer_phase(MouseEventKind::Moved), None);
    }
}
