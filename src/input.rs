//! Key and mouse bindings: keyboard actions plus touch-style gestures.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    Quit,
    None,
}

/// Map a key event to a game action (a/d/r/s plus arrows).
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent {
        code, modifiers, ..
    } = key;
    if modifiers == KeyModifiers::CONTROL {
        return if code == KeyCode::Char('c') {
            Action::Quit
        } else {
            Action::None
        };
    }
    if !modifiers.is_empty() && modifiers != KeyModifiers::SHIFT {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Left | KeyCode::Char('a') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') => Action::MoveRight,
        KeyCode::Up | KeyCode::Char('r') => Action::Rotate,
        KeyCode::Down | KeyCode::Char('s') => Action::SoftDrop,
        _ => Action::None,
    }
}

/// Touch-style gesture decoded from a mouse event.
///
/// A tap in the bottom quarter of the screen starts a soft-drop hold;
/// elsewhere, taps in the left/right half nudge the piece and the scroll
/// wheel rotates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    TapLeft,
    TapRight,
    Rotate,
    DropStart,
    DropEnd,
    None,
}

/// Map a mouse event to a gesture, given the terminal size in cells.
pub fn mouse_to_gesture(event: MouseEvent, term_cols: u16, term_rows: u16) -> Gesture {
    match event.kind {
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => Gesture::Rotate,
        MouseEventKind::Down(MouseButton::Left) => {
            if event.row >= term_rows.saturating_sub(term_rows / 4) {
                Gesture::DropStart
            } else if event.column < term_cols / 2 {
                Gesture::TapLeft
            } else {
                Gesture::TapRight
            }
        }
        MouseEventKind::Up(MouseButton::Left) => Gesture::DropEnd,
        _ => Gesture::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_to_action(key(KeyCode::Char('a'))), Action::MoveLeft);
        assert_eq!(key_to_action(key(KeyCode::Right)), Action::MoveRight);
        assert_eq!(key_to_action(key(KeyCode::Char('r'))), Action::Rotate);
        assert_eq!(key_to_action(key(KeyCode::Down)), Action::SoftDrop);
        assert_eq!(key_to_action(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Char('x'))), Action::None);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl_c), Action::Quit);
    }

    #[test]
    fn test_tap_halves_and_drop_region() {
        let down = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(mouse_to_gesture(mouse(down, 10, 5), 80, 24), Gesture::TapLeft);
        assert_eq!(mouse_to_gesture(mouse(down, 60, 5), 80, 24), Gesture::TapRight);
        // Bottom quarter is the soft-drop region regardless of column.
        assert_eq!(mouse_to_gesture(mouse(down, 10, 23), 80, 24), Gesture::DropStart);
        let up = MouseEventKind::Up(MouseButton::Left);
        assert_eq!(mouse_to_gesture(mouse(up, 10, 23), 80, 24), Gesture::DropEnd);
    }

    #[test]
    fn test_wheel_rotates() {
        assert_eq!(
            mouse_to_gesture(mouse(MouseEventKind::ScrollUp, 0, 0), 80, 24),
            Gesture::Rotate
        );
        assert_eq!(
            mouse_to_gesture(mouse(MouseEventKind::ScrollDown, 40, 12), 80, 24),
            Gesture::Rotate
        );
    }
}
