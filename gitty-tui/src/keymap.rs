use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gitty_core::{action::Action, flow::KeyContext, menu::entry_for_shortcut};

/// Resolve a key event into an Action for whatever currently has focus
pub fn resolve_action(key: KeyEvent, context: &KeyContext) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match *context {
        KeyContext::Menu => resolve_menu_key(key.code, ctrl),
        KeyContext::Loading => is_quit_key(key.code, ctrl).then_some(Action::Quit),
        KeyContext::Busy => None,
        KeyContext::TextInput { multiline, toggle } => {
            resolve_text_key(key, ctrl, multiline, toggle)
        }
        KeyContext::Confirm { editable } => resolve_confirm_key(key.code, ctrl, editable),
        KeyContext::Acknowledge => match key.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
    }
}

fn is_quit_key(code: KeyCode, ctrl: bool) -> bool {
    matches!(code, KeyCode::Char('q')) || (ctrl && code == KeyCode::Char('c'))
}

fn resolve_menu_key(code: KeyCode, ctrl: bool) -> Option<Action> {
    if is_quit_key(code, ctrl) {
        return Some(Action::Quit);
    }
    if ctrl {
        return None;
    }
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveSelection(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveSelection(1)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
        KeyCode::Char(c) => entry_for_shortcut(c).map(|entry| Action::Trigger(entry.action)),
        _ => None,
    }
}

fn resolve_text_key(key: KeyEvent, ctrl: bool, multiline: bool, toggle: bool) -> Option<Action> {
    if ctrl {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Cancel),
            KeyCode::Char('w') => Some(Action::DeleteWord),
            KeyCode::Char('a') => Some(Action::CursorStart),
            KeyCode::Char('e') => Some(Action::CursorEnd),
            _ => None,
        };
    }

    if toggle && matches!(key.code, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
        return Some(Action::Toggle);
    }

    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter if multiline && key.modifiers.contains(KeyModifiers::ALT) => {
            Some(Action::InsertNewline)
        }
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorStart),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Char(c) if !toggle => Some(Action::InsertChar(c)),
        _ => None,
    }
}

fn resolve_confirm_key(code: KeyCode, ctrl: bool, editable: bool) -> Option<Action> {
    if ctrl {
        return (code == KeyCode::Char('c')).then_some(Action::Cancel);
    }
    match code {
        KeyCode::Char('y' | 'Y') => Some(Action::Confirm),
        // Plain confirmations (reset, rollback, release) default to "no"
        KeyCode::Enter if editable => Some(Action::Confirm),
        KeyCode::Enter => Some(Action::Decline),
        KeyCode::Char('n' | 'N') => Some(Action::Decline),
        KeyCode::Char('e' | 'E') if editable => Some(Action::Edit),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}
