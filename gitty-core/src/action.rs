use crate::menu::MenuAction;

/// Every user interaction produces an Action. The UI never calls git directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Menu
    Quit,
    MoveSelection(i32),
    Select,
    Trigger(MenuAction),

    // Sub-flow control
    Submit,
    Cancel,
    Confirm,
    Decline,
    Edit,
    NextField,
    PrevField,
    Toggle,

    // Text editing
    InsertChar(char),
    InsertNewline,
    Backspace,
    DeleteWord,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,
}
