//! Keyboard mapping for the query screen.
//!
//! Translates a key press plus the current focus into an [`Action`]. Enter
//! in the input field and Enter/Space on the Search button both map to
//! [`Action::Submit`], so both go through the same submit path.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which element of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    SubmitButton,
    SourcesHeader,
    Card(usize),
}

/// Something the user asked the screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearInput,
    Submit,
    FocusNext,
    FocusPrev,
    FocusInput,
    ToggleSources,
    ToggleCard(usize),
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    DismissNotice,
    Quit,
    Noop,
}

pub fn map_key(key: KeyEvent, focus: Focus) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL)
        | (KeyCode::Char('q'), KeyModifiers::CONTROL) => return Action::Quit,
        (KeyCode::Tab, _) => return Action::FocusNext,
        (KeyCode::BackTab, _) => return Action::FocusPrev,
        (KeyCode::Esc, _) if focus == Focus::Input => return Action::DismissNotice,
        (KeyCode::Esc, _) => return Action::FocusInput,
        (KeyCode::Up, _) => return Action::ScrollUp,
        (KeyCode::Down, _) => return Action::ScrollDown,
        (KeyCode::PageUp, _) => return Action::PageUp,
        (KeyCode::PageDown, _) => return Action::PageDown,
        _ => {}
    }

    match focus {
        Focus::Input => map_input_key(key),
        Focus::SubmitButton => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Action::Submit,
            _ => Action::Noop,
        },
        Focus::SourcesHeader => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Action::ToggleSources,
            KeyCode::Char('j') => Action::ScrollDown,
            KeyCode::Char('k') => Action::ScrollUp,
            _ => Action::Noop,
        },
        Focus::Card(index) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Action::ToggleCard(index),
            KeyCode::Char('j') => Action::ScrollDown,
            KeyCode::Char('k') => Action::ScrollUp,
            _ => Action::Noop,
        },
    }
}

fn map_input_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ClearInput,
        (KeyCode::Char('a'), KeyModifiers::CONTROL) => Action::CursorHome,
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => Action::CursorEnd,
        (KeyCode::Char(c), m) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Action::Insert(c)
        }
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Delete, _) => Action::Delete,
        (KeyCode::Left, _) => Action::CursorLeft,
        (KeyCode::Right, _) => Action::CursorRight,
        (KeyCode::Home, _) => Action::CursorHome,
        (KeyCode::End, _) => Action::CursorEnd,
        _ => Action::Noop,
    }
}
