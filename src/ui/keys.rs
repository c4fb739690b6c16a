//! Key bindings: turn a key press into an `Action` for the current state

use crate::core::query::SortField;
use crate::core::state::{Action, AppState, Focus, Modal};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn action_for_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match &state.modal {
        Some(Modal::Form(_)) => return form_key(key),
        Some(Modal::DeleteConfirm(_)) => return confirm_key(key),
        None => {}
    }
    if state.page_jump.is_some() {
        return page_jump_key(key);
    }
    if state.row_menu.is_some() {
        return row_menu_key(key);
    }
    if state.filter_panel.is_some() {
        return filter_panel_key(key);
    }
    if state.focus == Focus::Search {
        return search_key(key);
    }
    browse_key(state, key)
}

fn form_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::Dismiss),
        KeyCode::Enter => Some(Action::SubmitForm),
        KeyCode::Tab | KeyCode::Down => Some(Action::FormFocus(true)),
        KeyCode::BackTab | KeyCode::Up => Some(Action::FormFocus(false)),
        KeyCode::Left => Some(Action::FormCycleRelation(false)),
        KeyCode::Right => Some(Action::FormCycleRelation(true)),
        KeyCode::Backspace => Some(Action::FormBackspace),
        KeyCode::Char(c) => Some(Action::FormInput(c)),
        _ => None,
    }
}

fn confirm_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::ConfirmDelete),
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::Dismiss),
        _ => None,
    }
}

fn row_menu_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::RowMenuMove(false)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::RowMenuMove(true)),
        KeyCode::Enter => Some(Action::ActivateRowMenu),
        KeyCode::Esc | KeyCode::Char('m') => Some(Action::Dismiss),
        _ => None,
    }
}

fn page_jump_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::SubmitPageJump),
        KeyCode::Esc => Some(Action::Dismiss),
        KeyCode::Backspace => Some(Action::PageJumpBackspace),
        KeyCode::Char(c) if c.is_ascii_digit() => Some(Action::PageJumpInput(c)),
        _ => None,
    }
}

fn filter_panel_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::FilterPanelMove(false)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::FilterPanelMove(true)),
        KeyCode::Enter => Some(Action::CloseFilterPanel),
        KeyCode::Char('c') => Some(Action::ClearFilterPanel),
        KeyCode::Esc | KeyCode::Char('f') => Some(Action::Dismiss),
        _ => None,
    }
}

fn search_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => Some(Action::BlurSearch),
        KeyCode::Backspace => Some(Action::SearchBackspace),
        KeyCode::Char(c) => Some(Action::SearchInput(c)),
        _ => None,
    }
}

fn browse_key(state: &AppState, key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => Action::Dismiss,
        KeyCode::Char('/') => Action::FocusSearch,
        KeyCode::Up | KeyCode::Char('k') => Action::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => Action::CursorDown,
        KeyCode::Left | KeyCode::Char('h') => Action::PrevPage,
        KeyCode::Right | KeyCode::Char('l') => Action::NextPage,
        KeyCode::Home => Action::FirstPage,
        KeyCode::End => Action::LastPage,
        KeyCode::Char('g') => Action::OpenPageJump,
        KeyCode::Char(c @ '1'..='5') => {
            let index = c.to_digit(10)? as usize - 1;
            Action::ToggleSort(*SortField::ALL.get(index)?)
        }
        KeyCode::Char('+') | KeyCode::Char('=') => Action::NextPageSize,
        KeyCode::Char('-') => Action::PrevPageSize,
        KeyCode::Char('f') => Action::OpenFilterPanel,
        KeyCode::Char('v') => Action::ToggleViewMode,
        KeyCode::Char('t') => Action::ToggleDarkMode,
        KeyCode::Char('n') => Action::OpenAddForm,
        KeyCode::Enter => Action::OpenDetailAtCursor,
        KeyCode::Char('m') => Action::OpenRowMenu,
        KeyCode::Char('e') => Action::OpenEditAtCursor,
        KeyCode::Char('d') => Action::OpenDeleteAtCursor,
        KeyCode::Char('x') => Action::ToggleSelectMode,
        KeyCode::Char(' ') if state.select_mode => Action::ToggleSelectedAtCursor,
        KeyCode::Char('a') if state.select_mode => Action::SelectAllVisible,
        _ => return None,
    };
    Some(action)
}
