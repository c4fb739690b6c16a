//! Full-screen interactive contact browser

pub mod keys;
pub mod screen;
pub mod views;

use crate::core::state::{AppState, Effect};
use crate::utils::error::AppResult;
use crate::utils::interactive::{TerminalGuard, draw_frame, read_key, screen_size};
use std::io;

/// Run the session until the user quits, handing effects to `on_effect`.
/// Returns the final state.
pub fn run_session(mut state: AppState, mut on_effect: impl FnMut(Effect)) -> AppResult<AppState> {
    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    tracing::debug!(contacts = state.contacts.len(), "session started");

    while !state.should_quit {
        let (width, height) = screen_size();
        let frame = screen::render(&state, width, height);
        draw_frame(&mut stdout, &frame)?;

        let Some(key) = read_key()? else {
            continue;
        };
        if let Some(action) = keys::action_for_key(&state, key)
            && let Some(effect) = state.dispatch(action)
        {
            on_effect(effect);
        }
    }

    tracing::debug!(contacts = state.contacts.len(), "session ended");
    Ok(state)
}
