use crate::background_tasks::spawn_fetch;
use crate::permissions::PromptAnswer;
use crate::sources::Sources;
use crossterm::event::{self, KeyCode};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::state::AppState;

/// Handles one key press. Returns `true` when the application should quit.
pub async fn handle_key_event(
    key: event::KeyEvent,
    state_arc: Arc<RwLock<AppState>>,
    sources: &Sources,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut state_guard = state_arc.write().await;

    // Global quit - works at any time
    if key.code == KeyCode::Char('q') {
        return Ok(true);
    }

    // An alert swallows the key that dismisses it
    if state_guard.alert.is_some() {
        state_guard.dismiss_alert();
        return Ok(false);
    }

    if state_guard.permission_prompt.is_some() {
        let answer = match key.code {
            KeyCode::Char('o') | KeyCode::Enter => Some(PromptAnswer::Positive),
            KeyCode::Char('c') | KeyCode::Esc => Some(PromptAnswer::Negative),
            KeyCode::Char('l') => Some(PromptAnswer::Neutral),
            _ => None,
        };
        if let Some(answer) = answer {
            state_guard.answer_prompt(answer);
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('s') => {
            drop(state_guard); // Release the lock before spawning
            spawn_fetch(state_arc.clone(), sources.sms.clone());
        }

        // Disabled while a mail fetch is in flight
        KeyCode::Char('e') => {
            if !state_guard.loading {
                drop(state_guard);
                spawn_fetch(state_arc.clone(), sources.mail.clone());
            }
        }

        KeyCode::Char('j') | KeyCode::Down => state_guard.move_down(),
        KeyCode::Char('k') | KeyCode::Up => state_guard.move_up(),

        _ => {}
    }
    Ok(false)
}
