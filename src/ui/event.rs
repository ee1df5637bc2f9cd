use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::keymap::action_for_key;
use super::model::AppMode;
use super::update::Action;

/// Translate a key press into a reducer action for the current mode.
pub(super) fn action_for_key_event(mode: &AppMode, key_event: KeyEvent) -> Option<Action> {
    match mode {
        AppMode::Prompt(_) => match key_event.code {
            KeyCode::Enter => Some(Action::PromptSubmit),
            KeyCode::Esc => Some(Action::PromptCancel),
            KeyCode::Backspace => Some(Action::PromptBackspace),
            KeyCode::Char(c) => {
                let modifiers = key_event.modifiers;
                if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT {
                    Some(Action::PromptInput(c))
                } else {
                    None
                }
            }
            _ => None,
        },
        AppMode::Normal => action_for_key(key_event.code).map(Action::Normal),
    }
}
