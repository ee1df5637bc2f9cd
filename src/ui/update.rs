//! Pure state transitions for the TUI.
//!
//! `update` never touches the store. Anything that would change a todo comes
//! back as a `Command`, which the runtime hands to the `TodoManager`; the
//! views only change when the store's notification is drained on the next
//! loop turn.

use super::keymap::Action as NormalAction;
use super::model::{AppMode, AppModel, PromptAction, PromptOverlay};
use crate::todo::{TodoId, TodoPatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Action {
    Normal(NormalAction),
    PromptSubmit,
    PromptCancel,
    PromptInput(char),
    PromptBackspace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Command {
    Add { title: String },
    Edit { id: TodoId, patch: TodoPatch },
    Remove { id: TodoId },
    Duplicate { id: TodoId },
}

pub(super) fn update(model: &mut AppModel, action: Action) -> Option<Command> {
    model.status = None;
    match action {
        Action::Normal(action) => update_normal_action(model, action),
        Action::PromptSubmit => submit_prompt(model),
        Action::PromptCancel => {
            model.mode = AppMode::Normal;
            None
        }
        Action::PromptInput(c) => {
            if let AppMode::Prompt(overlay) = &mut model.mode {
                overlay.buffer.push(c);
            }
            None
        }
        Action::PromptBackspace => {
            if let AppMode::Prompt(overlay) = &mut model.mode {
                overlay.buffer.pop();
            }
            None
        }
    }
}

fn update_normal_action(model: &mut AppModel, action: NormalAction) -> Option<Command> {
    match action {
        NormalAction::Quit => {
            model.exit = true;
            None
        }
        NormalAction::NextItem => {
            model
                .ui_state
                .select_next(model.views.unchecked_count(), model.views.checked_count());
            None
        }
        NormalAction::PreviousItem => {
            model
                .ui_state
                .select_previous(model.views.unchecked_count(), model.views.checked_count());
            None
        }
        NormalAction::ToggleChecked => model.cursored().map(|item| Command::Edit {
            id: item.id,
            patch: TodoPatch::checked(!item.checked),
        }),
        NormalAction::Create => {
            open_prompt(model, "New todo: ", String::new(), PromptAction::Create);
            None
        }
        NormalAction::Rename => {
            if let Some((id, title)) = model.cursored().map(|item| (item.id, item.title.clone())) {
                open_prompt(model, "Rename: ", title, PromptAction::Rename(id));
            }
            None
        }
        NormalAction::Duplicate => model
            .cursored()
            .map(|item| Command::Duplicate { id: item.id }),
        NormalAction::Delete => model.cursored().map(|item| Command::Remove { id: item.id }),
        NormalAction::ToggleDetails => {
            if let Some(id) = model.cursored().map(|item| item.id)
                && !model.details.remove(&id)
            {
                model.details.insert(id);
            }
            None
        }
    }
}

fn open_prompt(model: &mut AppModel, message: &str, buffer: String, action: PromptAction) {
    model.mode = AppMode::Prompt(PromptOverlay {
        message: message.to_string(),
        buffer,
        action,
    });
}

fn submit_prompt(model: &mut AppModel) -> Option<Command> {
    let AppMode::Prompt(overlay) = std::mem::replace(&mut model.mode, AppMode::Normal) else {
        return None;
    };

    // Blank titles still go to the store; its title policy decides.
    let title = overlay.buffer.trim();
    match overlay.action {
        PromptAction::Create => Some(Command::Add {
            title: title.to_string(),
        }),
        PromptAction::Rename(id) => Some(Command::Edit {
            id,
            patch: TodoPatch::title(title),
        }),
    }
}
