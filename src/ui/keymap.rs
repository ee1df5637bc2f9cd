use std::sync::LazyLock;

use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Action {
    Quit,
    NextItem,
    PreviousItem,
    ToggleChecked,
    Create,
    Rename,
    Duplicate,
    Delete,
    ToggleDetails,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct KeyBinding {
    pub(super) action: Action,
    pub(super) key_code: KeyCode,
    pub(super) help_token: &'static str,
}

const KEY_BINDINGS: [KeyBinding; 9] = [
    KeyBinding {
        action: Action::NextItem,
        key_code: KeyCode::Char('j'),
        help_token: "j/k-nav",
    },
    KeyBinding {
        action: Action::PreviousItem,
        key_code: KeyCode::Char('k'),
        help_token: "j/k-nav",
    },
    KeyBinding {
        action: Action::ToggleChecked,
        key_code: KeyCode::Char('e'),
        help_token: "e-done",
    },
    KeyBinding {
        action: Action::Create,
        key_code: KeyCode::Char('c'),
        help_token: "c-new",
    },
    KeyBinding {
        action: Action::Rename,
        key_code: KeyCode::Char('E'),
        help_token: "E-rename",
    },
    KeyBinding {
        action: Action::Duplicate,
        key_code: KeyCode::Char('d'),
        help_token: "d-duplicate",
    },
    KeyBinding {
        action: Action::Delete,
        key_code: KeyCode::Char('D'),
        help_token: "D-delete",
    },
    KeyBinding {
        action: Action::ToggleDetails,
        key_code: KeyCode::Char('o'),
        help_token: "o-details",
    },
    KeyBinding {
        action: Action::Quit,
        key_code: KeyCode::Char('q'),
        help_token: "q-quit",
    },
];

static HELP_TEXT: LazyLock<String> = LazyLock::new(|| {
    let mut tokens: Vec<&'static str> = Vec::new();
    for binding in KEY_BINDINGS {
        if !tokens.contains(&binding.help_token) {
            tokens.push(binding.help_token);
        }
    }
    tokens.join(", ")
});

pub(super) fn action_for_key(key_code: KeyCode) -> Option<Action> {
    KEY_BINDINGS
        .iter()
        .find(|binding| binding.key_code == key_code)
        .map(|binding| binding.action)
}

#[cfg(test)]
pub(super) fn key_for_action(action: Action) -> KeyCode {
    KEY_BINDINGS
        .iter()
        .find(|binding| binding.action == action)
        .map(|binding| binding.key_code)
        .expect("all actions must have a key binding")
}

pub(super) fn help_text() -> &'static str {
    HELP_TEXT.as_str()
}
