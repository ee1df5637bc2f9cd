use std::collections::HashSet;

use crate::todo::{TodoId, TodoItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Section {
    Unchecked,
    Checked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PromptAction {
    Create,
    Rename(TodoId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PromptOverlay {
    pub(super) message: String,
    pub(super) buffer: String,
    pub(super) action: PromptAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum AppMode {
    Normal,
    Prompt(PromptOverlay),
}

/// Read-only copies of the store's two derived views.
#[derive(Debug, Clone, Default)]
pub(super) struct TodoViews {
    pub(super) unchecked: Vec<TodoItem>,
    pub(super) checked: Vec<TodoItem>,
}

impl TodoViews {
    pub(super) fn new(unchecked: Vec<TodoItem>, checked: Vec<TodoItem>) -> Self {
        Self { unchecked, checked }
    }

    pub(super) fn get(&self, section: Section, index: usize) -> Option<&TodoItem> {
        self.section(section).get(index)
    }

    pub(super) fn section(&self, section: Section) -> &[TodoItem] {
        match section {
            Section::Unchecked => &self.unchecked,
            Section::Checked => &self.checked,
        }
    }

    pub(super) fn unchecked_count(&self) -> usize {
        self.unchecked.len()
    }

    pub(super) fn checked_count(&self) -> usize {
        self.checked.len()
    }

    pub(super) fn locate(&self, id: TodoId) -> Option<(Section, usize)> {
        [Section::Unchecked, Section::Checked]
            .into_iter()
            .find_map(|section| {
                self.section(section)
                    .iter()
                    .position(|item| item.id == id)
                    .map(|index| (section, index))
            })
    }

    pub(super) fn contains(&self, id: TodoId) -> bool {
        self.locate(id).is_some()
    }
}

#[derive(Debug, Clone)]
pub(super) struct UiState {
    pub(super) current_section: Section,
    pub(super) unchecked_index: usize,
    pub(super) checked_index: usize,
}

impl UiState {
    pub(super) fn new(unchecked_count: usize) -> Self {
        let current_section = if unchecked_count > 0 {
            Section::Unchecked
        } else {
            Section::Checked
        };

        Self {
            current_section,
            unchecked_index: 0,
            checked_index: 0,
        }
    }

    pub(super) fn select_next(&mut self, unchecked_count: usize, checked_count: usize) {
        self.navigate(true, unchecked_count, checked_count);
    }

    pub(super) fn select_previous(&mut self, unchecked_count: usize, checked_count: usize) {
        self.navigate(false, unchecked_count, checked_count);
    }

    /// Move one step, crossing into the other section at either end.
    fn navigate(&mut self, forward: bool, unchecked_count: usize, checked_count: usize) {
        let (current_count, current_idx, other_count) = match self.current_section {
            Section::Unchecked => (unchecked_count, self.unchecked_index, checked_count),
            Section::Checked => (checked_count, self.checked_index, unchecked_count),
        };

        if current_count == 0 {
            return;
        }

        let at_boundary = if forward {
            current_idx + 1 >= current_count
        } else {
            current_idx == 0
        };

        if at_boundary && other_count > 0 {
            let other_idx = if forward { 0 } else { other_count - 1 };
            let other_section = match self.current_section {
                Section::Unchecked => Section::Checked,
                Section::Checked => Section::Unchecked,
            };
            self.focus(other_section, other_idx);
        } else {
            let new_idx = if at_boundary {
                if forward { 0 } else { current_count - 1 }
            } else if forward {
                current_idx + 1
            } else {
                current_idx - 1
            };
            self.focus(self.current_section, new_idx);
        }
    }

    pub(super) fn focus(&mut self, section: Section, index: usize) {
        self.current_section = section;
        match section {
            Section::Unchecked => self.unchecked_index = index,
            Section::Checked => self.checked_index = index,
        }
    }

    pub(super) fn current_index(&self) -> usize {
        match self.current_section {
            Section::Unchecked => self.unchecked_index,
            Section::Checked => self.checked_index,
        }
    }

    /// Clamp indices after the views changed size.
    pub(super) fn adjust_indices(&mut self, unchecked_count: usize, checked_count: usize) {
        if unchecked_count == 0 {
            self.unchecked_index = 0;
            if self.current_section == Section::Unchecked && checked_count > 0 {
                self.current_section = Section::Checked;
                self.checked_index = self.checked_index.min(checked_count - 1);
            }
        } else if self.unchecked_index >= unchecked_count {
            self.unchecked_index = unchecked_count - 1;
        }

        if checked_count == 0 {
            self.checked_index = 0;
            if self.current_section == Section::Checked && unchecked_count > 0 {
                self.current_section = Section::Unchecked;
                self.unchecked_index = self.unchecked_index.min(unchecked_count - 1);
            }
        } else if self.checked_index >= checked_count {
            self.checked_index = checked_count - 1;
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct AppModel {
    pub(super) exit: bool,
    pub(super) views: TodoViews,
    pub(super) ui_state: UiState,
    pub(super) mode: AppMode,
    /// Items whose timestamps are shown under the title.
    pub(super) details: HashSet<TodoId>,
    /// Item to put the cursor on once it shows up in the views.
    pub(super) pending_focus: Option<TodoId>,
    /// Last error reported by the store, shown in the footer.
    pub(super) status: Option<String>,
}

impl AppModel {
    pub(super) fn new(unchecked: Vec<TodoItem>, checked: Vec<TodoItem>) -> Self {
        let views = TodoViews::new(unchecked, checked);
        let ui_state = UiState::new(views.unchecked_count());
        Self {
            exit: false,
            views,
            ui_state,
            mode: AppMode::Normal,
            details: HashSet::new(),
            pending_focus: None,
            status: None,
        }
    }

    pub(super) fn cursored(&self) -> Option<&TodoItem> {
        self.views
            .get(self.ui_state.current_section, self.ui_state.current_index())
    }

    /// Replace both views with fresh copies from the store.
    pub(super) fn refresh(&mut self, unchecked: Vec<TodoItem>, checked: Vec<TodoItem>) {
        self.views = TodoViews::new(unchecked, checked);
        let views = &self.views;
        self.details.retain(|id| views.contains(*id));

        if let Some(id) = self.pending_focus
            && let Some((section, index)) = self.views.locate(id)
        {
            self.ui_state.focus(section, index);
            self.pending_focus = None;
        }

        self.ui_state
            .adjust_indices(self.views.unchecked_count(), self.views.checked_count());
    }
}
