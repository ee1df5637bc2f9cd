mod event;
mod format;
mod keymap;
mod model;
mod update;
mod view;
mod widgets;

use std::sync::Arc;

use crossterm::event::{self as term_event, Event, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::DefaultTerminal;

use crate::error::Result;
use crate::manager::{Subscription, TodoManager};
use crate::time::SharedClock;
use crate::todo::TodoItem;

use model::AppModel;
use update::{Action, Command};

/// The TUI shell around a shared `TodoManager`.
///
/// Data flows one way: key presses become reducer actions, reducer commands
/// become store calls, and the store's notifications (drained at the start of
/// every loop turn) refresh the on-screen views from `unchecked()` and
/// `checked()`. The app never writes items back itself.
///
/// # Example
///
/// ```ignore
/// let manager = samples::build_manager(&settings, system_clock())?;
/// let mut app = App::new(manager, system_clock());
/// let mut terminal = ratatui::init();
/// let result = app.run(&mut terminal);
/// ratatui::restore();
/// ```
pub struct App {
    model: AppModel,
    manager: Arc<TodoManager>,
    subscription: Option<Subscription>,
    clock: SharedClock,
}

impl App {
    pub fn new(manager: Arc<TodoManager>, clock: SharedClock) -> Self {
        let subscription = manager.subscribe();
        let model = AppModel::new(manager.unchecked(), manager.checked());
        Self {
            model,
            manager,
            subscription: Some(subscription),
            clock,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.model.exit {
            self.sync_views();
            let now = self.clock.now();
            terminal.draw(|frame| view::draw(frame, &self.model, now))?;
            self.handle_events()?;
        }
        self.close();
        Ok(())
    }

    fn handle_events(&mut self) -> Result<()> {
        if let Event::Key(key_event) = term_event::read()?
            && key_event.kind == KeyEventKind::Press
        {
            self.handle_key_event(key_event);
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if let Some(action) = event::action_for_key_event(&self.model.mode, key_event) {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: Action) {
        if let Some(command) = update::update(&mut self.model, action) {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: Command) {
        debug!("executing {command:?}");
        let outcome = match command {
            Command::Add { title } => self.manager.add(title).map(Some),
            Command::Edit { id, patch } => self.manager.edit(id, patch).map(Some),
            Command::Remove { id } => self.manager.remove(id).map(|()| None),
            Command::Duplicate { id } => self.manager.duplicate(id).map(Some),
        };

        match outcome {
            Ok(Some(item)) => self.model.pending_focus = Some(item.id),
            Ok(None) => {}
            Err(err) => self.model.status = Some(err.to_string()),
        }
    }

    /// Drain delivered notifications and, if there were any, re-read the views.
    fn sync_views(&mut self) -> bool {
        let Some(subscription) = &self.subscription else {
            return false;
        };

        let mut changed = false;
        for notification in subscription.drain() {
            changed = true;
            debug!(
                "todos changed: {:?}",
                titles(notification.items.iter())
            );
        }

        if changed {
            let unchecked = self.manager.unchecked();
            let checked = self.manager.checked();
            debug!(
                "unchecked: {:?} checked: {:?}",
                titles(unchecked.iter()),
                titles(checked.iter())
            );
            self.model.refresh(unchecked, checked);
        }
        changed
    }

    fn close(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.manager.unsubscribe(subscription.id());
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.close();
    }
}

fn titles<'a>(items: impl Iterator<Item = &'a TodoItem>) -> Vec<&'a str> {
    items.map(|item| item.title.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;

    use crate::manager::TitlePolicy;
    use crate::samples::seed_samples;
    use crate::time::test_clock;
    use crate::todo::TodoId;
    use keymap::{Action as NormalAction, key_for_action};
    use model::Section;

    fn seeded_app() -> App {
        let manager = Arc::new(TodoManager::new(test_clock()));
        seed_samples(&manager).unwrap();
        App::new(manager, test_clock())
    }

    fn press(app: &mut App, action: NormalAction) {
        app.handle_key_event(KeyEvent::new(key_for_action(action), KeyModifiers::NONE));
    }

    fn type_and_submit(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    }

    fn view_titles(app: &App, section: Section) -> Vec<String> {
        app.model
            .views
            .section(section)
            .iter()
            .map(|item| item.title.clone())
            .collect()
    }

    #[test]
    fn starts_with_views_of_seeded_store() {
        let app = seeded_app();
        assert_eq!(view_titles(&app, Section::Unchecked), vec!["Sample 1"]);
        assert_eq!(view_titles(&app, Section::Checked), vec!["Sample 2"]);
    }

    #[test]
    fn views_change_only_after_notifications_are_drained() {
        let mut app = seeded_app();
        press(&mut app, NormalAction::ToggleChecked);

        // The store has applied the edit; the screen catches up on the next turn.
        assert_eq!(app.manager.checked().len(), 2);
        assert_eq!(view_titles(&app, Section::Unchecked), vec!["Sample 1"]);

        assert!(app.sync_views());
        assert!(view_titles(&app, Section::Unchecked).is_empty());
        assert_eq!(
            view_titles(&app, Section::Checked),
            vec!["Sample 1", "Sample 2"]
        );
        assert!(!app.sync_views());
    }

    #[test]
    fn created_item_gets_the_cursor() {
        let mut app = seeded_app();
        press(&mut app, NormalAction::Create);
        type_and_submit(&mut app, "Walk dog");
        app.sync_views();

        assert_eq!(
            view_titles(&app, Section::Unchecked),
            vec!["Sample 1", "Walk dog"]
        );
        assert_eq!(
            app.model.cursored().map(|item| item.title.as_str()),
            Some("Walk dog")
        );
    }

    #[test]
    fn duplicate_and_delete_round_trip_through_store() {
        let mut app = seeded_app();
        let original = app.model.cursored().unwrap().clone();

        press(&mut app, NormalAction::Duplicate);
        app.sync_views();
        let copy = app.model.cursored().unwrap().clone();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.title, original.title);

        press(&mut app, NormalAction::PreviousItem);
        assert_eq!(app.model.cursored().unwrap().id, original.id);
        press(&mut app, NormalAction::Delete);
        app.sync_views();

        let remaining = app.manager.items();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|item| item.id != original.id));
        assert_eq!(view_titles(&app, Section::Unchecked), vec!["Sample 1"]);
    }

    #[test]
    fn rename_edits_title_in_store() {
        let mut app = seeded_app();
        press(&mut app, NormalAction::Rename);
        for _ in 0.."Sample 1".len() {
            app.handle_key_event(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        }
        type_and_submit(&mut app, "Renamed");
        app.sync_views();

        let item = app.manager.get(TodoId::new(1)).unwrap();
        assert_eq!(item.title, "Renamed");
        assert!(item.updated_at.is_some());
        assert_eq!(view_titles(&app, Section::Unchecked), vec!["Renamed"]);
    }

    #[test]
    fn store_errors_surface_in_status_line() {
        let manager = Arc::new(TodoManager::with_policy(
            test_clock(),
            TitlePolicy::RejectEmpty,
        ));
        let mut app = App::new(manager, test_clock());

        app.execute(Command::Remove { id: TodoId::new(42) });
        assert_eq!(app.model.status.as_deref(), Some("todo not found: T42"));

        app.execute(Command::Add {
            title: " ".to_string(),
        });
        assert_eq!(
            app.model.status.as_deref(),
            Some("invalid argument: title must not be empty")
        );
        assert!(!app.sync_views());
    }

    fn submit_blank_title(policy: TitlePolicy) -> App {
        let manager = Arc::new(TodoManager::with_policy(test_clock(), policy));
        let mut app = App::new(manager, test_clock());
        press(&mut app, NormalAction::Create);
        type_and_submit(&mut app, " ");
        app.sync_views();
        app
    }

    #[test]
    fn blank_title_from_prompt_is_added_by_default() {
        let app = submit_blank_title(TitlePolicy::AcceptAny);
        assert_eq!(app.manager.len(), 1);
        assert_eq!(app.model.status, None);
        assert_eq!(view_titles(&app, Section::Unchecked), vec![""]);
    }

    #[test]
    fn blank_title_from_prompt_is_reported_when_rejected() {
        let app = submit_blank_title(TitlePolicy::RejectEmpty);
        assert!(app.manager.is_empty());
        assert_eq!(
            app.model.status.as_deref(),
            Some("invalid argument: title must not be empty")
        );
        assert!(view_titles(&app, Section::Unchecked).is_empty());
    }

    #[test]
    fn changes_made_elsewhere_show_up_on_next_turn() {
        let mut app = seeded_app();
        app.manager.add("from another owner").unwrap();
        app.sync_views();
        assert_eq!(
            view_titles(&app, Section::Unchecked),
            vec!["Sample 1", "from another owner"]
        );
    }

    #[test]
    fn close_releases_the_subscription() {
        let mut app = seeded_app();
        let manager = Arc::clone(&app.manager);
        let id = app.subscription.as_ref().unwrap().id();

        press(&mut app, NormalAction::Quit);
        assert!(app.model.exit);
        app.close();

        assert!(!manager.unsubscribe(id));
        manager.add("after close").unwrap();
        assert!(!app.sync_views());
    }
}
