//! Stateless rendering layer for the TUI.
//!
//! Turns an `AppModel` into widgets: the "Not Completed" and "Completed"
//! lists, optional detail lines under an item, and a footer that shows the
//! prompt, the last store error, or the key help.

use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::config::DETAIL_INDENT;

use super::format::timestamp_with_age;
use super::keymap::help_text;
use super::model::{AppMode, AppModel, Section};
use super::widgets::PromptWidget;

pub(super) const UNCHECKED_TITLE: &str = "Not Completed";
pub(super) const CHECKED_TITLE: &str = "Completed";
pub(super) const EMPTY_PLACEHOLDER: &str = "Nothing here";

pub(super) fn draw(frame: &mut Frame, model: &AppModel, now: DateTime<Utc>) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(area);

    let main_area = chunks[0];
    let footer_area = chunks[1];

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_area);

    render_section(frame, sections[0], model, Section::Unchecked, now);
    render_section(frame, sections[1], model, Section::Checked, now);
    render_footer(frame, footer_area, model);
}

fn render_section(
    frame: &mut Frame,
    area: Rect,
    model: &AppModel,
    section: Section,
    now: DateTime<Utc>,
) {
    let title = match section {
        Section::Unchecked => UNCHECKED_TITLE,
        Section::Checked => CHECKED_TITLE,
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let items = model.views.section(section);

    if items.is_empty() {
        let placeholder = ListItem::new(Line::from(Span::styled(
            format!("  {EMPTY_PLACEHOLDER}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
        frame.render_widget(List::new(vec![placeholder]).block(block), area);
        return;
    }

    let list_items: Vec<ListItem> = (0..items.len())
        .map(|idx| {
            let mut text = display_text(model, section, idx, now);
            if section == Section::Checked {
                // Strike the title line only; details stay readable.
                if let Some(first) = text.lines.first_mut() {
                    for span in &mut first.spans {
                        span.style = span.style.add_modifier(Modifier::CROSSED_OUT);
                    }
                }
            }
            ListItem::new(text)
        })
        .collect();
    let list = List::new(list_items).block(block);

    if model.ui_state.current_section == section {
        let mut state = ListState::default();
        state.select(Some(model.ui_state.current_index()));
        frame.render_stateful_widget(list, area, &mut state);
    } else {
        frame.render_widget(list, area);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, model: &AppModel) {
    match (&model.mode, &model.status) {
        (AppMode::Prompt(prompt), _) => {
            frame.render_widget(PromptWidget::new(&prompt.message, &prompt.buffer), area);
        }
        (AppMode::Normal, Some(status)) => {
            let status_widget = Paragraph::new(status.as_str())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::TOP));
            frame.render_widget(status_widget, area);
        }
        (AppMode::Normal, None) => {
            let help_widget =
                Paragraph::new(help_text()).block(Block::default().borders(Borders::TOP));
            frame.render_widget(help_widget, area);
        }
    }
}

pub(super) fn display_text(
    model: &AppModel,
    section: Section,
    index: usize,
    now: DateTime<Utc>,
) -> Text<'_> {
    let Some(todo) = model.views.get(section, index) else {
        return Text::default();
    };
    let is_cursored =
        section == model.ui_state.current_section && index == model.ui_state.current_index();

    let cursor_prefix = if is_cursored { "▶ " } else { "  " };
    let status_box = if todo.checked { "[✓] " } else { "[ ] " };

    let title_style = if is_cursored {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let first_line = Line::from(vec![
        Span::raw(cursor_prefix),
        Span::raw(status_box),
        Span::styled(todo.title.as_str(), title_style),
    ]);
    let mut lines = vec![first_line];

    if model.details.contains(&todo.id) {
        let detail_style = Style::default().fg(Color::Gray);
        lines.push(Line::from(vec![
            Span::raw(DETAIL_INDENT),
            Span::styled(
                format!("created {}", timestamp_with_age(todo.created_at, now)),
                detail_style,
            ),
        ]));
        if let Some(updated_at) = todo.updated_at {
            lines.push(Line::from(vec![
                Span::raw(DETAIL_INDENT),
                Span::styled(
                    format!("updated {}", timestamp_with_age(updated_at, now)),
                    detail_style,
                ),
            ]));
        }
    }

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::time::{Clock, test_fixed_clock};
    use crate::todo::{TodoId, TodoItem, TodoPatch};
    use crate::ui::model::{PromptAction, PromptOverlay};

    fn text_to_string(text: &Text) -> String {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn buffer_lines(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    fn todo(id: u64, title: &str) -> TodoItem {
        TodoItem::new(TodoId::new(id), title.to_string(), test_fixed_clock().now())
    }

    fn render(model: &AppModel, width: u16, height: u16, now: DateTime<Utc>) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, model, now)).unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    #[test]
    fn display_text_prefixes_cursor_and_check_box() {
        let mut done = todo(3, "c");
        done.checked = true;
        let model = AppModel::new(vec![todo(1, "a"), todo(2, "b")], vec![done]);
        let now = test_fixed_clock().now();

        assert_eq!(
            text_to_string(&display_text(&model, Section::Unchecked, 0, now)),
            "▶ [ ] a"
        );
        assert_eq!(
            text_to_string(&display_text(&model, Section::Unchecked, 1, now)),
            "  [ ] b"
        );
        assert_eq!(
            text_to_string(&display_text(&model, Section::Checked, 0, now)),
            "  [✓] c"
        );
    }

    #[test]
    fn details_show_created_and_updated_times() {
        let clock = test_fixed_clock();
        let mut item = todo(1, "task");
        clock.advance(Duration::minutes(30));
        TodoPatch::title("task").apply(&mut item, clock.now());
        clock.advance(Duration::hours(2));

        let mut model = AppModel::new(vec![item], Vec::new());
        model.details.insert(TodoId::new(1));

        assert_eq!(
            text_to_string(&display_text(&model, Section::Unchecked, 0, clock.now())),
            "▶ [ ] task\n      created 2025-01-01 00:00 (2h ago)\n      updated 2025-01-01 00:30 (2h ago)"
        );
    }

    #[test]
    fn details_omit_update_line_for_unedited_items() {
        let now = test_fixed_clock().now();
        let mut model = AppModel::new(vec![todo(1, "fresh")], Vec::new());
        model.details.insert(TodoId::new(1));
        assert_eq!(
            text_to_string(&display_text(&model, Section::Unchecked, 0, now)),
            "▶ [ ] fresh\n      created 2025-01-01 00:00 (0s ago)"
        );
    }

    #[test]
    fn draw_renders_both_sections_with_placeholders() {
        let model = AppModel::new(Vec::new(), Vec::new());
        let lines = render(&model, 80, 14, Utc::now());

        assert!(lines.iter().any(|l| l.contains(UNCHECKED_TITLE)));
        assert!(lines.iter().any(|l| l.contains(CHECKED_TITLE)));
        assert_eq!(
            lines.iter().filter(|l| l.contains(EMPTY_PLACEHOLDER)).count(),
            2
        );
    }

    #[test]
    fn draw_renders_items_in_their_sections() {
        let mut done = todo(2, "Sample 2");
        done.checked = true;
        let model = AppModel::new(vec![todo(1, "Sample 1")], vec![done]);
        let lines = render(&model, 60, 14, Utc::now());

        let unchecked_row = lines.iter().position(|l| l.contains("[ ] Sample 1")).unwrap();
        let checked_row = lines.iter().position(|l| l.contains("[✓] Sample 2")).unwrap();
        let checked_header = lines.iter().position(|l| l.contains(CHECKED_TITLE)).unwrap();
        assert!(unchecked_row < checked_header);
        assert!(checked_header < checked_row);
    }

    #[test]
    fn draw_renders_help_footer_in_normal_mode() {
        let help = help_text();
        let width = (help.len() as u16).saturating_add(2);
        let model = AppModel::new(Vec::new(), Vec::new());
        let lines = render(&model, width, 10, Utc::now());
        assert_eq!(lines.last().unwrap().trim_end(), help);
    }

    #[test]
    fn draw_renders_status_instead_of_help() {
        let mut model = AppModel::new(Vec::new(), Vec::new());
        model.status = Some("invalid argument: title must not be empty".to_string());
        let lines = render(&model, 80, 10, Utc::now());
        assert_eq!(
            lines.last().unwrap().trim_end(),
            "invalid argument: title must not be empty"
        );
    }

    #[test]
    fn draw_renders_prompt_footer_in_prompt_mode() {
        let mut model = AppModel::new(Vec::new(), Vec::new());
        model.mode = AppMode::Prompt(PromptOverlay {
            message: "New todo: ".to_string(),
            buffer: "milk".to_string(),
            action: PromptAction::Create,
        });
        let lines = render(&model, 80, 10, Utc::now());
        assert!(lines.iter().any(|l| l.starts_with("New todo: milk")));
    }
}
