use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

/// Single-line text input drawn over the footer.
///
/// When the input does not fit, the start of the buffer scrolls out of view so
/// the cursor stays visible.
#[derive(Debug, Clone)]
pub(super) struct PromptWidget {
    message: String,
    buffer: String,
}

impl PromptWidget {
    pub(super) fn new(message: &str, buffer: &str) -> Self {
        Self {
            message: message.to_string(),
            buffer: buffer.to_string(),
        }
    }

    fn visible_buffer(&self, width: usize) -> String {
        let message_len = self.message.chars().count();
        // One column is reserved for the cursor.
        let room = width.saturating_sub(message_len + 1);
        let len = self.buffer.chars().count();
        self.buffer.chars().skip(len.saturating_sub(room)).collect()
    }
}

impl Widget for PromptWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                let cell = &mut buf[(x, y)];
                cell.reset();
                cell.set_symbol(" ");
            }
        }

        let max_width = area.width as usize;
        let visible = self.visible_buffer(max_width);
        let message_style = Style::default().add_modifier(Modifier::BOLD);
        let cursor_style = Style::default().add_modifier(Modifier::REVERSED);

        let glyphs = self
            .message
            .chars()
            .map(|ch| (ch, message_style))
            .chain(visible.chars().map(|ch| (ch, Style::default())))
            .chain(std::iter::once((' ', cursor_style)))
            .take(max_width);

        let y = area.y;
        for (offset, (ch, style)) in glyphs.enumerate() {
            let cell = &mut buf[(area.x + offset as u16, y)];
            cell.set_symbol(ch.encode_utf8(&mut [0; 4]));
            cell.set_style(style);
        }
    }
}
