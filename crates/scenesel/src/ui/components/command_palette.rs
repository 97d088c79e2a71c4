//! Command palette component for quick actions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Interactive state backing the command palette overlay.
#[derive(Debug, Default, Clone)]
pub struct CommandPaletteState {
    visible: bool,
    input: String,
}

impl CommandPaletteState {
    /// Reveal the palette with an empty input buffer.
    pub fn open(&mut self) {
        self.visible = true;
        self.input.clear();
    }

    /// Hide the palette.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Whether the palette is currently displayed.
    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Access the current input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Consume the current input, leaving the buffer empty.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    /// Append a character to the buffer.
    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Remove the most recently appended character if present.
    pub fn pop_char(&mut self) {
        self.input.pop();
    }
}

/// Visual component that renders the command palette overlay.
#[derive(Debug, Default)]
pub struct CommandPalette;

impl CommandPalette {
    /// Draw the palette if it is visible.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &CommandPaletteState) {
        if !state.is_open() {
            return;
        }

        let width = area.width.saturating_sub(10).min(72);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height.saturating_sub(6),
            width,
            height: 5,
        };

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title("Command Palette")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(block.clone(), popup);

        let inner = block.inner(popup);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);

        let prompt = Paragraph::new(format!(":{}", state.input()))
            .style(Style::default().fg(Color::White))
            .block(Block::default());
        frame.render_widget(prompt, layout[0]);

        let verbs = Paragraph::new(Line::from(
            "select-by-name · select <f> · add <f> · remove <f> · clear · help",
        ))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(verbs, layout[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_buffer_edits() {
        let mut state = CommandPaletteState::default();
        state.open();
        state.push_char('a');
        state.push_char('d');
        state.push_char('d');
        state.pop_char();
        assert_eq!(state.input(), "ad");

        let taken = state.take_input();
        assert_eq!(taken, "ad");
        assert_eq!(state.input(), "");
    }

    #[test]
    fn reopening_clears_input() {
        let mut state = CommandPaletteState::default();
        state.open();
        state.push_char('x');
        state.close();
        state.open();
        assert_eq!(state.input(), "");
    }
}
