//! Modal dialog collecting a select-by-name request.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::domain::errors::DomainError;
use crate::domain::model::SelectionRequest;

/// Which dialog field currently receives input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogField {
    #[default]
    Search,
    Add,
    Remove,
}

/// Interactive state backing the select-by-name dialog.
///
/// Opening resets every field, so each invocation starts from the documented
/// defaults: empty text, both checkboxes off.
#[derive(Debug, Default, Clone)]
pub struct NameDialogState {
    visible: bool,
    search: String,
    add: bool,
    remove: bool,
    field: DialogField,
}

impl NameDialogState {
    /// Reveal the dialog with fresh fields.
    pub fn open(&mut self) {
        self.visible = true;
        self.search.clear();
        self.add = false;
        self.remove = false;
        self.field = DialogField::Search;
    }

    /// Hide the dialog without applying anything.
    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn add(&self) -> bool {
        self.add
    }

    pub fn remove(&self) -> bool {
        self.remove
    }

    pub fn field(&self) -> DialogField {
        self.field
    }

    pub fn push_char(&mut self, ch: char) {
        if self.field == DialogField::Search {
            self.search.push(ch);
        }
    }

    pub fn pop_char(&mut self) {
        if self.field == DialogField::Search {
            self.search.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.field = match self.field {
            DialogField::Search => DialogField::Add,
            DialogField::Add => DialogField::Remove,
            DialogField::Remove => DialogField::Search,
        };
    }

    pub fn focus_previous(&mut self) {
        self.field = match self.field {
            DialogField::Search => DialogField::Remove,
            DialogField::Add => DialogField::Search,
            DialogField::Remove => DialogField::Add,
        };
    }

    /// Toggle the focused checkbox. The two boxes are mutually exclusive:
    /// turning one on turns the other off.
    pub fn toggle_focused(&mut self) {
        match self.field {
            DialogField::Search => {}
            DialogField::Add => {
                self.add = !self.add;
                if self.add {
                    self.remove = false;
                }
            }
            DialogField::Remove => {
                self.remove = !self.remove;
                if self.remove {
                    self.add = false;
                }
            }
        }
    }

    /// Build the request the dialog currently describes.
    pub fn request(&self) -> Result<SelectionRequest, DomainError> {
        SelectionRequest::from_flags(self.search.clone(), self.add, self.remove)
    }
}

/// Visual component that renders the dialog overlay.
#[derive(Debug, Default)]
pub struct NameDialog;

impl NameDialog {
    /// Draw the dialog if it is visible.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, state: &NameDialogState) {
        if !state.is_open() {
            return;
        }

        let width = area.width.saturating_sub(8).min(52);
        let height = 7;
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title("Select by Name")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(block.clone(), popup);

        let inner = block.inner(popup);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let search_label = field_style(state.field() == DialogField::Search);
        let search = Paragraph::new(Line::from(vec![
            Span::styled("Name: ", search_label),
            Span::raw(state.search().to_string()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]));
        frame.render_widget(search, layout[0]);

        let add = Paragraph::new(checkbox_line(
            "Add to selection",
            state.add(),
            state.field() == DialogField::Add,
        ));
        frame.render_widget(add, layout[1]);

        let remove = Paragraph::new(checkbox_line(
            "Remove from selection",
            state.remove(),
            state.field() == DialogField::Remove,
        ));
        frame.render_widget(remove, layout[2]);

        let hint = Paragraph::new("tab fields · space toggle · ↵ apply · esc cancel")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, layout[3]);
    }
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn checkbox_line(label: &str, checked: bool, focused: bool) -> Line<'static> {
    let marker = if checked { "[x]" } else { "[ ]" };
    Line::from(vec![
        Span::styled(format!("{marker} "), field_style(focused)),
        Span::styled(label.to_string(), field_style(focused)),
    ])
}
