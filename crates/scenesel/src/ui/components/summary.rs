//! Selection summary component.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::app::scene::Scene;

/// Snapshot of selection statistics shown in the side panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSummary {
    pub total: usize,
    pub selected: Vec<SelectedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEntry {
    pub name: String,
    pub kind: &'static str,
}

impl SceneSummary {
    /// Capture the current selection state of a scene.
    pub fn from_scene(scene: &Scene) -> Self {
        let selected = scene
            .objects()
            .iter()
            .filter(|object| object.selected)
            .map(|object| SelectedEntry {
                name: object.name.clone(),
                kind: object.kind.label(),
            })
            .collect();
        Self {
            total: scene.objects().len(),
            selected,
        }
    }
}

/// Displays aggregated selection statistics for the active scene.
#[derive(Debug, Default)]
pub struct Summary {
    latest: Option<SceneSummary>,
    limit: usize,
}

impl Summary {
    pub fn new(limit: usize) -> Self {
        Self {
            latest: None,
            limit,
        }
    }

    /// Replace the stored summary with fresh data from the scene.
    pub fn update(&mut self, summary: SceneSummary) {
        self.latest = Some(summary);
    }

    /// Clear the rendered state when the selection is emptied.
    pub fn clear(&mut self) {
        self.latest = None;
    }

    /// Render the summary inside the provided area.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Selection Summary")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), area);

        let inner = block.inner(area);
        match &self.latest {
            Some(summary) => self.render_summary(frame, inner, summary),
            None => {
                let placeholder = Paragraph::new("Nothing selected")
                    .wrap(Wrap { trim: true })
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(placeholder, inner);
            }
        }
    }

    fn render_summary(&self, frame: &mut Frame<'_>, area: Rect, summary: &SceneSummary) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(area);

        let header = Paragraph::new(header_lines(summary)).wrap(Wrap { trim: true });
        frame.render_widget(header, layout[0]);

        let items = build_item_list(&summary.selected, self.limit);
        let list = List::new(items).block(Block::default());
        frame.render_widget(list, layout[1]);
    }
}

fn header_lines(summary: &SceneSummary) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled("Objects", Style::default().fg(Color::Gray)),
            Span::raw(": "),
            Span::raw(format!("{}", summary.total)),
        ]),
        Line::from(vec![
            Span::styled("Selected", Style::default().fg(Color::Gray)),
            Span::raw(": "),
            Span::styled(
                format!("{}", summary.selected.len()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ]
}

fn build_item_list(entries: &[SelectedEntry], limit: usize) -> Vec<ListItem<'static>> {
    let mut items: Vec<ListItem<'static>> = entries
        .iter()
        .take(limit)
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::raw(entry.name.clone()),
                Span::raw(" "),
                Span::styled(
                    format!("({})", entry.kind),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    if entries.len() > limit {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("… +{} more", entries.len() - limit),
            Style::default().fg(Color::DarkGray),
        ))));
    }

    items
}
