//! Outliner component listing the scene's objects.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::app::scene::Scene;

/// Cursor state for the outliner list.
#[derive(Debug, Default, Clone)]
pub struct OutlinerState {
    cursor: usize,
    len: usize,
}

impl OutlinerState {
    /// Construct state sized to a scene.
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            cursor: 0,
            len: scene.objects().len(),
        }
    }

    /// Re-clamp after the underlying scene changed.
    pub fn sync(&mut self, scene: &Scene) {
        self.len = scene.objects().len();
        if self.cursor >= self.len {
            self.cursor = self.len.saturating_sub(1);
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.len {
            self.cursor += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }
}

/// Ratatui component responsible for rendering the object list.
#[derive(Debug, Default)]
pub struct Outliner;

impl Outliner {
    /// Render the outliner to the provided frame.
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        scene: &Scene,
        state: &OutlinerState,
        has_focus: bool,
        show_kinds: bool,
    ) {
        let title = format!(
            "Scene · {} · {}/{} selected",
            scene.name(),
            scene.selected_count(),
            scene.objects().len()
        );
        let block = Block::default().borders(Borders::ALL).title(title);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        if scene.objects().is_empty() {
            let placeholder = Paragraph::new("Scene has no objects").style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            frame.render_widget(placeholder, inner);
            return;
        }

        let mut items = Vec::with_capacity(scene.objects().len());
        for (index, object) in scene.objects().iter().enumerate() {
            let mut spans = Vec::new();

            if object.selected {
                spans.push(Span::styled("● ", Style::default().fg(Color::Cyan)));
            } else {
                spans.push(Span::styled("· ", Style::default().fg(Color::DarkGray)));
            }

            let mut name_style = Style::default();
            if object.selected {
                name_style = name_style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(object.name.clone(), name_style));

            if show_kinds {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!("({})", object.kind.label()),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            let mut item = ListItem::new(Line::from(spans));
            if index % 2 == 1 {
                item = item.style(Style::default().bg(Color::Rgb(24, 24, 24)));
            }
            items.push(item);
        }

        let mut list_state = ratatui::widgets::ListState::default();
        list_state.select(Some(state.cursor()));

        let highlight_style = if has_focus {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        };

        let list = List::new(items)
            .block(Block::default())
            .highlight_style(highlight_style)
            .highlight_symbol("▸ ");

        frame.render_stateful_widget(list, inner, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::app::loader::demo_scene;

    #[test]
    fn cursor_stays_in_bounds() {
        let scene = demo_scene();
        let mut state = OutlinerState::from_scene(&scene);

        state.select_previous();
        assert_eq!(state.cursor(), 0);

        for _ in 0..100 {
            state.select_next();
        }
        assert_eq!(state.cursor(), scene.objects().len() - 1);
    }

    #[test]
    fn sync_clamps_after_shrink() {
        let scene = demo_scene();
        let mut state = OutlinerState::from_scene(&scene);
        for _ in 0..scene.objects().len() {
            state.select_next();
        }

        let empty = Scene::default();
        state.sync(&empty);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn renders_demo_scene() {
        let backend = TestBackend::new(48, 12);
        let mut terminal = Terminal::new(backend).unwrap();

        let scene = demo_scene();
        let state = OutlinerState::from_scene(&scene);
        let component = Outliner;

        terminal
            .draw(|frame| {
                let area = frame.size();
                component.render(frame, area, &scene, &state, true, true);
            })
            .unwrap();
    }
}
