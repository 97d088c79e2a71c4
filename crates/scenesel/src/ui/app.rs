//! Application loop for the terminal shell.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use crate::app::scene::Scene;
use crate::app::selector::Selector;
use crate::domain::model::{SelectMode, SelectionRequest};
use crate::infra::config::Config;
use crate::ui::components::command_palette::{CommandPalette, CommandPaletteState};
use crate::ui::components::name_dialog::{DialogField, NameDialog, NameDialogState};
use crate::ui::components::outliner::{Outliner, OutlinerState};
use crate::ui::components::summary::{SceneSummary, Summary};
use crate::ui::keys::KeyMap;

const TICK_RATE: Duration = Duration::from_millis(120);

/// Primary entry point for running the interactive shell.
///
/// Owns the live scene for the duration of a run and is its sole mutator;
/// every selection change goes through the [`Selector`].
pub struct UiApp {
    config: Config,
    keymap: KeyMap,
    scene: Scene,
    selector: Selector,
    outliner_state: OutlinerState,
    outliner: Outliner,
    summary: Summary,
    dialog_state: NameDialogState,
    dialog: NameDialog,
    palette_state: CommandPaletteState,
    palette: CommandPalette,
    status: Option<StatusMessage>,
    focus: FocusTarget,
    should_quit: bool,
}

impl UiApp {
    pub fn new(scene: Scene, config: Config) -> Result<Self> {
        let keymap = KeyMap::from_config(&config.keybindings)?;
        let outliner_state = OutlinerState::from_scene(&scene);
        let summary = Summary::new(config.defaults.summary_limit);

        let mut app = Self {
            config,
            keymap,
            scene,
            selector: Selector::new(),
            outliner_state,
            outliner: Outliner,
            summary,
            dialog_state: NameDialogState::default(),
            dialog: NameDialog,
            palette_state: CommandPaletteState::default(),
            palette: CommandPalette,
            status: None,
            focus: FocusTarget::Outliner,
            should_quit: false,
        };
        app.refresh_summary();
        Ok(app)
    }

    /// Launch the terminal UI and enter the event loop.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
        terminal.hide_cursor().ok();

        let event_loop_result = self.event_loop(&mut terminal);

        disable_raw_mode().ok();
        let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        event_loop_result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;
            self.tick();

            if self.should_quit {
                break;
            }

            if event::poll(TICK_RATE)? {
                let ev = event::read()?;
                self.handle_event(ev)?;
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame<'_>) {
        let size = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(size);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(34)])
            .split(layout[0]);

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(4)])
            .split(main_chunks[1]);

        let focus_outliner = matches!(self.focus, FocusTarget::Outliner);
        self.outliner.render(
            frame,
            main_chunks[0],
            &self.scene,
            &self.outliner_state,
            focus_outliner,
            self.config.defaults.show_kinds,
        );

        self.summary.render(frame, right_chunks[0]);
        self.render_hints(frame, right_chunks[1]);
        self.render_status(frame, layout[1]);

        self.palette.render(frame, size, &self.palette_state);
        self.dialog.render(frame, size, &self.dialog_state);
    }

    fn render_hints(&self, frame: &mut Frame<'_>, area: Rect) {
        let bindings = &self.config.keybindings;
        let hints = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{}/{}", bindings.up, bindings.down),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" move · "),
            Span::styled(bindings.toggle.clone(), Style::default().fg(Color::Cyan)),
            Span::raw(" toggle · "),
            Span::styled(
                bindings.select_by_name.clone(),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" select by name · "),
            Span::styled(bindings.palette.clone(), Style::default().fg(Color::Cyan)),
            Span::raw(" palette · "),
            Span::styled(bindings.quit.clone(), Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray));
        frame.render_widget(hints, area);
    }

    fn render_status(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let message = self.status.as_ref().map(|status| {
            let style = match status.level {
                StatusLevel::Info => Style::default().fg(Color::Gray),
                StatusLevel::Success => Style::default().fg(Color::Green),
                StatusLevel::Error => Style::default().fg(Color::Red),
            };
            Line::styled(status.text.clone(), style)
        });

        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let line = message.unwrap_or_else(|| {
            Line::styled(
                "Ready · press : for commands",
                Style::default().fg(Color::DarkGray),
            )
        });
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn tick(&mut self) {
        if let Some(status) = &self.status
            && status.is_expired()
        {
            self.status = None;
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Resize(..) => {}
            Event::Mouse(_) => {}
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.dialog_state.is_open() {
            return self.handle_dialog_key(key);
        }
        if self.palette_state.is_open() {
            return self.handle_palette_key(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return Ok(());
        }

        self.handle_outliner_key(key)
    }

    fn handle_outliner_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Esc || self.keymap.quit.matches(&key) {
            self.should_quit = true;
            return Ok(());
        }

        if self.keymap.select_by_name.matches(&key) {
            self.open_dialog();
            return Ok(());
        }

        if self.keymap.palette.matches(&key) {
            self.palette_state.open();
            self.focus = FocusTarget::CommandPalette;
            return Ok(());
        }

        if key.code == KeyCode::Down || self.keymap.down.matches(&key) {
            self.outliner_state.select_next();
        } else if key.code == KeyCode::Up || self.keymap.up.matches(&key) {
            self.outliner_state.select_previous();
        } else if self.keymap.toggle.matches(&key) {
            self.toggle_current();
        }
        Ok(())
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                // Cancellation leaves the selection untouched.
                self.dialog_state.close();
                self.focus = FocusTarget::Outliner;
            }
            KeyCode::Enter => {
                match self.dialog_state.request() {
                    Ok(request) => {
                        self.dialog_state.close();
                        self.focus = FocusTarget::Outliner;
                        self.apply_request(&request);
                    }
                    Err(err) => {
                        self.set_status(StatusLevel::Error, err.to_string());
                    }
                }
            }
            KeyCode::Tab => {
                self.dialog_state.focus_next();
            }
            KeyCode::BackTab => {
                self.dialog_state.focus_previous();
            }
            KeyCode::Backspace => {
                self.dialog_state.pop_char();
            }
            KeyCode::Char(ch) => {
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    return Ok(());
                }
                if self.dialog_state.field() == DialogField::Search {
                    self.dialog_state.push_char(ch);
                } else if ch == ' ' {
                    self.dialog_state.toggle_focused();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_palette_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.palette_state.close();
                self.focus = FocusTarget::Outliner;
            }
            KeyCode::Enter => {
                let command = self.palette_state.take_input();
                self.palette_state.close();
                self.focus = FocusTarget::Outliner;
                if let Err(err) = self.execute_command(command.trim()) {
                    self.set_status(StatusLevel::Error, err.to_string());
                }
            }
            KeyCode::Backspace => {
                self.palette_state.pop_char();
            }
            KeyCode::Char(ch) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.palette_state.push_char(ch);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn execute_command(&mut self, command: &str) -> Result<()> {
        if command.is_empty() {
            return Ok(());
        }

        let mut parts = command.split_whitespace();
        let verb = parts.next().unwrap_or("");
        let rest = command[verb.len()..].trim();

        match verb {
            "select-by-name" => {
                self.open_dialog();
            }
            "select" => {
                self.apply_request(&SelectionRequest::new(rest, SelectMode::Replace));
            }
            "add" => {
                self.apply_request(&SelectionRequest::new(rest, SelectMode::Add));
            }
            "remove" => {
                self.apply_request(&SelectionRequest::new(rest, SelectMode::Remove));
            }
            "clear" => {
                // Empty fragment matches everything, so Remove empties the
                // selection.
                let report = self
                    .selector
                    .apply(&SelectionRequest::new("", SelectMode::Remove), &mut self.scene);
                self.refresh_summary();
                self.set_status(
                    StatusLevel::Info,
                    format!("Cleared {} selected", report.deselected),
                );
            }
            "help" => {
                self.set_status(
                    StatusLevel::Info,
                    "Commands: select-by-name, select <fragment>, add <fragment>, \
                     remove <fragment>, clear",
                );
            }
            other => {
                return Err(anyhow!("unknown command '{other}'"));
            }
        }
        Ok(())
    }

    fn open_dialog(&mut self) {
        self.dialog_state.open();
        self.focus = FocusTarget::NameDialog;
    }

    fn apply_request(&mut self, request: &SelectionRequest) {
        let report = self.selector.apply(request, &mut self.scene);
        self.refresh_summary();
        let label = if request.search_text.is_empty() {
            "(all)".to_string()
        } else {
            format!("'{}'", request.search_text)
        };
        self.set_status(StatusLevel::Success, format!("{label}: {report}"));
    }

    fn toggle_current(&mut self) {
        let cursor = self.outliner_state.cursor();
        let Some(object) = self.scene.object(cursor) else {
            return;
        };
        let name = object.name.clone();
        let was_selected = object.selected;

        self.scene.toggle(cursor);
        self.refresh_summary();
        if was_selected {
            self.set_status(StatusLevel::Info, format!("Deselected {name}"));
        } else {
            self.set_status(StatusLevel::Success, format!("Selected {name}"));
        }
    }

    fn refresh_summary(&mut self) {
        self.outliner_state.sync(&self.scene);
        if self.scene.selected_count() == 0 {
            self.summary.clear();
        } else {
            self.summary.update(SceneSummary::from_scene(&self.scene));
        }
    }

    fn set_status<S: Into<String>>(&mut self, level: StatusLevel, message: S) {
        self.status = Some(StatusMessage::new(level, message.into()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusTarget {
    Outliner,
    NameDialog,
    CommandPalette,
}

#[derive(Debug)]
struct StatusMessage {
    level: StatusLevel,
    text: String,
    expires_at: Instant,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: String) -> Self {
        Self {
            level,
            text,
            expires_at: Instant::now() + Duration::from_secs(4),
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusLevel {
    Info,
    Success,
    Error,
}
