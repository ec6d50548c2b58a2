// landing: project list and details

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{Action, COMPACT_WIDTH, Route, Screen, clamp, is_ctrl, step};
use crate::config::ConfigStore;
use crate::theme::{TAGLINE, Theme};
use crate::tui::widgets::{ItemList, field_line, format_timestamp};

#[derive(Debug, Default)]
pub struct Landing {
    cursor: usize,
    viewport: (u16, u16),
}

impl Landing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Screen for Landing {
    fn handle_key(&mut self, key: KeyEvent, store: &mut ConfigStore) -> Action {
        if is_ctrl(&key, 'c') {
            return Action::Quit;
        }

        let len = store.projects().len();
        self.cursor = clamp(self.cursor, len);

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.cursor = step(self.cursor, len, true),
            KeyCode::Char('k') | KeyCode::Up => self.cursor = step(self.cursor, len, false),
            KeyCode::Char('n') => return Action::Transition(Route::ProjectCreation),
            KeyCode::Char('M') | KeyCode::Char('m') => return Action::Transition(Route::ModelManager),
            KeyCode::Enter => {
                if let Some(project) = store.projects().get(self.cursor) {
                    return Action::Transition(Route::ProjectDetail(project.clone()));
                }
            }
            KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }
        Action::None
    }

    fn on_enter(&mut self, store: &mut ConfigStore) -> Action {
        self.cursor = clamp(self.cursor, store.projects().len());
        Action::None
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    fn render(&self, frame: &mut Frame, area: Rect, store: &ConfigStore, theme: &Theme) {
        let [header, body] = Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(area);

        let title = Line::from(vec![
            Span::styled(" auto-resume ", theme.heading()),
            Span::styled(TAGLINE, theme.faint()),
        ]);
        frame.render_widget(Paragraph::new(title), header);

        let projects = store.projects();
        let names = projects.iter().map(|p| p.name.clone()).collect();
        let selected = (!projects.is_empty()).then(|| clamp(self.cursor, projects.len()));
        let list = ItemList::new("Projects", names, selected, theme)
            .empty_hint("no projects yet, press n to create one");

        if self.viewport.0 < COMPACT_WIDTH {
            frame.render_widget(list, body);
            return;
        }

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);
        frame.render_widget(list, left);

        let details = match selected.and_then(|i| projects.get(i)) {
            Some(project) => vec![
                field_line("Name:", project.name.clone(), theme),
                field_line("Created:", format_timestamp(project.created_at), theme),
                field_line("Last opened:", format_timestamp(project.last_opened), theme),
                field_line("Path:", project.path.display().to_string(), theme),
                Line::from(""),
                Line::from(Span::styled("press enter to open", theme.faint())),
            ],
            None => vec![Line::from(Span::styled("select a project to see details", theme.faint()))],
        };

        let block = Block::default()
            .title(" Details ")
            .title_style(theme.heading())
            .borders(Borders::ALL)
            .border_style(theme.border(false));
        frame.render_widget(
            Paragraph::new(details).block(block).wrap(Wrap { trim: false }),
            right,
        );
    }

    fn keybinds(&self) -> &'static str {
        " j/k:navigate  enter:open  n:new  m:models  q:quit "
    }
}
