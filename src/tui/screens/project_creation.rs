// project creation: name entry through the text prompt

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{Action, PromptTarget, Route, Screen};
use crate::config::ConfigStore;
use crate::theme::Theme;
use crate::tui::overlay::TextPrompt;
use crate::tui::widgets::{InputField, centered_rect};

#[derive(Debug, Default)]
pub struct ProjectCreation {
    pending_name: String,
    viewport: (u16, u16),
}

impl ProjectCreation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_name(&self) -> &str {
        &self.pending_name
    }

    fn prompt(&self) -> Action {
        Action::Prompt(
            TextPrompt::new("Enter Project Name", &self.pending_name, PromptTarget::ProjectName)
                .with_viewport(self.viewport),
        )
    }
}

impl Screen for ProjectCreation {
    fn handle_key(&mut self, key: KeyEvent, _store: &mut ConfigStore) -> Action {
        match key.code {
            KeyCode::Enter | KeyCode::Char('i') => self.prompt(),
            KeyCode::Esc | KeyCode::Char('q') => Action::Transition(Route::Landing),
            _ => Action::None,
        }
    }

    fn apply_prompt(&mut self, target: PromptTarget, value: String, store: &mut ConfigStore) -> Action {
        if target != PromptTarget::ProjectName {
            return Action::None;
        }

        self.pending_name = value;
        match store.add_project(&self.pending_name) {
            Ok(_) => {
                self.pending_name.clear();
                Action::Transition(Route::Landing)
            }
            Err(e) => Action::Error(e),
        }
    }

    fn on_enter(&mut self, _store: &mut ConfigStore) -> Action {
        self.prompt()
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    fn render(&self, frame: &mut Frame, area: Rect, _store: &ConfigStore, theme: &Theme) {
        let form = centered_rect(60, 7, area);
        let [title, field, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .areas(form);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("New Project", theme.heading()))),
            title,
        );
        frame.render_widget(InputField::new("Project name", &self.pending_name, true, theme), field);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "the project directory is named after the project",
                theme.faint(),
            ))),
            hint,
        );
    }

    fn keybinds(&self) -> &'static str {
        " enter/i:edit name  esc:back "
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ValidationError};

    fn store() -> (tempfile::TempDir, ConfigStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::open(dir.path()).expect("open");
        (dir, store)
    }

    #[test]
    fn test_entering_opens_prompt() {
        let (_dir, mut store) = store();
        let mut screen = ProjectCreation::new();
        match screen.on_enter(&mut store) {
            Action::Prompt(prompt) => {
                assert_eq!(prompt.title(), "Enter Project Name");
                assert_eq!(prompt.target(), PromptTarget::ProjectName);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_confirm_creates_project_and_returns() {
        let (_dir, mut store) = store();
        let mut screen = ProjectCreation::new();

        let action = screen.apply_prompt(PromptTarget::ProjectName, "Resume A".to_string(), &mut store);
        assert!(matches!(action, Action::Transition(Route::Landing)));
        assert_eq!(screen.pending_name(), "");
        assert_eq!(store.projects()[0].name, "Resume A");
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let (_dir, mut store) = store();
        let mut screen = ProjectCreation::new();

        let action = screen.apply_prompt(PromptTarget::ProjectName, String::new(), &mut store);
        assert!(matches!(
            action,
            Action::Error(AppError::Validation(ValidationError::EmptyProjectName))
        ));
        assert!(store.projects().is_empty());
    }

    #[test]
    fn test_duplicate_keeps_pending_name() {
        let (_dir, mut store) = store();
        store.add_project("Resume A").expect("add");
        let mut screen = ProjectCreation::new();

        let action = screen.apply_prompt(PromptTarget::ProjectName, "Resume A".to_string(), &mut store);
        assert!(matches!(
            action,
            Action::Error(AppError::Validation(ValidationError::DuplicateProjectName(_)))
        ));
        assert_eq!(screen.pending_name(), "Resume A");

        // reopening the prompt starts from the rejected name
        match screen.handle_key(KeyEvent::from(KeyCode::Char('i')), &mut store) {
            Action::Prompt(prompt) => assert_eq!(prompt.value(), "Resume A"),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_escape_returns_to_landing() {
        let (_dir, mut store) = store();
        let mut screen = ProjectCreation::new();
        assert!(matches!(
            screen.handle_key(KeyEvent::from(KeyCode::Esc), &mut store),
            Action::Transition(Route::Landing)
        ));
    }
}
