// screens and the vocabulary they use to talk to the app

mod landing;
mod model_manager;
mod project_creation;
mod project_detail;

pub use landing::Landing;
pub use model_manager::ModelManager;
pub use project_creation::ProjectCreation;
pub use project_detail::ProjectDetail;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Frame, layout::Rect};

use super::overlay::TextPrompt;
use crate::config::{ConfigStore, Project};
use crate::error::AppError;
use crate::generation::GenerationRequest;
use crate::theme::Theme;

/// below this width screens drop their details pane
pub const COMPACT_WIDTH: u16 = 60;

/// which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Landing,
    ProjectCreation,
    ModelManager,
    ProjectDetail,
}

/// where a transition goes, with its payload
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Landing,
    ProjectCreation,
    ModelManager,
    ProjectDetail(Project),
}

/// what a screen asks the app to do after handling input
#[derive(Debug)]
pub enum Action {
    None,
    Transition(Route),
    Prompt(TextPrompt),
    Error(AppError),
    Generate(GenerationRequest),
    Quit,
}

impl Action {
    pub fn error(err: impl Into<AppError>) -> Self {
        Action::Error(err.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Name,
    Provider,
    Model,
    ApiKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewField {
    ProjectName,
    ResumeInput,
    Model,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputField {
    Name,
    JobDescription,
}

/// the field a text prompt writes back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTarget {
    ProjectName,
    Credential(CredentialField),
    Overview(OverviewField),
    /// addressed by index; dropped if the output no longer exists
    Output { index: usize, field: OutputField },
}

/// capabilities every screen offers the app
pub trait Screen {
    fn handle_key(&mut self, key: KeyEvent, store: &mut ConfigStore) -> Action;

    /// confirmed text from a prompt this screen opened
    fn apply_prompt(&mut self, _target: PromptTarget, _value: String, _store: &mut ConfigStore) -> Action {
        Action::None
    }

    /// called every time the screen becomes active
    fn on_enter(&mut self, _store: &mut ConfigStore) -> Action {
        Action::None
    }

    fn resize(&mut self, width: u16, height: u16);

    fn render(&self, frame: &mut Frame, area: Rect, store: &ConfigStore, theme: &Theme);

    fn keybinds(&self) -> &'static str;

    /// message for the status bar
    fn status(&self) -> Option<&str> {
        None
    }
}

pub(crate) fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// move a cursor one step inside 0..len
pub(crate) fn step(cursor: usize, len: usize, down: bool) -> usize {
    if down {
        if cursor + 1 < len { cursor + 1 } else { cursor }
    } else {
        cursor.saturating_sub(1)
    }
}

pub(crate) fn clamp(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}
