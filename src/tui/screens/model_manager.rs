// model manager: browse, add, edit and delete llm credentials

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Action, COMPACT_WIDTH, CredentialField, PromptTarget, Route, Screen, clamp, step};
use crate::config::{ConfigStore, ModelCredential};
use crate::error::ValidationError;
use crate::theme::Theme;
use crate::tui::overlay::TextPrompt;
use crate::tui::widgets::{Button, InputField, ItemList, field_line};

/// rows of the edit form; the last one is the submit button
const FORM_ROWS: usize = 5;

const FIELDS: [CredentialField; 4] = [
    CredentialField::Name,
    CredentialField::Provider,
    CredentialField::Model,
    CredentialField::ApiKey,
];

fn label(field: CredentialField) -> &'static str {
    match field {
        CredentialField::Name => "Name",
        CredentialField::Provider => "Provider",
        CredentialField::Model => "Model",
        CredentialField::ApiKey => "API Key",
    }
}

fn value(credential: &ModelCredential, field: CredentialField) -> &str {
    match field {
        CredentialField::Name => &credential.name,
        CredentialField::Provider => &credential.provider,
        CredentialField::Model => &credential.model,
        CredentialField::ApiKey => &credential.api_key,
    }
}

fn value_mut(credential: &mut ModelCredential, field: CredentialField) -> &mut String {
    match field {
        CredentialField::Name => &mut credential.name,
        CredentialField::Provider => &mut credential.provider,
        CredentialField::Model => &mut credential.model,
        CredentialField::ApiKey => &mut credential.api_key,
    }
}

/// hide all but the last four characters
pub fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}

/// in-progress edit of one credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    scratch: ModelCredential,
    /// index being overwritten, none when adding
    index: Option<usize>,
    /// 0..FORM_ROWS, FIELDS then submit
    row: usize,
}

impl Editor {
    fn field(&self) -> Option<CredentialField> {
        FIELDS.get(self.row).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Editing(Editor),
}

#[derive(Debug)]
pub struct ModelManager {
    models: Vec<ModelCredential>,
    cursor: usize,
    mode: Mode,
    viewport: (u16, u16),
}

impl ModelManager {
    pub fn new(store: &ConfigStore) -> Self {
        Self {
            models: store.get_models(),
            cursor: 0,
            mode: Mode::Browsing,
            viewport: (0, 0),
        }
    }

    pub fn models(&self) -> &[ModelCredential] {
        &self.models
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    fn browse_key(&mut self, key: KeyEvent, store: &mut ConfigStore) -> Action {
        let len = self.models.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.cursor = step(self.cursor, len, true),
            KeyCode::Char('k') | KeyCode::Up => self.cursor = step(self.cursor, len, false),
            KeyCode::Char('a') => {
                self.mode = Mode::Editing(Editor {
                    scratch: ModelCredential::default(),
                    index: None,
                    row: 0,
                });
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(model) = self.models.get(self.cursor) {
                    self.mode = Mode::Editing(Editor {
                        scratch: model.clone(),
                        index: Some(self.cursor),
                        row: 0,
                    });
                }
            }
            KeyCode::Char('d') => return self.delete_selected(store),
            KeyCode::Char('q') | KeyCode::Esc => return Action::Transition(Route::Landing),
            _ => {}
        }
        Action::None
    }

    fn delete_selected(&mut self, store: &mut ConfigStore) -> Action {
        if self.cursor >= self.models.len() {
            return Action::None;
        }
        let mut models = self.models.clone();
        models.remove(self.cursor);

        match store.save_models(models.clone()) {
            Ok(()) => {
                self.models = models;
                self.cursor = clamp(self.cursor, self.models.len());
                Action::None
            }
            Err(e) => Action::error(e),
        }
    }

    fn edit_key(&mut self, key: KeyEvent, store: &mut ConfigStore) -> Action {
        let Mode::Editing(editor) = &mut self.mode else {
            return Action::None;
        };

        match key.code {
            KeyCode::Esc => self.mode = Mode::Browsing,
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                editor.row = step(editor.row, FORM_ROWS, true);
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                editor.row = step(editor.row, FORM_ROWS, false);
            }
            KeyCode::Enter | KeyCode::Char('i') => match editor.field() {
                Some(field) => {
                    let prompt = TextPrompt::new(
                        format!("Enter {}", label(field)),
                        value(&editor.scratch, field),
                        PromptTarget::Credential(field),
                    )
                    .with_viewport(self.viewport);
                    return Action::Prompt(prompt);
                }
                None if key.code == KeyCode::Enter => return self.submit(store),
                None => {}
            },
            _ => {}
        }
        Action::None
    }

    /// validate the scratch buffer, commit it and persist
    fn submit(&mut self, store: &mut ConfigStore) -> Action {
        let Mode::Editing(editor) = &self.mode else {
            return Action::None;
        };

        if editor.scratch.name.is_empty() {
            return Action::error(ValidationError::EmptyModelName);
        }
        let duplicate = self
            .models
            .iter()
            .enumerate()
            .any(|(i, m)| m.name == editor.scratch.name && Some(i) != editor.index);
        if duplicate {
            return Action::error(ValidationError::DuplicateModelName(editor.scratch.name.clone()));
        }

        let previous = (self.models.clone(), self.cursor);
        match editor.index {
            Some(i) if i < self.models.len() => self.models[i] = editor.scratch.clone(),
            _ => {
                self.models.push(editor.scratch.clone());
                self.cursor = self.models.len() - 1;
            }
        }

        match store.save_models(self.models.clone()) {
            Ok(()) => {
                self.mode = Mode::Browsing;
                Action::None
            }
            Err(e) => {
                (self.models, self.cursor) = previous;
                Action::error(e)
            }
        }
    }

    fn render_details(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" Details ")
            .title_style(theme.heading())
            .borders(Borders::ALL)
            .border_style(theme.border(false));

        let lines = match self.models.get(self.cursor) {
            Some(model) => vec![
                field_line("Name:", model.name.clone(), theme),
                field_line("Provider:", model.provider.clone(), theme),
                field_line("Model:", model.model.clone(), theme),
                field_line("API Key:", mask_key(&model.api_key), theme),
                Line::from(""),
                Line::from(Span::styled("e: edit • d: delete", theme.faint())),
            ],
            None => vec![Line::from(Span::styled("press a to add a model", theme.faint()))],
        };
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_form(&self, editor: &Editor, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(if editor.index.is_some() { " Edit Model " } else { " New Model " })
            .title_style(theme.heading())
            .borders(Borders::ALL)
            .border_style(theme.border(true));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

        for (i, field) in FIELDS.iter().enumerate() {
            let shown = if *field == CredentialField::ApiKey {
                mask_key(&editor.scratch.api_key)
            } else {
                value(&editor.scratch, *field).to_string()
            };
            frame.render_widget(InputField::new(label(*field), &shown, editor.row == i, theme), rows[i]);
        }
        frame.render_widget(Button::new("Submit", editor.row == FIELDS.len(), theme), rows[4]);
    }
}

impl Screen for ModelManager {
    fn handle_key(&mut self, key: KeyEvent, store: &mut ConfigStore) -> Action {
        match self.mode {
            Mode::Browsing => self.browse_key(key, store),
            Mode::Editing(_) => self.edit_key(key, store),
        }
    }

    fn apply_prompt(&mut self, target: PromptTarget, text: String, _store: &mut ConfigStore) -> Action {
        if let (PromptTarget::Credential(field), Mode::Editing(editor)) = (target, &mut self.mode) {
            *value_mut(&mut editor.scratch, field) = text;
        }
        Action::None
    }

    /// pick up edits made elsewhere
    fn on_enter(&mut self, store: &mut ConfigStore) -> Action {
        if self.mode == Mode::Browsing {
            self.models = store.get_models();
            self.cursor = clamp(self.cursor, self.models.len());
        }
        Action::None
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    fn render(&self, frame: &mut Frame, area: Rect, _store: &ConfigStore, theme: &Theme) {
        let names = self.models.iter().map(|m| m.name.clone()).collect();
        let selected = (!self.models.is_empty()).then_some(self.cursor);
        let list = ItemList::new("Models", names, selected, theme)
            .focused(!self.is_editing())
            .empty_hint("no models configured");

        let compact = self.viewport.0 < COMPACT_WIDTH;
        match &self.mode {
            Mode::Editing(editor) if compact => self.render_form(editor, frame, area, theme),
            Mode::Editing(editor) => {
                let [left, right] =
                    Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(area);
                frame.render_widget(list, left);
                self.render_form(editor, frame, right, theme);
            }
            Mode::Browsing if compact => frame.render_widget(list, area),
            Mode::Browsing => {
                let [left, right] =
                    Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(area);
                frame.render_widget(list, left);
                self.render_details(frame, right, theme);
            }
        }
    }

    fn keybinds(&self) -> &'static str {
        match self.mode {
            Mode::Browsing => " j/k:navigate  a:add  e:edit  d:delete  q:back ",
            Mode::Editing(_) => " j/k:field  enter/i:edit  enter on submit:save  esc:cancel ",
        }
    }
}
