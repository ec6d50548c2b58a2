// project detail: overview, outputs and the job editor of one project

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tracing::{info, warn};

use super::{
    Action, COMPACT_WIDTH, OutputField, OverviewField, PromptTarget, Route, Screen, clamp, is_ctrl, step,
};
use crate::config::{ConfigStore, ModelCredential, Project};
use crate::error::{AppError, ValidationError};
use crate::generation::{GenerationOutcome, GenerationRequest};
use crate::project::{Output, ProjectConfig, ProjectStore};
use crate::theme::Theme;
use crate::tui::overlay::TextPrompt;
use crate::tui::widgets::{Button, InputField, ItemList, centered_rect};

const OVERVIEW_FIELDS: [OverviewField; 3] = [
    OverviewField::ProjectName,
    OverviewField::ResumeInput,
    OverviewField::Model,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Overview,
    Outputs,
    Job,
}

impl Region {
    fn next(self) -> Self {
        match self {
            Region::Overview => Region::Outputs,
            Region::Outputs => Region::Job,
            Region::Job => Region::Overview,
        }
    }

    fn prev(self) -> Self {
        match self {
            Region::Overview => Region::Job,
            Region::Outputs => Region::Overview,
            Region::Job => Region::Outputs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Name,
    Description,
    Generate,
    Save,
}

const JOB_FIELDS: [JobField; 4] = [JobField::Name, JobField::Description, JobField::Generate, JobField::Save];

/// modal list of credentials for the project's model
#[derive(Debug, Clone, PartialEq, Eq)]
struct ModelPicker {
    options: Vec<ModelCredential>,
    cursor: usize,
}

#[derive(Debug)]
pub struct ProjectDetail {
    project: Project,
    config: ProjectConfig,
    region: Region,
    overview_row: usize,
    output_cursor: usize,
    job_row: usize,
    picker: Option<ModelPicker>,
    generating: bool,
    status: Option<String>,
    viewport: (u16, u16),
}

impl ProjectDetail {
    /// load the project's config; on failure start empty and report why
    pub fn open(project: Project) -> (Self, Option<AppError>) {
        let (config, err) = match ProjectStore::load(&project.path) {
            Ok(config) => (config, None),
            Err(e) => {
                warn!(project = %project.name, error = %e, "could not load project config");
                (ProjectConfig::named(&project.name), Some(e.into()))
            }
        };

        let screen = Self {
            project,
            config,
            region: Region::Overview,
            overview_row: 0,
            output_cursor: 0,
            job_row: 0,
            picker: None,
            generating: false,
            status: None,
            viewport: (0, 0),
        };
        (screen, err)
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn selected_output(&self) -> Option<usize> {
        (!self.config.outputs.is_empty()).then(|| clamp(self.output_cursor, self.config.outputs.len()))
    }

    /// apply a finished generation; the flag clears whatever the outcome
    pub fn complete(&mut self, outcome: GenerationOutcome) -> Action {
        if outcome.project_dir != self.project.path {
            warn!(dir = %outcome.project_dir.display(), "generation result for another project ignored");
            return Action::None;
        }
        self.generating = false;

        let output = match outcome.result {
            Ok(output) => output,
            Err(e) => return Action::error(e),
        };

        let previous_cursor = self.output_cursor;
        let name = output.name.clone();
        self.config.outputs.push(output);
        self.output_cursor = self.config.outputs.len() - 1;

        match ProjectStore::save(&self.project.path, &self.config) {
            Ok(()) => {
                self.status = Some(format!("generated {name}"));
                Action::None
            }
            Err(e) => {
                self.config.outputs.pop();
                self.output_cursor = previous_cursor;
                Action::error(e)
            }
        }
    }

    fn save_config(&mut self) -> Action {
        match ProjectStore::save(&self.project.path, &self.config) {
            Ok(()) => {
                self.status = Some("project saved".to_string());
                Action::None
            }
            Err(e) => Action::error(e),
        }
    }

    fn prompt(&self, title: &str, initial: &str, target: PromptTarget) -> Action {
        Action::Prompt(TextPrompt::new(title, initial, target).with_viewport(self.viewport))
    }

    fn picker_key(&mut self, key: KeyEvent) -> Action {
        let Some(picker) = &mut self.picker else {
            return Action::None;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.picker = None,
            KeyCode::Char('j') | KeyCode::Down => picker.cursor = step(picker.cursor, picker.options.len(), true),
            KeyCode::Char('k') | KeyCode::Up => picker.cursor = step(picker.cursor, picker.options.len(), false),
            KeyCode::Enter => {
                if let Some(choice) = picker.options.get(picker.cursor) {
                    self.config.selected_model = choice.name.clone();
                }
                self.picker = None;
            }
            _ => {}
        }
        Action::None
    }

    fn overview_key(&mut self, key: KeyEvent, store: &mut ConfigStore) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.overview_row = step(self.overview_row, OVERVIEW_FIELDS.len(), true);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.overview_row = step(self.overview_row, OVERVIEW_FIELDS.len(), false);
            }
            KeyCode::Enter | KeyCode::Char('i') | KeyCode::Char('l') => match OVERVIEW_FIELDS[self.overview_row] {
                OverviewField::ProjectName if key.code != KeyCode::Char('l') => {
                    return self.prompt(
                        "Enter Project Name",
                        &self.config.name,
                        PromptTarget::Overview(OverviewField::ProjectName),
                    );
                }
                OverviewField::ResumeInput if key.code != KeyCode::Char('l') => {
                    return self.prompt(
                        "Enter Resume Input",
                        &self.config.resume_input,
                        PromptTarget::Overview(OverviewField::ResumeInput),
                    );
                }
                OverviewField::Model if key.code != KeyCode::Char('i') => {
                    let options = store.get_models();
                    let cursor = options
                        .iter()
                        .position(|m| m.name == self.config.selected_model)
                        .unwrap_or(0);
                    self.picker = Some(ModelPicker { options, cursor });
                }
                _ => {}
            },
            _ => {}
        }
        Action::None
    }

    fn outputs_key(&mut self, key: KeyEvent) -> Action {
        let len = self.config.outputs.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.output_cursor = step(self.output_cursor, len, true),
            KeyCode::Char('k') | KeyCode::Up => self.output_cursor = step(self.output_cursor, len, false),
            KeyCode::Char('a') => {
                let previous_cursor = self.output_cursor;
                self.config.outputs.push(Output::default());
                self.output_cursor = self.config.outputs.len() - 1;
                if let Err(e) = ProjectStore::save(&self.project.path, &self.config) {
                    self.config.outputs.pop();
                    self.output_cursor = previous_cursor;
                    return Action::error(e);
                }
            }
            KeyCode::Enter if len > 0 => self.region = Region::Job,
            _ => {}
        }
        Action::None
    }

    fn job_key(&mut self, key: KeyEvent, store: &mut ConfigStore) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.job_row = step(self.job_row, JOB_FIELDS.len(), true),
            KeyCode::Char('k') | KeyCode::Up => self.job_row = step(self.job_row, JOB_FIELDS.len(), false),
            KeyCode::Enter | KeyCode::Char('i') => {
                let field = JOB_FIELDS[self.job_row];
                if field == JobField::Save && key.code == KeyCode::Enter {
                    return self.save_artifact();
                }
                let Some(index) = self.selected_output() else {
                    return Action::None;
                };
                let output = &self.config.outputs[index];
                match field {
                    JobField::Name => {
                        return self.prompt(
                            "Enter Job Name",
                            &output.name,
                            PromptTarget::Output { index, field: OutputField::Name },
                        );
                    }
                    JobField::Description => {
                        return self.prompt(
                            "Enter Job Description",
                            &output.job_description,
                            PromptTarget::Output { index, field: OutputField::JobDescription },
                        );
                    }
                    JobField::Generate if key.code == KeyCode::Enter => return self.generate(index, store),
                    _ => {}
                }
            }
            _ => {}
        }
        Action::None
    }

    /// snapshot everything the background task needs
    fn generate(&mut self, index: usize, store: &ConfigStore) -> Action {
        if self.generating {
            return Action::None;
        }
        let credential = store
            .get_models()
            .into_iter()
            .find(|m| !self.config.selected_model.is_empty() && m.name == self.config.selected_model);

        let request = GenerationRequest {
            project_dir: self.project.path.clone(),
            resume: self.config.resume_input.clone(),
            job_description: self.config.outputs[index].job_description.clone(),
            credential,
        };
        self.generating = true;
        self.status = None;
        Action::Generate(request)
    }

    fn save_artifact(&mut self) -> Action {
        let Some(index) = self.selected_output() else {
            return Action::error(ValidationError::NoOutputSelected);
        };
        match ProjectStore::write_artifact(&self.project.path, &self.config.outputs[index]) {
            Ok(path) => {
                info!(path = %path.display(), "saved output");
                self.status = Some(format!("saved {}", path.display()));
                Action::None
            }
            Err(e) => Action::error(e),
        }
    }

    /// model name for display; stale names read as unset
    fn model_label(&self, store: &ConfigStore) -> String {
        let name = &self.config.selected_model;
        if !name.is_empty() && store.get_models().iter().any(|m| &m.name == name) {
            name.clone()
        } else {
            "no model selected".to_string()
        }
    }

    fn section(&self, title: &'static str, region: Region, theme: &Theme) -> Block<'static> {
        Block::default()
            .title(format!(" {title} "))
            .title_style(theme.heading())
            .borders(Borders::ALL)
            .border_style(theme.border(self.region == region))
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect, store: &ConfigStore, theme: &Theme) {
        let block = self.section("Overview", Region::Overview, theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([Constraint::Length(3); 3]).split(inner);
        let focused = |row: usize| self.region == Region::Overview && self.overview_row == row;
        let model = self.model_label(store);

        frame.render_widget(InputField::new("Project name", &self.config.name, focused(0), theme), rows[0]);
        frame.render_widget(
            InputField::new("Resume input", &self.config.resume_input, focused(1), theme),
            rows[1],
        );
        frame.render_widget(InputField::new("Model", &model, focused(2), theme), rows[2]);
    }

    fn render_outputs(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let names = self
            .config
            .outputs
            .iter()
            .map(|o| if o.name.is_empty() { "(unnamed)".to_string() } else { o.name.clone() })
            .collect();
        let list = ItemList::new("Outputs", names, self.selected_output(), theme)
            .focused(self.region == Region::Outputs)
            .empty_hint("no outputs yet, press a to add one");
        frame.render_widget(list, area);
    }

    fn render_job(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = self.section("Job", Region::Job, theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(index) = self.selected_output() else {
            frame.render_widget(
                Paragraph::new(Span::styled("select or add an output first", theme.faint())),
                inner,
            );
            return;
        };
        let output = &self.config.outputs[index];

        let [name, description, generate, save, text] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);
        let focused = |row: usize| self.region == Region::Job && self.job_row == row;

        frame.render_widget(InputField::new("Name", &output.name, focused(0), theme), name);
        frame.render_widget(
            InputField::new("Job description", &output.job_description, focused(1), theme),
            description,
        );
        frame.render_widget(Button::new("Generate", focused(2), theme), generate);
        frame.render_widget(Button::new("Save PDF", focused(3), theme), save);

        let body = if output.generated_text.is_empty() {
            Paragraph::new(Span::styled("nothing generated yet", theme.faint()))
        } else {
            Paragraph::new(output.generated_text.as_str())
                .style(theme.text())
                .wrap(Wrap { trim: false })
        };
        frame.render_widget(body.block(Block::default().borders(Borders::TOP).title(" Output ")), text);
    }

    fn render_picker(&self, picker: &ModelPicker, frame: &mut Frame, area: Rect, theme: &Theme) {
        let height = (picker.options.len() as u16 + 2).clamp(3, 12);
        let rect = centered_rect(40, height, area);
        frame.render_widget(Clear, rect);
        let names = picker.options.iter().map(|m| format!("{} ({})", m.name, m.provider)).collect();
        let selected = (!picker.options.is_empty()).then_some(picker.cursor);
        frame.render_widget(
            ItemList::new("Select Model", names, selected, theme).empty_hint("no models configured"),
            rect,
        );
    }
}

impl Screen for ProjectDetail {
    fn handle_key(&mut self, key: KeyEvent, store: &mut ConfigStore) -> Action {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) && self.picker.is_none() {
            return Action::Transition(Route::Landing);
        }
        if self.generating {
            return Action::None;
        }
        if self.picker.is_some() {
            return self.picker_key(key);
        }
        if is_ctrl(&key, 's') {
            return self.save_config();
        }

        match key.code {
            KeyCode::Tab => self.region = self.region.next(),
            KeyCode::BackTab => self.region = self.region.prev(),
            _ => {
                return match self.region {
                    Region::Overview => self.overview_key(key, store),
                    Region::Outputs => self.outputs_key(key),
                    Region::Job => self.job_key(key, store),
                };
            }
        }
        Action::None
    }

    fn apply_prompt(&mut self, target: PromptTarget, value: String, _store: &mut ConfigStore) -> Action {
        match target {
            PromptTarget::Overview(OverviewField::ProjectName) => self.config.name = value,
            PromptTarget::Overview(OverviewField::ResumeInput) => self.config.resume_input = value,
            PromptTarget::Output { index, field } => match self.config.outputs.get_mut(index) {
                Some(output) => match field {
                    OutputField::Name => output.name = value,
                    OutputField::JobDescription => output.job_description = value,
                },
                None => warn!(index, "dropped edit for a missing output"),
            },
            _ => {}
        }
        Action::None
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    fn render(&self, frame: &mut Frame, area: Rect, store: &ConfigStore, theme: &Theme) {
        if self.generating {
            let rect = centered_rect(34, 4, area);
            let text = vec![
                Line::from(Span::styled("Generating resume...", theme.heading())),
                Line::from(Span::styled("Please stand by...", theme.muted())),
            ];
            frame.render_widget(
                Paragraph::new(text)
                    .centered()
                    .block(Block::default().borders(Borders::ALL).border_style(theme.accent())),
                rect,
            );
            return;
        }

        if self.viewport.0 < COMPACT_WIDTH {
            match self.region {
                Region::Overview => self.render_overview(frame, area, store, theme),
                Region::Outputs => self.render_outputs(frame, area, theme),
                Region::Job => self.render_job(frame, area, theme),
            }
        } else {
            let [left, right] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
            let [overview, outputs] = Layout::vertical([Constraint::Length(11), Constraint::Min(3)]).areas(left);
            self.render_overview(frame, overview, store, theme);
            self.render_outputs(frame, outputs, theme);
            self.render_job(frame, right, theme);
        }

        if let Some(picker) = &self.picker {
            self.render_picker(picker, frame, area, theme);
        }
    }

    fn keybinds(&self) -> &'static str {
        if self.generating {
            " esc:back "
        } else if self.picker.is_some() {
            " j/k:navigate  enter:select  esc:cancel "
        } else {
            " tab:section  j/k:navigate  i:input  enter:action  a:add  ctrl+s:save  q:back "
        }
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}
