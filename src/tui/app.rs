// tui application state: active screen, overlays and event dispatch

use std::collections::VecDeque;

use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Block,
};
use tracing::{debug, warn};

use super::overlay::{ErrorBanner, Overlay, PromptStep, TextPrompt};
use super::screens::{
    Action, Landing, ModelManager, ProjectCreation, ProjectDetail, PromptTarget, Route, Screen, ScreenKind,
};
use super::widgets::StatusBar;
use crate::config::{ConfigStore, Project};
use crate::error::{AppError, ValidationError};
use crate::generation::{GenerationOutcome, GenerationRequest};
use crate::theme::Theme;

/// everything the event loop feeds into the app
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    Generation(GenerationOutcome),
    /// the input thread stopped; the terminal loop bails on this one
    InputFailed(String),
}

/// screens are built on first visit and kept afterwards
#[derive(Debug, Default)]
struct Screens {
    landing: Landing,
    creation: Option<ProjectCreation>,
    models: Option<ModelManager>,
    detail: Option<ProjectDetail>,
}

// each capability matches on the tag; a screen not built yet does nothing
impl Screens {
    fn handle_key(&mut self, kind: ScreenKind, key: KeyEvent, store: &mut ConfigStore) -> Action {
        match kind {
            ScreenKind::Landing => self.landing.handle_key(key, store),
            ScreenKind::ProjectCreation => self.creation.as_mut().map_or(Action::None, |s| s.handle_key(key, store)),
            ScreenKind::ModelManager => self.models.as_mut().map_or(Action::None, |s| s.handle_key(key, store)),
            ScreenKind::ProjectDetail => self.detail.as_mut().map_or(Action::None, |s| s.handle_key(key, store)),
        }
    }

    fn apply_prompt(
        &mut self,
        kind: ScreenKind,
        target: PromptTarget,
        value: String,
        store: &mut ConfigStore,
    ) -> Action {
        match kind {
            ScreenKind::Landing => self.landing.apply_prompt(target, value, store),
            ScreenKind::ProjectCreation => self
                .creation
                .as_mut()
                .map_or(Action::None, |s| s.apply_prompt(target, value, store)),
            ScreenKind::ModelManager => self
                .models
                .as_mut()
                .map_or(Action::None, |s| s.apply_prompt(target, value, store)),
            ScreenKind::ProjectDetail => self
                .detail
                .as_mut()
                .map_or(Action::None, |s| s.apply_prompt(target, value, store)),
        }
    }

    fn on_enter(&mut self, kind: ScreenKind, store: &mut ConfigStore) -> Action {
        match kind {
            ScreenKind::Landing => self.landing.on_enter(store),
            ScreenKind::ProjectCreation => self.creation.as_mut().map_or(Action::None, |s| s.on_enter(store)),
            ScreenKind::ModelManager => self.models.as_mut().map_or(Action::None, |s| s.on_enter(store)),
            ScreenKind::ProjectDetail => self.detail.as_mut().map_or(Action::None, |s| s.on_enter(store)),
        }
    }

    fn resize(&mut self, kind: ScreenKind, width: u16, height: u16) {
        match kind {
            ScreenKind::Landing => self.landing.resize(width, height),
            ScreenKind::ProjectCreation => {
                if let Some(s) = &mut self.creation {
                    s.resize(width, height);
                }
            }
            ScreenKind::ModelManager => {
                if let Some(s) = &mut self.models {
                    s.resize(width, height);
                }
            }
            ScreenKind::ProjectDetail => {
                if let Some(s) = &mut self.detail {
                    s.resize(width, height);
                }
            }
        }
    }

    fn render(&self, kind: ScreenKind, frame: &mut Frame, area: Rect, store: &ConfigStore, theme: &Theme) {
        match kind {
            ScreenKind::Landing => self.landing.render(frame, area, store, theme),
            ScreenKind::ProjectCreation => {
                if let Some(s) = &self.creation {
                    s.render(frame, area, store, theme);
                }
            }
            ScreenKind::ModelManager => {
                if let Some(s) = &self.models {
                    s.render(frame, area, store, theme);
                }
            }
            ScreenKind::ProjectDetail => {
                if let Some(s) = &self.detail {
                    s.render(frame, area, store, theme);
                }
            }
        }
    }

    fn keybinds(&self, kind: ScreenKind) -> &'static str {
        match kind {
            ScreenKind::Landing => self.landing.keybinds(),
            ScreenKind::ProjectCreation => self.creation.as_ref().map_or(" q:quit ", |s| s.keybinds()),
            ScreenKind::ModelManager => self.models.as_ref().map_or(" q:quit ", |s| s.keybinds()),
            ScreenKind::ProjectDetail => self.detail.as_ref().map_or(" q:quit ", |s| s.keybinds()),
        }
    }

    fn status(&self, kind: ScreenKind) -> Option<&str> {
        match kind {
            ScreenKind::Landing => self.landing.status(),
            ScreenKind::ProjectCreation => self.creation.as_ref().and_then(|s| s.status()),
            ScreenKind::ModelManager => self.models.as_ref().and_then(|s| s.status()),
            ScreenKind::ProjectDetail => self.detail.as_ref().and_then(|s| s.status()),
        }
    }
}

/// main app state
pub struct App {
    store: ConfigStore,
    theme: Theme,
    screen: ScreenKind,
    screens: Screens,
    overlay: Option<Overlay>,
    /// errors raised while an overlay was showing
    pending_errors: VecDeque<AppError>,
    viewport: (u16, u16),
    should_quit: bool,
}

impl App {
    pub fn new(store: ConfigStore, theme: Theme) -> Self {
        Self {
            store,
            theme,
            screen: ScreenKind::Landing,
            screens: Screens::default(),
            overlay: None,
            pending_errors: VecDeque::new(),
            viewport: (0, 0),
            should_quit: false,
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn screen(&self) -> ScreenKind {
        self.screen
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn pending_errors(&self) -> usize {
        self.pending_errors.len()
    }

    pub fn landing(&self) -> &Landing {
        &self.screens.landing
    }

    pub fn model_manager(&self) -> Option<&ModelManager> {
        self.screens.models.as_ref()
    }

    pub fn project_detail(&self) -> Option<&ProjectDetail> {
        self.screens.detail.as_ref()
    }

    /// feed one event through overlay, then screen; returns a task to spawn
    pub fn dispatch(&mut self, event: AppEvent) -> Option<GenerationRequest> {
        match event {
            AppEvent::Key(key) if key.kind == KeyEventKind::Release => None,
            AppEvent::Key(key) => {
                debug!(code = ?key.code, modifiers = ?key.modifiers, screen = ?self.screen, "key");
                if let Some(overlay) = self.overlay.take() {
                    return self.overlay_key(overlay, key);
                }
                let action = self.screens.handle_key(self.screen, key, &mut self.store);
                self.apply(action)
            }
            AppEvent::Paste(text) => {
                if let Some(Overlay::Prompt(prompt)) = &mut self.overlay {
                    prompt.paste(&text);
                }
                None
            }
            AppEvent::Resize(width, height) => {
                self.viewport = (width, height);
                if let Some(overlay) = &mut self.overlay {
                    overlay.resize(width, height);
                }
                self.screens.resize(self.screen, width, height);
                None
            }
            AppEvent::Generation(outcome) => {
                let action = match &mut self.screens.detail {
                    Some(detail) => detail.complete(outcome),
                    None => {
                        warn!("generation finished without a project screen");
                        Action::None
                    }
                };
                self.apply(action)
            }
            AppEvent::InputFailed(_) => None,
        }
    }

    fn overlay_key(&mut self, overlay: Overlay, key: KeyEvent) -> Option<GenerationRequest> {
        match overlay {
            Overlay::Error(banner) => {
                if !ErrorBanner::dismisses(&key) {
                    self.overlay = Some(Overlay::Error(banner));
                    return None;
                }
                self.show_pending();
                None
            }
            Overlay::Prompt(prompt) => match prompt.handle_key(key) {
                PromptStep::Pending(prompt) => {
                    self.overlay = Some(Overlay::Prompt(prompt));
                    None
                }
                PromptStep::Cancelled => {
                    self.show_pending();
                    None
                }
                PromptStep::Confirmed { target, value } => {
                    let action = self.screens.apply_prompt(self.screen, target, value, &mut self.store);
                    let task = self.apply(action);
                    self.show_pending();
                    task
                }
            },
        }
    }

    fn apply(&mut self, action: Action) -> Option<GenerationRequest> {
        match action {
            Action::None => None,
            Action::Transition(route) => {
                self.transition(route);
                None
            }
            Action::Prompt(prompt) => {
                self.show_prompt(prompt);
                None
            }
            Action::Error(err) => {
                self.show_error(err);
                None
            }
            Action::Generate(request) => Some(request),
            Action::Quit => {
                self.should_quit = true;
                None
            }
        }
    }

    fn transition(&mut self, route: Route) {
        let (width, height) = self.viewport;
        let kind = match route {
            Route::Landing => ScreenKind::Landing,
            Route::ProjectCreation => {
                self.screens.creation.get_or_insert_with(ProjectCreation::new);
                ScreenKind::ProjectCreation
            }
            Route::ModelManager => {
                if self.screens.models.is_none() {
                    self.screens.models = Some(ModelManager::new(&self.store));
                }
                ScreenKind::ModelManager
            }
            Route::ProjectDetail(project) => match self.open_project(project) {
                Some(kind) => kind,
                None => return,
            },
        };

        debug!(from = ?self.screen, to = ?kind, "transition");
        self.screen = kind;
        self.screens.resize(kind, width, height);
        let action = self.screens.on_enter(kind, &mut self.store);
        self.apply(action);
    }

    /// reuse the cached detail screen for the same project, rebuild otherwise
    fn open_project(&mut self, project: Project) -> Option<ScreenKind> {
        match &self.screens.detail {
            Some(detail) if detail.project().name == project.name => {}
            Some(detail) if detail.is_generating() => {
                let busy = detail.project().name.clone();
                self.show_error(ValidationError::GenerationInProgress(busy).into());
                return None;
            }
            _ => {
                let (detail, err) = ProjectDetail::open(project.clone());
                self.screens.detail = Some(detail);
                if let Some(err) = err {
                    self.show_error(err);
                }
            }
        }

        if let Err(e) = self.store.mark_opened(&project.name) {
            self.show_error(e.into());
        }
        Some(ScreenKind::ProjectDetail)
    }

    fn show_error(&mut self, err: AppError) {
        warn!(error = %err, "showing error");
        if self.overlay.is_some() {
            self.pending_errors.push_back(err);
        } else {
            self.overlay = Some(Overlay::Error(ErrorBanner::new(err.to_string(), self.viewport)));
        }
    }

    fn show_prompt(&mut self, prompt: TextPrompt) {
        if self.overlay.is_some() {
            debug!(title = prompt.title(), "prompt dropped, overlay already active");
            return;
        }
        self.overlay = Some(Overlay::Prompt(prompt.with_viewport(self.viewport)));
    }

    /// once the overlay slot is free, show the next queued error
    fn show_pending(&mut self) {
        if self.overlay.is_none() {
            if let Some(err) = self.pending_errors.pop_front() {
                self.overlay = Some(Overlay::Error(ErrorBanner::new(err.to_string(), self.viewport)));
            }
        }
    }

    /// draw the active screen, the status bar and any overlay
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let theme = &self.theme;

        // clear with background colour
        frame.render_widget(Block::default().style(Style::new().bg(theme.background)), area);

        let [main, status] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

        self.screens.render(self.screen, frame, main, &self.store, theme);

        let keybinds = match &self.overlay {
            Some(Overlay::Error(_)) => " esc/enter:dismiss ",
            Some(Overlay::Prompt(_)) => " enter:confirm  esc:cancel ",
            None => self.screens.keybinds(self.screen),
        };
        let (message, is_error) = match (&self.overlay, self.pending_errors.len()) {
            (Some(Overlay::Error(_)), 0) => ("error".to_string(), true),
            (Some(Overlay::Error(_)), queued) => (format!("error ({queued} more queued)"), true),
            _ => (self.screens.status(self.screen).unwrap_or("").to_string(), false),
        };
        frame.render_widget(
            StatusBar::new(&message, is_error, theme).with_keybinds(keybinds),
            status,
        );

        if let Some(overlay) = &self.overlay {
            overlay.render(frame, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::project::{Output, ProjectStore};
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::from(code))
    }

    fn ch(c: char) -> AppEvent {
        key(KeyCode::Char(c))
    }

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::open(dir.path()).expect("open");
        (dir, App::new(store, Theme::plain()))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch(ch(c));
        }
    }

    fn banner(app: &App) -> Option<&str> {
        match app.overlay() {
            Some(Overlay::Error(banner)) => Some(banner.message()),
            _ => None,
        }
    }

    fn create_project(app: &mut App, name: &str) {
        app.dispatch(ch('n'));
        type_text(app, name);
        app.dispatch(key(KeyCode::Enter));
    }

    fn screen_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|frame| app.render(frame)).expect("draw");
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_starts_on_landing_without_overlay() {
        let (_dir, app) = app();
        assert_eq!(app.screen(), ScreenKind::Landing);
        assert!(app.overlay().is_none());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_create_project_through_prompt() {
        let (_dir, mut app) = app();
        app.dispatch(ch('n'));
        assert_eq!(app.screen(), ScreenKind::ProjectCreation);
        assert!(matches!(app.overlay(), Some(Overlay::Prompt(_))));

        type_text(&mut app, "Resume A");
        app.dispatch(key(KeyCode::Enter));

        assert_eq!(app.screen(), ScreenKind::Landing);
        assert!(app.overlay().is_none());
        assert_eq!(app.store().projects()[0].name, "Resume A");
    }

    #[test]
    fn test_duplicate_project_shows_banner_and_stays() {
        let (_dir, mut app) = app();
        create_project(&mut app, "Resume A");
        create_project(&mut app, "Resume A");

        assert_eq!(app.screen(), ScreenKind::ProjectCreation);
        assert_eq!(banner(&app), Some("project with name 'Resume A' already exists"));
        assert_eq!(app.store().projects().len(), 1);

        app.dispatch(key(KeyCode::Esc));
        assert!(app.overlay().is_none());
        assert_eq!(app.screen(), ScreenKind::ProjectCreation);
    }

    #[test]
    fn test_cancelled_prompt_has_no_side_effect() {
        let (_dir, mut app) = app();
        app.dispatch(ch('n'));
        type_text(&mut app, "abc");
        app.dispatch(key(KeyCode::Esc));

        assert!(app.overlay().is_none());
        assert_eq!(app.screen(), ScreenKind::ProjectCreation);
        assert!(app.store().projects().is_empty());
    }

    #[test]
    fn test_banner_swallows_other_keys() {
        let (_dir, mut app) = app();
        app.dispatch(ch('n'));
        app.dispatch(key(KeyCode::Enter));
        assert_eq!(banner(&app), Some("project name cannot be empty"));

        // would leave the screen or quit if it reached the screen
        app.dispatch(ch('q'));
        app.dispatch(ch('j'));
        assert!(banner(&app).is_some());
        assert_eq!(app.screen(), ScreenKind::ProjectCreation);

        app.dispatch(key(KeyCode::Enter));
        assert!(app.overlay().is_none());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let (_dir, mut app) = app();
        let mut release = KeyEvent::from(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        app.dispatch(AppEvent::Key(release));
        assert!(!app.should_quit());

        app.dispatch(AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.should_quit());
    }

    #[test]
    fn test_paste_goes_to_prompt_only() {
        let (_dir, mut app) = app();
        app.dispatch(AppEvent::Paste("ignored".to_string()));
        assert!(app.overlay().is_none());

        app.dispatch(ch('n'));
        app.dispatch(AppEvent::Paste("Pasted Name".to_string()));
        app.dispatch(key(KeyCode::Enter));
        assert_eq!(app.store().projects()[0].name, "Pasted Name");
    }

    #[test]
    fn test_model_manager_is_cached() {
        let (_dir, mut app) = app();
        app.store
            .save_models(vec![
                crate::config::ModelCredential { name: "a".into(), ..Default::default() },
                crate::config::ModelCredential { name: "b".into(), ..Default::default() },
            ])
            .expect("models");

        app.dispatch(ch('m'));
        app.dispatch(ch('j'));
        app.dispatch(ch('q'));
        assert_eq!(app.screen(), ScreenKind::Landing);

        app.dispatch(ch('M'));
        assert_eq!(app.screen(), ScreenKind::ModelManager);
        assert_eq!(app.model_manager().map(|m| m.cursor()), Some(1));
    }

    #[test]
    fn test_open_project_refreshes_last_opened() {
        let (_dir, mut app) = app();
        create_project(&mut app, "Resume A");
        let created = app.store().projects()[0].clone();

        app.dispatch(key(KeyCode::Enter));
        assert_eq!(app.screen(), ScreenKind::ProjectDetail);
        assert_eq!(app.project_detail().map(|d| d.project().name.as_str()), Some("Resume A"));
        assert!(app.store().projects()[0].last_opened >= created.last_opened);
    }

    #[test]
    fn test_generation_gating_and_completion() {
        let (_dir, mut app) = app();
        create_project(&mut app, "Resume A");
        app.dispatch(key(KeyCode::Enter));

        // add an output, then press generate in the job region
        app.dispatch(key(KeyCode::Tab));
        app.dispatch(ch('a'));
        app.dispatch(key(KeyCode::Tab));
        app.dispatch(ch('j'));
        app.dispatch(ch('j'));
        let request = app.dispatch(key(KeyCode::Enter)).expect("generation request");
        assert!(request.credential.is_none());

        // second press while in flight launches nothing
        assert!(app.dispatch(key(KeyCode::Enter)).is_none());

        let outcome = GenerationOutcome {
            project_dir: request.project_dir.clone(),
            result: Err(GenerationError::NoModelSelected),
        };
        app.dispatch(AppEvent::Generation(outcome));
        assert_eq!(banner(&app), Some("no LLM model selected"));
        assert_eq!(app.project_detail().map(|d| d.is_generating()), Some(false));
    }

    #[test]
    fn test_successful_completion_is_persisted_after_leaving() {
        let (_dir, mut app) = app();
        create_project(&mut app, "Resume A");
        app.dispatch(key(KeyCode::Enter));
        app.dispatch(key(KeyCode::Tab));
        app.dispatch(ch('a'));
        app.dispatch(key(KeyCode::Tab));
        app.dispatch(ch('j'));
        app.dispatch(ch('j'));
        let request = app.dispatch(key(KeyCode::Enter)).expect("generation request");

        // leave while generating; the cached screen still receives the result
        app.dispatch(key(KeyCode::Esc));
        assert_eq!(app.screen(), ScreenKind::Landing);

        let dir = request.project_dir.clone();
        app.dispatch(AppEvent::Generation(GenerationOutcome {
            project_dir: dir.clone(),
            result: Ok(Output {
                name: "2025-01-02-03-04-05".to_string(),
                job_description: String::new(),
                generated_text: "tailored".to_string(),
            }),
        }));
        assert!(app.overlay().is_none());

        let config = ProjectStore::load(&dir).expect("load");
        assert_eq!(config.outputs.len(), 2);
        assert_eq!(config.outputs[1].generated_text, "tailored");
    }

    #[test]
    fn test_opening_other_project_while_generating_is_refused() {
        let (_dir, mut app) = app();
        create_project(&mut app, "A");
        create_project(&mut app, "B");
        app.dispatch(key(KeyCode::Enter));
        app.dispatch(key(KeyCode::Tab));
        app.dispatch(ch('a'));
        app.dispatch(key(KeyCode::Tab));
        app.dispatch(ch('j'));
        app.dispatch(ch('j'));
        assert!(app.dispatch(key(KeyCode::Enter)).is_some());
        app.dispatch(ch('q'));

        app.dispatch(ch('j'));
        app.dispatch(key(KeyCode::Enter));
        assert_eq!(app.screen(), ScreenKind::Landing);
        assert_eq!(banner(&app), Some("a resume is still being generated for 'A'"));
    }

    #[test]
    fn test_errors_raised_under_overlay_are_queued() {
        let (_dir, mut app) = app();
        app.dispatch(ch('n'));
        app.dispatch(key(KeyCode::Enter));
        assert!(banner(&app).is_some());

        app.dispatch(AppEvent::Generation(GenerationOutcome {
            project_dir: "/nowhere".into(),
            result: Err(GenerationError::EmptyResponse),
        }));
        // no project screen yet, nothing to queue
        assert_eq!(app.pending_errors(), 0);

        app.show_error(GenerationError::EmptyResponse.into());
        assert_eq!(app.pending_errors(), 1);

        app.dispatch(key(KeyCode::Esc));
        assert_eq!(banner(&app), Some("received empty response from LLM"));
        app.dispatch(key(KeyCode::Esc));
        assert!(app.overlay().is_none());
    }

    #[test]
    fn test_status_bar_reports_queued_errors() {
        let (_dir, mut app) = app();
        app.dispatch(AppEvent::Resize(80, 20));
        app.dispatch(ch('n'));
        app.dispatch(key(KeyCode::Enter));
        app.show_error(GenerationError::EmptyResponse.into());

        let text = screen_text(&app, 80, 20);
        let status_row: String = text.chars().skip(80 * 19).collect();
        assert!(status_row.contains("error (1 more queued)"), "{status_row}");
        assert!(status_row.contains("esc/enter:dismiss"));

        app.dispatch(key(KeyCode::Esc));
        app.dispatch(key(KeyCode::Esc));
        let text = screen_text(&app, 80, 20);
        let status_row: String = text.chars().skip(80 * 19).collect();
        assert!(!status_row.contains("error"), "{status_row}");
    }

    #[test]
    fn test_resize_reaches_new_screens() {
        let (_dir, mut app) = app();
        app.dispatch(AppEvent::Resize(120, 40));
        app.dispatch(ch('m'));
        let text = screen_text(&app, 120, 40);
        // wide layout shows the details pane
        assert!(text.contains("Details"));
    }

    #[test]
    fn test_render_landing_and_banner() {
        let (_dir, mut app) = app();
        app.dispatch(AppEvent::Resize(100, 30));
        create_project(&mut app, "Resume A");

        let text = screen_text(&app, 100, 30);
        assert!(text.contains("Projects"));
        assert!(text.contains("Resume A"));
        assert!(text.contains("enter:open"));

        create_project(&mut app, "Resume A");
        let text = screen_text(&app, 100, 30);
        assert!(text.contains("Error"));
        assert!(text.contains("press esc or enter to dismiss"));
    }

    #[test]
    fn test_render_generating_notice() {
        let (_dir, mut app) = app();
        app.dispatch(AppEvent::Resize(100, 30));
        create_project(&mut app, "Resume A");
        app.dispatch(key(KeyCode::Enter));
        app.dispatch(key(KeyCode::Tab));
        app.dispatch(ch('a'));
        app.dispatch(key(KeyCode::Tab));
        app.dispatch(ch('j'));
        app.dispatch(ch('j'));
        app.dispatch(key(KeyCode::Enter));

        let text = screen_text(&app, 100, 30);
        assert!(text.contains("Generating resume..."));
        assert!(text.contains("Please stand by..."));
    }
}
