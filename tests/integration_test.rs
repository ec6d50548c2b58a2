// integration tests for auto-resume, driven through the app's event api

use std::fs;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use auto_resume::config::{ConfigStore, GlobalConfig, ModelCredential};
use auto_resume::generation::{ClientError, LlmClient};
use auto_resume::project::ProjectStore;
use auto_resume::theme::Theme;
use auto_resume::tui::overlay::Overlay;
use auto_resume::tui::screens::ScreenKind;
use auto_resume::tui::{App, AppEvent};

/// create a temporary data directory
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// answers every prompt with a fixed reply
struct FakeClient {
    reply: Result<String, String>,
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn generate(&self, credential: &ModelCredential, prompt: &str) -> Result<String, ClientError> {
        assert_eq!(credential.name, "work");
        assert!(prompt.contains("Job Description:\nRust backend engineer"));
        self.reply.clone().map_err(ClientError::Other)
    }
}

fn key(app: &mut App, code: KeyCode) -> Option<auto_resume::generation::GenerationRequest> {
    app.dispatch(AppEvent::Key(KeyEvent::from(code)))
}

fn press(app: &mut App, c: char) {
    key(app, KeyCode::Char(c));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, c);
    }
}

fn banner(app: &App) -> Option<String> {
    match app.overlay() {
        Some(Overlay::Error(banner)) => Some(banner.message().to_string()),
        _ => None,
    }
}

/// landing -> creation prompt -> landing
fn create_project(app: &mut App, name: &str) {
    press(app, 'n');
    type_text(app, name);
    key(app, KeyCode::Enter);
}

/// add a credential through the model manager form
fn add_model(app: &mut App, name: &str) {
    press(app, 'm');
    press(app, 'a');
    for value in [name, "openai", "gpt-4o", "sk-test-key"] {
        key(app, KeyCode::Enter);
        type_text(app, value);
        key(app, KeyCode::Enter);
        press(app, 'j');
    }
    key(app, KeyCode::Enter);
    press(app, 'q');
}

/// open the first project, pick the first model, fill in resume and one job
fn prepare_project(app: &mut App) {
    key(app, KeyCode::Enter);
    assert_eq!(app.screen(), ScreenKind::ProjectDetail);

    // resume input
    press(app, 'j');
    press(app, 'i');
    app.dispatch(AppEvent::Paste("\\section{Experience}\nRust services".to_string()));
    key(app, KeyCode::Enter);

    // model picker
    press(app, 'j');
    press(app, 'l');
    key(app, KeyCode::Enter);

    // new output with a job description
    key(app, KeyCode::Tab);
    press(app, 'a');
    key(app, KeyCode::Tab);
    press(app, 'j');
    press(app, 'i');
    type_text(app, "Rust backend engineer");
    key(app, KeyCode::Enter);
    press(app, 'j');
}

#[test]
fn test_fresh_install_creates_empty_config() {
    let tmp = temp_dir();
    let data_dir = tmp.path().join("auto-resume");

    let store = ConfigStore::open(&data_dir).expect("open store");
    assert!(store.projects().is_empty());
    assert!(store.get_models().is_empty());

    let content = fs::read_to_string(data_dir.join("config.toml")).expect("config written");
    let config: GlobalConfig = toml::from_str(&content).expect("valid toml");
    assert_eq!(config, GlobalConfig::default());
}

#[test]
fn test_create_then_duplicate_project() {
    let tmp = temp_dir();
    let mut app = App::new(ConfigStore::open(tmp.path()).expect("open"), Theme::default());

    create_project(&mut app, "Resume A");
    assert_eq!(app.screen(), ScreenKind::Landing);
    assert!(tmp.path().join("projects/Resume A/project.toml").exists());

    create_project(&mut app, "Resume A");
    assert_eq!(app.screen(), ScreenKind::ProjectCreation);
    assert_eq!(
        banner(&app).as_deref(),
        Some("project with name 'Resume A' already exists")
    );

    // the file still lists exactly one project
    let reopened = ConfigStore::open(tmp.path()).expect("reopen");
    assert_eq!(reopened.projects().len(), 1);
}

#[test]
fn test_model_added_through_form_is_persisted() {
    let tmp = temp_dir();
    let mut app = App::new(ConfigStore::open(tmp.path()).expect("open"), Theme::default());

    add_model(&mut app, "work");
    assert_eq!(app.screen(), ScreenKind::Landing);
    assert!(app.overlay().is_none());

    let models = ConfigStore::open(tmp.path()).expect("reopen").get_models();
    assert_eq!(
        models,
        vec![ModelCredential {
            name: "work".to_string(),
            provider: "openai".to_string(),
            model: "gpt-4o".to_string(),
            api_key: "sk-test-key".to_string(),
        }]
    );

    // a second model with the same name is refused
    press(&mut app, 'm');
    press(&mut app, 'a');
    key(&mut app, KeyCode::Enter);
    type_text(&mut app, "work");
    key(&mut app, KeyCode::Enter);
    for _ in 0..4 {
        press(&mut app, 'j');
    }
    key(&mut app, KeyCode::Enter);
    assert_eq!(banner(&app).as_deref(), Some("model name 'work' must be unique"));
}

#[tokio::test]
async fn test_successful_generation_and_save() {
    let tmp = temp_dir();
    let mut app = App::new(ConfigStore::open(tmp.path()).expect("open"), Theme::default());
    create_project(&mut app, "Resume A");
    add_model(&mut app, "work");
    prepare_project(&mut app);

    let request = key(&mut app, KeyCode::Enter).expect("generation launched");
    assert_eq!(request.resume, "\\section{Experience}\nRust services");

    let client = FakeClient {
        reply: Ok("\\section{Tailored}".to_string()),
    };
    let outcome = request.run(&client).await;
    let project_dir = outcome.project_dir.clone();
    app.dispatch(AppEvent::Generation(outcome));
    assert!(app.overlay().is_none(), "unexpected banner: {:?}", banner(&app));

    let config = ProjectStore::load(&project_dir).expect("project config");
    assert_eq!(config.selected_model, "work");
    assert_eq!(config.outputs.len(), 2);
    let generated = &config.outputs[1];
    assert_eq!(generated.job_description, "Rust backend engineer");
    assert_eq!(generated.generated_text, "\\section{Tailored}");

    // the new output is selected; save writes its artifact
    press(&mut app, 'j');
    key(&mut app, KeyCode::Enter);
    let artifact = project_dir.join(format!("{}.pdf", generated.name));
    assert_eq!(fs::read_to_string(artifact).expect("artifact"), "\\section{Tailored}");
}

#[tokio::test]
async fn test_invalid_credential_is_reported() {
    let tmp = temp_dir();
    let mut app = App::new(ConfigStore::open(tmp.path()).expect("open"), Theme::default());
    create_project(&mut app, "Resume A");
    add_model(&mut app, "work");
    prepare_project(&mut app);

    let request = key(&mut app, KeyCode::Enter).expect("generation launched");
    let client = FakeClient {
        reply: Err("invalid API key (status 401): Incorrect API key provided".to_string()),
    };
    let outcome = request.run(&client).await;
    let project_dir = outcome.project_dir.clone();
    app.dispatch(AppEvent::Generation(outcome));

    assert_eq!(banner(&app).as_deref(), Some("invalid API key for openai"));
    assert_eq!(app.project_detail().map(|d| d.is_generating()), Some(false));

    let config = ProjectStore::load(&project_dir).expect("project config");
    assert_eq!(config.outputs.len(), 1);
}

#[test]
fn test_ctrl_s_persists_project_edits() {
    let tmp = temp_dir();
    let mut app = App::new(ConfigStore::open(tmp.path()).expect("open"), Theme::default());
    create_project(&mut app, "Resume A");
    key(&mut app, KeyCode::Enter);

    press(&mut app, 'i');
    type_text(&mut app, " v2");
    key(&mut app, KeyCode::Enter);
    app.dispatch(AppEvent::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));

    let dir = tmp.path().join("projects/Resume A");
    assert_eq!(ProjectStore::load(&dir).expect("load").name, "Resume A v2");
}
