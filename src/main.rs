use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use nu_ansi_term::Color;

use auto_resume::config::ConfigStore;
use auto_resume::generation::HttpLlmClient;
use auto_resume::settings::Settings;
use auto_resume::theme::Theme;
use auto_resume::{clock, logging, tui};

fn main() -> ExitCode {
    // before any thread exists
    clock::capture_local_offset();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", Color::Red.bold().paint("error:"), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<()> {
    let settings = Settings::load();
    let data_dir = settings
        .resolve_data_dir()
        .context("cannot resolve home directory, set AUTO_RESUME_DATA_DIR")?;

    let log_path = logging::init_to_file(&data_dir, settings.log_level())?;
    tracing::info!(log = %log_path.display(), data_dir = %data_dir.display(), "starting auto-resume");

    let store = ConfigStore::open(&data_dir).context("failed to load configuration")?;
    let client = HttpLlmClient::new(settings.request_timeout()).context("failed to build http client")?;
    let theme = Theme::from_name(settings.theme_name());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(tui::run(store, theme, Arc::new(client)))
}
