//! auto-resume: a terminal app for tailoring resumes to job descriptions
//!
//! projects and model credentials live in a global config, each project keeps
//! its resume input and generated outputs in its own project.toml

pub mod clock;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod project;
pub mod settings;
pub mod theme;
pub mod tui;
