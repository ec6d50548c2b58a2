// resume generation: prompt, llm call, error classification

pub mod client;

use std::path::PathBuf;

use time::OffsetDateTime;
use time::macros::format_description;
use tracing::{info, warn};

use crate::clock;
use crate::config::ModelCredential;
use crate::error::GenerationError;
use crate::project::Output;

pub use client::{ClientError, HttpLlmClient, LlmClient};

/// everything a generation needs, captured when it is launched
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub project_dir: PathBuf,
    pub resume: String,
    pub job_description: String,
    /// none when the project's model is unset or no longer exists
    pub credential: Option<ModelCredential>,
}

/// result posted back to the event loop
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub project_dir: PathBuf,
    pub result: Result<Output, GenerationError>,
}

impl GenerationRequest {
    pub async fn run(self, client: &dyn LlmClient) -> GenerationOutcome {
        let result = self.generate(client).await;
        match &result {
            Ok(output) => info!(name = %output.name, "generation finished"),
            Err(e) => warn!(error = %e, "generation failed"),
        }
        GenerationOutcome {
            project_dir: self.project_dir,
            result,
        }
    }

    async fn generate(&self, client: &dyn LlmClient) -> Result<Output, GenerationError> {
        let credential = self.credential.as_ref().ok_or(GenerationError::NoModelSelected)?;

        info!(provider = %credential.provider, model = %credential.model, "generation started");
        let prompt = build_prompt(&self.resume, &self.job_description);
        let text = client
            .generate(credential, &prompt)
            .await
            .map_err(|e| classify(&e.to_string(), credential))?;

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(Output {
            name: output_name(clock::now()),
            job_description: self.job_description.clone(),
            generated_text: text,
        })
    }
}

/// fill the instruction template; both inputs are embedded verbatim
pub fn build_prompt(resume: &str, job_description: &str) -> String {
    format!(
        "\
You are a professional resume writer. Your task is to modify the given resume to better target a specific job description.
Follow these rules:
1. Keep the same LaTeX format
2. Highlight relevant skills and experiences
3. Use keywords from the job description
4. Be concise and professional
5. Do not invent new experiences

Original Resume:
{resume}

Job Description:
{job_description}

Please provide the modified resume in LaTeX format."
    )
}

/// turn client error text into a generation error, first match wins
pub fn classify(cause: &str, credential: &ModelCredential) -> GenerationError {
    let lower = cause.to_lowercase();
    let provider = credential.provider.clone();

    if lower.contains("invalid api key") {
        GenerationError::InvalidCredential { provider }
    } else if lower.contains("rate limit") {
        GenerationError::RateLimit { provider }
    } else if lower.contains("model not found") {
        GenerationError::ModelNotFound {
            provider,
            model: credential.model.clone(),
        }
    } else if lower.contains("connection refused") {
        GenerationError::ServiceUnavailable { provider }
    } else {
        GenerationError::Client {
            cause: cause.to_string(),
        }
    }
}

/// output name from the completion time, e.g. 2025-01-02-15-04-05
pub fn output_name(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day]-[hour]-[minute]-[second]");
    at.format(&format).unwrap_or_else(|_| at.unix_timestamp().to_string())
}
