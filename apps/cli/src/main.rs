mod config;
mod errors;
mod gate;
mod keywords;
mod matcher;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use clap::{ArgGroup, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gate::MATCH_THRESHOLD;
use crate::matcher::MatchResult;
use crate::services::http::{HttpExtractionClient, HttpGenerationClient};
use crate::workflow::{JobInputMode, Orchestrator, Stage};

/// Exit code when generation was blocked by the match gate.
const EXIT_GATE_BLOCKED: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "rolenav", version)]
#[command(about = "Tailor a resume to a target job: extract, match, and generate a PDF")]
#[command(group(ArgGroup::new("job").required(true).args(["job_title", "job_description"])))]
struct Cli {
    /// Path to the resume PDF
    resume: PathBuf,

    /// Target job title
    #[arg(long)]
    job_title: Option<String>,

    /// Full job description text
    #[arg(long)]
    job_description: Option<String>,

    /// Generate even when the match score is below the threshold
    #[arg(long)]
    force: bool,

    /// Base URL of the backend service (overrides SERVICE_URL)
    #[arg(long)]
    service_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = cli
        .service_url
        .unwrap_or(config.service_url)
        .trim_end_matches('/')
        .to_string();

    let extraction = Arc::new(HttpExtractionClient::new(base_url.clone()));
    let generation = Arc::new(HttpGenerationClient::new(base_url));
    let orchestrator = Orchestrator::new(extraction, generation);

    let (mode, job_text) = match (cli.job_title, cli.job_description) {
        (Some(title), _) => (JobInputMode::Title, title),
        (None, Some(description)) => (JobInputMode::Description, description),
        (None, None) => unreachable!("clap enforces the job arg group"),
    };
    orchestrator.set_job_input(mode, &job_text).await;

    let document = tokio::fs::read(&cli.resume)
        .await
        .with_context(|| format!("Failed to read {}", cli.resume.display()))?;

    let state = orchestrator.select_document(Bytes::from(document)).await;
    if let Some(err) = &state.last_error {
        bail!("{err}");
    }
    if !state.can_generate() {
        bail!("Generation is unavailable: provide a readable resume and a non-empty job text.");
    }

    let state = orchestrator.request_generation(cli.force).await;
    if let Some(result) = &state.match_result {
        print_match(result);
    }

    match state.stage {
        Stage::Done => {
            let url = state.artifact_url.as_deref().unwrap_or_default();
            println!("Generated resume: {url}");
            Ok(())
        }
        Stage::GateBlocked => {
            let percent = state.match_result.map(|r| r.percent).unwrap_or(0);
            eprintln!("Match is {percent}%, below the {MATCH_THRESHOLD}% threshold.");
            eprintln!(
                "Re-run with --force to generate anyway, or work the missing keywords into the resume first."
            );
            std::process::exit(EXIT_GATE_BLOCKED);
        }
        _ => match state.last_error {
            Some(err) => bail!("{err}"),
            None => bail!("pipeline ended in unexpected stage {:?}", state.stage),
        },
    }
}

fn print_match(result: &MatchResult) {
    println!("Match: {}% - {}", result.percent, result.note);
    if !result.present.is_empty() {
        println!(
            "  present ({}): {}",
            result.present.len(),
            result.present.join(", ")
        );
    }
    if !result.missing.is_empty() {
        println!(
            "  missing ({}): {}",
            result.missing.len(),
            result.missing.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_job_title_or_description_is_required() {
        let err = Cli::try_parse_from(["rolenav", "resume.pdf"]);
        assert!(err.is_err());

        let ok = Cli::try_parse_from(["rolenav", "resume.pdf", "--job-title", "Rust Engineer"]);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_title_and_description_are_mutually_exclusive() {
        let err = Cli::try_parse_from([
            "rolenav",
            "resume.pdf",
            "--job-title",
            "Rust Engineer",
            "--job-description",
            "We need a Rust engineer.",
        ]);
        assert!(err.is_err());
    }
}
