//! pdflatex rendering of the assembled document.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::AppError;

/// Filename of the published artifact inside the output directory.
pub const LATEST_PDF_NAME: &str = "latest_resume.pdf";

/// How much compiler output to keep in an error message.
const LOG_TAIL_BYTES: usize = 2000;

/// Compiles `latex` with two pdflatex passes in a scratch directory and
/// publishes the result as the latest artifact under `output_dir`.
pub async fn render_pdf(latex: &str, output_dir: &Path) -> Result<PathBuf, AppError> {
    let workdir = tempfile::tempdir()
        .map_err(|e| AppError::Generation(format!("failed to create workdir: {e}")))?;
    let tex_path = workdir.path().join("resume.tex");
    tokio::fs::write(&tex_path, latex)
        .await
        .map_err(|e| AppError::Generation(format!("failed to write resume.tex: {e}")))?;

    // References need a second pass to settle.
    for pass in 1..=2u32 {
        run_pdflatex(workdir.path(), pass).await?;
    }

    let pdf_path = workdir.path().join("resume.pdf");
    if !pdf_path.exists() {
        return Err(AppError::Generation("PDF not produced.".to_string()));
    }

    let dest = output_dir.join(LATEST_PDF_NAME);
    tokio::fs::copy(&pdf_path, &dest)
        .await
        .map_err(|e| AppError::Generation(format!("failed to publish artifact: {e}")))?;

    info!("published artifact at {}", dest.display());
    Ok(dest)
}

async fn run_pdflatex(workdir: &Path, pass: u32) -> Result<(), AppError> {
    debug!("pdflatex pass {pass}");
    let output = Command::new("pdflatex")
        .args(["-interaction=nonstopmode", "-halt-on-error", "resume.tex"])
        .current_dir(workdir)
        .output()
        .await
        .map_err(|e| AppError::Generation(format!("failed to run pdflatex: {e}")))?;

    if !output.status.success() {
        let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
        log.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(AppError::Generation(format!(
            "pdflatex failed (pass {pass}):\n{}",
            tail(&log, LOG_TAIL_BYTES)
        )));
    }
    Ok(())
}

/// Last `max_bytes` of `log`, nudged forward to a character boundary.
fn tail(log: &str, max_bytes: usize) -> &str {
    if log.len() <= max_bytes {
        return log;
    }
    let mut start = log.len() - max_bytes;
    while !log.is_char_boundary(start) {
        start += 1;
    }
    &log[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_returns_short_input_whole() {
        assert_eq!(tail("short log", 2000), "short log");
    }

    #[test]
    fn test_tail_truncates_long_input() {
        let log = "x".repeat(5000);
        assert_eq!(tail(&log, 2000).len(), 2000);
    }

    #[test]
    fn test_tail_respects_char_boundaries() {
        let log = "é".repeat(100); // 2 bytes per char
        let result = tail(&log, 25); // falls mid-character
        assert!(result.chars().all(|c| c == 'é'));
        assert_eq!(result.len(), 24);
    }
}
