//! Keyword matching: compares the resume vocabulary against the job
//! vocabulary and produces a score with present/missing partitions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::gate::MATCH_THRESHOLD;
use crate::keywords::extract_keywords;

/// Result of matching a resume against a job text.
///
/// `present` and `missing` partition the job keywords exactly: disjoint,
/// union equal to the full job keyword list, both in job-text order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub percent: u32,
    pub present: Vec<String>,
    pub missing: Vec<String>,
    pub note: String,
}

/// Matches `resume_text` against `job_text`.
///
/// Job keywords keep their extraction order (meaningful for display); the
/// resume side is only a membership set. An empty job keyword list scores 0
/// rather than dividing by zero. Pure and deterministic.
pub fn match_keywords(resume_text: &str, job_text: &str) -> MatchResult {
    let job_keywords = extract_keywords(job_text);
    let resume_keywords: HashSet<String> = extract_keywords(resume_text).into_iter().collect();

    let total = job_keywords.len();
    let (present, missing): (Vec<String>, Vec<String>) = job_keywords
        .into_iter()
        .partition(|k| resume_keywords.contains(k));

    let percent = if total == 0 {
        0
    } else {
        ((present.len() as f64 / total as f64) * 100.0).round() as u32
    };

    let note = if percent < MATCH_THRESHOLD {
        "Low match. Resume not strongly aligned.".to_string()
    } else {
        "Good match. Ready to generate.".to_string()
    };

    MatchResult {
        percent,
        present,
        missing,
        note,
    }
}
