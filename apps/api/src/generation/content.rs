//! Structured resume content produced by the rewrite model.
//!
//! The model is instructed to output strict JSON in exactly this shape.
//! Every field defaults so a sparse resume still renders; the prompt forbids
//! inventing facts, so blanks are expected.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{REWRITE_PROMPT_TEMPLATE, REWRITE_SYSTEM};
use crate::llm_client::LlmClient;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeContent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub portfolio: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: SkillGroups,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub details: String,
}

/// Skill lists keyed the way the model emits them (display labels).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillGroups {
    #[serde(rename = "Languages", default)]
    pub languages: Vec<String>,
    #[serde(rename = "Frameworks", default)]
    pub frameworks: Vec<String>,
    #[serde(rename = "Tools", default)]
    pub tools: Vec<String>,
    #[serde(rename = "Platforms", default)]
    pub platforms: Vec<String>,
    #[serde(rename = "Soft Skills", default)]
    pub soft_skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub tech: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// Rewrites the raw resume text against the job text, returning structured
/// content ready for template fill.
pub async fn rewrite_resume(
    llm: &LlmClient,
    resume_text: &str,
    job_text: &str,
) -> Result<ResumeContent, AppError> {
    let prompt = REWRITE_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_text}", job_text);

    let content = llm
        .call_json::<ResumeContent>(&prompt, REWRITE_SYSTEM)
        .await
        .map_err(|e| AppError::Generation(format!("resume rewrite failed: {e}")))?;

    info!(
        "rewrote resume: {} experience entries, {} projects",
        content.experience.len(),
        content.projects.len()
    );
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_content_deserializes() {
        let json = r#"{
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+1 555 0100",
            "portfolio": "https://ada.dev",
            "github": "https://github.com/ada",
            "education": [
                {"school": "University of London", "degree": "B.Sc. Mathematics",
                 "location": "London", "dates": "1835", "details": "First class"}
            ],
            "skills": {
                "Languages": ["Rust", "Python"],
                "Frameworks": ["Tokio"],
                "Tools": ["Git"],
                "Platforms": ["Linux"],
                "Soft Skills": ["Analysis"]
            },
            "experience": [
                {"company": "Analytical Engines Ltd", "title": "Engineer",
                 "location": "London", "dates": "1840-1843",
                 "bullets": ["Wrote the first program"]}
            ],
            "projects": [
                {"name": "Notes", "desc": "Annotated translation",
                 "tech": "Pen", "bullets": ["Published notes G"]}
            ]
        }"#;

        let content: ResumeContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.name, "Ada Lovelace");
        assert_eq!(content.skills.languages, vec!["Rust", "Python"]);
        assert_eq!(content.skills.soft_skills, vec!["Analysis"]);
        assert_eq!(content.experience[0].bullets.len(), 1);
    }

    #[test]
    fn test_missing_keys_default_to_blank() {
        let content: ResumeContent = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(content.name, "Ada");
        assert!(content.email.is_empty());
        assert!(content.education.is_empty());
        assert!(content.skills.languages.is_empty());
        assert!(content.projects.is_empty());
    }

    #[test]
    fn test_skill_groups_use_display_labels_on_the_wire() {
        let json = serde_json::to_value(SkillGroups {
            soft_skills: vec!["Mentoring".to_string()],
            ..Default::default()
        })
        .unwrap();
        assert!(json.get("Soft Skills").is_some());
        assert!(json.get("soft_skills").is_none());
    }
}
