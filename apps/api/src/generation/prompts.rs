//! Prompts for the resume-rewrite call.

pub const REWRITE_SYSTEM: &str = "\
You are an ATS resume rewriting assistant.
Hard rules:
- Use ONLY facts present in RESUME_TEXT.
- Do NOT invent companies, degrees, dates, tools, metrics.
- If missing, use empty string.
- Output ONLY valid JSON (no markdown, no explanation).
";

pub const REWRITE_PROMPT_TEMPLATE: &str = r#"RESUME_TEXT:
{resume_text}

JOB_DESCRIPTION:
{job_text}

Return JSON with exactly these keys:
{
  "name": "",
  "email": "",
  "phone": "",
  "portfolio": "",
  "github": "",
  "education": [{"school":"","degree":"","location":"","dates":"","details":""}],
  "skills": {
    "Languages": [],
    "Frameworks": [],
    "Tools": [],
    "Platforms": [],
    "Soft Skills": []
  },
  "experience": [
    {
      "company":"",
      "title":"",
      "location":"",
      "dates":"",
      "bullets":[]
    }
  ],
  "projects": [
    {
      "name":"",
      "desc":"",
      "tech":"",
      "bullets":[]
    }
  ]
}

Notes:
- Keep bullets concise, ATS-friendly, job-relevant.
- Do not duplicate.
- If something isn't in resume text, keep it blank."#;
