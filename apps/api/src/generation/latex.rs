//! LaTeX assembly: escaping, section block builders, and template fill.
//!
//! All pure string work so the whole pipeline short of pdflatex itself is
//! unit-testable.

use crate::generation::content::{
    EducationEntry, ExperienceEntry, ProjectEntry, ResumeContent, SkillGroups,
};

/// Escapes LaTeX-reserved characters so arbitrary resume text cannot break
/// the document or smuggle in commands.
pub fn latex_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(ch),
        }
    }
    out
}

fn bullets_block(bullets: &[String]) -> String {
    let items: Vec<String> = bullets
        .iter()
        .map(|b| latex_escape(b))
        .filter(|b| !b.trim().is_empty())
        .map(|b| format!(r"\item {b}"))
        .collect();
    if items.is_empty() {
        r"\item ".to_string()
    } else {
        items.join("\n")
    }
}

fn education_block(entries: &[EducationEntry]) -> String {
    let mut parts = Vec::new();
    for e in entries {
        let school = latex_escape(&e.school);
        let degree = latex_escape(&e.degree);
        let location = latex_escape(&e.location);
        let dates = latex_escape(&e.dates);
        let details = latex_escape(&e.details);

        if [&school, &degree, &location, &dates, &details]
            .iter()
            .all(|s| s.is_empty())
        {
            continue;
        }

        parts.push(format!(r"\resumeEntry{{{school}}}{{{location}}}"));
        parts.push(format!(r"\resumeSub{{{degree}}}{{{dates}}}"));
        if !details.is_empty() {
            parts.push(format!(r"{{\small {details}}}"));
        }
        parts.push(r"\vspace{6pt}".to_string());
    }
    if parts.is_empty() {
        r"\resumeEntry{ }{ }".to_string()
    } else {
        parts.join("\n")
    }
}

fn skills_block(skills: &SkillGroups) -> String {
    // Label on the left, comma-joined list on the right.
    let join = |items: &[String]| latex_escape(&items.join(", "));

    format!(
        "\\begin{{tabularx}}{{\\textwidth}}{{@{{}} l X @{{}}}}\n\
         \\textbf{{Languages:}} & {} \\\\\n\
         \\textbf{{Frameworks:}} & {} \\\\\n\
         \\textbf{{Tools:}} & {} \\\\\n\
         \\textbf{{Platforms:}} & {} \\\\\n\
         \\textbf{{Soft Skills:}} & {} \\\\\n\
         \\end{{tabularx}}",
        join(&skills.languages),
        join(&skills.frameworks),
        join(&skills.tools),
        join(&skills.platforms),
        join(&skills.soft_skills),
    )
}

fn experience_block(entries: &[ExperienceEntry]) -> String {
    let mut parts = Vec::new();
    for x in entries {
        let company = latex_escape(&x.company);
        let title = latex_escape(&x.title);
        let location = latex_escape(&x.location);
        let dates = latex_escape(&x.dates);

        if [&company, &title, &location, &dates].iter().all(|s| s.is_empty()) {
            continue;
        }

        parts.push(format!(r"\resumeEntry{{{company}}}{{{location}}}"));
        parts.push(format!(r"\resumeSub{{{title}}}{{{dates}}}"));
        parts.push(format!(r"\resumeBullets{{{}}}", bullets_block(&x.bullets)));
        parts.push(r"\vspace{4pt}".to_string());
    }
    if parts.is_empty() {
        r"\resumeEntry{ }{ }".to_string()
    } else {
        parts.join("\n")
    }
}

fn projects_block(entries: &[ProjectEntry]) -> String {
    let mut parts = Vec::new();
    for p in entries {
        let name = latex_escape(&p.name);
        let desc = latex_escape(&p.desc);
        let tech = latex_escape(&p.tech);

        if [&name, &desc, &tech].iter().all(|s| s.is_empty()) {
            continue;
        }

        parts.push(format!(r"\resumeEntry{{{name}}}{{}}"));
        if !desc.is_empty() {
            parts.push(format!(r"{{\small {desc}}}"));
        }
        if !tech.is_empty() {
            parts.push(format!(r"{{\small \textit{{Tech:}} {tech}}}"));
        }
        parts.push(format!(r"\resumeBullets{{{}}}", bullets_block(&p.bullets)));
        parts.push(r"\vspace{4pt}".to_string());
    }
    if parts.is_empty() {
        r"\resumeEntry{ }{ }".to_string()
    } else {
        parts.join("\n")
    }
}

/// Fills the template placeholders with escaped, assembled content.
pub fn fill_template(template: &str, content: &ResumeContent) -> String {
    let name = if content.name.is_empty() {
        "YOUR NAME".to_string()
    } else {
        latex_escape(&content.name)
    };

    template
        .replace("<<NAME>>", &name)
        .replace("<<EMAIL>>", &latex_escape(&content.email))
        .replace("<<PHONE>>", &latex_escape(&content.phone))
        .replace("<<PORTFOLIO>>", &latex_escape(&content.portfolio))
        .replace("<<GITHUB>>", &latex_escape(&content.github))
        .replace("<<EDUCATION_BLOCK>>", &education_block(&content.education))
        .replace("<<SKILLS_BLOCK>>", &skills_block(&content.skills))
        .replace(
            "<<EXPERIENCE_BLOCK>>",
            &experience_block(&content.experience),
        )
        .replace("<<PROJECTS_BLOCK>>", &projects_block(&content.projects))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_covers_reserved_characters() {
        assert_eq!(latex_escape("R&D 100% #1"), r"R\&D 100\% \#1");
        assert_eq!(latex_escape("a_b{c}~d^e"), r"a\_b\{c\}\textasciitilde{}d\textasciicircum{}e");
        assert_eq!(latex_escape(r"C:\bin"), r"C:\textbackslash{}bin");
    }

    #[test]
    fn test_escape_passes_plain_text_through() {
        assert_eq!(latex_escape("Rust engineer, 5 years"), "Rust engineer, 5 years");
    }

    #[test]
    fn test_empty_education_renders_placeholder_entry() {
        assert_eq!(education_block(&[]), r"\resumeEntry{ }{ }");
        // An all-blank entry is skipped, not rendered
        assert_eq!(
            education_block(&[EducationEntry::default()]),
            r"\resumeEntry{ }{ }"
        );
    }

    #[test]
    fn test_education_entry_renders_school_and_degree() {
        let block = education_block(&[EducationEntry {
            school: "MIT".to_string(),
            degree: "B.Sc.".to_string(),
            location: "Cambridge".to_string(),
            dates: "2020".to_string(),
            details: String::new(),
        }]);
        assert!(block.contains(r"\resumeEntry{MIT}{Cambridge}"));
        assert!(block.contains(r"\resumeSub{B.Sc.}{2020}"));
        assert!(!block.contains(r"\small"));
    }

    #[test]
    fn test_empty_bullets_render_single_blank_item() {
        assert_eq!(bullets_block(&[]), r"\item ");
        assert_eq!(bullets_block(&["  ".to_string()]), r"\item ");
    }

    #[test]
    fn test_experience_bullets_are_escaped() {
        let block = experience_block(&[ExperienceEntry {
            company: "ACME".to_string(),
            title: "Engineer".to_string(),
            location: String::new(),
            dates: String::new(),
            bullets: vec!["Cut costs by 10%".to_string()],
        }]);
        assert!(block.contains(r"\item Cut costs by 10\%"));
    }

    #[test]
    fn test_skills_block_joins_lists() {
        let block = skills_block(&SkillGroups {
            languages: vec!["Rust".to_string(), "Python".to_string()],
            ..Default::default()
        });
        assert!(block.contains(r"\textbf{Languages:} & Rust, Python \\"));
        assert!(block.starts_with(r"\begin{tabularx}"));
        assert!(block.ends_with(r"\end{tabularx}"));
    }

    #[test]
    fn test_fill_template_replaces_every_placeholder() {
        let template = "<<NAME>>|<<EMAIL>>|<<PHONE>>|<<PORTFOLIO>>|<<GITHUB>>|\
                        <<EDUCATION_BLOCK>>|<<SKILLS_BLOCK>>|<<EXPERIENCE_BLOCK>>|<<PROJECTS_BLOCK>>";
        let filled = fill_template(template, &ResumeContent::default());
        assert!(!filled.contains("<<"));
        assert!(filled.starts_with("YOUR NAME|"));
    }

    #[test]
    fn test_fill_template_escapes_name() {
        let content = ResumeContent {
            name: "Ada & Co".to_string(),
            ..Default::default()
        };
        let filled = fill_template("<<NAME>>", &content);
        assert_eq!(filled, r"Ada \& Co");
    }
}
