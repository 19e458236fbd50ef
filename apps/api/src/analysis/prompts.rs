// Résumé analysis prompt templates.

use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, JSON_ONLY_REMINDER};

/// Shape the model is asked to reproduce. Field names match `AnalysisResult`.
pub const ANALYSIS_JSON_EXAMPLE: &str = r#"{
    "summary": "Experienced software engineer with expertise in Python, Flask, and cloud platforms.",
    "skills": ["Python", "Flask", "AWS", "Docker", "REST APIs"],
    "industries": ["Tech", "Cloud Computing"],
    "suggested_companies": ["Google", "Amazon", "Microsoft"],
    "suggested_roles": ["Software Engineer", "Backend Developer"]
}"#;

pub const ANALYSIS_PROMPT_TEMPLATE: &str = "Analyze the following resume.
{json_only}
The JSON object should adhere to the following structure and contain these fields:

{json_example}

Here is the resume text to analyze:
{resume_text}

{json_reminder}
";

pub fn build_analysis_prompt(resume_text: &str) -> String {
    // resume_text goes last so a literal placeholder inside the résumé is never expanded.
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{json_example}", ANALYSIS_JSON_EXAMPLE)
        .replace("{json_reminder}", JSON_ONLY_REMINDER)
        .replace("{resume_text}", resume_text)
}
