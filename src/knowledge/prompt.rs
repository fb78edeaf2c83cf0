// Portfolio context rendering and system preamble assembly
// Author: kelexine (https://github.com/kelexine)

use super::profile::PortfolioProfile;
use std::fmt::Write;

/// Render the profile into the PORTFOLIO CONTEXT block.
pub fn render_knowledge(portfolio: &PortfolioProfile) -> String {
    let mut out = String::new();
    let p = &portfolio.profile;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "PROFILE:");
    let _ = writeln!(out, "- Name: {}", p.name);
    let _ = writeln!(out, "- Role: {}", p.role);
    let _ = writeln!(out, "- Experience: {} years", p.experience_years);
    if let Some(location) = &p.location {
        let _ = writeln!(out, "- Location: {}", location);
    }
    let _ = writeln!(out, "- Summary: {}", p.summary);

    let _ = writeln!(out, "\nCORE SKILLS:");
    for skill in &portfolio.core_skills {
        let _ = writeln!(out, "- {}", skill);
    }

    let _ = writeln!(out, "\nWORK EXPERIENCE:");
    for job in &portfolio.experience {
        let _ = writeln!(out, "\n{} ({}) - {}", job.company, job.period, job.role);
        let _ = writeln!(out, "Product: {}", job.product);
        let _ = writeln!(out, "Key Impact:");
        for highlight in &job.highlights {
            let _ = writeln!(out, "- {}", highlight);
        }
    }

    let _ = writeln!(out, "\nPROJECTS:");
    for project in &portfolio.projects {
        let _ = writeln!(out, "\n{}", project.name);
        let _ = writeln!(out, "Stack: {}", project.stack.join(", "));
        let _ = writeln!(out, "Impact: {}", project.impact);
    }

    if !portfolio.chat.greeting.is_empty() {
        let _ = writeln!(out, "\nCHAT CONTEXT:");
        let _ = writeln!(out, "- Greeting: {}", portfolio.chat.greeting);
    }

    let _ = writeln!(out, "\nIMPORTANT RULE:");
    let _ = writeln!(out, "Only answer questions using the facts above.");
    let _ = write!(
        out,
        "If the answer is not present, say you don't have that information yet."
    );

    out
}

/// Full instruction text sent as the leading `system` message.
pub fn system_prompt(portfolio: &PortfolioProfile) -> String {
    format!(
        r#"You are "{assistant}", a portfolio assistant and interview assistant for {owner}.

NON-NEGOTIABLE RULES:
1) Only answer using facts in PORTFOLIO CONTEXT.
2) Do not invent experience, metrics, or tools.
3) If information is missing, say so clearly.
4) Keep answers concise and professional.

ANSWER STYLE:
- For recruiter or interview questions, use a structured format:
  - Context (what/where)
  - Action (what you did)
  - Result (measurable outcome if available)
- Prefer metrics when present in the context.
- Keep responses under 80 words unless asked to go deeper.

PORTFOLIO CONTEXT:
{context}"#,
        assistant = portfolio.assistant_name,
        owner = portfolio.first_name(),
        context = render_knowledge(portfolio),
    )
}
