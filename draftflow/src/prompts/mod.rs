//! Instruction builders for every stage.
//!
//! Prompt wording is treated as opaque content. What matters here is the
//! context each builder threads in: topic, audience, language and tone from
//! the brief, prior stage output, the configured year, and truncated
//! research or article text.

pub mod blog;
pub mod schema;
pub mod script;

/// Character budget per competitor research entry.
pub const RESEARCH_CHAR_LIMIT: usize = 3000;

/// Character budget for article body context during intro regeneration.
pub const BODY_CONTEXT_CHAR_LIMIT: usize = 5000;

const SCRIPT_PERSONA: &str = "\
You are an expert YouTube script writer who follows a five-step framework: \
packaging, outline, intro, body and outro.

Core principle: when reality beats expectations, viewers stay; when \
expectations beat reality, they leave. Every decision must make the video \
exceed what the title promised.

Always:
- prefer unique, novel points over generic advice
- frame every point with What, Why and How
- open the body with the second-best point
- re-hook the viewer between points
- keep language clear and actionable";

const BLOG_PERSONA: &str = "\
You are an elite SEO content writer. Given a target keyword, write a \
complete post that satisfies search intent immediately.

Process:
1. Decide whether the intent is informational or transactional.
2. Build a superset outline covering every sub-topic a competitor might \
cover, plus an FAQ drawn from \"People Also Asked\" questions.
3. Write at a 7th-8th grade reading level in paragraphs of one or two \
sentences. Define core concepts as \"[Keyword] IS [Definition].\"
4. Title carries the keyword plus a click element. Use H2s for main points, \
bullets for lists, and [Image Placeholder: Description] where an image fits.
5. End with a conclusion, a call to action, and a Meta Title and Meta \
Description under 160 characters.

Return clean Markdown.";

fn with_language(persona: &str, language: &str) -> String {
    format!("{persona}\n\nIMPORTANT:\nYou MUST write all content in the following language: {language}.")
}

/// System instruction for script stages.
#[must_use]
pub fn script_system_instruction(language: &str) -> String {
    with_language(SCRIPT_PERSONA, language)
}

/// System instruction for blog stages.
#[must_use]
pub fn blog_system_instruction(language: &str) -> String {
    with_language(BLOG_PERSONA, language)
}

/// The shared "current context" line.
pub(crate) fn year_context(year: i32) -> String {
    format!("Current Context: The year is {year}.")
}
