//! Prompts for the blog stages.

use super::{year_context, BODY_CONTEXT_CHAR_LIMIT, RESEARCH_CHAR_LIMIT};
use crate::model::{BlogBrief, BlogDocument};
use crate::utils::{truncate_chars, truncate_with_ellipsis};
use std::fmt::Write as _;

/// Audience suggestions for a topic.
#[must_use]
pub fn audiences(topic: &str, language: &str) -> String {
    format!(
        "Suggest 5 specific target audiences for a blog post about \"{topic}\".
Each audience should be a short phrase (2-6 words) describing a reader segment with a distinct need.
Return a JSON array of strings. Write the audiences in {language}."
    )
}

/// Stage 1: three headline strategies.
#[must_use]
pub fn strategy(brief: &BlogBrief, year: i32) -> String {
    format!(
        "I need to write a blog post about \"{topic}\".
Target Audience: {audience}.
Desired Tone: {tone}.
{context}

Generate 3 distinct blog post strategies that satisfy search intent.
Decide whether the topic is informational or transactional.

For each strategy provide:
1. A catchy, SEO-optimized title with a year ({year}), number or hook
2. An SEO hook: why it will rank and match intent
3. 3-5 target keywords, primary and LSI

Output strictly in {language}.",
        topic = brief.topic,
        audience = brief.target_audience,
        tone = brief.tone,
        context = year_context(year),
        language = brief.language,
    )
}

/// Stage 2: a superset outline, informed by research when present.
#[must_use]
pub fn outline(doc: &BlogDocument, year: i32) -> String {
    let mut prompt = format!(
        "Create a \"Superset Outline\" for the blog post title: \"{title}\".
Target Keywords: {keywords}.
Desired Tone: {tone}.
{context}",
        title = doc.selected_title,
        keywords = doc.seo_keywords.join(", "),
        tone = doc.tone,
        context = year_context(year),
    );

    if doc.has_research() {
        prompt.push_str("\n\nCOMPETITOR RESEARCH (top ranking content provided by user):\n");
        for (index, content) in doc.competitor_content.iter().enumerate() {
            let content = content.trim();
            if content.is_empty() {
                continue;
            }
            let _ = writeln!(
                prompt,
                "--- Competitor {} ---\n{}...",
                index + 1,
                truncate_chars(content, RESEARCH_CHAR_LIMIT)
            );
        }
        prompt.push_str(
            "\nINSTRUCTIONS:
1. Identify every key topic the competitors cover.
2. Build a structure that covers everything they cover, plus insights they missed.",
        );
    } else {
        prompt.push_str("\n\nRequirements:\n- Cover all potential sub-topics a competitor might have.");
    }

    let _ = write!(
        prompt,
        "
- MUST INCLUDE an FAQ section based on \"People Also Asked\" questions.
- Structure with main headings (H2) and bullet points.

Output strictly in {}.",
        doc.language
    );
    prompt
}

/// Stage 3: the full article.
#[must_use]
pub fn content(doc: &BlogDocument, year: i32) -> String {
    let outline_json = serde_json::to_string(&doc.outline).unwrap_or_default();
    format!(
        "Write a complete, high-quality blog post based on this outline.

Title: {title}
Outline: {outline_json}
Tone: {tone}
{context}

GUIDELINES:
1. One or two sentences per paragraph.
2. Emotional hook intro, body following the outline (H2s, bullets), conclusion with a CTA.
3. End with a META DATA section (title and description).
4. Markdown, with [Image Placeholder: Description] where relevant.
5. Define core keywords early (\"[Keyword] IS [Definition]\").

Output the full blog post in {language}.",
        title = doc.selected_title,
        tone = doc.tone,
        context = year_context(year),
        language = doc.language,
    )
}

/// Intro regeneration: only the introduction, with truncated body context.
#[must_use]
pub fn intro(title: &str, body: &str, tone: &str, language: &str, year: i32) -> String {
    format!(
        "Write a PERFECT blog post introduction for the following article.

TITLE: {title}

ARTICLE BODY (for context):
{body} (truncated for context)

{context}
Tone: {tone}

REQUIREMENTS:
1. Hook: an emotional hook or a direct question.
2. Pivot to the solution immediately.
3. Briefly establish why this advice works.
4. Bullet what the reader will learn.
5. Short, punchy paragraphs.

Output ONLY the introduction text in Markdown. Do not include the title.
Write in {language}.",
        body = truncate_with_ellipsis(body, BODY_CONTEXT_CHAR_LIMIT),
        context = year_context(year),
    )
}
