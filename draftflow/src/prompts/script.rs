//! Prompts for the video script stages.

use super::year_context;
use crate::model::{OutlinePoint, ScriptBrief, ScriptDocument};

/// Stage 1: three packaging concepts.
#[must_use]
pub fn packaging(brief: &ScriptBrief, year: i32) -> String {
    let goal = brief
        .cta
        .as_deref()
        .map(str::trim)
        .filter(|cta| !cta.is_empty())
        .map(|cta| format!("Goal: Promote {cta}\n"))
        .unwrap_or_default();

    format!(
        "I'm creating a YouTube video about {topic}.
Target Audience: {audience}.
{goal}{context}

Develop 3 distinct packaging concepts. For each one define:
1. VIDEO IDEA: one line describing the pain point being solved
2. TITLE: triggers a curiosity loop and a must-click feeling
3. EXPECTATIONS: what viewers will expect when they click
4. THUMBNAIL: a loose concept with the key visual elements
5. PSYCHOLOGY: why this angle works

Write every field in {language}.",
        topic = brief.topic,
        audience = brief.target_audience,
        context = year_context(year),
        language = brief.language,
    )
}

/// Stage 2: a unique outline for the chosen concept.
#[must_use]
pub fn outline(doc: &ScriptDocument, year: i32) -> String {
    format!(
        "I have the following video concept:
- Topic: {topic}
- Pain Point: {pain}
- Title: {title}
- Expected Viewer Expectations: {expectations}
- {context}

Create a UNIQUE OUTLINE:
1. Brainstorm 7-10 candidate points for the body.
2. Gut-check each point as novel or generic.
3. Eliminate the generic ones.
4. Suggest angles the creator has not considered.
5. For the final 4-6 points apply What, Why and How.

Write all points in {language}. Return the final 4-6 points in the specified JSON format.",
        topic = doc.topic,
        pain = doc.selected_video_idea,
        title = doc.selected_title,
        expectations = doc.selected_expectations,
        context = year_context(year),
        language = doc.language,
    )
}

fn outline_summary(points: &[OutlinePoint]) -> String {
    points
        .iter()
        .map(|p| format!("- {}: {}", p.headline, p.what))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stage 3: the five-part intro hook.
#[must_use]
pub fn intro(doc: &ScriptDocument, year: i32) -> String {
    format!(
        "Using the 5-Part Intro Hook Framework, write my video intro.

CONTEXT:
- Video Topic: {topic}
- Title: {title}
- Viewer Expectations from title: {expectations}
- Current Year: {year}
- Outline Points:
{summary}

Parts:
1. IMMEDIATE CONTEXT: bluntly state what the video is about and confirm the click.
2. COMMON BELIEF: state the conventional wisdom the viewer holds.
3. CONTRARIAN TAKE: contradict it (\"But the good news is...\").
4. PROOF: establish why this approach can be trusted.
5. THE PLAN: state the steps that will be covered.

Keep it punchy and concise. Write the intro in {language}.",
        topic = doc.topic,
        title = doc.selected_title,
        expectations = doc.selected_expectations,
        summary = outline_summary(&doc.outline),
        language = doc.language,
    )
}

/// Stage 4: the body, written after the intro.
///
/// The intro text is embedded exactly as drafted, empty if the intro failed.
#[must_use]
pub fn body(doc: &ScriptDocument, year: i32) -> String {
    let outline_json = serde_json::to_string(&doc.outline).unwrap_or_default();
    let (cta_requirement, cta_instruction) = match doc.cta() {
        Some(cta) => (
            format!(
                "- CTA Requirement: Integrate a native mention of \"{cta}\" where it fits naturally as a solution.\n"
            ),
            format!(
                "\nNATIVE CTA INSTRUCTION: Frame the pain point, offer {cta} as the solution, explain why it helps, then move on.\n"
            ),
        ),
        None => (String::new(), String::new()),
    };

    format!(
        "Write the BODY of my script.

VIDEO CONTEXT:
- Title: {title}
- Intro: {intro}
- Current Year: {year}
- Outline Points: {outline_json}
{cta_requirement}
ORDERING: rank the points by novelty, then open with the second-best point, \
follow with the best, and continue with the rest.

FOR EACH POINT:
**Context**: say what it is.
**Application**: say how to do it, with examples.
**Framing**: say why it matters.

Add re-hooking transitions between points and alternate big picture with tactics.
{cta_instruction}
Write the body in {language}.",
        title = doc.selected_title,
        intro = doc.intro_script,
        language = doc.language,
    )
}

/// Stage 5: the high-note outro.
#[must_use]
pub fn outro(doc: &ScriptDocument, year: i32) -> String {
    let headlines = doc
        .outline
        .iter()
        .map(|p| p.headline.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Write a HIGH-NOTE OUTRO.

CONTEXT:
- Video Title: {title}
- Main Pain Point: {pain}
- Current Year: {year}
- Key Points Covered: {headlines}

The outro should recap the key insights, end on a memorable statement that \
shows expectations were exceeded, and invite likes, comments and the next video.

Write the outro in {language}.",
        title = doc.selected_title,
        pain = doc.selected_video_idea,
        language = doc.language,
    )
}
