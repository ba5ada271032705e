//! Word-compatible HTML documents and plain-text renderings.

use super::markdown::{markdown_to_html, MarkdownFlavor};
use crate::model::{BlogOutlineSection, ScriptDocument};
use std::fmt::Write as _;

/// Byte-order mark prepended to Word documents.
pub const BOM: char = '\u{feff}';

const ARTICLE_STYLE: &str = "body { font-family: Arial, sans-serif; line-height: 1.6; }
          h1 { font-size: 24px; color: #333; }
          h2 { font-size: 20px; color: #444; margin-top: 20px; }
          h3 { font-size: 16px; color: #666; margin-top: 15px; }";

const SCRIPT_STYLE: &str = "body { font-family: Arial, sans-serif; line-height: 1.6; }
          h1 { font-size: 24px; color: #333; }
          h2 { font-size: 18px; color: #444; margin-top: 20px; background-color: #f0f0f0; padding: 5px; }
          h3 { font-size: 16px; color: #666; margin-top: 15px; }
          p { margin-bottom: 10px; }";

const OUTLINE_STYLE: &str = "body { font-family: Arial, sans-serif; line-height: 1.6; }
          h1 { font-size: 24px; color: #333; }
          h2 { font-size: 20px; color: #444; margin-top: 20px; }
          ul { margin-top: 10px; }
          li { margin-bottom: 5px; }";

fn shell(title: &str, style: &str, body_html: &str) -> String {
    format!(
        "{BOM}<html xmlns:o='urn:schemas-microsoft-com:office:office' xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>
      <head>
        <meta charset='utf-8'>
        <title>{title}</title>
        <style>
          {style}
        </style>
      </head>
      <body>{body_html}</body>
      </html>
"
    )
}

/// Wraps `body_html` in an HTML document Word opens natively.
#[must_use]
pub fn word_document(title: &str, body_html: &str) -> String {
    shell(title, ARTICLE_STYLE, body_html)
}

/// Finished article as a Word document.
#[must_use]
pub fn article_document(title: &str, markdown: &str) -> String {
    word_document(title, &markdown_to_html(markdown, MarkdownFlavor::Blog))
}

/// The text exactly as written.
#[must_use]
pub fn plain_text(content: &str) -> String {
    content.to_string()
}

/// Blog outline as a Word document.
#[must_use]
pub fn outline_document(title: &str, sections: &[BlogOutlineSection]) -> String {
    let mut body = format!("<h1>Outline: {title}</h1>");
    for section in sections {
        let _ = write!(body, "<h2>{}</h2>", section.heading);
        if !section.key_points.is_empty() {
            body.push_str("<ul>");
            for point in &section.key_points {
                let _ = write!(body, "<li>{point}</li>");
            }
            body.push_str("</ul>");
        }
    }
    shell(&format!("{title} - Outline"), OUTLINE_STYLE, &body)
}

/// Assembled script as plain text.
#[must_use]
pub fn script_text(doc: &ScriptDocument) -> String {
    let cta = doc.cta().map(|c| format!("CTA: {c}")).unwrap_or_default();
    format!(
        "TITLE: {title}\nTOPIC: {topic}\nTARGET AUDIENCE: {audience}\n{cta}\n\n\
         === PART 1: INTRO ===\n{intro}\n\n\
         === PART 2: BODY ===\n{body}\n\n\
         === PART 3: OUTRO ===\n{outro}\n",
        title = doc.selected_title,
        topic = doc.topic,
        audience = doc.target_audience,
        intro = doc.intro_script,
        body = doc.body_script,
        outro = doc.outro_script,
    )
}

/// Assembled script as a Word document.
#[must_use]
pub fn script_document(doc: &ScriptDocument) -> String {
    let mut body = format!(
        "<h1>{}</h1><p><b>Topic:</b> {}</p><p><b>Target Audience:</b> {}</p>",
        doc.selected_title, doc.topic, doc.target_audience
    );
    if let Some(cta) = doc.cta() {
        let _ = write!(body, "<p><b>CTA:</b> {cta}</p>");
    }
    let parts = [
        ("Phase 3: The Hook (Intro)", &doc.intro_script),
        ("Phase 4: The Body", &doc.body_script),
        ("Phase 5: The Outro", &doc.outro_script),
    ];
    for (heading, text) in parts {
        let _ = write!(body, "<hr><h2>{heading}</h2>{}", markdown_to_html(text, MarkdownFlavor::Script));
    }
    shell(&doc.selected_title, SCRIPT_STYLE, &body)
}
