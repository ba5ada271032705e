//! Free-text mode: pass-through with an optional sources list.

use crate::provider::Citation;
use std::collections::HashSet;

/// De-duplicates citations by URL, keeping the first-seen title.
#[must_use]
pub fn unique_sources(citations: &[Citation]) -> Vec<Citation> {
    let mut seen = HashSet::new();
    citations
        .iter()
        .filter(|c| !c.url.trim().is_empty())
        .filter(|c| seen.insert(c.url.as_str()))
        .cloned()
        .collect()
}

/// Renders citations as a Markdown list under a `Sources` heading.
///
/// Returns `None` when there is nothing to render.
#[must_use]
pub fn render_sources(citations: &[Citation]) -> Option<String> {
    let unique = unique_sources(citations);
    if unique.is_empty() {
        return None;
    }

    let mut block = String::from("### Sources\n");
    for citation in unique {
        let title = if citation.title.trim().is_empty() {
            citation.url.as_str()
        } else {
            citation.title.trim()
        };
        block.push_str(&format!("- [{}]({})\n", title, citation.url));
    }
    Some(block)
}

/// Finalizes a free-text stage result.
#[must_use]
pub fn finalize_text(text: &str, citations: &[Citation]) -> String {
    match render_sources(citations) {
        Some(sources) => format!("{}\n\n{}", text.trim_end(), sources),
        None => text.to_string(),
    }
}
