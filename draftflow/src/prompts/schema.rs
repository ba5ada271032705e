//! Response schemas for structured stages, in the provider's schema dialect.

use serde_json::{json, Value};

fn string_field(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({ "type": "OBJECT", "properties": properties, "required": required })
}

/// List of packaging ideas.
#[must_use]
pub fn packaging() -> Value {
    array_of(object(
        json!({
            "title": string_field("Curiosity-driven title"),
            "thumbnail": string_field("Visual concept elements"),
            "videoIdea": string_field("Pain point being solved"),
            "expectations": string_field("What viewers expect from this title"),
            "psychology": string_field("Why this angle triggers curiosity"),
        }),
        &["title", "thumbnail", "videoIdea", "expectations", "psychology"],
    ))
}

/// List of script outline points.
#[must_use]
pub fn script_outline() -> Value {
    array_of(object(
        json!({
            "id": { "type": "STRING" },
            "headline": string_field("The unique angle or point name"),
            "what": string_field("What is this point?"),
            "why": string_field("Why does it matter to the audience?"),
            "how": string_field("How does it fit, as an actionable step?"),
        }),
        &["id", "headline", "what", "why", "how"],
    ))
}

/// List of blog strategies.
#[must_use]
pub fn blog_ideas() -> Value {
    array_of(object(
        json!({
            "title": { "type": "STRING" },
            "seoHook": { "type": "STRING" },
            "targetKeywords": array_of(json!({ "type": "STRING" })),
        }),
        &["title", "seoHook", "targetKeywords"],
    ))
}

/// List of blog outline sections.
#[must_use]
pub fn blog_outline() -> Value {
    array_of(object(
        json!({
            "id": { "type": "STRING" },
            "heading": { "type": "STRING" },
            "keyPoints": array_of(json!({ "type": "STRING" })),
        }),
        &["id", "heading", "keyPoints"],
    ))
}

/// Plain list of strings.
#[must_use]
pub fn string_list() -> Value {
    array_of(json!({ "type": "STRING" }))
}
