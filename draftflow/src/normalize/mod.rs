//! Response normalization.
//!
//! Two modes:
//! - **Structured**: salvage a JSON payload from text that may carry code
//!   fences or surrounding prose. Never fails; malformed input degrades to
//!   [`Normalized::Empty`].
//! - **Free text**: pass the text through, appending a sources list when the
//!   provider reported grounding citations.

mod structured;
mod text;

pub use structured::{
    assign_fallback_ids, extract_payload, parse_structured, parse_structured_list,
    strip_code_fences, EmptyReason, Normalized,
};
pub use text::{finalize_text, render_sources, unique_sources};
