//! Schema validation of the model's structured proposal.
//!
//! The raw payload is untrusted input: a single JSON object with the fields
//! of [`AssistantProposal`]. Unknown fields are ignored, missing lists
//! default to empty, and any structural mismatch fails the whole
//! interpretation with the raw payload preserved. No partially-parsed field
//! is ever acted on.

use crate::domain::AssistantProposal;
use crate::error::{Error, Result};

/// Validate a raw model payload into a proposal.
///
/// Markdown code fences around the JSON are tolerated; models wrap output
/// that way despite instructions.
pub fn interpret(raw: &str) -> Result<AssistantProposal> {
    let body = strip_code_fences(raw.trim());
    serde_json::from_str(body).map_err(|e| Error::schema(e.to_string(), raw))
}

/// Best-effort extraction of the reply text from a payload that failed full
/// interpretation. Used only for display: if the payload was valid JSON with
/// a textual `assistant_reply`, the user still gets to read it.
pub fn reply_text(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fences(raw.trim())).ok()?;
    value.get("assistant_reply")?.as_str().map(str::to_string)
}

fn strip_code_fences(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Drop the info string ("json", "JSON", ...) on the opening fence line.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return s,
    };
    rest.trim_end().strip_suffix("```").map(str::trim_end).unwrap_or(s)
}
