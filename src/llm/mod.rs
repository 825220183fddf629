//! Blocking client for an OpenAI-compatible chat completion endpoint.
//!
//! The model call is an opaque boundary: full conversation history in, raw
//! payload out. Transport, HTTP-status, and envelope-decoding failures all
//! surface as [`Error::Transport`]; validating the inner proposal belongs to
//! [`crate::proposal`].

use crate::domain::ConversationEntry;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// Instructions seeded as the first conversation entry. The model must
/// answer every turn with a single JSON object in the proposal schema.
pub const SYSTEM_PROMPT: &str = r#"You are a senior software engineer working inside a command-line assistant.
The conversation may include the contents of files from the user's repository;
treat them as the current state of the code.

You can discuss and analyze code, create new files, and edit existing files.

Always answer with a single JSON object of this exact shape and nothing else:
{
  "assistant_reply": "your explanation or answer",
  "files_to_create": [{"path": "path/to/new/file", "content": "complete file content"}],
  "files_to_edit": [{"path": "path/to/existing/file", "original_snippet": "exact text to replace", "new_snippet": "replacement text"}]
}

Rules:
1. Output JSON only - no prose outside the object.
2. "files_to_create" and "files_to_edit" may be omitted or left empty when unused.
3. For edits, "original_snippet" must be copied verbatim from the file and
   should be unique within it; only its first occurrence is replaced.
"#;

/// Chat completion client over a blocking HTTP agent.
pub struct ChatClient {
    api_base: String,
    api_key: String,
    model: String,
    agent: ureq::Agent,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl ChatClient {
    pub fn new(api_base: &str, model: &str, api_key: String, timeout_secs: u64) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(timeout_secs))
                .build(),
        }
    }

    /// Send the full conversation history and return the raw assistant
    /// payload. Blocking; while a call is outstanding nothing else mutates
    /// the session.
    pub fn complete(&self, history: &[ConversationEntry]) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base);
        let payload = serde_json::json!({
            "model": self.model,
            "messages": history,
            "response_format": {"type": "json_object"},
            "stream": false,
        });

        tracing::debug!(url = %url, turns = history.len(), "sending chat completion request");

        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_string(&payload.to_string());

        match response {
            Ok(resp) => {
                let raw = resp
                    .into_string()
                    .map_err(|e| Error::transport(format!("failed reading response body: {e}")))?;
                extract_content(&raw)
            }
            Err(ureq::Error::Status(code, resp)) => {
                let detail = resp.into_string().unwrap_or_default();
                Err(Error::transport(format!("HTTP {code}: {detail}")))
            }
            Err(ureq::Error::Transport(e)) => Err(Error::transport(e.to_string())),
        }
    }
}

/// Pull the assistant message content out of the completion envelope.
fn extract_content(raw: &str) -> Result<String> {
    let completion: ChatCompletion = serde_json::from_str(raw)
        .map_err(|e| Error::transport(format!("unexpected completion envelope: {e}")))?;
    completion
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| Error::transport("completion contained no choices"))
}
