//! Call-centre support agent backed by a hosted, fine-tuned model.
//!
//! One question in, one answer out. No tools, no memory between calls.

use crate::{
    config::AgentConfig,
    error::{CarrierError, CarrierResult},
};
use reqwest::Client;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub output_text: String,
    pub trace_id: String,
}

pub struct SupportAgent {
    config: AgentConfig,
    client: Client,
}

impl SupportAgent {
    pub fn new(config: AgentConfig) -> Self {
        Self { config, client: Client::new() }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Request body for a single-turn run, tagged with `trace_id`.
    pub fn build_request(&self, input_text: &str, trace_id: &str) -> Value {
        let c = &self.config;
        json!({
            "model": c.model,
            "instructions": c.instructions,
            "input": [{
                "role": "user",
                "content": [{ "type": "input_text", "text": input_text }],
            }],
            "temperature": c.temperature,
            "top_p": c.top_p,
            "max_output_tokens": c.max_output_tokens,
            "store": c.store,
            "metadata": {
                "__trace_source__": c.trace_source,
                "agent": c.name,
                "workflow_id": c.workflow_id,
                "trace_id": trace_id,
            },
        })
    }

    pub async fn run(&self, input_text: &str) -> CarrierResult<AgentReply> {
        let api_key = std::env::var(&self.config.api_key_env).map_err(|_| {
            CarrierError::Agent(format!("{} is not set", self.config.api_key_env))
        })?;
        let trace_id = uuid::Uuid::new_v4().to_string();
        let body = self.build_request(input_text, &trace_id);
        let url = format!("{}/responses", self.config.base_url.trim_end_matches('/'));

        log::info!("agent {}: trace {trace_id} -> {}", self.config.name, self.config.model);
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload: Value = response.json().await?;
        if !status.is_success() {
            let message = payload["error"]["message"]
                .as_str()
                .unwrap_or("request failed")
                .to_string();
            return Err(CarrierError::Agent(format!("{status}: {message}")));
        }

        let output_text = extract_output_text(&payload)
            .ok_or_else(|| CarrierError::Agent("response contained no output text".into()))?;
        Ok(AgentReply { output_text, trace_id })
    }
}

/// Top-level `output_text` if present, else every `output_text` part of every
/// output message, concatenated.
pub fn extract_output_text(payload: &Value) -> Option<String> {
    if let Some(text) = payload["output_text"].as_str() {
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }
    let text: String = payload["output"]
        .as_array()?
        .iter()
        .filter_map(|item| item["content"].as_array())
        .flatten()
        .filter(|part| part["type"] == "output_text")
        .filter_map(|part| part["text"].as_str())
        .collect();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_output_messages() {
        let payload = json!({
            "output": [
                { "type": "reasoning", "summary": [] },
                { "type": "message", "content": [
                    { "type": "output_text", "text": "Your plan " },
                    { "type": "output_text", "text": "renews on the 1st." }
                ]}
            ]
        });
        assert_eq!(
            extract_output_text(&payload).as_deref(),
            Some("Your plan renews on the 1st.")
        );
    }

    #[test]
    fn empty_output_is_none() {
        assert_eq!(extract_output_text(&json!({ "output": [] })), None);
        assert_eq!(extract_output_text(&json!({})), None);
    }
}
