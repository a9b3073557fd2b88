//! Decision oracles
//!
//! The oracle seam keeps the agent logic testable: production uses an
//! OpenAI-style completion endpoint, tests use a scripted queue.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use domus_core::{DomusError, Result};

use crate::command::LockCommand;
use crate::lock_agent::Decision;

/// External decision service: given the instruction, the current state label
/// and the recent history, return one raw response token.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    async fn decide(
        &self,
        instruction: &str,
        state_label: &str,
        history: &[Decision],
    ) -> Result<String>;
}

#[async_trait]
impl<T: DecisionOracle + ?Sized> DecisionOracle for std::sync::Arc<T> {
    async fn decide(
        &self,
        instruction: &str,
        state_label: &str,
        history: &[Decision],
    ) -> Result<String> {
        (**self).decide(instruction, state_label, history).await
    }
}

/// Configuration for the completion-backed oracle.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    pub base_url: String,
    pub model: String,
    /// Bearer token; absent means an unauthenticated endpoint.
    pub api_key: Option<String>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Oracle backed by an OpenAI-style chat-completions endpoint. One request
/// per decision; the response is expected to be a bare token and is only
/// trimmed here, never retried - the caller coerces invalid tokens.
pub struct CompletionOracle {
    client: reqwest::Client,
    config: OracleConfig,
}

impl CompletionOracle {
    pub fn new(config: OracleConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn prompt(instruction: &str, state_label: &str, history: &[Decision]) -> String {
        let history_text = history
            .iter()
            .map(|d| format!("{} -> {}", d.scenario, d.command))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "You are an assistant controlling a smart lock. The lock state is currently '{state_label}'.\n\
             Past actions:\n{history_text}\n\n\
             Decide whether to Lock, Unlock, or ClearJam based on the user's instruction:\n\
             Instruction: \"{instruction}\"\n\n\
             Only respond with one of these options exactly: Lock, Unlock, ClearJam, or None (if no action needed)."
        )
    }
}

#[async_trait]
impl DecisionOracle for CompletionOracle {
    async fn decide(
        &self,
        instruction: &str,
        state_label: &str,
        history: &[Decision],
    ) -> Result<String> {
        let prompt = Self::prompt(instruction, state_label, history);
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": 10,
            "temperature": 0,
        });

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomusError::Oracle(e.to_string()))?;
        if !response.status().is_success() {
            return Err(DomusError::Oracle(format!(
                "completion endpoint returned {}",
                response.status()
            )));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomusError::Oracle(e.to_string()))?;
        let token = payload
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();
        debug!(%token, "oracle response");
        Ok(token)
    }
}

/// Deterministic oracle for tests and offline demos: pops canned responses
/// in order and answers `None` once exhausted.
pub struct ScriptedOracle {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of decisions that actually reached this oracle.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecisionOracle for ScriptedOracle {
    async fn decide(&self, _: &str, _: &str, _: &[Decision]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut queue = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(queue
            .pop_front()
            .unwrap_or_else(|| LockCommand::NoAction.token().to_string()))
    }
}
