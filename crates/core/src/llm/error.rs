use crate::llm::Provider;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone)]
pub struct ModelInvocationError {
    pub provider: Provider,
    pub stage: &'static str,
    pub detail: String,
    pub raw_response: Option<String>,
    pub raw_response_json: Option<Value>,
}

impl ModelInvocationError {
    pub fn new(provider: Provider, stage: &'static str, detail: impl Into<String>) -> Self {
        Self {
            provider,
            stage,
            detail: detail.into(),
            raw_response: None,
            raw_response_json: None,
        }
    }
}

impl fmt::Display for ModelInvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "model invocation failed (provider={:?}, stage={}): {}",
            self.provider, self.stage, self.detail
        )
    }
}

impl std::error::Error for ModelInvocationError {}
