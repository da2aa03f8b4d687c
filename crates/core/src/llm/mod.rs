pub mod error;
pub mod json;
pub mod prompt;
pub mod shared;
pub mod vertex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    VertexGemini,
}

/// One free-text prompt in, one free-text answer out.
#[async_trait::async_trait]
pub trait ModelInvoker: Send + Sync {
    fn provider(&self) -> Provider;

    /// Returns the model's text verbatim (possibly empty). Errors wrap
    /// [`error::ModelInvocationError`] or context from building the client.
    async fn generate_text(&self, prompt: &str) -> anyhow::Result<String>;
}
