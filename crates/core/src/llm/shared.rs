use crate::config::Settings;
use crate::llm::error::ModelInvocationError;
use crate::llm::vertex::VertexGeminiClient;
use crate::llm::{ModelInvoker, Provider};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Process-wide model client, built on first use.
///
/// A failed build is not cached: the error surfaces as that request's invocation failure and the
/// next request tries again.
pub struct SharedInvoker {
    cell: OnceCell<Arc<dyn ModelInvoker>>,
    settings: Settings,
}

impl SharedInvoker {
    pub fn lazy(settings: Settings) -> Self {
        Self {
            cell: OnceCell::new(),
            settings,
        }
    }

    pub fn ready(invoker: Arc<dyn ModelInvoker>) -> Self {
        Self {
            cell: OnceCell::new_with(Some(invoker)),
            settings: Settings::default(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn get(&self) -> anyhow::Result<&Arc<dyn ModelInvoker>> {
        self.cell
            .get_or_try_init(|| async {
                let client = VertexGeminiClient::from_settings(&self.settings).map_err(|e| {
                    ModelInvocationError::new(Provider::VertexGemini, "init", format!("{e:#}"))
                })?;
                Ok::<_, anyhow::Error>(Arc::new(client) as Arc<dyn ModelInvoker>)
            })
            .await
    }
}

#[async_trait::async_trait]
impl ModelInvoker for SharedInvoker {
    fn provider(&self) -> Provider {
        Provider::VertexGemini
    }

    async fn generate_text(&self, prompt: &str) -> anyhow::Result<String> {
        self.get().await?.generate_text(prompt).await
    }
}
