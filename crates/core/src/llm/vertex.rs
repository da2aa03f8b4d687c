use crate::config::Settings;
use crate::llm::error::ModelInvocationError;
use crate::llm::{ModelInvoker, Provider};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

#[derive(Debug, Clone)]
enum TokenSource {
    Static(String),
    MetadataServer,
}

#[derive(Debug, Clone)]
pub struct VertexGeminiClient {
    http: reqwest::Client,
    token: TokenSource,
    base_url: String,
    project: String,
    location: String,
    model: String,
}

impl VertexGeminiClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let project = settings.require_google_cloud_project()?.to_string();
        let location = settings.location.clone();
        let base_url = std::env::var("VERTEX_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("https://{location}-aiplatform.googleapis.com"));
        let model = std::env::var("VERTEX_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        // No timeout unless configured; the hosting platform bounds the request.
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = std::env::var("VERTEX_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("failed to build reqwest client")?;

        let token = match &settings.google_access_token {
            Some(token) => TokenSource::Static(token.clone()),
            None => TokenSource::MetadataServer,
        };

        tracing::info!(%project, %location, %model, "vertex client initialized");

        Ok(Self {
            http,
            token,
            base_url,
            project,
            location,
            model,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.project,
            self.location,
            self.model
        )
    }

    async fn access_token(&self) -> anyhow::Result<String> {
        match &self.token {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::MetadataServer => {
                let res = self
                    .http
                    .get(METADATA_TOKEN_URL)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await
                    .map_err(|e| {
                        ModelInvocationError::new(Provider::VertexGemini, "auth", e.to_string())
                    })?;

                let status = res.status();
                if !status.is_success() {
                    let text = res.text().await.unwrap_or_default();
                    return Err(ModelInvocationError {
                        raw_response: Some(text),
                        ..ModelInvocationError::new(
                            Provider::VertexGemini,
                            "auth",
                            format!("metadata server status={status}"),
                        )
                    }
                    .into());
                }

                let token = res.json::<MetadataToken>().await.map_err(|e| {
                    ModelInvocationError::new(Provider::VertexGemini, "auth", e.to_string())
                })?;
                Ok(token.access_token)
            }
        }
    }

    async fn generate_content(
        &self,
        req: &GenerateContentRequest<'_>,
    ) -> anyhow::Result<GenerateContentResponse> {
        let token = self.access_token().await?;
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                ModelInvocationError::new(
                    Provider::VertexGemini,
                    "auth",
                    format!("access token is not a valid header value: {e}"),
                )
            })?,
        );

        let res = self
            .http
            .post(self.url())
            .headers(headers)
            .json(req)
            .send()
            .await
            .map_err(|e| ModelInvocationError::new(Provider::VertexGemini, "http", e.to_string()))?;

        let status = res.status();
        let text = res.text().await.map_err(|e| {
            ModelInvocationError::new(Provider::VertexGemini, "http", e.to_string())
        })?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<serde_json::Value>(&text).ok();
            return Err(ModelInvocationError {
                raw_response: Some(text),
                raw_response_json,
                ..ModelInvocationError::new(
                    Provider::VertexGemini,
                    "http",
                    format!("status={status}"),
                )
            }
            .into());
        }

        serde_json::from_str::<GenerateContentResponse>(&text).map_err(|e| {
            ModelInvocationError {
                raw_response: Some(text),
                ..ModelInvocationError::new(Provider::VertexGemini, "decode", e.to_string())
            }
            .into()
        })
    }

    fn response_text(res: &GenerateContentResponse) -> String {
        let Some(content) = res.candidates.first().and_then(|c| c.content.as_ref()) else {
            return String::new();
        };
        content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .concat()
    }
}

#[async_trait::async_trait]
impl ModelInvoker for VertexGeminiClient {
    fn provider(&self) -> Provider {
        Provider::VertexGemini
    }

    async fn generate_text(&self, prompt: &str) -> anyhow::Result<String> {
        let req = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
        };
        let res = self.generate_content(&req).await?;
        Ok(Self::response_text(&res))
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
}
