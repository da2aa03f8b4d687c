pub mod domain;
pub mod llm;
pub mod pipeline;
pub mod time;

pub mod config {
    use anyhow::Context;

    const DEFAULT_LOCATION: &str = "asia-northeast1";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub google_cloud_project: Option<String>,
        pub location: String,
        pub google_access_token: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                google_cloud_project: non_empty_var("GOOGLE_CLOUD_PROJECT"),
                location: non_empty_var("LOCATION").unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
                google_access_token: non_empty_var("GOOGLE_ACCESS_TOKEN"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_google_cloud_project(&self) -> anyhow::Result<&str> {
            self.google_cloud_project
                .as_deref()
                .context("GOOGLE_CLOUD_PROJECT is required")
        }
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                google_cloud_project: None,
                location: DEFAULT_LOCATION.to_string(),
                google_access_token: None,
                sentry_dsn: None,
            }
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

}
