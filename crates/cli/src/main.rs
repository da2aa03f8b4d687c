use anyhow::Context;
use clap::Parser;
use meshi_core::domain::recommendation::RecommendationRequest;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "meshi_cli")]
struct Args {
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,

    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,

    /// Date to plan meals for (YYYY-MM-DD). Defaults to today's JST date.
    #[arg(long)]
    date: Option<String>,

    /// Print the prompt that would be sent to the model and exit.
    #[arg(long)]
    prompt_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = meshi_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let date = match args.date {
        Some(s) => {
            meshi_core::domain::contract::parse_date(&s)?;
            s
        }
        None => meshi_core::time::weekday::today_jst()?
            .format("%Y-%m-%d")
            .to_string(),
    };
    let request = RecommendationRequest {
        latitude: serde_json::Number::from_f64(args.latitude).context("latitude must be finite")?,
        longitude: serde_json::Number::from_f64(args.longitude).context("longitude must be finite")?,
        date,
    };

    if args.prompt_only {
        println!("{}", meshi_core::llm::prompt::build_prompt(&request));
        return Ok(());
    }

    let client = meshi_core::llm::vertex::VertexGeminiClient::from_settings(&settings)?;
    let outcome = meshi_core::pipeline::recommend(&client, &request).await;

    tracing::info!(source = ?outcome.source, date = %request.date, "recommendation run finished");

    let json = serde_json::to_string_pretty(&outcome.payload)
        .context("failed to serialize recommendations")?;
    println!("{json}");
    Ok(())
}

fn init_sentry(settings: &meshi_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
