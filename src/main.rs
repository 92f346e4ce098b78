use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use long_audio_synth::domain::synthesis::{SynthesisRequestSubmitter, SynthesisSubmitterApi};
use long_audio_synth::error::AppResult;
use long_audio_synth::infrastructure::config::{Config, LogFormat};
use long_audio_synth::infrastructure::repositories::GoogleLongAudioRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    let invocation_id = Uuid::new_v4();
    let span = tracing::info_span!("synthesis", %invocation_id);

    run(config).instrument(span).await?;

    Ok(())
}

async fn run(config: Config) -> AppResult<()> {
    tracing::info!(
        project = %config.project_id,
        location = %config.location,
        endpoint = %config.api_endpoint,
        "Starting long audio synthesis"
    );

    let http_client = reqwest::Client::builder()
        .user_agent(concat!("long-audio-synth/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let repo = Arc::new(GoogleLongAudioRepository::new(
        http_client,
        config.google_settings(),
    ));
    let submitter = SynthesisRequestSubmitter::new(repo, config.await_settings());

    // Ctrl-C stops the local wait only
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received");
            ctrl_c.cancel();
        }
    });

    let completed = submitter.submit(&config.job(), cancel).await?;

    println!("Audio file saved to: {}", completed.destination_uri);

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "long_audio_synth=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "long_audio_synth=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
