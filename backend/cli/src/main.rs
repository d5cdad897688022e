use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use scamlens_analysis::{AnalysisService, OpenAiProvider};
use scamlens_config::AppConfig;
use scamlens_core::LlmProvider;
use scamlens_gateway::{start_server, AppState, CooldownLimiter};

#[derive(Parser)]
#[command(name = "scamlens")]
#[command(about = "scamlens — scam assessment for text and images, aimed at elderly users")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the scamlens HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show current server status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();
    scamlens_logging::init_logger(&config.log_dir, &config.log_level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = AppConfig {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("scamlens is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        api_key = %config.redacted_key(),
        ocr_model = %config.ocr_model,
        classify_model = %config.classify_model,
        "Starting scamlens"
    );

    let analysis = config.openai_api_key.as_ref().map(|key| {
        let provider: Arc<dyn LlmProvider> = Arc::new(
            OpenAiProvider::new(key.clone())
                .with_base_url(config.openai_base_url.clone())
                .with_timeout(Duration::from_secs(config.request_timeout_secs)),
        );
        Arc::new(AnalysisService::new(
            provider,
            config.ocr_model.clone(),
            config.classify_model.clone(),
        ))
    });
    if analysis.is_none() {
        warn!("OPENAI_API_KEY is not set; /api/analyze will return a configuration error");
    }

    let state = AppState {
        limiter: CooldownLimiter::new(Duration::from_millis(config.cooldown_ms)),
        analysis,
    };

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    start_server(addr, state).await
}
