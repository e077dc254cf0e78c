use anyhow::{anyhow, Result};
use clap::Parser;
use reqwest::Client;
use sa_token_issuer::config::inputs::InputSource;
use sa_token_issuer::pipeline::TokenPipeline;
use sa_token_issuer::secrets::build_secret_store;
use sa_token_issuer::server;
use sa_token_issuer::server::IssuerState;
use sa_token_issuer::utils::config_loader;
use sa_token_issuer::utils::logging;
use sa_token_issuer::utils::logging::LogLevel;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "sa-token-issuer.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Issue one token from the environment, print it and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Build the secret store and the pipeline
    // -------------------------------

    let client = Client::builder()
        .use_rustls_tls()
        .build()
        .map_err(|e| anyhow!("cannot build http client: {}", e))?;
    let store = build_secret_store(&service_config.secret_store, &client);
    let pipeline = TokenPipeline::new(store);

    // -------------------------------
    // 3. One-shot mode
    // -------------------------------

    if args.once {
        return pipeline
            .run_once(&InputSource::Environment, &mut std::io::stdout().lock())
            .await;
    }

    // -------------------------------
    // 4. Start http server
    // -------------------------------

    let issuer_state = IssuerState::from_config(
        pipeline,
        InputSource::Environment,
        &service_config.settings.invocation,
    );
    info!("Service starting...");
    server::server::start(&service_config.settings, issuer_state).await
}
