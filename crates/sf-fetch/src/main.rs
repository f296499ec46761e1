use clap::Parser;
use sf_fetch::cli::Args;
use sf_fetch::config::{build_http_client, load_dotenv, Config};
use sf_fetch::errors::SfFetchError;
use sf_fetch::{observability, report};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), SfFetchError> {
    let args = Args::parse();
    // .env may carry RUST_LOG / SF_FETCH_LOG_JSON, so it loads before tracing
    load_dotenv();
    observability::init_tracing();

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(client_id = %config.client_id, domain = %config.domain, "Configuration loaded");

    let request = args.record_request();
    let http_client = build_http_client()?;
    let record = sf_fetch::run(&config, &request, &args.api_version, http_client)
        .await
        .map_err(|e| {
            error!("Run failed: {}", e);
            e
        })?;

    let stdout = std::io::stdout();
    report::write_record(&mut stdout.lock(), &request.resource_type, &record)?;

    Ok(())
}
