use clap::Parser;
use terms_resolver::utils::{logger, validation::Validate};
use terms_resolver::{
    AltinnClient, AppState, OrgDirectoryClient, ResolutionEngine, ServerConfig, TermsStoreClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_server_logger(config.verbose);
    }

    tracing::info!("Starting terms-resolver");
    if config.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let timeout = config.upstream_timeout();
    let roles = AltinnClient::new(config.altinn_url.clone(), timeout)?;
    let names = OrgDirectoryClient::new(config.org_directory_url.clone(), timeout)?;
    let store = TermsStoreClient::new(
        config.terms_store_url.clone(),
        timeout,
        config.retry_attempts,
    )?;

    let engine = ResolutionEngine::new(roles, names, store);
    let state = AppState::new(engine, config.api_key.clone());
    let app = terms_resolver::router(state);

    let addr = config.bind_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
