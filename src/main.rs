use std::net::SocketAddr;
use std::sync::Arc;
use vortexscope::orchestration::{BootstrapPolicy, Orchestrator};
use vortexscope::{api, config::Config, ChainStateSource, Databases, RootChainSource};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let databases = Arc::new(Databases::new(
        config.database_dir.clone(),
        config.default_database.clone(),
    ));
    // Open the default database up front so a bad DATABASE_DIR fails at startup.
    if let Err(e) = databases.repository(None).await {
        eprintln!("Failed to initialize database: {}", e);
        std::process::exit(1);
    }

    let chain: Arc<dyn ChainStateSource> = Arc::new(RootChainSource::new(
        config.chain_rpc_url.clone(),
        config.vtx_asset_id,
    ));
    let policy = BootstrapPolicy {
        bootstrap_root: config.bootstrap_root,
        root_asset_id: config.root_asset_id,
    };
    tracing::info!(
        "Bootstrap policy: {} of asset {} per cycle",
        policy.bootstrap_root,
        policy.root_asset_id
    );
    let orchestrator = Arc::new(Orchestrator::new(databases, chain, policy));

    let app = api::create_router(api::AppState::new(orchestrator));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
