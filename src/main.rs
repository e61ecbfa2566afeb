use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use peermatch_api::RestApi;
use peermatch_engine::Recommender;
use peermatch_store::HttpUserStore;

/// Peer recommendation service
#[derive(Parser, Debug)]
#[command(name = "peermatch")]
#[command(about = "Recommends peer users by clustering and similarity", long_about = None)]
struct Args {
    /// Base URL of the user document store
    #[arg(long, default_value = "http://localhost:8081")]
    store_url: String,

    /// HTTP API port
    #[arg(long, default_value_t = 4444)]
    http_port: u16,

    /// Number of clusters to partition the population into
    #[arg(long, default_value_t = 4)]
    clusters: usize,

    /// Seed for the partition fit
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting peermatch v{}", env!("CARGO_PKG_VERSION"));
    info!("User store: {}", args.store_url);
    info!("HTTP API port: {}", args.http_port);
    info!("Clusters: {}, seed: {}", args.clusters, args.seed);

    let store = Arc::new(HttpUserStore::new(args.store_url));
    let recommender = Recommender::new()
        .with_clusters(args.clusters)
        .with_seed(args.seed);

    info!("HTTP API: http://localhost:{}/", args.http_port);
    RestApi::start(store, recommender, args.http_port).await?;

    info!("Shutting down...");
    Ok(())
}
