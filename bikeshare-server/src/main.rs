use bikeshare_server::config::Config;
use bikeshare_server::display::run_table;
use bikeshare_server::gbfs::{FetcherConfig, HttpFetcher};
use bikeshare_server::join::{FeedSources, JoinEngine};
use bikeshare_server::refresh::RefreshCycle;
use bikeshare_server::view::PublishedView;
use bikeshare_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // stdout belongs to the station table
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let fetcher_config = FetcherConfig::new(&config.client_id)
        .with_timeout(config.request_timeout.as_secs());
    let fetcher = HttpFetcher::new(fetcher_config).expect("Failed to create feed client");

    let sources = FeedSources::new(&config.information_url, &config.status_url);
    let engine = JoinEngine::new(fetcher, sources);

    // Empty until the first refresh succeeds
    let view = PublishedView::new();

    RefreshCycle::new(engine, view.clone(), config.refresh_interval).spawn();
    info!(
        interval_secs = config.refresh_interval.as_secs(),
        information_url = %config.information_url,
        status_url = %config.status_url,
        "refresh cycle started"
    );

    if !config.mode.serves_http() {
        run_table(view, config.refresh_interval).await;
        return;
    }

    if config.mode.shows_table() {
        tokio::spawn(run_table(view.clone(), config.refresh_interval));
    }

    let state = AppState::new(view, config.bind);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .expect("Failed to bind listener");
    info!(addr = %config.bind, "starting server");
    info!("  GET  /                      - Liveness");
    info!("  GET  /api/v1/stations       - All stations");
    info!("  GET  /api/v1/stations/{{id}}  - Single station");
    info!("  GET  /api/v1/status         - Snapshot freshness");

    axum::serve(listener, app).await.expect("Server failed");
}
