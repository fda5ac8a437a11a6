use networth_server::api::app_router;
use networth_server::config::Config;
use networth_server::{build_state, init_tracing, scheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;

    // Background jobs: price refresh (15-minute default) and the midnight
    // portfolio snapshot.
    scheduler::start_schedulers(state.clone(), &config);

    let router = app_router(state, &config);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
