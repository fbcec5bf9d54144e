use std::sync::Arc;

use anyhow::Result;
use hos_trip_planner::config::PlannerConfig;
use hos_trip_planner::server::{AppState, router};
use hos_trip_planner::traits::RouteProvider;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hos_trip_planner=debug")),
        )
        .init();

    let config = PlannerConfig::from_env()?;

    // Blocking HTTP clients must be created and dropped outside the runtime.
    let state = Arc::new(AppState {
        provider: config.route_provider()?,
    });
    info!(backend = state.provider.name(), "route provider ready");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
        info!(addr = %config.bind_addr, "listening");
        axum::serve(listener, router(state.clone())).await?;
        Ok::<_, anyhow::Error>(())
    })?;
    drop(runtime);

    Ok(())
}
