use camino::{AppState, config::AppConfig, create_router, itinerary};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "camino=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("cache directory: {}", config.cache_dir.display());

    let state = AppState::from_config(&config)?;
    state.spawn_location_tracking();
    tracing::info!(
        "loaded {} stages, {:.0} km to Santiago",
        itinerary::day_count(),
        itinerary::itinerary()
            .last()
            .map_or(0.0, |d| d.cumulative_distance_km)
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = create_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("starting camino on http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
