use crisis_hub_dialogue::{DialogueEngine, InMemorySessionStore, SessionStore};
use crisis_hub_resources::{
    NominatimGeocoder, OverpassClient, RateLimitConfig, RateLimiter, ResourceLookup, http_client,
};
use crisis_hub_server::{app, config::ServerConfig, state::AppState};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(site_dir = %config.site_dir.display(), "Loaded configuration");

    let engine = DialogueEngine::default()
        .with_distress_threshold(config.dialogue.distress_threshold);

    let sessions = Arc::new(InMemorySessionStore::new(chrono::Duration::minutes(
        config.session.ttl_minutes,
    )));

    // Periodically drop idle chat sessions.
    let cleanup_store = sessions.clone();
    let cleanup_interval_secs = config.session.cleanup_interval_seconds;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(cleanup_interval_secs));
        loop {
            interval.tick().await;
            match cleanup_store.remove_expired(chrono::Utc::now()).await {
                Ok(count) if count > 0 => {
                    tracing::debug!(expired_sessions = count, "Periodic session cleanup");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to cleanup expired sessions");
                }
            }
        }
    });

    let lookup_config = &config.lookup;
    let client = http_client(
        &lookup_config.user_agent,
        Duration::from_secs(lookup_config.timeout_seconds),
    )
    .expect("failed to build http client");
    let limiter = Arc::new(RateLimiter::new(RateLimitConfig::per_second(
        lookup_config.max_requests_per_second,
    )));
    let lookup = ResourceLookup::new(
        Arc::new(NominatimGeocoder::new(
            client.clone(),
            lookup_config.nominatim_url.clone(),
            limiter.clone(),
        )),
        Arc::new(OverpassClient::new(
            client,
            lookup_config.overpass_url.clone(),
            limiter,
        )),
    )
    .with_radius(lookup_config.radius_meters);

    let state = Arc::new(AppState::new(
        engine,
        sessions,
        lookup,
        config.session.clone(),
        config.site.clone(),
    ));

    let app = app::router(state, &config.site_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
