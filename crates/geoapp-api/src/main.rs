use std::process;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use geoapp_core::error::GeoappError;
use geoapp_store::memory::MemoryStore;
use geoapp_store::postgres::{PoolConfig, PostgresConfig, PostgresStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoapp_api::config::ApiConfig;
use geoapp_api::router::create_router;
use geoapp_api::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geoapp_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    let query_config = match config.query_config() {
        Ok(query_config) => query_config,
        Err(e) => {
            tracing::error!("Invalid query configuration: {}", e);
            process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        target_srid = query_config.target_srid.value,
        precision = query_config.precision.value,
        radius_meters = query_config.radius_meters.value,
        "Starting geoapp API server"
    );

    let state = match &config.database_url {
        Some(database_url) => match connect_postgis(database_url).await {
            Ok(store) => AppState::new(store, &query_config, "postgres"),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "PostGIS is unreachable; check DATABASE_URL and that the NYC tables are loaded"
                );
                process::exit(1);
            }
        },
        None => {
            tracing::warn!("DATABASE_URL is not set, serving an empty in-memory store");
            AppState::new(Arc::new(MemoryStore::new()), &query_config, "memory")
        }
    };

    let cors = match cors_layer(&config.cors_origin) {
        Ok(cors) => cors,
        Err(e) => {
            tracing::error!("Invalid GEOAPP_CORS_ORIGIN: {}", e);
            process::exit(1);
        }
    };

    let app = create_router(Arc::new(state)).layer(cors).layer(TraceLayer::new_for_http());

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            process::exit(1);
        }
    };

    tracing::info!(%addr, cors_origin = %config.cors_origin, "geoapp API listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        process::exit(1);
    }
}

fn cors_layer(origin: &str) -> Result<CorsLayer, header::InvalidHeaderValue> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origin == "*" {
        Ok(cors.allow_origin(Any))
    } else {
        Ok(cors.allow_origin(origin.parse::<HeaderValue>()?))
    }
}

/// PostGIS store for `database_url` with the `GEOAPP_DB_*` pool limits
async fn connect_postgis(database_url: &str) -> Result<Arc<PostgresStore>, GeoappError> {
    let mut config = PostgresConfig::from_database_url(database_url)?;
    config.pool = PoolConfig::from_env()?;

    PostgresStore::new(config).await.map(Arc::new)
}
