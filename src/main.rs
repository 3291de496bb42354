//! Options Tunnel API Server
//!
//! Public read API serving allow-listed options data from a private Redis
//! store.

use options_tunnel_api::api::create_router;
use options_tunnel_api::config::Config;
use options_tunnel_api::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use options_tunnel_api::allowlist::AllowListEntry;
use options_tunnel_api::models::{
    AllowListDocument, ConfigResponse, ContractRecord, EndpointsInfo, HealthResponse, OptionType,
    ServiceInfoResponse, StoreStats, SummaryStatistics, TickerResponse,
};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        options_tunnel_api::api::handlers::service_info,
        options_tunnel_api::api::handlers::health_check,
        options_tunnel_api::api::handlers::show_config,
        options_tunnel_api::api::handlers::get_ticker,
    ),
    components(
        schemas(
            ServiceInfoResponse,
            EndpointsInfo,
            HealthResponse,
            ConfigResponse,
            AllowListDocument,
            AllowListEntry,
            StoreStats,
            TickerResponse,
            SummaryStatistics,
            ContractRecord,
            OptionType,
        )
    ),
    tags(
        (name = "Service", description = "Service identity"),
        (name = "Health", description = "Health check endpoints"),
        (name = "Configuration", description = "Operator configuration view"),
        (name = "Ticker", description = "Filtered options data"),
    ),
    info(
        title = "Options Ticker Tunnel API",
        version = "0.1.0",
        description = "Public API serving filtered options data",
        license(name = "MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; built-in defaults apply when no file is present
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let mut config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path)?
    } else {
        info!("No config file at {}, using defaults", config_path);
        Config::default()
    };

    // Environment overrides
    if let Ok(host) = std::env::var("HOST") {
        config.server.host = host;
    }
    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port.parse().expect("PORT must be a valid number");
    }
    if let Ok(url) = std::env::var("REDIS_URL") {
        config.store.url = url;
    }

    let host = config.server.host.clone();
    let port = config.server.port;

    // Create application state (connects to the store)
    let state = Arc::new(AppState::connect(config).await?);

    info!("Starting Options Tunnel API on {}:{}", host, port);
    info!("Swagger UI available at http://{}:{}/swagger-ui/", host, port);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
