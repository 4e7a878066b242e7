// Tromsø Trip Planner API v0.1
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod db;
mod errors;
mod helpers;
mod routes;
mod services;

use config::AppConfig;
use db::store::{MemoryTripStore, PgTripStore, TripStore};
use routes::AppState;
use services::completion::OpenAiClient;
use services::model::ModelPlanGenerator;
use services::planner::TripPlanner;
use services::telemetry::TracingObserver;
use services::trips::TripService;
use services::venues::{DiningDirectory, TtlCache, VenueClient};

/// Maximum number of connections in the database pool.
const DB_POOL_MAX_CONNECTIONS: u32 = 5;
/// Minimum number of connections kept alive in the database pool.
const DB_POOL_MIN_CONNECTIONS: u32 = 2;

/// Tromsø Trip Planner API: OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tromsø Trip Planner API",
        version = "0.1.0",
        description = "Seasonal day-by-day itineraries for Tromsø. Plans are generated \
            by a language model when one is configured and by a deterministic rule-based \
            planner otherwise, then stored with a share link that expires after a week.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Seasons", description = "Season resolution and display metadata"),
        (name = "Trips", description = "Trip generation, retrieval and sharing"),
    ),
    paths(
        routes::health::health_check,
        routes::seasons::get_season,
        routes::trips::create_trip,
        routes::trips::get_trip,
        routes::trips::get_shared_trip,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::seasons::SeasonResponse,
            routes::trips::CreateTripRequest,
            routes::trips::CreateTripResponse,
            services::trips::TripRecord,
            services::plan::TripPlan,
            services::plan::DayPlan,
            services::plan::Activity,
            services::plan::ActivityDuration,
            services::plan::Dining,
            services::plan::AuroraForecast,
            services::preferences::TripPreferences,
            services::preferences::Budget,
            services::preferences::Interest,
            services::preferences::Transport,
            services::preferences::Difficulty,
            services::season::Season,
            services::planner::PlanSource,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_planner_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    // Trip store: Postgres when configured, otherwise in-process
    let store: Arc<dyn TripStore> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(DB_POOL_MAX_CONNECTIONS)
                .min_connections(DB_POOL_MIN_CONNECTIONS)
                .connect(url)
                .await
                .expect("Failed to connect to database");

            sqlx::migrate!()
                .run(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations completed");

            Arc::new(PgTripStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, trips are kept in memory and lost on restart");
            Arc::new(MemoryTripStore::new())
        }
    };

    // Model-backed generation is optional
    let model = match &config.openai_api_key {
        Some(key) => {
            tracing::info!(
                "Model generation enabled ({} via {})",
                config.openai_model,
                config.openai_base_url
            );
            let client = OpenAiClient::new(&config.openai_base_url, key, &config.openai_model);
            Some(ModelPlanGenerator::new(
                Arc::new(client),
                config.max_output_tokens,
            ))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set, all plans will be rule-based");
            None
        }
    };

    // Dining directory with a process-lifetime cache and a periodic sweep
    let venue_cache: Arc<TtlCache<String, Vec<String>>> =
        Arc::new(TtlCache::new(config.venue_cache_ttl));
    let dining = DiningDirectory::new(
        config.venue_api_url.as_deref().map(VenueClient::new),
        venue_cache.clone(),
    );
    let sweep_every = config.venue_cache_ttl.max(Duration::from_secs(60));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            let evicted = venue_cache.evict_expired().await;
            if evicted > 0 {
                tracing::debug!("Evicted {} stale dining directory entries", evicted);
            }
        }
    });

    let app_state = AppState {
        trips: Arc::new(TripService::new(
            store,
            chrono::Duration::days(config.share_ttl_days),
        )),
        planner: Arc::new(TripPlanner::new(
            model,
            dining,
            Arc::new(TracingObserver),
            config.generation_timeout,
        )),
    };

    // CORS: browser clients create trips and read shared ones
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::api_router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
