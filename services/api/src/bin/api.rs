//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{MemoryStore, OpenAiAdvisorAdapter},
    config::{read_config_file, Config},
    error::ApiError,
    web::{self, rest::ApiDoc, state::AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{
    extract::DefaultBodyLimit,
    http::{header::{ACCEPT, CONTENT_TYPE}, HeaderValue, Method},
    Router,
};
use institute_core::catalog::Catalog;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Load the Course Catalogue & Advisor Prompt ---
    let catalog_text = read_config_file(&config.catalog_path)?;
    let catalog = Arc::new(Catalog::from_json(&catalog_text).map_err(|e| {
        ApiError::Internal(format!(
            "Invalid catalogue {}: {}",
            config.catalog_path.display(),
            e
        ))
    })?);
    let prompt_template = read_config_file(&config.advisor_prompt_path())?;
    let system_prompt = catalog.render_system_prompt(&prompt_template);
    info!(courses = catalog.courses.len(), "Course catalogue loaded");

    // --- 3. Initialize Service Adapters ---
    let store = Arc::new(MemoryStore::seeded()?);

    let advisor_config = OpenAIConfig::new()
        .with_api_base(config.advisor_api_base.as_str())
        .with_api_key(
            config
                .gemini_api_key
                .as_ref()
                .ok_or_else(|| ApiError::Internal("GEMINI_API_KEY is required".to_string()))?,
        );
    let advisor = Arc::new(OpenAiAdvisorAdapter::new(
        Client::with_config(advisor_config),
        config.advisor_model.clone(),
        system_prompt,
        config.advisor_temperature,
        config.advisor_max_tokens,
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        store,
        advisor,
        catalog,
        config: config.clone(),
    });

    // --- 5. Create the Web Router ---
    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS_ORIGIN '{}': {}", config.cors_origin, e))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    let api_router = web::router(app_state)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
