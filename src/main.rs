use restcrud::{
    config::AppConfig,
    database,
    operations::{AppState, HandlerOptions},
    server::{API_PREFIX, build_app},
};
use tracing::Level;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if config.verbose { Level::DEBUG } else { Level::INFO })
        .compact()
        .init();

    let db = database::connect(&config.database_url).await?;
    database::init_schema(&db).await?;

    let state = AppState::new(
        db,
        HandlerOptions {
            verbose: config.verbose,
        },
    );
    let app = build_app(state, &config)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, prefix = API_PREFIX, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
