mod config;
mod db;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env()?;
    let port = config.port;

    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    tracing::info!(upload_dir = %config.upload_dir.display(), max_bytes = config.max_upload_bytes, "upload storage configured");

    let state = state::AppState::new(pool, config);
    let app = routes::app(state)?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "pdfqa listening");
    axum::serve(listener, app).await?;
    Ok(())
}
