use std::sync::Arc;

use metric_table_renderer::core::renderer::TableRenderer;
use metric_table_renderer::settings::get_config;
use metric_table_renderer::{AppState, init_openapi_route};
use poem::listener::TcpListener;
use tracing::Level;

#[tokio::main]
async fn main() {
    let log_level = Level::INFO;
    // Logging to file
    let file_appender = tracing_appender::rolling::daily("./logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(log_level)
        .init();

    tracing::info!("Initializing table rendering service...");

    let config = get_config();
    tracing::info!("run with config: {:?}", config);

    let engine = Arc::new(TableRenderer::new(&config));

    // Init App State
    let app_state = Arc::new(AppState { engine });

    tracing::info!("rendering engine initialized");

    let app = init_openapi_route(app_state.clone(), &config);
    tracing::info!("run server on {}:{}", config.host, config.port);
    poem::Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await
    .unwrap()
}
