use pina_web::config::AppConfig;
use pina_web::routes;
use pina_web::state::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");
    let port = config.port;
    tracing::info!(
        backend = %config.backend_url,
        api = %config.api_base_url,
        cookie_secure = config.cookie_secure,
        disable_refresh = config.disable_refresh,
        "configuration loaded"
    );

    let state = AppState::new(config).expect("http client init failed");
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "pina-web listening");
    axum::serve(listener, app).await.expect("server failed");
}
