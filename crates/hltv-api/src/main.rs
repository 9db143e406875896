use axum::http::Method;
use hltv::HltvClient;
use tower_http::cors::{Any, CorsLayer};

mod routes;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8090";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let client = match std::env::var("HLTV_BASE_URL") {
        Ok(base_url) => HltvClient::with_base_url(base_url)?,
        Err(_) => HltvClient::new()?,
    };
    log::info!("Scraping upstream: {}", client.base_url());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    let router = routes::router(client).layer(cors);

    let address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.into());
    let listener = tokio::net::TcpListener::bind(&address).await?;

    log::info!("Serving HLTV API on {}", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
