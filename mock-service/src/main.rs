use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mock_service=debug")),
        )
        .init();

    let addr: SocketAddr = "0.0.0.0:3000".parse().unwrap();
    tracing::info!("mock query server listening on {addr}");
    mock_service::run(addr).await;
}
