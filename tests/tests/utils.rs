use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const MOCK_HOST: &str = "0.0.0.0:3005";

/// Boots the mock query server once per test binary and installs a
/// subscriber. Later callers just wait for the server to be up.
#[allow(unused)]
pub async fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    let wait = ONCE_LOCK.get().is_none();

    ONCE_LOCK.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("querybench=debug,mock_service=debug"))
            .try_init();

        // The server gets its own runtime on a dedicated thread so it
        // outlives the per-test runtimes.
        std::thread::spawn(|| {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let addr: SocketAddr = MOCK_HOST.parse().unwrap();
            rt.block_on(mock_service::run(addr));
        });
    });

    if wait {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}
