//! Test server harness.

use sevenfold::{
    Leaderboard, MemoryStore, MockEmbeddingProvider, ScalePolicy, Scorer, StaticValidator,
};
use sevenfold_server::gateway::{HandlerState, create_router_with_state};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;
pub const TEST_LEADERBOARD_KEY: &str = "sevenfold_test_leaderboard";

#[derive(Debug, Clone, Default)]
pub struct TestServerConfig {
    pub port: u16,
    pub migrate_secret: Option<String>,
    pub denied_words: Vec<String>,
    pub scale_policy: ScalePolicy,
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub provider: Arc<MockEmbeddingProvider>,
    pub validator: Arc<StaticValidator>,
    pub store: MemoryStore,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Direct handle on the leaderboard the server writes to.
    pub fn leaderboard(&self) -> Leaderboard<MemoryStore> {
        Leaderboard::new(self.store.clone(), TEST_LEADERBOARD_KEY)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
}

/// Spawns a server on a real listener with every external service replaced:
/// - **Embeddings**: `MockEmbeddingProvider` (deterministic, no network)
/// - **Dictionary**: `StaticValidator` rejecting `denied_words`
/// - **Leaderboard**: `MemoryStore`
///
/// # Example
///
/// ```ignore
/// let server = spawn_test_server(TestServerConfig::default()).await?;
/// let resp = reqwest::get(format!("{}/healthz", server.url())).await?;
/// assert!(resp.status().is_success());
/// ```
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let provider = Arc::new(MockEmbeddingProvider::new());
    let validator = Arc::new(StaticValidator::denying(config.denied_words));
    let store = MemoryStore::new();

    let scorer = Arc::new(Scorer::new(provider.clone(), config.scale_policy));
    let state = HandlerState::new(
        scorer,
        validator.clone(),
        Leaderboard::new(store.clone(), TEST_LEADERBOARD_KEY),
        config.migrate_secret,
    );

    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        provider,
        validator,
        store,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
