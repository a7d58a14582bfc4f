//! Sevenfold HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use sevenfold::{
    Config, DictionaryValidator, Leaderboard, MemoryStore, OpenAiConfig, OpenAiEmbedder,
    RankedStore, Scorer, UpstashStore, WordValidator,
};
use sevenfold_server::gateway::{HandlerState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        scale = %config.scale_policy,
        "Sevenfold starting"
    );

    let api_key = config.openai_api_key.clone().ok_or_else(|| {
        anyhow::anyhow!("SEVENFOLD_OPENAI_API_KEY must be set to score submissions")
    })?;
    let embedder = OpenAiEmbedder::new(
        OpenAiConfig::new(api_key)
            .with_base_url(config.embedding_url.clone())
            .with_model(config.embedding_model.clone())
            .with_timeout(config.http_timeout),
    )?;
    let scorer = Arc::new(Scorer::new(Arc::new(embedder), config.scale_policy));

    let validator: Arc<dyn WordValidator> = Arc::new(DictionaryValidator::new(
        &config.dictionary_url,
        config.http_timeout,
        config.word_cache_capacity,
    ));

    match config.store_credentials() {
        Some((url, token)) => {
            let store = UpstashStore::new(url, token, config.http_timeout)?;
            tracing::info!(url = %store.url(), key = %config.leaderboard_key, "Using Upstash leaderboard");
            serve(addr, &config, scorer, validator, store).await?;
        }
        None => {
            tracing::warn!(
                "No SEVENFOLD_STORE_URL configured, leaderboard is in-memory and lost on restart"
            );
            serve(addr, &config, scorer, validator, MemoryStore::new()).await?;
        }
    }

    tracing::info!("Sevenfold shutdown complete");
    Ok(())
}

async fn serve<S>(
    addr: SocketAddr,
    config: &Config,
    scorer: Arc<Scorer>,
    validator: Arc<dyn WordValidator>,
    store: S,
) -> anyhow::Result<()>
where
    S: RankedStore + Clone + 'static,
{
    let leaderboard = Leaderboard::new(store, config.leaderboard_key.clone());
    if !leaderboard.is_ready().await {
        tracing::warn!("Leaderboard store did not answer PING, continuing");
    }

    let state = HandlerState::new(scorer, validator, leaderboard, config.migrate_secret.clone());
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("SEVENFOLD_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
