use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{info, warn};

use stashdb_common::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SHUTDOWN_TIMEOUT_SECS,
};
use stashdb_server::{AppState, ServerConfig, build_router};
use stashdb_storage::{ListStore, StringStore};

#[derive(Parser, Debug)]
#[command(name = "stashdb-server", about = "StashDB, in-memory key/value store over HTTP")]
struct Args {
    #[arg(long, env = "HTTP_HOST", default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, env = "HTTP_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Token exigido no header `Authorization: Bearer`
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,
    #[arg(long, default_value_t = DEFAULT_SHUTDOWN_TIMEOUT_SECS)]
    shutdown_timeout_secs: u64,
}

impl Args {
    /// Sem API key o servidor não sobe: todas as rotas de dados exigem token.
    fn into_config(self) -> anyhow::Result<ServerConfig> {
        let Some(api_key) = self.api_key.filter(|k| !k.is_empty()) else {
            anyhow::bail!("API_KEY não configurada: defina --api-key ou a variável API_KEY");
        };
        Ok(ServerConfig {
            host: self.host,
            port: self.port,
            api_key: Some(api_key),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            shutdown_timeout: Duration::from_secs(self.shutdown_timeout_secs),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stashdb_server=info,tower_http=info".into()),
        )
        .init();

    let config = Args::parse().into_config()?;

    let state = AppState::new(StringStore::new(), ListStore::new());
    let router = build_router(state, &config);

    let listener = TcpListener::bind(config.addr()).await?;
    info!("StashDB escutando em {}", listener.local_addr()?);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            result??;
            return Ok(());
        }
        _ = shutdown_signal() => {
            info!("shutdown signal recebido");
        }
    }

    let _ = stop_tx.send(());
    match tokio::time::timeout(config.shutdown_timeout, server).await {
        Ok(result) => result??,
        Err(_) => warn!(
            "requisições em andamento não terminaram em {:?}; encerrando",
            config.shutdown_timeout
        ),
    }

    info!("servidor encerrado");
    Ok(())
}

/// Resolve no Ctrl-C ou, em unix, no SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("falha ao escutar Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("falha ao escutar SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let args = Args::try_parse_from(["stashdb-server"]).unwrap();
        assert_eq!(args.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(args.shutdown_timeout_secs, DEFAULT_SHUTDOWN_TIMEOUT_SECS);
    }

    #[test]
    fn api_key_is_carried_into_config() {
        let args =
            Args::try_parse_from(["stashdb-server", "--port", "9000", "--api-key", "s3cret"])
                .unwrap();
        let config = args.into_config().unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.api_key.as_deref(), Some("s3cret"));
    }

    #[test]
    fn empty_api_key_refuses_to_start() {
        let args = Args::try_parse_from(["stashdb-server", "--api-key", ""]).unwrap();
        assert!(args.into_config().is_err());
    }
}
