use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
};

use crate::{CliError, Res, api, config, types::PkceToken};

/// Binds the callback server address (`SERVER_ADDRESS`).
pub async fn bind() -> Res<TcpListener> {
    let addr = SocketAddr::from_str(&config::server_addr()).map_err(|e| {
        CliError::Config(format!("Failed to parse server address: {}", e))
    })?;

    Ok(TcpListener::bind(&addr).await?)
}

/// Serves `/callback` and `/health` until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    state: Arc<Mutex<Option<PkceToken>>>,
    shutdown: oneshot::Receiver<()>,
) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state));

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown.await;
        })
        .await?;
    Ok(())
}
