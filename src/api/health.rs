use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::{PROGRAM_NAME, types::PkceToken};

pub async fn health(
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Json<Value> {
    let logged_in = shared_state
        .lock()
        .await
        .as_ref()
        .is_some_and(|p| p.token.is_some());

    Json(json!({
        "status": "ok",
        "service": PROGRAM_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "logged_in": logged_in,
    }))
}
