use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::{Mutex, oneshot};

use crate::{
    CliError, Res, config, info,
    management::TokenManager,
    server,
    spotify::check,
    success,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// How long the login flow waits for the browser callback.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Returns a token manager for a usable session.
///
/// Loads the persisted token when there is one; otherwise runs the
/// interactive [`login`] flow and persists its result. A stored token that
/// can no longer be refreshed also falls back to [`login`]. A failure here
/// is the one error spotcon cannot recover from.
pub async fn establish_session() -> Res<TokenManager> {
    let mut manager = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            info!("No stored session ({}), starting login.", e);
            return login_and_persist().await;
        }
    };

    match manager.get_valid_token().await {
        Ok(_) => Ok(manager),
        Err(e) if needs_login(&e) => {
            warning!("Stored session was rejected ({}), starting login.", e);
            login_and_persist().await
        }
        Err(e) => Err(e),
    }
}

/// Runs [`login`] and writes the new token to the cache.
pub async fn login_and_persist() -> Res<TokenManager> {
    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    let token = login(shared_state).await?;
    let manager = TokenManager::new(token);
    manager.persist().await?;
    success!("Authentication successful!");
    Ok(manager)
}

/// True when `err` means the stored credentials are no good and only a new
/// login helps: a failed refresh, or a 401 from the Web API.
pub fn needs_login(err: &CliError) -> bool {
    matches!(
        err,
        CliError::Auth(_) | CliError::Gateway { status: 401, .. }
    )
}

/// Runs the OAuth 2.0 PKCE authorization code flow.
///
/// 1. Generates the code verifier, its S256 challenge and a random `state`
/// 2. Binds the local callback server
/// 3. Opens the authorization URL in the browser (or prints it)
/// 4. Waits for the callback handler to exchange the code for a token
/// 5. Shuts the callback server down again
pub async fn login(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state: String = utils::generate_code_verifier().chars().take(16).collect();

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            state: state.clone(),
            token: None,
        });
    }

    let listener = server::bind().await?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server_state = Arc::clone(&shared_state);
    let server_task = tokio::spawn(async move {
        if let Err(e) = server::serve(listener, server_state, shutdown_rx).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let redirect_uri = config::spotify_redirect_uri();
    let scope = config::spotify_scope();
    let auth_url = reqwest::Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
            ("state", state.as_str()),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| CliError::Config(format!("invalid authorization URL: {}", e)))?;

    info!(
        "Please log in to Spotify by visiting the following page in your browser:\n{}",
        auth_url
    );
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!("Failed to open browser. Please navigate to the URL above manually.")
    }

    let token = wait_for_token(shared_state).await;

    let _ = shutdown_tx.send(());
    let _ = server_task.await;

    token.ok_or_else(|| CliError::Auth("authentication failed or timed out".to_string()))
}

/// Polls the shared state until the callback handler stored a token, for at
/// most [`LOGIN_TIMEOUT`].
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let pb = utils::spinner("Waiting for Spotify authorization...");
    let start = Instant::now();

    while start.elapsed() < LOGIN_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.clone()) {
            pb.finish_and_clear();
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
    None
}

fn into_token(res: TokenResponse) -> Token {
    Token {
        access_token: res.access_token,
        refresh_token: res.refresh_token.unwrap_or_default(),
        scope: res.scope,
        expires_in: res.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    }
}

/// Exchanges a refresh token for a new access token.
///
/// The returned token has an empty `refresh_token` when Spotify did not
/// rotate it; [`TokenManager`] keeps the old one in that case.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id().map_err(|e| e.to_string())?;
    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let res = check(res).await.map_err(|e| e.to_string())?;
    let json: TokenResponse = res.json().await.map_err(|e| e.to_string())?;

    Ok(into_token(json))
}

/// Exchanges an authorization code for an access token using PKCE.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let json: TokenResponse = check(res).await?.json().await?;
    Ok(into_token(json))
}
