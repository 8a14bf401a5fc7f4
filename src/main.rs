use spotcon::{
    cli::Session,
    config, error, info,
    repl::Dispatcher,
    spotify::{self, Gateway, SpotifyClient},
    warning,
};

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file, using process environment. Err: {}", e);
    }

    let tokens = match spotify::auth::establish_session().await {
        Ok(tokens) => tokens,
        Err(e) => {
            error!("Cannot establish a Spotify session. Err: {}", e);
        }
    };

    let mut client = SpotifyClient::new(tokens);
    let user = match client.current_user().await {
        Err(e) if spotify::auth::needs_login(&e) => {
            warning!("Spotify rejected the stored session ({}), logging in again.", e);
            let tokens = match spotify::auth::login_and_persist().await {
                Ok(tokens) => tokens,
                Err(e) => {
                    error!("Cannot establish a Spotify session. Err: {}", e);
                }
            };
            client = SpotifyClient::new(tokens);
            client.current_user().await
        }
        other => other,
    };

    match user {
        Ok(user) => info!(
            "You are logged in as: {}",
            user.display_name.unwrap_or(user.id)
        ),
        Err(e) => {
            error!("Cannot fetch the current user. Err: {}", e);
        }
    }

    let mut dispatcher = match Dispatcher::new(Session::new(client)) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            error!("Cannot set up commands. Err: {}", e);
        }
    };

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        dispatcher.execute_args(&args).await;
        return;
    }

    if let Err(e) = dispatcher.run().await {
        warning!("Cannot read input. Err: {}", e);
    }
}
