use crate::{Res, cli::Session, display, info, spotify::Gateway};

/// Shows the track that is playing right now.
pub async fn current<G: Gateway>(session: &mut Session<G>) -> Res<()> {
    match session.gateway.currently_playing().await? {
        Some(playing) => match playing.item {
            Some(track) => print!("{}", display::long_track(&track)),
            None => info!("Nothing is playing right now."),
        },
        None => info!("Nothing is playing right now."),
    }
    Ok(())
}

/// Lists the Connect devices, numbered the way `play --device N` expects.
pub async fn devices<G: Gateway>(session: &mut Session<G>) -> Res<()> {
    let devices = session.gateway.devices().await?;
    println!("{}", display::devices(&devices));
    Ok(())
}
