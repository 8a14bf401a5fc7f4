use crate::{
    CliError, Res,
    cli::{Session, selected_kinds},
    command::Invocation,
    display, resolver,
    spotify::Gateway,
    success,
    types::Kind,
    utils,
};

/// Seconds `seek ff`/`seek rw` move by when no amount is given.
const DEFAULT_SEEK_SECS: i64 = 15;

/// `play` without text resumes playback, optionally moving it to another
/// device first. With text it resolves a reference and plays it.
pub async fn play<G: Gateway>(session: &mut Session<G>, inv: &Invocation) -> Res<()> {
    let kinds = selected_kinds(inv);
    if kinds.len() > 1 {
        return Err(CliError::InvalidArgument(
            "only one of --track, --album, --artist or --playlist may be given".to_string(),
        ));
    }
    let kind = kinds.first().copied().unwrap_or(Kind::Track);

    let device_id = match inv.flag_str("device") {
        Some(device) => {
            let devices = session.gateway.devices().await?;
            let device = resolver::resolve_device(&devices, device)?;
            let id = device.id.clone().ok_or_else(|| {
                CliError::InvalidArgument(format!("device '{}' cannot be controlled", device.name))
            })?;
            Some(id)
        }
        None => None,
    };

    let text = inv.text();
    if text.trim().is_empty() {
        match device_id {
            Some(id) => session.gateway.transfer_playback(&id, true).await?,
            None => session.gateway.play(None, None).await?,
        }
        return Ok(());
    }

    let item = resolver::resolve_item(&mut session.gateway, &session.cache, &text, kind).await?;
    session
        .gateway
        .play(device_id.as_deref(), Some(&item.to_reference()))
        .await?;
    success!("Playing {}.", display::short_item(&item));
    Ok(())
}

pub async fn pause<G: Gateway>(session: &mut Session<G>) -> Res<()> {
    session.gateway.pause().await
}

pub async fn next<G: Gateway>(session: &mut Session<G>) -> Res<()> {
    session.gateway.next().await
}

pub async fn prev<G: Gateway>(session: &mut Session<G>) -> Res<()> {
    session.gateway.previous().await
}

/// `seek ff|rw [SECONDS]`, clamped to the start and end of the track.
pub async fn seek<G: Gateway>(session: &mut Session<G>, inv: &Invocation) -> Res<()> {
    let direction = match inv.args.first().map(|a| a.to_lowercase()).as_deref() {
        Some("ff") => 1,
        Some("rw") => -1,
        Some(other) => {
            return Err(CliError::InvalidArgument(format!(
                "'{}' is not a direction, use ff or rw",
                other
            )));
        }
        None => {
            return Err(CliError::InvalidArgument(
                "tell seek which way to go: ff or rw".to_string(),
            ));
        }
    };

    let seconds = match inv.args.get(1) {
        Some(s) => s.parse::<u32>().map_err(|_| {
            CliError::InvalidArgument(format!("'{}' is not a number of seconds", s))
        })? as i64,
        None => DEFAULT_SEEK_SECS,
    };

    let state = session
        .gateway
        .player_state()
        .await?
        .ok_or(CliError::NoActiveDevice)?;
    let duration = state.item.as_ref().map(|t| t.duration_ms).unwrap_or(0);
    let target = utils::seek_target(state.progress_ms.unwrap_or(0), duration, direction * seconds);

    session.gateway.seek(target).await
}
