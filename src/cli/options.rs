use crate::{
    CliError, Res,
    cli::Session,
    command::Invocation,
    display,
    spotify::Gateway,
    success,
    types::RepeatMode,
};

fn parse_shuffle(value: &str) -> Res<bool> {
    match value.to_lowercase().as_str() {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(CliError::InvalidArgument(format!(
            "'{}' is not a shuffle state, use on or off",
            other
        ))),
    }
}

/// Without flags prints the current shuffle and repeat settings, otherwise
/// applies the given ones.
pub async fn opt<G: Gateway>(session: &mut Session<G>, inv: &Invocation) -> Res<()> {
    let shuffle = inv.flag_str("shuffle").map(parse_shuffle).transpose()?;
    let repeat = inv
        .flag_str("repeat")
        .map(str::parse::<RepeatMode>)
        .transpose()?;

    if shuffle.is_none() && repeat.is_none() {
        let state = session
            .gateway
            .player_state()
            .await?
            .ok_or(CliError::NoActiveDevice)?;
        print!("{}", display::options(state.shuffle_state, state.repeat_state));
        return Ok(());
    }

    if let Some(on) = shuffle {
        session.gateway.set_shuffle(on).await?;
        success!("Shuffle is {}.", if on { "on" } else { "off" });
    }
    if let Some(mode) = repeat {
        session.gateway.set_repeat(mode).await?;
        success!("Repeat is {}.", mode);
    }
    Ok(())
}

pub async fn shuffle<G: Gateway>(session: &mut Session<G>, inv: &Invocation) -> Res<()> {
    let on = parse_shuffle(&inv.text())?;
    session.gateway.set_shuffle(on).await?;
    success!("Shuffle is {}.", if on { "on" } else { "off" });
    Ok(())
}

pub async fn repeat<G: Gateway>(session: &mut Session<G>, inv: &Invocation) -> Res<()> {
    let mode: RepeatMode = inv.text().parse()?;
    session.gateway.set_repeat(mode).await?;
    success!("Repeat is {}.", mode);
    Ok(())
}
