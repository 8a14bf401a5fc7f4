use crate::{
    CliError, Res, cli::Session, command::Invocation, display, spotify::Gateway, utils,
};

/// Percentage points `vol up`/`vol down` move by when no amount is given.
pub const DEFAULT_VOLUME_STEP: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Up(i64),
    Down(i64),
    Set(i64),
}

fn parse_amount(value: &str) -> Res<i64> {
    value
        .parse::<i64>()
        .map_err(|_| CliError::InvalidArgument(format!("'{}' is not a percentage", value)))
}

/// A step for `up`/`down`. The direction carries the sign, so the step
/// itself may not be negative.
fn parse_step(value: &str) -> Res<i64> {
    let step = parse_amount(value)?;
    if step < 0 {
        return Err(CliError::InvalidArgument(format!(
            "'{}' is not a valid step, give a positive amount",
            value
        )));
    }
    Ok(step)
}

/// Works out the requested change from flags and positional words. At most
/// one way of asking is allowed.
fn requested_change(inv: &Invocation) -> Res<Option<Change>> {
    let mut changes = Vec::new();

    let amount = |args: &[String]| -> Res<i64> {
        match args.first() {
            Some(n) => parse_step(n),
            None => Ok(DEFAULT_VOLUME_STEP),
        }
    };

    let flag_count = ["up", "down", "set"]
        .iter()
        .filter(|f| inv.is_set(f))
        .count();

    if flag_count > 0 {
        // With a flag, positional words may only carry the step.
        if inv.args.len() > 1 || (inv.is_set("set") && !inv.args.is_empty()) {
            return Err(CliError::InvalidArgument(format!(
                "unexpected argument '{}'",
                inv.text()
            )));
        }
        if inv.flag_bool("up") {
            changes.push(Change::Up(amount(&inv.args[..])?));
        }
        if inv.flag_bool("down") {
            changes.push(Change::Down(amount(&inv.args[..])?));
        }
        if let Some(n) = inv.flag_int("set") {
            changes.push(Change::Set(n));
        }
    } else if let Some(word) = inv.args.first() {
        let rest = &inv.args[1..];
        match word.to_lowercase().as_str() {
            "up" => changes.push(Change::Up(amount(rest)?)),
            "down" => changes.push(Change::Down(amount(rest)?)),
            "set" => match rest.first() {
                Some(n) => changes.push(Change::Set(parse_amount(n)?)),
                None => {
                    return Err(CliError::InvalidArgument(
                        "'vol set' needs a percentage".to_string(),
                    ));
                }
            },
            other => {
                return Err(CliError::InvalidArgument(format!(
                    "'{}' is not a volume change, use up, down or set",
                    other
                )));
            }
        }
    }

    if changes.len() > 1 {
        return Err(CliError::InvalidArgument(
            "only one of --up, --down or --set may be given".to_string(),
        ));
    }

    Ok(changes.pop())
}

pub async fn vol<G: Gateway>(session: &mut Session<G>, inv: &Invocation) -> Res<()> {
    let change = requested_change(inv)?;

    let target = match change {
        Some(Change::Set(n)) => utils::clamp_volume(n),
        Some(relative) => {
            let current = current_volume(session).await? as i64;
            match relative {
                Change::Up(n) => utils::clamp_volume(current.saturating_add(n)),
                Change::Down(n) => utils::clamp_volume(current.saturating_sub(n)),
                Change::Set(n) => utils::clamp_volume(n),
            }
        }
        None => {
            let current = current_volume(session).await?;
            println!("{}", display::volume(current));
            return Ok(());
        }
    };

    session.gateway.set_volume(target).await?;
    println!("{}", display::volume(target));
    Ok(())
}

async fn current_volume<G: Gateway>(session: &mut Session<G>) -> Res<u32> {
    session
        .gateway
        .player_state()
        .await?
        .and_then(|state| state.device)
        .and_then(|device| device.volume_percent)
        .ok_or(CliError::NoActiveDevice)
}
