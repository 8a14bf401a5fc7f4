//! # CLI Module
//!
//! Handlers for every command of the prompt, and the table that registers
//! them.
//!
//! ## Commands
//!
//! | command       | aliases | what it does                                   |
//! |---------------|---------|------------------------------------------------|
//! | `clear`       | `clc`   | clears the terminal                            |
//! | `completions` |         | prints a shell completion script               |
//! | `current`     | `c`     | shows the track that is playing                |
//! | `devices`     | `d`     | lists the Connect devices                      |
//! | `help`        | `h`     | lists commands, or explains one                |
//! | `next`        | `n`     | skips to the next track                        |
//! | `opt`         | `o`     | shows or sets shuffle and repeat               |
//! | `pause`       | `pp`    | pauses playback                                |
//! | `play`        | `p`     | resumes, or plays a search result or a name    |
//! | `prev`        | `pr`    | skips to the previous track                    |
//! | `quit`        | `q`     | leaves spotcon                                 |
//! | `repeat`      |         | sets the repeat mode                           |
//! | `search`      | `s`     | searches the catalogue                         |
//! | `seek`        |         | moves forward or back in the current track     |
//! | `shuffle`     |         | turns shuffle on or off                        |
//! | `vol`         | `v`     | shows or changes the volume                    |
//!
//! ## Handler contract
//!
//! Handlers receive the [`Session`] by `&mut` and an already validated
//! [`Invocation`]. They print their own output and return a [`CliError`]
//! for anything that went wrong; the dispatcher reports it and the prompt
//! comes back. An [`CliError::InvalidArgument`] returned by a handler is
//! followed by the command's help text, the same as a parse failure.
//!
//! [`CliError`]: crate::CliError
//! [`CliError::InvalidArgument`]: crate::CliError::InvalidArgument

mod general;
mod info;
mod options;
mod playback;
mod search;
mod volume;

use crate::{
    Res,
    command::{Action, CommandSpec, FlagSpec, Invocation, Positionals, Registry},
    management::SearchCache,
    spotify::Gateway,
    types::Kind,
};

/// The authenticated gateway plus what the session remembers between
/// commands.
///
/// # Type Parameters
///
/// * `G` - The [`Gateway`]; [`SpotifyClient`](crate::spotify::SpotifyClient)
///   in the binary, a recording fake in tests
///
/// Only `search` replaces the cache.
pub struct Session<G> {
    pub gateway: G,
    pub cache: SearchCache,
}

impl<G: Gateway> Session<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            cache: SearchCache::new(),
        }
    }
}

/// Whether the prompt keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Shells `completions` can generate a script for.
pub const SHELLS: &[&str] = &["bash", "elvish", "fish", "powershell", "zsh"];

fn kind_flags(spec: CommandSpec) -> CommandSpec {
    spec.flag(FlagSpec::switch("track", 't', "Only tracks"))
        .flag(FlagSpec::switch("album", 'a', "Only albums"))
        .flag(FlagSpec::switch("artist", 'r', "Only artists"))
        .flag(FlagSpec::switch("playlist", 'l', "Only playlists"))
}

/// Kinds selected through `--track`, `--album`, `--artist` and `--playlist`,
/// in display order.
pub(crate) fn selected_kinds(inv: &Invocation) -> Vec<Kind> {
    Kind::ALL
        .into_iter()
        .filter(|k| inv.flag_bool(k.as_api_type()))
        .collect()
}

/// Builds the registry holding every command spotcon knows.
pub fn registry() -> Res<Registry> {
    let mut registry = Registry::new();

    let specs = vec![
        CommandSpec::new("clear", "Clear the terminal", Action::Clear).aliases(&["clc"]),
        CommandSpec::new("completions", "Print a shell completion script", Action::Completions)
            .positionals(Positionals::OneOf(SHELLS)),
        CommandSpec::new("current", "Show the track that is playing", Action::Current)
            .aliases(&["c"]),
        CommandSpec::new("devices", "List available Connect devices", Action::Devices)
            .aliases(&["d"]),
        CommandSpec::new("help", "List commands or show help for one", Action::Help)
            .aliases(&["h"])
            .positionals(Positionals::AtMost(1, "COMMAND")),
        CommandSpec::new("next", "Skip to the next track", Action::Next).aliases(&["n"]),
        CommandSpec::new("opt", "Show or set shuffle and repeat", Action::Opt)
            .aliases(&["o"])
            .flag(FlagSpec::string(
                "repeat",
                'r',
                "off|track|playlist",
                "Set the repeat mode",
            ))
            .flag(FlagSpec::string("shuffle", 's', "on|off", "Turn shuffle on or off")),
        CommandSpec::new("pause", "Pause playback", Action::Pause).aliases(&["pp"]),
        kind_flags(
            CommandSpec::new(
                "play",
                "Resume playback, or play a search result number or a name",
                Action::Play,
            )
            .aliases(&["p"])
            .flag(FlagSpec::string(
                "device",
                'd',
                "NAME|N",
                "Play on this device (name or number from 'devices')",
            ))
            .positionals(Positionals::FreeText {
                required: false,
                value_name: "NUMBER|NAME",
            }),
        ),
        CommandSpec::new("prev", "Skip to the previous track", Action::Prev).aliases(&["pr"]),
        CommandSpec::new("quit", "Leave spotcon", Action::Quit).aliases(&["q"]),
        CommandSpec::new("repeat", "Set the repeat mode", Action::Repeat)
            .positionals(Positionals::OneOf(&["off", "track", "playlist"])),
        kind_flags(
            CommandSpec::new("search", "Search tracks, artists, albums and playlists", Action::Search)
                .aliases(&["s"])
                .positionals(Positionals::FreeText {
                    required: true,
                    value_name: "QUERY",
                }),
        ),
        CommandSpec::new("seek", "Fast forward or rewind the current track", Action::Seek)
            .positionals(Positionals::AtMost(2, "ff|rw [SECONDS]")),
        CommandSpec::new("shuffle", "Turn shuffle on or off", Action::Shuffle)
            .positionals(Positionals::OneOf(&["on", "off"])),
        CommandSpec::new("vol", "Show or change the volume", Action::Vol)
            .aliases(&["v"])
            .flag(FlagSpec::switch("up", 'u', "Turn the volume up"))
            .flag(FlagSpec::switch("down", 'd', "Turn the volume down"))
            .flag(FlagSpec::int("set", 's', "PERCENT", "Set the volume"))
            .positionals(Positionals::AtMost(2, "up|down [PERCENT] | set PERCENT")),
    ];

    for spec in specs {
        registry.register(spec)?;
    }

    Ok(registry)
}

/// Runs the handler behind `inv`.
pub async fn execute<G: Gateway>(
    session: &mut Session<G>,
    registry: &Registry,
    inv: &Invocation,
) -> Res<Flow> {
    match inv.action {
        Action::Clear => general::clear()?,
        Action::Completions => general::completions(registry, inv)?,
        Action::Current => info::current(session).await?,
        Action::Devices => info::devices(session).await?,
        Action::Help => general::help(registry, inv)?,
        Action::Next => playback::next(session).await?,
        Action::Opt => options::opt(session, inv).await?,
        Action::Pause => playback::pause(session).await?,
        Action::Play => playback::play(session, inv).await?,
        Action::Prev => playback::prev(session).await?,
        Action::Quit => return Ok(Flow::Quit),
        Action::Repeat => options::repeat(session, inv).await?,
        Action::Search => search::search(session, inv).await?,
        Action::Seek => playback::seek(session, inv).await?,
        Action::Shuffle => options::shuffle(session, inv).await?,
        Action::Vol => volume::vol(session, inv).await?,
    }

    Ok(Flow::Continue)
}
