use std::collections::{BTreeMap, BTreeSet, HashMap};

use clap::{Command, error::ErrorKind, parser::ValueSource};

use crate::{
    CliError, PROGRAM_NAME, Res,
    command::{
        CommandSpec, FlagKind, FlagValue, Invocation, Parsed,
        spec::ARGS_ID,
    },
};

/// Every command the prompt understands, keyed by name.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Default)]
pub struct Registry {
    commands: BTreeMap<&'static str, CommandSpec>,
    aliases: HashMap<&'static str, &'static str>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command.
    ///
    /// # Errors
    ///
    /// [`CliError::DuplicateCommand`] when the name or one of the aliases is
    /// already taken by another command, or repeated within this one.
    pub fn register(&mut self, spec: CommandSpec) -> Res<()> {
        let mut seen = BTreeSet::new();
        for name in spec.names() {
            if !seen.insert(name) || self.is_taken(name) {
                return Err(CliError::DuplicateCommand(name.to_string()));
            }
        }

        for &alias in spec.aliases {
            self.aliases.insert(alias, spec.name);
        }
        self.commands.insert(spec.name, spec);
        Ok(())
    }

    fn is_taken(&self, token: &str) -> bool {
        self.commands.contains_key(token) || self.aliases.contains_key(token)
    }

    /// Finds the command whose name or alias is exactly `token`.
    pub fn lookup(&self, token: &str) -> Res<&CommandSpec> {
        let name = self.aliases.get(token).copied().unwrap_or(token);
        self.commands
            .get(name)
            .ok_or_else(|| CliError::UnknownCommand(token.to_string()))
    }

    /// All commands in alphabetical order of their names.
    pub fn commands(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Help text of a single command.
    pub fn help(&self, token: &str) -> Res<String> {
        let spec = self.lookup(token)?;
        Ok(spec.to_clap().render_help().to_string())
    }

    /// Overview of every command, one per line.
    pub fn usage(&self) -> String {
        let rows: Vec<(String, &str)> = self
            .commands()
            .map(|spec| (spec.names().collect::<Vec<_>>().join(", "), spec.about))
            .collect();
        let width = rows.iter().map(|(names, _)| names.len()).max().unwrap_or(0);

        let mut out = format!("USAGE:\n   {}> command [arguments...] [--flags]\n\nCOMMANDS:\n", PROGRAM_NAME);
        for (names, about) in rows {
            out.push_str(&format!("   {:width$}   {}\n", names, about, width = width));
        }
        out.push_str("\nRun 'help COMMAND' or 'COMMAND --help' for details.\n");
        out
    }

    /// The whole command tree as one clap command, for shell completions.
    pub fn root_command(&self) -> Command {
        Command::new(PROGRAM_NAME)
            .about(env!("CARGO_PKG_DESCRIPTION"))
            .disable_help_subcommand(true)
            .subcommands(self.commands().map(|spec| spec.to_clap()))
    }

    /// Parses one command line against the registered commands.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Token 0 is the program name, token 1 the command name or
    ///   alias, the rest its flags and positional words
    ///
    /// # Returns
    ///
    /// [`Parsed::Help`] when `--help`/`-h` was given, otherwise
    /// [`Parsed::Run`] with every flag resolved to its given or default value.
    ///
    /// # Errors
    ///
    /// - [`CliError::UnknownCommand`] when token 1 is not registered
    /// - [`CliError::InvalidArgument`] when flags or positional words do not
    ///   fit the command
    pub fn parse(&self, tokens: &[String]) -> Res<Parsed> {
        let Some(token) = tokens.get(1) else {
            return Err(CliError::InvalidArgument("no command given".to_string()));
        };
        let spec = self.lookup(token)?;

        let matches = match spec.to_clap().try_get_matches_from(&tokens[1..]) {
            Ok(matches) => matches,
            Err(e) => {
                return match e.kind() {
                    ErrorKind::DisplayHelp
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        Ok(Parsed::Help(spec.to_clap().render_help().to_string()))
                    }
                    _ => Err(CliError::InvalidArgument(first_line(&e.to_string()))),
                };
            }
        };

        let mut flags = BTreeMap::new();
        let mut provided = BTreeSet::new();
        for flag in &spec.flags {
            if matches.value_source(flag.name) == Some(ValueSource::CommandLine) {
                provided.insert(flag.name);
            }

            let value = match flag.kind {
                FlagKind::Bool => Some(FlagValue::Bool(matches.get_flag(flag.name))),
                FlagKind::Str => matches
                    .get_one::<String>(flag.name)
                    .map(|s| FlagValue::Str(s.clone())),
                FlagKind::Int => matches.get_one::<i64>(flag.name).map(|n| FlagValue::Int(*n)),
            };

            if let Some(value) = value.or_else(|| flag.default.clone()) {
                flags.insert(flag.name, value);
            }
        }

        // Commands without positionals never define the argument.
        let args = matches
            .try_get_many::<String>(ARGS_ID)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        Ok(Parsed::Run(Invocation {
            command: spec.name,
            action: spec.action,
            flags,
            provided,
            args,
        }))
    }
}

fn first_line(message: &str) -> String {
    let line = message.lines().next().unwrap_or(message);
    line.trim_start_matches("error: ").trim().to_string()
}
