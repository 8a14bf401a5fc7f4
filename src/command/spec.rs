use clap::{
    Arg, ArgAction, ColorChoice, Command, builder::PossibleValuesParser, value_parser,
};

/// Identifies the handler a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Clear,
    Completions,
    Current,
    Devices,
    Help,
    Next,
    Opt,
    Pause,
    Play,
    Prev,
    Quit,
    Repeat,
    Search,
    Seek,
    Shuffle,
    Vol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    Str,
    Int,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    Str(String),
    Int(i64),
}

#[derive(Debug, Clone)]
pub struct FlagSpec {
    pub name: &'static str,
    pub short: Option<char>,
    pub kind: FlagKind,
    pub default: Option<FlagValue>,
    pub value_name: &'static str,
    pub help: &'static str,
}

impl FlagSpec {
    pub fn switch(name: &'static str, short: char, help: &'static str) -> Self {
        Self {
            name,
            short: Some(short),
            kind: FlagKind::Bool,
            default: Some(FlagValue::Bool(false)),
            value_name: "",
            help,
        }
    }

    pub fn string(
        name: &'static str,
        short: char,
        value_name: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            name,
            short: Some(short),
            kind: FlagKind::Str,
            default: None,
            value_name,
            help,
        }
    }

    pub fn int(name: &'static str, short: char, value_name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            short: Some(short),
            kind: FlagKind::Int,
            default: None,
            value_name,
            help,
        }
    }

    pub fn with_default(mut self, value: FlagValue) -> Self {
        self.default = Some(value);
        self
    }

    fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.name).long(self.name).help(self.help);
        if let Some(short) = self.short {
            arg = arg.short(short);
        }

        match self.kind {
            FlagKind::Bool => arg.action(ArgAction::SetTrue),
            FlagKind::Str => arg.action(ArgAction::Set).value_name(self.value_name),
            FlagKind::Int => arg
                .action(ArgAction::Set)
                .value_name(self.value_name)
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true),
        }
    }
}

/// What a command accepts besides flags.
#[derive(Debug, Clone)]
pub enum Positionals {
    None,
    /// Any number of words, joined back together by the handler.
    FreeText {
        required: bool,
        value_name: &'static str,
    },
    Exactly(usize, &'static str),
    AtMost(usize, &'static str),
    /// Exactly one word out of a fixed vocabulary (case-insensitive).
    OneOf(&'static [&'static str]),
}

/// Id of the clap argument positional words are collected under.
pub(crate) const ARGS_ID: &str = "args";

impl Positionals {
    fn to_arg(&self) -> Option<Arg> {
        // Only free text may be given in several runs; everything else is
        // a single occurrence so extra words are rejected.
        let arg = Arg::new(ARGS_ID)
            .action(ArgAction::Set)
            .allow_negative_numbers(true);

        match self {
            Positionals::None | Positionals::Exactly(0, _) => None,
            Positionals::FreeText {
                required,
                value_name,
            } => Some(
                arg.action(ArgAction::Append)
                    .value_name(*value_name)
                    .num_args(1..)
                    .required(*required),
            ),
            Positionals::Exactly(n, value_name) => {
                Some(arg.value_name(*value_name).num_args(*n).required(true))
            }
            Positionals::AtMost(n, value_name) => {
                Some(arg.value_name(*value_name).num_args(1..=*n).required(false))
            }
            Positionals::OneOf(values) => Some(
                arg.num_args(1)
                    .required(true)
                    .ignore_case(true)
                    .value_parser(PossibleValuesParser::new(values.to_vec())),
            ),
        }
    }
}

/// Static description of one command.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub about: &'static str,
    pub flags: Vec<FlagSpec>,
    pub positionals: Positionals,
    pub action: Action,
}

impl CommandSpec {
    pub fn new(name: &'static str, about: &'static str, action: Action) -> Self {
        Self {
            name,
            aliases: &[],
            about,
            flags: Vec::new(),
            positionals: Positionals::None,
            action,
        }
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn positionals(mut self, positionals: Positionals) -> Self {
        self.positionals = positionals;
        self
    }

    /// Names this command answers to: its name first, then its aliases.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// Builds the clap parser that validates this command's arguments.
    pub fn to_clap(&self) -> Command {
        let mut cmd = Command::new(self.name)
            .about(self.about)
            .visible_aliases(self.aliases.iter().copied())
            .color(ColorChoice::Never);

        for flag in &self.flags {
            cmd = cmd.arg(flag.to_arg());
        }

        if let Some(arg) = self.positionals.to_arg() {
            cmd = cmd.arg(arg);
        }

        cmd
    }
}
