use std::collections::{BTreeMap, BTreeSet};

use crate::command::{Action, FlagValue};

/// One validated input line, ready for its handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: &'static str,
    pub action: Action,
    /// Every flag the user gave, plus declared defaults for the rest.
    pub flags: BTreeMap<&'static str, FlagValue>,
    /// Flags that were actually typed.
    pub provided: BTreeSet<&'static str>,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn is_set(&self, flag: &str) -> bool {
        self.provided.contains(flag)
    }

    pub fn flag_bool(&self, flag: &str) -> bool {
        matches!(self.flags.get(flag), Some(FlagValue::Bool(true)))
    }

    pub fn flag_str(&self, flag: &str) -> Option<&str> {
        match self.flags.get(flag) {
            Some(FlagValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn flag_int(&self, flag: &str) -> Option<i64> {
        match self.flags.get(flag) {
            Some(FlagValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Positional words joined with single spaces.
    pub fn text(&self) -> String {
        self.args.join(" ")
    }
}

/// Outcome of parsing a line: something to run, or help to print because
/// `-h`/`--help` was given.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Run(Invocation),
    Help(String),
}
