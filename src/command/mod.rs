//! # Command Module
//!
//! Commands are described by data ([`CommandSpec`]): a name, aliases, the
//! flags they accept and how many positional words they take. The
//! [`Registry`] owns every command, resolves the first word of a line to one
//! of them and validates the rest of the line with `clap` before anything
//! runs. A successful parse yields an [`Invocation`]; the handler that acts
//! on it is chosen by the command's [`Action`].

mod invocation;
mod registry;
mod spec;

pub use invocation::{Invocation, Parsed};
pub use registry::Registry;
pub use spec::{Action, CommandSpec, FlagKind, FlagSpec, FlagValue, Positionals};
