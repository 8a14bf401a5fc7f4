//! # REPL Module
//!
//! The [`Dispatcher`] owns the command registry and the [`Session`] and turns
//! one line of input into one handler call. [`Dispatcher::run`] wraps it in
//! the interactive loop:
//!
//! 1. print the `spotcon> ` prompt and read a line with `rustyline`
//! 2. skip blank lines, keep the rest in history and split it with
//!    [`utils::tokenize`]
//! 3. parse against the registry and run the handler
//! 4. report any error on a single line and read the next command
//!
//! The loop ends on `quit` or end of input. Nothing that happens inside a
//! command ends the loop.

use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    CliError, PROGRAM_NAME, Res,
    cli::{self, Flow, Session},
    command::{Parsed, Registry},
    spotify::Gateway,
    utils, warning,
};

pub const PROMPT: &str = "spotcon> ";

pub struct Dispatcher<G> {
    registry: Registry,
    session: Session<G>,
}

impl<G: Gateway> Dispatcher<G> {
    /// Creates a dispatcher with every built-in command registered.
    pub fn new(session: Session<G>) -> Res<Self> {
        Ok(Self::with_registry(cli::registry()?, session))
    }

    pub fn with_registry(registry: Registry, session: Session<G>) -> Self {
        Self { registry, session }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn session(&self) -> &Session<G> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<G> {
        &mut self.session
    }

    /// Runs one input line and returns the handler's result unreported.
    ///
    /// A blank line does nothing.
    pub async fn dispatch(&mut self, line: &str) -> Res<Flow> {
        let mut tokens = utils::tokenize(line);
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }
        tokens.insert(0, PROGRAM_NAME.to_string());
        self.dispatch_tokens(&tokens).await
    }

    /// Like [`dispatch`](Self::dispatch) for tokens that already carry the
    /// program name at index 0, as `argv` does.
    pub async fn dispatch_tokens(&mut self, tokens: &[String]) -> Res<Flow> {
        match self.registry.parse(tokens)? {
            Parsed::Help(text) => {
                print!("{}", text);
                Ok(Flow::Continue)
            }
            Parsed::Run(inv) => cli::execute(&mut self.session, &self.registry, &inv).await,
        }
    }

    /// Runs one input line and reports whatever went wrong.
    pub async fn execute_line(&mut self, line: &str) -> Flow {
        let result = self.dispatch(line).await;
        self.report(result, utils::tokenize(line).first().map(String::as_str))
    }

    /// Runs `argv` once and reports whatever went wrong.
    pub async fn execute_args(&mut self, args: &[String]) -> Flow {
        let mut tokens = args.to_vec();
        if let Some(first) = tokens.first_mut() {
            *first = PROGRAM_NAME.to_string();
        }
        let result = self.dispatch_tokens(&tokens).await;
        self.report(result, tokens.get(1).map(String::as_str))
    }

    fn report(&self, result: Res<Flow>, command: Option<&str>) -> Flow {
        match result {
            Ok(flow) => flow,
            Err(e @ CliError::UnknownCommand(_)) => {
                warning!("{}. Type 'help' to list the available commands.", e);
                Flow::Continue
            }
            Err(e) if e.is_usage() => {
                warning!("{}", e);
                if let Some(help) = command.and_then(|name| self.registry.help(name).ok()) {
                    print!("{}", help);
                }
                Flow::Continue
            }
            Err(e) => {
                warning!("{}", e);
                Flow::Continue
            }
        }
    }

    /// Reads commands from the line editor until `quit` or end of input.
    ///
    /// Non-blank lines go into the editor's history, so arrow keys recall
    /// earlier commands. Ctrl-C drops the current line and prompts again;
    /// Ctrl-D ends the session.
    ///
    /// # Errors
    ///
    /// [`CliError::Readline`] when the terminal cannot be read.
    pub async fn run(&mut self) -> Res<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            let read = tokio::task::block_in_place(|| rl.readline(PROMPT));

            match next_input(read)? {
                Input::Line(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    if self.execute_line(&line).await == Flow::Quit {
                        return Ok(());
                    }
                }
                Input::Skip => continue,
                Input::End => {
                    println!();
                    return Ok(());
                }
            }
        }
    }
}

/// What the prompt should do with one read from the line editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Blank line or Ctrl-C: prompt again.
    Skip,
    /// End of input.
    End,
}

pub fn next_input(read: Result<String, ReadlineError>) -> Res<Input> {
    match read {
        Ok(line) if line.trim().is_empty() => Ok(Input::Skip),
        Ok(line) => Ok(Input::Line(line)),
        Err(ReadlineError::Interrupted) => Ok(Input::Skip),
        Err(ReadlineError::Eof) => Ok(Input::End),
        Err(e) => Err(e.into()),
    }
}
