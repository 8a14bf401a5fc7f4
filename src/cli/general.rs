use std::io::{self, Write};

use clap_complete::{Shell, generate};

use crate::{
    CliError, PROGRAM_NAME, Res,
    command::{Invocation, Registry},
    display,
};

pub fn clear() -> Res<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", display::CLEAR_SCREEN)?;
    stdout.flush()?;
    Ok(())
}

pub fn help(registry: &Registry, inv: &Invocation) -> Res<()> {
    match inv.args.first() {
        Some(name) => print!("{}", registry.help(name)?),
        None => print!("{}", registry.usage()),
    }
    Ok(())
}

pub fn completions(registry: &Registry, inv: &Invocation) -> Res<()> {
    let shell: Shell = inv
        .text()
        .to_lowercase()
        .parse()
        .map_err(CliError::InvalidArgument)?;

    let mut cmd = registry.root_command();
    generate(shell, &mut cmd, PROGRAM_NAME, &mut io::stdout());
    Ok(())
}
