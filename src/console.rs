//! Line-oriented command loop driving a [`DebugContext`].

use std::io::{self, BufRead, Write};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{DebuggerConfig, MemoryFormat};
use crate::debugger::{Command, DebugContext, StepEvent, HELP};
use crate::executor::Executor;
use crate::memory::{Memory, Value};

/// Why the command loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    Quit,
    EndOfInput,
}

/// Read commands from `input` until `q` or end of input. The chain is
/// restored before returning either way.
pub fn run_console<E, R, W>(
    ctx: &mut DebugContext<'_, E>,
    mut input: R,
    out: &mut W,
    config: &DebuggerConfig,
) -> io::Result<ConsoleExit>
where
    E: Executor,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    let exit = loop {
        if !config.prompt.is_empty() {
            write!(out, "{}", config.prompt)?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break ConsoleExit::EndOfInput;
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                debug!(input = line.trim(), %err, "rejected command");
                writeln!(out, "{err}")?;
                continue;
            }
        };

        if command == Command::Quit {
            break ConsoleExit::Quit;
        }
        dispatch(ctx, command, out, config)?;
    };

    ctx.restore_chain();
    out.flush()?;
    Ok(exit)
}

fn dispatch<E: Executor, W: Write>(
    ctx: &mut DebugContext<'_, E>,
    command: Command,
    out: &mut W,
    config: &DebuggerConfig,
) -> io::Result<()> {
    match command {
        Command::Resume(mode) => match ctx.resume(mode) {
            Ok(StepEvent::BreakpointHit { line }) => writeln!(out, "breakpoint hit at line {line}"),
            Ok(StepEvent::Executed { .. }) => Ok(()),
            Ok(StepEvent::Failed { line, error }) => {
                writeln!(out, "**semantic error at line {line}: {error}")
            }
            Err(err) => writeln!(out, "{err}"),
        },
        Command::Break(line) => match ctx.set_breakpoint(line) {
            Ok(()) => writeln!(out, "breakpoint set at line {line}"),
            Err(err) => writeln!(out, "{err}"),
        },
        Command::RemoveBreak(line) => match ctx.remove_breakpoint(line) {
            Ok(()) => writeln!(out, "breakpoint removed"),
            Err(err) => writeln!(out, "{err}"),
        },
        Command::ListBreaks => {
            let lines = ctx.breakpoints();
            if lines.is_empty() {
                writeln!(out, "no breakpoints")
            } else {
                let joined = lines
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(out, "breakpoints on lines: {joined}")
            }
        }
        Command::ClearBreaks => {
            ctx.clear_breakpoints();
            writeln!(out, "breakpoints cleared")
        }
        Command::Print(name) => match ctx.lookup(&name) {
            Some(value) => writeln!(out, "{name} ({}): {value}", value.kind_name()),
            None => writeln!(out, "no such variable"),
        },
        Command::ShowMemory => match config.memory_format {
            MemoryFormat::Table => ctx.memory().print(out),
            MemoryFormat::Json => print_memory_json(ctx.memory(), out),
        },
        Command::ShowState => writeln!(out, "{}", ctx.state()),
        Command::Where => writeln!(out, "{}", ctx.position()),
        Command::Help => {
            writeln!(out, "Available commands:")?;
            for (usage, description) in HELP {
                writeln!(out, "{usage} -> {description}")?;
            }
            Ok(())
        }
        Command::Quit => Ok(()),
    }
}

#[derive(Serialize)]
struct CellView<'a> {
    address: usize,
    name: &'a str,
    value: &'a Value,
}

fn print_memory_json<W: Write>(memory: &Memory, out: &mut W) -> io::Result<()> {
    let cells: Vec<CellView<'_>> = memory
        .cells()
        .map(|(address, name, value)| CellView {
            address,
            name,
            value,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &cells).map_err(|err| {
        warn!(%err, "memory dump failed");
        io::Error::other(err)
    })?;
    writeln!(out)
}
