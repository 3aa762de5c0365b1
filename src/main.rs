use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nupy_debugger::parser::END_OF_PROGRAM;
use nupy_debugger::{parse_program, run_console, DebugContext, DebuggerConfig, Interpreter};

#[derive(Parser, Debug)]
#[command(name = "nupy-debugger")]
#[command(about = "Step through a nuPython program with breakpoints")]
struct Cli {
    /// Program to debug; read from stdin up to a `$` line when omitted
    program: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Arm a breakpoint before the first command (repeatable)
    #[arg(short = 'b', long = "break")]
    breakpoints: Vec<u32>,

    /// Read debugger commands from this file instead of stdin
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Suppress the prompt and banners
    #[arg(short, long)]
    quiet: bool,

    /// Log debugger internals to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => DebuggerConfig::load(path)?,
        None => DebuggerConfig::default(),
    };
    config.breakpoints.extend(&cli.breakpoints);
    if cli.quiet {
        config = config.quiet();
    }

    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    let mut stdout = io::stdout();

    let source = match &cli.program {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("unable to open input file '{}'", path.display()))?,
        None => {
            if config.banner {
                writeln!(stdout, "nuPython input (enter {END_OF_PROGRAM} when you're done)>")?;
            }
            read_program_text(&mut stdin)?
        }
    };

    let mut chain = match parse_program(&source) {
        Ok(chain) => chain,
        Err(err) => bail!("parsing failed: {err}"),
    };
    if config.banner {
        writeln!(stdout, "**parsing successful")?;
        writeln!(stdout, "**building program graph")?;
        writeln!(stdout)?;
    }

    let mut ctx = DebugContext::new(&mut chain, Interpreter::new(io::stdout()));
    for &line in &config.breakpoints {
        if let Err(err) = ctx.set_breakpoint(line) {
            warn!(line, %err, "initial breakpoint rejected");
            writeln!(stdout, "breakpoint {line}: {err}")?;
        }
    }

    let exit = match &cli.commands {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("unable to open command file '{}'", path.display()))?;
            run_console(&mut ctx, BufReader::new(file), &mut stdout, &config)?
        }
        None => run_console(&mut ctx, &mut stdin, &mut stdout, &config)?,
    };
    info!(?exit, "console closed");
    ctx.quit();

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "nupy_debugger=debug"
    } else {
        "nupy_debugger=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Collect program lines up to the end marker or end of input.
fn read_program_text<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut source = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 || line.trim() == END_OF_PROGRAM {
            break;
        }
        source.push_str(&line);
    }
    Ok(source)
}
