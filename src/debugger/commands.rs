use thiserror::Error;

use super::stepping::RunMode;

/// One console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Resume(RunMode),
    Break(u32),
    RemoveBreak(u32),
    ListBreaks,
    ClearBreaks,
    Print(String),
    ShowMemory,
    ShowState,
    Where,
    Quit,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("invalid line number: {0}")]
    InvalidLine(String),

    #[error("{0} requires an argument")]
    MissingArgument(&'static str),

    #[error("unbalanced quotes")]
    Unbalanced,
}

pub const HELP: &[(&str, &str)] = &[
    ("r", "Run the program / continue from a breakpoint"),
    ("s", "Step one statement"),
    ("b n", "Breakpoint at line n"),
    ("rb n", "Remove breakpoint at line n"),
    ("lb", "List all breakpoints"),
    ("cb", "Clear all breakpoints"),
    ("p varname", "Print variable"),
    ("sm", "Show memory contents"),
    ("ss", "Show state of debugger"),
    ("w", "What line are we on?"),
    ("q", "Quit the debugger"),
];

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(input: &str) -> Result<Option<Self>, CommandError> {
        let words = shlex::split(input).ok_or(CommandError::Unbalanced)?;
        let mut words = words.into_iter();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let arg = words.next();

        let command = match name.as_str() {
            "r" => Command::Resume(RunMode::Continue),
            "s" => Command::Resume(RunMode::Step),
            "b" => Command::Break(line_arg("b", arg)?),
            "rb" => Command::RemoveBreak(line_arg("rb", arg)?),
            "lb" => Command::ListBreaks,
            "cb" => Command::ClearBreaks,
            "p" => Command::Print(arg.ok_or(CommandError::MissingArgument("p"))?),
            "sm" => Command::ShowMemory,
            "ss" => Command::ShowState,
            "w" => Command::Where,
            "q" => Command::Quit,
            "h" => Command::Help,
            _ => return Err(CommandError::Unknown(name)),
        };
        Ok(Some(command))
    }
}

fn line_arg(command: &'static str, arg: Option<String>) -> Result<u32, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(command))?;
    arg.parse::<u32>().map_err(|_| CommandError::InvalidLine(arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(Command::parse("b 12"), Ok(Some(Command::Break(12))));
        assert_eq!(Command::parse("  rb 3 "), Ok(Some(Command::RemoveBreak(3))));
        assert_eq!(Command::parse("p x"), Ok(Some(Command::Print("x".into()))));
        assert_eq!(
            Command::parse("s"),
            Ok(Some(Command::Resume(RunMode::Step)))
        );
    }

    #[test]
    fn blank_input_is_not_a_command() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn malformed_input_is_reported() {
        assert_eq!(
            Command::parse("b x"),
            Err(CommandError::InvalidLine("x".into()))
        );
        assert_eq!(Command::parse("b"), Err(CommandError::MissingArgument("b")));
        assert_eq!(Command::parse("b -1"), Err(CommandError::InvalidLine("-1".into())));
        assert_eq!(Command::parse("zz"), Err(CommandError::Unknown("zz".into())));
    }
}
