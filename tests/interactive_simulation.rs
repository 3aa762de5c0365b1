// tests/interactive_simulation.rs
// Simulates interactive debugging sessions through the command console

use std::io::Cursor;

use nupy_debugger::config::{MemoryFormat, DEFAULT_PROMPT};
use nupy_debugger::{parse_program, run_console, ConsoleExit, DebugContext, DebuggerConfig, Interpreter};

struct Transcript {
    console: String,
    program_output: String,
    exit: ConsoleExit,
    lines_after: Vec<u32>,
}

// Helper to drive a whole session from a command script
fn simulate_with(source: &str, commands: &str, config: &DebuggerConfig) -> Transcript {
    let mut chain = parse_program(source).expect("test program should parse");
    let mut out = Vec::new();
    let (exit, program_output) = {
        let mut ctx = DebugContext::new(&mut chain, Interpreter::new(Vec::new()));
        let exit = run_console(&mut ctx, Cursor::new(commands), &mut out, config)
            .expect("console should not fail on in-memory io");
        let program_output = ctx.executor().output().clone();
        ctx.quit();
        (exit, program_output)
    };
    Transcript {
        console: String::from_utf8(out).unwrap(),
        program_output: String::from_utf8(program_output).unwrap(),
        exit,
        lines_after: chain.line_sequence(),
    }
}

fn simulate(source: &str, commands: &str) -> Transcript {
    simulate_with(source, commands, &DebuggerConfig::default().quiet())
}

const PROGRAM: &str = "x = 1\ny = 2\nprint(x + y)\n";

#[cfg(test)]
mod interactive_tests {
    use super::*;

    #[test]
    fn test_breakpoint_step_and_inspect() {
        let t = simulate(PROGRAM, "b 2\nr\nw\np y\ns\nw\nr\np x\np y\nss\nq\n");
        assert_eq!(
            t.console,
            "breakpoint set at line 2\n\
             breakpoint hit at line 2\n\
             line 2\n\
             no such variable\n\
             line 3\n\
             x (int): 1\n\
             y (int): 2\n\
             Completed\n"
        );
        assert_eq!(t.program_output, "3\n");
        assert_eq!(t.exit, ConsoleExit::Quit);
        assert_eq!(t.lines_after, vec![1, 2, 3]);
    }

    #[test]
    fn test_breakpoint_on_missing_line() {
        let t = simulate(PROGRAM, "b 99\nlb\n");
        assert_eq!(t.console, "no such line\nno breakpoints\n");
        assert_eq!(t.exit, ConsoleExit::EndOfInput);
    }

    #[test]
    fn test_run_after_completion() {
        let t = simulate(PROGRAM, "r\nr\ns\nss\nw\n");
        assert_eq!(
            t.console,
            "program has completed\nprogram has completed\nCompleted\ncompleted execution\n"
        );
        assert_eq!(t.program_output, "3\n");
    }

    #[test]
    fn test_state_before_running() {
        let t = simulate("\n\nx = 1\n", "ss\nw\n");
        assert_eq!(t.console, "Loaded\nline 3\n");
    }

    #[test]
    fn test_breakpoint_list_and_removal() {
        let t = simulate(PROGRAM, "b 3\nb 1\nb 3\nlb\nrb 1\nrb 1\nlb\ncb\nlb\n");
        assert_eq!(
            t.console,
            "breakpoint set at line 3\n\
             breakpoint set at line 1\n\
             breakpoint already set\n\
             breakpoints on lines: 1, 3\n\
             breakpoint removed\n\
             no such breakpoint\n\
             breakpoints on lines: 3\n\
             breakpoints cleared\n\
             no breakpoints\n"
        );
    }

    #[test]
    fn test_bad_input_changes_nothing() {
        let t = simulate(PROGRAM, "jump\nb two\nb\n\nss\n");
        assert_eq!(
            t.console,
            "unknown command: jump\n\
             invalid line number: two\n\
             b requires an argument\n\
             Loaded\n"
        );
    }

    #[test]
    fn test_semantic_error_completes_session() {
        let t = simulate("x = 1\ny = z + 1\nprint(x)\n", "b 3\nr\nss\nw\np x\nq\n");
        assert_eq!(
            t.console,
            "breakpoint set at line 3\n\
             **semantic error at line 2: name 'z' is not defined\n\
             Completed\n\
             completed execution\n\
             x (int): 1\n"
        );
        assert!(t.program_output.is_empty());
        assert_eq!(t.lines_after, vec![1, 2, 3]);
    }

    #[test]
    fn test_quit_mid_program_restores_chain() {
        let t = simulate("a = 1\nb = 2\nc = 3\nd = 4\n", "b 3\nr\ns\nq\nr\n");
        assert_eq!(
            t.console,
            "breakpoint set at line 3\nbreakpoint hit at line 3\n"
        );
        assert_eq!(t.exit, ConsoleExit::Quit);
        assert_eq!(t.lines_after, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_print_shows_kinds() {
        let source = "r = 2.5\ns = 'hi'\nb = 1 < 2\nn = None\np = &r\n";
        let t = simulate(source, "r\np r\np s\np b\np n\np p\n");
        assert_eq!(
            t.console,
            "r (real): 2.5\n\
             s (str): hi\n\
             b (bool): True\n\
             n (none): None\n\
             p (ptr): 0\n"
        );
    }

    #[test]
    fn test_show_memory_table() {
        let t = simulate("x = 1\ny = 'two'\n", "r\nsm\n");
        assert_eq!(
            t.console,
            "**MEMORY PRINT**\n\
             Number of cells: 2\n\
             Contents:\n \
             0: x (int): 1\n \
             1: y (str): two\n\
             **END PRINT**\n"
        );
    }

    #[test]
    fn test_show_memory_json() {
        let config = DebuggerConfig {
            memory_format: MemoryFormat::Json,
            ..DebuggerConfig::default().quiet()
        };
        let t = simulate_with("x = 1\n", "r\nsm\n", &config);
        let dump: serde_json::Value = serde_json::from_str(&t.console).unwrap();
        assert_eq!(dump[0]["name"], "x");
        assert_eq!(dump[0]["address"], 0);
        assert_eq!(dump[0]["value"]["kind"], "int");
        assert_eq!(dump[0]["value"]["value"], 1);
    }

    #[test]
    fn test_help_lists_commands() {
        let t = simulate(PROGRAM, "h\n");
        assert!(t.console.starts_with("Available commands:\n"));
        assert!(t.console.contains("r -> Run the program / continue from a breakpoint\n"));
        assert!(t.console.contains("q -> Quit the debugger\n"));
    }

    #[test]
    fn test_prompt_is_printed_per_command() {
        let t = simulate_with(PROGRAM, "ss\nq\n", &DebuggerConfig::default());
        assert_eq!(
            t.console,
            format!("{DEFAULT_PROMPT}Loaded\n{DEFAULT_PROMPT}")
        );
    }
}
