//! Processors backed by external programs.
//!
//! Content is piped to the program's stdin and its stdout is the result.
//! The program must be on `PATH`; a missing program or a non-zero exit is
//! reported as [`ProcessorError::Execution`].

use crate::debug;
use crate::error::ProcessorError;
use crate::utils::exec::{Cmd, FilterRule};

/// Command line used by the `less` processor.
pub const LESSC: &[&str] = &["lessc", "--no-color", "-"];

/// lessc prints deprecation chatter on stderr even on success.
const LESSC_FILTER: FilterRule = FilterRule::new(&["npm WARN", "(node:"]);

/// Compile LESS to CSS with `lessc`.
pub fn compile_less(name: &str, content: &str) -> Result<String, ProcessorError> {
    run(name, LESSC, content, &LESSC_FILTER)
}

/// Pipe `content` through an arbitrary command line.
pub fn run_command(
    name: &str,
    command: &[String],
    content: &str,
) -> Result<String, ProcessorError> {
    run(name, command, content, &crate::utils::exec::EMPTY_FILTER)
}

fn run<S: AsRef<str>>(
    name: &str,
    command: &[S],
    content: &str,
    filter: &'static FilterRule,
) -> Result<String, ProcessorError> {
    let Some(program) = command.first().map(|p| -> &str { p.as_ref() }) else {
        return Err(ProcessorError::execution(name, "empty command"));
    };

    let resolved = which::which(program).map_err(|_| {
        ProcessorError::execution(
            name,
            format!("`{program}` is not installed. Please install it to use the `{name}` processor."),
        )
    })?;

    debug!("processor"; "{} -> {}", name, resolved.display());

    let output = Cmd::new(&resolved)
        .args(command[1..].iter().map(|arg| -> &str { arg.as_ref() }))
        .stdin(content)
        .filter(filter)
        .run()
        .map_err(|e| ProcessorError::execution(name, format!("{e:#}")))?;

    String::from_utf8(output.stdout).map_err(|_| {
        ProcessorError::execution(name, format!("`{program}` produced non UTF-8 output"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command() {
        let err = run_command("custom", &[], "x").unwrap_err();
        assert_eq!(err, ProcessorError::execution("custom", "empty command"));
    }

    #[test]
    fn test_missing_program() {
        let command = vec!["definitely-not-a-real-compiler-xyz".to_string()];
        let err = run_command("custom", &command, "x").unwrap_err();
        let ProcessorError::Execution { name, message } = err else {
            panic!("expected execution error");
        };
        assert_eq!(name, "custom");
        assert!(message.contains("not installed"));
    }

    #[cfg(unix)]
    #[test]
    fn test_pipes_content_through_command() {
        let command = vec!["cat".to_string()];
        assert_eq!(run_command("cat", &command, "a{}").unwrap(), "a{}");

        let command = vec!["tr".to_string(), "a-z".to_string(), "A-Z".to_string()];
        assert_eq!(run_command("upper", &command, "body{}").unwrap(), "BODY{}");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit() {
        let command = vec!["false".to_string()];
        let err = run_command("fails", &command, "x").unwrap_err();
        assert!(matches!(err, ProcessorError::Execution { .. }));
    }
}
