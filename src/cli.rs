//! Command-line configuration
//!
//! ```text
//! scopeview [--tokens | --ast | --check] (<file> | --sample)
//! ```
//!
//! Without a mode flag the interactive viewer starts.

use std::fmt;
use std::path::PathBuf;

/// What to do with the analysed source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Interactive terminal viewer
    View,
    /// Print the token list and exit
    Tokens,
    /// Print the syntax tree outline and exit
    Ast,
    /// Print only the verdict and exit
    Check,
}

/// Where the source text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    File(PathBuf),
    Sample,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    pub input: Input,
}

/// Outcome of reading the arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Options),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    MissingInput,
    ConflictingModes(String, String),
    UnknownFlag(String),
    ExtraArgument(String),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::MissingInput => write!(f, "No input file provided"),
            UsageError::ConflictingModes(a, b) => {
                write!(f, "Options '{}' and '{}' cannot be combined", a, b)
            }
            UsageError::UnknownFlag(flag) => write!(f, "Unknown option '{}'", flag),
            UsageError::ExtraArgument(arg) => write!(f, "Unexpected argument '{}'", arg),
        }
    }
}

impl std::error::Error for UsageError {}

/// Parse the arguments that follow the program name.
pub fn parse_args<I, S>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut mode: Option<(Mode, String)> = None;
    let mut input: Option<Input> = None;

    for arg in args {
        let arg = arg.as_ref();
        let flag_mode = match arg {
            "-h" | "--help" => return Ok(Command::Help),
            "--tokens" => Some(Mode::Tokens),
            "--ast" => Some(Mode::Ast),
            "--check" => Some(Mode::Check),
            _ => None,
        };

        if let Some(new_mode) = flag_mode {
            if let Some((_, previous)) = &mode {
                return Err(UsageError::ConflictingModes(
                    previous.clone(),
                    arg.to_string(),
                ));
            }
            mode = Some((new_mode, arg.to_string()));
            continue;
        }

        if arg == "--sample" {
            if input.is_some() {
                return Err(UsageError::ExtraArgument(arg.to_string()));
            }
            input = Some(Input::Sample);
        } else if arg.starts_with('-') && arg.len() > 1 {
            return Err(UsageError::UnknownFlag(arg.to_string()));
        } else if input.is_some() {
            return Err(UsageError::ExtraArgument(arg.to_string()));
        } else {
            input = Some(Input::File(PathBuf::from(arg)));
        }
    }

    let input = input.ok_or(UsageError::MissingInput)?;
    Ok(Command::Run(Options {
        mode: mode.map(|(m, _)| m).unwrap_or(Mode::View),
        input,
    }))
}

/// Usage text for `--help` and usage errors
pub fn usage(program_name: &str) -> String {
    format!(
        "Usage: {0} [--tokens | --ast | --check] (<file> | --sample)\n\
         \n\
         Modes:\n\
         \x20 (none)      open the interactive viewer\n\
         \x20 --tokens    print the token list\n\
         \x20 --ast       print the syntax tree\n\
         \x20 --check     report the first error, if any\n\
         \n\
         Examples:\n\
         \x20 {0} --sample              # Browse the built-in sample program\n\
         \x20 {0} --ast program.txt     # Print the tree of your own program",
        program_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Result<Command, UsageError> {
        parse_args(args.iter().copied())
    }

    #[test]
    fn test_default_mode_is_view() {
        assert_eq!(
            run(&["prog.txt"]),
            Ok(Command::Run(Options {
                mode: Mode::View,
                input: Input::File(PathBuf::from("prog.txt")),
            }))
        );
    }

    #[test]
    fn test_dump_modes() {
        assert_eq!(
            run(&["--ast", "--sample"]),
            Ok(Command::Run(Options {
                mode: Mode::Ast,
                input: Input::Sample,
            }))
        );
        assert_eq!(
            run(&["a.txt", "--tokens"]),
            Ok(Command::Run(Options {
                mode: Mode::Tokens,
                input: Input::File(PathBuf::from("a.txt")),
            }))
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(run(&["--ast", "-h"]), Ok(Command::Help));
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(run(&[]), Err(UsageError::MissingInput));
        assert_eq!(run(&["--check"]), Err(UsageError::MissingInput));
        assert_eq!(
            run(&["--ast", "--tokens", "a"]),
            Err(UsageError::ConflictingModes(
                "--ast".to_string(),
                "--tokens".to_string()
            ))
        );
        assert_eq!(
            run(&["--color", "a"]),
            Err(UsageError::UnknownFlag("--color".to_string()))
        );
        assert_eq!(
            run(&["a", "b"]),
            Err(UsageError::ExtraArgument("b".to_string()))
        );
        assert_eq!(
            run(&["a", "--sample"]),
            Err(UsageError::ExtraArgument("--sample".to_string()))
        );
    }
}
