//! Command-line arguments
//!
//! `evsched <TOKEN> <SESSION_ID>`: both positionals are mandatory.

use crate::error::{EvschedError, Result};
use crate::evenergy::SessionId;

pub const USAGE: &str = "Usage: evsched <TOKEN> <SESSION_ID>\n\n\
    Fetch an EV.Energy charging log and print its start time, end time and\n\
    whether charging is contiguous as JSON.\n\n\
    Arguments:\n  \
    <TOKEN>       EV.Energy API bearer token\n  \
    <SESSION_ID>  numeric charging session id\n\n\
    Environment:\n  \
    EVSCHED_CONFIG            path to a YAML config file\n  \
    EVSCHED_API_BASE_URL      override api.base_url\n  \
    EVSCHED_LOG_LEVEL         override logging.level\n  \
    EVSCHED_DISABLE_FILE_LOG  log to stderr instead of a file";

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Summarize(CliArgs),
    Help,
    Version,
}

/// Parsed positional arguments
#[derive(Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub token: String,
    pub session_id: SessionId,
}

// Keep the token out of debug output
impl std::fmt::Debug for CliArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliArgs")
            .field("token", &format_args!("<{} chars>", self.token.len()))
            .field("session_id", &self.session_id)
            .finish()
    }
}

impl CliArgs {
    /// Parse arguments with the program name already stripped
    pub fn parse_from<I, S>(args: I) -> Result<Command>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        if let [only] = args.as_slice() {
            match only.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "-V" | "--version" => return Ok(Command::Version),
                _ => {}
            }
        }

        match args.len() {
            0 => Err(EvschedError::usage(
                "Wrong number of arguments, no arguments passed",
            )),
            2 => {
                let token = args[0].trim().to_string();
                if token.is_empty() {
                    return Err(EvschedError::validation("token", "Token cannot be empty"));
                }
                let session_id = args[1].trim().parse::<SessionId>()?;
                Ok(Command::Summarize(CliArgs { token, session_id }))
            }
            n => Err(EvschedError::usage(format!(
                "Wrong number of arguments, two required, {} found",
                n
            ))),
        }
    }

    /// Parse the process arguments
    pub fn from_env() -> Result<Command> {
        Self::parse_from(std::env::args().skip(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let Command::Summarize(args) = CliArgs::parse_from(["secret-token", "7"]).unwrap() else {
            panic!("expected summarize command");
        };
        let dbg = format!("{:?}", args);
        assert!(!dbg.contains("secret-token"));
        assert!(dbg.contains("12 chars"));
    }
}
