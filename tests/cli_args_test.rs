use evsched::cli::{CliArgs, Command};
use evsched::error::EvschedError;

fn parse(args: &[&str]) -> evsched::Result<Command> {
    CliArgs::parse_from(args.iter().copied())
}

#[test]
fn token_and_session_id() {
    let Command::Summarize(args) = parse(&["abc.def", "12345"]).unwrap() else {
        panic!("expected summarize command");
    };
    assert_eq!(args.token, "abc.def");
    assert_eq!(args.session_id.get(), 12345);
}

#[test]
fn no_arguments() {
    let err = parse(&[]).unwrap_err();
    assert!(matches!(err, EvschedError::Usage { .. }));
    assert!(err.to_string().contains("no arguments"));
}

#[test]
fn wrong_argument_count() {
    let err = parse(&["token"]).unwrap_err();
    assert!(err.to_string().contains("two required, 1 found"));

    let err = parse(&["token", "1", "extra"]).unwrap_err();
    assert!(err.to_string().contains("two required, 3 found"));
}

#[test]
fn session_id_must_be_positive_number() {
    for bad in ["abc", "-5", "0", "12a", "1.5", "", "99999999999999999999999"] {
        let err = parse(&["token", bad]).unwrap_err();
        assert!(
            matches!(err, EvschedError::Validation { ref field, .. } if field == "session_id"),
            "{:?} -> {}",
            bad,
            err
        );
    }
}

#[test]
fn blank_token_rejected() {
    let err = parse(&["  ", "7"]).unwrap_err();
    assert!(matches!(err, EvschedError::Validation { ref field, .. } if field == "token"));
}

#[test]
fn help_and_version_flags() {
    assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
    assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
    assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
    assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
}
