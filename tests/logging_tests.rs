use evsched::logging::{get_logger, parse_log_level, parse_rotation};
use tracing::Level;

#[test]
fn parse_levels_from_config_strings() {
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level(" trace ").unwrap(), Level::TRACE);
    assert!(parse_log_level("fatal").is_err());
}

#[test]
fn rotation_names() {
    assert!(parse_rotation("hourly").is_ok());
    assert!(parse_rotation("NEVER").is_ok());
    assert!(parse_rotation("monthly").is_err());
}

#[test]
fn component_logger_without_subscriber() {
    let logger = get_logger("integration").for_session(9);
    assert_eq!(logger.context().session_id, Some(9));
    logger.warn("no subscriber installed");
}
