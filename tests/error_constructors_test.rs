use evsched::error::EvschedError;

#[test]
fn error_constructors_group_1() {
    assert!(matches!(
        EvschedError::config("x"),
        EvschedError::Config { .. }
    ));
    assert!(matches!(EvschedError::usage("x"), EvschedError::Usage { .. }));
    assert!(matches!(
        EvschedError::validation("f", "m"),
        EvschedError::Validation { .. }
    ));
    assert!(matches!(EvschedError::auth("x"), EvschedError::Auth { .. }));
}

#[test]
fn error_constructors_group_2() {
    assert!(matches!(
        EvschedError::network("x"),
        EvschedError::Network { .. }
    ));
    assert!(matches!(
        EvschedError::http(500, "x"),
        EvschedError::Http { status: 500, .. }
    ));
    assert!(matches!(
        EvschedError::serialization("x"),
        EvschedError::Serialization { .. }
    ));
    assert!(matches!(EvschedError::io("x"), EvschedError::Io { .. }));
}

#[test]
fn display_messages() {
    assert!(
        EvschedError::validation("field", "bad")
            .to_string()
            .contains("Validation error")
    );
    assert_eq!(
        EvschedError::MissingSchedule.to_string(),
        "No schedule returned in JSON"
    );
    assert_eq!(
        EvschedError::http(404, "HTTP error occurred (Not Found)").to_string(),
        "HTTP error: status 404 - HTTP error occurred (Not Found)"
    );
}

#[test]
fn json_errors_convert_to_serialization() {
    let err: EvschedError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, EvschedError::Serialization { .. }));
}
