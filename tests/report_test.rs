use chrono::{TimeZone, Utc};
use evsched::config::OutputConfig;
use evsched::report::SummaryReport;
use evsched::schedule::{Sample, summarize_at};

fn summary_for(body: &str) -> evsched::ChargeSummary {
    let samples: Vec<Sample> = serde_json::from_str(body).unwrap();
    let at = Utc.with_ymd_and_hms(2022, 11, 23, 9, 14, 44).unwrap();
    summarize_at(&samples, at).unwrap()
}

fn london() -> OutputConfig {
    OutputConfig {
        timezone: "Europe/London".to_string(),
        ..OutputConfig::default()
    }
}

#[test]
fn report_matches_documented_shape() {
    let summary = summary_for(
        r#"[{"datetime":"2022-11-23 00:30:00+00:00","current":32.0},
            {"datetime":"2022-11-23 04:30:00+00:00","current":0.0}]"#,
    );
    let report = SummaryReport::from_summary(&summary, &london()).unwrap();
    let json = report.to_json(true).unwrap();

    let expected = "{\n    \"startTime\": \"2022-11-23 00:30:00+00:00\",\n    \
                    \"endTime\": \"2022-11-23 04:30:00+00:00\",\n    \
                    \"contiguous\": true,\n    \
                    \"parsed\": \"09:14:44 23Nov\"\n}";
    assert_eq!(json, expected);
}

#[test]
fn uncharged_session_has_null_times() {
    let summary = summary_for(r#"[{"datetime":"2022-11-23 00:30:00+00:00","current":0.0}]"#);
    let report = SummaryReport::from_summary(&summary, &london()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&report.to_json(false).unwrap()).unwrap();

    assert!(value["startTime"].is_null());
    assert!(value["endTime"].is_null());
    assert_eq!(value["contiguous"], serde_json::Value::Bool(true));
    assert_eq!(value["parsed"], "09:14:44 23Nov");
}

#[test]
fn compact_output_is_single_line() {
    let summary = summary_for(r#"[]"#);
    let report = SummaryReport::from_summary(&summary, &london()).unwrap();
    let json = report.to_json(false).unwrap();
    assert!(!json.contains('\n'));
}

#[test]
fn unknown_timezone_is_rejected() {
    let summary = summary_for(r#"[]"#);
    let output = OutputConfig {
        timezone: "Atlantis/Capital".to_string(),
        ..OutputConfig::default()
    };
    assert!(SummaryReport::from_summary(&summary, &output).is_err());
}
