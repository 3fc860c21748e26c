#![no_main]
use chrono::{DateTime, Duration};
use evsched::schedule::{Sample, Timestamp, summarize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // One byte per half-hour slot; values above 127 read as negative current
    let Ok(base) = DateTime::parse_from_rfc3339("2022-11-22T21:30:00+00:00") else {
        return;
    };
    let samples: Vec<Sample> = data
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let at = base + Duration::minutes(30 * i as i64);
            Sample::new(Timestamp::new(at), f64::from(*b as i8))
        })
        .collect();

    if let Ok(summary) = summarize(&samples) {
        match (summary.start_time, summary.end_time) {
            (Some(start), Some(end)) => assert!(end >= start),
            (None, None) => assert!(summary.contiguous),
            _ => panic!("start and end must be present together"),
        }
    }
});
