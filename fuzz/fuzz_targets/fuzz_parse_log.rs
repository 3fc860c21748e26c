#![no_main]
use evsched::evenergy::ChargingLog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary response bodies must decode or fail, never panic
    if let Ok(log) = serde_json::from_slice::<ChargingLog>(data)
        && let Ok(samples) = log.into_schedule()
    {
        let _ = evsched::summarize(&samples);
    }
});
