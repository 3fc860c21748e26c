//! Charging schedule interpretation
//!
//! The EV.Energy charging log is a list of samples, each giving the charging
//! current at the start of a fixed interval. [`summarize`] folds those samples
//! into a [`ChargeSummary`]: when charging started, when it ended and whether
//! it was delivered as one uninterrupted run.
//!
//! Because each sample marks the *start* of an interval, the end of a run is
//! the timestamp of the first zero-current sample after it (the boundary
//! sample), not the last positive one.

use crate::error::{EvschedError, Result};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

// Format used by the EV.Energy API; fractional seconds are optional
const SPACED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

/// Point in time with the UTC offset it was reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self(instant)
    }

    pub fn as_datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl FromStr for Timestamp {
    type Err = EvschedError;

    /// Accepts RFC 3339 and the API's `2022-11-22 21:30:00+00:00` form
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Ok(Self(dt)),
            Err(_) => Ok(Self(DateTime::parse_from_str(s, SPACED_FORMAT)?)),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(SPACED_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One schedule entry: the charging current (A) from `timestamp` onwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(rename = "datetime")]
    pub timestamp: Timestamp,
    pub current: f64,
}

impl Sample {
    pub fn new(timestamp: Timestamp, current: f64) -> Self {
        Self { timestamp, current }
    }
}

/// Sign of a current reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentSign {
    Zero,
    Positive,
    /// Any other non-zero reading, NaN included
    Negative,
}

impl CurrentSign {
    pub fn of(current: f64) -> Self {
        if current == 0.0 {
            Self::Zero
        } else if current > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// How a single sample moves the interpreter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// First sample with positive current
    Onset,
    /// Non-zero current after charging started, possibly resuming a stopped run
    Continue,
    /// Zero current after charging started
    Stop,
    /// Zero current, charging not started yet
    Idle,
    /// Negative current before charging started; no rule accepts it
    Rejected,
}

impl Transition {
    /// Classify a sample by whether charging has started and the sign of its current.
    ///
    /// After the first onset any non-zero current (negative included) counts as
    /// charging, while before it only a positive current starts a run.
    pub fn classify(started: bool, sign: CurrentSign) -> Self {
        match (started, sign) {
            (false, CurrentSign::Positive) => Self::Onset,
            (true, CurrentSign::Positive | CurrentSign::Negative) => Self::Continue,
            (true, CurrentSign::Zero) => Self::Stop,
            (false, CurrentSign::Zero) => Self::Idle,
            (false, CurrentSign::Negative) => Self::Rejected,
        }
    }
}

/// Accumulator threaded through the samples
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeState {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
    had_prior_stop: bool,
    was_charging: bool,
    contiguous: bool,
}

impl Default for ChargeState {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            had_prior_stop: false,
            was_charging: false,
            contiguous: true,
        }
    }
}

impl ChargeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> bool {
        self.start.is_some()
    }

    pub fn start(&self) -> Option<Timestamp> {
        self.start
    }

    pub fn end(&self) -> Option<Timestamp> {
        self.end
    }

    pub fn was_charging(&self) -> bool {
        self.was_charging
    }

    pub fn had_prior_stop(&self) -> bool {
        self.had_prior_stop
    }

    pub fn contiguous(&self) -> bool {
        self.contiguous
    }

    /// Apply one sample; `index` is only used for error reporting
    pub fn step(&mut self, index: usize, sample: &Sample) -> Result<Transition> {
        let transition = Transition::classify(self.started(), CurrentSign::of(sample.current));
        match transition {
            Transition::Onset => {
                self.start = Some(sample.timestamp);
                self.end = Some(sample.timestamp);
                self.was_charging = true;
            }
            Transition::Continue => {
                if sample.current < 0.0 {
                    warn!(
                        index,
                        current = sample.current,
                        "negative current treated as charging"
                    );
                }
                // The restart latch never resets
                if self.had_prior_stop {
                    self.contiguous = false;
                }
                self.end = Some(sample.timestamp);
                self.was_charging = true;
            }
            Transition::Stop => {
                if self.was_charging {
                    self.end = Some(sample.timestamp);
                }
                self.was_charging = false;
                self.had_prior_stop = true;
            }
            Transition::Idle => {}
            Transition::Rejected => {
                return Err(EvschedError::InvalidSample {
                    index,
                    current: sample.current,
                });
            }
        }
        Ok(transition)
    }

    pub fn finish(self, parsed_at: DateTime<Utc>) -> ChargeSummary {
        ChargeSummary {
            start_time: self.start,
            end_time: self.end,
            contiguous: self.contiguous,
            parsed_at,
        }
    }
}

/// Outcome of interpreting one charging log
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSummary {
    /// First positive-current sample, absent if charging never started
    pub start_time: Option<Timestamp>,
    /// Boundary sample of the last run, or the last sample if still charging
    pub end_time: Option<Timestamp>,
    /// At most one run in the whole log
    pub contiguous: bool,
    /// When this summary was generated
    pub parsed_at: DateTime<Utc>,
}

impl ChargeSummary {
    /// The interpreted facts without the generation instant
    pub fn outcome(&self) -> (Option<Timestamp>, Option<Timestamp>, bool) {
        (self.start_time, self.end_time, self.contiguous)
    }

    pub fn charged(&self) -> bool {
        self.start_time.is_some()
    }
}

/// Summarize samples, stamping the result with the current time
pub fn summarize(samples: &[Sample]) -> Result<ChargeSummary> {
    summarize_at(samples, Utc::now())
}

/// Summarize samples with an explicit generation instant
pub fn summarize_at(samples: &[Sample], parsed_at: DateTime<Utc>) -> Result<ChargeSummary> {
    let state = samples
        .iter()
        .enumerate()
        .try_fold(ChargeState::new(), |mut state, (index, sample)| {
            state.step(index, sample)?;
            Ok::<_, EvschedError>(state)
        })?;

    debug!(
        samples = samples.len(),
        start = ?state.start.map(|t| t.to_string()),
        end = ?state.end.map(|t| t.to_string()),
        contiguous = state.contiguous,
        "schedule interpreted"
    );

    Ok(state.finish(parsed_at))
}
