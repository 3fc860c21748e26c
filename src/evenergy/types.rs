use crate::error::{EvschedError, Result};
use crate::schedule::Sample;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// EV.Energy charging session identifier (always > 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(id: u64) -> Result<Self> {
        if id == 0 {
            return Err(EvschedError::validation(
                "session_id",
                "Session Id must be greater than 0",
            ));
        }
        Ok(Self(id))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for SessionId {
    type Err = EvschedError;

    fn from_str(s: &str) -> Result<Self> {
        let not_numeric =
            || EvschedError::validation("session_id", format!("Session Id is not numeric ({})", s));
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_numeric());
        }
        let id: u64 = s.parse().map_err(|_| not_numeric())?;
        Self::new(id).map_err(|_| not_numeric())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of `GET /api/v1/charging-sessions/{id}/logs/`; other fields are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChargingLog {
    pub schedule: Option<Vec<Sample>>,
}

impl ChargingLog {
    pub fn into_schedule(self) -> Result<Vec<Sample>> {
        self.schedule.ok_or(EvschedError::MissingSchedule)
    }
}
