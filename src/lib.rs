//! # Evsched - EV.Energy charging schedule interpreter
//!
//! Fetches the per-session charging log from the EV.Energy external API and
//! reports when charging starts, when it ends and whether it is delivered as
//! one uninterrupted block. The output is a small JSON document meant for a
//! Home Assistant `command_line` sensor.
//!
//! ## Architecture
//!
//! - `schedule`: the interpreter, a single fold over ordered current samples
//! - `evenergy`: API client and the `ScheduleSource` seam
//! - `cli`: positional argument parsing
//! - `report`: JSON output record
//! - `config`: YAML configuration with environment overrides
//! - `logging`: file and stderr logging via `tracing`
//! - `error`: error type shared by every module

pub mod cli;
pub mod config;
pub mod error;
pub mod evenergy;
pub mod logging;
pub mod report;
pub mod schedule;

// Re-export commonly used types
pub use config::Config;
pub use error::{EvschedError, Result};
pub use schedule::{ChargeSummary, Sample, Timestamp, summarize};

/// Version string baked in at build time
pub const VERSION: &str = env!("APP_VERSION");
