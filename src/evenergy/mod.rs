//! EV.Energy API integration
//!
//! Fetches the per-session charging log and hands its `schedule` to the
//! interpreter. See <https://app.ev.energy/external-api.html>.

pub mod client;
pub mod types;

pub use client::EvEnergyClient;
pub use types::{ChargingLog, SessionId};

use crate::error::Result;
use crate::schedule::{ChargeSummary, Sample, summarize};
use tracing::info;

/// Anything that can produce the ordered samples of a charging session
#[async_trait::async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn fetch_schedule(&self, session: SessionId) -> Result<Vec<Sample>>;
}

/// Fetch a session's schedule and interpret it
pub async fn summarize_session(
    source: &dyn ScheduleSource,
    session: SessionId,
) -> Result<ChargeSummary> {
    let samples = source.fetch_schedule(session).await?;
    let summary = summarize(&samples)?;
    info!(
        session = session.get(),
        samples = samples.len(),
        contiguous = summary.contiguous,
        "charging schedule summarized"
    );
    Ok(summary)
}
