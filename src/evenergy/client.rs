use crate::config::ApiConfig;
use crate::error::{EvschedError, Result};
use crate::evenergy::ScheduleSource;
use crate::evenergy::types::{ChargingLog, SessionId};
use crate::logging::get_logger;
use crate::schedule::Sample;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::time::Duration;

const USER_AGENT: &str = concat!("evsched/", env!("APP_VERSION"));

/// EV.Energy external API client; one request per call, no retries
pub struct EvEnergyClient {
    access_token: String,
    base_url: String,
    http: reqwest::Client,
    logger: crate::logging::StructuredLogger,
}

impl EvEnergyClient {
    /// Create new client; the timeout is only set when configured
    pub fn new(access_token: impl Into<String>, config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            access_token: access_token.into().trim().to_string(),
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            http: builder.build()?,
            logger: get_logger("evenergy"),
        })
    }

    /// Charging log endpoint for a session
    pub fn logs_url(&self, session: SessionId) -> String {
        format!(
            "{}/api/v1/charging-sessions/{}/logs/",
            self.base_url, session
        )
    }

    /// Fetch and decode the charging log of a session
    pub async fn fetch_log(&self, session: SessionId) -> Result<ChargingLog> {
        if self.access_token.is_empty() {
            return Err(EvschedError::auth("No EV.Energy token provided"));
        }

        let logger = self.logger.for_session(session.get());
        let url = self.logs_url(session);
        logger.debug(&format!(
            "GET {} (token: {} chars)",
            url,
            self.access_token.len()
        ));

        let resp = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| EvschedError::network(format!("Getting URL failed: {}", e)))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let reason = status.canonical_reason().unwrap_or("unknown");
            logger.error(&format!("EV.Energy API error: {}", status));
            let message = if status.is_success() {
                format!("REST returned a bad status ({})", reason)
            } else {
                format!("HTTP error occurred ({})", reason)
            };
            return Err(EvschedError::http(status.as_u16(), message));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| EvschedError::network(format!("Reading response failed: {}", e)))?;
        let log: ChargingLog = serde_json::from_str(&body).map_err(|e| {
            logger.error(&format!("Error converting json: {}", e));
            EvschedError::serialization(format!("Error converting json: {}", e))
        })?;

        logger.debug(&format!(
            "Received {} schedule entries",
            log.schedule.as_ref().map_or(0, Vec::len)
        ));
        Ok(log)
    }
}

#[async_trait::async_trait]
impl ScheduleSource for EvEnergyClient {
    async fn fetch_schedule(&self, session: SessionId) -> Result<Vec<Sample>> {
        self.fetch_log(session).await?.into_schedule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_url_tolerates_trailing_slash() {
        let cfg = ApiConfig {
            base_url: "https://app.ev.energy/".to_string(),
            timeout_secs: Some(5),
        };
        let client = EvEnergyClient::new("token", &cfg).unwrap();
        let session = SessionId::new(1234).unwrap();
        assert_eq!(
            client.logs_url(session),
            "https://app.ev.energy/api/v1/charging-sessions/1234/logs/"
        );
    }

    #[tokio::test]
    async fn test_empty_token_fails_before_request() {
        let client = EvEnergyClient::new("   ", &ApiConfig::default()).unwrap();
        let err = client
            .fetch_log(SessionId::new(1).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, EvschedError::Auth { .. }));
    }
}
