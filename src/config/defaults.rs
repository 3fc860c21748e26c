use super::*;

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app.ev.energy".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "WARN".to_string(),
            console_level: None,
            file_level: None,
            file: "evsched.log".to_string(),
            rotation: "never".to_string(),
            backup_count: 5,
            console_output: false,
            json_format: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            timezone: "local".to_string(),
            parsed_format: "%H:%M:%S %d%b".to_string(),
            pretty: true,
        }
    }
}
