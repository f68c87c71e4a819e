use std::time::Duration;

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Settings shared by every outbound HTTP client: the model endpoint and the
/// search tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "snake_case")]
#[setters(into)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Upper bound on a whole request, body included.
    pub read_timeout_secs: u64,
    pub user_agent: String,
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            read_timeout_secs: 60,
            user_agent: "parley".to_string(),
        }
    }
}
