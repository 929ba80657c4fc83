use std::env;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_ACTION_DELAY_MS: u64 = 500;

/// Server-level settings, resolved from the environment.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Throttle between successive tool calls in one plan execution.
    pub action_delay: Duration,
}

impl ServerSettings {
    pub fn from_env() -> Self {
        let host = env::var("TOOLBRIDGE_HOST")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = env::var("TOOLBRIDGE_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let action_delay = env::var("TOOLBRIDGE_ACTION_DELAY_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_ACTION_DELAY_MS));

        Self {
            host,
            port,
            action_delay,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            action_delay: Duration::from_millis(DEFAULT_ACTION_DELAY_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_addr() {
        let settings = ServerSettings::default();
        assert_eq!(settings.bind_addr(), "0.0.0.0:4000");
    }

    #[test]
    fn default_action_delay_is_half_a_second() {
        let settings = ServerSettings::default();
        assert_eq!(settings.action_delay, Duration::from_millis(500));
    }
}
