//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use runtime::RuntimeConfig;

/// Bounds for the pause between packets of one sequence, in milliseconds.
pub const DISPATCH_DELAY_RANGE_MS: (u64, u64) = (5, 1000);

/// Configuration required to bootstrap the runtime and logging.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `EASYDICE_DISPATCH_DELAY_MS` - Pause between packets (default: 500, clamped to 5..=1000)
    /// - `EASYDICE_REPORT_BUFFER` - Object report queue size (default: 5)
    /// - `EASYDICE_VALUE_BUFFER` - Value report queue size (default: 5)
    /// - `EASYDICE_EVENT_BUFFER` - Event bus capacity per topic (default: 64)
    /// - `EASYDICE_POKER_MESSAGES` - Announce hands after a full roll (default: true)
    /// - `EASYDICE_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `EASYDICE_LOG_DIR` - Directory for log files (default: platform-specific)
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading values through `lookup`.
    pub fn from_source(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let runtime = &mut config.runtime;

        if let Some(delay) = parse::<u64>(lookup("EASYDICE_DISPATCH_DELAY_MS")) {
            let (min, max) = DISPATCH_DELAY_RANGE_MS;
            runtime.dispatch_delay = Duration::from_millis(delay.clamp(min, max));
        }

        if let Some(capacity) = parse::<usize>(lookup("EASYDICE_REPORT_BUFFER")) {
            runtime.report_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = parse::<usize>(lookup("EASYDICE_VALUE_BUFFER")) {
            runtime.value_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = parse::<usize>(lookup("EASYDICE_EVENT_BUFFER")) {
            runtime.event_buffer_size = capacity.max(1);
        }

        if let Some(enabled) = parse::<bool>(lookup("EASYDICE_POKER_MESSAGES")) {
            runtime.poker_messages = enabled;
        }

        config.session_id = lookup("EASYDICE_SESSION_ID").filter(|id| !id.trim().is_empty());
        config.log_dir = lookup("EASYDICE_LOG_DIR").map(PathBuf::from);

        config
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config_from(&[]);
        assert_eq!(config.runtime.dispatch_delay, Duration::from_millis(500));
        assert_eq!(config.runtime.report_buffer_size, 5);
        assert!(config.runtime.poker_messages);
        assert!(config.session_id.is_none());
    }

    #[test]
    fn dispatch_delay_is_clamped() {
        let low = config_from(&[("EASYDICE_DISPATCH_DELAY_MS", "1")]);
        assert_eq!(low.runtime.dispatch_delay, Duration::from_millis(5));

        let high = config_from(&[("EASYDICE_DISPATCH_DELAY_MS", "60000")]);
        assert_eq!(high.runtime.dispatch_delay, Duration::from_millis(1000));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("EASYDICE_REPORT_BUFFER", "lots"),
            ("EASYDICE_VALUE_BUFFER", "0"),
            ("EASYDICE_POKER_MESSAGES", "false"),
            ("EASYDICE_SESSION_ID", "  "),
        ]);
        assert_eq!(config.runtime.report_buffer_size, 5);
        assert_eq!(config.runtime.value_buffer_size, 1);
        assert!(!config.runtime.poker_messages);
        assert!(config.session_id.is_none());
    }
}
