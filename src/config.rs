use std::time::Duration;

const DEFAULT_DATA_ROOT: &str = ".";
const DEFAULT_TICK_MS: u64 = 250;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory or `http(s)://` base URL holding `data/` and `images/`.
    pub data_root: String,
    pub tick: Duration,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: DEFAULT_DATA_ROOT.to_string(),
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Loads `.env.local` and `.env` (if present) and reads the process env.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_root = lookup("STATS_DATA_ROOT")
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_ROOT.to_string());
        let tick_ms = lookup("STATS_TICK_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TICK_MS)
            .clamp(50, 2000);
        let timeout_secs = lookup("STATS_HTTP_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
            .max(1);
        Self {
            data_root,
            tick: Duration::from_millis(tick_ms),
            http_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup_from(&[]));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn reads_and_clamps_values() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("STATS_DATA_ROOT", " https://stats.example.org/site "),
            ("STATS_TICK_MS", "5"),
            ("STATS_HTTP_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(cfg.data_root, "https://stats.example.org/site");
        assert_eq!(cfg.tick, Duration::from_millis(50));
        assert_eq!(cfg.http_timeout, Duration::from_secs(1));
    }

    #[test]
    fn ignores_garbage() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("STATS_DATA_ROOT", "   "),
            ("STATS_TICK_MS", "fast"),
        ]));
        assert_eq!(cfg.data_root, ".");
        assert_eq!(cfg.tick, Duration::from_millis(DEFAULT_TICK_MS));
    }
}
