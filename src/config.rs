//! # config
//!
//! Desk settings read from the environment (after `.env` is loaded).
//!
//! | Variable                       | Default | Meaning                        |
//! |--------------------------------|---------|--------------------------------|
//! | `DESK_MARK_INTERVAL_MS`        | 4800    | mark drift period              |
//! | `DESK_INDICATOR_INTERVAL_MS`   | 6200    | indicator drift period         |
//! | `DESK_SENTIMENT_INTERVAL_MS`   | 8800    | sentiment drift period         |
//! | `DESK_LIQUIDATION_INTERVAL_MS` | 15000   | synthetic liquidation period   |
//! | `DESK_SIMULATION`              | true    | `false`/`0`/`no`/`off` freezes |
//! | `DESK_RNG_SEED`                | unset   | fixed seed for the drift noise |
//! | `DESK_QUEUE_DEPTH`             | 256     | store action queue bound       |
//!
//! Unparseable values are logged and fall back to the default.  A zero
//! interval is rejected.

use std::time::Duration;

use anyhow::bail;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct DeskConfig {
    pub mark_interval: Duration,
    pub indicator_interval: Duration,
    pub sentiment_interval: Duration,
    pub liquidation_interval: Duration,
    pub simulation: bool,
    pub rng_seed: Option<u64>,
    pub queue_depth: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            mark_interval: Duration::from_millis(4_800),
            indicator_interval: Duration::from_millis(6_200),
            sentiment_interval: Duration::from_millis(8_800),
            liquidation_interval: Duration::from_millis(15_000),
            simulation: true,
            rng_seed: None,
            queue_depth: 256,
        }
    }
}

impl DeskConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let millis = |key: &str, default: Duration| {
            let ms = parsed(&lookup, key).unwrap_or(default.as_millis() as u64);
            Duration::from_millis(ms)
        };

        let config = Self {
            mark_interval: millis("DESK_MARK_INTERVAL_MS", defaults.mark_interval),
            indicator_interval: millis("DESK_INDICATOR_INTERVAL_MS", defaults.indicator_interval),
            sentiment_interval: millis("DESK_SENTIMENT_INTERVAL_MS", defaults.sentiment_interval),
            liquidation_interval: millis(
                "DESK_LIQUIDATION_INTERVAL_MS",
                defaults.liquidation_interval,
            ),
            simulation: read(&lookup, "DESK_SIMULATION", parse_flag).unwrap_or(defaults.simulation),
            rng_seed: parsed(&lookup, "DESK_RNG_SEED"),
            queue_depth: parsed(&lookup, "DESK_QUEUE_DEPTH").unwrap_or(defaults.queue_depth),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let intervals = [
            ("DESK_MARK_INTERVAL_MS", self.mark_interval),
            ("DESK_INDICATOR_INTERVAL_MS", self.indicator_interval),
            ("DESK_SENTIMENT_INTERVAL_MS", self.sentiment_interval),
            ("DESK_LIQUIDATION_INTERVAL_MS", self.liquidation_interval),
        ];
        for (key, interval) in intervals {
            if interval.is_zero() {
                bail!("{key} must be greater than zero");
            }
        }
        if self.queue_depth == 0 {
            bail!("DESK_QUEUE_DEPTH must be greater than zero");
        }
        Ok(())
    }
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    read(lookup, key, |v| v.parse().ok())
}

/// Reads `key` through `parse`; a set but unparseable value is logged and
/// treated as unset.
fn read<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(key)?;
    let value = parse(raw.trim());
    if value.is_none() {
        warn!(key, value = %raw, "Unparseable setting, using default");
    }
    value
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn make_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DeskConfig::from_lookup(make_lookup(&[])).expect("valid");
        assert_eq!(config, DeskConfig::default());
        assert_eq!(config.mark_interval, Duration::from_millis(4_800));
    }

    #[test]
    fn test_overrides_and_fallbacks() {
        let config = DeskConfig::from_lookup(make_lookup(&[
            ("DESK_MARK_INTERVAL_MS", "250"),
            ("DESK_SENTIMENT_INTERVAL_MS", "soon"),
            ("DESK_SIMULATION", "false"),
            ("DESK_RNG_SEED", "42"),
        ]))
        .expect("valid");

        assert_eq!(config.mark_interval, Duration::from_millis(250));
        assert_eq!(config.sentiment_interval, Duration::from_millis(8_800));
        assert!(!config.simulation);
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_simulation_flag_spellings() {
        for (raw, expected) in [
            ("0", false),
            ("no", false),
            ("OFF", false),
            (" False ", false),
            ("1", true),
            ("yes", true),
            ("maybe", true),
        ] {
            let config = DeskConfig::from_lookup(make_lookup(&[("DESK_SIMULATION", raw)]))
                .expect("valid");
            assert_eq!(config.simulation, expected, "DESK_SIMULATION={raw:?}");
        }
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = DeskConfig::from_lookup(make_lookup(&[("DESK_LIQUIDATION_INTERVAL_MS", "0")]))
            .expect_err("zero interval");
        assert!(err.to_string().contains("DESK_LIQUIDATION_INTERVAL_MS"));
    }

    #[test]
    fn test_zero_queue_rejected() {
        assert!(DeskConfig::from_lookup(make_lookup(&[("DESK_QUEUE_DEPTH", "0")])).is_err());
    }
}
