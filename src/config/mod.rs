use chrono::{FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::models::{Cents, ScoreDimension};
use crate::ranking::RankingSettings;

const DEFAULT_NOTIFY_CHANNEL: &str = "sales_changes";
const DEFAULT_PLACEHOLDER_AVATAR: &str = "/placeholder.svg";
const MIN_REFRESH_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub run_migrations: bool,

    // Change notifications
    pub notify_channel: String,
    pub refresh_debounce: Duration,
    /// Background refresh cadence; `None` disables the periodic cycle.
    pub refresh_interval: Option<Duration>,

    // Display
    pub page_size: usize,
    pub page_rotation: Duration,
    pub placeholder_avatar: String,

    // Scoring
    pub rank_dimension: ScoreDimension,
    pub podium_dimension: ScoreDimension,
    pub goal_target: Cents,
    pub year_total_offset: Cents,
    pub utc_offset: FixedOffset,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let utc_offset_minutes: i32 = parse_or("UTC_OFFSET_MINUTES", 0);
        let utc_offset = FixedOffset::east_opt(utc_offset_minutes * 60).unwrap_or_else(|| {
            tracing::warn!(utc_offset_minutes, "UTC_OFFSET_MINUTES out of range, using UTC");
            utc()
        });

        Ok(Self {
            database_url,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or("PORT", 8080),
            run_migrations: flag_or("RUN_MIGRATIONS", false),

            notify_channel: env::var("NOTIFY_CHANNEL")
                .unwrap_or_else(|_| DEFAULT_NOTIFY_CHANNEL.into()),
            refresh_debounce: Duration::from_millis(parse_or("REFRESH_DEBOUNCE_MS", 1_200)),
            refresh_interval: refresh_interval(parse_or("REFRESH_INTERVAL_SECS", 0)),

            page_size: parse_or::<usize>("PAGE_SIZE", 14).max(1),
            page_rotation: Duration::from_secs(parse_or::<u64>("PAGE_ROTATION_SECS", 10).max(1)),
            placeholder_avatar: env::var("PLACEHOLDER_AVATAR")
                .unwrap_or_else(|_| DEFAULT_PLACEHOLDER_AVATAR.into()),

            rank_dimension: dimension_or("RANK_DIMENSION", ScoreDimension::Month),
            podium_dimension: dimension_or("PODIUM_DIMENSION", ScoreDimension::Week),
            goal_target: money_or("GOAL_TARGET", Decimal::from(40_000)),
            year_total_offset: money_or("YEAR_TOTAL_OFFSET", Decimal::ZERO),
            utc_offset,
        })
    }

    pub fn ranking_settings(&self) -> RankingSettings {
        RankingSettings {
            rank_dimension: self.rank_dimension,
            podium_dimension: self.podium_dimension,
            goal_target: self.goal_target,
            placeholder_avatar: self.placeholder_avatar.clone(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            host: "127.0.0.1".into(),
            port: 8080,
            run_migrations: false,
            notify_channel: DEFAULT_NOTIFY_CHANNEL.into(),
            refresh_debounce: Duration::from_millis(1_200),
            refresh_interval: None,
            page_size: 14,
            page_rotation: Duration::from_secs(10),
            placeholder_avatar: DEFAULT_PLACEHOLDER_AVATAR.into(),
            rank_dimension: ScoreDimension::Month,
            podium_dimension: ScoreDimension::Week,
            goal_target: Cents(4_000_000),
            year_total_offset: Cents::ZERO,
            utc_offset: utc(),
        }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Read and parse `key`, falling back to `default` when unset or invalid.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid config value, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Accepts true/false, 1/0, yes/no and on/off in any case.
fn flag_or(key: &str, default: bool) -> bool {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = %raw, "Invalid config flag, using default");
            default
        }
    }
}

fn dimension_or(key: &str, default: ScoreDimension) -> ScoreDimension {
    env::var(key)
        .ok()
        .and_then(|raw| ScoreDimension::from_config_str(&raw))
        .unwrap_or(default)
}

fn money_or(key: &str, default: Decimal) -> Cents {
    let amount = parse_or(key, default);
    Cents::from_decimal(amount)
        .or_else(|| Cents::from_decimal(default))
        .unwrap_or(Cents::ZERO)
}

/// 0 disables the periodic refresh; anything else is clamped to the minimum.
fn refresh_interval(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs.max(MIN_REFRESH_INTERVAL_SECS)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_interval_disabled_and_clamped() {
        assert_eq!(refresh_interval(0), None);
        assert_eq!(refresh_interval(1), Some(Duration::from_secs(5)));
        assert_eq!(refresh_interval(60), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.page_size, 14);
        assert_eq!(config.refresh_debounce, Duration::from_millis(1_200));
        assert_eq!(config.goal_target, Cents(4_000_000));
        let settings = config.ranking_settings();
        assert_eq!(settings.rank_dimension, ScoreDimension::Month);
        assert_eq!(settings.podium_dimension, ScoreDimension::Week);
    }

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        env::set_var("SALESBOARD_TEST_PAGE_SIZE", "many");
        assert_eq!(parse_or::<usize>("SALESBOARD_TEST_PAGE_SIZE", 14), 14);
        env::set_var("SALESBOARD_TEST_PAGE_SIZE", " 20 ");
        assert_eq!(parse_or::<usize>("SALESBOARD_TEST_PAGE_SIZE", 14), 20);
        env::remove_var("SALESBOARD_TEST_PAGE_SIZE");
    }

    #[test]
    fn test_flag_or_accepts_common_spellings() {
        let key = "SALESBOARD_TEST_MIGRATE";
        for raw in ["1", "yes", "TRUE", " on "] {
            env::set_var(key, raw);
            assert!(flag_or(key, false), "{raw:?} should enable");
        }
        for raw in ["0", "No", "off", "false"] {
            env::set_var(key, raw);
            assert!(!flag_or(key, true), "{raw:?} should disable");
        }
        env::set_var(key, "sometimes");
        assert!(flag_or(key, true));
        env::remove_var(key);
        assert!(!flag_or(key, false));
    }

    #[test]
    fn test_money_or_falls_back_on_overflow() {
        let key = "SALESBOARD_TEST_GOAL";
        env::set_var(key, "79228162514264337593543950335");
        assert_eq!(money_or(key, Decimal::from(40_000)), Cents(4_000_000));
        env::set_var(key, "1250.505");
        assert_eq!(money_or(key, Decimal::from(40_000)), Cents(125_051));
        env::remove_var(key);
    }
}
