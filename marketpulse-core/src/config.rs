//! Market configuration — exchange hours and holiday calendars.
//!
//! Defaults embed the NSE/BSE 2024 calendars. An override file in TOML can
//! replace the whole table:
//!
//! ```toml
//! [exchanges.NSE]
//! open = "09:15"
//! close = "15:30"
//! timezone = "Asia/Kolkata"
//! holidays = ["2024-01-26", "2024-03-08"]
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};

/// Timezone label shared by both supported exchanges (IST, no DST).
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// NSE/BSE trading holidays, 2024 calendar. Both exchanges observe the
/// same list: Republic Day, Holi, Good Friday, Ram Navami, Mahavir
/// Jayanti, Labour Day, Independence Day, Gandhi Jayanti, both Diwali
/// days, Guru Nanak Jayanti, Christmas.
const HOLIDAYS_2024: [(i32, u32, u32); 12] = [
    (2024, 1, 26),
    (2024, 3, 8),
    (2024, 3, 29),
    (2024, 4, 11),
    (2024, 4, 17),
    (2024, 5, 1),
    (2024, 8, 15),
    (2024, 10, 2),
    (2024, 10, 31),
    (2024, 11, 1),
    (2024, 11, 15),
    (2024, 12, 25),
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse market config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid time {0:?} (expected HH:MM)")]
    InvalidTime(String),

    #[error("invalid date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Trading hours and holiday calendar for one exchange.
#[derive(Debug, Clone)]
pub struct ExchangeSpec {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub timezone: String,
    pub holidays: BTreeSet<NaiveDate>,
}

impl ExchangeSpec {
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

/// Read-only table of configured exchanges, fixed at process start.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    exchanges: HashMap<String, ExchangeSpec>,
}

impl MarketConfig {
    pub fn exchange(&self, id: &str) -> Option<&ExchangeSpec> {
        self.exchanges.get(id)
    }

    pub fn exchange_ids(&self) -> impl Iterator<Item = &str> {
        self.exchanges.keys().map(String::as_str)
    }

    /// Parse an override table from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawMarketConfig = toml::from_str(text)?;
        let mut exchanges = HashMap::new();
        for (id, spec) in raw.exchanges {
            exchanges.insert(id, spec.validate()?);
        }
        Ok(Self { exchanges })
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        let mut exchanges = HashMap::new();
        for id in ["NSE", "BSE"] {
            exchanges.insert(id.to_string(), default_indian_exchange());
        }
        Self { exchanges }
    }
}

fn default_indian_exchange() -> ExchangeSpec {
    ExchangeSpec {
        open: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
        close: NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
        timezone: DEFAULT_TIMEZONE.to_string(),
        holidays: HOLIDAYS_2024
            .iter()
            .map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
            .collect(),
    }
}

#[derive(Debug, Deserialize)]
struct RawMarketConfig {
    exchanges: HashMap<String, RawExchangeSpec>,
}

#[derive(Debug, Deserialize)]
struct RawExchangeSpec {
    open: String,
    close: String,
    #[serde(default = "default_timezone")]
    timezone: String,
    #[serde(default)]
    holidays: Vec<String>,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl RawExchangeSpec {
    fn validate(self) -> Result<ExchangeSpec, ConfigError> {
        let open = parse_clock_time(&self.open)?;
        let close = parse_clock_time(&self.close)?;
        let holidays = self
            .holidays
            .iter()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| ConfigError::InvalidDate(raw.clone()))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(ExchangeSpec {
            open,
            close,
            timezone: self.timezone,
            holidays,
        })
    }
}

fn parse_clock_time(raw: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| ConfigError::InvalidTime(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_both_exchanges() {
        let config = MarketConfig::default();
        for id in ["NSE", "BSE"] {
            let spec = config.exchange(id).unwrap();
            assert_eq!(spec.open, NaiveTime::from_hms_opt(9, 15, 0).unwrap());
            assert_eq!(spec.close, NaiveTime::from_hms_opt(15, 30, 0).unwrap());
            assert_eq!(spec.timezone, "Asia/Kolkata");
            assert_eq!(spec.holidays.len(), 12);
        }
        assert!(config.exchange("NYSE").is_none());
    }

    #[test]
    fn default_calendar_contains_republic_day() {
        let config = MarketConfig::default();
        let spec = config.exchange("NSE").unwrap();
        assert!(spec.is_holiday(NaiveDate::from_ymd_opt(2024, 1, 26).unwrap()));
        assert!(!spec.is_holiday(NaiveDate::from_ymd_opt(2024, 1, 29).unwrap()));
    }

    #[test]
    fn toml_override_parses() {
        let text = r#"
            [exchanges.NSE]
            open = "09:00"
            close = "17:00"
            holidays = ["2025-01-26"]
        "#;
        let config = MarketConfig::from_toml_str(text).unwrap();
        let spec = config.exchange("NSE").unwrap();
        assert_eq!(spec.open, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(spec.close, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(spec.timezone, "Asia/Kolkata");
        assert!(spec.is_holiday(NaiveDate::from_ymd_opt(2025, 1, 26).unwrap()));
        assert!(config.exchange("BSE").is_none());
    }

    #[test]
    fn toml_override_rejects_bad_time() {
        let text = r#"
            [exchanges.NSE]
            open = "9 am"
            close = "15:30"
        "#;
        let err = MarketConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTime(_)));
    }

    #[test]
    fn toml_override_rejects_bad_date() {
        let text = r#"
            [exchanges.NSE]
            open = "09:15"
            close = "15:30"
            holidays = ["26-01-2024"]
        "#;
        let err = MarketConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate(_)));
    }
}
