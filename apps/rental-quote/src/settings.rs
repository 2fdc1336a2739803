//! # Pricing Settings
//!
//! Loads the shared [`PricingConfig`] for the CLI.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     RENTAL_VAT_RATE=23          (percent)                              │
//! │     RENTAL_ROUNDING=round_once                                         │
//! │     RENTAL_SERVICE_RATE=150     RENTAL_TRAVEL_RATE=1.15                │
//! │     RENTAL_HOURS_PER_DAY=8                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else the platform config dir:                     │
//! │     ~/.config/rental-quote/pricing.toml (Linux)                        │
//! │     ~/Library/Application Support/com.rental.quote/pricing.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     150 / 1.15 / 1 technician / 1 trip, 23% VAT, per-field rounding    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! rounding = "per_field"   # per_field | round_once
//! vat_rate_bps = 2300
//!
//! [logistics]
//! service_rate_per_technician = "150"
//! travel_rate_per_km = "1.15"
//! technician_count = 1
//! number_of_trips = 1
//!
//! [consumables]
//! hours_per_day = "8"
//!
//! [fallback]
//! price_per_day = "100.00"
//! discount_percent = "0"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use rental_core::config::RoundingMode;
use rental_core::PricingConfig;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

pub const ENV_VAT_RATE: &str = "RENTAL_VAT_RATE";
pub const ENV_ROUNDING: &str = "RENTAL_ROUNDING";
pub const ENV_SERVICE_RATE: &str = "RENTAL_SERVICE_RATE";
pub const ENV_TRAVEL_RATE: &str = "RENTAL_TRAVEL_RATE";
pub const ENV_HOURS_PER_DAY: &str = "RENTAL_HOURS_PER_DAY";

/// Loads configuration from file and process environment, then validates.
pub fn load(config_path: Option<PathBuf>) -> CliResult<PricingConfig> {
    load_with(config_path, |key| std::env::var(key).ok())
}

/// [`load`] with an injectable environment lookup.
pub fn load_with<F>(config_path: Option<PathBuf>, env: F) -> CliResult<PricingConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = PricingConfig::default();

    if let Some(path) = config_path.or_else(default_config_path) {
        if path.exists() {
            info!(?path, "Loading pricing config from file");
            config = read_config_file(&path)?;
        } else {
            debug!(?path, "Config file not found, using defaults");
        }
    }

    apply_env_overrides(&mut config, env);
    config.validate()?;

    Ok(config)
}

fn read_config_file(path: &Path) -> CliResult<PricingConfig> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&contents).map_err(|source| CliError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Overrides config fields from environment variables. Unparseable values
/// are logged and ignored.
pub fn apply_env_overrides<F>(config: &mut PricingConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    // VAT is given in percent, stored in basis points
    if let Some(raw) = env(ENV_VAT_RATE) {
        match parse_decimal(&raw).and_then(percent_to_bps) {
            Some(bps) => {
                debug!(vat_rate_bps = bps, "Overriding VAT rate from environment");
                config.vat_rate_bps = bps;
            }
            None => warn!(value = %raw, "Invalid {} in environment", ENV_VAT_RATE),
        }
    }

    if let Some(raw) = env(ENV_ROUNDING) {
        match RoundingMode::from_str(&raw) {
            Ok(mode) => {
                debug!(rounding = %mode, "Overriding rounding mode from environment");
                config.rounding = mode;
            }
            Err(e) => warn!(value = %raw, "{}", e),
        }
    }

    if let Some(raw) = env(ENV_SERVICE_RATE) {
        match parse_decimal(&raw) {
            Some(rate) => config.logistics.service_rate_per_technician = rate,
            None => warn!(value = %raw, "Invalid {} in environment", ENV_SERVICE_RATE),
        }
    }

    if let Some(raw) = env(ENV_TRAVEL_RATE) {
        match parse_decimal(&raw) {
            Some(rate) => config.logistics.travel_rate_per_km = rate,
            None => warn!(value = %raw, "Invalid {} in environment", ENV_TRAVEL_RATE),
        }
    }

    if let Some(raw) = env(ENV_HOURS_PER_DAY) {
        match parse_decimal(&raw) {
            Some(hours) => config.consumables.hours_per_day = hours,
            None => warn!(value = %raw, "Invalid {} in environment", ENV_HOURS_PER_DAY),
        }
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}

fn percent_to_bps(percent: Decimal) -> Option<u32> {
    let bps = percent * Decimal::ONE_HUNDRED;
    if bps.is_sign_negative() || !bps.fract().is_zero() {
        return None;
    }
    bps.to_u32()
}

/// Returns the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "rental", "quote")
        .map(|dirs| dirs.config_dir().join("pricing.toml"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rental_core::Money;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let missing = PathBuf::from("/nonexistent/pricing.toml");
        let config = load_with(Some(missing), env_from(&[])).unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_file_values_are_loaded() {
        let file = write_config(
            r#"
rounding = "round_once"
vat_rate_bps = 800

[logistics]
travel_rate_per_km = "2.00"

[fallback]
price_per_day = "250.00"
"#,
        );

        let config = load_with(Some(file.path().to_path_buf()), env_from(&[])).unwrap();
        assert_eq!(config.rounding, RoundingMode::RoundOnce);
        assert_eq!(config.vat_rate_bps, 800);
        assert_eq!(config.logistics.travel_rate_per_km, dec!(2.00));
        // untouched fields keep their defaults
        assert_eq!(config.logistics.service_rate_per_technician, dec!(150));
        assert_eq!(config.fallback.price_per_day, Money::from_units(250));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config("vat_rate_bps = 800\n");
        let env = env_from(&[
            (ENV_VAT_RATE, "5.5"),
            (ENV_ROUNDING, "round-once"),
            (ENV_SERVICE_RATE, "175"),
            (ENV_TRAVEL_RATE, "1.30"),
            (ENV_HOURS_PER_DAY, "10"),
        ]);

        let config = load_with(Some(file.path().to_path_buf()), env).unwrap();
        assert_eq!(config.vat_rate_bps, 550);
        assert_eq!(config.rounding, RoundingMode::RoundOnce);
        assert_eq!(config.logistics.service_rate_per_technician, dec!(175));
        assert_eq!(config.logistics.travel_rate_per_km, dec!(1.30));
        assert_eq!(config.consumables.hours_per_day, dec!(10));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let env = env_from(&[
            (ENV_VAT_RATE, "abc"),
            (ENV_ROUNDING, "sometimes"),
            (ENV_TRAVEL_RATE, ""),
        ]);
        let mut config = PricingConfig::default();

        apply_env_overrides(&mut config, env);
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let file = write_config("vat_rate_bps = \"lots\"\n");
        let result = load_with(Some(file.path().to_path_buf()), env_from(&[]));
        assert!(matches!(result, Err(CliError::Toml { .. })));

        let file = write_config("vat_rate_bps = 20000\n");
        let result = load_with(Some(file.path().to_path_buf()), env_from(&[]));
        assert!(matches!(result, Err(CliError::Core(_))));
    }

    #[test]
    fn test_percent_to_bps() {
        assert_eq!(percent_to_bps(dec!(23)), Some(2300));
        assert_eq!(percent_to_bps(dec!(5.5)), Some(550));
        assert_eq!(percent_to_bps(dec!(-1)), None);
        assert_eq!(percent_to_bps(dec!(0.001)), None);
    }
}
