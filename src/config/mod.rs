use config::{ConfigError, Environment};
use serde::Deserialize;
use std::env;
use validator::{Validate, ValidationError};

use crate::models::Money;

// Top-level configuration, one section per concern
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    pub app: AppConfig,
    #[validate(nested)]
    pub pricing: PricingConfig,
    #[validate(nested)]
    pub holds: HoldConfig,
    #[validate(nested)]
    pub reference: ReferenceConfig,
    #[validate(nested)]
    pub inventory: InventoryConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    /// `pretty` or `json`.
    pub log_format: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PricingConfig {
    #[validate(custom(function = "non_negative"))]
    pub base_price: Money,
    #[validate(custom(function = "non_negative"))]
    pub booking_fee: Money,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HoldConfig {
    #[validate(range(min = 1))]
    pub ttl_seconds: u64,
    #[validate(range(min = 1))]
    pub sweep_interval_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReferenceConfig {
    #[validate(custom(function = "distinct_symbols"))]
    pub alphabet: String,
    #[validate(range(min = 1, max = 64))]
    pub length: usize,
    #[validate(range(min = 1))]
    pub max_attempts: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InventoryConfig {
    #[validate(range(min = 0.0, max = 1.0))]
    pub booked_probability: f64,
    /// Fixed seed for seat maps, schedules and references; random when unset.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub days_ahead: u32,
    /// Comma separated languages listed first in the movie listing.
    pub featured_languages: String,
}

impl HoldConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_seconds as i64)
    }

    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_seconds)
    }
}

impl CatalogConfig {
    pub fn featured_languages(&self) -> Vec<String> {
        self.featured_languages
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Config {
    /// Built-in defaults only, no environment lookup.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize::<Self>()?.checked()
    }

    /// Defaults, overridden by `CINEMA_<SECTION>__<KEY>` variables and the
    /// plain `HOST`, `PORT`, `ENVIRONMENT`, `RUST_LOG` and `LOG_FORMAT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(
                Environment::with_prefix("CINEMA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("app.host", env::var("HOST").ok())?
            .set_override_option("app.port", env::var("PORT").ok())?
            .set_override_option("app.environment", env::var("ENVIRONMENT").ok())?
            .set_override_option("app.rust_log", env::var("RUST_LOG").ok())?
            .set_override_option("app.log_format", env::var("LOG_FORMAT").ok())?
            .build()?
            .try_deserialize::<Self>()?
            .checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Message(format!("invalid configuration: {}", e)))?;
        Ok(self)
    }

    fn builder() -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 8000_i64)?
            .set_default("app.environment", "development")?
            .set_default("app.rust_log", "cinema_booking=debug,tower_http=debug")?
            .set_default("app.log_format", "pretty")?
            .set_default("pricing.base_price", "12.99")?
            .set_default("pricing.booking_fee", "2.00")?
            .set_default("holds.ttl_seconds", 600_i64)?
            .set_default("holds.sweep_interval_seconds", 30_i64)?
            .set_default("reference.alphabet", crate::services::reference::DEFAULT_ALPHABET)?
            .set_default("reference.length", 8_i64)?
            .set_default("reference.max_attempts", 32_i64)?
            .set_default("inventory.booked_probability", 0.2_f64)?
            .set_default("catalog.days_ahead", 7_i64)?
            .set_default("catalog.featured_languages", "Hindi,Tamil,Telugu,Malayalam")
    }
}

fn non_negative(amount: &Money) -> Result<(), ValidationError> {
    if amount.is_negative() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

// At least two distinct characters, or every reference would be the same code.
fn distinct_symbols(alphabet: &str) -> Result<(), ValidationError> {
    let mut symbols: Vec<char> = alphabet.chars().collect();
    symbols.sort_unstable();
    symbols.dedup();
    if symbols.len() < 2 {
        return Err(ValidationError::new("alphabet_too_small"));
    }
    Ok(())
}
