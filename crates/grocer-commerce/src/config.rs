//! Storefront configuration.

use std::path::Path;

use crate::cart::{KvCartStorage, DEFAULT_CART_KEY};
use crate::checkout::TimeSlot;
use crate::error::CommerceError;
use crate::money::Currency;
use crate::search::{PriceBounds, ProductFilter};
use grocer_cache::Cache;
use serde::{Deserialize, Serialize};

/// Storefront configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Currency of every price in the store.
    #[serde(default)]
    pub currency: Currency,

    /// Key the cart is persisted under.
    #[serde(default = "default_cart_key")]
    pub cart_storage_key: String,

    /// Price bounds shown when a product list is empty.
    #[serde(default)]
    pub default_price_bounds: PriceBoundsConfig,

    /// Slots offered at checkout.
    #[serde(default = "default_time_slots")]
    pub time_slots: Vec<TimeSlot>,
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

fn default_time_slots() -> Vec<TimeSlot> {
    TimeSlot::ALL.to_vec()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            cart_storage_key: default_cart_key(),
            default_price_bounds: PriceBoundsConfig::default(),
            time_slots: default_time_slots(),
        }
    }
}

/// Price bounds in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBoundsConfig {
    pub min: i64,
    pub max: i64,
}

impl Default for PriceBoundsConfig {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

impl StorefrontConfig {
    /// Load config from a file; `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = if path.extension().map_or(false, |ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| {
                CommerceError::Config(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            Self::parse_toml(&content)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML config.
    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        let config = Self::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse_toml(content: &str) -> Result<Self, CommerceError> {
        toml::from_str(content).map_err(|e| CommerceError::Config(e.to_string()))
    }

    /// Check the values are usable.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.cart_storage_key.trim().is_empty() {
            return Err(CommerceError::Config("cart_storage_key is empty".into()));
        }
        let bounds = self.default_price_bounds;
        if bounds.min < 0 || bounds.min > bounds.max {
            return Err(CommerceError::Config(format!(
                "invalid default_price_bounds {}..{}",
                bounds.min, bounds.max
            )));
        }
        if PriceBounds::try_from_units(bounds.min, bounds.max, self.currency).is_none() {
            return Err(CommerceError::Config(format!(
                "default_price_bounds {}..{} out of range for {}",
                bounds.min, bounds.max, self.currency
            )));
        }
        if self.time_slots.is_empty() {
            return Err(CommerceError::Config("no time_slots offered".into()));
        }
        Ok(())
    }

    /// Default price bounds as money.
    pub fn price_bounds(&self) -> PriceBounds {
        PriceBounds::from_units(
            self.default_price_bounds.min,
            self.default_price_bounds.max,
            self.currency,
        )
    }

    /// An empty product filter using the configured bounds.
    pub fn product_filter(&self) -> ProductFilter {
        ProductFilter::with_default_bounds(self.price_bounds())
    }

    /// Cart storage over `cache` under the configured key.
    pub fn cart_storage(&self, cache: Cache) -> KvCartStorage {
        KvCartStorage::with_key(cache, self.cart_storage_key.clone())
    }
}
