//! Storefront configuration.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! storefront's standard pricing and timings.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::checkout::PaymentMethod;
use crate::error::CommerceError;
use crate::money::Money;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub shipping: ShippingConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub nursery: NurseryConfig,

    #[serde(default)]
    pub support: SupportConfig,
}

impl StoreConfig {
    /// Load config from a TOML file, or JSON when the path ends in `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_toml(&content)
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, CommerceError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, CommerceError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Shipping fee policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingConfig {
    /// Subtotals strictly above this ship free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: Money,

    /// Fee charged at or below the threshold.
    #[serde(default = "default_flat_fee")]
    pub flat_fee: Money,
}

fn default_free_shipping_threshold() -> Money {
    Money::rupees(1000)
}

fn default_flat_fee() -> Money {
    Money::rupees(99)
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: default_free_shipping_threshold(),
            flat_fee: default_flat_fee(),
        }
    }
}

/// Checkout behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Delay between order confirmation and clearing the cart.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Payment method preselected when a session starts.
    #[serde(default = "default_payment_method")]
    pub default_payment_method: Option<PaymentMethod>,

    /// Refuse to leave the cart step while the cart is empty.
    #[serde(default = "default_true")]
    pub require_non_empty_cart: bool,
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_payment_method() -> Option<PaymentMethod> {
    Some(PaymentMethod::Card)
}

fn default_true() -> bool {
    true
}

impl CheckoutConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            default_payment_method: default_payment_method(),
            require_non_empty_cart: true,
        }
    }
}

/// Mock plant scan timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_analysis_delay_ms")]
    pub analysis_delay_ms: u64,
}

fn default_analysis_delay_ms() -> u64 {
    3000
}

impl ScanConfig {
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: default_analysis_delay_ms(),
        }
    }
}

/// Nursery partner registration timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NurseryConfig {
    #[serde(default = "default_review_delay_ms")]
    pub review_delay_ms: u64,
}

fn default_review_delay_ms() -> u64 {
    1000
}

impl NurseryConfig {
    pub fn review_delay(&self) -> Duration {
        Duration::from_millis(self.review_delay_ms)
    }
}

impl Default for NurseryConfig {
    fn default() -> Self {
        Self {
            review_delay_ms: default_review_delay_ms(),
        }
    }
}

/// Support chat timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportConfig {
    /// Delay before the canned support reply arrives.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

fn default_reply_delay_ms() -> u64 {
    1000
}

impl SupportConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = StoreConfig::from_toml("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.shipping.free_shipping_threshold, Money::rupees(1000));
        assert_eq!(config.shipping.flat_fee, Money::rupees(99));
        assert_eq!(config.checkout.settle_delay(), Duration::from_secs(2));
        assert_eq!(config.scan.analysis_delay(), Duration::from_secs(3));
        let method = config.checkout.default_payment_method;
        assert_eq!(method, Some(PaymentMethod::Card));
        assert!(config.checkout.require_non_empty_cart);
        assert_eq!(config.support.reply_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_override() {
        let config = StoreConfig::from_toml(
            r#"
            [shipping]
            flat_fee = 49

            [checkout]
            settle_delay_ms = 10
            default_payment_method = "upi"
            "#,
        )
        .unwrap();

        assert_eq!(config.shipping.flat_fee, Money::rupees(49));
        assert_eq!(config.shipping.free_shipping_threshold, Money::rupees(1000));
        assert_eq!(config.checkout.settle_delay_ms, 10);
        let method = config.checkout.default_payment_method;
        assert_eq!(method, Some(PaymentMethod::Upi));
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let text = StoreConfig::default().to_toml().unwrap();
        let parsed = StoreConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, StoreConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = StoreConfig::from_toml("shipping = 5").unwrap_err();
        assert!(matches!(err, CommerceError::ConfigError(_)));
    }
}
