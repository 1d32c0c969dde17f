//! Shipping details collected during checkout.

use crate::error::ValidationErrors;
use serde::{Deserialize, Serialize};

/// Delivery contact and address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Street address; may span several lines.
    pub address: String,
    pub city: String,
    /// State or region.
    pub region: String,
    /// PIN code.
    pub postal_code: String,
    /// Optional nearby landmark for the courier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
}

impl ShippingInfo {
    /// Check every required field, returning field-level errors.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("full_name", &self.full_name);
        errors.require("email", &self.email);
        if !self.email.trim().is_empty() && !is_valid_email(self.email.trim()) {
            errors.add("email", "is not a valid email address");
        }
        errors.require("phone", &self.phone);
        errors.require("address", &self.address);
        errors.require("city", &self.city);
        errors.require("region", &self.region);
        errors.require("postal_code", &self.postal_code);
        errors.into_result()
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Address line shown on the confirmation screen.
    pub fn delivery_line(&self) -> String {
        format!("{}, {}", self.address.trim(), self.city.trim())
    }
}

/// Simple `local@domain.tld` syntax check.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
