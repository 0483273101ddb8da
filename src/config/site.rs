//! Public site configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Public site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the public site. Checkout redirects and feedback links
    /// are built under it.
    pub base_url: String,

    /// Label of the merchandise add-on offered with tickets
    pub add_on_label: Option<String>,

    /// Add-on unit price in minor units of the ticket currency
    pub add_on_price: Option<i64>,
}

impl SiteConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// The configured add-on, if both label and price are set
    pub fn add_on(&self) -> Option<(&str, i64)> {
        match (&self.add_on_label, self.add_on_price) {
            (Some(label), Some(price)) => Some((label.as_str(), price)),
            _ => None,
        }
    }

    /// Validate site configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ValidationError::MissingRequired("SITE__BASE_URL"));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if production && !base.starts_with("https://") {
            return Err(ValidationError::MustBeHttps("Site base URL"));
        }
        match (&self.add_on_label, self.add_on_price) {
            (Some(_), Some(price)) if price < 0 => Err(ValidationError::IncompleteAddOn),
            (Some(_), None) | (None, Some(_)) => Err(ValidationError::IncompleteAddOn),
            _ => Ok(()),
        }
    }
}
