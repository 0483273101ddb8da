//! GetPriceHandler - Query handler for provider price lookups.

use std::sync::Arc;

use crate::application::handlers::input::provider_id;
use crate::domain::checkout::Price;
use crate::domain::foundation::CheckoutError;
use crate::ports::PaymentProvider;

/// Query to get a price by provider ID.
#[derive(Debug, Clone)]
pub struct GetPriceQuery {
    pub price_id: Option<String>,
}

/// Result of a successful price lookup.
pub type GetPriceResult = Price;

/// Handler for retrieving prices verbatim from the provider.
pub struct GetPriceHandler {
    provider: Arc<dyn PaymentProvider>,
}

impl GetPriceHandler {
    pub fn new(provider: Arc<dyn PaymentProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, query: GetPriceQuery) -> Result<GetPriceResult, CheckoutError> {
        let price_id = provider_id(query.price_id.as_deref(), "priceId")?;

        self.provider.retrieve_price(&price_id).await.map_err(|e| {
            tracing::error!(price_id = %price_id, error = %e, "Price lookup failed");
            e.into()
        })
    }
}
