//! QuotePriceHandler - Query handler computing a display price.
//!
//! Prices through the same [`PurchasePricer`] the checkout handler uses, so
//! the quoted total is the total the provider is asked to charge.

use std::sync::Arc;

use crate::domain::checkout::{Coupon, Price};
use crate::domain::foundation::CheckoutError;
use crate::domain::pricing::{BundleTiers, PriceBreakdown};
use crate::domain::referral::ReferralCredit;
use crate::ports::PaymentProvider;

use super::price_purchase::{AddOnOffer, PurchasePricer, PurchaseSelection};

/// Query to price a prospective purchase.
pub type QuotePriceQuery = PurchaseSelection;

/// Result of a price quote.
#[derive(Debug, Clone)]
pub struct QuotePriceResult {
    pub price: Price,
    pub coupon: Option<Coupon>,
    pub referral_credit: Option<ReferralCredit>,
    pub breakdown: PriceBreakdown,
}

/// Handler combining price, bundle tier, coupon and referral credit.
pub struct QuotePriceHandler {
    pricer: PurchasePricer,
}

impl QuotePriceHandler {
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        tiers: BundleTiers,
        add_on: Option<AddOnOffer>,
    ) -> Self {
        Self {
            pricer: PurchasePricer::new(provider, tiers, add_on),
        }
    }

    pub async fn handle(&self, query: QuotePriceQuery) -> Result<QuotePriceResult, CheckoutError> {
        let priced = self.pricer.price(&query).await?;
        tracing::debug!(
            price_id = %priced.price_id,
            quantity = priced.quantity,
            final_total = priced.breakdown.final_total,
            discount_percent = priced.breakdown.discount_percent,
            "Price quoted"
        );

        Ok(QuotePriceResult {
            price: priced.price,
            coupon: priced.coupon,
            referral_credit: priced.referral_credit,
            breakdown: priced.breakdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::checkout::PriceType;
    use crate::domain::foundation::Currency;
    use rust_decimal_macros::dec;

    fn cad() -> Currency {
        Currency::try_new("cad").unwrap()
    }

    fn setup() -> (MockPaymentProvider, QuotePriceHandler) {
        let mock = MockPaymentProvider::new();
        mock.add_price(Price::try_new("price_ticket", 10_000, cad(), PriceType::OneTime).unwrap());
        mock.add_coupon(Coupon::percent_off("SPRING20", "SPRING20", dec!(20)));
        mock.add_coupon(Coupon::amount_off("USD10", "USD10", 1_000, Currency::try_new("usd").unwrap()));
        let handler = QuotePriceHandler::new(
            Arc::new(mock.clone()),
            BundleTiers::default(),
            Some(AddOnOffer {
                label: "T-shirt".to_string(),
                unit_price: 2_500,
            }),
        );
        (mock, handler)
    }

    fn query(quantity: i64) -> QuotePriceQuery {
        QuotePriceQuery {
            price_id: Some("price_ticket".to_string()),
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn three_tickets_with_coupon() {
        let (_, handler) = setup();
        let result = handler
            .handle(QuotePriceQuery {
                coupon_code: Some("SPRING20".to_string()),
                ..query(3)
            })
            .await
            .unwrap();

        assert_eq!(result.breakdown.gross_total, 30_000);
        assert_eq!(result.breakdown.final_total, 21_600);
        assert_eq!(result.breakdown.discount_percent, 28);
        assert!(result.coupon.is_some());
    }

    #[tokio::test]
    async fn single_ticket_has_no_bundle_discount() {
        let (_, handler) = setup();
        let result = handler.handle(query(1)).await.unwrap();
        assert_eq!(result.breakdown.final_total, 10_000);
        assert_eq!(result.breakdown.discount_percent, 0);
    }

    #[tokio::test]
    async fn referral_credit_is_converted_to_minor_units() {
        let (_, handler) = setup();
        let result = handler
            .handle(QuotePriceQuery {
                referral_category: Some("event".to_string()),
                ..query(1)
            })
            .await
            .unwrap();
        // 100.00 CAD credit off a 100.00 CAD ticket
        assert_eq!(result.breakdown.final_total, 0);
    }

    #[tokio::test]
    async fn add_on_is_priced() {
        let (_, handler) = setup();
        let result = handler
            .handle(QuotePriceQuery {
                add_on_quantity: Some(2),
                ..query(1)
            })
            .await
            .unwrap();
        assert_eq!(result.breakdown.gross_total, 15_000);
    }

    #[tokio::test]
    async fn mismatched_currency_coupon_is_not_applied() {
        let (_, handler) = setup();
        let result = handler
            .handle(QuotePriceQuery {
                coupon_code: Some("USD10".to_string()),
                ..query(1)
            })
            .await
            .unwrap();
        assert!(!result.breakdown.coupon_applied);
        assert_eq!(result.breakdown.final_total, 10_000);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn zero_quantity_is_rejected_before_provider() {
        let (mock, handler) = setup();
        let err = handler.handle(query(0)).await.unwrap_err();
        assert_eq!(err, CheckoutError::invalid_input("Invalid quantity"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_coupon_fails_quote() {
        let (_, handler) = setup();
        let err = handler
            .handle(QuotePriceQuery {
                coupon_code: Some("DOESNOTEXIST".to_string()),
                ..query(1)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::NotFound(_)));
    }

    #[tokio::test]
    async fn add_on_without_offer_is_rejected() {
        let mock = MockPaymentProvider::new();
        let handler = QuotePriceHandler::new(Arc::new(mock), BundleTiers::none(), None);
        let err = handler
            .handle(QuotePriceQuery {
                add_on_quantity: Some(1),
                ..query(1)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidInput(_)));
    }
}
