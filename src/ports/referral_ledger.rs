//! Referral ledger port.
//!
//! The ledger owns referrer accounts and the credits granted to them. This
//! core only looks referrers up and records new credits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::CheckoutError;
use crate::domain::referral::PurchaseCategory;

/// A user who can earn referral credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referrer {
    pub id: String,
    pub email: String,
}

/// A credit granted to a referrer for one referred purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditEntry {
    pub referrer_id: String,
    pub referred_user_id: String,
    pub purchase_category: PurchaseCategory,
    /// Major currency units.
    pub amount: i64,
    pub recorded_at: DateTime<Utc>,
}

/// Port for the referral ledger.
#[async_trait]
pub trait ReferralLedger: Send + Sync {
    /// Find a referrer by ID. Returns `Ok(None)` when unknown.
    async fn find_referrer(&self, referrer_id: &str) -> Result<Option<Referrer>, CheckoutError>;

    /// Record a credit for a referrer.
    async fn record_credit(&self, entry: CreditEntry) -> Result<(), CheckoutError>;
}
