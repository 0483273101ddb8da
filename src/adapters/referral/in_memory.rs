//! In-memory referral ledger.
//!
//! Referrers are seeded at startup; credits accumulate for the lifetime of
//! the process. Orders are not persisted by this service.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::CheckoutError;
use crate::ports::{CreditEntry, ReferralLedger, Referrer};

#[derive(Debug, Default)]
struct LedgerState {
    referrers: HashMap<String, Referrer>,
    credits: Vec<CreditEntry>,
}

/// Referral ledger held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferralLedger {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryReferralLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_referrers(referrers: impl IntoIterator<Item = Referrer>) -> Self {
        let ledger = Self::new();
        for referrer in referrers {
            ledger.add_referrer(referrer);
        }
        ledger
    }

    /// Seed referrers from a YAML file of the form `referrers: [{id, email}]`.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, CheckoutError> {
        #[derive(Deserialize)]
        struct ReferrerFile {
            #[serde(default)]
            referrers: Vec<Referrer>,
        }

        let path = path.as_ref();
        let yaml = tokio::fs::read_to_string(path).await.map_err(|e| {
            CheckoutError::internal(format!(
                "Failed to read referrer file {}: {}",
                path.display(),
                e
            ))
        })?;
        let file: ReferrerFile = serde_yaml::from_str(&yaml).map_err(|e| {
            CheckoutError::internal(format!(
                "Failed to parse referrer file {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(count = file.referrers.len(), "Referrers loaded");
        Ok(Self::with_referrers(file.referrers))
    }

    pub fn add_referrer(&self, referrer: Referrer) {
        let mut state = self.state.write().unwrap_or_else(|p| p.into_inner());
        state.referrers.insert(referrer.id.clone(), referrer);
    }

    /// All credits recorded for `referrer_id`, oldest first.
    pub fn credits_for(&self, referrer_id: &str) -> Vec<CreditEntry> {
        let state = self.state.read().unwrap_or_else(|p| p.into_inner());
        state
            .credits
            .iter()
            .filter(|c| c.referrer_id == referrer_id)
            .cloned()
            .collect()
    }

    /// Sum of credits for `referrer_id`, in major units.
    pub fn balance(&self, referrer_id: &str) -> i64 {
        self.credits_for(referrer_id).iter().map(|c| c.amount).sum()
    }
}

#[async_trait]
impl ReferralLedger for InMemoryReferralLedger {
    async fn find_referrer(&self, referrer_id: &str) -> Result<Option<Referrer>, CheckoutError> {
        let state = self.state.read().unwrap_or_else(|p| p.into_inner());
        Ok(state.referrers.get(referrer_id).cloned())
    }

    async fn record_credit(&self, entry: CreditEntry) -> Result<(), CheckoutError> {
        let mut state = self.state.write().unwrap_or_else(|p| p.into_inner());
        if !state.referrers.contains_key(&entry.referrer_id) {
            return Err(CheckoutError::not_found(format!(
                "Referrer {} not found",
                entry.referrer_id
            )));
        }
        state.credits.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::referral::PurchaseCategory;
    use chrono::Utc;

    fn referrer() -> Referrer {
        Referrer {
            id: "usr-ref".to_string(),
            email: "ref@example.com".to_string(),
        }
    }

    fn credit(amount: i64) -> CreditEntry {
        CreditEntry {
            referrer_id: "usr-ref".to_string(),
            referred_user_id: "usr-new".to_string(),
            purchase_category: PurchaseCategory::Workshop,
            amount,
            recorded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn credits_accumulate() {
        let ledger = InMemoryReferralLedger::with_referrers([referrer()]);
        ledger.record_credit(credit(200)).await.unwrap();
        ledger.record_credit(credit(50)).await.unwrap();
        assert_eq!(ledger.balance("usr-ref"), 250);
    }

    #[tokio::test]
    async fn loads_referrers_from_yaml() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"referrers:\n  - id: usr-ref\n    email: ref@example.com\n")
            .unwrap();

        let ledger = InMemoryReferralLedger::load(file.path()).await.unwrap();
        assert_eq!(ledger.find_referrer("usr-ref").await.unwrap(), Some(referrer()));
    }

    #[tokio::test]
    async fn unknown_referrer_cannot_be_credited() {
        let ledger = InMemoryReferralLedger::new();
        assert!(matches!(
            ledger.record_credit(credit(200)).await,
            Err(CheckoutError::NotFound(_))
        ));
    }
}
