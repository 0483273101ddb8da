//! ProcessReferralHandler - Command handler granting referral credit.

use std::sync::Arc;

use chrono::Utc;

use crate::application::handlers::input::optional;
use crate::domain::foundation::CheckoutError;
use crate::domain::referral::{ReferralCredit, ReferralCreditResolver};
use crate::ports::{CreditEntry, ReferralLedger, Referrer};

/// Command to credit a referrer for a referred purchase.
#[derive(Debug, Clone, Default)]
pub struct ProcessReferralCommand {
    pub referrer_id: Option<String>,
    pub user_id: Option<String>,
    pub purchase_type: Option<String>,
}

/// Result of a processed referral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReferralResult {
    pub referrer: Referrer,
    pub credit: ReferralCredit,
}

/// Handler for referral credits.
pub struct ProcessReferralHandler {
    ledger: Arc<dyn ReferralLedger>,
}

impl ProcessReferralHandler {
    pub fn new(ledger: Arc<dyn ReferralLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, cmd: ProcessReferralCommand) -> Result<ProcessReferralResult, CheckoutError> {
        let referrer_id = optional(cmd.referrer_id.as_deref());
        let user_id = optional(cmd.user_id.as_deref());
        let purchase_type = optional(cmd.purchase_type.as_deref());

        let (referrer_id, user_id, purchase_type) = match (referrer_id, user_id, purchase_type) {
            (Some(r), Some(u), Some(p)) => (r, u, p),
            _ => {
                let missing: Vec<&str> = [
                    ("referrerId", referrer_id.is_none()),
                    ("userId", user_id.is_none()),
                    ("purchaseType", purchase_type.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                return Err(CheckoutError::invalid_input(format!(
                    "Missing required fields: {}",
                    missing.join(", ")
                )));
            }
        };

        if referrer_id == user_id {
            return Err(CheckoutError::invalid_input("Users cannot refer themselves"));
        }

        let referrer = self
            .ledger
            .find_referrer(referrer_id)
            .await?
            .ok_or_else(|| CheckoutError::not_found("Referrer not found"))?;

        let credit = ReferralCreditResolver::credit_for(purchase_type);
        self.ledger
            .record_credit(CreditEntry {
                referrer_id: referrer.id.clone(),
                referred_user_id: user_id.to_string(),
                purchase_category: credit.purchase_category,
                amount: credit.credit_amount,
                recorded_at: Utc::now(),
            })
            .await?;

        tracing::info!(
            referrer_id = %referrer.id,
            referred_user_id = %user_id,
            category = %credit.purchase_category,
            credit_amount = credit.credit_amount,
            "Referral credit recorded"
        );

        Ok(ProcessReferralResult { referrer, credit })
    }
}
