//! Request and response DTOs for referral endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::ProcessReferralResult;

/// Body of `POST /referrals/process`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReferralRequest {
    pub referrer_id: Option<String>,
    pub user_id: Option<String>,
    pub purchase_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditedReferrer {
    pub id: String,
    pub email: String,
    pub credit_amount: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessReferralResponse {
    pub success: bool,
    pub referrer: CreditedReferrer,
}

impl From<ProcessReferralResult> for ProcessReferralResponse {
    fn from(result: ProcessReferralResult) -> Self {
        Self {
            success: true,
            referrer: CreditedReferrer {
                id: result.referrer.id,
                email: result.referrer.email,
                credit_amount: result.credit.credit_amount,
            },
        }
    }
}
