//! Final price computation.
//!
//! Discounts are applied as an explicit ordered pipeline. The order is fixed
//! and determines the displayed "percent saved":
//!
//! 1. gross = unit price × quantity (+ add-on quantity × add-on unit price)
//! 2. bundle/quantity-tier percentage
//! 3. coupon (percent-off, or amount-off in the price currency)
//! 4. referral credit, floored at zero
//!
//! All amounts are minor units. Every step result is rounded half-up to a
//! whole minor unit so the displayed total matches what the provider charges.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::format_amount;
use crate::domain::checkout::{Coupon, CouponDiscount};
use crate::domain::foundation::Currency;

/// A merchandise add-on charged at its own unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOn {
    pub label: String,
    pub unit_price: i64,
    pub quantity: u32,
}

/// Request-scoped inputs to the calculator. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountContext {
    pub currency: Currency,
    pub item_label: String,
    pub unit_price: i64,
    pub quantity: u32,
    pub add_on: Option<AddOn>,
    pub bundle_discount_percent: Decimal,
    pub coupon: Option<Coupon>,
    /// Referral credit in minor units.
    pub referral_credit: Option<i64>,
}

impl DiscountContext {
    pub fn new(currency: Currency, unit_price: i64, quantity: u32) -> Self {
        Self {
            currency,
            item_label: "Ticket".to_string(),
            unit_price,
            quantity,
            add_on: None,
            bundle_discount_percent: Decimal::ZERO,
            coupon: None,
            referral_credit: None,
        }
    }

    pub fn with_item_label(mut self, label: impl Into<String>) -> Self {
        self.item_label = label.into();
        self
    }

    pub fn with_add_on(mut self, add_on: AddOn) -> Self {
        self.add_on = Some(add_on);
        self
    }

    pub fn with_bundle_discount(mut self, percent: Decimal) -> Self {
        self.bundle_discount_percent = percent;
        self
    }

    pub fn with_coupon(mut self, coupon: Coupon) -> Self {
        self.coupon = Some(coupon);
        self
    }

    pub fn with_referral_credit(mut self, minor_units: i64) -> Self {
        self.referral_credit = Some(minor_units);
        self
    }

    /// The discount steps for this context, in application order.
    pub fn discount_steps(&self) -> Vec<DiscountStep> {
        let mut steps = Vec::with_capacity(3);
        if self.bundle_discount_percent > Decimal::ZERO {
            steps.push(DiscountStep::Bundle {
                percent: self.bundle_discount_percent,
            });
        }
        if let Some(coupon) = &self.coupon {
            steps.push(DiscountStep::Coupon(coupon.clone()));
        }
        if let Some(credit) = self.referral_credit.filter(|c| *c > 0) {
            steps.push(DiscountStep::ReferralCredit { amount: credit });
        }
        steps
    }
}

/// One stage of the discount pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountStep {
    Bundle { percent: Decimal },
    Coupon(Coupon),
    ReferralCredit { amount: i64 },
}

impl DiscountStep {
    /// Applies the step to a running total. Returns `None` if the step does not apply.
    fn apply(&self, running: Decimal, currency: &Currency) -> Option<Decimal> {
        match self {
            DiscountStep::Bundle { percent } => Some(take_percent(running, *percent)),
            DiscountStep::Coupon(coupon) => {
                if !coupon.applies_to(currency) {
                    return None;
                }
                match coupon.discount()? {
                    CouponDiscount::PercentOff(p) => Some(take_percent(running, p)),
                    CouponDiscount::AmountOff { amount, .. } => {
                        Some(take_amount(running, Decimal::from(amount)))
                    }
                }
            }
            DiscountStep::ReferralCredit { amount } => {
                Some(take_amount(running, Decimal::from(*amount)))
            }
        }
    }

    fn line_item(&self, amount: i64) -> LineItem {
        let (kind, label) = match self {
            DiscountStep::Bundle { percent } => (
                LineItemKind::BundleDiscount,
                format!("Bundle discount ({}%)", percent.normalize()),
            ),
            DiscountStep::Coupon(coupon) => (
                LineItemKind::Coupon,
                format!("Coupon {} ({})", coupon.code, coupon.describe()),
            ),
            DiscountStep::ReferralCredit { .. } => {
                (LineItemKind::ReferralCredit, "Referral credit".to_string())
            }
        };
        LineItem {
            label,
            kind,
            amount,
        }
    }
}

/// Category of a breakdown line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Item,
    AddOn,
    BundleDiscount,
    Coupon,
    ReferralCredit,
}

/// A breakdown line. Discounts carry negative amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub label: String,
    pub kind: LineItemKind,
    pub amount: i64,
}

/// Result of a price calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub currency: Currency,
    pub gross_total: i64,
    pub final_total: i64,
    pub total_savings: i64,
    pub discount_percent: u32,
    pub coupon_applied: bool,
    pub line_items: Vec<LineItem>,
}

impl PriceBreakdown {
    pub fn formatted_total(&self) -> String {
        format_amount(self.final_total, &self.currency)
    }

    pub fn formatted_savings(&self) -> String {
        format_amount(self.total_savings, &self.currency)
    }
}

/// Computes final totals from a [`DiscountContext`].
pub struct PriceCalculator;

impl PriceCalculator {
    pub fn calculate(ctx: &DiscountContext) -> PriceBreakdown {
        let mut line_items = Vec::new();

        let items_total = Decimal::from(ctx.unit_price.max(0)) * Decimal::from(ctx.quantity);
        line_items.push(LineItem {
            label: format!("{} × {}", ctx.quantity, ctx.item_label),
            kind: LineItemKind::Item,
            amount: to_minor(items_total),
        });

        let mut gross = items_total;
        if let Some(add_on) = ctx.add_on.as_ref().filter(|a| a.quantity > 0) {
            let add_on_total =
                Decimal::from(add_on.unit_price.max(0)) * Decimal::from(add_on.quantity);
            line_items.push(LineItem {
                label: format!("{} × {}", add_on.quantity, add_on.label),
                kind: LineItemKind::AddOn,
                amount: to_minor(add_on_total),
            });
            gross += add_on_total;
        }

        let mut running = gross;
        let mut coupon_applied = false;
        for step in ctx.discount_steps() {
            let Some(next) = step.apply(running, &ctx.currency) else {
                tracing::debug!(step = ?step, "Discount step not applicable, skipped");
                continue;
            };
            if matches!(step, DiscountStep::Coupon(_)) {
                coupon_applied = true;
            }
            line_items.push(step.line_item(to_minor(next - running)));
            running = next;
        }

        let gross_total = to_minor(gross);
        let final_total = to_minor(running);
        let total_savings = gross_total - final_total;
        let discount_percent = if gross_total > 0 {
            round_half_up(Decimal::from(total_savings) * Decimal::ONE_HUNDRED / gross)
                .to_u32()
                .unwrap_or(0)
        } else {
            0
        };

        PriceBreakdown {
            currency: ctx.currency.clone(),
            gross_total,
            final_total,
            total_savings,
            discount_percent,
            coupon_applied,
            line_items,
        }
    }
}

/// Applies a coupon to a single amount. Returns `amount` unchanged when the
/// coupon is invalid or its currency does not match.
pub fn apply_coupon(amount: i64, coupon: &Coupon, currency: &Currency) -> i64 {
    DiscountStep::Coupon(coupon.clone())
        .apply(Decimal::from(amount), currency)
        .map(to_minor)
        .unwrap_or(amount)
}

fn take_percent(amount: Decimal, percent: Decimal) -> Decimal {
    let percent = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    round_half_up(amount * (Decimal::ONE_HUNDRED - percent) / Decimal::ONE_HUNDRED)
}

fn take_amount(amount: Decimal, off: Decimal) -> Decimal {
    (amount - off.max(Decimal::ZERO)).max(Decimal::ZERO)
}

fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a whole-unit decimal to `i64`, saturating on overflow.
fn to_minor(value: Decimal) -> i64 {
    let rounded = round_half_up(value);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
