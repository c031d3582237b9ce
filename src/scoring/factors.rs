use serde::Serialize;

use super::types::{ContractType, CustomerAttributes, PaymentMethod};

/// Maximum number of risk factors reported for one customer.
pub const MAX_RISK_FACTORS: usize = 5;

/// Identifier of a catalog entry. The external label is kept verbatim in
/// [`FeatureId::label`] because callers display and export it as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureId {
    LowLoginFrequency,
    HighInactivity,
    FailedPayments,
    LowContentCompletion,
    InvoicePayment,
    BankTransferPayment,
    MonthlyContract,
    HighSupportTickets,
    NewCustomer,
    HighMonthlyCharge,
}

impl FeatureId {
    /// Every catalog entry, in catalog order.
    pub const ALL: [FeatureId; 10] = [
        FeatureId::LowLoginFrequency,
        FeatureId::HighInactivity,
        FeatureId::FailedPayments,
        FeatureId::LowContentCompletion,
        FeatureId::InvoicePayment,
        FeatureId::BankTransferPayment,
        FeatureId::MonthlyContract,
        FeatureId::HighSupportTickets,
        FeatureId::NewCustomer,
        FeatureId::HighMonthlyCharge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FeatureId::LowLoginFrequency => "Low Login Frequency",
            FeatureId::HighInactivity => "High Inactivity",
            FeatureId::FailedPayments => "Failed Payments",
            FeatureId::LowContentCompletion => "Low Content Completion",
            FeatureId::InvoicePayment => "Invoice Payment",
            FeatureId::BankTransferPayment => "Bank Transfer Payment",
            FeatureId::MonthlyContract => "Monthly Contract",
            FeatureId::HighSupportTickets => "High Support Tickets",
            FeatureId::NewCustomer => "New Customer",
            FeatureId::HighMonthlyCharge => "High Monthly Charge",
        }
    }

    /// Reverse lookup for callers holding an exported label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.label() == label)
    }

    /// (impact, odds) for this entry.
    fn magnitudes(&self) -> (f64, f64) {
        match self {
            FeatureId::LowLoginFrequency => (85.0, 1.85),
            FeatureId::HighInactivity => (75.0, 1.75),
            FeatureId::FailedPayments => (120.0, 2.2),
            FeatureId::LowContentCompletion => (65.0, 1.65),
            FeatureId::InvoicePayment => (82.0, 1.82),
            FeatureId::BankTransferPayment => (49.0, 1.49),
            FeatureId::MonthlyContract => (65.0, 1.65),
            FeatureId::HighSupportTickets => (45.0, 1.45),
            FeatureId::NewCustomer => (55.0, 1.55),
            FeatureId::HighMonthlyCharge => (35.0, 1.35),
        }
    }

    pub fn factor(&self) -> RiskFactor {
        let (impact, odds) = self.magnitudes();
        RiskFactor {
            feature: self.label(),
            impact,
            odds,
        }
    }
}

/// A named, rule-triggered explanation with a fixed magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskFactor {
    pub feature: &'static str,
    /// Percentage-like magnitude
    pub impact: f64,
    /// Odds-ratio-like magnitude
    pub odds: f64,
}

/// The full catalog as (id, factor) pairs, in catalog order.
pub fn catalog() -> Vec<(FeatureId, RiskFactor)> {
    FeatureId::ALL.iter().map(|id| (*id, id.factor())).collect()
}

/// Collect the rules that fire for `attrs`, in evaluation order.
///
/// These rules are independent of the model coefficients; a customer can list
/// strong factors while the probability stays low.
pub fn matched_features(attrs: &CustomerAttributes) -> Vec<FeatureId> {
    let mut matched = Vec::new();

    if attrs.login_frequency < 5.0 {
        matched.push(FeatureId::LowLoginFrequency);
    }

    if attrs.days_since_last_activity > 14.0 {
        matched.push(FeatureId::HighInactivity);
    }

    if attrs.failed_payments > 0.0 {
        matched.push(FeatureId::FailedPayments);
    }

    if attrs.content_completion < 30.0 {
        matched.push(FeatureId::LowContentCompletion);
    }

    // Invoice and bank transfer are one if/else-if pair
    if attrs.payment_method == PaymentMethod::Invoice {
        matched.push(FeatureId::InvoicePayment);
    } else if attrs.payment_method == PaymentMethod::BankTransfer {
        matched.push(FeatureId::BankTransferPayment);
    }

    if attrs.contract_type == ContractType::Monthly {
        matched.push(FeatureId::MonthlyContract);
    }

    if attrs.support_tickets > 3.0 {
        matched.push(FeatureId::HighSupportTickets);
    }

    if attrs.subscription_age < 3.0 {
        matched.push(FeatureId::NewCustomer);
    }

    if attrs.monthly_charge > 100.0 {
        matched.push(FeatureId::HighMonthlyCharge);
    }

    matched
}

/// Top risk factors for `attrs`: matched rules sorted by impact descending
/// (stable, so equal impacts keep evaluation order), truncated to
/// [`MAX_RISK_FACTORS`].
pub fn derive_risk_factors(attrs: &CustomerAttributes) -> Vec<RiskFactor> {
    let mut factors: Vec<RiskFactor> = matched_features(attrs)
        .iter()
        .map(FeatureId::factor)
        .collect();

    // sort_by is stable
    factors.sort_by(|a, b| b.impact.total_cmp(&a.impact));
    factors.truncate(MAX_RISK_FACTORS);
    factors
}
