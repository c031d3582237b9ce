use serde::{Deserialize, Serialize};

use super::factors::RiskFactor;

/// How a customer pays. Any label other than the four known ones is read as
/// the baseline, `CreditCard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    PayPal,
    BankTransfer,
    Invoice,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::PayPal,
        PaymentMethod::BankTransfer,
        PaymentMethod::Invoice,
    ];

    /// Map an external label to a variant. Matching is exact; unknown labels
    /// fall back to the baseline.
    pub fn from_label(label: &str) -> Self {
        match label {
            "PayPal" => PaymentMethod::PayPal,
            "Bank transfer" => PaymentMethod::BankTransfer,
            "Invoice" => PaymentMethod::Invoice,
            _ => PaymentMethod::CreditCard,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::BankTransfer => "Bank transfer",
            PaymentMethod::Invoice => "Invoice",
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(s: String) -> Self {
        PaymentMethod::from_label(&s)
    }
}

impl From<PaymentMethod> for String {
    fn from(m: PaymentMethod) -> Self {
        m.label().to_string()
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Billing contract. Unknown labels are read as the baseline, `Monthly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractType {
    #[default]
    Monthly,
    Annual,
    Quarterly,
}

impl ContractType {
    pub const ALL: [ContractType; 3] = [
        ContractType::Monthly,
        ContractType::Annual,
        ContractType::Quarterly,
    ];

    pub fn from_label(label: &str) -> Self {
        match label {
            "Annual" => ContractType::Annual,
            "Quarterly" => ContractType::Quarterly,
            _ => ContractType::Monthly,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContractType::Monthly => "Monthly",
            ContractType::Annual => "Annual",
            ContractType::Quarterly => "Quarterly",
        }
    }
}

impl From<String> for ContractType {
    fn from(s: String) -> Self {
        ContractType::from_label(&s)
    }
}

impl From<ContractType> for String {
    fn from(c: ContractType) -> Self {
        c.label().to_string()
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Usage and billing attributes of one customer.
///
/// Counts are held as `f64` so values coming out of the CSV boundary pass
/// through unchanged. Nothing here is validated; out-of-range values are
/// scored as given.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAttributes {
    /// Months as a customer
    pub subscription_age: f64,
    /// Subscription price in currency units
    pub monthly_charge: f64,
    /// Logins in the last 30 days
    pub login_frequency: f64,
    /// Percentage of content consumed, 0-100
    pub content_completion: f64,
    /// Failed payment attempts
    pub failed_payments: f64,
    pub payment_method: PaymentMethod,
    /// Support tickets in the last 90 days
    pub support_tickets: f64,
    pub contract_type: ContractType,
    pub days_since_last_activity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    /// High at or above one half; the boundary itself is High.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.5 {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Low => "Low",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Churn probability as a fraction in (0, 1), not a percentage
    pub probability: f64,
    pub risk_level: RiskLevel,
    /// At most five factors, highest impact first
    pub risk_factors: Vec<RiskFactor>,
}
