use super::types::{ContractType, CustomerAttributes, PaymentMethod};

/// Logistic regression coefficients.
///
/// Monthly contracts and credit card payment are the baselines and carry no
/// adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub intercept: f64,
    pub subscription_age: f64,
    pub monthly_charge: f64,
    pub login_frequency: f64,
    pub content_completion: f64,
    pub failed_payments: f64,
    pub support_tickets: f64,
    pub days_since_last_activity: f64,
    pub payment_paypal: f64,
    pub payment_bank_transfer: f64,
    pub payment_invoice: f64,
    pub contract_annual: f64,
    pub contract_quarterly: f64,
}

pub const MODEL: Coefficients = Coefficients {
    intercept: 0.5,
    subscription_age: -0.08,
    monthly_charge: 0.005,
    login_frequency: -0.15,
    content_completion: -0.03,
    failed_payments: 0.8,
    support_tickets: 0.2,
    days_since_last_activity: 0.05,
    payment_paypal: 0.2,
    payment_bank_transfer: 0.4,
    payment_invoice: 0.6,
    contract_annual: -0.5,
    contract_quarterly: -0.2,
};

impl Coefficients {
    pub fn payment_adjustment(&self, method: PaymentMethod) -> f64 {
        match method {
            PaymentMethod::CreditCard => 0.0,
            PaymentMethod::PayPal => self.payment_paypal,
            PaymentMethod::BankTransfer => self.payment_bank_transfer,
            PaymentMethod::Invoice => self.payment_invoice,
        }
    }

    pub fn contract_adjustment(&self, contract: ContractType) -> f64 {
        match contract {
            ContractType::Monthly => 0.0,
            ContractType::Annual => self.contract_annual,
            ContractType::Quarterly => self.contract_quarterly,
        }
    }

    /// Linear score before the logistic link.
    ///
    /// Terms are accumulated onto the intercept one at a time in a fixed
    /// order; changing the order changes the low bits of the result.
    pub fn logit(&self, attrs: &CustomerAttributes) -> f64 {
        let mut logit = self.intercept;

        logit += self.subscription_age * attrs.subscription_age;
        logit += self.monthly_charge * attrs.monthly_charge;
        logit += self.login_frequency * attrs.login_frequency;
        logit += self.content_completion * attrs.content_completion;
        logit += self.failed_payments * attrs.failed_payments;
        logit += self.support_tickets * attrs.support_tickets;
        logit += self.days_since_last_activity * attrs.days_since_last_activity;

        // Baselines add zero, which leaves the sum bit-identical
        if attrs.payment_method != PaymentMethod::CreditCard {
            logit += self.payment_adjustment(attrs.payment_method);
        }
        if attrs.contract_type != ContractType::Monthly {
            logit += self.contract_adjustment(attrs.contract_type);
        }

        logit
    }
}

/// Standard logistic function.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
