//! Coercion policy for raw customer fields.
//!
//! Every boundary that builds a [`CustomerAttributes`] from untyped input goes
//! through these functions, so defaults never vary between callers:
//! missing, empty, unparseable or non-finite numbers become `0`, and missing
//! or unrecognised categories become their baseline.

use crate::scoring::{ContractType, CustomerAttributes, PaymentMethod};

/// Outcome of coercing one numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    /// Parsed as given
    Parsed(f64),
    /// Field absent or blank; defaulted silently
    Missing,
    /// Field present but not a finite number; defaulted
    Invalid,
}

impl Coerced {
    pub fn value(&self) -> f64 {
        match self {
            Coerced::Parsed(v) => *v,
            Coerced::Missing | Coerced::Invalid => 0.0,
        }
    }
}

/// Numeric attribute fields, by their camelCase record names.
pub const NUMERIC_FIELDS: [&str; 7] = [
    "subscriptionAge",
    "monthlyCharge",
    "loginFrequency",
    "contentCompletion",
    "failedPayments",
    "supportTickets",
    "daysSinceLastActivity",
];

/// Categorical attribute fields, by their camelCase record names.
pub const CATEGORY_FIELDS: [&str; 2] = ["paymentMethod", "contractType"];

/// Parse one numeric field.
///
/// The whole trimmed text must be a finite number: trailing garbage such as
/// `"12abc"` is `Invalid`, not a prefix parse to `12`.
pub fn coerce_number(raw: Option<&str>) -> Coerced {
    match raw.map(str::trim) {
        None | Some("") => Coerced::Missing,
        Some(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Coerced::Parsed(v),
            _ => Coerced::Invalid,
        },
    }
}

pub fn coerce_payment_method(raw: Option<&str>) -> PaymentMethod {
    raw.map(str::trim)
        .map(PaymentMethod::from_label)
        .unwrap_or_default()
}

pub fn coerce_contract_type(raw: Option<&str>) -> ContractType {
    raw.map(str::trim)
        .map(ContractType::from_label)
        .unwrap_or_default()
}

/// Build a full attribute set from raw named fields.
///
/// `field` looks up a raw value by its camelCase name. Returns the attributes
/// and the names of fields that were present but not a finite number.
pub fn coerce_attributes<'a, F>(field: F) -> (CustomerAttributes, Vec<&'static str>)
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut invalid = Vec::new();
    let mut number = |name: &'static str| {
        let coerced = coerce_number(field(name));
        if coerced == Coerced::Invalid {
            invalid.push(name);
        }
        coerced.value()
    };

    let subscription_age = number("subscriptionAge");
    let monthly_charge = number("monthlyCharge");
    let login_frequency = number("loginFrequency");
    let content_completion = number("contentCompletion");
    let failed_payments = number("failedPayments");
    let support_tickets = number("supportTickets");
    let days_since_last_activity = number("daysSinceLastActivity");

    let text = |name: &str| field(name).filter(|v| !v.trim().is_empty());
    let attributes = CustomerAttributes {
        subscription_age,
        monthly_charge,
        login_frequency,
        content_completion,
        failed_payments,
        payment_method: coerce_payment_method(text("paymentMethod")),
        support_tickets,
        contract_type: coerce_contract_type(text("contractType")),
        days_since_last_activity,
    };
    (attributes, invalid)
}

/// Pull attributes into their natural domain: counts and amounts
/// non-negative, content completion within 0-100.
pub fn clamp(attrs: &CustomerAttributes) -> CustomerAttributes {
    CustomerAttributes {
        subscription_age: attrs.subscription_age.max(0.0),
        monthly_charge: attrs.monthly_charge.max(0.0),
        login_frequency: attrs.login_frequency.max(0.0),
        content_completion: attrs.content_completion.clamp(0.0, 100.0),
        failed_payments: attrs.failed_payments.max(0.0),
        payment_method: attrs.payment_method,
        support_tickets: attrs.support_tickets.max(0.0),
        contract_type: attrs.contract_type,
        days_since_last_activity: attrs.days_since_last_activity.max(0.0),
    }
}
