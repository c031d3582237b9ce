use dechurner::scoring::{
    predict, predict_batch, ContractType, CustomerAttributes, PaymentMethod, RiskLevel,
    MAX_RISK_FACTORS,
};
use proptest::prelude::*;

fn payment_method() -> impl Strategy<Value = PaymentMethod> {
    prop::sample::select(PaymentMethod::ALL.to_vec())
}

fn contract_type() -> impl Strategy<Value = ContractType> {
    prop::sample::select(ContractType::ALL.to_vec())
}

prop_compose! {
    fn customer()(
        subscription_age in 0.0f64..120.0,
        monthly_charge in 0.0f64..500.0,
        login_frequency in 0.0f64..60.0,
        content_completion in 0.0f64..100.0,
        failed_payments in 0u32..5,
        payment_method in payment_method(),
        support_tickets in 0u32..10,
        contract_type in contract_type(),
        days_since_last_activity in 0.0f64..90.0,
    ) -> CustomerAttributes {
        CustomerAttributes {
            subscription_age,
            monthly_charge,
            login_frequency,
            content_completion,
            failed_payments: failed_payments as f64,
            payment_method,
            support_tickets: support_tickets as f64,
            contract_type,
            days_since_last_activity,
        }
    }
}

proptest! {
    #[test]
    fn probability_is_strictly_between_zero_and_one(attrs in customer()) {
        let p = predict(&attrs).probability;
        prop_assert!(p > 0.0 && p < 1.0, "probability {} out of range", p);
    }

    #[test]
    fn risk_level_follows_probability(attrs in customer()) {
        let result = predict(&attrs);
        prop_assert_eq!(result.risk_level == RiskLevel::High, result.probability >= 0.5);
    }

    #[test]
    fn factors_are_capped_and_sorted(attrs in customer()) {
        let factors = predict(&attrs).risk_factors;
        prop_assert!(factors.len() <= MAX_RISK_FACTORS);
        for pair in factors.windows(2) {
            prop_assert!(pair[0].impact >= pair[1].impact);
        }
    }

    #[test]
    fn invoice_and_bank_transfer_never_both_listed(attrs in customer()) {
        let factors = predict(&attrs).risk_factors;
        let invoice = factors.iter().any(|f| f.feature == "Invoice Payment");
        let bank = factors.iter().any(|f| f.feature == "Bank Transfer Payment");
        prop_assert!(!(invoice && bank));
    }

    #[test]
    fn prediction_is_deterministic(attrs in customer()) {
        let a = predict(&attrs);
        let b = predict(&attrs);
        prop_assert_eq!(a.probability.to_bits(), b.probability.to_bits());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn more_failed_payments_never_lower_probability(attrs in customer(), extra in 1u32..5) {
        let worse = CustomerAttributes {
            failed_payments: attrs.failed_payments + extra as f64,
            ..attrs
        };
        prop_assert!(predict(&worse).probability >= predict(&attrs).probability);
    }

    #[test]
    fn more_logins_never_raise_probability(attrs in customer(), extra in 0.0f64..30.0) {
        let better = CustomerAttributes {
            login_frequency: attrs.login_frequency + extra,
            ..attrs
        };
        prop_assert!(predict(&better).probability <= predict(&attrs).probability);
    }

    #[test]
    fn longer_tenure_never_raises_probability(attrs in customer(), extra in 0.0f64..60.0) {
        let older = CustomerAttributes {
            subscription_age: attrs.subscription_age + extra,
            ..attrs
        };
        prop_assert!(predict(&older).probability <= predict(&attrs).probability);
    }

    #[test]
    fn batch_is_order_independent(records in prop::collection::vec(customer(), 0..40)) {
        let forward = predict_batch(&records);

        let mut reversed_input = records.clone();
        reversed_input.reverse();
        let mut backward = predict_batch(&reversed_input);
        backward.reverse();

        prop_assert_eq!(&forward, &backward);
        let sequential: Vec<_> = records.iter().map(predict).collect();
        prop_assert_eq!(forward, sequential);
    }
}

#[test]
fn engaged_monthly_customer() {
    let attrs = CustomerAttributes {
        subscription_age: 6.0,
        monthly_charge: 50.0,
        login_frequency: 15.0,
        content_completion: 65.0,
        failed_payments: 0.0,
        payment_method: PaymentMethod::CreditCard,
        support_tickets: 1.0,
        contract_type: ContractType::Monthly,
        days_since_last_activity: 3.0,
    };
    let result = predict(&attrs);

    let expected = 1.0 / (1.0 + 3.58f64.exp());
    assert!((result.probability - expected).abs() < 1e-12);
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(result.risk_factors.len(), 1);
    assert_eq!(result.risk_factors[0].feature, "Monthly Contract");
}

#[test]
fn disengaged_invoice_customer() {
    let attrs = CustomerAttributes {
        subscription_age: 1.0,
        monthly_charge: 149.0,
        login_frequency: 3.0,
        content_completion: 25.0,
        failed_payments: 2.0,
        payment_method: PaymentMethod::Invoice,
        support_tickets: 5.0,
        contract_type: ContractType::Monthly,
        days_since_last_activity: 22.0,
    };
    let result = predict(&attrs);

    assert_eq!(result.risk_level, RiskLevel::High);
    let features: Vec<(&str, f64)> = result
        .risk_factors
        .iter()
        .map(|f| (f.feature, f.impact))
        .collect();
    assert_eq!(
        features,
        vec![
            ("Failed Payments", 120.0),
            ("Low Login Frequency", 85.0),
            ("Invoice Payment", 82.0),
            ("High Inactivity", 75.0),
            ("Low Content Completion", 65.0),
        ]
    );
}

#[test]
fn unknown_labels_score_like_baselines() {
    let baseline = CustomerAttributes {
        login_frequency: 10.0,
        ..Default::default()
    };
    let unknown: CustomerAttributes = serde_json::from_value(serde_json::json!({
        "subscriptionAge": 0, "monthlyCharge": 0, "loginFrequency": 10,
        "contentCompletion": 0, "failedPayments": 0, "paymentMethod": "Wire",
        "supportTickets": 0, "contractType": "Biennial", "daysSinceLastActivity": 0
    }))
    .unwrap();

    assert_eq!(predict(&unknown), predict(&baseline));
}

#[test]
fn even_odds_customer_is_high_risk() {
    // intercept 0.5 and the Annual adjustment -0.5 cancel
    let attrs = CustomerAttributes {
        contract_type: ContractType::Annual,
        ..Default::default()
    };
    let result = predict(&attrs);

    assert_eq!(result.probability, 0.5);
    assert_eq!(result.risk_level, RiskLevel::High);
}
