use log::debug;
use rayon::prelude::*;

use super::factors::derive_risk_factors;
use super::model::{sigmoid, MODEL};
use super::types::{CustomerAttributes, PredictionResult, RiskLevel};

/// Score one customer.
///
/// Total over its input: no validation, no side effects, no failure. The
/// probability comes from the logistic model; the risk factors come from a
/// separate rule set and are not reconciled with it.
pub fn predict(attrs: &CustomerAttributes) -> PredictionResult {
    let logit = MODEL.logit(attrs);
    let probability = sigmoid(logit);

    PredictionResult {
        probability,
        risk_level: RiskLevel::from_probability(probability),
        risk_factors: derive_risk_factors(attrs),
    }
}

/// Score many customers on the rayon pool. Output order matches input order
/// and each result equals what [`predict`] returns for that record.
pub fn predict_batch(records: &[CustomerAttributes]) -> Vec<PredictionResult> {
    debug!("Scoring batch of {} customers", records.len());
    records.par_iter().map(predict).collect()
}
