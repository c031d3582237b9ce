use serde::Serialize;

use crate::intake::CustomerRecord;
use crate::scoring::{PredictionResult, RiskLevel};

/// A customer together with its prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCustomer {
    #[serde(flatten)]
    pub record: CustomerRecord,
    pub prediction: PredictionResult,
}

impl ScoredCustomer {
    pub fn is_high_risk(&self) -> bool {
        self.prediction.risk_level == RiskLevel::High
    }

    /// Label of the highest-impact factor, if any fired.
    pub fn top_factor(&self) -> Option<&'static str> {
        self.prediction.risk_factors.first().map(|f| f.feature)
    }
}

/// Aggregate figures over a scored batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub high_risk: usize,
    pub low_risk: usize,
    /// Mean probability as a fraction; 0 for an empty batch
    pub avg_probability: f64,
    /// Sum of monthly charges
    pub total_revenue: f64,
    /// Sum of monthly charges of high-risk customers
    pub at_risk_revenue: f64,
}

impl BatchSummary {
    pub fn from_scored(scored: &[ScoredCustomer]) -> Self {
        let total = scored.len();
        let high_risk = scored.iter().filter(|s| s.is_high_risk()).count();

        let avg_probability = if total > 0 {
            scored.iter().map(|s| s.prediction.probability).sum::<f64>() / total as f64
        } else {
            0.0
        };

        let total_revenue = scored
            .iter()
            .map(|s| s.record.attributes.monthly_charge)
            .sum();
        let at_risk_revenue = scored
            .iter()
            .filter(|s| s.is_high_risk())
            .map(|s| s.record.attributes.monthly_charge)
            .sum();

        Self {
            total,
            high_risk,
            low_risk: total - high_risk,
            avg_probability,
            total_revenue,
            at_risk_revenue,
        }
    }

    /// Share of the batch at `count`, as a percentage. 0 for an empty batch.
    pub fn share(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskFilter {
    #[default]
    All,
    High,
    Low,
}

impl RiskFilter {
    pub fn matches(&self, level: RiskLevel) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::High => level == RiskLevel::High,
            RiskFilter::Low => level == RiskLevel::Low,
        }
    }
}

/// Keep customers matching the risk filter whose name or email contains
/// `search` (case-insensitive). An empty search matches everyone.
pub fn filter_scored<'a>(
    scored: &'a [ScoredCustomer],
    risk: RiskFilter,
    search: Option<&str>,
) -> Vec<&'a ScoredCustomer> {
    let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();

    scored
        .iter()
        .filter(|s| risk.matches(s.prediction.risk_level))
        .filter(|s| {
            needle.is_empty()
                || s.record.name.to_lowercase().contains(&needle)
                || s.record.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// High-risk customers, most likely to churn first. Equal probabilities keep
/// their input order.
pub fn rank_high_risk(scored: &[ScoredCustomer]) -> Vec<&ScoredCustomer> {
    let mut high: Vec<&ScoredCustomer> = scored.iter().filter(|s| s.is_high_risk()).collect();
    high.sort_by(|a, b| b.prediction.probability.total_cmp(&a.prediction.probability));
    high
}
