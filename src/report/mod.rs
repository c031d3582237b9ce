pub mod storage;
pub mod summary;
pub mod text;

pub use storage::{report_file_name, save_report};
pub use summary::{filter_scored, rank_high_risk, BatchSummary, RiskFilter, ScoredCustomer};
pub use text::{format_alert, format_report};

use crate::intake::{clamp, CustomerRecord};
use crate::scoring::{predict_batch, CustomerAttributes};

/// Score every record, optionally clamping attributes into their domain
/// first. Results keep the input order.
pub fn score_records(records: Vec<CustomerRecord>, clamp_inputs: bool) -> Vec<ScoredCustomer> {
    let records: Vec<CustomerRecord> = if clamp_inputs {
        records
            .into_iter()
            .map(|mut r| {
                r.attributes = clamp(&r.attributes);
                r
            })
            .collect()
    } else {
        records
    };

    let attrs: Vec<CustomerAttributes> = records.iter().map(|r| r.attributes).collect();
    let predictions = predict_batch(&attrs);

    records
        .into_iter()
        .zip(predictions)
        .map(|(record, prediction)| ScoredCustomer { record, prediction })
        .collect()
}
