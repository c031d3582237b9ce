use chrono::{DateTime, Local};
use std::fmt::Write;

use super::summary::{rank_high_risk, BatchSummary, ScoredCustomer};
use crate::output::format_probability;

const RULE: &str = "─────────────────────────────────────────────────────────";

/// Plain-text batch report: overview, risk distribution and the high-risk
/// customers that need attention, most likely to churn first.
pub fn format_report(
    scored: &[ScoredCustomer],
    top_customers: usize,
    generated_at: DateTime<Local>,
) -> String {
    let summary = BatchSummary::from_scored(scored);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "CHURN RISK REPORT");
    let _ = writeln!(out, "{}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);

    let _ = writeln!(out, "OVERVIEW");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Total Customers Analyzed:     {}", summary.total);
    let _ = writeln!(
        out,
        "Average Churn Probability:    {:.1}%",
        summary.avg_probability * 100.0
    );
    let _ = writeln!(out, "Monthly Revenue:              {:.2}", summary.total_revenue);
    let _ = writeln!(out, "Revenue At Risk:              {:.2}", summary.at_risk_revenue);
    let _ = writeln!(out);

    let _ = writeln!(out, "RISK DISTRIBUTION");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "High Risk (>=50%):            {} ({:.1}%)",
        summary.high_risk,
        summary.share(summary.high_risk)
    );
    let _ = writeln!(
        out,
        "Low Risk (<50%):              {} ({:.1}%)",
        summary.low_risk,
        summary.share(summary.low_risk)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "ACTION REQUIRED");
    let _ = writeln!(out, "{}", RULE);
    let ranked = rank_high_risk(scored);
    if ranked.is_empty() {
        let _ = writeln!(out, "No high-risk customers detected");
    } else {
        let _ = writeln!(out, "{} customers need immediate attention:", ranked.len());
        for customer in ranked.iter().take(top_customers) {
            let _ = writeln!(out, "  - {}", customer_line(customer));
        }
        if ranked.len() > top_customers {
            let _ = writeln!(out, "  ... and {} more", ranked.len() - top_customers);
        }
    }

    out
}

/// Short alert naming the riskiest customers, for printing ahead of the
/// report. None when nobody is high risk.
pub fn format_alert(scored: &[ScoredCustomer], limit: usize) -> Option<String> {
    let ranked = rank_high_risk(scored);
    if ranked.is_empty() {
        return None;
    }

    let mut out = format!(
        "Alert: {} high-risk customers detected",
        ranked.len()
    );
    for customer in ranked.iter().take(limit) {
        out.push_str("\n  ");
        out.push_str(&customer_line(customer));
    }
    Some(out)
}

fn customer_line(customer: &ScoredCustomer) -> String {
    let who = if customer.record.email.is_empty() {
        customer.record.name.as_str()
    } else {
        customer.record.email.as_str()
    };
    format!(
        "{}: {} risk",
        who,
        format_probability(customer.prediction.probability)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{parse_customers, TEMPLATE_CSV};
    use crate::scoring::predict;
    use chrono::TimeZone;

    fn scored(csv: &str) -> Vec<ScoredCustomer> {
        parse_customers(csv)
            .unwrap()
            .into_iter()
            .map(|record| {
                let prediction = predict(&record.attributes);
                ScoredCustomer { record, prediction }
            })
            .collect()
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_report_sections() {
        let report = format_report(&scored(TEMPLATE_CSV), 10, fixed_time());
        assert!(report.contains("2025-03-14 09:30:00"));
        assert!(report.contains("Total Customers Analyzed:     2"));
        assert!(report.contains("RISK DISTRIBUTION"));
        assert!(report.contains("ACTION REQUIRED"));
    }

    #[test]
    fn test_report_without_high_risk() {
        let csv = "email,loginFrequency,contentCompletion,contractType,subscriptionAge\na@x.io,20,90,Annual,12";
        let report = format_report(&scored(csv), 10, fixed_time());
        assert!(report.contains("No high-risk customers detected"));
        assert!(format_alert(&scored(csv), 5).is_none());
    }

    #[test]
    fn test_report_truncates_action_list() {
        let csv = "email,failedPayments,daysSinceLastActivity\na@x.io,3,30\nb@x.io,3,30\nc@x.io,3,30";
        let report = format_report(&scored(csv), 2, fixed_time());
        assert!(report.contains("3 customers need immediate attention"));
        assert!(report.contains("a@x.io"));
        assert!(report.contains("b@x.io"));
        assert!(!report.contains("c@x.io"));
        assert!(report.contains("... and 1 more"));
    }

    #[test]
    fn test_alert_lists_riskiest_first() {
        let csv = "email,failedPayments,daysSinceLastActivity\nlow@x.io,1,10\nhigh@x.io,4,40";
        let alert = format_alert(&scored(csv), 1).unwrap();
        assert!(alert.starts_with("Alert: 2 high-risk customers detected"));
        assert!(alert.contains("high@x.io"));
        assert!(!alert.contains("low@x.io"));
    }

    #[test]
    fn test_empty_batch_report() {
        let report = format_report(&[], 10, fixed_time());
        assert!(report.contains("Total Customers Analyzed:     0"));
        assert!(report.contains("Average Churn Probability:    0.0%"));
    }
}
