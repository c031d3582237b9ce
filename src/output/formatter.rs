use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::report::ScoredCustomer;
use crate::scoring::{catalog, PredictionResult, RiskLevel};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a probability fraction as a whole percentage ("27%")
pub fn format_probability(probability: f64) -> String {
    format!("{:.0}%", probability * 100.0)
}

/// Percentage with one decimal and no sign, as used in CSV export ("2.7")
pub fn format_export_probability(probability: f64) -> String {
    format!("{:.1}", probability * 100.0)
}

fn format_risk_level(level: RiskLevel, use_colors: bool) -> String {
    let text = format!("{} Risk", level);
    if !use_colors {
        return text;
    }
    match level {
        RiskLevel::High => text.red().bold().to_string(),
        RiskLevel::Low => text.green().to_string(),
    }
}

/// Format one prediction with its risk factors (multi-line)
pub fn format_prediction_detail(result: &PredictionResult, use_colors: bool) -> String {
    let probability = format_probability(result.probability);
    let mut lines = vec![format!(
        "Churn probability: {}  {}",
        if use_colors {
            probability.bold().to_string()
        } else {
            probability
        },
        format_risk_level(result.risk_level, use_colors)
    )];

    if result.risk_factors.is_empty() {
        lines.push("  No risk factors detected".to_string());
    } else {
        lines.push("Top risk factors:".to_string());
        for (idx, factor) in result.risk_factors.iter().enumerate() {
            let name = if use_colors {
                factor.feature.yellow().to_string()
            } else {
                factor.feature.to_string()
            };
            lines.push(format!(
                "  {}. {}  impact {:.1}, odds {:.2}",
                idx + 1,
                name,
                factor.impact,
                factor.odds
            ));
        }
    }

    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn customer_label(scored: &ScoredCustomer) -> String {
    if scored.record.email.is_empty() {
        scored.record.name.clone()
    } else {
        format!("{} <{}>", scored.record.name, scored.record.email)
    }
}

/// Format customers as a table with columns: Index, Probability, Risk,
/// Customer, Top factor. No headers.
pub fn format_scored_table(customers: &[&ScoredCustomer], use_colors: bool) -> String {
    if customers.is_empty() {
        return "No customers found.".to_string();
    }

    let term_width = get_terminal_width();

    // Index 3 + 1, probability 4 + 2, risk 9 + 2
    let index_width = 3;
    let prob_width = 4;
    let risk_width = 9;
    let separator = "  ";

    customers
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let prob_str = format!(
                "{:>width$}",
                format_probability(scored.prediction.probability),
                width = prob_width
            );
            let risk_str = format!(
                "{:<width$}",
                format!("{} Risk", scored.prediction.risk_level),
                width = risk_width
            );
            let factor = scored.top_factor().unwrap_or("None");

            let fixed_width = index_width
                + 1
                + prob_width
                + risk_width
                + separator.len() * 3
                + factor.chars().count();
            let label = customer_label(scored);
            let label = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_text(&label, width - fixed_width),
                Some(_) => truncate_text(&label, 20),
                None => label,
            };

            if use_colors {
                let risk_colored = match scored.prediction.risk_level {
                    RiskLevel::High => risk_str.red().bold().to_string(),
                    RiskLevel::Low => risk_str.green().to_string(),
                };
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    prob_str.bold(),
                    separator,
                    risk_colored,
                    separator,
                    label,
                    separator,
                    factor.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, prob_str, separator, risk_str, separator, label, separator, factor
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format customers as tab-separated values for scripting
/// Columns: probability %, risk level, id, name, top factor (no headers, no colors)
pub fn format_tsv(customers: &[&ScoredCustomer]) -> String {
    customers
        .iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                format_export_probability(scored.prediction.probability),
                scored.prediction.risk_level,
                scored.record.id,
                scored.record.name,
                scored.top_factor().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format results as the export CSV:
/// id,name,email,churnProbability,riskLevel,topRiskFactor1..N
pub fn format_results_csv(customers: &[&ScoredCustomer], factor_columns: usize) -> String {
    let mut header = vec![
        "id".to_string(),
        "name".to_string(),
        "email".to_string(),
        "churnProbability".to_string(),
        "riskLevel".to_string(),
    ];
    header.extend((1..=factor_columns).map(|n| format!("topRiskFactor{}", n)));

    let rows = customers.iter().map(|scored| {
        let mut row = vec![
            scored.record.id.clone(),
            scored.record.name.clone(),
            scored.record.email.clone(),
            format_export_probability(scored.prediction.probability),
            scored.prediction.risk_level.to_string(),
        ];
        row.extend((0..factor_columns).map(|i| {
            scored
                .prediction
                .risk_factors
                .get(i)
                .map(|f| f.feature.to_string())
                .unwrap_or_default()
        }));
        row.join(",")
    });

    std::iter::once(header.join(","))
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the risk-factor catalog as an aligned table
pub fn format_catalog(use_colors: bool) -> String {
    let entries = catalog();
    let name_width = entries
        .iter()
        .map(|(_, f)| f.feature.len())
        .max()
        .unwrap_or(0);

    let header = format!("{:<name_width$}  {:>6}  {:>5}", "Feature", "Impact", "Odds");
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    std::iter::once(header)
        .chain(entries.iter().map(|(_, factor)| {
            format!(
                "{:<name_width$}  {:>6.1}  {:>5.2}",
                factor.feature, factor.impact, factor.odds
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{parse_customers, TEMPLATE_CSV};
    use crate::report::score_records;
    use crate::scoring::{predict, CustomerAttributes};

    fn sample_scored() -> Vec<ScoredCustomer> {
        score_records(parse_customers(TEMPLATE_CSV).unwrap(), false)
    }

    #[test]
    fn test_format_probability() {
        assert_eq!(format_probability(0.0271), "3%");
        assert_eq!(format_probability(0.874), "87%");
        assert_eq!(format_export_probability(0.0271), "2.7");
        assert_eq!(format_export_probability(0.5), "50.0");
    }

    #[test]
    fn test_prediction_detail_lists_factors() {
        let result = predict(&CustomerAttributes {
            login_frequency: 2.0,
            subscription_age: 10.0,
            content_completion: 80.0,
            ..Default::default()
        });
        let text = format_prediction_detail(&result, false);
        assert!(text.contains("Churn probability:"));
        assert!(text.contains("1. Low Login Frequency  impact 85.0, odds 1.85"));
        assert!(text.contains("2. Monthly Contract  impact 65.0, odds 1.65"));
    }

    #[test]
    fn test_prediction_detail_without_factors() {
        let result = PredictionResult {
            probability: 0.1,
            risk_level: RiskLevel::Low,
            risk_factors: vec![],
        };
        let text = format_prediction_detail(&result, false);
        assert!(text.contains("10%"));
        assert!(text.contains("Low Risk"));
        assert!(text.contains("No risk factors detected"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Short", 20), "Short");
        assert_eq!(truncate_text("This is a very long name", 15), "This is a ve...");
        assert_eq!(truncate_text("Hello world", 3), "Hel");
    }

    #[test]
    fn test_scored_table_empty() {
        assert_eq!(format_scored_table(&[], false), "No customers found.");
    }

    #[test]
    fn test_scored_table_rows() {
        let scored = sample_scored();
        let refs: Vec<&ScoredCustomer> = scored.iter().collect();
        let table = format_scored_table(&refs, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1."));
        assert!(lines[0].contains("Low Risk"));
        assert!(lines[0].contains("John Doe"));
        assert!(lines[1].starts_with(" 2."));
        assert!(lines[1].contains("High Risk"));
        assert!(lines[1].contains("Failed Payments"));
    }

    #[test]
    fn test_tsv() {
        let scored = sample_scored();
        let refs: Vec<&ScoredCustomer> = scored.iter().collect();
        let tsv = format_tsv(&refs);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split('\t').count(), 5);
        assert!(lines[1].contains("\tHigh\t2\tJane Smith\tFailed Payments"));
    }

    #[test]
    fn test_results_csv_header_and_rows() {
        let scored = sample_scored();
        let refs: Vec<&ScoredCustomer> = scored.iter().collect();
        let csv = format_results_csv(&refs, 3);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "id,name,email,churnProbability,riskLevel,topRiskFactor1,topRiskFactor2,topRiskFactor3"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("2,Jane Smith,jane@example.com,"));
        assert!(lines[2].contains(",High,Failed Payments,"));
        for line in &lines[1..] {
            assert_eq!(line.split(',').count(), 8);
        }
    }

    #[test]
    fn test_results_csv_pads_missing_factors() {
        let scored = score_records(
            parse_customers("id,loginFrequency,contentCompletion,subscriptionAge,contractType\nq,20,90,12,Annual")
                .unwrap(),
            false,
        );
        let refs: Vec<&ScoredCustomer> = scored.iter().collect();
        let csv = format_results_csv(&refs, 2);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.ends_with(",Low,,"));
    }

    #[test]
    fn test_catalog_table() {
        let table = format_catalog(false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("Feature"));
        assert!(table.contains("Failed Payments"));
        assert!(table.contains("120.0"));
        assert!(table.contains("2.20"));
    }
}
