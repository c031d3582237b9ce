use super::schema::Config;
use crate::scoring::MAX_RISK_FACTORS;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref report) = config.report {
        if report.alert_limit == Some(0) {
            errors.push("report.alert_limit: must be at least 1".to_string());
        }
        if report.top_customers == Some(0) {
            errors.push("report.top_customers: must be at least 1".to_string());
        }
        if let Some(ref dir) = report.output_dir {
            if dir.trim().is_empty() {
                errors.push("report.output_dir: must not be empty".to_string());
            }
        }
    }

    if let Some(ref display) = config.display {
        if let Some(n) = display.export_factor_columns {
            if n == 0 || n > MAX_RISK_FACTORS {
                errors.push(format!(
                    "display.export_factor_columns: must be between 1 and {}, got {}",
                    MAX_RISK_FACTORS, n
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
