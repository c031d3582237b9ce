use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::Serialize;

use super::coerce::{coerce_attributes, CATEGORY_FIELDS, NUMERIC_FIELDS};
use super::IntakeError;
use crate::scoring::CustomerAttributes;

/// Template offered to users preparing an upload.
pub const TEMPLATE_CSV: &str = "\
id,name,email,subscriptionAge,monthlyCharge,loginFrequency,contentCompletion,failedPayments,paymentMethod,supportTickets,contractType,daysSinceLastActivity
1,John Doe,john@example.com,6,79,12,75,0,Credit card,1,Monthly,3
2,Jane Smith,jane@example.com,2,49,3,20,1,PayPal,4,Monthly,15";

/// One uploaded customer: identity columns plus scoring attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub attributes: CustomerAttributes,
}

/// Read and parse a CSV file of customers.
pub fn read_customers(path: &Path) -> Result<Vec<CustomerRecord>, IntakeError> {
    let content = fs::read_to_string(path).map_err(|source| IntakeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_customers(&content)
}

/// Parse CSV text into customer records.
///
/// Blank lines are skipped, the first remaining line is the header, and
/// fields are split on commas without quoting support. Columns are matched
/// by header name; unknown columns are ignored and absent ones take the
/// coercion defaults.
pub fn parse_customers(content: &str) -> Result<Vec<CustomerRecord>, IntakeError> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(IntakeError::MissingHeader)?;
    let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();

    let known = headers
        .iter()
        .filter(|h| NUMERIC_FIELDS.contains(*h) || CATEGORY_FIELDS.contains(*h))
        .count();
    if known == 0 {
        return Err(IntakeError::NoAttributeColumns {
            header: header_line.trim().to_string(),
        });
    }

    let records: Vec<CustomerRecord> = lines
        .enumerate()
        .map(|(i, line)| {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            let row: HashMap<&str, &str> = headers
                .iter()
                .zip(values.iter())
                .map(|(h, v)| (*h, *v))
                .collect();
            build_record(i + 1, &row)
        })
        .collect();

    debug!("Parsed {} customer rows", records.len());
    Ok(records)
}

fn build_record(row_number: usize, row: &HashMap<&str, &str>) -> CustomerRecord {
    let text = |column: &str| row.get(column).copied().filter(|v| !v.is_empty());

    let (attributes, invalid) = coerce_attributes(|column| row.get(column).copied());
    for column in invalid {
        warn!(
            "Row {}: {} value '{}' is not a number, using 0",
            row_number,
            column,
            row.get(column).copied().unwrap_or_default()
        );
    }

    CustomerRecord {
        id: text("id")
            .map(str::to_string)
            .unwrap_or_else(|| format!("customer-{}", row_number)),
        name: text("name").unwrap_or("Unknown").to_string(),
        email: text("email").unwrap_or_default().to_string(),
        attributes,
    }
}
