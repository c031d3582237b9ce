pub mod coerce;
pub mod csv;

pub use coerce::{
    clamp, coerce_attributes, coerce_contract_type, coerce_number, coerce_payment_method, Coerced,
    CATEGORY_FIELDS, NUMERIC_FIELDS,
};
pub use csv::{parse_customers, read_customers, CustomerRecord, TEMPLATE_CSV};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Failed to read customer file at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Customer file is empty: expected a header line")]
    MissingHeader,

    #[error("Header names no customer attribute columns: '{header}'")]
    NoAttributeColumns { header: String },
}
