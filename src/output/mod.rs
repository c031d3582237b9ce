pub mod formatter;
pub mod writer;

pub use formatter::{
    format_catalog, format_export_probability, format_prediction_detail, format_probability,
    format_results_csv, format_scored_table, format_tsv, should_use_colors,
};
pub use writer::write_output;
