//! Customer churn risk scoring.
//!
//! [`scoring::predict`] turns a customer's usage and billing attributes into a
//! churn probability, a High/Low label and the top rule-based risk factors.
//! The other modules are the command-line surface around it: CSV intake,
//! output formatting, batch reports and configuration.

pub mod config;
pub mod intake;
pub mod output;
pub mod report;
pub mod scoring;
