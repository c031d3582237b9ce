use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// intake:
///   clamp_inputs: true
/// report:
///   alert_limit: 5
///   top_customers: 10
/// display:
///   export_factor_columns: 3
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub intake: Option<IntakeConfig>,

    #[serde(default)]
    pub report: Option<ReportConfig>,

    #[serde(default)]
    pub display: Option<DisplayConfig>,
}

impl Config {
    /// The configuration written by `init`, with every section spelled out.
    pub fn with_defaults() -> Self {
        Self {
            intake: Some(IntakeConfig::default()),
            report: Some(ReportConfig::default()),
            display: Some(DisplayConfig::default()),
        }
    }

    pub fn clamp_inputs(&self) -> bool {
        self.intake
            .as_ref()
            .and_then(|i| i.clamp_inputs)
            .unwrap_or(false)
    }

    pub fn alert_limit(&self) -> usize {
        self.report
            .as_ref()
            .and_then(|r| r.alert_limit)
            .unwrap_or(DEFAULT_ALERT_LIMIT)
    }

    pub fn top_customers(&self) -> usize {
        self.report
            .as_ref()
            .and_then(|r| r.top_customers)
            .unwrap_or(DEFAULT_TOP_CUSTOMERS)
    }

    pub fn output_dir(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.output_dir.as_deref())
    }

    pub fn export_factor_columns(&self) -> usize {
        self.display
            .as_ref()
            .and_then(|d| d.export_factor_columns)
            .unwrap_or(DEFAULT_EXPORT_FACTOR_COLUMNS)
    }
}

pub const DEFAULT_ALERT_LIMIT: usize = 5;
pub const DEFAULT_TOP_CUSTOMERS: usize = 10;
pub const DEFAULT_EXPORT_FACTOR_COLUMNS: usize = 3;

/// How raw customer input is treated before scoring.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Clamp counts to be non-negative and completion to 0-100 (default: false)
    #[serde(default)]
    pub clamp_inputs: Option<bool>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            clamp_inputs: Some(false),
        }
    }
}

/// Batch report settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// High-risk customers listed in the alert section
    #[serde(default)]
    pub alert_limit: Option<usize>,

    /// High-risk customers listed in the action section
    #[serde(default)]
    pub top_customers: Option<usize>,

    /// Directory for saved JSON reports (default: ~/.config/dechurner/reports)
    #[serde(default)]
    pub output_dir: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            alert_limit: Some(DEFAULT_ALERT_LIMIT),
            top_customers: Some(DEFAULT_TOP_CUSTOMERS),
            output_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Number of topRiskFactorN columns in CSV export
    #[serde(default)]
    pub export_factor_columns: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            export_factor_columns: Some(DEFAULT_EXPORT_FACTOR_COLUMNS),
        }
    }
}
