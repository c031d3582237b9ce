use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use dechurner::config::Config;
use dechurner::report::{RiskFilter, ScoredCustomer};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    /// Aligned table for terminals
    #[default]
    Table,
    /// Tab-separated, no header
    Tsv,
    /// Export CSV with header
    Csv,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum RiskArg {
    #[default]
    All,
    High,
    Low,
}

impl From<RiskArg> for RiskFilter {
    fn from(arg: RiskArg) -> Self {
        match arg {
            RiskArg::All => RiskFilter::All,
            RiskArg::High => RiskFilter::High,
            RiskArg::Low => RiskFilter::Low,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a single customer from flags
    Predict {
        /// Months as a customer
        #[arg(long, default_value = "6", allow_hyphen_values = true)]
        subscription_age: String,
        /// Subscription price
        #[arg(long, default_value = "50", allow_hyphen_values = true)]
        monthly_charge: String,
        /// Logins in the last 30 days
        #[arg(long, default_value = "15", allow_hyphen_values = true)]
        login_frequency: String,
        /// Percentage of content consumed (0-100)
        #[arg(long, default_value = "65", allow_hyphen_values = true)]
        content_completion: String,
        /// Failed payment attempts
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        failed_payments: String,
        /// "Credit card", "PayPal", "Bank transfer" or "Invoice"
        #[arg(long, default_value = "Credit card")]
        payment_method: String,
        /// Support tickets in the last 90 days
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        support_tickets: String,
        /// "Monthly", "Annual" or "Quarterly"
        #[arg(long, default_value = "Monthly")]
        contract_type: String,
        /// Days since the customer was last active
        #[arg(long, default_value = "3", allow_hyphen_values = true)]
        days_since_last_activity: String,
        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score every customer in a CSV file
    Bulk {
        /// CSV file with a header row (see `template`)
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Only show customers at this risk level
        #[arg(long, value_enum, default_value_t = RiskArg::All)]
        risk: RiskArg,
        /// Only show customers whose name or email contains this text
        #[arg(long)]
        search: Option<String>,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Summarise churn risk across a CSV file
    Report {
        /// CSV file with a header row (see `template`)
        file: PathBuf,
        /// Also save the results and summary as JSON
        #[arg(long)]
        save: bool,
    },
    /// List the risk-factor catalog
    Catalog {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a CSV template for `bulk` and `report`
    Template,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "dechurner")]
#[command(about = "Customer churn risk scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/dechurner/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let config_path = cli.config.map(PathBuf::from);

    // `init` writes the config, so it must not require one
    let config = if matches!(cli.command, Commands::Init { .. }) {
        Config::default()
    } else {
        load_validated_config(config_path.clone())
    };

    let use_colors = dechurner::output::should_use_colors();

    match cli.command {
        Commands::Predict {
            subscription_age,
            monthly_charge,
            login_frequency,
            content_completion,
            failed_payments,
            payment_method,
            support_tickets,
            contract_type,
            days_since_last_activity,
            json,
        } => {
            let fields = [
                ("subscriptionAge", subscription_age.as_str()),
                ("monthlyCharge", monthly_charge.as_str()),
                ("loginFrequency", login_frequency.as_str()),
                ("contentCompletion", content_completion.as_str()),
                ("failedPayments", failed_payments.as_str()),
                ("paymentMethod", payment_method.as_str()),
                ("supportTickets", support_tickets.as_str()),
                ("contractType", contract_type.as_str()),
                ("daysSinceLastActivity", days_since_last_activity.as_str()),
            ];
            let (mut attrs, invalid) = dechurner::intake::coerce_attributes(|name| {
                fields
                    .iter()
                    .find(|(field, _)| *field == name)
                    .map(|(_, value)| *value)
            });
            for field in invalid {
                log::warn!("{} is not a finite number, using 0", field);
            }
            if config.clamp_inputs() {
                attrs = dechurner::intake::clamp(&attrs);
            }
            log::debug!("Scoring {:?}", attrs);

            let result = dechurner::scoring::predict(&attrs);
            if json {
                match serde_json::to_string_pretty(&result) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize prediction: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            } else {
                println!(
                    "{}",
                    dechurner::output::format_prediction_detail(&result, use_colors)
                );
            }
        }
        Commands::Bulk {
            file,
            format,
            risk,
            search,
            output,
        } => {
            let scored = load_and_score(&file, &config);
            let shown =
                dechurner::report::filter_scored(&scored, risk.into(), search.as_deref());

            if cli.verbose {
                eprintln!(
                    "Showing {} of {} customers",
                    shown.len(),
                    scored.len()
                );
            }

            // Files never get escape codes
            let colors = use_colors && output.is_none();
            let rendered = match format {
                OutputFormat::Table => dechurner::output::format_scored_table(&shown, colors),
                OutputFormat::Tsv => dechurner::output::format_tsv(&shown),
                OutputFormat::Csv => {
                    dechurner::output::format_results_csv(&shown, config.export_factor_columns())
                }
            };

            match output {
                Some(path) => {
                    if let Err(e) = dechurner::output::write_output(&path, &rendered) {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                    eprintln!("Wrote {} results to {}", shown.len(), path.display());
                }
                None => println!("{}", rendered),
            }
        }
        Commands::Report { file, save } => {
            let scored = load_and_score(&file, &config);
            let now = chrono::Local::now();

            if let Some(alert) = dechurner::report::format_alert(&scored, config.alert_limit()) {
                eprintln!("{}", alert);
                eprintln!();
            }
            print!(
                "{}",
                dechurner::report::format_report(&scored, config.top_customers(), now)
            );

            if save {
                let dir = match config.output_dir() {
                    Some(d) => Ok(PathBuf::from(d)),
                    None => dechurner::config::get_reports_dir(),
                };
                match dir.and_then(|d| dechurner::report::save_report(&d, &scored, now)) {
                    Ok(path) => eprintln!("Report saved to {}", path.display()),
                    Err(e) => {
                        eprintln!("Failed to save report: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            }
        }
        Commands::Catalog { json } => {
            if json {
                let factors: Vec<_> = dechurner::scoring::catalog()
                    .into_iter()
                    .map(|(_, factor)| factor)
                    .collect();
                match serde_json::to_string_pretty(&factors) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize catalog: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            } else {
                println!("{}", dechurner::output::format_catalog(use_colors));
            }
        }
        Commands::Template => {
            println!("{}", dechurner::intake::TEMPLATE_CSV);
        }
        Commands::Init { force } => {
            let path = match config_path {
                Some(p) => p,
                None => match dechurner::config::get_config_path() {
                    Ok(p) => p,
                    Err(e) => {
                        eprintln!("Config error: {}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                },
            };
            if let Err(e) = dechurner::config::write_default_config(&path, force) {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Wrote default config to {}", path.display());
        }
    }

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load and validate config, exiting with a config error on any problem.
fn load_validated_config(path: Option<PathBuf>) -> Config {
    let config = match dechurner::config::load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Report every problem at once
    if let Err(errors) = dechurner::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    config
}

/// Read a customer CSV and score it, exiting with an input error if the
/// file is unreadable or rejected.
fn load_and_score(file: &std::path::Path, config: &Config) -> Vec<ScoredCustomer> {
    let records = match dechurner::intake::read_customers(file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Input error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };
    log::debug!("Read {} records from {}", records.len(), file.display());
    dechurner::report::score_records(records, config.clamp_inputs())
}
