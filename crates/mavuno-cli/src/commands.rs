//! Command handlers

use std::path::Path;
use std::process::ExitCode;

use crate::cli::{Cli, Commands};
use crate::output::{
    output_minimum, output_policy, output_quote, output_settlement, output_submission_check,
};
use mavuno_app::app::{BidSelection, QuoteService};
use mavuno_app::config::Config;
use mavuno_app::constants::policy_table;
use mavuno_app::export::export_to_excel;
use mavuno_domain::model::TruckSize;
use mavuno_domain::service::minimum_quantity;
use mavuno_types::{Error, OutputFormat, Result};
use rust_decimal::Decimal;
use tracing::debug;

/// Exit code for a submission blocked by the minimum quantity gate
const EXIT_SUBMISSION_BLOCKED: u8 = 2;

pub fn execute(cli: Cli) -> Result<ExitCode> {
    let config_path = match cli.config {
        Some(ref path) => path.clone(),
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)?;
    debug!(path = %config_path.display(), "loaded configuration");

    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Quote {
            amount,
            quantity,
            truck,
        } => cmd_quote(&config, output_format, *amount, *quantity, *truck),

        Commands::Minimum => {
            output_minimum(output_format, minimum_quantity())?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { quantity } => cmd_check(&config, output_format, *quantity),

        Commands::Batch {
            csv,
            xlsx,
            group,
            bid,
        } => {
            let selection = match (group, bid) {
                (Some(group), _) => BidSelection::Group(group.clone()),
                (None, Some(bid)) => BidSelection::Bid(bid.clone()),
                (None, None) => BidSelection::All,
            };
            cmd_batch(&config, output_format, csv, xlsx.as_deref(), &selection)
        }

        Commands::Policy => {
            let service = QuoteService::from_config(&config)?;
            output_policy(output_format, &policy_table(service.policy()), minimum_quantity())?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Config {
            show,
            set_output,
            set_platform_bps,
            set_finance_bps,
            set_transport_bps,
            reset,
        } => cmd_config(
            &config_path,
            config,
            *show,
            *set_output,
            *set_platform_bps,
            *set_finance_bps,
            set_transport_bps,
            *reset,
        ),
    }
}

fn cmd_quote(
    config: &Config,
    output_format: OutputFormat,
    amount: Decimal,
    quantity: Decimal,
    truck: TruckSize,
) -> Result<ExitCode> {
    let service = QuoteService::from_config(config)?;
    let quote = service.quote(amount, quantity, truck)?;
    output_quote(output_format, &quote)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(config: &Config, output_format: OutputFormat, quantity: Decimal) -> Result<ExitCode> {
    let service = QuoteService::from_config(config)?;
    let check = service.check_submission(quantity);
    output_submission_check(output_format, &check)?;

    if check.allowed {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_SUBMISSION_BLOCKED))
    }
}

fn cmd_batch(
    config: &Config,
    output_format: OutputFormat,
    csv_path: &Path,
    xlsx_path: Option<&Path>,
    selection: &BidSelection,
) -> Result<ExitCode> {
    if !csv_path.exists() {
        return Err(Error::FileNotFound(format!(
            "CSV file not found: {}",
            csv_path.display()
        )));
    }

    let service = QuoteService::from_config(config)?;
    let results = service.settle_file(csv_path, selection)?;
    output_settlement(output_format, &results)?;

    if let Some(path) = xlsx_path {
        export_to_excel(&results, path)?;
        eprintln!("Exported statement to: {}", path.display());
    }

    let rejected = results.iter().filter(|r| !r.is_settled()).count();
    if rejected > 0 {
        eprintln!("\nWarning: {} bid(s) rejected", rejected);
    }

    Ok(ExitCode::SUCCESS)
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    config_path: &Path,
    mut config: Config,
    show: bool,
    set_output: Option<OutputFormat>,
    set_platform_bps: Option<u32>,
    set_finance_bps: Option<u32>,
    set_transport_bps: &[(TruckSize, u32)],
    reset: bool,
) -> Result<ExitCode> {
    if reset {
        let config = Config::default();
        config.save_to(config_path)?;
        println!("Configuration reset to defaults");
        println!("\n{}", config.summary(config_path));
        return Ok(ExitCode::SUCCESS);
    }

    let mut modified = false;

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(bps) = set_platform_bps {
        config.policy.platform_commission_bps = bps;
        modified = true;
    }

    if let Some(bps) = set_finance_bps {
        config.policy.finance_markup_bps = bps;
        modified = true;
    }

    for (truck, bps) in set_transport_bps {
        config.policy.transport_qc.set_for_truck(*truck, *bps);
        modified = true;
    }

    if modified {
        // refuse to persist a table that could deduct more than the gross amount
        config.policy()?;
        config.save_to(config_path)?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config.summary(config_path));
    }

    Ok(ExitCode::SUCCESS)
}
