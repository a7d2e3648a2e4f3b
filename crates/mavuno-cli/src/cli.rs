//! CLI definition using clap

use clap::{Parser, Subcommand};
use mavuno_domain::model::TruckSize;
use mavuno_types::OutputFormat;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mavuno-fees")]
#[command(version)]
#[command(about = "Platform fee and net payout calculator for farmer-group bids")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Config file override (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the fee breakdown for a bid
    Quote {
        /// Gross bid amount in KES
        #[arg(long, short = 'a')]
        amount: Decimal,

        /// Produce quantity in kilograms
        #[arg(long, short = 'q')]
        quantity: Decimal,

        /// Truck size (1-ton, 3-ton, 7-ton or small, medium, large)
        #[arg(long, short = 't')]
        truck: TruckSize,
    },

    /// Show the minimum tradeable quantity
    Minimum,

    /// Check whether a bid quantity may be submitted (exit code 2 if blocked)
    Check {
        /// Produce quantity in kilograms
        #[arg(long, short = 'q')]
        quantity: Decimal,
    },

    /// Settle a CSV batch of bids
    Batch {
        /// Path to CSV file (bid_id,farmer_group,gross_kes,quantity_kg,truck_size[,date][,produce])
        csv: PathBuf,

        /// Also write an Excel statement to this path
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Only settle bids from this farmer group (case-insensitive)
        #[arg(long, conflicts_with = "bid")]
        group: Option<String>,

        /// Only settle the bid with this id
        #[arg(long)]
        bid: Option<String>,
    },

    /// Show the active fee policy table
    Policy,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set platform commission in basis points (500 = 5%)
        #[arg(long)]
        set_platform_bps: Option<u32>,

        /// Set finance markup in basis points
        #[arg(long)]
        set_finance_bps: Option<u32>,

        /// Set transport & QC rate for a truck size, e.g. "3-ton=250"
        #[arg(long, value_parser = parse_truck_rate)]
        set_transport_bps: Vec<(TruckSize, u32)>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

fn parse_truck_rate(arg: &str) -> Result<(TruckSize, u32), String> {
    let (truck, bps) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected <truck>=<bps>, got '{}'", arg))?;
    let truck: TruckSize = truck.parse().map_err(|e: mavuno_types::Error| e.to_string())?;
    let bps: u32 = bps
        .trim()
        .parse()
        .map_err(|_| format!("invalid basis points '{}'", bps))?;
    Ok((truck, bps))
}
