//! Output formatting module

use mavuno_app::constants::fee_rates::BPS_DENOMINATOR;
use mavuno_app::constants::PolicyRow;
use mavuno_domain::model::{BidQuote, Quantity};
use mavuno_domain::service::{generate_settlement_report, SettlementResult, SubmissionCheck};
use mavuno_types::{OutputFormat, Result};

pub fn output_quote(output_format: OutputFormat, quote: &BidQuote) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(quote)?);
        return Ok(());
    }

    let b = &quote.breakdown;
    println!("\nBid Fee Breakdown");
    println!("=================");
    println!("Truck:             {} ({})", quote.truck_size, quote.truck_size.tier());
    println!("Quantity:          {} kg", quote.quantity_kg);
    println!("Trips required:    {}", quote.trips_required);
    println!("-------------------------");
    println!("Gross amount:      KES {:>14}", b.gross_amount());
    println!("Platform fee:      KES {:>14}", b.platform_fee());
    println!("Finance markup:    KES {:>14}", b.finance_markup());
    println!("Transport & QC:    KES {:>14}", b.transport_and_qc_fee());
    println!("-------------------------");
    println!("Net amount:        KES {:>14}", b.net_amount());
    println!("Net per kg:        KES {}", quote.net_price_per_kg);
    println!("Deductions:        {}%", quote.deduction_rate_percent);

    if !quote.meets_minimum {
        println!("\nWarning: quantity is below the minimum; this bid cannot be submitted.");
    }

    Ok(())
}

pub fn output_minimum(output_format: OutputFormat, minimum: Quantity) -> Result<()> {
    if output_format == OutputFormat::Json {
        let value = serde_json::json!({ "minimum_quantity_kg": minimum.kg() });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Minimum quantity: {}", minimum);
    }
    Ok(())
}

pub fn output_submission_check(output_format: OutputFormat, check: &SubmissionCheck) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(check)?);
        return Ok(());
    }

    if check.allowed {
        println!("OK: {} kg meets the {} kg minimum", check.quantity_kg, check.minimum_kg);
    } else if let Some(warning) = check.warning() {
        println!("Blocked: {}", warning);
    }
    Ok(())
}

pub fn output_policy(output_format: OutputFormat, rows: &[PolicyRow], minimum: Quantity) -> Result<()> {
    if output_format == OutputFormat::Json {
        let value = serde_json::json!({
            "rates": rows,
            "minimum_quantity_kg": minimum.kg(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("\nFee Policy");
    println!("==========");
    println!("{:<26} {:>6} {:>8}", "Component", "bps", "Rate");
    for row in rows {
        println!("{:<26} {:>6} {:>7}%", row.component, row.bps, row.percent);
    }
    println!("\nMinimum quantity: {}", minimum);
    println!("Rates apply to the gross bid amount; 100% = {} bps.", BPS_DENOMINATOR);
    Ok(())
}

pub fn output_settlement(output_format: OutputFormat, results: &[SettlementResult]) -> Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(results)?),
        OutputFormat::Table => println!("{}", generate_settlement_report(results)),
    }
    Ok(())
}
