//! Excel export of settled bid batches

use std::path::Path;

use mavuno_domain::service::settlement_report::SettlementTotals;
use mavuno_domain::service::SettlementResult;
use mavuno_types::{Error, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

fn xlsx_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

fn amount(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Export settlement results to an Excel statement
pub fn export_to_excel(results: &[SettlementResult], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, results)?;

    let details_sheet = workbook.add_worksheet();
    write_details_sheet(details_sheet, results)?;

    workbook.save(output_path).map_err(xlsx_err)?;

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, results: &[SettlementResult]) -> Result<()> {
    sheet.set_name("Summary").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("#,##0.00");
    let totals = SettlementTotals::from_results(results);
    let settled = results.iter().filter(|r| r.is_settled()).count();

    sheet
        .write_string_with_format(0, 0, "Bid Settlement Statement", &header_format)
        .map_err(xlsx_err)?;
    sheet.write_string(2, 0, "Generated:").map_err(xlsx_err)?;
    sheet
        .write_string(2, 1, chrono::Utc::now().to_rfc3339())
        .map_err(xlsx_err)?;

    let counts = [
        ("Total bids:", results.len()),
        ("Settled:", settled),
        ("Rejected:", results.len() - settled),
        (
            "Below minimum:",
            results.iter().filter(|r| r.is_below_minimum()).count(),
        ),
    ];
    let mut row = 3;
    for (label, count) in counts {
        sheet.write_string(row, 0, label).map_err(xlsx_err)?;
        sheet.write_number(row, 1, count as f64).map_err(xlsx_err)?;
        row += 1;
    }

    row += 1;
    sheet
        .write_string_with_format(row, 0, "Totals (KES)", &header_format)
        .map_err(xlsx_err)?;
    row += 1;

    let sums = [
        ("Gross", totals.gross_amount),
        ("Platform fee", totals.platform_fee),
        ("Finance markup", totals.finance_markup),
        ("Transport & QC", totals.transport_and_qc_fee),
        ("Net to groups", totals.net_amount),
    ];
    for (label, value) in sums {
        sheet.write_string(row, 0, label).map_err(xlsx_err)?;
        sheet
            .write_number_with_format(row, 1, amount(value), &money_format)
            .map_err(xlsx_err)?;
        row += 1;
    }

    sheet.set_column_width(0, 20).map_err(xlsx_err)?;
    sheet.set_column_width(1, 28).map_err(xlsx_err)?;

    Ok(())
}

fn write_details_sheet(sheet: &mut Worksheet, results: &[SettlementResult]) -> Result<()> {
    sheet.set_name("Details").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("#,##0.00");

    let headers = [
        "Bid",
        "Farmer Group",
        "Produce",
        "Date",
        "Quantity (kg)",
        "Truck",
        "Gross (KES)",
        "Platform Fee",
        "Finance Markup",
        "Transport & QC",
        "Net (KES)",
        "Net / kg",
        "Meets Minimum",
        "Error",
    ];

    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    for (row_idx, result) in results.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let record = &result.record;

        sheet.write_string(row, 0, &record.bid_id).map_err(xlsx_err)?;
        sheet
            .write_string(row, 1, &record.farmer_group)
            .map_err(xlsx_err)?;
        if let Some(ref produce) = record.produce {
            sheet.write_string(row, 2, produce).map_err(xlsx_err)?;
        }
        if let Some(date) = record.date {
            sheet
                .write_string(row, 3, date.format("%Y-%m-%d").to_string())
                .map_err(xlsx_err)?;
        }
        sheet
            .write_number(row, 4, amount(record.quantity_kg))
            .map_err(xlsx_err)?;
        sheet.write_string(row, 5, &record.truck_size).map_err(xlsx_err)?;

        match (&result.quote, &result.error) {
            (Some(quote), _) => {
                let b = &quote.breakdown;
                let values = [
                    b.gross_amount(),
                    b.platform_fee(),
                    b.finance_markup(),
                    b.transport_and_qc_fee(),
                    b.net_amount(),
                    quote.net_price_per_kg,
                ];
                for (offset, value) in values.into_iter().enumerate() {
                    sheet
                        .write_number_with_format(row, 6 + offset as u16, amount(value), &money_format)
                        .map_err(xlsx_err)?;
                }
                sheet
                    .write_string(row, 12, if quote.meets_minimum { "yes" } else { "no" })
                    .map_err(xlsx_err)?;
            }
            (None, error) => {
                sheet
                    .write_number_with_format(row, 6, amount(record.gross_amount), &money_format)
                    .map_err(xlsx_err)?;
                sheet
                    .write_string(row, 13, error.as_deref().unwrap_or("rejected"))
                    .map_err(xlsx_err)?;
            }
        }
    }

    sheet.set_column_width(0, 12).map_err(xlsx_err)?;
    sheet.set_column_width(1, 28).map_err(xlsx_err)?;
    sheet.set_column_width(13, 50).map_err(xlsx_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mavuno_domain::model::{BidRecord, FeePolicy};
    use mavuno_domain::service::settle_bids;
    use rust_decimal_macros::dec;

    #[test]
    fn test_export_writes_workbook() {
        let records = vec![
            BidRecord {
                bid_id: "B-001".to_string(),
                farmer_group: "Kitale Maize Growers".to_string(),
                gross_amount: dec!(180000),
                quantity_kg: dec!(3000),
                truck_size: "3-ton".to_string(),
                date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15),
                produce: Some("maize".to_string()),
            },
            BidRecord {
                bid_id: "B-002".to_string(),
                farmer_group: "Nyeri Coffee Coop".to_string(),
                gross_amount: dec!(52000),
                quantity_kg: dec!(1200),
                truck_size: "bicycle".to_string(),
                date: None,
                produce: None,
            },
        ];
        let results = settle_bids(&FeePolicy::DEFAULT, &records);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.xlsx");
        export_to_excel(&results, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
