//! Snapshot export: CSV for the full cleaned table, JSON records for the
//! filtered dashboard feed.

use std::io::Write;
use std::path::Path;

use crate::error::CoreResult;
use crate::summary::VendorBrandSummary;

/// Write rows as CSV with the raw tables' PascalCase headers.
pub fn write_summary_csv<W: Write>(writer: W, rows: &[VendorBrandSummary]) -> CoreResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_summary_csv_file<P: AsRef<Path>>(
    path: P,
    rows: &[VendorBrandSummary],
) -> CoreResult<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_summary_csv(file, rows)?;
    log::info!(
        "exported {} summary rows to {}",
        rows.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Write rows as a JSON array of records.
pub fn write_records_json<W: Write>(writer: W, rows: &[VendorBrandSummary]) -> CoreResult<()> {
    serde_json::to_writer(writer, rows)?;
    Ok(())
}

pub fn write_records_json_file<P: AsRef<Path>>(
    path: P,
    rows: &[VendorBrandSummary],
) -> CoreResult<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_records_json(file, rows)?;
    log::info!(
        "exported {} summary records to {}",
        rows.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> VendorBrandSummary {
        VendorBrandSummary {
            vendor_number: 1,
            vendor_name: "Vendor A".to_string(),
            brand: 10,
            description: "Brand Ten".to_string(),
            purchase_price: 7.25,
            actual_price: 11.99,
            volume: 750.0,
            total_purchase_quantity: 150.0,
            total_purchase_dollars: 1087.5,
            total_sales_quantity: 120.0,
            total_sales_dollars: 1438.8,
            total_sales_price: 23.98,
            total_excise_tax: 10.8,
            freight_cost: 20.0,
            gross_profit: 351.3,
            profit_margin: 24.42,
            stock_turnover: 0.8,
            sales_to_purchase_ratio: 1.32,
        }
    }

    #[test]
    fn csv_export_carries_pascal_case_headers() {
        let mut out = Vec::new();
        write_summary_csv(&mut out, &[sample_row()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("VendorNumber,VendorName,Brand,Description"));
        assert!(header.ends_with("GrossProfit,ProfitMargin,StockTurnover,SalesToPurchaseRatio"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn json_export_round_trips() {
        let mut out = Vec::new();
        write_records_json(&mut out, &[sample_row()]).unwrap();
        let parsed: Vec<VendorBrandSummary> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, vec![sample_row()]);
    }
}
