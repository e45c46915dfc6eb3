//! CSV loaders for the four raw transaction tables.
//!
//! Expected files in the data directory:
//!   purchases.csv        VendorNumber, VendorName, Brand, Description,
//!                        PurchasePrice, Quantity, Dollars
//!   purchase_prices.csv  Brand, Price, Volume
//!   vendor_invoice.csv   VendorNumber, Freight
//!   sales.csv            VendorNo, Brand, SalesQuantity, SalesDollars,
//!                        SalesPrice, ExciseTax
//!
//! Extra columns are ignored. Volume may arrive as a quoted string in the
//! raw exports, so it is parsed through a tolerant numeric deserializer.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{CoreError, CoreResult};

/// One purchase transaction line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurchaseRecord {
    pub vendor_number: i64,
    pub vendor_name: String,
    pub brand: i64,
    pub description: String,
    pub purchase_price: f64,
    pub quantity: f64,
    pub dollars: f64,
}

/// Reference price and volume for a brand.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PriceListing {
    pub brand: i64,
    pub price: f64,
    #[serde(deserialize_with = "deserialize_flexible_f64")]
    pub volume: f64,
}

/// One vendor invoice line carrying freight charges.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VendorInvoiceRecord {
    pub vendor_number: i64,
    pub freight: f64,
}

/// One sales transaction line. The sales feed names its vendor column
/// `VendorNo`, unlike every other table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalesRecord {
    pub vendor_no: i64,
    pub brand: i64,
    pub sales_quantity: f64,
    pub sales_dollars: f64,
    pub sales_price: f64,
    pub excise_tax: f64,
}

/// The full raw snapshot the summary builder consumes.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub purchases: Vec<PurchaseRecord>,
    pub purchase_prices: Vec<PriceListing>,
    pub vendor_invoices: Vec<VendorInvoiceRecord>,
    pub sales: Vec<SalesRecord>,
}

impl RawTables {
    /// Load all four tables from a directory. A missing file is a named
    /// error; the prior snapshot stays authoritative on any failure.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> CoreResult<Self> {
        let dir = dir.as_ref();
        let tables = RawTables {
            purchases: load_table_file(&dir.join("purchases.csv"), "purchases")?,
            purchase_prices: load_table_file(&dir.join("purchase_prices.csv"), "purchase_prices")?,
            vendor_invoices: load_table_file(&dir.join("vendor_invoice.csv"), "vendor_invoice")?,
            sales: load_table_file(&dir.join("sales.csv"), "sales")?,
        };
        log::info!(
            "loaded raw tables: {} purchases, {} price listings, {} invoices, {} sales",
            tables.purchases.len(),
            tables.purchase_prices.len(),
            tables.vendor_invoices.len(),
            tables.sales.len()
        );
        Ok(tables)
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
            && self.purchase_prices.is_empty()
            && self.vendor_invoices.is_empty()
            && self.sales.is_empty()
    }
}

/// Load one table from any reader.
pub fn load_table<R: Read, T: DeserializeOwned>(
    reader: R,
    table: &'static str,
) -> CoreResult<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: T = result.map_err(|e| CoreError::CsvParse {
            table,
            // +2: one for the header row, one because line_num is 0-based
            line: line_num + 2,
            message: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}

fn load_table_file<T: DeserializeOwned>(path: &Path, table: &'static str) -> CoreResult<Vec<T>> {
    if !path.exists() {
        return Err(CoreError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path)?;
    load_table(file, table)
}

/// Tolerant f64 deserializer: accepts plain numbers, quoted numbers with
/// surrounding whitespace, and empty fields (read as 0.0).
fn deserialize_flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| serde::de::Error::custom(format!("expected numeric value, got '{}'", trimmed)))
}
