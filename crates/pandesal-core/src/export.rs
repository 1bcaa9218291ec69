//! # CSV Exports
//!
//! Renders the sales ledger and the product catalog as CSV text.
//!
//! ## Sales Layout
//! ```text
//! Sale ID,Date,Time,Total Amount,Items Count,Customer Cash,Change,Product Name,Quantity,Price,Subtotal
//! 1,"Jan 5, 2025",10:30 AM,18,5,20,2,Regular Pandesal,4,3,12   ← first item carries the sale
//! 1,,,,,,,Ube Pandesal,1,6,6                                  ← later items: only Sale ID
//! 2,"Jan 5, 2025",11:02 AM,0,0,0,0,,,,                        ← sale without items
//! ```
//!
//! Rows follow collection iteration order. Nothing is sorted here.
//!
//! Rendering happens entirely in memory; the caller hands the finished text
//! to a sink only after every row has been built.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{ExportError, ExportResult};
use crate::types::{Product, Sale, SaleItem};

/// File name of the sales export.
pub const SALES_CSV_FILE_NAME: &str = "sales-export.csv";

/// File name of the products export.
pub const PRODUCTS_CSV_FILE_NAME: &str = "products-export.csv";

/// MIME type of both CSV exports.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Header row of the sales export.
pub const SALES_CSV_HEADER: [&str; 11] = [
    "Sale ID",
    "Date",
    "Time",
    "Total Amount",
    "Items Count",
    "Customer Cash",
    "Change",
    "Product Name",
    "Quantity",
    "Price",
    "Subtotal",
];

/// Header row of the products export.
pub const PRODUCTS_CSV_HEADER: [&str; 4] = ["ID", "Name", "Price", "Active"];

// =============================================================================
// Display Zone
// =============================================================================

/// Time zone in which sale dates are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    /// The machine's local zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Builds a fixed zone from an offset in minutes east of UTC.
    ///
    /// Returns `None` for offsets of a day or more.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(DisplayZone::Fixed)
    }

    /// Wall-clock time of an instant in this zone.
    pub fn localize(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).naive_local(),
            DisplayZone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }
}

// =============================================================================
// Date Formatting
// =============================================================================

/// Parses a stored `sale_date` into wall-clock time in `zone`.
///
/// Accepts RFC 3339 (the normal case), a naive date-time that is taken as
/// already being wall-clock time, and a bare date taken as UTC midnight.
pub fn parse_sale_date(raw: &str, zone: DisplayZone) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(zone.localize(&instant.with_timezone(&Utc)));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| zone.localize(&midnight.and_utc()))
}

/// Short date, e.g. `Jan 5, 2025`.
pub fn format_sale_date(raw: &str, zone: DisplayZone) -> String {
    match parse_sale_date(raw, zone) {
        Some(when) => when.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Hour and minute, e.g. `09:05 AM`. Blank when the date is unreadable.
pub fn format_sale_time(raw: &str, zone: DisplayZone) -> String {
    parse_sale_date(raw, zone)
        .map(|when| when.format("%I:%M %p").to_string())
        .unwrap_or_default()
}

/// Shortest decimal form: `3`, `10.5`, `0.25`.
pub fn format_amount(amount: f64) -> String {
    format!("{}", amount)
}

fn format_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

// =============================================================================
// Renderers
// =============================================================================

fn csv_writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> ExportResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))
}

fn sale_fields(sale: &Sale, zone: DisplayZone) -> [String; 7] {
    [
        format_id(sale.id),
        format_sale_date(&sale.sale_date, zone),
        format_sale_time(&sale.sale_date, zone),
        format_amount(sale.total_amount),
        sale.items_count.to_string(),
        format_amount(sale.customer_cash.unwrap_or(0.0)),
        format_amount(sale.change.unwrap_or(0.0)),
    ]
}

fn item_fields(item: &SaleItem) -> [String; 4] {
    [
        item.product_name.clone(),
        item.quantity.to_string(),
        format_amount(item.price),
        format_amount(item.subtotal),
    ]
}

/// Renders the sales export.
///
/// For every sale, in the given order, the items whose `sale_id` matches the
/// sale's id produce one row each; a sale without items produces a single row
/// with the item columns blank. Only the first row of a sale repeats the
/// sale-level columns; later rows keep just the Sale ID.
pub fn render_sales_csv(
    sales: &[Sale],
    sale_items: &[SaleItem],
    zone: DisplayZone,
) -> ExportResult<String> {
    let mut writer = csv_writer();
    writer.write_record(SALES_CSV_HEADER)?;

    for sale in sales {
        let items: Vec<&SaleItem> = match sale.id {
            Some(id) => sale_items.iter().filter(|item| item.sale_id == id).collect(),
            None => Vec::new(),
        };
        let head = sale_fields(sale, zone);

        if items.is_empty() {
            let blank = [String::new(), String::new(), String::new(), String::new()];
            writer.write_record(head.iter().chain(blank.iter()))?;
            continue;
        }

        for (index, item) in items.into_iter().enumerate() {
            let line = item_fields(item);
            if index == 0 {
                writer.write_record(head.iter().chain(line.iter()))?;
            } else {
                let mut continuation: [String; 7] = Default::default();
                continuation[0] = head[0].clone();
                writer.write_record(continuation.iter().chain(line.iter()))?;
            }
        }
    }

    finish(writer)
}

/// Renders the products export, `Active` as `Yes`/`No`.
pub fn render_products_csv(products: &[Product]) -> ExportResult<String> {
    let mut writer = csv_writer();
    writer.write_record(PRODUCTS_CSV_HEADER)?;

    for product in products {
        writer.write_record([
            format_id(product.id),
            product.name.clone(),
            format_amount(product.price),
            if product.is_active { "Yes" } else { "No" }.to_string(),
        ])?;
    }

    finish(writer)
}

// =============================================================================
// Unit Tests
// =============================================================================
