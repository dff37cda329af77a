//! # Reports
//!
//! Renderer-agnostic report models. The CLI prints them as a text table or
//! writes them as CSV; this module only decides titles, columns, row order
//! and the per-row status tone.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ PEX - EXPIRY REPORT             (title)    │
//! │ Generated at 16/10/2026 14:30   (subtitle) │
//! ├────────┬──────┬─────┬────────┬──────┬──────┤
//! │ CODE   │ NAME │ QTY │ EXPIRY │ DAYS │ ...  │  columns
//! ├────────┼──────┼─────┼────────┼──────┼──────┤
//! │ ...    │      │     │        │      │      │  rows (tone = status)
//! └────────┴──────┴─────┴────────┴──────┴──────┘
//!   Total items monitored: N                      footer
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{ExpiryStatus, Product, SoldProduct};

const DATE_FORMAT: &str = "%d/%m/%Y";
const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub cells: Vec<String>,
    /// Status tier used for highlighting, when the report has one.
    pub tone: Option<ExpiryStatus>,
}

/// A rendered-independent report document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub subtitle: String,
    pub generated_at: NaiveDateTime,
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
    pub footer: String,
}

impl Report {
    fn new(title: &str, subtitle: String, generated_at: NaiveDateTime, columns: &[&str]) -> Self {
        Report {
            title: title.to_string(),
            subtitle,
            generated_at,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            footer: String::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Expiry report over an already filtered product list. Catalog entries are
/// skipped.
pub fn expiry_report(products: &[Product], generated_at: NaiveDateTime) -> Report {
    let mut report = Report::new(
        "PEX - EXPIRY REPORT",
        format!("Generated at {}", generated_at.format(DATE_TIME_FORMAT)),
        generated_at,
        &["CODE", "PRODUCT", "QTY", "EXPIRY", "DAYS", "STATUS", "REGISTRATION"],
    );

    report.rows = products
        .iter()
        .filter(|p| !p.is_catalog())
        .map(|p| ReportRow {
            cells: vec![
                p.barcode.clone(),
                p.name.to_uppercase(),
                p.quantity.to_string(),
                format_date(p.expiry_date()),
                p.days_to_expiry().to_string(),
                p.status().to_string(),
                dash_if_empty(&p.registered_by),
            ],
            tone: Some(p.status()),
        })
        .collect();
    report.footer = format!("Total items monitored: {}", report.rows.len());
    report
}

/// Barcode/name listing of every product, sorted by name.
pub fn catalog_report(products: &[Product], generated_at: NaiveDateTime) -> Report {
    let mut report = Report::new(
        "PEX - PRODUCT REPORT",
        format!(
            "Barcode/name lookup | Generated at {}",
            generated_at.format(DATE_TIME_FORMAT)
        ),
        generated_at,
        &["BARCODE (EAN)", "PRODUCT NAME"],
    );

    let mut sorted: Vec<&Product> = products.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    report.rows = sorted
        .into_iter()
        .map(|p| ReportRow {
            cells: vec![
                if p.barcode.is_empty() {
                    "NO CODE".to_string()
                } else {
                    p.barcode.clone()
                },
                p.name.to_uppercase(),
            ],
            tone: None,
        })
        .collect();
    report.footer = format!("Total products listed: {}", report.rows.len());
    report
}

/// Working view of the inventory: one row per entry with its id, in the
/// order given. Catalog entries show "-" for expiry and days.
pub fn inventory_listing(products: &[Product], generated_at: NaiveDateTime) -> Report {
    let mut report = Report::new(
        "PEX - INVENTORY",
        format!("Generated at {}", generated_at.format(DATE_TIME_FORMAT)),
        generated_at,
        &["ID", "CODE", "PRODUCT", "BATCH", "QTY", "EXPIRY", "DAYS", "STATUS", "SECTION"],
    );

    report.rows = products
        .iter()
        .map(|p| {
            let (expiry, days, tone) = if p.is_catalog() {
                ("-".to_string(), "-".to_string(), None)
            } else {
                (
                    format_date(p.expiry_date()),
                    p.days_to_expiry().to_string(),
                    Some(p.status()),
                )
            };
            ReportRow {
                cells: vec![
                    p.id.clone(),
                    dash_if_empty(&p.barcode),
                    p.name.clone(),
                    dash_if_empty(&p.batch),
                    p.quantity.to_string(),
                    expiry,
                    days,
                    if p.is_catalog() { "CATALOG".to_string() } else { p.status().to_string() },
                    dash_if_empty(&p.section),
                ],
                tone,
            }
        })
        .collect();
    report.footer = format!("{} item(s)", report.rows.len());
    report
}

/// Sales history, optionally narrowed to sellers whose registration
/// contains `seller`, matched as typed.
pub fn sales_report<'a, I>(sales: I, seller: &str, generated_at: NaiveDateTime) -> Report
where
    I: IntoIterator<Item = &'a SoldProduct>,
{
    let seller = seller.trim();
    let subtitle = if seller.is_empty() {
        format!("Sales history | Generated at {}", generated_at.format(DATE_TIME_FORMAT))
    } else {
        format!(
            "Sales history | Seller: {} | Generated at {}",
            seller.to_uppercase(),
            generated_at.format(DATE_TIME_FORMAT)
        )
    };
    let mut report = Report::new(
        "PEX - SALES REPORT",
        subtitle,
        generated_at,
        &["DATE/TIME", "PRODUCT", "BATCH", "QTY", "SELLER"],
    );

    report.rows = sales
        .into_iter()
        .filter(|s| seller.is_empty() || s.seller_id.contains(seller))
        .map(|s| ReportRow {
            cells: vec![
                s.sale_date.format(DATE_TIME_FORMAT).to_string(),
                s.product_name.to_uppercase(),
                if s.batch.is_empty() {
                    "N/A".to_string()
                } else {
                    s.batch.clone()
                },
                s.quantity.to_string(),
                s.seller_id.to_uppercase(),
            ],
            tone: None,
        })
        .collect();
    report.footer = format!("Total sales recorded: {}", report.rows.len());
    report
}

/// Plain-text summary of one product, for pasting into a chat or e-mail.
pub fn share_text(product: &Product) -> String {
    let expiry = if product.is_catalog() {
        "-".to_string()
    } else {
        format_date(product.expiry_date())
    };
    format!(
        "Product: {}\nBatch: {}\nCode: {}\nExpiry: {}\nStatus: {}",
        product.name,
        if product.batch.is_empty() { "N/A" } else { &product.batch },
        product.barcode,
        expiry,
        product.status(),
    )
}

/// `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn dash_if_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SaleLedger;
    use crate::store::{ProductDraft, ProductStore};
    use chrono::{Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn generated_at() -> NaiveDateTime {
        today().and_hms_opt(14, 30, 0).unwrap()
    }

    fn store() -> ProductStore {
        let mut store = ProductStore::new();
        store
            .upsert(
                ProductDraft {
                    name: "zinco".to_string(),
                    barcode: "7890000000001".to_string(),
                    quantity: Some(3),
                    expiry_date: Some(today() - Duration::days(2)),
                    registered_by: "123".to_string(),
                    ..ProductDraft::default()
                },
                None,
                today(),
            )
            .unwrap();
        store
            .upsert(
                ProductDraft {
                    name: "aspirina".to_string(),
                    catalog: true,
                    ..ProductDraft::default()
                },
                None,
                today(),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_inventory_listing_keeps_catalog_untoned() {
        let store = store();
        let report = inventory_listing(store.products(), generated_at());
        assert_eq!(report.row_count(), 2);

        let catalog = &report.rows[1];
        assert_eq!(catalog.cells[2], "ASPIRINA");
        assert_eq!(catalog.cells[5], "-");
        assert_eq!(catalog.cells[7], "CATALOG");
        assert_eq!(catalog.tone, None);
        assert_eq!(report.rows[0].cells[0], store.products()[0].id);
        assert_eq!(report.footer, "2 item(s)");
    }

    #[test]
    fn test_expiry_report_skips_catalog_and_sets_tone() {
        let report = expiry_report(store().products(), generated_at());
        assert_eq!(report.columns.len(), 7);
        assert_eq!(report.row_count(), 1);

        let row = &report.rows[0];
        assert_eq!(row.tone, Some(ExpiryStatus::Expired));
        assert_eq!(row.cells[1], "ZINCO");
        assert_eq!(row.cells[3], "14/10/2026");
        assert_eq!(row.cells[4], "-2");
        assert_eq!(row.cells[5], "EXPIRED");
        assert_eq!(report.footer, "Total items monitored: 1");
        assert!(report.subtitle.contains("16/10/2026 14:30:00"));
    }

    #[test]
    fn test_catalog_report_sorts_by_name_and_marks_missing_code() {
        let report = catalog_report(store().products(), generated_at());
        let names: Vec<&str> = report.rows.iter().map(|r| r.cells[1].as_str()).collect();
        assert_eq!(names, vec!["ASPIRINA", "ZINCO"]);
        assert_eq!(report.rows[0].cells[0], "NO CODE");
        assert_eq!(report.footer, "Total products listed: 2");
    }

    #[test]
    fn test_sales_report_filters_by_seller() {
        let mut store = store();
        let mut ledger = SaleLedger::new();
        let id = store.products()[0].id.clone();
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap();
        ledger.record_sale(&mut store, &id, "111", 1, at).unwrap();
        ledger.record_sale(&mut store, &id, "222", 1, at).unwrap();

        let all = sales_report(ledger.sales(), "", generated_at());
        assert_eq!(all.row_count(), 2);

        let filtered = sales_report(ledger.sales(), "22", generated_at());
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.rows[0].cells[2], "N/A");
        assert_eq!(filtered.rows[0].cells[4], "222");
        assert!(filtered.subtitle.contains("Seller: 22"));
    }

    #[test]
    fn test_sales_report_seller_filter_is_case_sensitive() {
        let mut store = store();
        let mut ledger = SaleLedger::new();
        let id = store.products()[0].id.clone();
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap();
        ledger.record_sale(&mut store, &id, "RX-9", 1, at).unwrap();

        assert_eq!(sales_report(ledger.sales(), "RX", generated_at()).row_count(), 1);
        assert_eq!(sales_report(ledger.sales(), "rx", generated_at()).row_count(), 0);
    }

    #[test]
    fn test_share_text() {
        let store = store();
        let text = share_text(&store.products()[0]);
        assert_eq!(
            text,
            "Product: ZINCO\nBatch: N/A\nCode: 7890000000001\nExpiry: 14/10/2026\nStatus: EXPIRED"
        );
    }
}
