//! # Report Commands
//!
//! Prints a report as a table, or writes it as CSV with `--csv <file>`.

use std::io::Write;
use std::path::Path;

use pex_core::report::{catalog_report, expiry_report, sales_report, Report};
use tracing::info;

use crate::app::App;
use crate::cli::ReportKind;
use crate::error::AppResult;
use crate::render::{render_table, write_csv_file};

impl<W: Write> App<W> {
    pub(crate) fn report(&mut self, kind: ReportKind) -> AppResult<()> {
        let generated_at = self.clock.local_now;

        let (report, csv) = match kind {
            ReportKind::Inventory { filter, csv } => {
                let view = filter.to_filter().apply(self.state.products().products());
                (expiry_report(&view, generated_at), csv)
            }
            ReportKind::Catalog { csv } => {
                (catalog_report(self.state.products().products(), generated_at), csv)
            }
            ReportKind::Sales { seller, csv } => {
                let seller = seller.unwrap_or_default();
                (sales_report(self.state.ledger().sales(), &seller, generated_at), csv)
            }
        };

        match csv {
            Some(path) => self.export_csv(&report, &path),
            None => {
                write!(self.out, "{}", render_table(&report, self.color))?;
                Ok(())
            }
        }
    }

    fn export_csv(&mut self, report: &Report, path: &Path) -> AppResult<()> {
        write_csv_file(report, path)?;
        info!(title = %report.title, rows = report.row_count(), ?path, "Report exported");
        writeln!(
            self.out,
            "Wrote {} row(s) to {}",
            report.row_count(),
            path.display()
        )?;
        Ok(())
    }
}
