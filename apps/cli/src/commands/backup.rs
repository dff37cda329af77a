//! # Backup Commands
//!
//! ```text
//! backup export [file]  ──► { "products": [...], "soldProducts": [...] }
//! backup import <file>  ──► parse whole file ──► replace present collections
//!                                                 ──► save what was replaced
//! ```
//!
//! A file that fails to parse leaves the stored state untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use pex_core::Backup;
use tracing::info;

use crate::app::App;
use crate::cli::BackupAction;
use crate::error::AppResult;

impl<W: Write> App<W> {
    pub(crate) async fn backup(&mut self, action: BackupAction) -> AppResult<()> {
        match action {
            BackupAction::Export { file } => self.export_backup(file),
            BackupAction::Import { file } => self.import_backup(&file).await,
        }
    }

    fn export_backup(&mut self, file: Option<PathBuf>) -> AppResult<()> {
        let path = file.unwrap_or_else(|| PathBuf::from(Backup::file_name(self.clock.today)));
        let backup = Backup::capture(self.state.products(), self.state.ledger());
        std::fs::write(&path, backup.to_json()?)?;

        info!(?path, "Backup exported");
        writeln!(
            self.out,
            "Backup written to {} ({} product(s), {} sale(s))",
            path.display(),
            self.state.products().len(),
            self.state.ledger().len()
        )?;
        Ok(())
    }

    async fn import_backup(&mut self, path: &Path) -> AppResult<()> {
        let json = std::fs::read_to_string(path)?;
        let backup = Backup::parse(&json)?;

        let (products, ledger) = self.state.split_mut();
        let (products_replaced, sales_replaced) = backup.apply(products, ledger);

        if products_replaced {
            self.state.save_products().await?;
        }
        if sales_replaced {
            self.state.save_sales().await?;
        }

        info!(?path, products_replaced, sales_replaced, "Backup imported");
        writeln!(
            self.out,
            "Backup restored: {} product(s), {} sale(s).",
            self.state.products().len(),
            self.state.ledger().len()
        )?;
        Ok(())
    }
}
