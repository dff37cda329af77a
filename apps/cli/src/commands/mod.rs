//! # Commands Module
//!
//! One `impl App` block per command family.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch, confirmation, stats)
//! ├── product.rs  ◄─── add, edit, delete, list, lookup, share, advice
//! ├── sale.rs     ◄─── record, list, clear
//! ├── report.rs   ◄─── inventory, catalog, sales
//! └── backup.rs   ◄─── export, import
//! ```
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command (clap)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  App::execute ──► family handler                                        │
//! │       │              │                                                  │
//! │       │              ├── pex-core does the work on the loaded state     │
//! │       │              ├── destructive? ask the Confirmer first           │
//! │       │              └── mutated? save the touched collection           │
//! │       ▼                                                                 │
//! │  Result<(), AppError>  ──►  main prints error, sets exit status         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod backup;
pub mod product;
pub mod report;
pub mod sale;

use std::io::Write;

use pex_core::DestructiveAction;
use tracing::info;

use crate::app::App;
use crate::cli::Command;
use crate::error::AppResult;

impl<W: Write> App<W> {
    /// Runs one parsed command.
    pub async fn execute(&mut self, command: Command) -> AppResult<()> {
        match command {
            Command::Product { action } => self.product(action).await,
            Command::Sale { action } => self.sale(action).await,
            Command::Report { kind } => self.report(kind),
            Command::Backup { action } => self.backup(action).await,
            Command::Stats => self.stats(),
        }
    }

    /// Asks for confirmation, then applies and persists the action.
    ///
    /// Returns the number of records removed, `None` when declined.
    pub(crate) async fn run_destructive(
        &mut self,
        action: DestructiveAction,
    ) -> AppResult<Option<usize>> {
        if !self.confirmer.confirm(&action)? {
            info!(action = action.title(), "Cancelled by operator");
            writeln!(self.out, "Cancelled.")?;
            return Ok(None);
        }

        let (products, ledger) = self.state.split_mut();
        let removed = action.apply(products, ledger);

        if action.affects_products() {
            self.state.save_products().await?;
        } else {
            self.state.save_sales().await?;
        }

        info!(action = action.title(), removed, "Destructive action applied");
        Ok(Some(removed))
    }

    /// Dashboard counters.
    fn stats(&mut self) -> AppResult<()> {
        let stats = self.state.products().stats();

        writeln!(self.out, "{} - validity dashboard", self.config.store_name)?;
        writeln!(self.out, "Products: {}", stats.total)?;
        writeln!(self.out, "Expired:  {}", stats.expired)?;
        writeln!(self.out, "Critical: {}", stats.critical)?;
        writeln!(self.out, "Safe:     {}", stats.safe)?;
        writeln!(self.out, "Sales:    {}", self.state.ledger().len())?;

        if stats.alert_count() > 0 {
            writeln!(self.out, "{} item(s) need attention.", stats.alert_count())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pex_core::ProductDraft;
    use pex_db::MemorySnapshotStore;

    use super::*;
    use crate::app::testing::{app, app_with, output, seed, stocked};
    use crate::confirm::PromptConfirmer;

    #[tokio::test]
    async fn test_stats_counts_tiers() {
        let mut app = app().await;
        seed(&mut app, stocked("a", 1, -1));
        seed(&mut app, stocked("b", 1, 10));
        seed(&mut app, stocked("c", 1, 90));
        seed(
            &mut app,
            ProductDraft {
                name: "soro".to_string(),
                barcode: "7891234567890".to_string(),
                catalog: true,
                ..ProductDraft::default()
            },
        );

        app.execute(Command::Stats).await.unwrap();
        let text = output(&mut app);
        assert!(text.contains("Products: 3"));
        assert!(text.contains("Expired:  1"));
        assert!(text.contains("Critical: 1"));
        assert!(text.contains("Safe:     1"));
        assert!(text.contains("2 item(s) need attention."));
    }

    #[tokio::test]
    async fn test_declined_action_changes_nothing() {
        let confirmer = PromptConfirmer::new(std::io::Cursor::new("n\n"), Vec::new());
        let mut app = app_with(Arc::new(MemorySnapshotStore::new()), Box::new(confirmer)).await;
        let id = seed(&mut app, stocked("dipirona", 1, 10));

        let removed = app
            .run_destructive(DestructiveAction::DeleteProduct {
                id: id.clone(),
                name: "DIPIRONA".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(removed, None);
        assert!(app.state.products().get(&id).is_some());
        assert_eq!(output(&mut app), "Cancelled.\n");
    }
}
