//! # Sale Commands
//!
//! ```text
//! sale record <id> --seller 998877 --quantity 2
//!     │
//!     ▼
//! SaleLedger::record_sale ──► stock decremented, sale prepended
//!     │                        (stock 0 and not catalog → product removed)
//!     ▼
//! save pex_sales, then pex_inventory
//! ```

use std::io::Write;

use pex_core::report::sales_report;
use pex_core::DestructiveAction;
use tracing::info;

use crate::app::App;
use crate::cli::SaleAction;
use crate::error::AppResult;
use crate::render::render_table;

impl<W: Write> App<W> {
    pub(crate) async fn sale(&mut self, action: SaleAction) -> AppResult<()> {
        match action {
            SaleAction::Record {
                product_id,
                seller,
                quantity,
            } => self.record_sale(&product_id, &seller, quantity).await,
            SaleAction::List { seller } => self.list_sales(seller.as_deref().unwrap_or("")),
            SaleAction::Clear => self.clear_sales().await,
        }
    }

    async fn record_sale(&mut self, product_id: &str, seller: &str, quantity: i64) -> AppResult<()> {
        let now = self.clock.now;
        let (products, ledger) = self.state.split_mut();
        let receipt = ledger.record_sale(products, product_id, seller, quantity, now)?;

        self.state.save_sales().await?;
        self.state.save_products().await?;

        let sale = &receipt.sale;
        info!(
            product = %sale.product_name,
            quantity = sale.quantity,
            seller = %sale.seller_id,
            remaining = receipt.remaining,
            "Sale recorded"
        );

        writeln!(
            self.out,
            "Sold {} x {} (seller {}). Remaining: {}",
            sale.quantity, sale.product_name, sale.seller_id, receipt.remaining
        )?;
        if receipt.product_removed {
            writeln!(self.out, "Stock exhausted: {} removed from the inventory.", sale.product_name)?;
        }
        Ok(())
    }

    fn list_sales(&mut self, seller: &str) -> AppResult<()> {
        let sales = self.state.ledger().by_seller(seller);
        let report = sales_report(sales, seller, self.clock.local_now);
        write!(self.out, "{}", render_table(&report, self.color))?;
        Ok(())
    }

    async fn clear_sales(&mut self) -> AppResult<()> {
        let count = self.state.ledger().len();
        if count == 0 {
            writeln!(self.out, "No sales to clear.")?;
            return Ok(());
        }

        if let Some(removed) = self.run_destructive(DestructiveAction::ClearSales { count }).await? {
            writeln!(self.out, "Cleared {removed} sale(s).")?;
        }
        Ok(())
    }
}
