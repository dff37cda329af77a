//! # Product Commands
//!
//! Registration, editing, removal and the inventory view.
//!
//! ## Registration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product add --barcode 7891234567890 --expiry 2027-01-01 --quantity 5   │
//! │       │                                                                 │
//! │       ├── no --name? look the barcode up (catalog entry wins)           │
//! │       │      found → name filled in                                     │
//! │       ▼                                                                 │
//! │  ProductStore::upsert                                                   │
//! │       ├── catalog + barcode already cataloged → merged into it          │
//! │       ├── otherwise → appended                                          │
//! │       ▼                                                                 │
//! │  save pex_inventory                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::io::Write;

use pex_core::report::{inventory_listing, share_text};
use pex_core::validation::parse_expiry_date;
use pex_core::{DestructiveAction, ProductDraft, UpsertOutcome};
use tracing::{debug, info};

use crate::app::App;
use crate::cli::{FilterArgs, ProductAction, ProductArgs};
use crate::error::{AppError, AppResult};
use crate::render::render_table;

/// Copies the given options onto `draft`; omitted options leave it as is.
///
/// An explicit `--expiry` without `--catalog` turns the draft into a
/// stocked entry.
fn apply_args(draft: &mut ProductDraft, args: ProductArgs) -> AppResult<()> {
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(barcode) = args.barcode {
        draft.barcode = barcode;
    }
    if let Some(batch) = args.batch {
        draft.batch = batch;
    }
    if let Some(quantity) = args.quantity {
        draft.quantity = Some(quantity);
    }
    if let Some(expiry) = args.expiry {
        draft.expiry_date = Some(parse_expiry_date(&expiry)?);
        draft.catalog = args.catalog;
    } else if args.catalog {
        draft.catalog = true;
    }
    if let Some(section) = args.section {
        draft.section = section;
    }
    if let Some(transfer) = args.transfer {
        draft.transfer = transfer;
    }
    if let Some(observations) = args.observations {
        draft.observations = observations;
    }
    if let Some(registered_by) = args.registered_by {
        draft.registered_by = registered_by;
    }
    Ok(())
}

impl<W: Write> App<W> {
    pub(crate) async fn product(&mut self, action: ProductAction) -> AppResult<()> {
        match action {
            ProductAction::Add(args) => self.add_product(args).await,
            ProductAction::Edit { id, fields } => self.edit_product(&id, fields).await,
            ProductAction::Delete { ids } => self.delete_products(ids).await,
            ProductAction::List(filter) => self.list_products(&filter),
            ProductAction::Lookup { barcode } => self.lookup_barcode(&barcode),
            ProductAction::Share { id } => self.share_product(&id),
            ProductAction::Advice { id } => self.product_advice(&id).await,
        }
    }

    async fn add_product(&mut self, args: ProductArgs) -> AppResult<()> {
        let mut draft = ProductDraft::default();
        apply_args(&mut draft, args)?;

        if draft.name.trim().is_empty() {
            if let Some(found) = self.state.products().lookup_barcode(&draft.barcode) {
                debug!(barcode = %draft.barcode, name = %found.name, "Name filled from barcode");
                writeln!(self.out, "Name filled from barcode: {}", found.name)?;
                draft.name = found.name.clone();
            }
        }

        let outcome = self
            .state
            .products_mut()
            .upsert(draft, None, self.clock.today)?;
        self.state.save_products().await?;

        self.report_outcome(&outcome)
    }

    async fn edit_product(&mut self, id: &str, args: ProductArgs) -> AppResult<()> {
        let existing = self
            .state
            .products()
            .get(id)
            .ok_or_else(|| AppError::not_found("Product", id))?;

        let mut draft = ProductDraft::from(existing);
        apply_args(&mut draft, args)?;

        let outcome = self
            .state
            .products_mut()
            .upsert(draft, Some(id), self.clock.today)?;
        self.state.save_products().await?;

        self.report_outcome(&outcome)
    }

    fn report_outcome(&mut self, outcome: &UpsertOutcome) -> AppResult<()> {
        let id = outcome.id();
        let name = self
            .state
            .products()
            .get(id)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        let verb = match outcome {
            UpsertOutcome::Created(_) => "Registered",
            UpsertOutcome::Updated(_) => "Updated",
            UpsertOutcome::CatalogMerged(_) => "Catalog entry updated",
        };
        info!(%id, %name, verb, "Product saved");
        writeln!(self.out, "{verb}: {name} ({id})")?;
        Ok(())
    }

    async fn delete_products(&mut self, ids: Vec<String>) -> AppResult<()> {
        let mut seen = HashSet::new();
        let (mut existing, unknown): (Vec<String>, Vec<String>) = ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .partition(|id| self.state.products().get(id).is_some());

        if existing.is_empty() {
            return Err(AppError::not_found("Product", &unknown.join(", ")));
        }
        for id in &unknown {
            writeln!(self.out, "Skipping unknown product {id}.")?;
        }

        let action = if existing.len() == 1 {
            let id = existing.remove(0);
            let name = self
                .state
                .products()
                .get(&id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            DestructiveAction::DeleteProduct { id, name }
        } else {
            DestructiveAction::DeleteMany { ids: existing }
        };
        if let Some(removed) = self.run_destructive(action).await? {
            writeln!(self.out, "Removed {removed} product(s).")?;
        }
        Ok(())
    }

    fn list_products(&mut self, args: &FilterArgs) -> AppResult<()> {
        let filter = args.to_filter();
        let view = filter.apply(self.state.products().products());
        debug!(shown = view.len(), total = self.state.products().len(), "Inventory view");

        let report = inventory_listing(&view, self.clock.local_now);
        write!(self.out, "{}", render_table(&report, self.color))?;

        let active = filter.active_count();
        if active > 0 {
            writeln!(self.out, "{active} filter(s) active.")?;
        }
        Ok(())
    }

    fn lookup_barcode(&mut self, barcode: &str) -> AppResult<()> {
        match self.state.products().lookup_barcode(barcode) {
            Some(product) => {
                let origin = if product.is_catalog() { "catalog" } else { "inventory" };
                writeln!(self.out, "{} ({origin})", product.name)?;
            }
            None => writeln!(self.out, "No product registered for {}", barcode.trim())?,
        }
        Ok(())
    }

    fn share_product(&mut self, id: &str) -> AppResult<()> {
        let product = self
            .state
            .products()
            .get(id)
            .ok_or_else(|| AppError::not_found("Product", id))?;
        writeln!(self.out, "{}", share_text(product))?;
        Ok(())
    }

    async fn product_advice(&mut self, id: &str) -> AppResult<()> {
        let product = self
            .state
            .products()
            .get(id)
            .ok_or_else(|| AppError::not_found("Product", id))?;
        let (name, status) = (product.name.clone(), product.status());

        let text = self.advice.advice(&name, status).await;
        writeln!(self.out, "{name} - {status}")?;
        writeln!(self.out)?;
        writeln!(self.out, "{text}")?;
        Ok(())
    }
}
