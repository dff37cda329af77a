//! # Seed Data Generator
//!
//! Populates a database with demo pharmacy products for development.
//!
//! ## Usage
//! ```bash
//! # Default database, 40 products
//! cargo run -p pex-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p pex-db --bin seed -- --count 200 --db ./data/pex.db
//! ```
//!
//! Products are spread over every urgency tier (expired, critical, safe)
//! and every fifth one is a catalog entry.

use chrono::{Duration, Local};
use pex_core::{ProductDraft, ProductStore};
use pex_db::{load_products, save_products, Database, DbConfig, SqliteSnapshotStore};
use std::env;

/// Demo medicine names.
const MEDICINES: &[&str] = &[
    "Dipirona 500mg",
    "Paracetamol 750mg",
    "Ibuprofeno 600mg",
    "Amoxicilina 500mg",
    "Omeprazol 20mg",
    "Losartana 50mg",
    "Loratadina 10mg",
    "Dorflex",
    "Neosaldina",
    "Buscopan Composto",
    "Soro Fisiologico 500ml",
    "Vitamina C 1g",
    "Azitromicina 500mg",
    "Simeticona Gotas",
    "Cetoconazol Creme",
    "Nimesulida 100mg",
];

/// Shelf sections.
const SECTIONS: &[&str] = &["A-1", "A-2", "B-1", "B-3", "C-2", ""];

/// Day offsets relative to today, covering every tier.
const OFFSETS: &[i64] = &[-20, -1, 0, 7, 21, 35, 36, 90, 180, 400];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 40;
    let mut db_path = String::from("./pex_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(40);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("PEX Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 40)");
                println!("  -d, --db <PATH>    Database file path (default: ./pex_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("PEX Seed Data Generator");
    println!("=======================");
    println!("Database: {db_path}");
    println!("Products: {count}");
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let snapshots = SqliteSnapshotStore::new(&db);

    let existing = load_products(&snapshots).await?;
    if !existing.is_empty() {
        println!("Database already has {} products", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    let mut store = ProductStore::new();
    for seed in 0..count {
        store.upsert(demo_draft(seed, today), None, today)?;
    }

    save_products(&snapshots, &store).await?;
    db.close().await;

    let stats = store.stats();
    println!(
        "Generated {} products ({} expired, {} critical, {} safe, {} catalog)",
        store.len(),
        stats.expired,
        stats.critical,
        stats.safe,
        store.len() - stats.total
    );

    Ok(())
}

/// Builds one demo product. Deterministic for a given seed.
fn demo_draft(seed: usize, today: chrono::NaiveDate) -> ProductDraft {
    let name = MEDICINES[seed % MEDICINES.len()];
    let barcode = format!("789{:010}", seed);

    if seed % 5 == 4 {
        return ProductDraft {
            name: name.to_string(),
            barcode,
            catalog: true,
            ..ProductDraft::default()
        };
    }

    ProductDraft {
        name: name.to_string(),
        barcode,
        batch: format!("L{:04}", seed * 7 % 10_000),
        quantity: Some((seed % 12) as i64 + 1),
        expiry_date: Some(today + Duration::days(OFFSETS[seed % OFFSETS.len()])),
        section: SECTIONS[seed % SECTIONS.len()].to_string(),
        registered_by: format!("{:05}", 10_000 + seed % 90_000),
        ..ProductDraft::default()
    }
}
