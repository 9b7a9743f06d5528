//! # Seed Data Generator
//!
//! Populates the database with the demo catalog.
//!
//! ## Usage
//! ```bash
//! cargo run -p storefront-db --bin seed
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//! ```

use std::env;
use storefront_db::{seed_demo_catalog, Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./storefront_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {other}"),
        }
        i += 1;
    }

    println!("Storefront Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let inserted = seed_demo_catalog(&db).await?;
    if inserted == 0 {
        println!("⚠ Catalog already has products, nothing inserted.");
        println!("  Delete the database file to regenerate.");
    } else {
        println!("✓ Inserted {} products", inserted);
    }

    let featured = db.products().featured(5).await?;
    println!("  Featured sample: {} products", featured.len());

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
