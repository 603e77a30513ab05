//! # Seed Data Generator
//!
//! Populates the database with a development catalog and customer
//! directory.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p kios-db --bin seed
//!
//! # Limit the catalog size
//! cargo run -p kios-db --bin seed -- --count 20
//!
//! # Specify database path
//! cargo run -p kios-db --bin seed -- --db ./data/kios.db
//! ```
//!
//! ## Generated Data
//! - Products: brand × variant combinations with deterministic tier
//!   pricing (retail > warung > grosir > agen) and opening stock
//! - Customers: warungs, tokos and kiosks spread across sales areas

use std::env;

use kios_core::{Packaging, PriceTier, TierPrices};
use kios_db::{Database, DbConfig, NewCustomer, NewProduct};
use tracing_subscriber::EnvFilter;

/// Cigarette brands and their variants for realistic test data.
const BRANDS: &[(&str, &str, &[&str])] = &[
    ("GG", "Gudang Garam", &["Surya 12", "Surya 16", "International", "Signature"]),
    ("DJ", "Djarum", &["Super 12", "Super 16", "76", "Black"]),
    ("SP", "Sampoerna", &["A Mild 16", "A Mild 12", "Kretek 12", "U Mild"]),
    ("DSS", "Dji Sam Soe", &["Kretek 12", "Magnum 12", "Refill 16"]),
    ("CM", "Class Mild", &["16", "12"]),
    ("LA", "LA Lights", &["16", "12", "Ice 16"]),
];

/// Customer directory entries per sales area.
const CUSTOMERS: &[(&str, &[&str])] = &[
    (
        "Pasar Lama",
        &["Warung Bu Sari", "Toko Jaya", "Kios Pak Budi"],
    ),
    (
        "Terminal",
        &["Warung Pojok", "Toko Berkah", "Kios Mbak Rina"],
    ),
    ("Stasiun", &["Toko Sumber Rezeki", "Warung Pak Dhe"]),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = usize::MAX;
    let mut db_path = String::from("./kios_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(usize::MAX);
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
                println!("Kios POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Maximum products to generate (default: all)");
                println!("  -d, --db <PATH>    Database file path (default: ./kios_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Kios POS Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, schema applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate catalog
    println!();
    println!("Generating catalog...");

    let mut generated = 0;
    for (brand_idx, (code, brand, variants)) in BRANDS.iter().enumerate() {
        for (variant_idx, variant) in variants.iter().enumerate() {
            if generated >= count {
                break;
            }

            let seed = brand_idx * 10 + variant_idx;
            let sku = format!("{}-{:03}", code, seed);
            let retail_rp = 20_000 + ((seed * 1_700) % 15_000) as i64;

            let product = db
                .products()
                .create(NewProduct {
                    sku,
                    name: format!("{brand} {variant}"),
                    category: if variant.contains("Mild") || variant.contains("Lights") {
                        "mild".to_string()
                    } else {
                        "kretek".to_string()
                    },
                    packaging: Packaging::default(),
                    prices: TierPrices {
                        retail_rp,
                        warung_rp: retail_rp - 1_000,
                        grosir_rp: retail_rp - 2_000,
                        agen_rp: retail_rp - 3_000,
                    },
                })
                .await?;

            // Opening stock: a few bal worth, deterministic per product.
            let opening_bks = 200 + ((seed * 37) % 600) as i64;
            db.products()
                .increment_stock(&product.id, opening_bks)
                .await?;

            generated += 1;
        }

        if generated >= count {
            break;
        }
    }

    println!("✓ Generated {} products", generated);

    // Generate customer directory
    println!();
    println!("Generating customers...");

    let mut customers = 0;
    for (area, names) in CUSTOMERS {
        for name in *names {
            db.customers()
                .create(NewCustomer {
                    name: name.to_string(),
                    area: Some(area.to_string()),
                    ..Default::default()
                })
                .await?;
            customers += 1;
        }
    }

    println!("✓ Generated {} customers", customers);

    // Smoke-check search and pricing
    println!();
    let hits = db.products().search("surya", 10).await?;
    println!("  Search 'surya': {} results", hits.len());
    if let Some(product) = hits.first() {
        println!(
            "  {} retail {} / agen {}",
            product.name,
            product.price_for(PriceTier::Retail),
            product.price_for(PriceTier::Agen),
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
