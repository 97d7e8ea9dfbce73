// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the pathcfg crate.
//!
//! This example demonstrates:
//! - Building a store from an embedded document, environment variables and `-D` flags
//! - Retrieving single values, value lists and indexed elements
//! - Type conversions and defaults for missing keys
//! - Materializing a subtree into a `serde` struct
//!
//! To run this example:
//! ```bash
//! # Override a value through the environment
//! export APP_DATABASE_PORT="6543"
//!
//! # Run the example, optionally with command-line definitions
//! cargo run --example basic_usage -- -D app.name=FromCli
//! ```

use pathcfg::prelude::*;
use serde::Deserialize;

const DEFAULTS: &str = "\
app:
  name: MyApplication
  debug: false
database:
  host: localhost
  port: 5432
  replicas:
    - replica-1.local
    - replica-2.local
";

#[derive(Debug, Deserialize)]
struct Database {
    host: String,
    port: u16,
    replicas: Vec<String>,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== pathcfg: Basic Usage ===\n");

    let store = ConfigStore::builder()
        .with_document("defaults", "yml", DEFAULTS)?
        .with_env_prefix("APP_")
        .with_source(Box::new(CommandLineSource::from_env_args()?))
        .build()?;

    println!("Loaded sources: {:?}\n", store.loaded_sources());

    // Example 1: Get a string value
    println!("--- Example 1: String Values ---");
    match store.get_value("app.name") {
        Some(name) => println!("✓ app.name: {}", name),
        None => println!("✗ app.name not found"),
    }

    // Example 2: Every value written for a path, in load order
    println!("\n--- Example 2: Multiple Values ---");
    if let Some(ports) = store.get_values("database.port") {
        println!("✓ database.port values: {:?}", ports);
    }
    match store.get::<u16>("database.port") {
        Ok(Some(port)) => println!("✓ effective database.port: {} (as u16)", port),
        Ok(None) => println!("✗ database.port not found"),
        Err(e) => println!("✗ database.port found but conversion failed: {}", e),
    }

    // Example 3: Indexed elements and lists
    println!("\n--- Example 3: Lists ---");
    println!("✓ second replica: {:?}", store.get_value("database.replicas[1]"));
    println!("✓ all replicas: {:?}", store.get_list::<String>("database.replicas")?);

    // Example 4: Defaults for missing keys
    println!("\n--- Example 4: Defaults ---");
    let timeout = store.get_or::<f64>("api.timeout", 30.0)?;
    println!("✓ api.timeout: {}", timeout);
    let debug = store.get_or::<bool>("app.debug", true)?;
    println!("✓ app.debug: {}", debug);

    // Example 5: Materialize a subtree
    println!("\n--- Example 5: Objects ---");
    let database: Database = store.get_object("database")?;
    println!("✓ {:?}", database);

    // Example 6: Dump everything
    println!("\n--- Example 6: Dump ---");
    print!("{}", store);

    Ok(())
}
