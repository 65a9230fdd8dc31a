//! Service Configuration Example
//!
//! Populates a nested service configuration from an in-memory backend and
//! falls back to `$PORT` for the listen port.
//!
//! Run with:
//! ```bash
//! PORT=8080 cargo run --example service_config
//! ```

use confwalk::{MemoryBackend, Populate, Populator};

#[derive(Debug, Default, Populate)]
struct Api {
    /// Listen port; `$PORT` is used when the backend leaves it at 0.
    #[config(key = "Port", env = "PORT")]
    port: i32,

    #[config(key = "Host", default = "127.0.0.1")]
    host: String,
}

#[derive(Debug, Default, Populate)]
struct Database {
    #[config(key = "URL")]
    url: String,

    #[config(key = "MaxConnections", default = 10)]
    max_connections: i32,
}

#[derive(Debug, Default, Populate)]
struct Configuration {
    #[config(key = "API")]
    api: Api,

    #[config(key = "Database")]
    database: Database,

    #[config(key = "Debug")]
    debug: bool,
}

fn main() -> miette::Result<()> {
    let backend = MemoryBackend::new()
        .with_default("Debug", false)
        .with_value("Database.URL", "postgres://localhost/app")
        .with_value("Debug", "true");

    println!("Keys read by Configuration:");
    for spec in Populator::keys::<Configuration>() {
        println!("  {spec}");
    }

    let config: Configuration = Populator::new(&backend).load()?;

    println!("\n{config:#?}");
    Ok(())
}
