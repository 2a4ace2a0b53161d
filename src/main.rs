//! Vehicle lookup service (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────────┐
//!                     │                 VEHICLE LOOKUP                     │
//!                     │                                                    │
//!   GET /lookup       │  ┌────────┐   ┌──────────────┐   ┌─────────────┐  │
//!   ──────────────────┼─▶│  http  │──▶│ registration │──▶│  upstream   │──┼──▶ DVLA
//!                     │  │ server │   │  normalize   │   │ DvlaClient  │  │    vehicle-enquiry
//!                     │  └────────┘   └──────────────┘   └──────┬──────┘  │
//!                     │       ▲                                 │         │
//!                     │       │        ┌──────────┐   ok  ┌─────▼─────┐   │
//!   VehicleReport     │       └────────│ fallback │◀──err─│  report   │   │
//!   ◀─────────────────┼────────────────│  policy  │       │ projection│   │
//!                     │                └──────────┘       └───────────┘   │
//!                     │                                                    │
//!                     │  config (TOML + env, hot reload) · observability   │
//!                     │  lifecycle (signals, graceful shutdown)            │
//!                     └───────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use vehicle_lookup::lifecycle::{startup, StartupOptions};

#[derive(Parser)]
#[command(name = "vehicle-lookup")]
#[command(about = "Vehicle registration lookup proxy for the DVLA vehicle-enquiry API", long_about = None)]
struct Args {
    /// TOML configuration file (reloaded on change)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overrides the file and PORT
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    startup::run(StartupOptions {
        config_path: args.config,
        port: args.port,
    })
    .await?;

    Ok(())
}
