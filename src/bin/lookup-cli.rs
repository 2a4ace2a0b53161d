use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "lookup-cli")]
#[command(about = "Command-line client for the vehicle lookup service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5050")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a registration and print the report
    Lookup {
        /// Registration, spaces allowed
        reg: String,
    },
    /// Check service liveness
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Lookup { reg } => {
            let res = client
                .get(format!("{}/lookup", base))
                .query(&[("reg", reg.as_str())])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/", base)).send().await?;
            let status = res.status();
            let text = res.text().await?;
            if status.is_success() {
                println!("{}", text);
            } else {
                eprintln!("Error: service returned status {}", status);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
    } else {
        eprintln!("Error: service returned status {}", status);
        eprintln!("{}", rendered);
        std::process::exit(1);
    }
    Ok(())
}
