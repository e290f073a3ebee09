use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "configurator-cli")]
#[command(about = "Command-line client for the semantic router configurator", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// Validate a YAML configuration file
    Validate {
        /// Path to the YAML document
        file: PathBuf,
    },
    /// Generate a configuration from a JSON parameter file
    Generate {
        /// Path to the JSON parameters
        params: PathBuf,
    },
    /// List available templates
    Templates,
    /// Render a template as YAML
    Template {
        /// Template name (basic, cached, secure, multi-model)
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_json(res).await?;
        }
        Commands::Validate { file } => {
            let source = std::fs::read_to_string(&file)?;
            let res = client
                .post(format!("{}/validate", cli.url))
                .json(&json!({ "config": source }))
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Generate { params } => {
            let params: Value = serde_json::from_str(&std::fs::read_to_string(&params)?)?;
            let res = client
                .post(format!("{}/generate", cli.url))
                .json(&params)
                .send()
                .await?;
            print_text(res).await?;
        }
        Commands::Templates => {
            let res = client.get(format!("{}/templates", cli.url)).send().await?;
            print_json(res).await?;
        }
        Commands::Template { name } => {
            let res = client
                .get(format!("{}/templates/{}", cli.url, name))
                .send()
                .await?;
            print_text(res).await?;
        }
    }

    Ok(())
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

async fn print_text(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if status.is_success() {
        print!("{}", text);
    } else {
        eprintln!("Error: service returned status {}", status);
        eprintln!("Response: {}", text);
    }
    Ok(())
}
