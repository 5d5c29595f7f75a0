use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "faucet-cli")]
#[command(about = "Command-line client for the testnet faucet", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Bot token for /api/v1, or the admin key for `status`
    #[arg(short, long, env = "FAUCET_TOKEN")]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request test currency for a user
    Claim {
        #[arg(long)]
        user: String,
        #[arg(long)]
        network: String,
        #[arg(long)]
        address: String,
    },
    /// List configured networks
    Networks,
    /// Show service status (admin key required)
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.token))?,
    );

    match cli.command {
        Commands::Claim { user, network, address } => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            let res = client
                .post(format!("{}/api/v1/claims", cli.url))
                .headers(headers)
                .json(&json!({ "user_id": user, "network": network, "address": address }))
                .send()
                .await?;
            print_claim(res).await?;
        }
        Commands::Networks => {
            let res = client
                .get(format!("{}/api/v1/networks", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Status => {
            let res = client
                .get(format!("{}/admin/status", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

/// Claims answer 429 and 5xx with a JSON body worth showing.
async fn print_claim(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => {
            if let Some(message) = json.get("message").and_then(Value::as_str) {
                println!("{}", message);
            }
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Err(_) => eprintln!("Error: faucet returned status {}: {}", status, text),
    }
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: faucet returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
