use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "probe-cli")]
#[command(about = "CLI for driving a running api-probe service", long_about = None)]
struct Cli {
    /// Base URL of the api-probe service.
    #[arg(short, long, default_value = "http://localhost:8080")]
    service: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service status
    Status,
    /// Run one probe against a target endpoint
    Probe {
        /// Target URL
        url: String,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request headers, as name:value
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Query parameters, as name=value
        #[arg(short, long = "query")]
        queries: Vec<String>,

        /// JSON test payload for body-bearing methods
        #[arg(short, long)]
        data: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/status", cli.service)).send().await?;
            print_response(res).await?;
        }
        Commands::Probe {
            url,
            method,
            headers,
            queries,
            data,
        } => {
            let mut header_map = Map::new();
            for header in &headers {
                match header.split_once(':') {
                    Some((name, value)) => {
                        header_map.insert(
                            name.trim().to_string(),
                            Value::String(value.trim().to_string()),
                        );
                    }
                    None => eprintln!("Ignoring malformed header '{header}', expected name:value"),
                }
            }

            let mut query_map = Map::new();
            for query in &queries {
                match query.split_once('=') {
                    Some((name, value)) => {
                        query_map.insert(name.to_string(), Value::String(value.to_string()));
                    }
                    None => eprintln!("Ignoring malformed query '{query}', expected name=value"),
                }
            }

            let test_data = match &data {
                Some(raw) => Some(serde_json::from_str::<Value>(raw)?),
                None => None,
            };

            let body = json!({
                "config": {
                    "baseUrl": url,
                    "method": method.to_uppercase(),
                    "headers": header_map,
                    "queryParams": query_map,
                },
                "testData": test_data,
            });

            let res = client
                .post(format!("{}/probe", cli.service))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Service returned status {}", status);
    }
    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
