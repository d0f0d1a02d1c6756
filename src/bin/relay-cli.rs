use clap::Parser;
use prompt_relay::relay::RelayResponse;
use serde_json::json;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Send a prompt to a running prompt relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Prompt text to complete.
    prompt: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client
        .post(&cli.url)
        .json(&json!({ "prompt": cli.prompt }))
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let body: RelayResponse = res.json().await?;
    println!("{}", body.response);
    Ok(())
}
