//! Quote CLI
//!
//! Asks the quote server for the current USD/BRL bid and saves it to a file.
//! Failures are printed; the process still exits normally.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use rates_client::{ClientError, DEFAULT_SERVER_URL, QUOTE_FILE, RatesClient};
use rates_types::Deadline;

#[derive(Parser, Debug)]
#[command(name = "cotacao-client")]
#[command(author, version, about = "Saves the current USD/BRL quote to a file", long_about = None)]
struct Cli {
    /// Base URL of the quote server
    #[arg(long, env = "COTACAO_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// File to overwrite with the quote
    #[arg(long, env = "COTACAO_OUTPUT", default_value = QUOTE_FILE)]
    output: PathBuf,

    /// Deadline for the whole server call, in milliseconds
    #[arg(long, env = "COTACAO_TIMEOUT_MS", default_value_t = 300)]
    timeout_ms: u64,
}

/// Fetches once and writes once; every failure ends the run with a message.
async fn run(cli: &Cli) {
    let client = RatesClient::new(&cli.server_url);
    let deadline = Deadline::after(Duration::from_millis(cli.timeout_ms));

    match client.save_current_rate(&cli.output, deadline).await {
        Ok(_) => {}
        Err(e) => println!("{}", diagnostic(&e)),
    }
}

fn diagnostic(err: &ClientError) -> String {
    if err.is_file_error() {
        format!("Erro: {err}")
    } else {
        format!("Erro: Falha ao obter a cotação do dólar: {err}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    run(&cli).await;

    Ok(())
}
