//! CLI client for the Kairan realtime share server.
//!
//! Connects to a share server, shares text and files from the terminal and
//! displays every update broadcast by other sessions.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second
//! interval). Duplicate session_id connections are rejected by the server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kairan-client -- --name Alice
//! cargo run --bin kairan-client -- -n Bob --session-id bob-laptop
//! ```

use clap::Parser;

use kairan_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "CLI client for the Kairan realtime share server", long_about = None)]
struct Args {
    /// Display name shown next to your shares
    #[arg(short = 'n', long)]
    name: String,

    /// Session ID (stable identity; generated by the server when omitted)
    #[arg(short = 's', long)]
    session_id: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3001/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = kairan_client::run_client(args.url, args.session_id, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
