//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::run_client_session,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the WebSocket client with reconnection logic
pub async fn run_client(
    url: String,
    session_id: Option<String>,
    display_name: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            display_name,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, session_id.as_deref(), &display_name).await {
            Ok(_) => {
                tracing::info!("Client session ended normally");
                // If connection ended normally (user exit), don't reconnect
                break;
            }
            Err(e) => {
                let client_error = e
                    .downcast_ref::<ClientError>()
                    .cloned()
                    .unwrap_or_else(|| ClientError::ConnectionError(e.to_string()));

                if should_exit_immediately(&client_error) {
                    tracing::error!("{}", client_error);
                    tracing::error!(
                        "Cannot connect because the session id is already in use. Exiting."
                    );
                    std::process::exit(1);
                }

                tracing::warn!("Connection lost: {}", client_error);

                if !should_attempt_reconnect(&client_error, reconnect_count, MAX_RECONNECT_ATTEMPTS)
                {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    std::process::exit(1);
                }

                reconnect_count += 1;
                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
