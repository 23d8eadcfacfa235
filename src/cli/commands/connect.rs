//! Gateway connection probe command.

use anyhow::Result;
use terminal_config::AppConfig;
use terminal_gateway::{ConnectionState, FailureReason};

pub async fn run(config: &AppConfig) -> Result<()> {
    let connection = super::build_connection(config);

    println!(
        "Probing vendor gateway as account {}...",
        connection.account_id()
    );
    connection.connect().await;

    match connection.state() {
        ConnectionState::Connected => println!("Connected."),
        ConnectionState::Failed(FailureReason::SdkUnavailable) => {
            println!("Gateway SDK is not available in this build.");
        }
        ConnectionState::Failed(FailureReason::TimedOut) => {
            println!("Probes timed out. Is the vendor trading terminal running?");
        }
        ConnectionState::Failed(FailureReason::ProbeFailed) => {
            println!("Gateway rejected the probe. Check token and account id.");
        }
        state => println!("Connection state: {state:?}"),
    }

    Ok(())
}
