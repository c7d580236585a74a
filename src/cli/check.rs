//! CLI handler for the credential and connectivity check.

use anyhow::{Context, Result};
use serde_json::Value;

use super::load_config;
use crate::config::mask;
use crate::zoom::ZoomClient;

pub async fn handle_check_command() -> Result<()> {
    let rule = "=".repeat(50);

    println!("Zoom API connection test\n");
    println!("{}", rule);
    println!("\nChecking environment variables...");

    let config = load_config()?;

    println!("All environment variables are present");
    println!("   - Account ID: {}", mask(&config.credentials.account_id));
    println!("   - Client ID: {}", mask(&config.credentials.client_id));

    let client = ZoomClient::connect(&config)
        .await
        .context("Authentication failed, check the credentials in your .env file")?;
    println!("Access token obtained\n");

    println!("Testing connection to the Zoom API...");
    let user = client
        .current_user()
        .await
        .context("Connection test failed")?;

    println!("Connection successful!\n");
    println!("Account information:");
    println!("   - Email: {}", user.email.as_deref().unwrap_or("N/A"));
    println!("   - Name: {}", user.display_name());
    println!(
        "   - Account type: {}",
        user.account_type
            .as_ref()
            .map(display_value)
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!("   - Status: {}", user.status.as_deref().unwrap_or("N/A"));

    println!("\n{}", rule);
    println!("Connection test completed successfully!");

    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
