use std::error::Error;
use std::process::Command;
use tracing::{error, info};

use crate::config::DatabaseConfig;

/// Execute the create command
pub async fn execute(name: Option<String>) -> Result<(), Box<dyn Error>> {
    let config = DatabaseConfig::from_env()?;

    // Use provided name or default from config
    let db_name = name.unwrap_or_else(|| config.name.clone());
    if !db_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Invalid database name: {}", db_name).into());
    }

    info!("Creating database: {}", db_name);
    let conn_string = config.server_url();

    let check_output = Command::new("psql")
        .arg(&conn_string)
        .arg("-c")
        .arg(format!("SELECT 1 FROM pg_database WHERE datname = '{}'", db_name))
        .arg("-t")
        .output()
        .inspect_err(|e| error!("Failed to check if database exists: {}", e))?;

    if String::from_utf8_lossy(&check_output.stdout).trim() == "1" {
        info!("Database '{}' already exists", db_name);
        return Ok(());
    }

    let create_output = Command::new("psql")
        .arg(&conn_string)
        .arg("-c")
        .arg(format!("CREATE DATABASE {}", db_name))
        .output()
        .inspect_err(|e| error!("Failed to execute psql command: {}", e))?;

    if create_output.status.success() {
        info!("Database '{}' created successfully", db_name);
        Ok(())
    } else {
        let error_msg = String::from_utf8_lossy(&create_output.stderr);
        error!("Failed to create database: {}", error_msg);
        Err(format!("Failed to create database: {}", error_msg).into())
    }
}
