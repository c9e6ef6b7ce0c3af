//! Configuration commands for managing carequeue settings.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one value (secrets masked)
//! - `config set`: Set a configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use crate::config::{Config, is_sensitive_key};
use crate::error::{CareQueueError, Result};

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let credentials_configured = config.credentials().is_some();

    if output_json {
        let json_output = json!({
            "server": {
                "base_url": config.server.base_url,
                "spa_base": config.server.spa_base,
            },
            "auth": {
                "username": config.auth.username,
                "credentials_configured": credentials_configured,
            },
            "config_file": Config::config_path().to_string_lossy(),
        });
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }

    println!("{}\n", "Configuration:".cyan().bold());

    println!("{}:", "server".cyan());
    println!("  base_url: {}", config.server.base_url);
    println!("  spa_base: {}", config.server.spa_base);
    println!();

    // Never print the password itself
    println!("{}:", "auth".cyan());
    match &config.auth.username {
        Some(username) => println!("  username: {username}"),
        None => println!("  username: {}", "not configured".dimmed()),
    }
    let status = if credentials_configured {
        "configured".green().to_string()
    } else {
        "not configured".dimmed().to_string()
    };
    println!("  credentials: {status}");
    println!();

    println!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    );
    Ok(())
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    if is_sensitive_key(key) {
        println!("Set {}", key.cyan());
    } else {
        println!("Set {} to {}", key.cyan(), value);
    }
    Ok(())
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;

    let value = config
        .get(key)?
        .ok_or_else(|| CareQueueError::Config(format!("{key} not set")))?;

    if is_sensitive_key(key) {
        let masked = mask_sensitive_value(&value);
        println!("{masked} (masked - showing first 2 and last 2 characters)");
    } else {
        println!("{value}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_sensitive_value_ascii() {
        assert_eq!(mask_sensitive_value("abcdef"), "ab...ef");
        assert_eq!(mask_sensitive_value("Admin123"), "Ad...23");
    }

    #[test]
    fn test_mask_sensitive_value_short() {
        assert_eq!(mask_sensitive_value("abcd"), "****");
        assert_eq!(mask_sensitive_value(""), "****");
    }

    #[test]
    fn test_mask_sensitive_value_multibyte() {
        assert_eq!(mask_sensitive_value("päßwörd"), "pä...rd");
    }
}
