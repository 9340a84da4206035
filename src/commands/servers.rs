//! Servers command handler

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use super::load_config;

pub fn cmd_servers(config_path: Option<&Path>, json: bool) -> Result<u8> {
    let config = load_config(config_path)?;

    if json {
        let servers: Vec<_> = config
            .servers
            .iter()
            .map(|(name, server)| json!({ "name": name, "host": server.host, "root": server.root }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "servers": servers })).unwrap_or_default()
        );
        return Ok(0);
    }

    if config.servers.is_empty() {
        println!("No servers configured.");
        return Ok(0);
    }

    let width = config.servers.keys().map(String::len).max().unwrap_or(0);
    for (name, server) in &config.servers {
        println!("{:<width$}  {}:{}", name, server.host, server.root, width = width);
    }
    Ok(0)
}
