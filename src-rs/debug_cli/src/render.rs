use std::io::{self, Write};

use serde_json::Value;

use crate::models::{CLIConfig, DrawingInfo, ResultEntry};

pub fn banner(cfg: &CLIConfig) {
    println!("Drawalyze Debug CLI");
    println!("API: {}", cfg.base_url);
    println!("Type an image path to analyze it, or /help for commands.");
}

pub fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

pub fn help() {
    println!("Commands:");
    println!("  <path>                 Analyze an image file");
    println!("  /help                  Show commands");
    println!("  /exit | /quit          Exit");
    println!("  /var name=value        Set a variable sent with each analysis");
    println!("  /unset <name>          Remove a variable");
    println!("  /vars                  Show variables");
    println!("  /owner <id>            Set owner id for /drawings");
    println!("  /drawings [limit]      List saved drawings of the owner");
    println!("  /base <url>            Update base URL");
    println!("  /config                Show current config");
}

pub fn results(entries: &[ResultEntry]) {
    if entries.is_empty() {
        println!("no results");
        return;
    }
    for entry in entries {
        let result = match &entry.result {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        if entry.assign {
            println!("{} := {}", entry.expr, result);
        } else {
            println!("{} = {}", entry.expr, result);
        }
    }
}

pub fn drawings(items: &[DrawingInfo]) {
    if items.is_empty() {
        println!("no drawings");
        return;
    }
    for item in items {
        println!("[{}] {} ({}) {}", item.created_at, item.title, item.file_id, item.id);
        if !item.description.is_empty() {
            println!("    {}", item.description);
        }
    }
}

pub fn variables(cfg: &CLIConfig) {
    if cfg.variables.is_empty() {
        println!("no variables");
        return;
    }
    for (name, value) in &cfg.variables {
        println!("  {} = {}", name, value);
    }
}

pub fn config(cfg: &CLIConfig) {
    println!("config:");
    println!("  base: {}", cfg.base_url);
    println!("  owner: {}", cfg.owner_id.clone().unwrap_or_default());
    println!("  variables: {}", cfg.variables.len());
}

pub fn info(msg: &str) {
    println!("{}", msg);
}

pub fn error(msg: &str) {
    eprintln!("error: {}", msg);
}
