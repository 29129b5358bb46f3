use std::io;
use std::path::Path;

use crate::cli::parse_assignment;
use crate::client::HTTPClient;
use crate::models::{CLIConfig, ResultEntry};
use crate::render;

pub struct REPL {
    pub config: CLIConfig,
    pub client: HTTPClient,
}

impl REPL {
    pub fn new(config: CLIConfig, client: HTTPClient) -> Self {
        Self { config, client }
    }

    pub fn run(&mut self) {
        render::banner(&self.config);
        loop {
            render::prompt();
            let mut line = String::new();
            match io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('/') {
                if self.handle_command(&line) {
                    break;
                }
                continue;
            }
            self.analyze(Path::new(&line));
        }
    }

    fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("").trim_start_matches('/');
        let rest = parts.next().unwrap_or("").trim();
        match cmd {
            "exit" | "quit" => return true,
            "help" => render::help(),
            "var" => match parse_assignment(rest) {
                Some((name, value)) => {
                    self.config.variables.insert(name, value);
                    render::info("variable set");
                }
                None => render::error("usage: /var name=value"),
            },
            "unset" => {
                if self.config.variables.remove(rest).is_some() {
                    render::info("variable removed");
                } else {
                    render::error("no such variable");
                }
            }
            "vars" => render::variables(&self.config),
            "owner" => {
                if rest.is_empty() {
                    render::info(&format!("owner: {:?}", self.config.owner_id));
                } else {
                    self.config.owner_id = Some(rest.to_string());
                    render::info("owner updated");
                }
            }
            "drawings" => {
                let limit = rest.parse::<usize>().unwrap_or(10);
                self.list_drawings(limit);
            }
            "base" => {
                if rest.is_empty() {
                    render::info(&format!("base: {}", self.config.base_url));
                } else {
                    match HTTPClient::new(rest) {
                        Ok(client) => {
                            self.config.base_url = rest.to_string();
                            self.client = client;
                            render::info("base url updated");
                        }
                        Err(err) => render::error(&err),
                    }
                }
            }
            "config" => render::config(&self.config),
            _ => render::info("unknown command, type /help"),
        }
        false
    }

    pub fn analyze(&mut self, path: &Path) {
        match self.client.calculate(path, &self.config.variables) {
            Ok(entries) => {
                render::results(&entries);
                let learned = remember_assignments(&mut self.config, &entries);
                if learned > 0 {
                    render::info(&format!("{} variable(s) remembered", learned));
                }
            }
            Err(err) => render::error(&err),
        }
    }

    fn list_drawings(&self, limit: usize) {
        let owner = match &self.config.owner_id {
            Some(owner) => owner,
            None => {
                render::error("set an owner first with /owner <id>");
                return;
            }
        };
        match self.client.list_drawings(owner, limit) {
            Ok(items) => render::drawings(&items),
            Err(err) => render::error(&err),
        }
    }
}

/// Assignment results feed the variables sent with the next drawing.
fn remember_assignments(cfg: &mut CLIConfig, entries: &[ResultEntry]) -> usize {
    let mut count = 0;
    for entry in entries.iter().filter(|entry| entry.assign) {
        cfg.variables.insert(entry.expr.clone(), entry.result.clone());
        count += 1;
    }
    count
}
