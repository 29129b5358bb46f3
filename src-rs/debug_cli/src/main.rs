mod cli;
mod client;
mod models;
mod repl;
mod render;

use std::process::ExitCode;

use client::HTTPClient;
use repl::REPL;

fn main() -> ExitCode {
    let config = cli::parse_config();
    let client = match HTTPClient::new(&config.base_url) {
        Ok(client) => client,
        Err(err) => {
            render::error(&err);
            return ExitCode::FAILURE;
        }
    };

    // A path on the command line means one analysis and exit.
    if let Some(image) = config.image.clone() {
        return match client.calculate(&image, &config.variables) {
            Ok(entries) => {
                render::results(&entries);
                ExitCode::SUCCESS
            }
            Err(err) => {
                render::error(&err);
                ExitCode::FAILURE
            }
        };
    }

    let mut repl = REPL::new(config, client);
    repl.run();
    ExitCode::SUCCESS
}
