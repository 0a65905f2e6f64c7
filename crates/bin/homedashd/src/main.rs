//! # homedashd — home dashboard daemon
//!
//! Composition root that wires the dashboard and runs the headless console.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Register the configured devices
//! - Drive the console and the brightness animation from one event loop
//! - Exit on `quit`, end of input or Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that performs terminal I/O.

mod config;
mod console;

use homedash_app::services::dashboard::Dashboard;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::console::{Command, CommandError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    // Dashboard
    let mut dashboard = Dashboard::new(config.tick_period());
    for seed in &config.devices {
        dashboard.add_device(seed.kind, &seed.id)?;
    }
    tracing::info!(
        devices = dashboard.registry().len(),
        tick = ?dashboard.tick_period(),
        "homedashd ready"
    );
    println!("{}", console::HELP_HINT);

    // Console
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    loop {
        tokio::select! {
            line = console::read_line(&mut stdin, &mut buf) => {
                let Some(line) = line? else {
                    tracing::debug!("end of input");
                    break;
                };
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => match console::execute(&mut dashboard, command) {
                        Ok(output) => println!("{output}"),
                        Err(err) => println!("error: {}", console::describe(&err)),
                    },
                    Err(CommandError::Empty) => {}
                    Err(err) => println!("error: {}", console::describe(&err)),
                }
            }
            running = dashboard.next_tick() => {
                if !running {
                    println!("{}", dashboard.summary());
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted");
                break;
            }
        }
    }

    tracing::info!("homedashd stopped");
    Ok(())
}
