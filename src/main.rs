//! launchmon - console client for a remote process supervisor
//!
//! This is the binary entry point. All logic lives in the member crates.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use tokio::sync::mpsc;
use url::Url;

use launchmon_api::ApiClient;
use launchmon_app::{spawn_log_stream, ComponentListView, LogEvent, Settings};
use launchmon_core::{logging, LogFilter, LogLevel};

/// Console client for a remote process supervisor
#[derive(Parser, Debug)]
#[command(name = "launchmon")]
#[command(about = "List, start/stop, and tail the logs of supervised components", long_about = None)]
struct Cli {
    /// Supervisor base URL (overrides config file and LAUNCHMON_BASE_URL)
    #[arg(long, value_name = "URL")]
    base_url: Option<Url>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List managed components and their status
    List,
    /// Start a component by name
    Start { name: String },
    /// Stop a component by name
    Stop { name: String },
    /// Continuously tail logs, re-fetching on a fixed cadence
    Tail {
        /// Tail a single component instead of the global log
        #[arg(long, value_name = "NAME")]
        component: Option<String>,
        /// Severity to request: Error, Warning, Info, Debug, or Any
        #[arg(long, default_value = "Any")]
        level: LogLevel,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init()?;

    let settings = Settings::load()?;
    let base_url = match cli.base_url {
        Some(url) => url,
        None => settings
            .base_url
            .parse()
            .wrap_err("invalid base URL in configuration")?,
    };
    let client = ApiClient::new(base_url)?;

    match cli.command {
        Command::List => {
            let mut view = ComponentListView::default();
            view.refresh(&client).await?;
            for component in view.components() {
                println!("{:<24} {}", component.name, component.status);
            }
        }
        Command::Start { name } => {
            launchmon_app::start_component(&client, &name).await?;
            println!("start requested for {name}");
        }
        Command::Stop { name } => {
            launchmon_app::stop_component(&client, &name).await?;
            println!("stop requested for {name}");
        }
        Command::Tail { component, level } => {
            let filter = LogFilter { component, level };
            tail(client, filter, settings.poll_interval()).await;
        }
    }

    Ok(())
}

/// Run the log stream until Ctrl-C, printing each snapshot wholesale.
async fn tail(client: ApiClient, filter: LogFilter, poll_interval: Duration) {
    eprintln!("tailing {filter} (Ctrl-C to stop)");
    let (handle, mut events) = spawn_log_stream(Arc::new(client), filter, poll_interval);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = print_events(&mut events) => {}
    }

    handle.detach().await;
}

async fn print_events(events: &mut mpsc::Receiver<LogEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            LogEvent::Snapshot(lines) => {
                // Each snapshot replaces the previous window; a timestamped
                // rule separates them in the scrollback.
                println!("── {} ──", chrono::Local::now().format("%H:%M:%S"));
                for line in lines {
                    println!("{line}");
                }
            }
            LogEvent::FetchFailed(err) => {
                eprintln!("fetch failed (will retry): {err}");
            }
        }
    }
}
