use clap::Parser;
use flipscan::adapter::bazaar::BazaarClient;
use flipscan::app::Scanner;
use flipscan::cli::Cli;
use owo_colors::Stream;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("flipscan starting");

    let source = BazaarClient::from_config(&config.source);
    let mut scanner = Scanner::new(&config, Box::new(source));

    if cli.once {
        let report = scanner.scan_once().await;
        if let Err(e) = report.render(&mut std::io::stdout(), Some(Stream::Stdout)) {
            error!(error = %e, "Failed to write report");
            std::process::exit(1);
        }
        if let Err(e) = report.ensure_refreshed() {
            error!(error = %e, "Catalogue refresh failed");
            std::process::exit(2);
        }
        return;
    }

    tokio::select! {
        () = scanner.run(|report| {
            if let Err(e) = report.render(&mut std::io::stdout(), Some(Stream::Stdout)) {
                error!(error = %e, "Failed to write report");
            }
        }) => {}
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("flipscan stopped");
}
