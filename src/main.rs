use clap::Parser;
use inboxview::app::{initialize_app, run_app_loop};
use inboxview::cli::Cli;
use inboxview::config::{init_logging, AppConfig};
use inboxview::terminal::{cleanup_terminal, setup_terminal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = AppConfig::from_cli(&cli).await;
    let (state_arc, sources, prompt_rx) = initialize_app(&config);

    let mut terminal = setup_terminal()?;
    let result = run_app_loop(&mut terminal, state_arc, sources, prompt_rx).await;
    cleanup_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Application error: {}", e);
    }
    Ok(())
}
