use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;
use xlsearch::app;
use xlsearch::app::clipboard::TerminalClipboard;
use xlsearch::app::presenter::TerminalPresenter;
use xlsearch::config::AppConfig;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the result table.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    let working_dir = std::env::current_dir()?;

    let presenter = TerminalPresenter;
    let clipboard = TerminalClipboard;
    let mut state = app::state::AppState::new(config, working_dir);

    app::tasks::load_workspace(&presenter, &mut state);
    println!("Type a keyword to search, or :help for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("search> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        if !app::handle_input_line(&line?, &clipboard, &presenter, &mut state) {
            break;
        }
    }

    tracing::info!("LOG: Exiting.");
    Ok(())
}
