//! The interactive front end: parses input lines into commands and routes
//! them to the handlers in `commands`.

pub mod clipboard;
pub mod commands;
pub mod events;
pub mod helpers;
pub mod presenter;
pub mod proxy;
pub mod state;
pub mod tasks;
pub mod view_model;

use clipboard::ClipboardService;
use events::{Command, UserEvent};
use proxy::EventProxy;
use state::AppState;
use std::path::PathBuf;

/// Parses one input line.
///
/// Lines starting with `:` are commands; anything else is a search keyword,
/// including an empty line.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Search(line.to_string());
    };

    let rest = rest.trim_start();
    let (name, argument) = rest
        .split_once(char::is_whitespace)
        .map(|(name, arg)| (name, arg.trim()))
        .unwrap_or((rest, ""));
    let name = name.to_lowercase();

    if matches!(name.as_str(), "export" | "import") {
        if argument.is_empty() {
            return Command::Unknown(trimmed.to_string());
        }
        let path = PathBuf::from(argument);
        return match name.as_str() {
            "export" => Command::ExportConfig(path),
            _ => Command::ImportConfig(path),
        };
    }

    let row = match argument {
        "" => None,
        arg => match arg.parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => return Command::Unknown(trimmed.to_string()),
        },
    };

    match (name.as_str(), row) {
        ("select" | "s", Some(n)) => Command::Select(n),
        ("copy" | "c", row) => Command::Copy(row),
        ("info" | "i", row) => Command::Info(row),
        ("reload" | "r", None) => Command::Reload,
        ("help" | "h" | "?", None) => Command::Help,
        ("quit" | "q" | "exit", None) => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Handles one line of user input. Returns `false` once the user asked to quit.
pub fn handle_input_line<P, C>(line: &str, clipboard: &C, proxy: &P, state: &mut AppState) -> bool
where
    P: EventProxy + ?Sized,
    C: ClipboardService + ?Sized,
{
    let command = parse_command(line);
    tracing::debug!("Received command: {:?}", command);

    match command {
        Command::Search(keyword) => commands::search(&keyword, proxy, state),
        Command::Select(row) => commands::select_row(row, proxy, state),
        Command::Copy(row) => commands::copy_row(row, clipboard, proxy, state),
        Command::Info(row) => commands::show_file_info(row, proxy, state),
        Command::Reload => commands::reload_workbooks(proxy, state),
        Command::ExportConfig(path) => commands::export_config(&path, proxy, state),
        Command::ImportConfig(path) => commands::import_config(&path, proxy, state),
        Command::Help => commands::show_help(proxy),
        Command::Quit => return false,
        Command::Unknown(text) => {
            tracing::warn!("Unknown command: {}", text);
            proxy.send_event(UserEvent::ShowError(format!(
                "Unknown command '{}'. Type :help for a list of commands.",
                text
            )));
        }
    }
    true
}
