//! Contains all the command handlers that are reachable from the input loop.
//!
//! Each function in this module corresponds to a specific `Command`.
//! These handlers are responsible for interacting with the `AppState` and the `core`
//! logic, and for sending `UserEvent`s back to the presenter.

use super::clipboard::ClipboardService;
use super::events::UserEvent;
use super::helpers::with_state_and_notify;
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks::load_workspace;
use super::view_model::row_as_tsv;
use crate::config::settings;
use crate::core::{MetadataProbe, SearchEngine};
use std::path::Path;

pub const HELP_TEXT: &str = "Type a keyword and press Enter to search all loaded sheets.
Commands:
  :select N   highlight result row N
  :copy [N]   copy row N (or the highlighted row) to the clipboard
  :info [N]   show file details for row N (or the highlighted row)
  :reload     load all spreadsheet files again
  :export F   write the current settings to file F
  :import F   read settings from file F and reload
  :help       show this help
  :quit       exit";

/// Runs a fresh load cycle. Results and selection are cleared.
pub fn reload_workbooks<P: EventProxy + ?Sized>(proxy: &P, state: &mut AppState) {
    tracing::info!("LOG: Reload requested.");
    load_workspace(proxy, state);
}

/// Searches every loaded sheet and replaces the result table.
///
/// A blank keyword only produces an informational prompt. If the search
/// fails, the previous results stay on screen and a single error is shown.
pub fn search<P: EventProxy + ?Sized>(keyword: &str, proxy: &P, state: &mut AppState) {
    let options = state.config.search_options();

    match SearchEngine::search(keyword, &state.store, &options) {
        Ok(results) => with_state_and_notify(state, proxy, |s| {
            s.status_message = format!(
                "Found {} matching rows for '{}'.",
                results.len(),
                keyword.trim()
            );
            s.last_query = keyword.trim().to_string();
            s.results = results;
            s.selected_row = None;
        }),
        Err(e) if e.is_empty_keyword() => {
            proxy.send_event(UserEvent::ShowInfo(e.to_string()));
        }
        Err(e) => {
            tracing::error!("Search for '{}' failed: {}", keyword, e);
            proxy.send_event(UserEvent::ShowError(format!(
                "An error occurred during search: {}",
                e
            )));
        }
    }
}

/// Highlights the one-based result row `row`.
pub fn select_row<P: EventProxy + ?Sized>(row: usize, proxy: &P, state: &mut AppState) {
    if let Err(message) = state.result_at(Some(row)) {
        proxy.send_event(UserEvent::ShowError(message));
        return;
    }
    with_state_and_notify(state, proxy, |s| {
        s.selected_row = Some(row - 1);
    });
}

/// Copies a result row as tab-separated text: file, sheet, then the cells.
pub fn copy_row<P, C>(row: Option<usize>, clipboard: &C, proxy: &P, state: &AppState)
where
    P: EventProxy + ?Sized,
    C: ClipboardService + ?Sized,
{
    let record = match state.result_at(row) {
        Ok(record) => record,
        Err(message) => {
            proxy.send_event(UserEvent::ShowInfo(message));
            return;
        }
    };

    let text = row_as_tsv(record);
    match clipboard.set_text(&text) {
        Ok(()) => proxy.send_event(UserEvent::CopiedToClipboard(text)),
        Err(e) => {
            tracing::warn!("Failed to copy row to clipboard: {}", e);
            proxy.send_event(UserEvent::ShowError(format!(
                "Failed to copy to clipboard: {}",
                e
            )));
        }
    }
}

/// Shows path, size, timestamps and author of the file a result row came from.
pub fn show_file_info<P: EventProxy + ?Sized>(row: Option<usize>, proxy: &P, state: &AppState) {
    let record = match state.result_at(row) {
        Ok(record) => record,
        Err(message) => {
            proxy.send_event(UserEvent::ShowInfo(message));
            return;
        }
    };

    match MetadataProbe::probe(&record.file) {
        Ok(metadata) => proxy.send_event(UserEvent::ShowMetadata(Box::new(metadata))),
        Err(e) => {
            tracing::warn!("Failed to read file info for {:?}: {}", record.file, e);
            proxy.send_event(UserEvent::ShowError(format!(
                "Could not read file info: {}",
                e
            )));
        }
    }
}

pub fn export_config<P: EventProxy + ?Sized>(path: &Path, proxy: &P, state: &AppState) {
    match settings::export_config(&state.config, path) {
        Ok(()) => proxy.send_event(UserEvent::ShowInfo(format!(
            "Exported configuration to {}",
            path.display()
        ))),
        Err(e) => {
            tracing::error!("Failed to export config to {:?}: {}", path, e);
            proxy.send_event(UserEvent::ShowError(format!(
                "Failed to export config: {}",
                e
            )));
        }
    }
}

/// Replaces the active configuration and runs a load cycle with it, since the
/// extension filter may have changed.
pub fn import_config<P: EventProxy + ?Sized>(path: &Path, proxy: &P, state: &mut AppState) {
    match settings::import_config(path) {
        Ok(config) => {
            state.config = config;
            proxy.send_event(UserEvent::ShowInfo(format!(
                "Imported configuration from {}",
                path.display()
            )));
            load_workspace(proxy, state);
        }
        Err(e) => {
            tracing::error!("Failed to import config from {:?}: {}", path, e);
            proxy.send_event(UserEvent::ShowError(format!(
                "Failed to import config: {}",
                e
            )));
        }
    }
}

pub fn show_help<P: EventProxy + ?Sized>(proxy: &P) {
    proxy.send_event(UserEvent::ShowInfo(HELP_TEXT.to_string()));
}
