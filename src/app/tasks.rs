//! The load cycle: discover spreadsheet files and load them into the store.

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::AppState;
use crate::core::{DirectoryScanner, WorkbookStore};

/// Runs a full load cycle over `state.working_dir` and replaces the store.
///
/// Each file that fails to load gets its own `ShowError` event as soon as it
/// fails. The previous results are dropped, since they may refer to workbooks
/// that are no longer loaded.
pub fn load_workspace<P: EventProxy + ?Sized>(proxy: &P, state: &mut AppState) {
    tracing::info!("LOG: Starting load cycle in {:?}", state.working_dir);

    let scanner = DirectoryScanner::new(&state.config.extension);
    let paths = match scanner.list_candidate_files(&state.working_dir) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::error!("LOG: Directory listing failed: {}", e);
            state.store = WorkbookStore::new();
            state.load_failures.clear();
            state.clear_results();
            state.status_message = format!("Could not read directory: {}", e);
            proxy.send_event(UserEvent::ShowError(state.status_message.clone()));
            return;
        }
    };

    let outcome = WorkbookStore::load_all(&paths, |failure| {
        let name = failure
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| failure.path.display().to_string());
        proxy.send_event(UserEvent::ShowError(format!(
            "Error loading {}: {}",
            name, failure.reason
        )));
    });

    state.store = outcome.store;
    state.load_failures = outcome.failures;
    state.clear_results();
    state.status_message = format!(
        "Loaded {} of {} '{}' files from {}.",
        state.store.len(),
        paths.len(),
        scanner.extension(),
        state.working_dir.display()
    );
    if !state.load_failures.is_empty() {
        state
            .status_message
            .push_str(&format!(" {} could not be read.", state.load_failures.len()));
    }

    tracing::info!("LOG: {}", state.status_message);
    proxy.send_event(UserEvent::StatusUpdate(state.status_message.clone()));
}
