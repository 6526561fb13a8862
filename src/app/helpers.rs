//! Contains helper functions to reduce boilerplate code in other `app` modules.

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::generate_result_table;

/// Performs a mutation on the `AppState` and then sends a `ResultsUpdated`
/// event so the presenter re-renders the whole table.
pub fn with_state_and_notify<F, P: EventProxy + ?Sized>(state: &mut AppState, proxy: &P, update_fn: F)
where
    F: FnOnce(&mut AppState),
{
    update_fn(state);

    let table = generate_result_table(state);
    proxy.send_event(UserEvent::ResultsUpdated(Box::new(table)));
}
