//! Renders `UserEvent`s as plain text for a terminal.

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::view_model::ResultTable;
use std::io::{self, Write};

const COLUMN_SEPARATOR: &str = " | ";

/// Renders the table with a leading row-number column. The selected row is
/// marked with `>`. Cells are left-aligned and padded to the column width.
pub fn render_table(table: &ResultTable) -> String {
    let index_width = table.rows.len().to_string().len();
    let pad = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&table.column_widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR)
    };

    let mut lines = Vec::with_capacity(table.rows.len() + 3);
    lines.push(format!(
        "  {:>w$}{}{}",
        "#",
        COLUMN_SEPARATOR,
        pad(&table.headers),
        w = index_width
    ));
    let rule: Vec<String> = std::iter::once(index_width)
        .chain(table.column_widths.iter().copied())
        .map(|w| "-".repeat(w))
        .collect();
    lines.push(format!("  {}", rule.join("-+-")));

    for (index, row) in table.rows.iter().enumerate() {
        let marker = if table.selected_row == Some(index) { '>' } else { ' ' };
        lines.push(format!(
            "{} {:>w$}{}{}",
            marker,
            index + 1,
            COLUMN_SEPARATOR,
            pad(row),
            w = index_width
        ));
    }
    if table.rows.is_empty() {
        lines.push("  (no matching rows)".to_string());
    }

    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_event(event: &UserEvent) -> String {
    match event {
        UserEvent::ResultsUpdated(table) => {
            format!("{}\n{}", render_table(table), table.status_message)
        }
        UserEvent::StatusUpdate(message) => message.clone(),
        UserEvent::ShowInfo(message) => format!("[info] {}", message),
        UserEvent::ShowError(message) => format!("[error] {}", message),
        UserEvent::ShowMetadata(metadata) => {
            let mut lines = vec!["File info".to_string()];
            lines.extend(metadata.display_lines().into_iter().map(|l| format!("  {}", l)));
            lines.join("\n")
        }
        UserEvent::CopiedToClipboard(text) => {
            format!("Copied row to clipboard ({} characters).", text.chars().count())
        }
    }
}

/// The production presenter: errors go to stderr, everything else to stdout.
pub struct TerminalPresenter;

impl EventProxy for TerminalPresenter {
    fn send_event(&self, event: UserEvent) {
        let text = render_event(&event);
        let result = match event {
            UserEvent::ShowError(_) => writeln!(io::stderr().lock(), "{}", text),
            _ => writeln!(io::stdout().lock(), "{}", text),
        };
        // The presenter is fire-and-forget; a closed terminal is only logged.
        if let Err(e) = result {
            tracing::warn!("Failed to write event to terminal: {}", e);
        }
    }
}
