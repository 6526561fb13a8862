//! An abstraction layer for the system clipboard to enable testing.

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{self, Write};

/// Defines a common interface for placing text on a clipboard.
/// This allows for a mock implementation during tests.
pub trait ClipboardService {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// The production implementation: asks the terminal emulator to set the
/// clipboard through an OSC 52 escape sequence written to stdout.
pub struct TerminalClipboard;

impl ClipboardService for TerminalClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
