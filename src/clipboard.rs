use std::io::{self, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { bytes: usize },
    NothingToCopy,
}

/// Hands the trimmed draft to the terminal's clipboard via an OSC 52
/// escape. Blank drafts write nothing.
pub fn copy_to_clipboard(out: &mut impl Write, draft: &str) -> io::Result<CopyOutcome> {
    let text = draft.trim();
    if text.is_empty() {
        return Ok(CopyOutcome::NothingToCopy);
    }
    write!(out, "{}", osc52_sequence(text))?;
    out.flush()?;
    Ok(CopyOutcome::Copied { bytes: text.len() })
}

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
