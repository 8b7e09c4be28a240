use std::io::{self, Write};
use crate::DrawError;

/// Print a `DrawError` with a caret under the offending character.
/// If `program` is `Some("letdraw")`, prefix messages with "letdraw: ...".
pub fn print_draw_error(program: Option<&str>, code: &[u8], err: &DrawError) {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    match err {
        DrawError::StackUnderflow { ip } => {
            let msg = prefix_program("Runtime error: pop on an empty state stack");
            print_error_with_context(&msg, code, *ip);
        }
        DrawError::AllocationFailure { ip, requested } => {
            let msg = prefix_program(&format!(
                "Runtime error: state stack cannot grow to {requested} entries"
            ));
            print_error_with_context(&msg, code, *ip);
        }
        DrawError::Io { source, .. } => {
            eprintln!("{}", prefix_program(&format!("I/O error: {source}")));
            let _ = io::stderr().flush();
        }
    }
}

/// Print a concise error with the byte offset and a context window around it.
pub fn print_error_with_context(prefix: &str, code: &[u8], pos: usize) {
    eprintln!("{prefix} at offset {pos}");

    // Show a short window around the position for context
    const WINDOW: usize = 32;

    let start = pos.saturating_sub(WINDOW);
    let end = (pos + WINDOW + 1).min(code.len());
    if start >= end {
        let _ = io::stderr().flush();
        return;
    }

    // One byte per column keeps the caret aligned with the offset.
    let slice: String = code[start..end]
        .iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { ' ' })
        .collect();
    eprintln!("  {}", slice);

    let caret_offset = pos.saturating_sub(start);
    eprintln!("  {}^", " ".repeat(caret_offset));
    let _ = io::stderr().flush();
}
