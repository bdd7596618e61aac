//! Logging helpers. User-supplied identifiers are free text, so they are escaped
//! before they reach a log line.

/// Escape an identifier for single-line logging.
///
/// Quotes the value, escapes backslashes, quotes and control characters, and
/// caps the preview so a hostile name cannot flood the log.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 64;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 2);
    out.push('"');
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:04x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Describe a message body for logs without revealing it.
pub fn body_summary(body: &[u8]) -> String {
    format!("<{} bytes>", body.len())
}
