//! Helpers for fitting text into chat messages.

/// Byte budget for one outgoing line, leaving room for the IRC prefix.
pub const MAX_MESSAGE_BYTES: usize = 400;

/// Marker appended to a line that had to be cut.
pub const ELLIPSIS: &str = " […]";

/// Splits `text` into the part that fits in `max_bytes` and the excess.
///
/// The cut is made at the last space within the budget so words stay whole;
/// a text with no usable space is cut at the last character boundary that
/// fits. The excess has its leading whitespace removed.
pub fn sendable_message(text: &str, max_bytes: usize) -> (&str, &str) {
    if text.len() <= max_bytes {
        return (text, "");
    }

    let mut cut = max_bytes;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }

    match text[..cut].rfind(' ') {
        Some(space) if space > 0 => (&text[..space], text[space..].trim_start()),
        _ => (&text[..cut], text[cut..].trim_start()),
    }
}

/// Cuts `text` to the message budget, marking the cut with [`ELLIPSIS`].
///
/// The marker counts against the budget, so a result never exceeds
/// `max_bytes` and cutting it again leaves it unchanged.
pub fn truncate_with_ellipsis(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let (head, _) = sendable_message(text, max_bytes.saturating_sub(ELLIPSIS.len()));
    format!("{}{}", head, ELLIPSIS)
}

/// Drops the characters that would end or corrupt an IRC line.
pub fn single_line(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\r' | '\n' | '\0')).collect()
}

/// Makes a line safe to send: one line, within `max_bytes`.
pub fn sendable_line(text: &str, max_bytes: usize) -> String {
    truncate_with_ellipsis(&single_line(text), max_bytes)
}

/// Renders an integer with `,` between groups of three digits.
pub fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
