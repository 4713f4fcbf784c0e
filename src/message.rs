//! MarkdownV2 escaping and chunked message formatting

use chrono::Local;

use crate::webhook::ChangeEntry;

/// Telegram message length limit, counted in Unicode scalar values.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

const HEADER: &str = "📢 *New Firmware Updates Detected\\!*\n\n";

/// Characters reserved by Telegram MarkdownV2.
const RESERVED_CHARS: [char; 18] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escape reserved MarkdownV2 characters with a backslash prefix.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if RESERVED_CHARS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Formats change entries into deliverable message bodies, each at most
/// `max_len` characters. The footer timestamp is computed once per call.
/// Returns no chunks for empty input.
pub fn build_chunks(changes: &[ChangeEntry], max_len: usize) -> Vec<String> {
    let timestamp = Local::now().format("%H:%M:%S").to_string();
    let footer = format!("\n\n_Checked at {}_", escape_markdown(&timestamp));
    pack_chunks(changes, max_len, &footer)
}

/// Greedy packing: lines are appended to the current chunk until the
/// next line (plus footer) would push it past `max_len`, at which point
/// the chunk is closed and a new one starts with that line. A single
/// line longer than the limit still goes out alone, unsplit.
fn pack_chunks(changes: &[ChangeEntry], max_len: usize, footer: &str) -> Vec<String> {
    if changes.is_empty() {
        return Vec::new();
    }

    let header_len = HEADER.chars().count();
    let footer_len = footer.chars().count();

    let mut chunks = Vec::new();
    let mut current = String::from(HEADER);
    let mut current_len = header_len;

    for change in changes {
        let line = format!(
            "• [{}]({})\n",
            escape_markdown(&change.description),
            escape_markdown(&change.source_url)
        );
        let line_len = line.chars().count();

        if current_len + line_len + footer_len > max_len {
            chunks.push(format!("{}{}", current, footer));
            current = format!("{}{}", HEADER, line);
            current_len = header_len + line_len;
        } else {
            current.push_str(&line);
            current_len += line_len;
        }
    }

    if current != HEADER {
        chunks.push(format!("{}{}", current, footer));
    }

    chunks
}
