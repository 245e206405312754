//! Enter-key handling for the outline input.
//!
//! A new line inherits the indentation of the line the cursor is on, so
//! typing a listing only needs an extra space to go one level deeper. A line
//! holding nothing but a single space is treated as "done with this level":
//! it is emptied and the new line starts at one space.

/// Insert a newline at `cursor` (a byte offset) and return the new text and
/// cursor. Offsets past the end or inside a character are pulled back to the
/// nearest char boundary.
pub fn insert_newline(text: &str, cursor: usize) -> (String, usize) {
    let cursor = clamp_to_char_boundary(text, cursor);
    let line_start = text[..cursor].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[line_start..]
        .find('\n')
        .map_or(text.len(), |i| line_start + i);
    let line = &text[line_start..line_end];

    if line == " " && cursor == line_start + 1 {
        let insert = "\n ";
        let mut out = String::with_capacity(text.len() + insert.len());
        out.push_str(&text[..line_start]);
        out.push_str(insert);
        out.push_str(&text[cursor..]);
        return (out, line_start + insert.len());
    }

    let indent = match leading_whitespace(line) {
        "" => " ",
        ws => ws,
    };

    let mut out = String::with_capacity(text.len() + indent.len() + 1);
    out.push_str(&text[..cursor]);
    out.push('\n');
    out.push_str(indent);
    out.push_str(&text[cursor..]);
    (out, cursor + 1 + indent.len())
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn clamp_to_char_boundary(text: &str, cursor: usize) -> usize {
    let mut c = cursor.min(text.len());
    while !text.is_char_boundary(c) {
        c -= 1;
    }
    c
}
