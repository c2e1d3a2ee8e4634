use unicode_width::UnicodeWidthChar;

/// Number of terminal cells a single glyph occupies on the canvas.
///
/// Zero-width and control characters still take one cell so every glyph stays
/// addressable.
pub fn char_cells(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1).max(1)
}

/// Display width of a line of text, in canvas cells.
pub fn text_cells(text: &str) -> usize {
    text.chars().map(char_cells).sum()
}

/// Left-justify `text` to `width` cells with trailing spaces.
pub fn pad_right(text: &str, width: usize) -> String {
    let used = text_cells(text);
    let mut out = String::with_capacity(text.len() + width.saturating_sub(used));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}
