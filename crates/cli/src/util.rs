use unicode_width::UnicodeWidthStr;

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Right-pad a string with spaces to `width` display columns.
/// Strings already at or past `width` are returned unchanged.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let sw = display_width(s);
    if sw >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - sw))
    }
}

/// Fixed-width layout: every column padded to its widest cell, columns
/// joined by one space, trailing padding trimmed per line.
pub(crate) fn tabulate(rows: &[Vec<String>]) -> Vec<String> {
    let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in rows {
        for (i, v) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(v));
        }
    }

    rows.iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, v)| pad_right(v, widths[i]))
                .collect();
            cells.join(" ").trim_end().to_string()
        })
        .collect()
}
