//! Pipe-table repair for answer text.
//!
//! Answers generated upstream mix rows with and without boundary pipes, which
//! makes Markdown renderers infer different column counts per row. Every row
//! of a table is rewritten without its boundary segments, using the header
//! row's column count to locate the trailing one. The transform only looks at
//! delimiter positions, so a genuinely empty first or last data cell cannot be
//! told apart from a boundary artifact.
//!
//! Blank header cells do not count as columns. A header with a blank corner
//! cell (`|   | Q1 | Q2 |`) therefore yields one column too few, and the last
//! column of every row in that table is dropped.

const DELIMITER: char = '|';
const CELL_SEPARATOR: &str = " | ";

/// Rewrites pipe-delimited table rows; every other line is kept verbatim.
///
/// The output has exactly as many lines as the input, and no rewritten row
/// is itself bounded by pipes, so applying the function twice is the same as
/// applying it once.
pub fn normalize_tables(text: &str) -> String {
    let mut header_cols: Option<usize> = None;
    let mut out = Vec::new();

    for line in text.split('\n') {
        let (body, line_end) = match line.strip_suffix('\r') {
            Some(body) => (body, "\r"),
            None => (line, ""),
        };

        if !is_table_row(body) {
            header_cols = None;
            out.push(line.to_string());
            continue;
        }

        let row = body.trim();
        let cols = *header_cols.get_or_insert_with(|| count_filled_cells(row));
        let mut rebuilt = rebuild_row(row, cols);
        rebuilt.push_str(line_end);
        out.push(rebuilt);
    }

    out.join("\n")
}

/// A candidate row starts and ends with the delimiter once trimmed.
pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with(DELIMITER) && trimmed.ends_with(DELIMITER)
}

fn count_filled_cells(row: &str) -> usize {
    row.split(DELIMITER)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

fn rebuild_row(row: &str, cols: usize) -> String {
    let mut cells: Vec<&str> = row
        .split(DELIMITER)
        .skip(1)
        .enumerate()
        .filter(|(index, _)| *index != cols)
        .map(|(_, segment)| segment.trim())
        .collect();

    // A row that starts and ends with an empty cell would read as a bounded
    // row again; its trailing empty cells go.
    if cells.first().is_some_and(|cell| cell.is_empty()) {
        while cells.len() > 1 && cells.last().is_some_and(|cell| cell.is_empty()) {
            cells.pop();
        }
    }

    cells.join(CELL_SEPARATOR)
}
