//! Plain-text tables for terminal output.

use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";

/// Render `rows` under `headers` with left-aligned, padded columns.
///
/// Widths are measured in terminal columns, so titles containing CJK text or
/// emoji still line up. The last column is never padded.
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
  let mut widths: Vec<usize> = headers.iter().map(|header| header.width()).collect();
  for row in rows {
    for (index, cell) in row.iter().enumerate().take(widths.len()) {
      widths[index] = widths[index].max(cell.width());
    }
  }

  let mut output = String::new();
  let header_cells: Vec<String> = headers.iter().map(|header| header.to_string()).collect();
  push_row(&mut output, &header_cells, &widths);
  for row in rows {
    push_row(&mut output, row, &widths);
  }
  output
}

fn push_row(output: &mut String, row: &[String], widths: &[usize]) {
  let mut line = String::new();
  for (index, width) in widths.iter().enumerate() {
    let cell = row.get(index).map(String::as_str).unwrap_or_default();
    if index > 0 {
      line.push_str(COLUMN_GAP);
    }
    line.push_str(cell);
    if index + 1 < widths.len() {
      line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
  }
  output.push_str(line.trim_end());
  output.push('\n');
}
