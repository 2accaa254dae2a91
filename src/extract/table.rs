//! Table-to-TSV encoding.
//!
//! Encodes a table grid as tab-separated cells and newline-terminated rows,
//! the format spreadsheet applications accept on paste. A cell whose text
//! contains a newline is wrapped in double quotes with internal quotes
//! doubled, so multi-line cells survive the paste intact.

/// A table captured as rows of cell text, top-to-bottom, left-to-right.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TableGrid {
    pub rows: Vec<Vec<String>>,
}

impl TableGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

/// Encode a grid for pasting into a spreadsheet.
///
/// Cells are joined with `\t`, every row (including the last) ends with
/// `\n`. Quoting is triggered by embedded newlines only; a quote inside a
/// newline-free cell passes through verbatim.
pub fn encode_table(grid: &TableGrid) -> String {
    let mut out = String::new();
    for row in &grid.rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push('\t');
            }
            out.push_str(&encode_cell(cell));
        }
        out.push('\n');
    }
    out
}

fn encode_cell(text: &str) -> String {
    if text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> TableGrid {
        TableGrid::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_simple_grid() {
        let g = grid(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(encode_table(&g), "a\tb\nc\td\n");
    }

    #[test]
    fn test_newline_cell_is_quoted() {
        let g = grid(&[&["a", "b"], &["c\nd", "e"]]);
        assert_eq!(encode_table(&g), "a\tb\n\"c\nd\"\te\n");
    }

    #[test]
    fn test_embedded_quote_in_multiline_cell_is_doubled() {
        assert_eq!(
            encode_cell("He said \"hi\"\nbye"),
            "\"He said \"\"hi\"\"\nbye\""
        );
    }

    #[test]
    fn test_quote_without_newline_passes_through() {
        assert_eq!(encode_cell("say \"hi\""), "say \"hi\"");
    }

    #[test]
    fn test_empty_grid() {
        assert_eq!(encode_table(&TableGrid::default()), "");
    }

    #[test]
    fn test_ragged_rows() {
        let g = grid(&[&["a"], &["b", "c", "d"]]);
        assert_eq!(encode_table(&g), "a\nb\tc\td\n");
    }
}
