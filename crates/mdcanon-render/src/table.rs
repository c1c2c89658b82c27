//! Table accumulation and emission.
//!
//! Tables are not rendered incrementally: cell handlers push rendered cell
//! text here, and the whole table is emitted once its node closes. Column
//! width is the maximum visual width seen across the header and every body
//! cell of that column, so each cell stores the width it was measured at.

use mdcanon_core::Alignment;

#[derive(Debug)]
struct Cell {
    text: String,
    width: usize,
}

/// Accumulated state for the single table currently being rendered.
#[derive(Debug, Default)]
pub struct TableAccum {
    headers: Vec<Cell>,
    aligns: Vec<Alignment>,
    widths: Vec<usize>,
    cells: Vec<Cell>,
}

impl TableAccum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a header cell; column order follows push order.
    pub fn push_header(&mut self, text: String, width: usize, alignment: Alignment) {
        self.aligns.push(alignment);
        self.widths.push(width);
        self.headers.push(Cell { text, width });
    }

    /// Record a body cell in row-major order, widening its column if needed.
    /// Cells beyond the header's column count are clamped into range.
    pub fn push_cell(&mut self, text: String, width: usize) {
        if self.headers.is_empty() {
            return;
        }
        let column = self.cells.len() % self.headers.len();
        if width > self.widths[column] {
            self.widths[column] = width;
        }
        self.cells.push(Cell { text, width });
    }

    /// Emit the accumulated table and reset for the next one.
    pub fn emit(&mut self, out: &mut String) {
        if self.headers.is_empty() {
            self.clear();
            return;
        }

        for (column, cell) in self.headers.iter().enumerate() {
            out.push_str("| ");
            out.push_str(&cell.text);
            for _ in cell.width..self.widths[column] {
                out.push(' ');
            }
            out.push(' ');
        }
        out.push_str("|\n");

        for (column, width) in self.widths.iter().enumerate() {
            out.push('|');
            match self.aligns[column] {
                Alignment::Left | Alignment::Center => out.push(':'),
                _ => out.push('-'),
            }
            for _ in 0..*width {
                out.push('-');
            }
            match self.aligns[column] {
                Alignment::Right | Alignment::Center => out.push(':'),
                _ => out.push('-'),
            }
        }
        out.push_str("|\n");

        for row in self.cells.chunks(self.headers.len()) {
            for (column, cell) in row.iter().enumerate() {
                out.push_str("| ");
                let pad = self.widths[column].saturating_sub(cell.width);
                match self.aligns[column] {
                    Alignment::Center => {
                        for _ in 0..pad / 2 {
                            out.push(' ');
                        }
                        out.push_str(&cell.text);
                        for _ in 0..pad - pad / 2 {
                            out.push(' ');
                        }
                    }
                    Alignment::Right => {
                        for _ in 0..pad {
                            out.push(' ');
                        }
                        out.push_str(&cell.text);
                    }
                    _ => {
                        out.push_str(&cell.text);
                        for _ in 0..pad {
                            out.push(' ');
                        }
                    }
                }
                out.push(' ');
            }
            out.push_str("|\n");
        }

        self.clear();
    }

    fn clear(&mut self) {
        self.headers.clear();
        self.aligns.clear();
        self.widths.clear();
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_to_string(accum: &mut TableAccum) -> String {
        let mut out = String::new();
        accum.emit(&mut out);
        out
    }

    #[test]
    fn test_column_width_is_max_of_header_and_body() {
        let mut accum = TableAccum::new();
        accum.push_header("Name".to_string(), 4, Alignment::Left);
        accum.push_header("Age".to_string(), 3, Alignment::Right);
        accum.push_cell("Alice".to_string(), 5);
        accum.push_cell("30".to_string(), 2);

        let out = emit_to_string(&mut accum);
        assert_eq!(
            out,
            "| Name  | Age |\n|:------|----:|\n| Alice |  30 |\n"
        );
    }

    #[test]
    fn test_center_alignment_puts_extra_space_right() {
        let mut accum = TableAccum::new();
        accum.push_header("head".to_string(), 4, Alignment::Center);
        accum.push_cell("x".to_string(), 1);

        let out = emit_to_string(&mut accum);
        // pad = 3: one space left, two right
        assert_eq!(out, "| head |\n|:----:|\n|  x   |\n");
    }

    #[test]
    fn test_default_alignment_left_justifies_with_plain_dashes() {
        let mut accum = TableAccum::new();
        accum.push_header("col".to_string(), 3, Alignment::None);
        accum.push_cell("a".to_string(), 1);

        let out = emit_to_string(&mut accum);
        assert_eq!(out, "| col |\n|-----|\n| a   |\n");
    }

    #[test]
    fn test_emit_resets_state() {
        let mut accum = TableAccum::new();
        accum.push_header("a".to_string(), 1, Alignment::None);
        accum.push_cell("b".to_string(), 1);
        emit_to_string(&mut accum);

        assert_eq!(emit_to_string(&mut accum), "");
    }

    #[test]
    fn test_every_row_has_same_cell_count() {
        let mut accum = TableAccum::new();
        accum.push_header("one".to_string(), 3, Alignment::None);
        accum.push_header("two".to_string(), 3, Alignment::None);
        accum.push_cell("a".to_string(), 1);
        accum.push_cell("b".to_string(), 1);
        accum.push_cell("c".to_string(), 1);
        accum.push_cell("d".to_string(), 1);

        let out = emit_to_string(&mut accum);
        for line in out.lines() {
            assert_eq!(line.matches('|').count(), 3, "row {line:?}");
        }
    }
}
